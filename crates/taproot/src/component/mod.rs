//! Component base: two-phase configuration over a participant chain.
//!
//! Construction is strictly sequential: normalize the argument vector,
//! collect every participant's options into one parser, parse, snapshot the
//! values, configure logging, then distribute the parsed configuration back
//! over the chain.

mod argv;

pub use argv::ArgSource;

use crate::bag::AttrBag;
use crate::error::TaprootError;
use crate::lineage::{Lineage, Participant};
use crate::logging::{self, LogContext, Logger};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{LevelFilter, debug};
use serde_json::Value;
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

/// Option id for the component service name.
const SERVICE_NAME: &str = "service_name";
/// Option id for the log level.
const LOG_LEVEL: &str = "log_level";
/// Option id for the log output path.
const LOG_PATH: &str = "log_path";
/// Option id for the console mirroring flag.
const VERBOSE: &str = "verbose";
/// The four standard option ids contributed by the component base.
const CORE_OPTION_IDS: [&str; 4] = [SERVICE_NAME, LOG_LEVEL, LOG_PATH, VERBOSE];
/// Id of clap's built-in help flag, excluded from value capture.
const HELP_ID: &str = "help";
/// Default log level name.
const DEFAULT_LEVEL: &str = "error";

/// What a participant's phase-2 hook receives.
pub struct ConfigContext<'a> {
    /// Parse result for the accumulated option set.
    pub args: &'a ArgMatches,
    /// Snapshot of every captured option value, keyed by option id.
    pub settings: &'a AttrBag,
    /// The component logger, already configured.
    pub log: &'a Logger,
}

/// A fully configured component wrapping the app participant `A`.
///
/// Derefs to the app, so app state reads naturally through the component.
pub struct Component<A: Participant> {
    app: A,
    ancestors: Lineage,
    service_name: String,
    service_name_set: bool,
    log_level: LevelFilter,
    log_path: Option<PathBuf>,
    verbose: bool,
    log: Logger,
    settings: AttrBag,
}

impl<A: Participant> Component<A> {
    /// Start building a component around the given app participant.
    pub fn builder(app: A) -> ComponentBuilder<A> {
        ComponentBuilder {
            app,
            ancestors: Lineage::new(),
            argv: None,
            service_name: None,
            log_level: None,
            log_path: None,
            verbose: None,
            log_context: None,
            logger: None,
        }
    }

    /// The resolved service name.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// True when the service name was set explicitly rather than defaulted.
    pub fn service_name_set(&self) -> bool {
        self.service_name_set
    }

    /// The resolved log level.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// The configured log path, when one was set.
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    /// True when console mirroring is enabled.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// The component logger.
    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Snapshot of every captured option value.
    pub fn settings(&self) -> &AttrBag {
        &self.settings
    }

    /// The mid-chain participants registered between the base and the app.
    pub fn ancestors(&self) -> &Lineage {
        &self.ancestors
    }

    /// Hand back the configured app participant.
    pub fn into_app(self) -> A {
        self.app
    }
}

impl<A: Participant> Deref for Component<A> {
    type Target = A;

    fn deref(&self) -> &A {
        &self.app
    }
}

impl<A: Participant> DerefMut for Component<A> {
    fn deref_mut(&mut self) -> &mut A {
        &mut self.app
    }
}

impl<A: Participant> std::fmt::Debug for Component<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("service_name", &self.service_name)
            .field("service_name_set", &self.service_name_set)
            .field("log_level", &self.log_level)
            .field("log_path", &self.log_path)
            .field("verbose", &self.verbose)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder collecting the argument vector, chain members, and explicit
/// overrides for one component.
pub struct ComponentBuilder<A: Participant> {
    app: A,
    ancestors: Lineage,
    argv: Option<ArgSource>,
    service_name: Option<String>,
    log_level: Option<String>,
    log_path: Option<PathBuf>,
    verbose: Option<bool>,
    log_context: Option<LogContext>,
    logger: Option<Logger>,
}

impl<A: Participant> ComponentBuilder<A> {
    /// Supply the argument vector, either pre-split tokens or a single
    /// command line.
    pub fn argv(mut self, argv: impl Into<ArgSource>) -> Self {
        self.argv = Some(argv.into());
        self
    }

    /// Register a mid-chain participant between the base and the app.
    /// Registration order is chain order, base first.
    pub fn ancestor(mut self, participant: impl Participant + 'static) -> Self {
        self.ancestors.push(Box::new(participant));
        self
    }

    /// Override the service name; also marks the name as explicitly set.
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Override the default log level by name. Unrecognized names resolve to
    /// the most restrictive level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Override the default log path.
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Override the console mirroring flag.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Configure logging against a shared context instead of a private one.
    pub fn log_context(mut self, context: LogContext) -> Self {
        self.log_context = Some(context);
        self
    }

    /// Use an externally supplied logger; log setup is skipped entirely.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Build the component, terminating the process on argument-parsing
    /// failure.
    ///
    /// Parse failures print usage to stderr and exit with a non-zero status;
    /// `-h`/`--help` prints usage and exits with status zero. Every other
    /// failure is returned.
    pub fn build(self) -> Result<Component<A>, TaprootError> {
        match self.run() {
            Err(TaprootError::Parse(err)) => err.exit(),
            other => other,
        }
    }

    /// Build the component, returning argument-parsing failures instead of
    /// exiting.
    pub fn try_build(self) -> Result<Component<A>, TaprootError> {
        self.run()
    }

    fn run(self) -> Result<Component<A>, TaprootError> {
        let ComponentBuilder {
            mut app,
            mut ancestors,
            argv,
            service_name,
            log_level,
            log_path,
            verbose,
            log_context,
            logger,
        } = self;

        let argv = argv.unwrap_or_default().normalize()?;
        debug!("normalized argument vector (tokens={})", argv.len());

        let service_name_set = service_name.is_some() || argv_names_service(&argv);

        // Explicit overrides become parser defaults; built-ins fill the rest.
        let mut defaults = AttrBag::new();
        if let Some(name) = service_name {
            defaults.insert(SERVICE_NAME, Value::String(name));
        }
        if let Some(level) = log_level {
            defaults.insert(LOG_LEVEL, Value::String(level));
        }
        if let Some(path) = &log_path {
            defaults.insert(LOG_PATH, Value::String(path.display().to_string()));
        }
        if let Some(verbose) = verbose {
            defaults.insert(VERBOSE, Value::Bool(verbose));
        }
        defaults.set_if_unset([
            (SERVICE_NAME, Value::String(app.name().to_string())),
            (LOG_LEVEL, Value::String(DEFAULT_LEVEL.to_string())),
            (VERBOSE, Value::Bool(false)),
        ]);

        let default_name = defaults
            .str_value(SERVICE_NAME)
            .unwrap_or_default()
            .to_string();
        if default_name.trim().is_empty() {
            return Err(TaprootError::InvalidArgument(
                "service name must not be empty".to_string(),
            ));
        }

        // Phase 1: one parser accumulates every participant's options.
        let cmd = core_options(
            Command::new(default_name.clone()).no_binary_name(true),
            &defaults,
        );
        let cmd = ancestors.collect_options(cmd);
        debug!("collecting options (participant={})", app.name());
        let cmd = app.options(cmd);

        let plan = capture_plan(&cmd);
        let matches = cmd.try_get_matches_from(&argv)?;
        debug!("argument vector parsed (captured={})", plan.len());

        let parsed = snapshot_values(&matches, &plan);
        let mut settings = AttrBag::new();
        settings.assign_from_map(&parsed);

        let mut core_values = AttrBag::new();
        core_values.copy_from(&settings, CORE_OPTION_IDS);

        let service_name = core_values
            .str_value(SERVICE_NAME)
            .unwrap_or(&default_name)
            .to_string();
        let log_level =
            logging::resolve_level(core_values.str_value(LOG_LEVEL).unwrap_or(DEFAULT_LEVEL));
        let log_path = core_values.str_value(LOG_PATH).map(PathBuf::from);
        let verbose = core_values.bool_value(VERBOSE).unwrap_or(false);

        let log = match logger {
            Some(logger) => logger,
            None => {
                let context = log_context.unwrap_or_default();
                let logger = context.logger(&service_name);
                logger.set_level(log_level);
                if let Some(path) = &log_path {
                    if !logging::is_log_file(path) {
                        fs::create_dir_all(path)?;
                    }
                    let file = logging::resolve_log_file(path, &service_name);
                    logger.attach_file(&file)?;
                }
                if verbose {
                    logger.attach_console();
                }
                logger
            }
        };
        log.info(format!("logging configured for: {service_name}"));

        // Phase 2: distribute the parsed configuration over the chain.
        let ctx = ConfigContext {
            args: &matches,
            settings: &settings,
            log: &log,
        };
        ancestors.distribute(&ctx)?;
        debug!("distributing configuration (participant={})", app.name());
        app.configure(&ctx)?;

        log.info("component configuration complete");
        log.info(format!("configuration: {settings}"));

        Ok(Component {
            app,
            ancestors,
            service_name,
            service_name_set,
            log_level,
            log_path,
            verbose,
            log,
            settings,
        })
    }
}

/// The component base's own phase-1 hook: the four standard options.
fn core_options(cmd: Command, defaults: &AttrBag) -> Command {
    let service_name = defaults
        .str_value(SERVICE_NAME)
        .unwrap_or_default()
        .to_string();
    let level = defaults
        .str_value(LOG_LEVEL)
        .unwrap_or(DEFAULT_LEVEL)
        .to_string();
    let verbose = defaults.bool_value(VERBOSE).unwrap_or(false);

    let mut log_path = Arg::new(LOG_PATH).long(LOG_PATH).help(
        "Path for log output. A directory receives <service_name>.log; \
         a path ending in .log is used verbatim.",
    );
    if let Some(path) = defaults.str_value(LOG_PATH) {
        log_path = log_path.default_value(path.to_string());
    }

    cmd.arg(
        Arg::new(SERVICE_NAME)
            .long(SERVICE_NAME)
            .default_value(service_name)
            .help("Name for the component instance, reflected in log output."),
    )
    .arg(
        Arg::new(LOG_LEVEL)
            .long(LOG_LEVEL)
            .value_parser(logging::LEVEL_NAMES)
            .default_value(level)
            .help("Log level for log output."),
    )
    .arg(log_path)
    .arg(
        Arg::new(VERBOSE)
            .long(VERBOSE)
            .action(ArgAction::SetTrue)
            .default_value(if verbose { "true" } else { "false" })
            .help("Mirror log output to the console. Useful for debugging."),
    )
}

/// True when the vector carries an explicit `--service_name` token.
fn argv_names_service(argv: &[String]) -> bool {
    let flag = format!("--{SERVICE_NAME}");
    let flag_eq = format!("{flag}=");
    argv.iter()
        .any(|token| token == &flag || token.starts_with(&flag_eq))
}

/// How a declared option's parsed value is captured into the settings bag.
enum CaptureKind {
    Flag,
    Count,
    Values,
}

/// Destination ids and capture kinds for every declared option except the
/// built-in help flag.
fn capture_plan(cmd: &Command) -> Vec<(String, CaptureKind)> {
    cmd.get_arguments()
        .filter(|arg| arg.get_id().as_str() != HELP_ID)
        .map(|arg| {
            let kind = match arg.get_action() {
                ArgAction::SetTrue | ArgAction::SetFalse => CaptureKind::Flag,
                ArgAction::Count => CaptureKind::Count,
                _ => CaptureKind::Values,
            };
            (arg.get_id().as_str().to_string(), kind)
        })
        .collect()
}

/// Snapshot parsed values into a JSON object map. Options without a value
/// and without a default are absent from the snapshot.
fn snapshot_values(
    matches: &ArgMatches,
    plan: &[(String, CaptureKind)],
) -> serde_json::Map<String, Value> {
    let mut parsed = serde_json::Map::new();
    for (id, kind) in plan {
        let value = match kind {
            CaptureKind::Flag => Some(Value::Bool(matches.get_flag(id))),
            CaptureKind::Count => Some(Value::from(matches.get_count(id))),
            CaptureKind::Values => matches.get_raw(id).map(|raw| {
                let mut values: Vec<Value> = raw
                    .map(|os| Value::String(os.to_string_lossy().into_owned()))
                    .collect();
                if values.len() == 1 {
                    values.remove(0)
                } else {
                    Value::Array(values)
                }
            }),
        };
        if let Some(value) = value {
            parsed.insert(id.clone(), value);
        }
    }
    parsed
}
