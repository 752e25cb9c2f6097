//! Interactive greeter demo with a language option.
//!
//! Reads names from stdin and greets each in the configured language until
//! an empty line ends the session.

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Arg, Command};
use std::io::{self, BufRead, Write};
use taproot::{Component, ConfigContext, Participant, TaprootError};

/// Salutations by language.
const SALUTATIONS: [(&str, &str); 8] = [
    ("Basque", "Kaixo"),
    ("Chinese", "Nǐ hǎo"),
    ("English", "Hello"),
    ("French", "Bonjour"),
    ("German", "Hallo"),
    ("Hindi", "Namastē"),
    ("Japanese", "Kon'nichiwa"),
    ("Spanish", "Hola"),
];

struct Polyglot {
    lang: String,
}

impl Default for Polyglot {
    fn default() -> Self {
        Self {
            lang: "Spanish".to_string(),
        }
    }
}

impl Polyglot {
    fn greet(&self, log: &taproot::Logger, name: &str) -> String {
        let salutation = SALUTATIONS
            .iter()
            .find(|(lang, _)| lang == &self.lang)
            .map(|(_, salutation)| *salutation)
            .unwrap_or("Hello");
        let greeting = format!("{salutation} {name}");
        log.debug(format!("greeting: {greeting}"));
        greeting
    }
}

impl Participant for Polyglot {
    fn name(&self) -> &str {
        "Polyglot"
    }

    fn options(&self, cmd: Command) -> Command {
        let languages: Vec<&str> = SALUTATIONS.iter().map(|(lang, _)| *lang).collect();
        cmd.arg(
            Arg::new("lang")
                .short('l')
                .value_parser(PossibleValuesParser::new(languages))
                .default_value(self.lang.clone())
                .help("Language for the salutation."),
        )
    }

    fn configure(&mut self, ctx: &ConfigContext<'_>) -> Result<(), TaprootError> {
        if let Some(lang) = ctx.args.get_one::<String>("lang") {
            self.lang = lang.clone();
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let polyglot = Component::builder(Polyglot::default())
        .argv(std::env::args())
        .build()
        .context("failed to configure polyglot")?;

    let stdin = io::stdin();
    loop {
        print!("Enter name (no input quits): ");
        io::stdout().flush().context("flush prompt")?;

        let mut name = String::new();
        stdin.lock().read_line(&mut name).context("read name")?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }

        println!("{}", polyglot.greet(polyglot.log(), name));
    }

    Ok(())
}
