//! Hello-world component demo.
//!
//! Builds one greeter from the process argument vector and a second from
//! explicit overrides, then lets each greet through its configured logger.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use taproot::{Component, ConfigContext, Participant, TaprootError};

struct Greeter {
    name: String,
}

impl Default for Greeter {
    fn default() -> Self {
        Self {
            name: "World".to_string(),
        }
    }
}

impl Participant for Greeter {
    fn name(&self) -> &str {
        "Greeter"
    }

    fn options(&self, cmd: Command) -> Command {
        cmd.arg(
            Arg::new("name")
                .long("name")
                .default_value(self.name.clone())
                .help("Whom will receive the salutation."),
        )
    }

    fn configure(&mut self, ctx: &ConfigContext<'_>) -> Result<(), TaprootError> {
        if let Some(name) = ctx.args.get_one::<String>("name") {
            self.name = name.clone();
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let greeter = Component::builder(Greeter::default())
        .argv(std::env::args())
        .build()
        .context("failed to configure greeter")?;
    greeter.log().info(format!("Hello {}", greeter.name));

    // Override-style construction, no argument vector involved.
    let dog = Component::builder(Greeter {
        name: "Dog".to_string(),
    })
    .service_name("DogWorld")
    .log_level("info")
    .verbose(true)
    .build()
    .context("failed to configure override greeter")?;
    dog.log().info(format!("Hello {}", dog.name));

    Ok(())
}
