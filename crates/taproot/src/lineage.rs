//! Configuration participants and the ordered chain they form.
//!
//! A lineage replaces virtual-method override resolution with an explicit,
//! base-first list of participants. Both lifecycle hooks are broadcast over
//! the whole chain with identical arguments, so every participant that cares
//! about a hook runs exactly once, base before derived.

use crate::component::ConfigContext;
use crate::error::TaprootError;
use clap::Command;
use log::debug;

/// A link in a component's configuration chain.
///
/// Both hooks default to no-ops; a participant overrides only the phases it
/// takes part in.
pub trait Participant {
    /// Logical name of the participant, used for service naming and
    /// diagnostics.
    fn name(&self) -> &str;

    /// Phase 1: contribute command-line options to the shared parser.
    fn options(&self, cmd: Command) -> Command {
        cmd
    }

    /// Phase 2: react to the parsed configuration.
    ///
    /// Returning an error aborts component construction.
    fn configure(&mut self, _ctx: &ConfigContext<'_>) -> Result<(), TaprootError> {
        Ok(())
    }
}

/// A component with no options of its own.
impl Participant for () {
    fn name(&self) -> &str {
        "Component"
    }
}

/// Ordered chain of boxed participants, base first.
#[derive(Default)]
pub struct Lineage {
    links: Vec<Box<dyn Participant>>,
}

impl Lineage {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a participant at the derived end of the chain.
    pub fn push(&mut self, participant: Box<dyn Participant>) {
        self.links.push(participant);
    }

    /// Number of participants in the chain.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True when the chain has no participants.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Participant names in chain order.
    pub fn names(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.name()).collect()
    }

    /// Iterate participants base-first.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Participant> {
        self.links.iter().map(|link| &**link)
    }

    /// Broadcast the phase-1 options hook over the chain, base to derived,
    /// threading the parser through every participant.
    pub fn collect_options(&self, cmd: Command) -> Command {
        self.links.iter().fold(cmd, |cmd, link| {
            debug!("collecting options (participant={})", link.name());
            link.options(cmd)
        })
    }

    /// Broadcast the phase-2 configure hook over the chain, base to derived,
    /// stopping at the first participant error.
    pub fn distribute(&mut self, ctx: &ConfigContext<'_>) -> Result<(), TaprootError> {
        for link in &mut self.links {
            debug!("distributing configuration (participant={})", link.name());
            link.configure(ctx)?;
        }
        Ok(())
    }
}
