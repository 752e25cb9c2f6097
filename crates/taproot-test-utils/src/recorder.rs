use clap::Command;
use parking_lot::Mutex;
use std::sync::Arc;
use taproot::{ConfigContext, Participant, TaprootError};

/// Shared, ordered record of hook invocations.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.calls.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

/// Participant that records every hook invocation into a shared log.
pub struct RecordingParticipant {
    name: &'static str,
    log: CallLog,
}

impl RecordingParticipant {
    pub fn new(name: &'static str, log: CallLog) -> Self {
        Self { name, log }
    }
}

impl Participant for RecordingParticipant {
    fn name(&self) -> &str {
        self.name
    }

    fn options(&self, cmd: Command) -> Command {
        self.log.record(format!("{}::options", self.name));
        cmd
    }

    fn configure(&mut self, _ctx: &ConfigContext<'_>) -> Result<(), TaprootError> {
        self.log.record(format!("{}::configure", self.name));
        Ok(())
    }
}

/// Participant relying entirely on the default no-op hooks.
pub struct SilentParticipant {
    name: &'static str,
}

impl SilentParticipant {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Participant for SilentParticipant {
    fn name(&self) -> &str {
        self.name
    }
}

/// Participant whose configure hook rejects the parsed configuration.
pub struct FailingParticipant {
    message: &'static str,
}

impl FailingParticipant {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl Participant for FailingParticipant {
    fn name(&self) -> &str {
        "FailingParticipant"
    }

    fn configure(&mut self, _ctx: &ConfigContext<'_>) -> Result<(), TaprootError> {
        Err(TaprootError::Validation(self.message.to_string()))
    }
}
