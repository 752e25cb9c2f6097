//! Test helpers shared across taproot crates.

pub mod recorder;

pub use recorder::{CallLog, FailingParticipant, RecordingParticipant, SilentParticipant};
