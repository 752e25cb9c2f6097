//! Tests for participant chain broadcasting.

use clap::Command;
use pretty_assertions::assert_eq;
use taproot::bag::AttrBag;
use taproot::{ConfigContext, Lineage, LogContext};
use taproot_test_utils::{CallLog, RecordingParticipant, SilentParticipant};

/// Build a minimal phase-2 context around the given bag and matches.
fn empty_matches() -> clap::ArgMatches {
    Command::new("test")
        .no_binary_name(true)
        .try_get_matches_from(Vec::<String>::new())
        .expect("matches")
}

/// Verify both hooks run base to derived, each exactly once.
#[test]
fn hooks_run_base_to_derived() {
    let log = CallLog::new();
    let mut lineage = Lineage::new();
    lineage.push(Box::new(RecordingParticipant::new("Root", log.clone())));
    lineage.push(Box::new(RecordingParticipant::new("Mid", log.clone())));
    lineage.push(Box::new(RecordingParticipant::new("Leaf", log.clone())));

    let cmd = lineage.collect_options(Command::new("test").no_binary_name(true));
    let matches = cmd
        .try_get_matches_from(Vec::<String>::new())
        .expect("matches");
    let settings = AttrBag::new();
    let logger = LogContext::new().logger("test");
    let ctx = ConfigContext {
        args: &matches,
        settings: &settings,
        log: &logger,
    };
    lineage.distribute(&ctx).expect("distribute");

    assert_eq!(
        log.entries(),
        vec![
            "Root::options",
            "Mid::options",
            "Leaf::options",
            "Root::configure",
            "Mid::configure",
            "Leaf::configure",
        ],
    );
}

/// Participants relying on the default hooks are silent no-ops.
#[test]
fn default_hooks_are_no_ops() {
    let mut lineage = Lineage::new();
    lineage.push(Box::new(SilentParticipant::new("Quiet")));
    lineage.push(Box::new(SilentParticipant::new("Quieter")));

    let cmd = lineage.collect_options(Command::new("test").no_binary_name(true));
    assert_eq!(cmd.get_arguments().count(), 0);

    let matches = empty_matches();
    let settings = AttrBag::new();
    let logger = LogContext::new().logger("test");
    let ctx = ConfigContext {
        args: &matches,
        settings: &settings,
        log: &logger,
    };
    lineage.distribute(&ctx).expect("distribute");
}

#[test]
fn empty_chain_is_a_no_op() {
    let mut lineage = Lineage::new();
    assert!(lineage.is_empty());

    let matches = empty_matches();
    let settings = AttrBag::new();
    let logger = LogContext::new().logger("test");
    let ctx = ConfigContext {
        args: &matches,
        settings: &settings,
        log: &logger,
    };
    lineage.distribute(&ctx).expect("distribute");
}

#[test]
fn names_follow_chain_order() {
    let log = CallLog::new();
    let mut lineage = Lineage::new();
    lineage.push(Box::new(RecordingParticipant::new("Root", log.clone())));
    lineage.push(Box::new(SilentParticipant::new("Mid")));
    lineage.push(Box::new(RecordingParticipant::new("Leaf", log)));

    assert_eq!(lineage.names(), vec!["Root", "Mid", "Leaf"]);
    assert_eq!(lineage.len(), 3);
    assert_eq!(lineage.iter().count(), 3);
}
