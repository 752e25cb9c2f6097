//! Declarative command-line configuration and logging bootstrap for service
//! components.
//!
//! A component is configured by an ordered chain of participants: every
//! participant can contribute options to one shared command-line parser and
//! react to the parsed values, while the component base wires up the standard
//! service options and a named logger.

pub mod bag;
pub mod component;
pub mod error;
pub mod lineage;
pub mod logging;

/// Dynamic property bag carrying option values between configuration phases.
pub use bag::AttrBag;
/// Component base and construction surface.
pub use component::{ArgSource, Component, ComponentBuilder, ConfigContext};
/// Public error type for configuration and logging failures.
pub use error::TaprootError;
/// Participant chain primitives.
pub use lineage::{Lineage, Participant};
/// Named logger context and handle.
pub use logging::{LogContext, Logger};
