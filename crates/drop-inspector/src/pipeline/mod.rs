//! Pipeline module.
//!
//! This module provides the call-scoped orchestration of one inspection run.

mod inspector;

pub use inspector::{Inspection, Inspector};
