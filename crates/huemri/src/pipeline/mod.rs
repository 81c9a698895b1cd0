//! Processing pipeline.
//!
//! Glue layer that wires the stages together in a fixed order:
//! dispatch -> enhance -> gamma -> colormap -> blend.
//!
//! The stage primitives live in `crate::enhance`, `crate::gamma`,
//! `crate::colormap` and `crate::blend`. This module only decides which of
//! them run and with which constants.

mod result;
mod run;

pub use result::{ProcessReport, Processed};
pub use run::process;
