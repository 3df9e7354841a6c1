//! Layout subsystem: renderer variants that turn host state into terminal output.
//!
//! A layout owns the full lifetime of one display session, from acquiring the
//! screen to printing the final summary. Layouts are interchangeable behind the
//! [`Layout`] trait; [`legacy::LegacyLayout`] is the line-based, non-interactive
//! variant.

pub mod color;
pub mod legacy;

use crate::error::Result;
use crate::host::Host;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A display strategy for a set of monitored hosts.
///
/// `interval` is the external probing interval; layouts derive their own
/// redraw cadence from it. `run` returns once no host is running (or the user
/// interrupts), with the terminal restored to its normal state on every exit
/// path.
#[async_trait]
pub trait Layout {
    async fn run(&mut self, hosts: &[Arc<dyn Host>], interval: Duration) -> Result<()>;
}

// Re-export the default variant at the subsystem root
pub use legacy::{build_table, LegacyLayout};
