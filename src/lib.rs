//! # pingmon - Live Terminal Ping Dashboard
//!
//! A live-refreshing terminal rendering engine for monitoring multiple network
//! hosts. Probers push per-host ping results into shared [`MonitoredHost`]
//! state; a [`Layout`] redraws a fixed-viewport statistics table from that
//! state until every host stops, then prints a final untruncated summary.
//!
//! ## Architecture
//!
//! The library is organized into focused modules:
//!
//! - [`error`] - Centralized error types and handling
//! - [`host`] - Host state shared between probers and the renderer
//! - [`terminal`] - Terminal size queries and screen-control escapes
//! - [`layout`] - Renderer variants; [`layout::legacy`] is the line-based one
//!
//! Data flows one way: host state is read by the table formatter, which feeds
//! the redraw loop, which writes terminal output. The rendering side never
//! mutates host state beyond the advisory history-length request.

// Core modules
pub mod error;
pub mod host;
pub mod layout;
pub mod terminal;

// Re-export commonly used types for convenience
pub use error::{PingmonError, Result};
pub use host::{Host, MonitoredHost, PingResult, ResultsSummary};
pub use layout::{build_table, Layout, LegacyLayout};
pub use terminal::{SystemTerminal, Terminal, TerminalSize};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
