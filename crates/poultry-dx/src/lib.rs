//! Evidence-driven disease scoring for poultry flocks.
//!
//! The [`diagnosis`] module holds the knowledge base, the scoring engine and
//! its HTTP surface. [`config`], [`telemetry`] and [`error`] carry the
//! service plumbing shared with the API binary.

pub mod config;
pub mod diagnosis;
pub mod error;
pub mod telemetry;
