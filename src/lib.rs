//! Valform: a property valuation lead funnel.
//!
//! The binary wires the funnel crates together:
//!
//! - [`valform_core`] — form state, attribution, validation.
//! - [`valform_wizard`] — the branching step machine.
//! - [`valform_analytics`] — session events and sinks.
//! - [`valform_leads`] — submission and phone verification.
//!
//! This crate adds configuration and the interactive terminal driver.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod funnel;

pub use config::FunnelConfig;
