//! Analytics instrumentation for the valform funnel.
//!
//! Events describe what happened; sinks decide where they go:
//!
//! - **Events**: a tagged enum of funnel events with a per-session
//!   envelope (event ID, session ID, timestamp). Conversion payloads
//!   carry a redacted lead summary, never raw contact details.
//! - **Sinks**: the [`EventSink`] trait plus in-memory and tracing
//!   implementations. The [`Tracker`] fans out to all registered sinks
//!   and swallows their failures.
//! - **Session**: [`FunnelSession`] implements the wizard's observer
//!   interface and adds the lifecycle and conversion emissions.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;
pub mod session;
pub mod sink;

pub use error::{Error, Result};
pub use event::{EventEnvelope, EventId, FunnelEvent, LeadSummary};
pub use session::FunnelSession;
pub use sink::{EventSink, InMemorySink, Tracker, TracingSink};
