//! Branching form-wizard state machine for the property valuation funnel.
//!
//! This crate provides the wizard's navigation core. Key pieces:
//!
//! - **Step set**: an explicit ordered enum of wizard screens; no numeric
//!   step arithmetic and no reachable-but-dead values.
//! - **Navigation controller**: the forward branch table plus a skip pass
//!   over inapplicable steps, and plain-predecessor back navigation.
//! - **Step registry**: titles and input widgets per step, sharing the
//!   same applicability predicate as the navigation controller so routing
//!   and rendering cannot disagree.
//! - **Observer interface**: committed transitions notify a
//!   [`WizardObserver`] (step-exit before step-enter, then progress),
//!   decoupled from the transition function itself.
//! - **Auto-advance**: single-select answers schedule an explicit,
//!   cancellable delayed advance; a generation counter guards against
//!   double-fire races.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod nav;
pub mod observer;
pub mod registry;
pub mod step;

pub use engine::{EngineConfig, Outcome, PendingAdvance, StepInput, WizardEngine};
pub use error::{Error, Result};
pub use nav::{next, raw_next, Disqualification, Target};
pub use observer::{NoopObserver, WizardObserver};
pub use registry::{content, StepContent, Widget, EXTRA_FEATURE_OPTIONS};
pub use step::{answer_of, is_applicable, Step, DATA_ENTRY_STEPS};
