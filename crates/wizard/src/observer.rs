//! Observer interface for committed wizard transitions.
//!
//! Analytics is a side effect of navigation, not part of it: the engine
//! notifies the observer after each committed transition and never lets
//! the observer block or fail navigation. Implementations must swallow
//! their own failures.

use valform_core::FormState;

use crate::step::Step;

/// Receives committed wizard transitions.
///
/// For every committed step change the engine calls `step_exited` for the
/// old step (with that step's answer), then `step_entered` for the new
/// step, then `progress` — always in that order.
pub trait WizardObserver: Send + Sync {
    /// The wizard entered a step (including the initial step on start).
    fn step_entered(&self, step: Step, form: &FormState) {
        let _ = (step, form);
    }

    /// The wizard left a step, carrying that step's answer value.
    fn step_exited(&self, step: Step, answer: Option<String>, form: &FormState) {
        let _ = (step, answer, form);
    }

    /// A committed transition landed on `step`.
    fn progress(&self, step: Step, form: &FormState) {
        let _ = (step, form);
    }
}

/// Observer that ignores everything; the default for tests and headless
/// use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl WizardObserver for NoopObserver {}

#[cfg(test)]
pub(crate) mod recording {
    //! A recording observer used by engine tests.

    use std::sync::Mutex;

    use super::*;

    /// What the observer saw, in order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Seen {
        Entered(Step),
        Exited(Step, Option<String>),
        Progress(Step),
    }

    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        seen: Mutex<Vec<Seen>>,
    }

    impl RecordingObserver {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seen(&self) -> Vec<Seen> {
            self.seen.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl WizardObserver for RecordingObserver {
        fn step_entered(&self, step: Step, _form: &FormState) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(Seen::Entered(step));
            }
        }

        fn step_exited(&self, step: Step, answer: Option<String>, _form: &FormState) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(Seen::Exited(step, answer));
            }
        }

        fn progress(&self, step: Step, _form: &FormState) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(Seen::Progress(step));
            }
        }
    }
}
