//! The wizard engine: current position, input handling, and committed
//! transitions.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use valform_core::{
    Attribution, Condition, FormState, GarageCapacity, HasGarage, OtherSituation, PropertyType,
    Relationship, Situation,
};

use crate::error::{Error, Result};
use crate::nav::{next, Disqualification, Target};
use crate::observer::{NoopObserver, WizardObserver};
use crate::step::{answer_of, Step};

/// Configuration for the wizard engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay before a single-select answer commits, leaving time for the
    /// selection highlight.
    pub auto_advance_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_advance_delay: Duration::from_millis(300),
        }
    }
}

/// A user input applied to the current step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    PropertyType(PropertyType),
    HouseSqm(u64),
    LandSize(u64),
    HouseAge(u64),
    Bedrooms(u64),
    Bathrooms(u64),
    CvValuation(u64),
    Garage(HasGarage),
    GarageCapacity(GarageCapacity),
    Condition(Condition),
    Relationship(Relationship),
    Situation(Situation),
    SituationDetail(OtherSituation),
    ToggleFeature(String),
    Contact {
        first_name: String,
        last_name: String,
        email: String,
        mobile: String,
    },
}

impl StepInput {
    /// The step this input belongs to.
    pub const fn step(&self) -> Step {
        match self {
            Self::PropertyType(_) => Step::PropertyType,
            Self::HouseSqm(_) => Step::HouseSize,
            Self::LandSize(_) => Step::LandSize,
            Self::HouseAge(_) => Step::HouseAge,
            Self::Bedrooms(_) => Step::Bedrooms,
            Self::Bathrooms(_) => Step::Bathrooms,
            Self::CvValuation(_) => Step::CvValuation,
            Self::Garage(_) => Step::Garage,
            Self::GarageCapacity(_) => Step::GarageCapacity,
            Self::Condition(_) => Step::Condition,
            Self::Relationship(_) => Step::Relationship,
            Self::Situation(_) => Step::Situation,
            Self::SituationDetail(_) => Step::SituationDetail,
            Self::ToggleFeature(_) => Step::ExtraFeatures,
            Self::Contact { .. } => Step::ContactDetails,
        }
    }
}

/// A scheduled (not yet committed) auto-advance.
///
/// The generation counter ties a pending advance to the input that
/// scheduled it: any newer input, explicit navigation, or cancellation
/// bumps the engine's generation, and a stale timer firing afterwards
/// commits nothing. This closes the fast-double-click race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    pub to: Step,
    pub delay: Duration,
    pub generation: u64,
}

/// Result of applying an input or navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Input recorded; an explicit continue is still required.
    Recorded,
    /// Input recorded; commit the advance after the delay unless a newer
    /// input supersedes it.
    AdvanceScheduled(PendingAdvance),
    /// Transition committed immediately.
    Advanced(Step),
    /// Disqualified: message shown, no navigation, state unchanged.
    Halted(Disqualification),
    /// The contact step's explicit submit: hand off to the submission
    /// flow.
    SubmitRequested,
}

/// The wizard instance: exclusive owner of the form state and the
/// current position.
pub struct WizardEngine {
    form: FormState,
    current: Step,
    previous: Option<Step>,
    pending: Option<PendingAdvance>,
    generation: u64,
    config: EngineConfig,
    observer: Arc<dyn WizardObserver>,
}

impl WizardEngine {
    /// Create a wizard with attribution merged in and no observer.
    pub fn new(attribution: Attribution) -> Self {
        Self::with_observer(attribution, Arc::new(NoopObserver))
    }

    /// Create a wizard with an observer for committed transitions.
    pub fn with_observer(attribution: Attribution, observer: Arc<dyn WizardObserver>) -> Self {
        Self {
            form: FormState::with_attribution(attribution),
            current: Step::PropertyType,
            previous: None,
            pending: None,
            generation: 0,
            config: EngineConfig::default(),
            observer,
        }
    }

    /// Override the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Record the initial step-enter. Call once, after construction.
    pub fn start(&mut self) {
        info!(step = %self.current, "wizard started");
        self.observer.step_entered(self.current, &self.form);
    }

    /// The step currently shown.
    pub const fn current(&self) -> Step {
        self.current
    }

    /// The previously shown step, for transition logging.
    pub const fn previous(&self) -> Option<Step> {
        self.previous
    }

    /// Read access to the collected answers.
    pub const fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable access to the collected answers (used by the submission
    /// flow for the verified flag).
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// The currently scheduled auto-advance, if any.
    pub const fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    /// Apply an input to the current step.
    ///
    /// Single-select steps schedule an auto-advance (or halt); slider,
    /// multi-select, and text inputs are recorded and wait for an
    /// explicit [`advance`](Self::advance).
    pub fn apply(&mut self, input: StepInput) -> Result<Outcome> {
        if self.current.is_terminal() {
            return Err(Error::terminal_step());
        }
        if input.step() != self.current {
            return Err(Error::input_mismatch(self.current, input.step().name()));
        }

        // Any new input supersedes a pending advance.
        self.cancel_pending();

        let garage_yes = matches!(input, StepInput::Garage(HasGarage::Yes));
        self.record(input);

        // Picking "Yes" for the garage jumps straight into the capacity
        // question, not via the generic transition function.
        if garage_yes {
            let to = Step::GarageCapacity;
            self.commit(to);
            return Ok(Outcome::Advanced(to));
        }

        if !self.current.auto_advances() {
            return Ok(Outcome::Recorded);
        }

        match next(self.current, &self.form)? {
            Target::Step(to) => {
                self.generation = self.generation.wrapping_add(1);
                let pending = PendingAdvance {
                    to,
                    delay: self.config.auto_advance_delay,
                    generation: self.generation,
                };
                self.pending = Some(pending);
                debug!(from = %self.current, to = %to, "auto-advance scheduled");
                Ok(Outcome::AdvanceScheduled(pending))
            }
            Target::Halt(reason) => {
                warn!(step = %self.current, %reason, "disqualification halt");
                Ok(Outcome::Halted(reason))
            }
            // Single-select steps never hand off to submission directly.
            Target::Submit => Err(Error::input_mismatch(self.current, "submit")),
        }
    }

    /// Commit a previously scheduled auto-advance.
    ///
    /// Returns the new step, or `None` when the pending advance was
    /// superseded before the timer fired.
    pub fn commit_pending(&mut self, generation: u64) -> Option<Step> {
        match self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                self.commit(pending.to);
                Some(pending.to)
            }
            _ => {
                debug!(generation, "stale auto-advance ignored");
                None
            }
        }
    }

    /// Explicit continue for steps without auto-advance.
    pub fn advance(&mut self) -> Result<Outcome> {
        if self.current.is_terminal() {
            return Err(Error::terminal_step());
        }
        self.cancel_pending();

        match next(self.current, &self.form)? {
            Target::Step(to) => {
                self.commit(to);
                Ok(Outcome::Advanced(to))
            }
            Target::Halt(reason) => {
                warn!(step = %self.current, %reason, "disqualification halt");
                Ok(Outcome::Halted(reason))
            }
            Target::Submit => Ok(Outcome::SubmitRequested),
        }
    }

    /// Step back to the predecessor in the declared step order.
    ///
    /// No branch-skipping is applied on the way back; see
    /// [`Step::predecessor`] for the asymmetry this preserves.
    pub fn back(&mut self) -> Option<Step> {
        self.cancel_pending();
        let to = self.current.predecessor()?;
        self.commit(to);
        Some(to)
    }

    /// Enter the terminal step after a verified submission.
    ///
    /// The terminal step is reachable no other way.
    pub fn complete(&mut self) -> Result<Step> {
        if !self.form.phone_verified {
            return Err(Error::verification_required());
        }
        if self.current.is_terminal() {
            return Ok(self.current);
        }
        self.cancel_pending();
        self.commit(Step::ThankYou);
        Ok(Step::ThankYou)
    }

    /// Drop any scheduled auto-advance.
    pub fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            debug!("pending auto-advance cancelled");
        }
        self.generation = self.generation.wrapping_add(1);
    }

    fn record(&mut self, input: StepInput) {
        match input {
            StepInput::PropertyType(v) => self.form.property_type = Some(v),
            StepInput::HouseSqm(v) => self.form.set_house_sqm(v),
            StepInput::LandSize(v) => self.form.set_land_size(v),
            StepInput::HouseAge(v) => self.form.set_house_age(v),
            StepInput::Bedrooms(v) => self.form.set_bedrooms(v),
            StepInput::Bathrooms(v) => self.form.set_bathrooms(v),
            StepInput::CvValuation(v) => self.form.set_cv_valuation(v),
            StepInput::Garage(v) => self.form.has_garage = Some(v),
            StepInput::GarageCapacity(v) => self.form.garage_capacity = Some(v),
            StepInput::Condition(v) => self.form.condition = Some(v),
            StepInput::Relationship(v) => self.form.relationship = Some(v),
            StepInput::Situation(v) => self.form.situation = Some(v),
            StepInput::SituationDetail(v) => self.form.other_situation = Some(v),
            StepInput::ToggleFeature(feature) => self.form.toggle_feature(feature),
            StepInput::Contact {
                first_name,
                last_name,
                email,
                mobile,
            } => {
                self.form.first_name = first_name.trim().to_string();
                self.form.last_name = last_name.trim().to_string();
                self.form.email = email.trim().to_string();
                self.form.mobile = mobile.trim().to_string();
            }
        }
    }

    /// Commit a transition: step-exit for the old step (with its answer),
    /// step-enter for the new one, then progress — strictly in that
    /// order.
    fn commit(&mut self, to: Step) {
        let answer = answer_of(self.current, &self.form);
        debug!(from = %self.current, to = %to, "step transition");
        self.observer.step_exited(self.current, answer, &self.form);
        self.previous = Some(self.current);
        self.current = to;
        self.observer.step_entered(to, &self.form);
        self.observer.progress(to, &self.form);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::observer::recording::{RecordingObserver, Seen};

    fn engine() -> WizardEngine {
        WizardEngine::new(Attribution::default())
    }

    fn scheduled(outcome: Outcome) -> PendingAdvance {
        match outcome {
            Outcome::AdvanceScheduled(pending) => pending,
            other => panic!("expected scheduled advance, got {other:?}"),
        }
    }

    #[test]
    fn test_single_select_schedules_auto_advance() {
        let mut engine = engine();
        let outcome = engine
            .apply(StepInput::PropertyType(PropertyType::FreeStanding))
            .unwrap();
        let pending = scheduled(outcome);
        assert_eq!(pending.to, Step::HouseSize);
        assert_eq!(pending.delay, Duration::from_millis(300));

        // Still on the first step until the timer commits.
        assert_eq!(engine.current(), Step::PropertyType);
        assert_eq!(engine.commit_pending(pending.generation), Some(Step::HouseSize));
        assert_eq!(engine.current(), Step::HouseSize);
    }

    #[test]
    fn test_double_click_race_guarded() {
        let mut engine = engine();
        let first = scheduled(
            engine
                .apply(StepInput::PropertyType(PropertyType::FreeStanding))
                .unwrap(),
        );
        // A second click lands before the first timer fires.
        let second = scheduled(
            engine
                .apply(StepInput::PropertyType(PropertyType::LandOnly))
                .unwrap(),
        );
        assert_eq!(second.to, Step::LandSize);

        // The stale timer commits nothing; the fresh one commits once.
        assert_eq!(engine.commit_pending(first.generation), None);
        assert_eq!(engine.commit_pending(second.generation), Some(Step::LandSize));
        assert_eq!(engine.commit_pending(second.generation), None);
    }

    #[test]
    fn test_garage_yes_jumps_immediately() {
        let mut engine = engine();
        engine
            .apply(StepInput::PropertyType(PropertyType::FreeStanding))
            .unwrap();
        let pending = engine.pending().unwrap();
        engine.commit_pending(pending.generation);

        // Walk forward to the garage step with explicit continues.
        for input in [
            StepInput::HouseSqm(140),
            StepInput::LandSize(600),
            StepInput::HouseAge(25),
            StepInput::Bedrooms(3),
            StepInput::Bathrooms(2),
            StepInput::CvValuation(800_000),
        ] {
            engine.apply(input).unwrap();
            engine.advance().unwrap();
        }
        assert_eq!(engine.current(), Step::Garage);

        let outcome = engine.apply(StepInput::Garage(HasGarage::Yes)).unwrap();
        assert_eq!(outcome, Outcome::Advanced(Step::GarageCapacity));
        assert_eq!(engine.current(), Step::GarageCapacity);
    }

    #[test]
    fn test_disqualification_leaves_step_unchanged() {
        let mut engine = engine();
        let pending = scheduled(
            engine
                .apply(StepInput::PropertyType(PropertyType::LandOnly))
                .unwrap(),
        );
        engine.commit_pending(pending.generation);
        engine.apply(StepInput::LandSize(500)).unwrap();
        engine.advance().unwrap();
        engine.apply(StepInput::CvValuation(400_000)).unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.current(), Step::Relationship);

        let outcome = engine
            .apply(StepInput::Relationship(Relationship::RealEstateAgent))
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Halted(Disqualification::RealEstateAgent)
        );
        assert_eq!(engine.current(), Step::Relationship);

        // Changing the answer recovers.
        let pending = scheduled(
            engine
                .apply(StepInput::Relationship(Relationship::Owner))
                .unwrap(),
        );
        assert_eq!(pending.to, Step::Situation);
    }

    #[test]
    fn test_back_ignores_forward_skip_rules() {
        let mut engine = engine();
        let pending = scheduled(
            engine
                .apply(StepInput::PropertyType(PropertyType::LandOnly))
                .unwrap(),
        );
        engine.commit_pending(pending.generation);
        engine.apply(StepInput::LandSize(750)).unwrap();
        engine.advance().unwrap();
        assert_eq!(engine.current(), Step::CvValuation);

        // Forward skipped the house steps, but back does not.
        assert_eq!(engine.back(), Some(Step::Bathrooms));
    }

    #[test]
    fn test_input_mismatch_rejected() {
        let mut engine = engine();
        let err = engine.apply(StepInput::Bedrooms(3)).unwrap_err();
        assert!(matches!(err, Error::InputMismatch { .. }));
    }

    #[test]
    fn test_terminal_requires_verification() {
        let mut engine = engine();
        assert!(matches!(
            engine.complete(),
            Err(Error::VerificationRequired)
        ));

        engine.form_mut().mark_phone_verified();
        assert_eq!(engine.complete().unwrap(), Step::ThankYou);
        assert_eq!(engine.current(), Step::ThankYou);

        // Terminal: no more input, no back navigation.
        assert!(engine.apply(StepInput::Bedrooms(1)).is_err());
        assert_eq!(engine.back(), None);
    }

    #[test]
    fn test_observer_ordering_exit_before_enter() {
        let observer = Arc::new(RecordingObserver::new());
        let mut engine =
            WizardEngine::with_observer(Attribution::default(), observer.clone());
        engine.start();

        let pending = scheduled(
            engine
                .apply(StepInput::PropertyType(PropertyType::TownHouse))
                .unwrap(),
        );
        engine.commit_pending(pending.generation);

        let seen = observer.seen();
        assert_eq!(
            seen,
            vec![
                Seen::Entered(Step::PropertyType),
                Seen::Exited(Step::PropertyType, Some("Town House".to_string())),
                Seen::Entered(Step::HouseSize),
                Seen::Progress(Step::HouseSize),
            ]
        );
    }
}
