//! The navigation controller: forward branch table and skip pass.

use serde::{Deserialize, Serialize};

use valform_core::{FormState, HasGarage, OtherSituation, Relationship, Situation};

use crate::error::{Error, Result};
use crate::step::{is_applicable, Step};

/// Business-rule stop: forward progress halts with a message and the
/// wizard state does not change. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disqualification {
    /// Real estate agents are screened out explicitly.
    RealEstateAgent,
    /// Buyers, tenants, and third parties cannot request a valuation.
    NotOwner,
    /// Refinancing enquiries are out of scope for this service.
    Refinancing,
}

impl Disqualification {
    /// User-facing message shown when the halt fires.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::RealEstateAgent => {
                "This service is for property owners. Agent appraisals aren't available here."
            }
            Self::NotOwner => {
                "Sorry, we can only provide valuations to the property owner or their estate."
            }
            Self::Refinancing => {
                "For refinancing, your bank or mortgage broker is the right place to start."
            }
        }
    }
}

impl std::fmt::Display for Disqualification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of the forward transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Move to the given step.
    Step(Step),
    /// Disqualify and stop; no navigation occurs.
    Halt(Disqualification),
    /// Hand off to the submission flow (not a direct step transition).
    Submit,
}

/// The raw branch table, one row per step.
///
/// Rows that cannot fire under the applicability skip pass (the land-only
/// rows for HouseSize and Garage) are kept because the skip pass routes
/// through them; ordering inside each arm matters for that reason.
pub fn raw_next(step: Step, form: &FormState) -> Result<Target> {
    let target = match step {
        Step::PropertyType => {
            if form.property_type.is_none() {
                return Err(Error::missing_answer(step));
            }
            if form.is_land_only() {
                Target::Step(Step::LandSize)
            } else {
                Target::Step(Step::HouseSize)
            }
        }
        Step::HouseSize => {
            if form.is_land_only() {
                Target::Step(Step::CvValuation)
            } else {
                Target::Step(Step::LandSize)
            }
        }
        Step::LandSize => Target::Step(Step::HouseAge),
        Step::HouseAge => Target::Step(Step::Bedrooms),
        Step::Bedrooms => Target::Step(Step::Bathrooms),
        Step::Bathrooms => Target::Step(Step::CvValuation),
        Step::CvValuation => Target::Step(Step::Garage),
        Step::Garage => {
            // Land-only reaches here only via the skip chain; it bypasses
            // the garage question and the condition step entirely.
            if form.is_land_only() {
                Target::Step(Step::Relationship)
            } else {
                match form.has_garage {
                    Some(HasGarage::Yes) => Target::Step(Step::GarageCapacity),
                    Some(HasGarage::No) => Target::Step(Step::Condition),
                    None => return Err(Error::missing_answer(step)),
                }
            }
        }
        Step::GarageCapacity => Target::Step(Step::Condition),
        Step::Condition => Target::Step(Step::Relationship),
        Step::Relationship => match form.relationship {
            None => return Err(Error::missing_answer(step)),
            Some(Relationship::RealEstateAgent) => {
                Target::Halt(Disqualification::RealEstateAgent)
            }
            Some(r) if !r.qualifies() => Target::Halt(Disqualification::NotOwner),
            Some(_) => Target::Step(Step::Situation),
        },
        Step::Situation => match form.situation {
            None => return Err(Error::missing_answer(step)),
            Some(Situation::Other) => Target::Step(Step::SituationDetail),
            Some(_) => Target::Step(Step::ExtraFeatures),
        },
        Step::SituationDetail => match form.other_situation {
            None => return Err(Error::missing_answer(step)),
            Some(OtherSituation::Refinancing) => Target::Halt(Disqualification::Refinancing),
            Some(_) => Target::Step(Step::ExtraFeatures),
        },
        Step::ExtraFeatures => {
            if form.extra_features.is_empty() {
                return Err(Error::feature_required());
            }
            Target::Step(Step::ContactDetails)
        }
        Step::ContactDetails => Target::Submit,
        Step::ThankYou => return Err(Error::terminal_step()),
    };
    Ok(target)
}

/// The forward transition function: the branch table plus a skip pass
/// over inapplicable steps.
///
/// Pure in the form state: calling it twice without a mutation in between
/// yields the same target.
pub fn next(step: Step, form: &FormState) -> Result<Target> {
    let mut current = step;
    loop {
        match raw_next(current, form)? {
            Target::Step(to) if !is_applicable(to, form) => {
                // Fall through the inapplicable step's own row.
                current = to;
            }
            target => return Ok(target),
        }
    }
}
