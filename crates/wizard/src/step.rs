//! The wizard step set.
//!
//! Steps are an explicit ordered enum rather than numeric identifiers.
//! The legacy funnel numbered its screens 3..18 with a half-step 10.5 and
//! a reserved-but-unreachable 16; those ordinals are kept for analytics
//! display only, and the dead value is simply not representable.

use serde::{Deserialize, Serialize};

use valform_core::{FormState, HasGarage};

/// One screen of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PropertyType,
    HouseSize,
    LandSize,
    HouseAge,
    Bedrooms,
    Bathrooms,
    CvValuation,
    Garage,
    GarageCapacity,
    Condition,
    Relationship,
    Situation,
    SituationDetail,
    ExtraFeatures,
    ContactDetails,
    ThankYou,
}

impl Step {
    /// Every step, in funnel order.
    pub const ALL: [Self; 16] = [
        Self::PropertyType,
        Self::HouseSize,
        Self::LandSize,
        Self::HouseAge,
        Self::Bedrooms,
        Self::Bathrooms,
        Self::CvValuation,
        Self::Garage,
        Self::GarageCapacity,
        Self::Condition,
        Self::Relationship,
        Self::Situation,
        Self::SituationDetail,
        Self::ExtraFeatures,
        Self::ContactDetails,
        Self::ThankYou,
    ];

    /// Display ordinal carried on analytics events.
    pub const fn number(&self) -> f64 {
        match self {
            Self::PropertyType => 3.0,
            Self::HouseSize => 4.0,
            Self::LandSize => 5.0,
            Self::HouseAge => 6.0,
            Self::Bedrooms => 7.0,
            Self::Bathrooms => 8.0,
            Self::CvValuation => 9.0,
            Self::Garage => 10.0,
            Self::GarageCapacity => 10.5,
            Self::Condition => 11.0,
            Self::Relationship => 12.0,
            Self::Situation => 13.0,
            Self::SituationDetail => 14.0,
            Self::ExtraFeatures => 15.0,
            Self::ContactDetails => 17.0,
            Self::ThankYou => 18.0,
        }
    }

    /// Stable machine name, used in analytics events and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PropertyType => "property_type",
            Self::HouseSize => "house_size",
            Self::LandSize => "land_size",
            Self::HouseAge => "house_age",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
            Self::CvValuation => "cv_valuation",
            Self::Garage => "garage",
            Self::GarageCapacity => "garage_capacity",
            Self::Condition => "condition",
            Self::Relationship => "relationship",
            Self::Situation => "situation",
            Self::SituationDetail => "situation_detail",
            Self::ExtraFeatures => "extra_features",
            Self::ContactDetails => "contact_details",
            Self::ThankYou => "thank_you",
        }
    }

    /// Whether this step commits its answer automatically after a short
    /// highlight delay (single-select steps), rather than via an explicit
    /// continue action.
    pub const fn auto_advances(&self) -> bool {
        matches!(
            self,
            Self::PropertyType
                | Self::Garage
                | Self::GarageCapacity
                | Self::Condition
                | Self::Relationship
                | Self::Situation
                | Self::SituationDetail
        )
    }

    /// Whether this is the terminal step.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::ThankYou)
    }

    /// Predecessor in the declared step order.
    ///
    /// Back navigation deliberately does not mirror forward skip logic:
    /// a user who skipped forward from HouseSize to CvValuation still
    /// steps back through Bathrooms. The terminal step has no
    /// predecessor reachable by navigation.
    pub fn predecessor(&self) -> Option<Self> {
        if self.is_terminal() {
            return None;
        }
        Self::ALL
            .iter()
            .position(|s| s == self)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Number of data-entry steps, used as the progress denominator.
pub const DATA_ENTRY_STEPS: u32 = (Step::ALL.len() - 1) as u32;

/// Whether a step applies to the current answers.
///
/// Consulted by both the renderer and the navigation controller, so the
/// two cannot disagree. Land-only properties have no house to describe,
/// and garage capacity only exists once a garage does.
pub fn is_applicable(step: Step, form: &FormState) -> bool {
    if form.is_land_only() {
        !matches!(
            step,
            Step::HouseSize
                | Step::HouseAge
                | Step::Bedrooms
                | Step::Bathrooms
                | Step::Garage
                | Step::GarageCapacity
                | Step::Condition
        )
    } else if step == Step::GarageCapacity {
        form.has_garage == Some(HasGarage::Yes)
    } else {
        true
    }
}

/// Per-step answer accessor, used by step-exit analytics.
///
/// Contact details are deliberately not exposed here; the redacted lead
/// summary covers the conversion event instead.
pub fn answer_of(step: Step, form: &FormState) -> Option<String> {
    match step {
        Step::PropertyType => form.property_type.map(|v| v.label().to_string()),
        Step::HouseSize => Some(form.house_sqm.to_string()),
        Step::LandSize => Some(form.land_size.to_string()),
        Step::HouseAge => Some(form.house_age.to_string()),
        Step::Bedrooms => Some(form.bedrooms.to_string()),
        Step::Bathrooms => Some(form.bathrooms.to_string()),
        Step::CvValuation => Some(form.cv_valuation.to_string()),
        Step::Garage => form.has_garage.map(|v| v.label().to_string()),
        Step::GarageCapacity => form.garage_capacity.map(|v| v.label().to_string()),
        Step::Condition => form.condition.map(|v| v.label().to_string()),
        Step::Relationship => form.relationship.map(|v| v.label().to_string()),
        Step::Situation => form.situation.map(|v| v.label().to_string()),
        Step::SituationDetail => form.other_situation.map(|v| v.label().to_string()),
        Step::ExtraFeatures => {
            if form.extra_features.is_empty() {
                None
            } else {
                Some(form.extra_features.join(", "))
            }
        }
        Step::ContactDetails | Step::ThankYou => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valform_core::PropertyType;

    #[test]
    fn test_ordinals_strictly_increasing() {
        for pair in Step::ALL.windows(2) {
            assert!(pair[0].number() < pair[1].number());
        }
    }

    #[test]
    fn test_dead_ordinal_not_representable() {
        assert!(Step::ALL.iter().all(|s| (s.number() - 16.0).abs() > 0.5));
    }

    #[test]
    fn test_predecessor_order() {
        assert_eq!(Step::PropertyType.predecessor(), None);
        assert_eq!(Step::HouseSize.predecessor(), Some(Step::PropertyType));
        assert_eq!(Step::Condition.predecessor(), Some(Step::GarageCapacity));
        assert_eq!(Step::ContactDetails.predecessor(), Some(Step::ExtraFeatures));
        assert_eq!(Step::ThankYou.predecessor(), None);
    }

    #[test]
    fn test_land_only_applicability() {
        let mut form = FormState::default();
        form.property_type = Some(PropertyType::LandOnly);

        let skipped = [
            Step::HouseSize,
            Step::HouseAge,
            Step::Bedrooms,
            Step::Bathrooms,
            Step::Garage,
            Step::GarageCapacity,
            Step::Condition,
        ];
        for step in skipped {
            assert!(!is_applicable(step, &form), "{step} should not apply");
        }
        for step in [Step::LandSize, Step::CvValuation, Step::Relationship] {
            assert!(is_applicable(step, &form), "{step} should apply");
        }
    }

    #[test]
    fn test_garage_capacity_needs_garage() {
        let mut form = FormState::default();
        form.property_type = Some(PropertyType::FreeStanding);
        assert!(!is_applicable(Step::GarageCapacity, &form));

        form.has_garage = Some(HasGarage::Yes);
        assert!(is_applicable(Step::GarageCapacity, &form));

        form.has_garage = Some(HasGarage::No);
        assert!(!is_applicable(Step::GarageCapacity, &form));
    }

    #[test]
    fn test_answer_accessor() {
        let mut form = FormState::default();
        form.property_type = Some(PropertyType::FreeStanding);
        form.set_bedrooms(4);
        form.toggle_feature("Deck");
        form.toggle_feature("Sea Views");
        form.email = "ana@example.com".into();

        assert_eq!(
            answer_of(Step::PropertyType, &form).as_deref(),
            Some("Free Standing")
        );
        assert_eq!(answer_of(Step::Bedrooms, &form).as_deref(), Some("4"));
        assert_eq!(
            answer_of(Step::ExtraFeatures, &form).as_deref(),
            Some("Deck, Sea Views")
        );
        assert_eq!(answer_of(Step::Garage, &form), None);
        assert_eq!(answer_of(Step::ContactDetails, &form), None);
    }
}
