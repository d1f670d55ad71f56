//! The step registry: display content and input widgets per step.
//!
//! Purely presentational. Applicability is shared with the navigation
//! controller via [`is_applicable`], so a step that routes as skipped also
//! renders as nothing.

use valform_core::{
    Condition, FormState, GarageCapacity, HasGarage, OtherSituation, PropertyType, Relationship,
    Situation,
};

use crate::step::{is_applicable, Step};

/// The multi-select options offered on the extra features step.
pub const EXTRA_FEATURE_OPTIONS: &[&str] = &[
    "Swimming Pool",
    "Sleepout",
    "Granny Flat",
    "Sea Views",
    "Off-Street Parking",
    "Deck",
    "Solar Panels",
];

/// Input widget for a step. Numeric sliders carry fixed min/max/step per
/// field; choice widgets are closed sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// One choice; commits with an auto-advance.
    SingleSelect { options: Vec<&'static str> },
    /// Numeric slider.
    Slider { min: u64, max: u64, step: u64, unit: &'static str },
    /// Zero or more choices; explicit continue.
    MultiSelect { options: Vec<&'static str> },
    /// Free-text contact fields; explicit submit.
    ContactForm,
    /// No input; informational terminal screen.
    Message,
}

/// Display content for a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepContent {
    pub title: &'static str,
    pub widget: Widget,
}

/// Render a step for the current answers.
///
/// Returns `None` exactly when the step is not applicable, which the
/// navigation controller skips over by the same predicate.
pub fn content(step: Step, form: &FormState) -> Option<StepContent> {
    if !is_applicable(step, form) {
        return None;
    }

    let content = match step {
        Step::PropertyType => StepContent {
            title: "What type of property is it?",
            widget: single_select(&PropertyType::ALL.map(|v| v.label())),
        },
        Step::HouseSize => StepContent {
            title: "How big is the house?",
            widget: slider(valform_core::HOUSE_SQM, "m²"),
        },
        Step::LandSize => StepContent {
            title: "What's the land size?",
            widget: slider(valform_core::LAND_SIZE, "m²"),
        },
        Step::HouseAge => StepContent {
            title: "How old is the house?",
            widget: slider(valform_core::HOUSE_AGE, "years"),
        },
        Step::Bedrooms => StepContent {
            title: "How many bedrooms?",
            widget: slider(valform_core::BEDROOMS, ""),
        },
        Step::Bathrooms => StepContent {
            title: "How many bathrooms?",
            widget: slider(valform_core::BATHROOMS, ""),
        },
        Step::CvValuation => StepContent {
            title: "What's the council valuation (CV)?",
            widget: slider(valform_core::CV_VALUATION, "$"),
        },
        Step::Garage => StepContent {
            title: "Does it have a garage?",
            widget: single_select(&HasGarage::ALL.map(|v| v.label())),
        },
        Step::GarageCapacity => StepContent {
            title: "How many cars fit in the garage?",
            widget: single_select(&GarageCapacity::ALL.map(|v| v.label())),
        },
        Step::Condition => StepContent {
            title: "What condition is the property in?",
            widget: single_select(&Condition::ALL.map(|v| v.label())),
        },
        Step::Relationship => StepContent {
            title: "What's your relationship to the property?",
            widget: single_select(&Relationship::ALL.map(|v| v.label())),
        },
        Step::Situation => StepContent {
            title: "What's your situation?",
            widget: single_select(&Situation::ALL.map(|v| v.label())),
        },
        Step::SituationDetail => StepContent {
            title: "Tell us a bit more",
            widget: single_select(&OtherSituation::ALL.map(|v| v.label())),
        },
        Step::ExtraFeatures => StepContent {
            title: "Any extra features?",
            widget: Widget::MultiSelect {
                options: EXTRA_FEATURE_OPTIONS.to_vec(),
            },
        },
        Step::ContactDetails => StepContent {
            title: "Where should we send your valuation?",
            widget: Widget::ContactForm,
        },
        Step::ThankYou => StepContent {
            title: "Thank you! We'll be in touch shortly.",
            widget: Widget::Message,
        },
    };
    Some(content)
}

fn single_select(options: &[&'static str]) -> Widget {
    Widget::SingleSelect {
        options: options.to_vec(),
    }
}

fn slider(range: valform_core::FieldRange, unit: &'static str) -> Widget {
    Widget::Slider {
        min: range.min,
        max: range.max,
        step: range.step,
        unit,
    }
}
