//! Property tests for the forward transition function.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;
use proptest::sample::select;

use valform_core::{
    Condition, FormState, GarageCapacity, HasGarage, OtherSituation, PropertyType, Relationship,
    Situation,
};
use valform_wizard::{is_applicable, next, Step, Target};

/// A form with every choice answered, drawn from the full option sets.
fn complete_form() -> impl Strategy<Value = FormState> {
    (
        select(PropertyType::ALL.to_vec()),
        select(HasGarage::ALL.to_vec()),
        select(GarageCapacity::ALL.to_vec()),
        select(Condition::ALL.to_vec()),
        select(Relationship::ALL.to_vec()),
        select(Situation::ALL.to_vec()),
        select(OtherSituation::ALL.to_vec()),
    )
        .prop_map(
            |(property, garage, capacity, condition, relationship, situation, other)| {
                let mut form = FormState::default();
                form.property_type = Some(property);
                form.has_garage = Some(garage);
                form.garage_capacity = Some(capacity);
                form.condition = Some(condition);
                form.relationship = Some(relationship);
                form.situation = Some(situation);
                form.other_situation = Some(other);
                form.toggle_feature("Deck");
                form
            },
        )
}

proptest! {
    /// Walking forward from the first step always terminates in a halt or
    /// a submission hand-off, visits only applicable steps, never lands on
    /// the terminal step, and only moves to higher ordinals.
    #[test]
    fn forward_walk_terminates(form in complete_form()) {
        let mut step = Step::PropertyType;
        let mut terminated = false;
        for _ in 0..Step::ALL.len() {
            match next(step, &form) {
                Ok(Target::Step(to)) => {
                    prop_assert!(is_applicable(to, &form), "routed to skipped step {to}");
                    prop_assert!(to != Step::ThankYou, "terminal step is not routable");
                    prop_assert!(to.number() > step.number(), "{step} -> {to} went backwards");
                    step = to;
                }
                Ok(Target::Halt(_)) | Ok(Target::Submit) => {
                    terminated = true;
                    break;
                }
                Err(err) => prop_assert!(false, "walk failed at {step}: {err}"),
            }
        }
        prop_assert!(terminated, "walk did not reach a halt or submission");
    }

    /// The transition function is pure in the form state.
    #[test]
    fn next_is_pure(form in complete_form(), step in select(Step::ALL.to_vec())) {
        prop_assert_eq!(next(step, &form), next(step, &form));
    }

    /// Land-only forms route around every house-description step.
    #[test]
    fn land_only_avoids_house_steps(mut form in complete_form()) {
        form.property_type = Some(PropertyType::LandOnly);
        let mut step = Step::PropertyType;
        while let Ok(Target::Step(to)) = next(step, &form) {
            prop_assert!(
                !matches!(
                    to,
                    Step::HouseSize
                        | Step::HouseAge
                        | Step::Bedrooms
                        | Step::Bathrooms
                        | Step::Garage
                        | Step::GarageCapacity
                        | Step::Condition
                ),
                "land-only visited {to}"
            );
            step = to;
        }
    }
}
