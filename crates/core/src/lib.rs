//! Shared types for the valform funnel.
//!
//! This crate holds everything the funnel crates agree on:
//!
//! - **Form state**: the single mutable aggregate collected across the
//!   wizard, with closed enums for every multiple-choice answer.
//! - **Attribution**: marketing identifiers captured once from the entry
//!   URL and injected at construction time.
//! - **IDs**: ULID newtypes for sessions, leads, and verifications.
//! - **Validation**: contact and mobile-number checks shared by the
//!   wizard and the submission flow.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod attribution;
pub mod error;
pub mod form;
pub mod ids;
pub mod validation;

pub use attribution::Attribution;
pub use error::{Error, Result};
pub use form::{
    Condition, FieldRange, FormState, GarageCapacity, HasGarage, OtherSituation, PropertyType,
    Relationship, Situation, BATHROOMS, BEDROOMS, CV_VALUATION, HOUSE_AGE, HOUSE_SQM, LAND_SIZE,
};
pub use ids::{LeadId, SessionId, VerificationId};
pub use validation::{is_valid_mobile, validate_contact};
