//! The form data store: every answer collected across the funnel.

use serde::{Deserialize, Serialize};

use crate::attribution::Attribution;

/// Closed range with a step, for slider-backed numeric fields.
///
/// The widgets constrain input to these ranges, so an out-of-range value is
/// a programming error rather than a runtime condition; setters snap to the
/// nearest valid value instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRange {
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

impl FieldRange {
    /// Snap a value into this range, aligned to the step.
    pub const fn snap(&self, value: u64) -> u64 {
        let v = if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        };
        self.min + ((v - self.min) / self.step) * self.step
    }
}

/// Floor area of the house, in square metres.
pub const HOUSE_SQM: FieldRange = FieldRange {
    min: 0,
    max: 500,
    step: 1,
};

/// Land size, in square metres.
pub const LAND_SIZE: FieldRange = FieldRange {
    min: 250,
    max: 3000,
    step: 50,
};

/// Age of the house, in years.
pub const HOUSE_AGE: FieldRange = FieldRange {
    min: 0,
    max: 100,
    step: 1,
};

/// Number of bedrooms.
pub const BEDROOMS: FieldRange = FieldRange {
    min: 0,
    max: 6,
    step: 1,
};

/// Number of bathrooms.
pub const BATHROOMS: FieldRange = FieldRange {
    min: 0,
    max: 4,
    step: 1,
};

/// Council (capital value) valuation, in dollars.
pub const CV_VALUATION: FieldRange = FieldRange {
    min: 100_000,
    max: 3_000_000,
    step: 50_000,
};

/// Property type, chosen on the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[serde(rename = "Free Standing")]
    FreeStanding,
    #[serde(rename = "Town House")]
    TownHouse,
    #[serde(rename = "Apartment")]
    Apartment,
    #[serde(rename = "Land Only")]
    LandOnly,
    #[serde(rename = "Terraced")]
    Terraced,
    #[serde(rename = "Semi-Detached")]
    SemiDetached,
}

impl PropertyType {
    /// All selectable values, in display order.
    pub const ALL: [Self; 6] = [
        Self::FreeStanding,
        Self::TownHouse,
        Self::Apartment,
        Self::LandOnly,
        Self::Terraced,
        Self::SemiDetached,
    ];

    /// Display label, matching the wire value.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FreeStanding => "Free Standing",
            Self::TownHouse => "Town House",
            Self::Apartment => "Apartment",
            Self::LandOnly => "Land Only",
            Self::Terraced => "Terraced",
            Self::SemiDetached => "Semi-Detached",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether the property has a garage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HasGarage {
    Yes,
    No,
}

impl HasGarage {
    pub const ALL: [Self; 2] = [Self::Yes, Self::No];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl std::fmt::Display for HasGarage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Garage capacity, asked only when a garage exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GarageCapacity {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreePlus,
}

impl GarageCapacity {
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::ThreePlus];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::ThreePlus => "3+",
        }
    }
}

impl std::fmt::Display for GarageCapacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Overall condition of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Needs Work")]
    NeedsWork,
    #[serde(rename = "Liveable Tidy")]
    LiveableTidy,
    #[serde(rename = "Recently Renovated")]
    RecentlyRenovated,
}

impl Condition {
    pub const ALL: [Self; 3] = [Self::NeedsWork, Self::LiveableTidy, Self::RecentlyRenovated];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::NeedsWork => "Needs Work",
            Self::LiveableTidy => "Liveable Tidy",
            Self::RecentlyRenovated => "Recently Renovated",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The respondent's relationship to the property.
///
/// Only owners and estate executors qualify; every other answer is a
/// disqualification halt in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "Owner")]
    Owner,
    #[serde(rename = "Estate")]
    Estate,
    #[serde(rename = "Buyer")]
    Buyer,
    #[serde(rename = "Tenant")]
    Tenant,
    #[serde(rename = "Not My Property")]
    NotMyProperty,
    #[serde(rename = "Real Estate Agent")]
    RealEstateAgent,
}

impl Relationship {
    pub const ALL: [Self; 6] = [
        Self::Owner,
        Self::Estate,
        Self::Buyer,
        Self::Tenant,
        Self::NotMyProperty,
        Self::RealEstateAgent,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Estate => "Estate",
            Self::Buyer => "Buyer",
            Self::Tenant => "Tenant",
            Self::NotMyProperty => "Not My Property",
            Self::RealEstateAgent => "Real Estate Agent",
        }
    }

    /// Whether this relationship qualifies for a valuation.
    pub const fn qualifies(&self) -> bool {
        matches!(self, Self::Owner | Self::Estate)
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Why the respondent wants a valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Situation {
    #[serde(rename = "Downsizing")]
    Downsizing,
    #[serde(rename = "Selling Investment")]
    SellingInvestment,
    #[serde(rename = "Need Larger Home")]
    NeedLargerHome,
    #[serde(rename = "Thinking Of Selling")]
    ThinkingOfSelling,
    #[serde(rename = "Moving")]
    Moving,
    #[serde(rename = "Other")]
    Other,
}

impl Situation {
    pub const ALL: [Self; 6] = [
        Self::Downsizing,
        Self::SellingInvestment,
        Self::NeedLargerHome,
        Self::ThinkingOfSelling,
        Self::Moving,
        Self::Other,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Downsizing => "Downsizing",
            Self::SellingInvestment => "Selling Investment",
            Self::NeedLargerHome => "Need Larger Home",
            Self::ThinkingOfSelling => "Thinking Of Selling",
            Self::Moving => "Moving",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Situation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Clarification asked when the situation is "Other".
///
/// Refinancing is a disqualification halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OtherSituation {
    #[serde(rename = "Listing Soon")]
    ListingSoon,
    #[serde(rename = "Want Appraisal")]
    WantAppraisal,
    #[serde(rename = "Have Bought Already")]
    HaveBoughtAlready,
    #[serde(rename = "Find Out Worth")]
    FindOutWorth,
    #[serde(rename = "Refinancing")]
    Refinancing,
}

impl OtherSituation {
    pub const ALL: [Self; 5] = [
        Self::ListingSoon,
        Self::WantAppraisal,
        Self::HaveBoughtAlready,
        Self::FindOutWorth,
        Self::Refinancing,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::ListingSoon => "Listing Soon",
            Self::WantAppraisal => "Want Appraisal",
            Self::HaveBoughtAlready => "Have Bought Already",
            Self::FindOutWorth => "Find Out Worth",
            Self::Refinancing => "Refinancing",
        }
    }
}

impl std::fmt::Display for OtherSituation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything collected across the funnel, serialized camelCase for the
/// leads API.
///
/// Owned exclusively by a single wizard instance: created at mount with
/// attribution merged in, mutated in place by user input, posted at
/// submission, discarded at unmount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    // Identity / contact, empty until the contact step.
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,

    // Property.
    pub address: String,
    pub postal: String,
    pub property_type: Option<PropertyType>,
    pub house_sqm: u64,
    pub land_size: u64,
    pub house_age: u64,
    pub bedrooms: u64,
    pub bathrooms: u64,
    pub cv_valuation: u64,
    pub has_garage: Option<HasGarage>,
    pub garage_capacity: Option<GarageCapacity>,
    pub condition: Option<Condition>,

    // Qualification.
    pub relationship: Option<Relationship>,
    pub situation: Option<Situation>,
    pub other_situation: Option<OtherSituation>,
    /// Multi-select; unordered for storage, insertion order for display.
    pub extra_features: Vec<String>,

    // Attribution, injected once at construction.
    #[serde(flatten)]
    pub attribution: Attribution,

    /// Set true only after a successful verification callback, and never
    /// reset within a session.
    pub phone_verified: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            mobile: String::new(),
            address: String::new(),
            postal: String::new(),
            property_type: None,
            house_sqm: HOUSE_SQM.min,
            land_size: LAND_SIZE.min,
            house_age: HOUSE_AGE.min,
            bedrooms: BEDROOMS.min,
            bathrooms: BATHROOMS.min,
            cv_valuation: CV_VALUATION.min,
            has_garage: None,
            garage_capacity: None,
            condition: None,
            relationship: None,
            situation: None,
            other_situation: None,
            extra_features: Vec::new(),
            attribution: Attribution::default(),
            phone_verified: false,
        }
    }
}

impl FormState {
    /// Create a fresh form with attribution merged in.
    pub fn with_attribution(attribution: Attribution) -> Self {
        let mut form = Self::default();
        form.address = attribution.address.clone().unwrap_or_default();
        form.postal = attribution.postal.clone().unwrap_or_default();
        form.attribution = attribution;
        form
    }

    /// Set the house floor area, snapped into range.
    pub fn set_house_sqm(&mut self, value: u64) {
        self.house_sqm = HOUSE_SQM.snap(value);
    }

    /// Set the land size, snapped into range.
    pub fn set_land_size(&mut self, value: u64) {
        self.land_size = LAND_SIZE.snap(value);
    }

    /// Set the house age, snapped into range.
    pub fn set_house_age(&mut self, value: u64) {
        self.house_age = HOUSE_AGE.snap(value);
    }

    /// Set the bedroom count, snapped into range.
    pub fn set_bedrooms(&mut self, value: u64) {
        self.bedrooms = BEDROOMS.snap(value);
    }

    /// Set the bathroom count, snapped into range.
    pub fn set_bathrooms(&mut self, value: u64) {
        self.bathrooms = BATHROOMS.snap(value);
    }

    /// Set the CV valuation, snapped into range.
    pub fn set_cv_valuation(&mut self, value: u64) {
        self.cv_valuation = CV_VALUATION.snap(value);
    }

    /// Toggle an extra feature, preserving insertion order on add.
    pub fn toggle_feature(&mut self, feature: impl Into<String>) {
        let feature = feature.into();
        if let Some(pos) = self.extra_features.iter().position(|f| *f == feature) {
            self.extra_features.remove(pos);
        } else {
            self.extra_features.push(feature);
        }
    }

    /// Whether a feature is currently selected.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.extra_features.iter().any(|f| f == feature)
    }

    /// Whether the property is land only (the major branch condition).
    pub fn is_land_only(&self) -> bool {
        self.property_type == Some(PropertyType::LandOnly)
    }

    /// Mark the phone as verified. Monotonic: there is no way back.
    pub fn mark_phone_verified(&mut self) {
        self.phone_verified = true;
    }
}
