//! Report field vocabularies.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// How bad the accident is, as judged by the reporter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum Severity {
    #[default]
    Critical,
    Moderate,
    Minor,
}

impl Severity {
    /// Label shown in the report form picker.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical Situation",
            Self::Moderate => "Moderate Incident",
            Self::Minor => "Minor Collision",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum AccidentType {
    #[default]
    Bus,
    Plane,
    Car,
    Bike,
    #[serde(rename = "Transport Heavy Vehicle")]
    #[strum(serialize = "Transport Heavy Vehicle")]
    TransportHeavyVehicle,
}

impl AccidentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Bus => "Bus Accident",
            Self::Plane => "Plane Accident",
            Self::Car => "Car Collision",
            Self::Bike => "Motorcycle Crash",
            Self::TransportHeavyVehicle => "Heavy Vehicle Incident",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum VehicleCount {
    #[default]
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    One,
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Two,
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Three,
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Four,
    #[serde(rename = "More than 4")]
    #[strum(serialize = "More than 4")]
    MoreThanFour,
}

impl VehicleCount {
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1 Vehicle",
            Self::Two => "2 Vehicles",
            Self::Three => "3 Vehicles",
            Self::Four => "4 Vehicles",
            Self::MoreThanFour => "More than 4",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum CasualtyCount {
    #[default]
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    One,
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Two,
    #[serde(rename = "More than 2")]
    #[strum(serialize = "More than 2")]
    MoreThanTwo,
    #[serde(rename = "More than 5")]
    #[strum(serialize = "More than 5")]
    MoreThanFive,
    #[serde(rename = "More than 10")]
    #[strum(serialize = "More than 10")]
    MoreThanTen,
    #[serde(rename = "More than 20")]
    #[strum(serialize = "More than 20")]
    MoreThanTwenty,
}

impl CasualtyCount {
    pub fn label(self) -> &'static str {
        match self {
            Self::One => "1 Person",
            Self::Two => "2 People",
            Self::MoreThanTwo => "Multiple (2+)",
            Self::MoreThanFive => "Several (5+)",
            Self::MoreThanTen => "Many (10+)",
            Self::MoreThanTwenty => "Large Scale (20+)",
        }
    }
}
