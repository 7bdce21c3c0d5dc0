//! Trip classification
//!
//! The SDK pushes a raw integer activity code with every
//! `SDKUserActivityUpdate`; [`TripType::classify`] maps it through the
//! consumed lookup table. Unknown codes map to the explicit
//! [`TripType::Unrecognized`] sentinel — classification never fails.

use serde::Serialize;

use crate::trip_table;

/// Semantic classification of the current movement activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TripType {
    Stationary,
    Walking,
    Running,
    Biking,
    Vehicle,
    /// The raw code was not in the classification table
    Unrecognized,
}

impl TripType {
    /// Classify a raw activity code
    pub fn classify(raw: i64) -> Self {
        trip_table::trip_type(raw).unwrap_or(TripType::Unrecognized)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TripType::Stationary => "stationary",
            TripType::Walking => "walking",
            TripType::Running => "running",
            TripType::Biking => "biking",
            TripType::Vehicle => "vehicle",
            TripType::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_codes() {
        assert_eq!(TripType::classify(1), TripType::Stationary);
        assert_eq!(TripType::classify(2), TripType::Walking);
        assert_eq!(TripType::classify(5), TripType::Vehicle);
    }

    #[test]
    fn unknown_codes_map_to_sentinel() {
        assert_eq!(TripType::classify(0), TripType::Unrecognized);
        assert_eq!(TripType::classify(99), TripType::Unrecognized);
        assert_eq!(TripType::classify(-7), TripType::Unrecognized);
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(TripType::Vehicle.to_string(), "vehicle");
        assert_eq!(TripType::Unrecognized.label(), "unrecognized");
    }
}
