//! Raw activity-code lookup table
//!
//! The code values are owned by the SDK's activity classification; this
//! module only consumes them. Codes outside the table yield `None`.

use crate::trip::TripType;

pub(crate) fn trip_type(raw: i64) -> Option<TripType> {
    match raw {
        1 => Some(TripType::Stationary),
        2 => Some(TripType::Walking),
        3 => Some(TripType::Running),
        4 => Some(TripType::Biking),
        5 => Some(TripType::Vehicle),
        _ => None,
    }
}
