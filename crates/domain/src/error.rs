// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{BookingId, CabId, CityId};
use time::OffsetDateTime;

/// Errors that can occur while validating or transitioning fleet entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No cab is registered under this id.
    CabNotFound(CabId),
    /// No city is registered under this id.
    CityNotFound(CityId),
    /// No booking exists with this id.
    BookingNotFound(BookingId),
    /// A cab already exists with this id.
    DuplicateCab(CabId),
    /// A city already exists with this id.
    DuplicateCity(CityId),
    /// The city still has cabs located in it.
    CityNotEmpty {
        /// The city that was asked to be removed.
        city_id: CityId,
        /// Number of cabs still indexed under the city.
        cab_count: usize,
    },
    /// A cab state token from outside the system was not recognized.
    InvalidCabState(String),
    /// A booking state token from outside the system was not recognized.
    InvalidBookingState(String),
    /// A state change is not permitted by the lifecycle rules.
    InvalidStateTransition {
        /// The state being left.
        from: String,
        /// The state requested.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// A history entry would be recorded before the latest one.
    OutOfOrderTimestamp {
        /// The cab whose history would be violated.
        cab_id: CabId,
        /// Timestamp of the most recent history entry.
        last: OffsetDateTime,
        /// The rejected timestamp.
        requested: OffsetDateTime,
    },
    /// A booking end time precedes its start time.
    EndBeforeStart {
        /// The booking being closed.
        booking_id: BookingId,
        /// The booking start time.
        start: OffsetDateTime,
        /// The rejected end time.
        end: OffsetDateTime,
    },
    /// The cab cannot take a new booking in its current state.
    CabUnavailable {
        /// The cab that was requested.
        cab_id: CabId,
        /// The state the cab is currently in.
        state: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CabNotFound(id) => write!(f, "Cab {id} not found"),
            Self::CityNotFound(id) => write!(f, "City {id} not found"),
            Self::BookingNotFound(id) => write!(f, "Booking {id} not found"),
            Self::DuplicateCab(id) => write!(f, "Cab {id} is already registered"),
            Self::DuplicateCity(id) => write!(f, "City {id} already exists"),
            Self::CityNotEmpty { city_id, cab_count } => {
                write!(
                    f,
                    "City {city_id} cannot be removed while {cab_count} cab(s) are located there"
                )
            }
            Self::InvalidCabState(token) => write!(f, "Invalid cab state: '{token}'"),
            Self::InvalidBookingState(token) => write!(f, "Invalid booking state: '{token}'"),
            Self::InvalidStateTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::OutOfOrderTimestamp {
                cab_id,
                last,
                requested,
            } => {
                write!(
                    f,
                    "Cab {cab_id} history is at {last}; refusing to record an entry at {requested}"
                )
            }
            Self::EndBeforeStart {
                booking_id,
                start,
                end,
            } => {
                write!(
                    f,
                    "Booking {booking_id} cannot end at {end}, before its start at {start}"
                )
            }
            Self::CabUnavailable { cab_id, state } => {
                write!(f, "Cab {cab_id} is {state} and cannot take a booking")
            }
        }
    }
}

impl std::error::Error for DomainError {}
