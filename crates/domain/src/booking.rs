// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle.
//!
//! A booking records one assignment of a cab to a city. It moves through
//! `Booked -> WaitingForCustomer -> TripStarted` when it is created and
//! ends in either `Completed` or `Cancelled`.

use crate::error::DomainError;
use crate::types::{BookingId, CabId, CityId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingState {
    /// A cab has been reserved.
    Booked,
    /// The cab is heading to, or waiting for, the customer.
    WaitingForCustomer,
    /// The customer is on board.
    TripStarted,
    /// The booking was abandoned before the trip started.
    Cancelled,
    /// The trip is over and payment is outstanding.
    WaitingForPayment,
    /// The trip is over and settled.
    Completed,
}

impl BookingState {
    /// Returns the external token for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::WaitingForCustomer => "WAITING_FOR_CUSTOMER",
            Self::TripStarted => "TRIP_STARTED",
            Self::Cancelled => "CANCELLED",
            Self::WaitingForPayment => "WAITING_FOR_PAYMENT",
            Self::Completed => "COMPLETED",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Validates a transition from this state to `new_state`.
    ///
    /// Permitted transitions:
    /// - `Booked` -> `WaitingForCustomer` | `Cancelled`
    /// - `WaitingForCustomer` -> `TripStarted` | `Cancelled`
    /// - `TripStarted` -> `WaitingForPayment` | `Completed`
    /// - `WaitingForPayment` -> `Completed`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` for anything else.
    pub fn validate_transition(&self, new_state: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStateTransition {
                from: self.as_str().to_string(),
                to: new_state.as_str().to_string(),
                reason: "booking is already closed".to_string(),
            });
        }

        let valid: bool = match self {
            Self::Booked => matches!(new_state, Self::WaitingForCustomer | Self::Cancelled),
            Self::WaitingForCustomer => matches!(new_state, Self::TripStarted | Self::Cancelled),
            Self::TripStarted => matches!(new_state, Self::WaitingForPayment | Self::Completed),
            Self::WaitingForPayment => matches!(new_state, Self::Completed),
            Self::Cancelled | Self::Completed => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStateTransition {
                from: self.as_str().to_string(),
                to: new_state.as_str().to_string(),
                reason: "transition not permitted by booking lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for BookingState {
    type Err = DomainError;

    /// Parses an external state token, such as a command-line filter.
    /// Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOOKED" => Ok(Self::Booked),
            "WAITING_FOR_CUSTOMER" => Ok(Self::WaitingForCustomer),
            "TRIP_STARTED" => Ok(Self::TripStarted),
            "CANCELLED" => Ok(Self::Cancelled),
            "WAITING_FOR_PAYMENT" => Ok(Self::WaitingForPayment),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidBookingState(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One assignment of a cab to a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    cab_id: CabId,
    city_id: CityId,
    state: BookingState,
    start_time: OffsetDateTime,
    end_time: Option<OffsetDateTime>,
}

impl Booking {
    /// Creates a booking in the `Booked` state.
    #[must_use]
    pub const fn new(
        id: BookingId,
        cab_id: CabId,
        city_id: CityId,
        start_time: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            cab_id,
            city_id,
            state: BookingState::Booked,
            start_time,
            end_time: None,
        }
    }

    /// Returns the booking id.
    #[must_use]
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the assigned cab.
    #[must_use]
    pub const fn cab_id(&self) -> CabId {
        self.cab_id
    }

    /// Returns the city the booking was made in.
    #[must_use]
    pub const fn city_id(&self) -> CityId {
        self.city_id
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> BookingState {
        self.state
    }

    /// Returns when the booking started.
    #[must_use]
    pub const fn start_time(&self) -> OffsetDateTime {
        self.start_time
    }

    /// Returns when the trip ended, if it has.
    #[must_use]
    pub const fn end_time(&self) -> Option<OffsetDateTime> {
        self.end_time
    }

    /// Moves the booking to `new_state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle does not allow the transition.
    pub fn advance(&mut self, new_state: BookingState) -> Result<(), DomainError> {
        self.state.validate_transition(new_state)?;
        self.state = new_state;
        Ok(())
    }

    /// Closes the trip at `end_time` and marks the booking `Completed`.
    ///
    /// # Errors
    ///
    /// Returns an error if `end_time` precedes the start time or the booking
    /// cannot move to `Completed` from its current state.
    pub fn complete(&mut self, end_time: OffsetDateTime) -> Result<(), DomainError> {
        if end_time < self.start_time {
            return Err(DomainError::EndBeforeStart {
                booking_id: self.id,
                start: self.start_time,
                end: end_time,
            });
        }
        self.advance(BookingState::Completed)?;
        self.end_time = Some(end_time);
        Ok(())
    }
}
