// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cab entity, its state machine, and idle-time accounting.
//!
//! A cab cycles `Idle -> Reserved -> OnTrip -> Idle`. Every state change is
//! recorded in an append-only history that analytics read later. The history
//! is seeded with the registration time and never goes backwards in time.

use crate::error::DomainError;
use crate::types::{BookingId, CabId, CityId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Operational state of a cab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabState {
    /// Available for dispatch.
    Idle,
    /// Held for a booking that has not started yet.
    Reserved,
    /// Carrying a customer.
    OnTrip,
}

impl CabState {
    /// All states, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Idle, Self::Reserved, Self::OnTrip];

    /// Returns the external token for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Reserved => "RESERVED",
            Self::OnTrip => "ON_TRIP",
        }
    }
}

impl FromStr for CabState {
    type Err = DomainError;

    /// Parses an external state token. Matching ignores case and
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IDLE" => Ok(Self::Idle),
            "RESERVED" => Ok(Self::Reserved),
            "ON_TRIP" => Ok(Self::OnTrip),
            _ => Err(DomainError::InvalidCabState(s.to_string())),
        }
    }
}

impl std::fmt::Display for CabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One recorded state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the state began.
    pub at: OffsetDateTime,
    /// The state entered at `at`.
    pub state: CabState,
}

/// A registered cab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cab {
    id: CabId,
    city_id: CityId,
    state: CabState,
    history: Vec<HistoryEntry>,
    booking_ids: Vec<BookingId>,
}

impl Cab {
    /// Creates an idle cab located in `city_id`.
    ///
    /// The history is seeded with `(registered_at, Idle)`.
    #[must_use]
    pub fn new(id: CabId, city_id: CityId, registered_at: OffsetDateTime) -> Self {
        Self {
            id,
            city_id,
            state: CabState::Idle,
            history: vec![HistoryEntry {
                at: registered_at,
                state: CabState::Idle,
            }],
            booking_ids: Vec::new(),
        }
    }

    /// Returns the cab id.
    #[must_use]
    pub const fn id(&self) -> CabId {
        self.id
    }

    /// Returns the city the cab is currently located in.
    #[must_use]
    pub const fn city_id(&self) -> CityId {
        self.city_id
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> CabState {
        self.state
    }

    /// Returns the recorded state history, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Returns the bookings assigned to this cab, oldest first.
    #[must_use]
    pub fn booking_ids(&self) -> &[BookingId] {
        &self.booking_ids
    }

    /// Timestamp of the most recent history entry.
    #[must_use]
    pub fn last_transition_at(&self) -> Option<OffsetDateTime> {
        self.history.last().map(|entry| entry.at)
    }

    /// Moves the cab to `state` at `at`.
    ///
    /// Returns `Ok(false)` without recording anything when the cab is already
    /// in `state`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::OutOfOrderTimestamp` if `at` is earlier than the
    /// latest history entry.
    pub fn set_state(&mut self, state: CabState, at: OffsetDateTime) -> Result<bool, DomainError> {
        if state == self.state {
            return Ok(false);
        }

        if let Some(last) = self.last_transition_at().filter(|last| at < *last) {
            return Err(DomainError::OutOfOrderTimestamp {
                cab_id: self.id,
                last,
                requested: at,
            });
        }

        self.state = state;
        self.history.push(HistoryEntry { at, state });
        Ok(true)
    }

    /// Records a new location.
    ///
    /// Callers holding a city index must move the cab between indexes in the
    /// same operation.
    pub const fn relocate(&mut self, city_id: CityId) {
        self.city_id = city_id;
    }

    /// Appends a booking to this cab's booking list.
    pub fn record_booking(&mut self, booking_id: BookingId) {
        self.booking_ids.push(booking_id);
    }

    /// Total time spent idle from registration up to `as_of`.
    ///
    /// Equivalent to `idle_time_within(None, as_of)`.
    #[must_use]
    pub fn idle_time(&self, as_of: OffsetDateTime) -> Duration {
        self.idle_time_within(None, as_of)
    }

    /// Time spent idle inside the closed window `[window_start, window_end]`.
    ///
    /// Each history entry opens an interval that lasts until the next entry;
    /// the last entry's interval stays open until `window_end`. Every interval
    /// whose state is `Idle` contributes its overlap with the window.
    /// A missing `window_start` means the first history timestamp.
    #[must_use]
    pub fn idle_time_within(
        &self,
        window_start: Option<OffsetDateTime>,
        window_end: OffsetDateTime,
    ) -> Duration {
        let Some(first) = self.history.first() else {
            return Duration::ZERO;
        };
        let window_start: OffsetDateTime = window_start.unwrap_or(first.at);
        if window_end <= window_start {
            return Duration::ZERO;
        }

        let interval_ends = self
            .history
            .iter()
            .skip(1)
            .map(|entry| entry.at)
            .chain(std::iter::once(window_end));

        self.history
            .iter()
            .zip(interval_ends)
            .filter(|(entry, _)| entry.state == CabState::Idle)
            .map(|(entry, end)| overlap(entry.at, end, window_start, window_end))
            .fold(Duration::ZERO, |total, part| total + part)
    }
}

/// Length of the intersection of `[start, end]` and `[window_start, window_end]`.
fn overlap(
    start: OffsetDateTime,
    end: OffsetDateTime,
    window_start: OffsetDateTime,
    window_end: OffsetDateTime,
) -> Duration {
    let lo: OffsetDateTime = start.max(window_start);
    let hi: OffsetDateTime = end.min(window_end);
    if hi > lo { hi - lo } else { Duration::ZERO }
}
