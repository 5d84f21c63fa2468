// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only analytics over cab history and bookings.
//!
//! Nothing here mutates or caches state. Results are plain values; callers
//! decide how to present them.

use crate::dispatch::Dispatcher;
use crate::error::CoreError;
use cab_dispatch_domain::{Booking, BookingId, Cab, CabState, CityId, HistoryEntry};
use std::collections::HashMap;
use std::hash::Hash;
use time::{OffsetDateTime, UtcOffset};

/// Idle seconds a cab accumulated inside `[window_start, window_end]`.
///
/// `window_start = None` starts at the cab's first history entry;
/// `window_end = None` means now. Intervals are clipped to the window and the
/// trailing interval of an idle cab stays open until `window_end`. This is
/// the same accounting as [`Cab::idle_time_within`], truncated to whole
/// seconds.
#[must_use]
pub fn calculate_idle_time(
    cab: &Cab,
    window_start: Option<OffsetDateTime>,
    window_end: Option<OffsetDateTime>,
) -> i64 {
    let window_end: OffsetDateTime = window_end.unwrap_or_else(OffsetDateTime::now_utc);
    cab.idle_time_within(window_start, window_end)
        .whole_seconds()
}

/// A cab's state history together with its bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabHistory<'a> {
    /// State changes, oldest first.
    pub states: &'a [HistoryEntry],
    /// Bookings assigned to the cab, oldest first.
    pub bookings: &'a [BookingId],
}

/// Returns the state history and booking list of a cab.
#[must_use]
pub fn cab_history(cab: &Cab) -> CabHistory<'_> {
    CabHistory {
        states: cab.history(),
        bookings: cab.booking_ids(),
    }
}

/// The busiest city and the busiest hour of day across a set of bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandPeak {
    /// City with the most bookings.
    pub city_id: CityId,
    /// Number of bookings made in `city_id`.
    pub city_bookings: usize,
    /// UTC hour of day (0-23) in which the most bookings started.
    pub peak_hour: u8,
    /// Number of bookings that started in `peak_hour`.
    pub hour_bookings: usize,
}

/// Finds the city with the most bookings and the hour of day with the most
/// booking starts.
///
/// The two histograms are independent: the peak hour is computed over all
/// bookings, not only those of the top city. When several keys share the top
/// count, the one seen first while walking `bookings` wins.
///
/// # Errors
///
/// Returns `CoreError::EmptyInput` if `bookings` is empty.
pub fn high_demand_cities<'a, I>(bookings: I) -> Result<DemandPeak, CoreError>
where
    I: IntoIterator<Item = &'a Booking>,
{
    let mut by_city: Histogram<CityId> = Histogram::default();
    let mut by_hour: Histogram<u8> = Histogram::default();

    for booking in bookings {
        by_city.record(booking.city_id());
        by_hour.record(booking.start_time().to_offset(UtcOffset::UTC).hour());
    }

    let empty = CoreError::EmptyInput { what: "bookings" };
    let (city_id, city_bookings) = by_city.first_maximum().ok_or_else(|| empty.clone())?;
    let (peak_hour, hour_bookings) = by_hour.first_maximum().ok_or(empty)?;

    Ok(DemandPeak {
        city_id,
        city_bookings,
        peak_hour,
        hour_bookings,
    })
}

/// Cab counts for one city, grouped by state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySummary {
    /// The city.
    pub city_id: CityId,
    /// The city's name.
    pub name: String,
    /// Cabs waiting for work.
    pub idle: usize,
    /// Cabs held for a booking.
    pub reserved: usize,
    /// Cabs carrying a customer.
    pub on_trip: usize,
}

/// Counts the cabs in every city by state, in ascending city id order.
#[must_use]
pub fn fleet_summary(dispatcher: &Dispatcher) -> Vec<CitySummary> {
    dispatcher
        .cities()
        .iter()
        .map(|city| {
            let mut summary: CitySummary = CitySummary {
                city_id: city.id(),
                name: city.name().to_string(),
                idle: 0,
                reserved: 0,
                on_trip: 0,
            };
            for cab in city.cab_ids().filter_map(|id| dispatcher.cabs().get(id)) {
                match cab.state() {
                    CabState::Idle => summary.idle += 1,
                    CabState::Reserved => summary.reserved += 1,
                    CabState::OnTrip => summary.on_trip += 1,
                }
            }
            summary
        })
        .collect()
}

/// Frequency counts that remember the order keys were first seen.
struct Histogram<K> {
    counts: Vec<(K, usize)>,
    slots: HashMap<K, usize>,
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self {
            counts: Vec::new(),
            slots: HashMap::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Histogram<K> {
    fn record(&mut self, key: K) {
        if let Some(&slot) = self.slots.get(&key) {
            self.counts[slot].1 += 1;
        } else {
            self.slots.insert(key, self.counts.len());
            self.counts.push((key, 1));
        }
    }

    /// The highest count; ties go to the earliest-seen key.
    fn first_maximum(&self) -> Option<(K, usize)> {
        self.counts.iter().copied().fold(None, |best, (key, count)| {
            match best {
                Some((_, top)) if top >= count => best,
                _ => Some((key, count)),
            }
        })
    }
}
