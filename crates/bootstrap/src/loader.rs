// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::BootstrapError;
use crate::model::{BookingRecord, CabRecord, DataFile};
use crate::timestamp::parse_timestamp;
use cab_dispatch::{BookingId, CabId, CabState, CityId, Dispatcher};
use std::collections::BTreeMap;
use std::path::Path;
use time::OffsetDateTime;
use tracing::{debug, info};

/// What a replay added to the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Cities added.
    pub cities: usize,
    /// Cabs registered.
    pub cabs: usize,
    /// Historical bookings replayed, open or closed.
    pub bookings: usize,
    /// Bookings that carried an end time and were closed during replay.
    pub completed: usize,
}

/// A cab record with its fields converted.
struct PlannedCab {
    cab_id: CabId,
    city_id: CityId,
    state: Option<CabState>,
    registered_at: Option<OffsetDateTime>,
}

/// A booking record with its timestamps converted.
struct PlannedBooking {
    cab_id: CabId,
    city_id: CityId,
    start_time: OffsetDateTime,
    end_time: Option<OffsetDateTime>,
}

/// Reads a data file from disk and replays it into `dispatcher`.
///
/// # Errors
///
/// Returns `BootstrapError::Io` if the file cannot be read, and any error
/// [`load_from_str`] returns.
pub fn load_from_path(path: &Path, dispatcher: &mut Dispatcher) -> Result<LoadReport, BootstrapError> {
    let contents: String =
        std::fs::read_to_string(path).map_err(|source| BootstrapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let report: LoadReport = load_from_str(&contents, dispatcher)?;
    info!(path = %path.display(), "Data file loaded");
    Ok(report)
}

/// Parses a JSON document and replays it into `dispatcher`, using the
/// current time as the load time.
///
/// # Errors
///
/// Returns `BootstrapError::Json` for malformed input, and any error
/// [`replay`] returns.
pub fn load_from_str(json: &str, dispatcher: &mut Dispatcher) -> Result<LoadReport, BootstrapError> {
    let data: DataFile = serde_json::from_str(json)?;
    replay(&data, dispatcher, OffsetDateTime::now_utc())
}

/// Replays a parsed data file.
///
/// Order of application:
/// 1. cities;
/// 2. cabs, registered idle at `registeredAt`, or at the start of their
///    earliest booking, or at `loaded_at`;
/// 3. bookings in start-time order, each booked on its named cab and ended
///    when it has an end time;
/// 4. each cab's declared state, applied no earlier than `loaded_at`.
///
/// Every timestamp and state token is converted before the dispatcher is
/// touched, so a conversion error leaves it unchanged.
///
/// # Errors
///
/// Returns `BootstrapError::Timestamp` or `BootstrapError::CabState` for
/// unparseable fields, and `BootstrapError::Core` if the dispatcher rejects a
/// replayed operation. After a `Core` error the dispatcher holds a partial
/// replay and should be discarded.
pub fn replay(
    data: &DataFile,
    dispatcher: &mut Dispatcher,
    loaded_at: OffsetDateTime,
) -> Result<LoadReport, BootstrapError> {
    let cabs: Vec<PlannedCab> = data
        .cabs
        .iter()
        .map(plan_cab)
        .collect::<Result<_, _>>()?;
    let mut bookings: Vec<PlannedBooking> = data
        .bookings
        .iter()
        .map(plan_booking)
        .collect::<Result<_, _>>()?;
    bookings.sort_by_key(|booking| booking.start_time);

    let mut first_start: BTreeMap<CabId, OffsetDateTime> = BTreeMap::new();
    for booking in &bookings {
        first_start
            .entry(booking.cab_id)
            .or_insert(booking.start_time);
    }

    let mut report: LoadReport = LoadReport::default();

    for city in &data.cities {
        dispatcher.add_city(city.city_id, &city.name)?;
        report.cities += 1;
    }

    for cab in &cabs {
        let registered_at: OffsetDateTime = cab
            .registered_at
            .or_else(|| first_start.get(&cab.cab_id).copied())
            .unwrap_or(loaded_at);
        dispatcher.register_cab(cab.cab_id, cab.city_id, Some(registered_at))?;
        report.cabs += 1;
    }

    for booking in &bookings {
        let booking_id: BookingId = dispatcher.book_existing_cab(
            booking.cab_id,
            booking.city_id,
            Some(booking.start_time),
        )?;
        report.bookings += 1;
        if let Some(end_time) = booking.end_time {
            dispatcher.end_booking(booking_id, Some(end_time))?;
            report.completed += 1;
        }
        debug!(booking_id = %booking_id, cab_id = %booking.cab_id, "Historical booking replayed");
    }

    for cab in &cabs {
        let Some(state) = cab.state else {
            continue;
        };
        let current = dispatcher.cab(cab.cab_id)?;
        if current.state() == state {
            continue;
        }
        let at: OffsetDateTime = current
            .last_transition_at()
            .map_or(loaded_at, |last| last.max(loaded_at));
        dispatcher.update_cab(cab.cab_id, Some(state), None, Some(at))?;
    }

    info!(
        cities = report.cities,
        cabs = report.cabs,
        bookings = report.bookings,
        completed = report.completed,
        "Replay finished"
    );
    Ok(report)
}

fn plan_cab(record: &CabRecord) -> Result<PlannedCab, BootstrapError> {
    let state: Option<CabState> = record
        .cab_state
        .as_deref()
        .map(str::parse::<CabState>)
        .transpose()
        .map_err(|source| BootstrapError::CabState {
            cab_id: record.cab_id,
            source,
        })?;
    let registered_at: Option<OffsetDateTime> = record
        .registered_at
        .as_deref()
        .map(|value| convert(value, "registeredAt"))
        .transpose()?;

    Ok(PlannedCab {
        cab_id: record.cab_id,
        city_id: record.city_id,
        state,
        registered_at,
    })
}

fn plan_booking(record: &BookingRecord) -> Result<PlannedBooking, BootstrapError> {
    Ok(PlannedBooking {
        cab_id: record.cab_id,
        city_id: record.city_id,
        start_time: convert(&record.start_time, "start_time")?,
        end_time: record
            .end_time
            .as_deref()
            .map(|value| convert(value, "end_time"))
            .transpose()?,
    })
}

fn convert(value: &str, field: &'static str) -> Result<OffsetDateTime, BootstrapError> {
    parse_timestamp(value).ok_or_else(|| BootstrapError::Timestamp {
        field,
        value: value.to_string(),
    })
}
