// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runs a parsed command against a loaded dispatcher and prints the result.

use crate::cli::Command;
use cab_dispatch::analytics::{
    CabHistory, CitySummary, DemandPeak, cab_history, calculate_idle_time, fleet_summary,
    high_demand_cities,
};
use cab_dispatch::{Booking, BookingId, Cab, CabId, CabState, CoreError, Dispatcher};
use color_eyre::Result;
use std::io::Write;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

impl Command {
    /// Executes the command, writing human-readable output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatcher rejects the operation or `out`
    /// cannot be written.
    pub fn execute(&self, dispatcher: &mut Dispatcher, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Cities => list_cities(dispatcher, out),
            Self::Cabs { city, state } => {
                let cabs: Vec<&Cab> = match (city, state) {
                    (Some(city), Some(state)) => dispatcher.cabs_in_city_by_state(*city, *state)?,
                    (Some(city), None) => dispatcher.cabs_in_city(*city)?,
                    (None, state) => dispatcher
                        .cabs()
                        .iter()
                        .filter(|cab| state.is_none_or(|state| cab.state() == state))
                        .collect(),
                };
                list_cabs(&cabs, out)
            }
            Self::History { cab } => show_history(dispatcher, *cab, out),
            Self::Bookings { cab, state } => {
                let mut bookings: Vec<&Booking> = match cab {
                    Some(cab) => dispatcher
                        .bookings_for_cab(*cab)?
                        .iter()
                        .map(|id| dispatcher.booking(*id))
                        .collect::<Result<_, CoreError>>()?,
                    None => dispatcher.all_bookings(),
                };
                if let Some(state) = state {
                    bookings.retain(|booking| booking.state() == *state);
                }
                list_bookings(&bookings, out)
            }
            Self::Book { city, at, .. } => match dispatcher.book_cab(*city, *at)? {
                Some(booking_id) => {
                    let booking: &Booking = dispatcher.booking(booking_id)?;
                    writeln!(
                        out,
                        "Booking {booking_id}: cab {} in city {} from {}",
                        booking.cab_id(),
                        booking.city_id(),
                        stamp(booking.start_time())?
                    )?;
                    Ok(())
                }
                None => {
                    writeln!(out, "No idle cab available in city {city}")?;
                    Ok(())
                }
            },
            Self::End { booking, at } => {
                dispatcher.end_booking(*booking, *at)?;
                let ended: &Booking = dispatcher.booking(*booking)?;
                let end: String = ended.end_time().map_or_else(|| Ok(String::new()), stamp)?;
                writeln!(
                    out,
                    "Booking {booking} completed at {end}; cab {} is {}",
                    ended.cab_id(),
                    CabState::Idle
                )?;
                Ok(())
            }
            Self::Idle { cab, from, to } => {
                let seconds: i64 = calculate_idle_time(dispatcher.cab(*cab)?, *from, *to);
                writeln!(out, "Cab {cab} idle for {seconds} seconds")?;
                Ok(())
            }
            Self::Demand => show_demand(dispatcher, out),
            Self::Summary => show_summary(&fleet_summary(dispatcher), out),
        }
    }
}

fn stamp(at: OffsetDateTime) -> Result<String> {
    Ok(at.format(&Rfc3339)?)
}

fn list_cities(dispatcher: &Dispatcher, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:>6}  {:<20}  {:>4}", "CITY", "NAME", "CABS")?;
    for city in dispatcher.cities().iter() {
        writeln!(
            out,
            "{:>6}  {:<20}  {:>4}",
            city.id(),
            city.name(),
            city.cab_count()
        )?;
    }
    Ok(())
}

fn list_cabs(cabs: &[&Cab], out: &mut impl Write) -> Result<()> {
    writeln!(out, "{:>6}  {:>6}  {:<10}  SINCE", "CAB", "CITY", "STATE")?;
    for cab in cabs {
        let since: String = cab
            .last_transition_at()
            .map_or_else(|| Ok(String::from("-")), stamp)?;
        writeln!(
            out,
            "{:>6}  {:>6}  {:<10}  {since}",
            cab.id(),
            cab.city_id(),
            cab.state()
        )?;
    }
    Ok(())
}

fn show_history(dispatcher: &Dispatcher, cab_id: CabId, out: &mut impl Write) -> Result<()> {
    let history: CabHistory<'_> = cab_history(dispatcher.cab(cab_id)?);
    writeln!(out, "Cab {cab_id}")?;
    for entry in history.states {
        writeln!(out, "  {}  {}", stamp(entry.at)?, entry.state)?;
    }
    let ids: Vec<String> = history.bookings.iter().map(BookingId::to_string).collect();
    if ids.is_empty() {
        writeln!(out, "Bookings: none")?;
    } else {
        writeln!(out, "Bookings: {}", ids.join(", "))?;
    }
    Ok(())
}

fn list_bookings(bookings: &[&Booking], out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{:>8}  {:>6}  {:>6}  {:<22}  {:<25}  END",
        "BOOKING", "CAB", "CITY", "STATE", "START"
    )?;
    for booking in bookings {
        let end: String = booking
            .end_time()
            .map_or_else(|| Ok(String::from("-")), stamp)?;
        writeln!(
            out,
            "{:>8}  {:>6}  {:>6}  {:<22}  {:<25}  {end}",
            booking.id(),
            booking.cab_id(),
            booking.city_id(),
            booking.state(),
            stamp(booking.start_time())?
        )?;
    }
    Ok(())
}

fn show_demand(dispatcher: &Dispatcher, out: &mut impl Write) -> Result<()> {
    match high_demand_cities(dispatcher.all_bookings()) {
        Ok(DemandPeak {
            city_id,
            city_bookings,
            peak_hour,
            hour_bookings,
        }) => {
            let name: &str = dispatcher.city(city_id).map_or("unknown", |city| city.name());
            writeln!(
                out,
                "Busiest city: {city_id} ({name}) with {city_bookings} booking(s)"
            )?;
            writeln!(
                out,
                "Peak hour: {peak_hour:02}:00 UTC with {hour_bookings} booking(s)"
            )?;
            Ok(())
        }
        Err(CoreError::EmptyInput { .. }) => {
            writeln!(out, "No bookings recorded")?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn show_summary(summary: &[CitySummary], out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{:>6}  {:<20}  {:>4}  {:>8}  {:>7}",
        "CITY", "NAME", "IDLE", "RESERVED", "ON_TRIP"
    )?;
    for city in summary {
        writeln!(
            out,
            "{:>6}  {:<20}  {:>4}  {:>8}  {:>7}",
            city.city_id, city.name, city.idle, city.reserved, city.on_trip
        )?;
    }
    Ok(())
}
