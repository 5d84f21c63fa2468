// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments.

use cab_dispatch::{BookingId, BookingState, CabId, CabState, CityId};
use cab_dispatch_bootstrap::parse_timestamp;
use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, value_parser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Cab dispatch - load a fleet data file and run dispatch or analytics on it
#[derive(Debug, Parser)]
#[command(name = "cab-dispatch", author, version, about, long_about = None)]
pub struct Args {
    /// JSON data file with cities, cabs and historical bookings
    #[arg(short, long, value_name = "FILE")]
    pub data: PathBuf,

    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List cities and how many cabs each holds
    Cities,

    /// List cabs, optionally filtered by city and state
    Cabs {
        #[arg(long, value_parser = value_parser!(u64).map(CityId::new))]
        city: Option<CityId>,
        /// IDLE, RESERVED or ON_TRIP
        #[arg(long, value_parser = parse_state)]
        state: Option<CabState>,
    },

    /// Show a cab's state history and bookings
    History {
        #[arg(long, value_parser = value_parser!(u64).map(CabId::new))]
        cab: CabId,
    },

    /// List bookings, optionally for a single cab or in a single state
    Bookings {
        #[arg(long, value_parser = value_parser!(u64).map(CabId::new))]
        cab: Option<CabId>,
        /// BOOKED, WAITING_FOR_CUSTOMER, TRIP_STARTED, CANCELLED,
        /// WAITING_FOR_PAYMENT or COMPLETED
        #[arg(long, value_parser = parse_booking_state)]
        state: Option<BookingState>,
    },

    /// Book the longest-idle cab in a city
    Book {
        #[arg(long, value_parser = value_parser!(u64).map(CityId::new))]
        city: CityId,
        /// Trip start; defaults to now
        #[arg(long, value_parser = parse_at)]
        at: Option<OffsetDateTime>,
        /// Seed for reproducible tie-breaks
        #[arg(long)]
        seed: Option<u64>,
    },

    /// End a trip and return its cab to idle
    End {
        #[arg(long, value_parser = value_parser!(u64).map(BookingId::new))]
        booking: BookingId,
        /// Trip end; defaults to now
        #[arg(long, value_parser = parse_at)]
        at: Option<OffsetDateTime>,
    },

    /// Seconds a cab spent idle within a window
    Idle {
        #[arg(long, value_parser = value_parser!(u64).map(CabId::new))]
        cab: CabId,
        /// Window start; defaults to the cab's registration
        #[arg(long, value_parser = parse_at)]
        from: Option<OffsetDateTime>,
        /// Window end; defaults to now
        #[arg(long, value_parser = parse_at)]
        to: Option<OffsetDateTime>,
    },

    /// Busiest city and busiest hour of day
    Demand,

    /// Cab counts per city and state
    Summary,
}

impl Command {
    /// Seed requested for the dispatcher's random source, if any.
    pub const fn seed(&self) -> Option<u64> {
        match self {
            Self::Book { seed, .. } => *seed,
            _ => None,
        }
    }
}

fn parse_at(value: &str) -> Result<OffsetDateTime, String> {
    parse_timestamp(value).ok_or_else(|| {
        format!("'{value}' is not an RFC 3339 or YYYY-MM-DDTHH:MM:SS timestamp")
    })
}

fn parse_state(value: &str) -> Result<CabState, String> {
    value.parse::<CabState>().map_err(|err| err.to_string())
}

fn parse_booking_state(value: &str) -> Result<BookingState, String> {
    value.parse::<BookingState>().map_err(|err| err.to_string())
}
