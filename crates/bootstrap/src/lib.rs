// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Loads a JSON fleet data file and replays it into a [`Dispatcher`].
//!
//! The data file carries cities, cabs and historical bookings. Everything is
//! parsed and validated before the dispatcher is touched; replay itself goes
//! through the ordinary dispatcher operations so the same invariants hold for
//! loaded data as for live bookings.
//!
//! [`Dispatcher`]: cab_dispatch::Dispatcher

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod loader;
mod model;
mod timestamp;

#[cfg(test)]
mod tests;

pub use error::BootstrapError;
pub use loader::{LoadReport, load_from_path, load_from_str, replay};
pub use model::{BookingRecord, CabRecord, CityRecord, DataFile};
pub use timestamp::parse_timestamp;
