// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod booking;
mod cab;
mod error;
mod types;

#[cfg(test)]
mod tests;

pub use booking::{Booking, BookingState};
pub use cab::{Cab, CabState, HistoryEntry};
pub use error::DomainError;
pub use types::{BookingId, CabId, City, CityId};
