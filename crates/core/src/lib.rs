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

pub mod analytics;
mod bookings;
mod dispatch;
mod error;
mod registry;
mod selection;

#[cfg(test)]
mod tests;

// Re-export public types
pub use bookings::BookingStore;
pub use dispatch::Dispatcher;
pub use error::CoreError;
pub use registry::{CabRegistry, CityRegistry};
pub use selection::{IdleCandidate, LongestIdle, SelectionPolicy};

pub use cab_dispatch_domain::{
    Booking, BookingId, BookingState, Cab, CabId, CabState, City, CityId, DomainError,
    HistoryEntry,
};
