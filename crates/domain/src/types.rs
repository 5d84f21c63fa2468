// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifies a cab across the whole fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CabId(u64);

impl CabId {
    /// Creates a cab identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Identifies a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(u64);

impl CityId {
    /// Creates a city identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Identifies a booking.
///
/// Booking ids are assigned by the booking store in strictly increasing order,
/// so comparing two ids also compares their creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(u64);

impl BookingId {
    /// Creates a booking identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A city and the cabs currently located in it.
///
/// The city only records cab ids. The cabs themselves are owned by the cab
/// registry; this index must be updated whenever a cab changes location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    id: CityId,
    name: String,
    cabs: BTreeSet<CabId>,
}

impl City {
    /// Creates a city with an empty cab index.
    #[must_use]
    pub fn new(id: CityId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            cabs: BTreeSet::new(),
        }
    }

    /// Returns the city id.
    #[must_use]
    pub const fn id(&self) -> CityId {
        self.id
    }

    /// Returns the city name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ids of cabs located here, in ascending order.
    pub fn cab_ids(&self) -> impl Iterator<Item = CabId> + '_ {
        self.cabs.iter().copied()
    }

    /// Checks whether a cab is located here.
    #[must_use]
    pub fn contains(&self, cab_id: CabId) -> bool {
        self.cabs.contains(&cab_id)
    }

    /// Number of cabs located here.
    #[must_use]
    pub fn cab_count(&self) -> usize {
        self.cabs.len()
    }

    /// Returns true when no cab is located here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cabs.is_empty()
    }

    /// Indexes a cab under this city. Returns false if it was already present.
    pub fn add_cab(&mut self, cab_id: CabId) -> bool {
        self.cabs.insert(cab_id)
    }

    /// Drops a cab from this city's index. Returns false if it was absent.
    pub fn remove_cab(&mut self, cab_id: CabId) -> bool {
        self.cabs.remove(&cab_id)
    }
}
