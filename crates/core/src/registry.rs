// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cab and city registries.
//!
//! The cab registry owns every `Cab`. The city registry owns every `City`,
//! and each city keeps an index of the cab ids located in it.

use cab_dispatch_domain::{Cab, CabId, City, CityId, DomainError};
use std::collections::BTreeMap;

/// All registered cabs, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CabRegistry {
    cabs: BTreeMap<CabId, Cab>,
}

impl CabRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cabs: BTreeMap::new(),
        }
    }

    /// Looks up a cab.
    #[must_use]
    pub fn get(&self, cab_id: CabId) -> Option<&Cab> {
        self.cabs.get(&cab_id)
    }

    /// Looks up a cab that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CabNotFound` if the id is unknown.
    pub fn require(&self, cab_id: CabId) -> Result<&Cab, DomainError> {
        self.cabs
            .get(&cab_id)
            .ok_or(DomainError::CabNotFound(cab_id))
    }

    /// Checks whether a cab is registered.
    #[must_use]
    pub fn contains(&self, cab_id: CabId) -> bool {
        self.cabs.contains_key(&cab_id)
    }

    /// Iterates over all cabs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Cab> {
        self.cabs.values()
    }

    /// Number of registered cabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cabs.len()
    }

    /// Returns true when no cab is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cabs.is_empty()
    }

    /// Adds a new cab.
    pub(crate) fn insert(&mut self, cab: Cab) -> Result<(), DomainError> {
        if self.cabs.contains_key(&cab.id()) {
            return Err(DomainError::DuplicateCab(cab.id()));
        }
        self.cabs.insert(cab.id(), cab);
        Ok(())
    }

    /// Stores a staged copy of an existing cab, replacing the previous value.
    pub(crate) fn commit(&mut self, cab: Cab) {
        self.cabs.insert(cab.id(), cab);
    }
}

/// All cities, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityRegistry {
    cities: BTreeMap<CityId, City>,
}

impl CityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cities: BTreeMap::new(),
        }
    }

    /// Looks up a city.
    #[must_use]
    pub fn get(&self, city_id: CityId) -> Option<&City> {
        self.cities.get(&city_id)
    }

    /// Looks up a city that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if the id is unknown.
    pub fn require(&self, city_id: CityId) -> Result<&City, DomainError> {
        self.cities
            .get(&city_id)
            .ok_or(DomainError::CityNotFound(city_id))
    }

    /// Checks whether a city exists.
    #[must_use]
    pub fn contains(&self, city_id: CityId) -> bool {
        self.cities.contains_key(&city_id)
    }

    /// Iterates over all cities in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true when there are no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub(crate) fn add(&mut self, city_id: CityId, name: &str) -> Result<(), DomainError> {
        if self.cities.contains_key(&city_id) {
            return Err(DomainError::DuplicateCity(city_id));
        }
        self.cities.insert(city_id, City::new(city_id, name));
        Ok(())
    }

    /// Removes a city that has no cabs located in it.
    pub(crate) fn remove(&mut self, city_id: CityId) -> Result<City, DomainError> {
        let city: &City = self.require(city_id)?;
        if !city.is_empty() {
            return Err(DomainError::CityNotEmpty {
                city_id,
                cab_count: city.cab_count(),
            });
        }
        self.cities
            .remove(&city_id)
            .ok_or(DomainError::CityNotFound(city_id))
    }

    /// Indexes a cab under a city.
    pub(crate) fn index_cab(&mut self, city_id: CityId, cab_id: CabId) -> Result<(), DomainError> {
        let city: &mut City = self
            .cities
            .get_mut(&city_id)
            .ok_or(DomainError::CityNotFound(city_id))?;
        city.add_cab(cab_id);
        Ok(())
    }

    /// Moves a cab from one city's index to another's.
    ///
    /// The target city is checked before anything is touched, so a failed
    /// move leaves both indexes unchanged.
    pub(crate) fn move_cab(
        &mut self,
        cab_id: CabId,
        from: CityId,
        to: CityId,
    ) -> Result<(), DomainError> {
        if from == to {
            return self.index_cab(to, cab_id);
        }
        if !self.cities.contains_key(&to) {
            return Err(DomainError::CityNotFound(to));
        }
        if let Some(old) = self.cities.get_mut(&from) {
            old.remove_cab(cab_id);
        }
        self.index_cab(to, cab_id)
    }
}
