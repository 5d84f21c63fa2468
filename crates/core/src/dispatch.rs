// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The dispatcher: registration, cab allocation, and trip completion.
//!
//! Every mutating operation is staged on copies of the affected cab and
//! booking. The registries are written only after every step has succeeded,
//! so a failed operation leaves the fleet exactly as it found it.

use crate::bookings::BookingStore;
use crate::error::CoreError;
use crate::registry::{CabRegistry, CityRegistry};
use crate::selection::{IdleCandidate, LongestIdle, SelectionPolicy};
use cab_dispatch_domain::{
    Booking, BookingId, BookingState, Cab, CabId, CabState, City, CityId, DomainError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Owns the fleet and allocates cabs to bookings.
#[derive(Debug)]
pub struct Dispatcher {
    cabs: CabRegistry,
    cities: CityRegistry,
    bookings: BookingStore,
    policy: Box<dyn SelectionPolicy>,
    rng: StdRng,
}

impl Dispatcher {
    /// Creates an empty dispatcher using the longest-idle policy and an
    /// entropy-seeded random source for tie-breaks.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Creates an empty dispatcher whose tie-breaks are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            cabs: CabRegistry::new(),
            cities: CityRegistry::new(),
            bookings: BookingStore::new(),
            policy: Box::new(LongestIdle),
            rng,
        }
    }

    /// Replaces the selection policy.
    #[must_use]
    pub fn with_policy(mut self, policy: impl SelectionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Read access to the cab registry.
    #[must_use]
    pub const fn cabs(&self) -> &CabRegistry {
        &self.cabs
    }

    /// Read access to the city registry.
    #[must_use]
    pub const fn cities(&self) -> &CityRegistry {
        &self.cities
    }

    /// Read access to the booking store.
    #[must_use]
    pub const fn bookings(&self) -> &BookingStore {
        &self.bookings
    }

    // ------------------------------------------------------------------
    // Cities
    // ------------------------------------------------------------------

    /// Adds a city.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DuplicateCity` if the id is taken.
    pub fn add_city(&mut self, city_id: CityId, name: &str) -> Result<(), CoreError> {
        self.cities.add(city_id, name)?;
        info!(city_id = %city_id, name, "City added");
        Ok(())
    }

    /// Removes a city with no cabs located in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the city is unknown or still has cabs.
    pub fn remove_city(&mut self, city_id: CityId) -> Result<City, CoreError> {
        let city: City = self.cities.remove(city_id)?;
        info!(city_id = %city_id, "City removed");
        Ok(city)
    }

    /// Looks up a city.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if the id is unknown.
    pub fn city(&self, city_id: CityId) -> Result<&City, CoreError> {
        Ok(self.cities.require(city_id)?)
    }

    // ------------------------------------------------------------------
    // Cabs
    // ------------------------------------------------------------------

    /// Registers an idle cab in a city.
    ///
    /// The cab's history starts at `registered_at`, or now if omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the cab id is taken or the city is unknown.
    pub fn register_cab(
        &mut self,
        cab_id: CabId,
        city_id: CityId,
        registered_at: Option<OffsetDateTime>,
    ) -> Result<(), CoreError> {
        if self.cabs.contains(cab_id) {
            return Err(DomainError::DuplicateCab(cab_id).into());
        }
        self.cities.require(city_id)?;

        let registered_at: OffsetDateTime = registered_at.unwrap_or_else(OffsetDateTime::now_utc);
        self.cabs.insert(Cab::new(cab_id, city_id, registered_at))?;
        self.cities.index_cab(city_id, cab_id)?;
        info!(cab_id = %cab_id, city_id = %city_id, "Cab registered");
        Ok(())
    }

    /// Changes a cab's state, its location, or both.
    ///
    /// Only `Idle` and `OnTrip` may be assigned directly; `Reserved` is set by
    /// the allocator alone. A cab serving an open booking keeps its state until
    /// the booking is ended. Relocation moves the cab between city indexes in
    /// the same step.
    ///
    /// # Errors
    ///
    /// Returns an error if the cab or target city is unknown, the state
    /// change is not allowed, or `at` predates the cab's latest history entry.
    pub fn update_cab(
        &mut self,
        cab_id: CabId,
        state: Option<CabState>,
        city_id: Option<CityId>,
        at: Option<OffsetDateTime>,
    ) -> Result<(), CoreError> {
        let mut staged: Cab = self.cabs.require(cab_id)?.clone();
        let previous_city: CityId = staged.city_id();

        if let Some(state) = state {
            if state != staged.state() {
                if state == CabState::Reserved {
                    return Err(DomainError::InvalidStateTransition {
                        from: staged.state().as_str().to_string(),
                        to: state.as_str().to_string(),
                        reason: "cabs are only reserved by the allocator".to_string(),
                    }
                    .into());
                }
                if let Some(open) = self.open_booking(&staged) {
                    return Err(DomainError::InvalidStateTransition {
                        from: staged.state().as_str().to_string(),
                        to: state.as_str().to_string(),
                        reason: format!("booking {open} is still open"),
                    }
                    .into());
                }
            }
            let at: OffsetDateTime = at.unwrap_or_else(OffsetDateTime::now_utc);
            staged.set_state(state, at)?;
        }

        if let Some(city_id) = city_id {
            self.cities.require(city_id)?;
            staged.relocate(city_id);
        }

        let new_city: CityId = staged.city_id();
        self.cabs.commit(staged);
        if new_city != previous_city {
            self.cities.move_cab(cab_id, previous_city, new_city)?;
        }
        debug!(cab_id = %cab_id, ?state, city_id = %new_city, "Cab updated");
        Ok(())
    }

    /// Looks up a cab.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CabNotFound` if the id is unknown.
    pub fn cab(&self, cab_id: CabId) -> Result<&Cab, CoreError> {
        Ok(self.cabs.require(cab_id)?)
    }

    /// All cabs located in a city, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if the id is unknown.
    pub fn cabs_in_city(&self, city_id: CityId) -> Result<Vec<&Cab>, CoreError> {
        let city: &City = self.cities.require(city_id)?;
        Ok(city
            .cab_ids()
            .filter_map(|cab_id| self.cabs.get(cab_id))
            .collect())
    }

    /// Cabs located in a city that are currently in `state`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if the id is unknown.
    pub fn cabs_in_city_by_state(
        &self,
        city_id: CityId,
        state: CabState,
    ) -> Result<Vec<&Cab>, CoreError> {
        Ok(self
            .cabs_in_city(city_id)?
            .into_iter()
            .filter(|cab| cab.state() == state)
            .collect())
    }

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    /// Books the best idle cab in a city.
    ///
    /// Only cabs that are idle now and whose history does not extend past
    /// `start_time` are considered. Returns `Ok(None)` when no cab qualifies;
    /// nothing is changed in that case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CityNotFound` if the city is unknown.
    pub fn book_cab(
        &mut self,
        city_id: CityId,
        start_time: Option<OffsetDateTime>,
    ) -> Result<Option<BookingId>, CoreError> {
        let start_time: OffsetDateTime = start_time.unwrap_or_else(OffsetDateTime::now_utc);
        let candidates: Vec<IdleCandidate> = self
            .cabs_in_city_by_state(city_id, CabState::Idle)?
            .into_iter()
            .filter(|cab| {
                cab.last_transition_at()
                    .is_none_or(|last| last <= start_time)
            })
            .map(|cab| IdleCandidate {
                cab_id: cab.id(),
                idle_time: cab.idle_time(start_time),
            })
            .collect();

        debug!(
            city_id = %city_id,
            candidates = candidates.len(),
            "Selecting cab"
        );

        let Some(cab_id) = self.policy.select(&candidates, &mut self.rng) else {
            info!(city_id = %city_id, "No idle cab available");
            return Ok(None);
        };

        self.assign(cab_id, city_id, start_time).map(Some)
    }

    /// Books a specific cab, bypassing selection.
    ///
    /// Used to replay historical assignments. The booking's city may differ
    /// from the cab's current location.
    ///
    /// # Errors
    ///
    /// Returns an error if the cab or city is unknown, the cab is not idle,
    /// or `start_time` predates the cab's latest history entry.
    pub fn book_existing_cab(
        &mut self,
        cab_id: CabId,
        city_id: CityId,
        start_time: Option<OffsetDateTime>,
    ) -> Result<BookingId, CoreError> {
        let start_time: OffsetDateTime = start_time.unwrap_or_else(OffsetDateTime::now_utc);
        self.assign(cab_id, city_id, start_time)
    }

    /// Ends a trip: the booking is completed and its cab becomes idle.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is unknown, is not on a trip,
    /// or `end_time` precedes its start.
    pub fn end_booking(
        &mut self,
        booking_id: BookingId,
        end_time: Option<OffsetDateTime>,
    ) -> Result<(), CoreError> {
        let end_time: OffsetDateTime = end_time.unwrap_or_else(OffsetDateTime::now_utc);

        let mut booking: Booking = self.bookings.require(booking_id)?.clone();
        let mut cab: Cab = self.cabs.require(booking.cab_id())?.clone();

        booking.complete(end_time)?;
        cab.set_state(CabState::Idle, end_time)?;

        let cab_id: CabId = cab.id();
        self.cabs.commit(cab);
        self.bookings.commit(booking);
        info!(booking_id = %booking_id, cab_id = %cab_id, "Booking completed");
        Ok(())
    }

    /// Looks up a booking.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BookingNotFound` if the id is unknown.
    pub fn booking(&self, booking_id: BookingId) -> Result<&Booking, CoreError> {
        Ok(self.bookings.require(booking_id)?)
    }

    /// Every booking ever created, oldest first.
    #[must_use]
    pub fn all_bookings(&self) -> Vec<&Booking> {
        self.bookings.iter().collect()
    }

    /// The booking ids recorded on a cab, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CabNotFound` if the id is unknown.
    pub fn bookings_for_cab(&self, cab_id: CabId) -> Result<&[BookingId], CoreError> {
        Ok(self.cabs.require(cab_id)?.booking_ids())
    }

    /// Reserves `cab_id`, opens a booking, and starts the trip at
    /// `start_time`.
    fn assign(
        &mut self,
        cab_id: CabId,
        city_id: CityId,
        start_time: OffsetDateTime,
    ) -> Result<BookingId, CoreError> {
        self.cities.require(city_id)?;
        let mut cab: Cab = self.cabs.require(cab_id)?.clone();
        if cab.state() != CabState::Idle {
            return Err(DomainError::CabUnavailable {
                cab_id,
                state: cab.state().as_str().to_string(),
            }
            .into());
        }

        let booking_id: BookingId = self.bookings.next_id();
        cab.set_state(CabState::Reserved, start_time)?;

        let mut booking: Booking = Booking::new(booking_id, cab_id, city_id, start_time);
        cab.record_booking(booking_id);
        booking.advance(BookingState::WaitingForCustomer)?;
        booking.advance(BookingState::TripStarted)?;
        cab.set_state(CabState::OnTrip, start_time)?;

        self.cabs.commit(cab);
        self.bookings.commit(booking);
        info!(
            booking_id = %booking_id,
            cab_id = %cab_id,
            city_id = %city_id,
            "Cab booked"
        );
        Ok(booking_id)
    }

    /// The first of the cab's bookings that has not reached a terminal state.
    fn open_booking(&self, cab: &Cab) -> Option<BookingId> {
        cab.booking_ids().iter().copied().find(|booking_id| {
            self.bookings
                .get(*booking_id)
                .is_some_and(|booking| !booking.state().is_terminal())
        })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
