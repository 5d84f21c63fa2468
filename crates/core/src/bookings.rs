// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cab_dispatch_domain::{Booking, BookingId, DomainError};
use std::collections::BTreeMap;

/// Every booking ever created, keyed by id.
///
/// Ids are handed out in strictly increasing order starting at 1, so id
/// order is also creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingStore {
    bookings: BTreeMap<BookingId, Booking>,
    next_id: BookingId,
}

impl BookingStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bookings: BTreeMap::new(),
            next_id: BookingId::new(1),
        }
    }

    /// The id the next stored booking will receive.
    ///
    /// Peeking does not reserve the id; it is only consumed once a booking
    /// with that id is inserted.
    #[must_use]
    pub const fn next_id(&self) -> BookingId {
        self.next_id
    }

    /// Looks up a booking.
    #[must_use]
    pub fn get(&self, booking_id: BookingId) -> Option<&Booking> {
        self.bookings.get(&booking_id)
    }

    /// Looks up a booking that must exist.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BookingNotFound` if the id is unknown.
    pub fn require(&self, booking_id: BookingId) -> Result<&Booking, DomainError> {
        self.bookings
            .get(&booking_id)
            .ok_or(DomainError::BookingNotFound(booking_id))
    }

    /// Iterates over all bookings in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.values()
    }

    /// Number of bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Returns true when no booking has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Stores a booking, new or staged, and advances the id counter past it.
    pub(crate) fn commit(&mut self, booking: Booking) {
        if booking.id() >= self.next_id {
            self.next_id = booking.id().next();
        }
        self.bookings.insert(booking.id(), booking);
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}
