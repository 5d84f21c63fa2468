// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking allocation and trip completion.

use crate::analytics::calculate_idle_time;
use crate::{
    BookingId, BookingState, CabId, CabState, CityId, CoreError, Dispatcher, DomainError,
    HistoryEntry,
};
use time::Duration;

use super::helpers::{BOSTON, NEW_YORK, T0, create_dispatcher_with_cabs, create_test_dispatcher};

#[test]
fn test_book_and_end_single_cab_scenario() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let start = T0 + Duration::hours(1);
    let end = T0 + Duration::hours(2);

    let booking_id: BookingId = dispatcher.book_cab(NEW_YORK, Some(start)).unwrap().unwrap();

    let booking = dispatcher.booking(booking_id).unwrap();
    assert_eq!(booking.start_time(), start);
    assert_eq!(booking.cab_id(), CabId::new(101));
    assert_eq!(booking.city_id(), NEW_YORK);
    assert_eq!(booking.state(), BookingState::TripStarted);

    let cab = dispatcher.cab(CabId::new(101)).unwrap();
    assert_eq!(cab.state(), CabState::OnTrip);
    assert_eq!(
        cab.history(),
        &[
            HistoryEntry {
                at: T0,
                state: CabState::Idle
            },
            HistoryEntry {
                at: start,
                state: CabState::Reserved
            },
            HistoryEntry {
                at: start,
                state: CabState::OnTrip
            },
        ]
    );

    dispatcher.end_booking(booking_id, Some(end)).unwrap();

    let booking = dispatcher.booking(booking_id).unwrap();
    assert_eq!(booking.state(), BookingState::Completed);
    assert_eq!(booking.end_time(), Some(end));

    let cab = dispatcher.cab(CabId::new(101)).unwrap();
    assert_eq!(cab.state(), CabState::Idle);
    assert_eq!(
        cab.history().last(),
        Some(&HistoryEntry {
            at: end,
            state: CabState::Idle
        })
    );
    assert_eq!(calculate_idle_time(cab, Some(T0), Some(end)), 3600);
}

#[test]
fn test_book_cab_without_idle_cab_changes_nothing() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    dispatcher
        .book_cab(NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap()
        .unwrap();
    let before = dispatcher.cab(CabId::new(101)).unwrap().clone();

    let result = dispatcher.book_cab(NEW_YORK, Some(T0 + Duration::hours(2)));

    assert_eq!(result, Ok(None));
    assert_eq!(dispatcher.cab(CabId::new(101)).unwrap(), &before);
    assert_eq!(dispatcher.bookings().len(), 1);
}

#[test]
fn test_book_cab_in_empty_city_returns_none() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);

    assert_eq!(dispatcher.book_cab(BOSTON, Some(T0)), Ok(None));
    assert!(dispatcher.bookings().is_empty());
}

#[test]
fn test_book_cab_in_unknown_city_is_an_error() {
    let mut dispatcher: Dispatcher = create_test_dispatcher();

    let result = dispatcher.book_cab(CityId::new(99), None);

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::CityNotFound(CityId::new(99)))
    );
}

#[test]
fn test_book_cab_prefers_longest_idle_cab() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101, 102]);
    // Cab 101 works for an hour, so 102 has waited longer.
    let trip = dispatcher
        .book_existing_cab(CabId::new(101), NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap();
    dispatcher
        .end_booking(trip, Some(T0 + Duration::hours(2)))
        .unwrap();

    let booking_id = dispatcher
        .book_cab(NEW_YORK, Some(T0 + Duration::hours(3)))
        .unwrap()
        .unwrap();

    assert_eq!(
        dispatcher.booking(booking_id).unwrap().cab_id(),
        CabId::new(102)
    );
}

#[test]
fn test_book_cab_only_considers_cabs_in_requested_city() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    dispatcher
        .register_cab(CabId::new(201), BOSTON, Some(T0 - Duration::days(1)))
        .unwrap();

    let booking_id = dispatcher.book_cab(NEW_YORK, Some(T0)).unwrap().unwrap();

    assert_eq!(
        dispatcher.booking(booking_id).unwrap().cab_id(),
        CabId::new(101)
    );
    assert_eq!(
        dispatcher.cab(CabId::new(201)).unwrap().state(),
        CabState::Idle
    );
}

#[test]
fn test_backdated_book_cab_skips_cabs_busy_at_start() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let trip = dispatcher
        .book_existing_cab(CabId::new(101), NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap();
    dispatcher
        .end_booking(trip, Some(T0 + Duration::hours(2)))
        .unwrap();
    dispatcher
        .register_cab(CabId::new(102), NEW_YORK, Some(T0 + Duration::minutes(45)))
        .unwrap();

    // Cab 101 has more idle time but its history runs past the start.
    let booking_id = dispatcher
        .book_cab(NEW_YORK, Some(T0 + Duration::minutes(90)))
        .unwrap()
        .unwrap();

    assert_eq!(
        dispatcher.booking(booking_id).unwrap().cab_id(),
        CabId::new(102)
    );
    assert_eq!(
        dispatcher.cab(CabId::new(101)).unwrap().history().len(),
        4
    );
}

#[test]
fn test_backdated_book_cab_without_eligible_cab_returns_none() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let trip = dispatcher
        .book_existing_cab(CabId::new(101), NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap();
    dispatcher
        .end_booking(trip, Some(T0 + Duration::hours(2)))
        .unwrap();

    let result = dispatcher.book_cab(NEW_YORK, Some(T0 + Duration::minutes(90)));

    assert_eq!(result, Ok(None));
    assert_eq!(dispatcher.bookings().len(), 1);
    assert_eq!(dispatcher.bookings().next_id(), BookingId::new(2));
}

#[test]
fn test_booking_ids_are_sequential() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101, 102, 103]);

    let ids: Vec<BookingId> = (0..3)
        .map(|_| dispatcher.book_cab(NEW_YORK, Some(T0)).unwrap().unwrap())
        .collect();

    assert_eq!(
        ids,
        vec![BookingId::new(1), BookingId::new(2), BookingId::new(3)]
    );
    let listed: Vec<BookingId> = dispatcher.all_bookings().iter().map(|b| b.id()).collect();
    assert_eq!(listed, ids);
}

#[test]
fn test_bookings_for_cab_are_recorded_in_order() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let cab_id: CabId = CabId::new(101);

    let first = dispatcher
        .book_existing_cab(cab_id, NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap();
    dispatcher
        .end_booking(first, Some(T0 + Duration::hours(2)))
        .unwrap();
    let second = dispatcher
        .book_existing_cab(cab_id, BOSTON, Some(T0 + Duration::hours(3)))
        .unwrap();

    assert_eq!(dispatcher.bookings_for_cab(cab_id).unwrap(), &[first, second]);
    assert_eq!(dispatcher.booking(second).unwrap().city_id(), BOSTON);
    assert!(dispatcher.bookings_for_cab(CabId::new(999)).is_err());
}

#[test]
fn test_book_existing_cab_requires_idle_cab() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    dispatcher
        .book_existing_cab(CabId::new(101), NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap();

    let result =
        dispatcher.book_existing_cab(CabId::new(101), NEW_YORK, Some(T0 + Duration::hours(2)));

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::CabUnavailable {
            cab_id: CabId::new(101),
            state: String::from("ON_TRIP"),
        })
    );
    assert_eq!(dispatcher.bookings().len(), 1);
}

#[test]
fn test_failed_booking_rolls_back_everything() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let before = dispatcher.cab(CabId::new(101)).unwrap().clone();

    // Starting before registration fails at the reservation step.
    let result =
        dispatcher.book_existing_cab(CabId::new(101), NEW_YORK, Some(T0 - Duration::hours(1)));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::OutOfOrderTimestamp { .. }
        ))
    ));
    assert_eq!(dispatcher.cab(CabId::new(101)).unwrap(), &before);
    assert!(dispatcher.bookings().is_empty());
    assert_eq!(dispatcher.bookings().next_id(), BookingId::new(1));
}

#[test]
fn test_end_unknown_booking() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);

    let result = dispatcher.end_booking(BookingId::new(42), Some(T0));

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::BookingNotFound(BookingId::new(42)))
    );
}

#[test]
fn test_end_booking_before_start_changes_nothing() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let booking_id = dispatcher
        .book_cab(NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap()
        .unwrap();

    let result = dispatcher.end_booking(booking_id, Some(T0));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EndBeforeStart { .. }))
    ));
    assert_eq!(
        dispatcher.booking(booking_id).unwrap().state(),
        BookingState::TripStarted
    );
    assert_eq!(
        dispatcher.cab(CabId::new(101)).unwrap().state(),
        CabState::OnTrip
    );
}

#[test]
fn test_end_booking_twice_is_rejected() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101]);
    let booking_id = dispatcher
        .book_cab(NEW_YORK, Some(T0 + Duration::hours(1)))
        .unwrap()
        .unwrap();
    dispatcher
        .end_booking(booking_id, Some(T0 + Duration::hours(2)))
        .unwrap();

    let result = dispatcher.end_booking(booking_id, Some(T0 + Duration::hours(3)));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStateTransition { .. }
        ))
    ));
    assert_eq!(
        dispatcher.booking(booking_id).unwrap().end_time(),
        Some(T0 + Duration::hours(2))
    );
    assert_eq!(dispatcher.cab(CabId::new(101)).unwrap().history().len(), 4);
}

#[test]
fn test_cab_history_stays_monotonic_across_trips() {
    let mut dispatcher: Dispatcher = create_dispatcher_with_cabs(&[101, 102]);
    for hour in 1..6 {
        let start = T0 + Duration::hours(hour);
        if let Some(id) = dispatcher.book_cab(NEW_YORK, Some(start)).unwrap() {
            dispatcher
                .end_booking(id, Some(start + Duration::minutes(30)))
                .unwrap();
        }
    }

    for cab in dispatcher.cabs().iter() {
        for pair in cab.history().windows(2) {
            assert!(pair[0].at <= pair[1].at);
            assert_ne!(pair[0].state, pair[1].state);
        }
    }
    assert_eq!(dispatcher.bookings().len(), 5);
}
