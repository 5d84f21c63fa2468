// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CabId, CityId, Dispatcher};
use time::OffsetDateTime;
use time::macros::datetime;

pub const T0: OffsetDateTime = datetime!(2024-07-25 08:00 UTC);

pub const NEW_YORK: CityId = CityId::new(1);
pub const BOSTON: CityId = CityId::new(2);

/// Two cities, no cabs.
pub fn create_test_dispatcher() -> Dispatcher {
    let mut dispatcher: Dispatcher = Dispatcher::with_seed(7);
    dispatcher.add_city(NEW_YORK, "New York").unwrap();
    dispatcher.add_city(BOSTON, "Boston").unwrap();
    dispatcher
}

/// Two cities with `cab_ids` registered in New York at `T0`.
pub fn create_dispatcher_with_cabs(cab_ids: &[u64]) -> Dispatcher {
    let mut dispatcher: Dispatcher = create_test_dispatcher();
    for &id in cab_ids {
        dispatcher
            .register_cab(CabId::new(id), NEW_YORK, Some(T0))
            .unwrap();
    }
    dispatcher
}
