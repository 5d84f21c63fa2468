// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cab_dispatch::Dispatcher;
use time::OffsetDateTime;
use time::macros::datetime;

/// Load time used by replay tests; later than every timestamp in `SAMPLE`.
pub const LOADED_AT: OffsetDateTime = datetime!(2024-07-26 00:00 UTC);

/// Two cities, three cabs, one finished trip and one still under way.
pub const SAMPLE: &str = r#"{
    "cities": [
        {"cityId": 1, "name": "New York"},
        {"cityId": 2, "name": "Boston"}
    ],
    "cabs": [
        {"cabId": 101, "cityId": 1, "cabState": "IDLE", "registeredAt": "2024-07-25T08:00:00Z"},
        {"cabId": 102, "cityId": 1, "cabState": "on_trip"},
        {"cabId": 201, "cityId": 2, "cabState": "ON_TRIP"}
    ],
    "bookings": [
        {"cabId": 102, "cityId": 1, "start_time": "2024-07-25 12:00:00"},
        {"cabId": 101, "cityId": 1, "start_time": "2024-07-25T09:00:00", "end_time": "2024-07-25T10:00:00"}
    ]
}"#;

pub fn empty_dispatcher() -> Dispatcher {
    Dispatcher::with_seed(11)
}
