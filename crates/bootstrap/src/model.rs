// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire shapes of the JSON data file.
//!
//! Field names follow the file format, which mixes camelCase ids with
//! snake_case booking times. Timestamps and state tokens stay as strings
//! here and are converted once by the loader.

use cab_dispatch::{CabId, CityId};
use serde::{Deserialize, Serialize};

/// A complete data file. Missing sections are treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataFile {
    #[serde(default)]
    pub cities: Vec<CityRecord>,
    #[serde(default)]
    pub cabs: Vec<CabRecord>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    pub city_id: CityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabRecord {
    pub cab_id: CabId,
    pub city_id: CityId,
    /// State the cab should be left in once its bookings are replayed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cab_state: Option<String>,
    /// When the cab joined the fleet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookingRecord {
    #[serde(rename = "cabId")]
    pub cab_id: CabId,
    #[serde(rename = "cityId")]
    pub city_id: CityId,
    pub start_time: String,
    /// Absent for trips still in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}
