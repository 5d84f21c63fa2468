// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const NAIVE_T: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const NAIVE_SPACE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parses a data-file timestamp.
///
/// Accepts RFC 3339 (`2024-07-25T10:00:00Z`, `2024-07-25T10:00:00+02:00`) and
/// naive ISO-8601 date-times (`2024-07-25T10:00:00`, `2024-07-25 10:00:00`).
/// Naive values are taken to be UTC.
///
/// Returns `None` if the value matches none of these forms.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    let value: &str = value.trim();
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }
    [NAIVE_T, NAIVE_SPACE]
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(value, *format).ok())
        .map(PrimitiveDateTime::assume_utc)
}
