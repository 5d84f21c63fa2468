// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cab_dispatch::{CabId, CoreError, DomainError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or replaying a data file.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The data file could not be read.
    #[error("Failed to read data file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The data file is not valid JSON or does not match the expected shape.
    #[error("Malformed data file: {0}")]
    Json(#[from] serde_json::Error),

    /// A timestamp field could not be parsed.
    #[error("Invalid timestamp '{value}' in {field}")]
    Timestamp { field: &'static str, value: String },

    /// A cab record declared an unknown state token.
    #[error("Cab {cab_id} has an invalid state: {source}")]
    CabState {
        cab_id: CabId,
        source: DomainError,
    },

    /// The dispatcher rejected a replayed operation.
    #[error("Replay rejected: {0}")]
    Core(#[from] CoreError),
}
