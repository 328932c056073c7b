// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for everything that talks to the backend or checks
/// user input. Callers retry by re-invoking; nothing here retries on its
/// own.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl Error {
    /// Map an HTTP status plus the backend's `detail` message (when the
    /// body carried one) onto the taxonomy.
    pub fn from_status(status: reqwest::StatusCode, detail: String) -> Self {
        match status.as_u16() {
            404 => Error::NotFound(detail),
            400 | 422 => Error::Validation(detail),
            _ => Error::Transport(format!("{} {}", status.as_u16(), detail)),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Validation(format!("unreadable CSV: {}", e))
    }
}
