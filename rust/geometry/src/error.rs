// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry and snap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-contract violations rejected by the geometry kernel.
///
/// Empty outcomes (nothing to snap to) are `None`, never an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Snap radius must be a non-negative number, got {0}")]
    InvalidSnapRadius(f64),

    #[error("Grid size must be positive while grid snapping is enabled, got {0}")]
    InvalidGridSize(f64),

    #[error("Unknown snap type: {0}")]
    UnknownSnapType(String),
}
