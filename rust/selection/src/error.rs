// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::types::SelectionMode;

/// Result type for selection operations
pub type Result<T> = std::result::Result<T, Error>;

/// Caller-contract violations rejected by the selection engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown selection mode: {0}")]
    UnknownMode(String),

    #[error("Unknown align edge: {0}")]
    UnknownAlignEdge(String),

    #[error("Brush size must be a non-negative number, got {0}")]
    InvalidBrushSize(f64),

    #[error("Gesture for {requested} mode while {active} mode is active")]
    ModeMismatch {
        active: SelectionMode,
        requested: SelectionMode,
    },
}
