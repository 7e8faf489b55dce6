// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration for on-demand wall analysis

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, Result};
use crate::rooms::RoomClassifier;

/// Parameters for [`crate::analyze_walls`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyConfig {
    /// Real units per drawing unit (e.g. meters per unit)
    pub unit_scale: f64,
    /// Angle tolerance for merging collinear walls (radians)
    pub angle_tolerance: f64,
    /// Maximum distance between vertices reported as a gap (drawing units)
    pub max_gap_distance: f64,
    /// Area thresholds for room classification
    pub room_classifier: RoomClassifier,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            unit_scale: 0.1,
            angle_tolerance: 0.0175, // ~1 degree
            max_gap_distance: 20.0,
            room_classifier: RoomClassifier::default(),
        }
    }
}

impl TopologyConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("unit scale", self.unit_scale)?;
        require_non_negative("angle tolerance", self.angle_tolerance)?;
        require_non_negative("max gap distance", self.max_gap_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TopologyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = TopologyConfig {
            unit_scale: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TopologyConfig {
            max_gap_distance: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
