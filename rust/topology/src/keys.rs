// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena keys for the wall graph.
//!
//! Host ids ([`plan_lite_geometry::VertexId`], [`plan_lite_geometry::SegmentId`])
//! are mapped to generational slot map keys once, when the graph is built.
//! Keys stay valid while merges remove other entries.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a wall vertex in a [`crate::WallGraph`].
    pub struct VertexKey;

    /// Key for a wall segment in a [`crate::WallGraph`].
    pub struct SegmentKey;
}
