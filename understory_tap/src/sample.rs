// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made touch event payload.
//!
//! The binder and state machine are generic over the event type `E`. Hosts
//! that have no event type of their own can use [`TouchSample`], which
//! carries what an action usually wants to know: where and when.

use kurbo::{Point, Vec2};

/// Position and timestamp of one touch or click.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Position in the host's coordinate space.
    pub position: Point,
    /// Host timestamp in milliseconds.
    pub timestamp_ms: u64,
}

impl TouchSample {
    /// Create a sample at `position`.
    pub fn new(position: impl Into<Point>, timestamp_ms: u64) -> Self {
        Self {
            position: position.into(),
            timestamp_ms,
        }
    }

    /// Offset from `earlier` to this sample.
    pub fn offset_from(&self, earlier: &Self) -> Vec2 {
        self.position - earlier.position
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    pub fn elapsed_since(&self, earlier: &Self) -> u64 {
        self.timestamp_ms.saturating_sub(earlier.timestamp_ms)
    }
}
