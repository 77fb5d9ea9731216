// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced from caller-supplied callbacks.
//!
//! Tap recognition has no failure modes of its own. The only errors are
//! those raised by a guard or an action; they are wrapped in [`TapError`] and
//! returned from the handler that triggered them, without retry or recovery.

use alloc::boxed::Box;

/// Error type returned by fallible guards and actions.
pub type CallbackError = Box<dyn core::error::Error + Send + Sync>;

/// An error raised while handling a tap event.
#[derive(Debug, thiserror::Error)]
pub enum TapError {
    /// The guard predicate failed.
    #[error("tap guard failed")]
    Guard(#[source] CallbackError),
    /// The action failed.
    #[error("tap action failed")]
    Action(#[source] CallbackError),
}

impl TapError {
    /// The underlying callback error.
    pub fn callback_error(&self) -> &(dyn core::error::Error + Send + Sync + 'static) {
        match self {
            Self::Guard(e) | Self::Action(e) => e.as_ref(),
        }
    }
}
