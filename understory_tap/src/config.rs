// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap configuration shared by every element bound in one call.
//!
//! ## Defaults
//!
//! | Field            | Default              |
//! |------------------|----------------------|
//! | action           | none (never invoked) |
//! | guard            | always `true`        |
//! | `cancel_on_move` | `true`               |
//! | `delay_ms`       | `0`                  |
//!
//! ## Example
//!
//! ```
//! use understory_tap::config::TapConfig;
//!
//! let config: TapConfig<u32, ()> = TapConfig::new()
//!     .with_delay_ms(150)
//!     .with_cancel_on_move(false)
//!     .with_guard(|el: &u32| *el != 0)
//!     .with_action(|el: &u32, _ev: &()| {
//!         let _ = el;
//!     });
//! assert!(config.has_action());
//! assert_eq!(config.delay_ms(), 150);
//! assert!(!config.cancel_on_move());
//! ```

use alloc::boxed::Box;

use crate::error::{CallbackError, TapError};

type ActionFn<K, E> = dyn Fn(&K, &E) -> Result<(), CallbackError>;
type GuardFn<K> = dyn Fn(&K) -> Result<bool, CallbackError>;

/// Immutable tap configuration.
///
/// The [`Binder`](crate::binder::Binder) moves this behind an `Rc` and shares
/// it, read-only, with every state machine it creates in one bind call.
/// The guard is evaluated on every touch start and again whenever an action
/// is about to fire; its result is never cached.
pub struct TapConfig<K, E> {
    action: Option<Box<ActionFn<K, E>>>,
    guard: Option<Box<GuardFn<K>>>,
    cancel_on_move: bool,
    delay_ms: u32,
}

impl<K, E> core::fmt::Debug for TapConfig<K, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TapConfig")
            .field("has_action", &self.action.is_some())
            .field("has_guard", &self.guard.is_some())
            .field("cancel_on_move", &self.cancel_on_move)
            .field("delay_ms", &self.delay_ms)
            .finish_non_exhaustive()
    }
}

impl<K, E> Default for TapConfig<K, E> {
    fn default() -> Self {
        Self {
            action: None,
            guard: None,
            cancel_on_move: true,
            delay_ms: 0,
        }
    }
}

impl<K: 'static, E: 'static> TapConfig<K, E> {
    /// Create a configuration with default settings and no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a default configuration with only an action set.
    pub fn from_action(action: impl Fn(&K, &E) + 'static) -> Self {
        Self::new().with_action(action)
    }

    /// Set the action invoked when a tap resolves.
    pub fn with_action(self, action: impl Fn(&K, &E) + 'static) -> Self {
        self.with_try_action(move |el: &K, ev: &E| {
            action(el, ev);
            Ok(())
        })
    }

    /// Set a fallible action. Its error is returned from the triggering handler
    /// as [`TapError::Action`].
    pub fn with_try_action(
        mut self,
        action: impl Fn(&K, &E) -> Result<(), CallbackError> + 'static,
    ) -> Self {
        let action: Box<ActionFn<K, E>> = Box::new(action);
        self.action = Some(action);
        self
    }

    /// Set the guard predicate deciding whether an element is eligible.
    pub fn with_guard(self, guard: impl Fn(&K) -> bool + 'static) -> Self {
        self.with_try_guard(move |el: &K| Ok(guard(el)))
    }

    /// Set a fallible guard. Its error is returned from the triggering handler
    /// as [`TapError::Guard`].
    pub fn with_try_guard(
        mut self,
        guard: impl Fn(&K) -> Result<bool, CallbackError> + 'static,
    ) -> Self {
        let guard: Box<GuardFn<K>> = Box::new(guard);
        self.guard = Some(guard);
        self
    }

    /// Whether a touch move cancels the tap in progress.
    pub fn with_cancel_on_move(mut self, cancel: bool) -> Self {
        self.cancel_on_move = cancel;
        self
    }

    /// Delay between touch start and highlight, in milliseconds.
    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl<K, E> TapConfig<K, E> {
    /// Returns `true` if an action is configured.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Returns `true` if a custom guard is configured.
    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Returns `true` if touch moves cancel the tap.
    pub fn cancel_on_move(&self) -> bool {
        self.cancel_on_move
    }

    /// Highlight delay in milliseconds.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Evaluate the guard for `element`.
    pub fn allows(&self, element: &K) -> Result<bool, TapError> {
        match &self.guard {
            Some(guard) => guard(element).map_err(TapError::Guard),
            None => Ok(true),
        }
    }

    /// Invoke the action if one is configured and the guard allows it.
    ///
    /// Returns whether the action ran.
    pub(crate) fn fire(&self, element: &K, event: &E) -> Result<bool, TapError> {
        let Some(action) = &self.action else {
            return Ok(false);
        };
        if !self.allows(element)? {
            return Ok(false);
        }
        action(element, event).map_err(TapError::Action)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn defaults() {
        let config: TapConfig<u32, ()> = TapConfig::new();
        assert!(!config.has_action());
        assert!(!config.has_guard());
        assert!(config.cancel_on_move());
        assert_eq!(config.delay_ms(), 0);
        assert!(config.allows(&1).unwrap());
    }

    #[test]
    fn fire_without_action_is_a_quiet_no_op() {
        let config =
            TapConfig::<u32, ()>::new().with_guard(|_| panic!("guard consulted without action"));
        assert!(!config.fire(&1, &()).unwrap());
    }

    #[test]
    fn fire_respects_guard() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let config = TapConfig::<u32, ()>::from_action(move |_, _| seen.set(seen.get() + 1))
            .with_guard(|el| *el % 2 == 0);
        assert!(config.fire(&2, &()).unwrap());
        assert!(!config.fire(&3, &()).unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn action_receives_element_and_event() {
        let seen = Rc::new(Cell::new((0_u32, 0_u8)));
        let sink = seen.clone();
        let config = TapConfig::<u32, u8>::from_action(move |el, ev| sink.set((*el, *ev)));
        config.fire(&7, &9).unwrap();
        assert_eq!(seen.get(), (7, 9));
    }

    #[test]
    fn guard_error_is_wrapped() {
        let config = TapConfig::<u32, ()>::new()
            .with_action(|_, _| {})
            .with_try_guard(|_| Err(Boom.into()));
        let err = config.fire(&1, &()).unwrap_err();
        assert!(matches!(err, TapError::Guard(_)));
        assert_eq!(alloc::format!("{}", err.callback_error()), "boom");
    }

    #[test]
    fn action_error_is_wrapped() {
        let config = TapConfig::<u32, ()>::new().with_try_action(|_, _| Err(Boom.into()));
        assert!(matches!(config.fire(&1, &()), Err(TapError::Action(_))));
    }

    #[test]
    fn debug_does_not_require_debug_callbacks() {
        let config = TapConfig::<u32, ()>::new().with_delay_ms(150);
        let text = alloc::format!("{config:?}");
        assert!(text.contains("delay_ms: 150"), "unexpected debug output: {text}");
    }
}
