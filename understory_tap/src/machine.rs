// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element tap state machine.
//!
//! ## Transitions
//!
//! | Event         | Phase before          | Effect                                        | Phase after  |
//! |---------------|-----------------------|-----------------------------------------------|--------------|
//! | touch start   | any, guard passes     | clear `ACTIVE`/`ENDED_EARLY`, set `PENDING`, schedule delay | `Pending` |
//! | touch start   | any, guard rejects    | none                                          | unchanged    |
//! | timer         | `EndedEarly`          | clear `ENDED_EARLY`, fire action              | `Idle`       |
//! | timer         | `Pending`             | clear `PENDING`, set `ACTIVE` (highlight)     | `Active`     |
//! | timer         | `Idle` / `Active`     | none                                          | unchanged    |
//! | touch end     | `Active`              | clear `ACTIVE`, fire action                   | `Idle`       |
//! | touch end     | `Pending`             | clear `PENDING`, set `ENDED_EARLY`            | `EndedEarly` |
//! | touch end     | `Idle` / `EndedEarly` | none                                          | unchanged    |
//! | touch move    | any, cancel on move   | clear every marker                            | `Idle`       |
//!
//! "Fire action" re-evaluates the guard first; a rejecting guard skips the
//! action but the marker changes above still apply.
//!
//! ## Stale timers
//!
//! The machine keeps no state of its own. Every handler reads the element's
//! markers from the host, so a timer left over from a cancelled cycle finds
//! the element idle and does nothing. Timers are therefore never cancelled.

use alloc::rc::Rc;
use core::fmt::Debug;

use log::trace;

use crate::config::TapConfig;
use crate::error::TapError;
use crate::host::{MarkerStore, TapHost};
use crate::timer::DelayTimer;
use crate::types::{BindingId, Markers, TapPhase};

/// Tap state machine for one bound element.
///
/// Cheap to construct; all mutable state lives in the host's
/// [`MarkerStore`]. Handlers return whether the action ran.
pub struct TapStateMachine<K, E> {
    binding: BindingId,
    element: K,
    config: Rc<TapConfig<K, E>>,
}

impl<K: Debug, E> Debug for TapStateMachine<K, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TapStateMachine")
            .field("binding", &self.binding)
            .field("element", &self.element)
            .field("config", &self.config)
            .finish()
    }
}

impl<K: Copy + Eq + Debug, E: Clone> TapStateMachine<K, E> {
    /// Create a state machine for `element` under `binding`.
    pub fn new(binding: BindingId, element: K, config: Rc<TapConfig<K, E>>) -> Self {
        Self {
            binding,
            element,
            config,
        }
    }

    /// Binding this machine belongs to.
    pub fn binding(&self) -> BindingId {
        self.binding
    }

    /// Element this machine drives.
    pub fn element(&self) -> &K {
        &self.element
    }

    /// Shared configuration.
    pub fn config(&self) -> &TapConfig<K, E> {
        &self.config
    }

    /// Current phase, read from the host's markers.
    pub fn phase(&self, host: &impl MarkerStore<K>) -> TapPhase {
        host.phase(&self.element)
    }

    /// Handle a touch start.
    ///
    /// Always schedules a fresh delay timer when the guard passes, even if an
    /// earlier one is still outstanding.
    pub fn touch_start(&self, event: E, host: &mut impl TapHost<K, E>) -> Result<(), TapError> {
        if !self.config.allows(&self.element)? {
            trace!("tap {:?}: touch start rejected by guard", self.element);
            return Ok(());
        }
        host.remove_markers(&self.element, Markers::ACTIVE | Markers::ENDED_EARLY);
        host.insert_markers(&self.element, Markers::PENDING);
        trace!(
            "tap {:?}: pending, delay {}ms",
            self.element,
            self.config.delay_ms()
        );
        host.schedule(
            self.config.delay_ms(),
            DelayTimer {
                binding: self.binding,
                element: self.element,
                event,
            },
        );
        Ok(())
    }

    /// Handle a touch move. Cancels the tap when `cancel_on_move` is set.
    pub fn touch_move(&self, host: &mut impl MarkerStore<K>) {
        if !self.config.cancel_on_move() {
            return;
        }
        if host.phase(&self.element) != TapPhase::Idle {
            trace!("tap {:?}: cancelled by move", self.element);
        }
        host.remove_markers(&self.element, Markers::all());
    }

    /// Handle a touch end carrying `event`.
    pub fn touch_end(&self, event: &E, host: &mut impl MarkerStore<K>) -> Result<bool, TapError> {
        match host.phase(&self.element) {
            TapPhase::Active => {
                host.remove_markers(&self.element, Markers::ACTIVE);
                trace!("tap {:?}: released after highlight", self.element);
                self.config.fire(&self.element, event)
            }
            TapPhase::Pending => {
                host.remove_markers(&self.element, Markers::PENDING);
                host.insert_markers(&self.element, Markers::ENDED_EARLY);
                trace!("tap {:?}: released before delay", self.element);
                Ok(false)
            }
            TapPhase::Idle | TapPhase::EndedEarly => Ok(false),
        }
    }

    /// Handle the delay timer firing with the touch-start `event` it captured.
    ///
    /// Safe to call any number of times; only the first call after a touch
    /// start (or touch end) can change anything.
    pub fn timer_elapsed(
        &self,
        event: &E,
        host: &mut impl MarkerStore<K>,
    ) -> Result<bool, TapError> {
        match host.phase(&self.element) {
            TapPhase::EndedEarly => {
                host.remove_markers(&self.element, Markers::ENDED_EARLY);
                trace!("tap {:?}: delay elapsed after release", self.element);
                self.config.fire(&self.element, event)
            }
            TapPhase::Pending => {
                host.remove_markers(&self.element, Markers::PENDING);
                host.insert_markers(&self.element, Markers::ACTIVE);
                trace!("tap {:?}: highlighted", self.element);
                Ok(false)
            }
            TapPhase::Idle | TapPhase::Active => {
                trace!("tap {:?}: stale delay ignored", self.element);
                Ok(false)
            }
        }
    }
}
