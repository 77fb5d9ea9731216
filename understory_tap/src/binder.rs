// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binder: attach tap behavior to elements and route host events to it.
//!
//! ## Overview
//!
//! [`Binder::bind`] takes a set of elements and one [`TapConfig`], shares the
//! configuration between them, and creates one [`TapStateMachine`] per element.
//! What it subscribes depends on the [`TouchSupport`] given at construction:
//!
//! - Touch available: `touchstart`, `touchend`, `touchmove` (only with
//!   `cancel_on_move`), and `click`. The click handler exists even without an
//!   action; it only suppresses the platform's default so the synthetic click
//!   that follows a touch does nothing.
//! - Touch unavailable, action configured: `click` alone. A click fires the
//!   action if the guard passes. Markers are never touched.
//! - Touch unavailable, no action: nothing.
//!
//! The host then feeds input through [`Binder::dispatch`] and due timers
//! through [`Binder::fire`].
//!
//! ## Multiple bindings
//!
//! Binding the same element twice adds a second binding. Both receive each
//! event, in bind order, but they share the element's markers: whichever
//! binding resolves a cycle first consumes it, and the other sees an idle
//! element. Bind order therefore decides whose action runs. A binding without
//! an action that comes first still consumes the cycle, so a later binding's
//! action never fires.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt::Debug;

use log::{debug, trace};

use crate::config::TapConfig;
use crate::error::TapError;
use crate::host::{EventTarget, MarkerStore, TapHost};
use crate::machine::TapStateMachine;
use crate::timer::DelayTimer;
use crate::types::{BindingId, Disposition, InputKind, Markers, TouchSupport};

const TOUCH_KINDS: [InputKind; 4] = [
    InputKind::TouchStart,
    InputKind::TouchEnd,
    InputKind::TouchMove,
    InputKind::Click,
];
const TOUCH_KINDS_NO_MOVE: [InputKind; 3] =
    [InputKind::TouchStart, InputKind::TouchEnd, InputKind::Click];
const CLICK_KINDS: [InputKind; 1] = [InputKind::Click];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Touch,
    ClickFallback,
}

struct Binding<K, E> {
    machine: TapStateMachine<K, E>,
    mode: Mode,
}

impl<K: Copy + Eq + Debug, E: Clone> Binding<K, E> {
    fn kinds(&self) -> &'static [InputKind] {
        match self.mode {
            Mode::Touch if self.machine.config().cancel_on_move() => &TOUCH_KINDS,
            Mode::Touch => &TOUCH_KINDS_NO_MOVE,
            Mode::ClickFallback => &CLICK_KINDS,
        }
    }

    fn listens_to(&self, kind: InputKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Owns the tap bindings for a set of elements.
///
/// ## Usage
///
/// - Construct with the platform's [`TouchSupport`], computed once by the host.
/// - Call [`Binder::bind`] (or [`Binder::bind_action`]) per group of elements
///   sharing a configuration.
/// - Forward every subscribed input event to [`Binder::dispatch`] and honor
///   the returned [`Disposition`].
/// - Hand every due [`DelayTimer`] to [`Binder::fire`].
/// - Call [`Binder::unbind`] on teardown.
pub struct Binder<K, E> {
    touch: TouchSupport,
    bindings: Vec<Binding<K, E>>,
    next_id: u64,
}

impl<K: Debug, E> Debug for Binder<K, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Binder")
            .field("touch", &self.touch)
            .field("bindings", &self.bindings.len())
            .finish_non_exhaustive()
    }
}

impl<K: Copy + Eq + Debug, E: Clone> Binder<K, E> {
    /// Create an empty binder for a platform with the given touch support.
    pub fn new(touch: TouchSupport) -> Self {
        Self {
            touch,
            bindings: Vec::new(),
            next_id: 0,
        }
    }

    /// Touch support this binder was created with.
    pub fn touch_support(&self) -> TouchSupport {
        self.touch
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns `true` if `element` has at least one binding.
    pub fn is_bound(&self, element: &K) -> bool {
        self.bindings.iter().any(|b| b.machine.element() == element)
    }

    /// State machines bound to `element`, in bind order.
    ///
    /// Only touch-mode bindings have a meaningful phase; click-fallback
    /// bindings use their machine solely for the shared configuration.
    pub fn machines<'a>(
        &'a self,
        element: &'a K,
    ) -> impl Iterator<Item = &'a TapStateMachine<K, E>> + 'a {
        self.bindings
            .iter()
            .filter(move |b| b.machine.element() == element)
            .map(|b| &b.machine)
    }

    /// Bind `config` to every element in `elements`, subscribing through `target`.
    ///
    /// Returns `elements` unchanged.
    pub fn bind<'a>(
        &mut self,
        elements: &'a [K],
        config: TapConfig<K, E>,
        target: &mut impl EventTarget<K>,
    ) -> &'a [K] {
        let mode = match self.touch {
            TouchSupport::Available => Mode::Touch,
            TouchSupport::Unavailable if config.has_action() => Mode::ClickFallback,
            TouchSupport::Unavailable => {
                debug!(
                    "tap: no touch support and no action; {} element(s) left unbound",
                    elements.len()
                );
                return elements;
            }
        };
        debug!(
            "tap: binding {} element(s) in {:?} mode with {:?}",
            elements.len(),
            mode,
            config
        );
        let config = Rc::new(config);
        for &element in elements {
            let binding = BindingId::new(self.next_id);
            self.next_id += 1;
            let binding = Binding {
                machine: TapStateMachine::new(binding, element, config.clone()),
                mode,
            };
            for &kind in binding.kinds() {
                target.subscribe(&element, kind);
            }
            self.bindings.push(binding);
        }
        elements
    }

    /// Bind a bare action with every other setting at its default.
    pub fn bind_action<'a>(
        &mut self,
        elements: &'a [K],
        action: impl Fn(&K, &E) + 'static,
        target: &mut impl EventTarget<K>,
    ) -> &'a [K]
    where
        K: 'static,
        E: 'static,
    {
        self.bind(elements, TapConfig::from_action(action), target)
    }

    /// Deliver one input event for `element` to every binding subscribed to `kind`.
    ///
    /// A callback error stops delivery and is returned; bindings later in bind
    /// order do not see the event.
    pub fn dispatch(
        &self,
        element: &K,
        kind: InputKind,
        event: E,
        host: &mut impl TapHost<K, E>,
    ) -> Result<Disposition, TapError> {
        let mut disposition = Disposition::Continue;
        for b in self
            .bindings
            .iter()
            .filter(|b| b.machine.element() == element && b.listens_to(kind))
        {
            let m = &b.machine;
            match (b.mode, kind) {
                (Mode::Touch, InputKind::TouchStart) => m.touch_start(event.clone(), host)?,
                (Mode::Touch, InputKind::TouchEnd) => {
                    m.touch_end(&event, host)?;
                }
                (Mode::Touch, InputKind::TouchMove) => m.touch_move(host),
                (Mode::Touch, InputKind::Click) => {
                    disposition = disposition.merge(Disposition::PreventDefault);
                }
                (Mode::ClickFallback, InputKind::Click) => {
                    if m.config().fire(element, &event)? {
                        trace!("tap {:?}: clicked", element);
                    }
                }
                (Mode::ClickFallback, _) => {}
            }
        }
        Ok(disposition)
    }

    /// Deliver a due delay timer to the binding that scheduled it.
    ///
    /// Returns whether an action ran. Timers for bindings that have since been
    /// removed are ignored.
    pub fn fire(
        &self,
        timer: DelayTimer<K, E>,
        host: &mut impl MarkerStore<K>,
    ) -> Result<bool, TapError> {
        match self
            .bindings
            .iter()
            .find(|b| b.machine.binding() == timer.binding)
        {
            Some(b) => b.machine.timer_elapsed(&timer.event, host),
            None => {
                trace!(
                    "tap {:?}: delay for unbound binding #{} ignored",
                    timer.element,
                    timer.binding.get()
                );
                Ok(false)
            }
        }
    }

    /// Remove every binding on `element`, undo its subscriptions, and clear
    /// its tap markers.
    ///
    /// Returns the number of bindings removed.
    pub fn unbind<H>(&mut self, element: &K, host: &mut H) -> usize
    where
        H: EventTarget<K> + MarkerStore<K>,
    {
        let mut removed = 0;
        self.bindings.retain(|b| {
            if b.machine.element() != element {
                return true;
            }
            for &kind in b.kinds() {
                host.unsubscribe(element, kind);
            }
            removed += 1;
            false
        });
        if removed > 0 {
            host.remove_markers(element, Markers::all());
            debug!("tap {:?}: removed {} binding(s)", element, removed);
        }
        removed
    }
}
