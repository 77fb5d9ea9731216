// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capabilities consumed by the tap machinery.
//!
//! ## Overview
//!
//! This crate does not talk to a platform directly. Everything it needs from
//! the outside world is expressed as one of three small traits:
//!
//! - [`MarkerStore`]: set, clear, and query per-element [`Markers`]. The
//!   [`ACTIVE`](Markers::ACTIVE) marker is the highlight your renderer styles.
//! - [`TimerScheduler`]: hold a [`DelayTimer`] for N milliseconds, then hand
//!   it back to [`Binder::fire`](crate::binder::Binder::fire). There is no
//!   cancellation.
//! - [`EventTarget`]: start or stop delivering an [`InputKind`] for an element.
//!
//! [`MarkerTable`], [`Subscriptions`], and [`TimerQueue`] are ready-made
//! implementations; [`SimulatedHost`] bundles all three behind a virtual
//! clock for tests, demos, and benchmarks.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::timer::{DelayTimer, TimerQueue};
use crate::types::{InputKind, Markers, TapPhase};

/// Per-element marker storage.
pub trait MarkerStore<K> {
    /// Markers currently set on `element`.
    fn markers(&self, element: &K) -> Markers;

    /// Set `markers` on `element`, leaving others untouched.
    fn insert_markers(&mut self, element: &K, markers: Markers);

    /// Clear `markers` on `element`, leaving others untouched.
    fn remove_markers(&mut self, element: &K, markers: Markers);

    /// Tap phase derived from the current markers.
    fn phase(&self, element: &K) -> TapPhase {
        TapPhase::from_markers(self.markers(element))
    }

    /// Returns `true` if the highlight marker is set.
    fn is_highlighted(&self, element: &K) -> bool {
        self.markers(element).contains(Markers::ACTIVE)
    }
}

/// Deferred delivery of delay timers.
///
/// Implementations must not fire synchronously from inside `schedule`, even
/// when `delay_ms` is zero.
pub trait TimerScheduler<K, E> {
    /// Hold `timer` for `delay_ms` and then deliver it back.
    fn schedule(&mut self, delay_ms: u32, timer: DelayTimer<K, E>);
}

/// Subscription to platform input events.
pub trait EventTarget<K> {
    /// Begin delivering `kind` events for `element`.
    fn subscribe(&mut self, element: &K, kind: InputKind);

    /// Stop delivering one previous subscription of `kind` for `element`.
    fn unsubscribe(&mut self, element: &K, kind: InputKind);
}

/// Everything a state machine needs while handling an event.
pub trait TapHost<K, E>: MarkerStore<K> + TimerScheduler<K, E> {}

impl<K, E, H: MarkerStore<K> + TimerScheduler<K, E> + ?Sized> TapHost<K, E> for H {}

/// A [`MarkerStore`] backed by an ordered map.
///
/// Elements with no markers are not stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerTable<K: Ord> {
    markers: BTreeMap<K, Markers>,
}

impl<K: Ord> Default for MarkerTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> MarkerTable<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            markers: BTreeMap::new(),
        }
    }

    /// Number of elements with at least one marker set.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns `true` if no element has a marker set.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Iterate elements with their markers, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Markers)> + '_ {
        self.markers.iter().map(|(k, m)| (k, *m))
    }
}

impl<K: Ord + Copy> MarkerStore<K> for MarkerTable<K> {
    fn markers(&self, element: &K) -> Markers {
        self.markers.get(element).copied().unwrap_or_default()
    }

    fn insert_markers(&mut self, element: &K, markers: Markers) {
        if markers.is_empty() {
            return;
        }
        *self.markers.entry(*element).or_default() |= markers;
    }

    fn remove_markers(&mut self, element: &K, markers: Markers) {
        if let Some(current) = self.markers.get_mut(element) {
            current.remove(markers);
            if current.is_empty() {
                self.markers.remove(element);
            }
        }
    }
}

impl<K, E> TimerScheduler<K, E> for TimerQueue<DelayTimer<K, E>> {
    fn schedule(&mut self, delay_ms: u32, timer: DelayTimer<K, E>) {
        self.push_after(delay_ms, timer);
    }
}

/// An [`EventTarget`] that records active subscriptions.
///
/// Subscriptions are a multiset: subscribing twice needs two unsubscribes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subscriptions<K> {
    entries: Vec<(K, InputKind)>,
}

impl<K: Copy + Eq> Subscriptions<K> {
    /// Create an empty subscription set.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Total number of active subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `element` has at least one `kind` subscription.
    pub fn is_subscribed(&self, element: &K, kind: InputKind) -> bool {
        self.entries.iter().any(|(k, i)| k == element && *i == kind)
    }

    /// Subscribed kinds for `element`, in subscription order.
    pub fn kinds_for(&self, element: &K) -> Vec<InputKind> {
        self.entries
            .iter()
            .filter(|(k, _)| k == element)
            .map(|(_, i)| *i)
            .collect()
    }
}

impl<K: Copy + Eq> EventTarget<K> for Subscriptions<K> {
    fn subscribe(&mut self, element: &K, kind: InputKind) {
        self.entries.push((*element, kind));
    }

    fn unsubscribe(&mut self, element: &K, kind: InputKind) {
        if let Some(at) = self
            .entries
            .iter()
            .position(|(k, i)| k == element && *i == kind)
        {
            self.entries.remove(at);
        }
    }
}

/// A complete in-memory host with a virtual clock.
///
/// ```
/// use understory_tap::binder::Binder;
/// use understory_tap::config::TapConfig;
/// use understory_tap::host::{MarkerStore, SimulatedHost};
/// use understory_tap::types::{InputKind, TouchSupport};
///
/// let mut host = SimulatedHost::<u32, ()>::new();
/// let mut binder = Binder::<u32, ()>::new(TouchSupport::Available);
/// binder.bind(&[1], TapConfig::new().with_delay_ms(100), &mut host);
///
/// binder.dispatch(&1, InputKind::TouchStart, (), &mut host).unwrap();
/// for timer in host.advance_by(100) {
///     binder.fire(timer, &mut host).unwrap();
/// }
/// assert!(host.is_highlighted(&1));
/// ```
#[derive(Clone, Debug)]
pub struct SimulatedHost<K: Ord, E> {
    /// Element markers.
    pub markers: MarkerTable<K>,
    /// Pending delay timers.
    pub timers: TimerQueue<DelayTimer<K, E>>,
    /// Active event subscriptions.
    pub subscriptions: Subscriptions<K>,
}

impl<K: Ord + Copy, E> Default for SimulatedHost<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy, E> SimulatedHost<K, E> {
    /// Create a host with no markers, timers, or subscriptions.
    pub fn new() -> Self {
        Self {
            markers: MarkerTable::new(),
            timers: TimerQueue::new(),
            subscriptions: Subscriptions::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// Advance the clock by `ms`, returning timers that came due.
    pub fn advance_by(&mut self, ms: u64) -> Vec<DelayTimer<K, E>> {
        self.timers.advance_by(ms)
    }

    /// Advance the clock to `now_ms`, returning timers that came due.
    pub fn advance_to(&mut self, now_ms: u64) -> Vec<DelayTimer<K, E>> {
        self.timers.advance_to(now_ms)
    }
}

impl<K: Ord + Copy, E> MarkerStore<K> for SimulatedHost<K, E> {
    fn markers(&self, element: &K) -> Markers {
        self.markers.markers(element)
    }

    fn insert_markers(&mut self, element: &K, markers: Markers) {
        self.markers.insert_markers(element, markers);
    }

    fn remove_markers(&mut self, element: &K, markers: Markers) {
        self.markers.remove_markers(element, markers);
    }
}

impl<K: Ord + Copy, E> TimerScheduler<K, E> for SimulatedHost<K, E> {
    fn schedule(&mut self, delay_ms: u32, timer: DelayTimer<K, E>) {
        self.timers.schedule(delay_ms, timer);
    }
}

impl<K: Ord + Copy, E> EventTarget<K> for SimulatedHost<K, E> {
    fn subscribe(&mut self, element: &K, kind: InputKind) {
        self.subscriptions.subscribe(element, kind);
    }

    fn unsubscribe(&mut self, element: &K, kind: InputKind) {
        self.subscriptions.unsubscribe(element, kind);
    }
}
