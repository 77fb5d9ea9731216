// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tap --heading-base-level=0

//! Understory Tap: press-and-highlight tap recognition for UI elements.
//!
//! ## Overview
//!
//! Raw touch input is noisy. Fingers jitter, taps are accidental, and
//! platforms synthesize a late click after every touch. This crate turns a
//! touch stream into two clean signals per element:
//!
//! - a highlight marker, set while the element is pressed and held, and
//! - an action, invoked at most once per touch cycle.
//!
//! It does not bind to any platform. The host supplies three capabilities as
//! traits (see [`host`]): per-element marker storage, delayed timer delivery,
//! and event subscription. A [`Binder`](crate::binder::Binder) wires them to
//! one [`TapStateMachine`](crate::machine::TapStateMachine) per element.
//!
//! ## Tap cycle
//!
//! 1) Touch start: if the guard allows, the element becomes *pending* and a
//!    delay timer is scheduled (`delay_ms`, default 0).
//! 2) If the timer fires first, the element is highlighted. Lifting the finger
//!    then clears the highlight and fires the action.
//! 3) If the finger lifts first, the element is marked *ended early* and the
//!    timer fires the action when it arrives. The highlight is never shown.
//! 4) A touch move (with `cancel_on_move`, the default) clears everything;
//!    nothing fires for that cycle.
//!
//! The guard is re-evaluated whenever an action is about to fire. The timer is
//! always asynchronous, including at zero delay, so both orderings of step 2
//! and step 3 are reachable.
//!
//! Without touch support the binder attaches a plain click handler instead;
//! no markers are ever set in that mode.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_tap::binder::Binder;
//! use understory_tap::config::TapConfig;
//! use understory_tap::host::{MarkerStore, SimulatedHost};
//! use understory_tap::types::{Disposition, InputKind, TouchSupport};
//!
//! let taps = Rc::new(Cell::new(0));
//! let counter = taps.clone();
//!
//! let mut host = SimulatedHost::<u32, ()>::new();
//! let mut binder = Binder::new(TouchSupport::Available);
//! binder.bind(
//!     &[1, 2],
//!     TapConfig::new()
//!         .with_delay_ms(100)
//!         .with_action(move |_el: &u32, _ev: &()| counter.set(counter.get() + 1)),
//!     &mut host,
//! );
//!
//! // Press and hold past the delay: highlight on.
//! binder.dispatch(&1, InputKind::TouchStart, (), &mut host).unwrap();
//! for timer in host.advance_by(100) {
//!     binder.fire(timer, &mut host).unwrap();
//! }
//! assert!(host.is_highlighted(&1));
//!
//! // Release: highlight off, action fires once.
//! binder.dispatch(&1, InputKind::TouchEnd, (), &mut host).unwrap();
//! assert!(!host.is_highlighted(&1));
//! assert_eq!(taps.get(), 1);
//!
//! // The platform's follow-up click is suppressed.
//! let d = binder.dispatch(&1, InputKind::Click, (), &mut host).unwrap();
//! assert_eq!(d, Disposition::PreventDefault);
//! ```
//!
//! ## Errors
//!
//! Guards and actions may be fallible. Their errors come back as
//! [`TapError`](crate::error::TapError) from the handler that ran them.
//! Marker changes that precede the callback have already been applied.
//!
//! ## Logging
//!
//! Binding is logged at `debug` and every phase transition at `trace`, through
//! the `log` facade. Install any logger to see them.
//!
//! ## Features
//!
//! - `sample` (default): [`sample::TouchSample`], a `kurbo`-based event payload.
//!   Requires `std` or `libm`.
//! - `std` (default) / `libm`: forwarded to dependencies.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod binder;
pub mod config;
pub mod error;
pub mod host;
pub mod machine;
#[cfg(feature = "sample")]
pub mod sample;
pub mod timer;
pub mod types;
