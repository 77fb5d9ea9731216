// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for tap recognition: markers, phases, input kinds, and dispositions.
//!
//! ## Overview
//!
//! Tap state is stored as [`Markers`] on each element rather than inside the
//! state machine. [`TapPhase`] is the read-side view of those markers; it is
//! recomputed from the host's marker store every time a handler runs, so a
//! late timer can always tell whether it is still relevant.

bitflags::bitflags! {
    /// Per-element tap markers.
    ///
    /// At most one of these is set at a time while a binding is driving the
    /// element. [`ACTIVE`](Self::ACTIVE) doubles as the externally visible
    /// highlight signal; the other two only resolve timer/finger-lift races.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// Element is highlighted (pressed and held past the delay).
        const ACTIVE      = 0b0000_0001;
        /// Touch started; waiting for the delay timer.
        const PENDING     = 0b0000_0010;
        /// Touch ended before the delay elapsed; the timer fires the action.
        const ENDED_EARLY = 0b0000_0100;
    }
}

/// Phase of one tap cycle, derived from [`Markers`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TapPhase {
    /// No tap in progress.
    #[default]
    Idle,
    /// Touch started, delay not yet elapsed.
    Pending,
    /// Delay elapsed while the finger is still down; highlight is on.
    Active,
    /// Finger lifted before the delay elapsed; action deferred to the timer.
    EndedEarly,
}

impl TapPhase {
    /// Derive the phase from the markers currently set on an element.
    ///
    /// With well-formed markers only one flag is ever set. If several are,
    /// `ACTIVE` wins over `ENDED_EARLY`, which wins over `PENDING`.
    pub fn from_markers(markers: Markers) -> Self {
        if markers.contains(Markers::ACTIVE) {
            Self::Active
        } else if markers.contains(Markers::ENDED_EARLY) {
            Self::EndedEarly
        } else if markers.contains(Markers::PENDING) {
            Self::Pending
        } else {
            Self::Idle
        }
    }
}

/// Input events a binding can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Finger down.
    TouchStart,
    /// Finger moved while down.
    TouchMove,
    /// Finger lifted.
    TouchEnd,
    /// Click, either native or synthesized by the platform after a touch.
    Click,
}

impl InputKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 4] = [Self::TouchStart, Self::TouchMove, Self::TouchEnd, Self::Click];

    /// Platform event name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::Click => "click",
        }
    }

    /// Parse a platform event name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// What the host should do with the platform's default handling of an event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Disposition {
    /// Let the platform's default action run.
    #[default]
    Continue,
    /// Suppress the platform's default action.
    PreventDefault,
}

impl Disposition {
    /// Combine two dispositions; prevention is sticky.
    pub fn merge(self, other: Self) -> Self {
        if self == Self::PreventDefault || other == Self::PreventDefault {
            Self::PreventDefault
        } else {
            Self::Continue
        }
    }
}

/// Whether the platform delivers touch-style pointer events.
///
/// Computed once by the host environment and handed to the
/// [`Binder`](crate::binder::Binder).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchSupport {
    /// Touch events are delivered; bind the full tap state machine.
    Available,
    /// Only clicks are delivered; bind the click fallback.
    Unavailable,
}

impl From<bool> for TouchSupport {
    fn from(touch: bool) -> Self {
        if touch { Self::Available } else { Self::Unavailable }
    }
}

/// Identity of one element binding created by the [`Binder`](crate::binder::Binder).
///
/// Carried by every [`DelayTimer`](crate::timer::DelayTimer) so a fired
/// timer can be routed back to the state machine that scheduled it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(pub(crate) u64);

impl BindingId {
    /// Wrap a raw id, for hosts that drive a
    /// [`TapStateMachine`](crate::machine::TapStateMachine) without a binder.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value, stable for the lifetime of the binder.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_from_single_markers() {
        assert_eq!(TapPhase::from_markers(Markers::empty()), TapPhase::Idle);
        assert_eq!(TapPhase::from_markers(Markers::PENDING), TapPhase::Pending);
        assert_eq!(TapPhase::from_markers(Markers::ACTIVE), TapPhase::Active);
        assert_eq!(
            TapPhase::from_markers(Markers::ENDED_EARLY),
            TapPhase::EndedEarly
        );
    }

    // Malformed combinations still resolve deterministically.
    #[test]
    fn phase_precedence_on_overlapping_markers() {
        assert_eq!(TapPhase::from_markers(Markers::all()), TapPhase::Active);
        assert_eq!(
            TapPhase::from_markers(Markers::PENDING | Markers::ENDED_EARLY),
            TapPhase::EndedEarly
        );
    }

    #[test]
    fn input_kind_names() {
        assert_eq!(InputKind::TouchStart.name(), "touchstart");
        assert_eq!(InputKind::from_name("touchend"), Some(InputKind::TouchEnd));
        assert_eq!(InputKind::from_name("click"), Some(InputKind::Click));
        assert_eq!(InputKind::from_name("mousedown"), None);
    }

    #[test]
    fn disposition_merge_is_sticky() {
        use Disposition::*;
        assert_eq!(Continue.merge(Continue), Continue);
        assert_eq!(Continue.merge(PreventDefault), PreventDefault);
        assert_eq!(PreventDefault.merge(Continue), PreventDefault);
    }

    #[test]
    fn touch_support_from_bool() {
        assert_eq!(TouchSupport::from(true), TouchSupport::Available);
        assert_eq!(TouchSupport::from(false), TouchSupport::Unavailable);
    }
}
