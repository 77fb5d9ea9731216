// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap basics.
//!
//! Binds two buttons, then presses one and holds it past the highlight delay
//! before releasing. Prints the highlight state at each step.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example tap_basics`

use understory_tap::binder::Binder;
use understory_tap::config::TapConfig;
use understory_tap::error::TapError;
use understory_tap::host::{MarkerStore, SimulatedHost};
use understory_tap::sample::TouchSample;
use understory_tap::types::{InputKind, TouchSupport};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Button(u32);

fn main() -> Result<(), TapError> {
    env_logger::init();

    let mut host = SimulatedHost::<Button, TouchSample>::new();
    let mut binder = Binder::new(TouchSupport::Available);
    let buttons = [Button(1), Button(2)];
    binder.bind(
        &buttons,
        TapConfig::new()
            .with_delay_ms(100)
            .with_action(|b: &Button, ev: &TouchSample| {
                println!("  action: {b:?} tapped at {:?}", ev.position);
            }),
        &mut host,
    );

    println!("== Press {:?} ==", buttons[0]);
    let down = TouchSample::new((12.0, 8.0), host.now_ms());
    binder.dispatch(&buttons[0], InputKind::TouchStart, down, &mut host)?;
    println!("  phase: {:?}", host.phase(&buttons[0]));

    println!("== Hold for 100ms ==");
    for timer in host.advance_by(100) {
        binder.fire(timer, &mut host)?;
    }
    println!("  highlighted: {}", host.is_highlighted(&buttons[0]));

    println!("== Release ==");
    let up = TouchSample::new((12.0, 8.0), host.now_ms());
    binder.dispatch(&buttons[0], InputKind::TouchEnd, up, &mut host)?;
    println!("  highlighted: {}", host.is_highlighted(&buttons[0]));

    println!("== Synthetic click ==");
    let d = binder.dispatch(&buttons[0], InputKind::Click, up, &mut host)?;
    println!("  disposition: {d:?}");
    Ok(())
}
