// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer versus finger-lift races.
//!
//! Replays three scripts against a 150ms delay and reports, for each, whether
//! the highlight was ever shown and how many times the action ran.
//!
//! Run:
//! - `cargo run -p understory_demos --example tap_races`

use std::cell::Cell;
use std::rc::Rc;

use understory_tap::binder::Binder;
use understory_tap::config::TapConfig;
use understory_tap::error::TapError;
use understory_tap::host::{MarkerStore, SimulatedHost};
use understory_tap::sample::TouchSample;
use understory_tap::types::{InputKind, TouchSupport};

const BUTTON: u32 = 1;

#[derive(Copy, Clone, Debug)]
enum Step {
    Input(InputKind),
    Wait(u64),
}

fn replay(name: &str, script: &[Step]) -> Result<(), TapError> {
    let taps = Rc::new(Cell::new(0));
    let counter = taps.clone();
    let mut host = SimulatedHost::<u32, TouchSample>::new();
    let mut binder = Binder::new(TouchSupport::Available);
    binder.bind(
        &[BUTTON],
        TapConfig::new()
            .with_delay_ms(150)
            .with_action(move |_: &u32, _: &TouchSample| counter.set(counter.get() + 1)),
        &mut host,
    );

    let mut highlighted = false;
    for step in script {
        match *step {
            Step::Input(kind) => {
                let ev = TouchSample::new((0.0, 0.0), host.now_ms());
                binder.dispatch(&BUTTON, kind, ev, &mut host)?;
            }
            Step::Wait(ms) => {
                for timer in host.advance_by(ms) {
                    binder.fire(timer, &mut host)?;
                    highlighted |= host.is_highlighted(&BUTTON);
                }
            }
        }
        highlighted |= host.is_highlighted(&BUTTON);
    }
    println!(
        "{name:<14} highlight shown: {highlighted:<5}  actions: {}",
        taps.get()
    );
    Ok(())
}

fn main() -> Result<(), TapError> {
    env_logger::init();

    use InputKind::*;
    use Step::*;
    replay(
        "hold",
        &[Input(TouchStart), Wait(200), Input(TouchEnd), Wait(100)],
    )?;
    replay(
        "quick tap",
        &[Input(TouchStart), Wait(50), Input(TouchEnd), Wait(100)],
    )?;
    replay(
        "scroll",
        &[
            Input(TouchStart),
            Wait(50),
            Input(TouchMove),
            Wait(100),
            Wait(150),
            Input(TouchEnd),
        ],
    )?;
    Ok(())
}
