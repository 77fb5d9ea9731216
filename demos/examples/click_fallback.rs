// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click fallback on a platform without touch input.
//!
//! The guard disables one of the two links; clicking it does nothing.
//!
//! Run:
//! - `cargo run -p understory_demos --example click_fallback`

use kurbo::Point;
use understory_tap::binder::Binder;
use understory_tap::config::TapConfig;
use understory_tap::error::TapError;
use understory_tap::host::SimulatedHost;
use understory_tap::sample::TouchSample;
use understory_tap::types::{InputKind, TouchSupport};

fn main() -> Result<(), TapError> {
    env_logger::init();

    let mut host = SimulatedHost::<u32, TouchSample>::new();
    let mut binder = Binder::new(TouchSupport::Unavailable);
    binder.bind(
        &[10, 20],
        TapConfig::new()
            .with_guard(|link: &u32| *link != 20)
            .with_action(|link: &u32, ev: &TouchSample| {
                println!("  followed link {link} from {:?}", ev.position);
            }),
        &mut host,
    );
    println!(
        "subscriptions for 10: {:?}",
        host.subscriptions.kinds_for(&10)
    );

    for link in [10, 20] {
        println!("== Click {link} ==");
        let ev = TouchSample::new(Point::new(4.0, 4.0), 0);
        let d = binder.dispatch(&link, InputKind::Click, ev, &mut host)?;
        println!("  disposition: {d:?}");
    }
    Ok(())
}
