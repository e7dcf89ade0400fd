#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use input_linux_sys::{input_event, timeval};
use input_tracker::capture::EvdevDecoder;
use input_tracker::session::Session;
use input_tracker::util;
use libfuzzer_sys::fuzz_target;
use std::time::Duration;

#[derive(Arbitrary, Debug, Clone)]
struct RawEvent {
    delta_us: u32,
    type_: u8, // EV_SYN..EV_ABS mostly
    code: u16,
    value: i32,
}

#[derive(Arbitrary, Debug)]
struct Input {
    throttle_ms: u16,
    ignore_repeats: bool,
    max_events: u8,
    events: Vec<RawEvent>,
}

// Decode arbitrary raw streams straight into a session; nothing may panic and
// the buffer must stay bounded.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(input) = Input::arbitrary(&mut u) else {
        return;
    };
    let mut decoder = EvdevDecoder::new(Duration::from_millis(input.throttle_ms.into()), input.ignore_repeats);
    let mut session = Session::new(input_tracker::SessionLimits {
        max_events: input.max_events.into(),
        ..Default::default()
    });
    let start = util::now_secs();
    session.start_at(start);

    let mut now_us = 0u64;
    for raw in input.events {
        now_us = now_us.saturating_add(raw.delta_us.into());
        let ev = input_event {
            time: timeval {
                tv_sec: (now_us / 1_000_000) as _,
                tv_usec: (now_us % 1_000_000) as _,
            },
            type_: u16::from(raw.type_ % 5),
            code: raw.code,
            value: raw.value,
        };
        decoder.feed(&ev, |n| {
            let (kind, data) = n.normalize();
            session.record_at(start + now_us as f64 / 1e6, kind, data);
        });
        assert!(session.event_log().len() <= usize::from(input.max_events));
    }
    let _ = session.summary();
});
