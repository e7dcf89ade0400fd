#![no_main]

use input_tracker::session::persist::SessionDocument;
use input_tracker::session::report;
use libfuzzer_sys::fuzz_target;

// Any JSON that parses as a session document must analyze without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = serde_json::from_slice::<SessionDocument>(data) {
        let _ = report::summarize(&doc);
        let mut sink = Vec::new();
        let _ = report::write_json(&doc, &mut sink);
    }
});
