//! Fuzz target for batch loading
//!
//! Feeds arbitrary byte strings to the JSON batch reader and merges
//! whatever parses into a fresh session.

#![no_main]

use ferro_align::identity::segment::ReferenceSequence;
use ferro_align::{FeatureBatch, LoadSession};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if input.len() > 4000 {
            return;
        }

        // Loading must never panic, whatever the records contain
        if let Ok(batch) = FeatureBatch::from_json(input) {
            let mut session = LoadSession::default();
            let _ = session.merge(batch, &ReferenceSequence::from_start("ACGTACGTACGTACGT"));
        }
    }
});
