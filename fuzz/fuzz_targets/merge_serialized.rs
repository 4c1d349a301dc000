#![no_main]

use libfuzzer_sys::fuzz_target;
use owl_core::{Consolidator, EntryRead, SerializedLogs};

fuzz_target!(|data: &[u8]| {
    let Ok(serialized) = SerializedLogs::from_slice(data) else {
        return;
    };

    let mut consolidator = Consolidator::new();
    let before = consolidator.clone();
    match consolidator.append_from_serialized(&serialized) {
        Ok(merged) => {
            assert_eq!(merged, serialized.entries.len());
            assert!(consolidator.records().is_sorted_by_key(|e| e.timestamp));

            // Every decoded window must resolve, and optimizing must not
            // change what is decoded.
            let before_optimize: Vec<_> = consolidator
                .generate_col()
                .entries()
                .iter()
                .map(|e| e.to_entry())
                .collect();
            let reserialized = consolidator.serialize(true);
            let after_optimize: Vec<_> = consolidator
                .generate_col()
                .entries()
                .iter()
                .map(|e| e.to_entry())
                .collect();
            assert_eq!(before_optimize, after_optimize);

            let json = serde_json::to_string(&reserialized).expect("re-encode");
            let again = Consolidator::from_serialized(
                &SerializedLogs::from_json(&json).expect("re-decode"),
            )
            .expect("re-merge");
            assert_eq!(again.len(), consolidator.len());
        }
        Err(_) => assert_eq!(consolidator, before),
    }
});
