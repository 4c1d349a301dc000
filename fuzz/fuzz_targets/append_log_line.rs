#![no_main]

use libfuzzer_sys::fuzz_target;
use owl_core::{Consolidator, Entry, EntryData, EntryRead};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut consolidator = Consolidator::new();
    let mut expected = Vec::new();
    for line in text.lines() {
        let Ok(entry) = serde_json::from_str::<EntryData>(line) else {
            continue;
        };
        let before = consolidator.clone();
        if consolidator.append_entry(&entry).is_ok() {
            expected.push(Entry::from(&entry));
        } else {
            assert_eq!(consolidator, before);
        }
    }

    let decoded: Vec<Entry> = consolidator
        .generate_col()
        .entries()
        .iter()
        .map(|e| e.to_entry())
        .collect();
    assert_eq!(decoded, expected);
});
