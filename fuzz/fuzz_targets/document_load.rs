#![no_main]

use libfuzzer_sys::fuzz_target;
use tagtree::Document;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut doc = Document::new();
        if doc.load_str(s) {
            // anything that loads must serialize and load again
            let serialized = doc.to_xml_string().unwrap_or_default();
            let mut again = Document::new();
            assert!(again.load_str(&serialized), "{}", again.error());
        }
    }
});
