#![no_main]

use libfuzzer_sys::fuzz_target;
use po_to_jed::jed::{build_document, Config};
use po_to_jed::parse_catalog;

fuzz_target!(|text: &str| {
    let catalog = parse_catalog(text);
    assert!(catalog.messages().all(|(msgid, _)| !msgid.is_empty()));

    let document = build_document(&catalog, &Config::default());
    serde_json::to_string_pretty(&document).unwrap();
});
