#![no_main]

use indexmap::IndexMap;
use libfuzzer_sys::fuzz_target;
use po_to_jed::jed::build_document;
use po_to_jed::parse_catalog;
use po_to_jed_fuzz::{create_po, round_trips, Settings};

fuzz_target!(|inputs: (Vec<(&str, &str)>, Settings)| {
    let (translations, settings) = inputs;
    let config = settings.into();
    let catalog = parse_catalog(&create_po(&translations));

    if translations
        .iter()
        .all(|(msgid, msgstr)| round_trips(msgid) && round_trips(msgstr))
    {
        let mut expected = IndexMap::new();
        for (msgid, msgstr) in &translations {
            if !msgid.is_empty() {
                expected.insert(*msgid, *msgstr);
            }
        }
        assert_eq!(
            catalog.messages().collect::<Vec<_>>(),
            expected.into_iter().collect::<Vec<_>>()
        );
    }

    let document = build_document(&catalog, &config);
    let json = serde_json::to_value(&document).unwrap();
    let locale = &json["locale_data"][config.domain.as_str()];
    assert_eq!(locale[""]["lang"], config.locale.as_str());
    for (msgid, msgstr) in catalog.messages() {
        assert_eq!(locale[msgid][0], msgstr);
    }
});
