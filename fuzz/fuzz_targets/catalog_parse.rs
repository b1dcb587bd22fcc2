//! Fuzz target for UI string catalogs and language lookup.

#![no_main]

use bhasha::localization::Catalog;
use bhasha::map_language_code;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Unknown codes always fall back to a valid locale
        assert!(map_language_code(s).ends_with("-IN"));

        if let Ok(catalog) = Catalog::from_toml(s) {
            for lang in bhasha::translation::LANGUAGES {
                let _ = catalog.missing(lang.code);
            }
        }
    }
});
