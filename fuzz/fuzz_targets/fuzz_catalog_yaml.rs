#![no_main]
use franchise_ranker::catalog::CatalogFormat;
use franchise_ranker::Catalog;
use libfuzzer_sys::fuzz_target;

/// Fuzz YAML catalog parsing.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(catalog) = Catalog::from_str_as(s, CatalogFormat::Yaml) {
            let _ = catalog.validate();
        }
    }
});
