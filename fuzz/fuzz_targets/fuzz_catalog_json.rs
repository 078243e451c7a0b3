#![no_main]
use franchise_ranker::catalog::CatalogFormat;
use franchise_ranker::{rank, Catalog, RegionFilter, ScoreWeights};
use libfuzzer_sys::fuzz_target;

/// Fuzz JSON catalog parsing.
///
/// Anything that parses into a catalog must also rank without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(catalog) = Catalog::from_str_as(s, CatalogFormat::Json) {
            let _ = rank(catalog.titles(), &ScoreWeights::default(), RegionFilter::Global);
        }
    }
});
