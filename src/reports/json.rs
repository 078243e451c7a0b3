//! JSON report generator.

use super::{RankingReport, ReportError, ReportFormat, ReportGenerator};

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, report: &RankingReport) -> Result<String, ReportError> {
        let mut json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        json.push('\n');
        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::builtin_report;

    #[test]
    fn test_json_parses_back() {
        let report = builtin_report(Some(4));
        let json = JsonReporter::new().generate(&report).unwrap();
        let parsed: RankingReport = serde_json::from_str(&json).unwrap();
        let ids = |r: &RankingReport| r.entries.iter().map(|e| (e.rank, e.id.clone())).collect::<Vec<_>>();
        assert_eq!(ids(&parsed), ids(&report));
        assert_eq!(parsed.filter, report.filter);
    }

    #[test]
    fn test_json_uses_wire_keys() {
        let report = builtin_report(Some(1));
        let json = JsonReporter::new().pretty(false).generate(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filter"], "Global");
        assert!(value["weights"]["returnRate7d"].is_number());
        assert!(value["entries"][0]["contributions"]["bingeIntensity"].is_number());
        assert!(value["metadata"]["catalogVersion"].is_string());
        assert!(!json.trim_end().contains('\n'));
    }
}
