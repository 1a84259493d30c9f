//! Batch-level field coverage counters.

use crate::models::record::FieldRecord;

/// Per-field hit counters accumulated over a processing batch.
#[derive(Debug, Clone, Default)]
pub struct FieldStats {
    documents: usize,
    communication_type: usize,
    contract_number: usize,
    document_id: usize,
    survey_date: usize,
}

/// Coverage of one field across the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCoverage {
    pub field: &'static str,
    pub count: usize,
    pub percent: f64,
}

impl FieldStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one document's extraction result.
    pub fn record(&mut self, record: &FieldRecord) {
        self.documents += 1;
        if record.communication_type.is_some() {
            self.communication_type += 1;
        }
        if record.contract_number.is_some() {
            self.contract_number += 1;
        }
        if record.document_id.is_some() {
            self.document_id += 1;
        }
        if record.survey_date.is_some() {
            self.survey_date += 1;
        }
    }

    /// Number of documents recorded so far.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Per-field coverage. An empty batch reports 0% rather than
    /// dividing by zero.
    pub fn coverage(&self) -> Vec<FieldCoverage> {
        let percent = |count: usize| {
            if self.documents == 0 {
                0.0
            } else {
                count as f64 / self.documents as f64 * 100.0
            }
        };
        vec![
            FieldCoverage {
                field: "communication type",
                count: self.communication_type,
                percent: percent(self.communication_type),
            },
            FieldCoverage {
                field: "contract number",
                count: self.contract_number,
                percent: percent(self.contract_number),
            },
            FieldCoverage {
                field: "document id",
                count: self.document_id,
                percent: percent(self.document_id),
            },
            FieldCoverage {
                field: "survey date",
                count: self.survey_date,
                percent: percent(self.survey_date),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_only_present_fields() {
        let mut stats = FieldStats::new();
        stats.record(&FieldRecord {
            communication_type: Some("Газ".to_string()),
            document_id: Some("123-45".to_string()),
            ..Default::default()
        });
        stats.record(&FieldRecord {
            document_id: Some("678-90".to_string()),
            ..Default::default()
        });

        assert_eq!(stats.documents(), 2);
        let coverage = stats.coverage();
        assert_eq!(coverage[0].count, 1);
        assert_eq!(coverage[0].percent, 50.0);
        assert_eq!(coverage[2].count, 2);
        assert_eq!(coverage[2].percent, 100.0);
        assert_eq!(coverage[1].count, 0);
        assert_eq!(coverage[1].percent, 0.0);
    }

    #[test]
    fn empty_batch_reports_zero_percent() {
        let stats = FieldStats::new();
        assert_eq!(stats.documents(), 0);
        for coverage in stats.coverage() {
            assert_eq!(coverage.count, 0);
            assert_eq!(coverage.percent, 0.0);
        }
    }
}
