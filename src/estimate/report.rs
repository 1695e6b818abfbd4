// src/estimate/report.rs
// =============================================================================
// Running totals and the final report.
//
// `AggregationState` is a plain value folded over probed resources. Only the
// set of counted resources decides the totals, never the order they arrive in.
// =============================================================================

use crate::resource::Category;
use serde::Serialize;

// Totals accumulated during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregationState {
    pub total_size_bytes: u64,
    pub matched_resource_count: usize,
}

impl AggregationState {
    // Starts the fold with the page's own size.
    pub fn seeded(root_size_bytes: u64) -> Self {
        Self {
            total_size_bytes: root_size_bytes,
            matched_resource_count: 0,
        }
    }

    // Counts one resource that was sized and passed the filter.
    pub fn record(self, size_bytes: u64) -> Self {
        Self {
            total_size_bytes: self.total_size_bytes.saturating_add(size_bytes),
            matched_resource_count: self.matched_resource_count + 1,
        }
    }
}

// One counted resource, as printed in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub url: String,
    pub size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

// The outcome of a completed estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Category>,
    pub root_size_bytes: u64,
    /// Counted resources in discovery order
    pub resources: Vec<ResourceEntry>,
    #[serde(flatten)]
    pub totals: AggregationState,
}

impl ResourceEntry {
    pub fn line(&self) -> String {
        format!("URL: {} Size={} bytes", self.url, self.size_bytes)
    }
}

impl Report {
    // The two closing lines: total size and number of counted resources.
    pub fn summary_lines(&self) -> [String; 2] {
        [
            format!(
                "Full size of page and embedded resourses: {}kb",
                format_kilobytes(self.totals.total_size_bytes)
            ),
            format!(
                "Total external links number: {}",
                self.totals.matched_resource_count
            ),
        ]
    }
}

// Formats bytes as kilobytes with two decimals and "," thousands separators.
//
// Rounds half up on the exact value: 1536 -> "1.50", 1_048_576 -> "1,024.00".
pub fn format_kilobytes(bytes: u64) -> String {
    let hundredths = (u128::from(bytes) * 100 + 512) / 1024;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    format!("{}.{:02}", group_thousands(whole), fraction)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kilobytes() {
        assert_eq!(format_kilobytes(0), "0.00");
        assert_eq!(format_kilobytes(1024), "1.00");
        assert_eq!(format_kilobytes(1536), "1.50");
        assert_eq!(format_kilobytes(1_048_576), "1,024.00");
        assert_eq!(format_kilobytes(1_073_741_824), "1,048,576.00");
    }

    #[test]
    fn test_format_kilobytes_rounds_half_up() {
        // half of 0.01kb is 5.12 bytes
        assert_eq!(format_kilobytes(5), "0.00");
        assert_eq!(format_kilobytes(6), "0.01");
        // 2558 / 1024 = 2.498046875
        assert_eq!(format_kilobytes(2558), "2.50");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
    }

    #[test]
    fn test_aggregation_fold() {
        let state = AggregationState::seeded(100).record(500).record(2000);
        assert_eq!(state.total_size_bytes, 2600);
        assert_eq!(state.matched_resource_count, 2);
    }

    #[test]
    fn test_report_lines() {
        let report = Report {
            url: "http://example.com".to_string(),
            filter: None,
            root_size_bytes: 548,
            resources: vec![ResourceEntry {
                url: "http://example.com/pic.png".to_string(),
                size_bytes: 2000,
                category: None,
            }],
            totals: AggregationState::seeded(548).record(2000),
        };

        assert_eq!(
            report.resources[0].line(),
            "URL: http://example.com/pic.png Size=2000 bytes"
        );
        assert_eq!(
            report.summary_lines(),
            [
                "Full size of page and embedded resourses: 2.49kb".to_string(),
                "Total external links number: 1".to_string(),
            ]
        );
    }
}
