use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::portfolio::aum::AumReport;
use crate::positions::Position;
use crate::quotes::Price;
use crate::transactions::Transaction;

/// Outcome of a single quality-control check.
///
/// Ordered from best to worst: Pass < Warn < Fail. The ordering determines
/// the overall report status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QcStatus {
    #[default]
    Pass,
    Warn,
    Fail,
}

impl QcStatus {
    /// Returns the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            QcStatus::Pass => "PASS",
            QcStatus::Warn => "WARN",
            QcStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for QcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one named check, with structured evidence for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QcResult {
    pub check_name: String,
    pub status: QcStatus,
    pub message: String,
    pub evidence: Value,
}

impl QcResult {
    pub fn pass(check_name: &str, message: impl Into<String>) -> Self {
        Self {
            check_name: check_name.to_string(),
            status: QcStatus::Pass,
            message: message.into(),
            evidence: Value::Null,
        }
    }

    pub fn warn(check_name: &str, message: impl Into<String>, evidence: Value) -> Self {
        Self {
            check_name: check_name.to_string(),
            status: QcStatus::Warn,
            message: message.into(),
            evidence,
        }
    }

    pub fn fail(check_name: &str, message: impl Into<String>, evidence: Value) -> Self {
        Self {
            check_name: check_name.to_string(),
            status: QcStatus::Fail,
            message: message.into(),
            evidence,
        }
    }
}

/// Counts per status across a full battery run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QcSummary {
    pub total_checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub warned: usize,
}

/// Aggregated output of a comprehensive QC run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QcReport {
    pub overall_status: QcStatus,
    pub account_id: String,
    pub checks: Vec<QcResult>,
    pub summary: QcSummary,
}

impl QcReport {
    /// Aggregates check results: Fail dominates, then Warn, else Pass.
    pub fn from_results(account_id: &str, checks: Vec<QcResult>) -> Self {
        let overall_status = checks
            .iter()
            .map(|c| c.status)
            .max()
            .unwrap_or(QcStatus::Pass);

        let summary = QcSummary {
            total_checks: checks.len(),
            passed: checks.iter().filter(|c| c.status == QcStatus::Pass).count(),
            failed: checks.iter().filter(|c| c.status == QcStatus::Fail).count(),
            warned: checks.iter().filter(|c| c.status == QcStatus::Warn).count(),
        };

        Self {
            overall_status,
            account_id: account_id.to_string(),
            checks,
            summary,
        }
    }
}

/// Input bundle for a comprehensive QC run: the reconciliation under audit
/// plus the raw records it was derived from.
#[derive(Debug, Clone, Copy)]
pub struct QcInput<'a> {
    pub account_id: &'a str,
    pub aum: &'a AumReport,
    pub positions: &'a [Position],
    pub prices: &'a [Price],
    pub transactions: &'a [Transaction],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(QcStatus::Pass < QcStatus::Warn);
        assert!(QcStatus::Warn < QcStatus::Fail);

        let statuses = vec![QcStatus::Warn, QcStatus::Fail, QcStatus::Pass];
        assert_eq!(statuses.into_iter().max().unwrap(), QcStatus::Fail);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&QcStatus::Warn).unwrap(), "\"WARN\"");
        assert_eq!(
            serde_json::from_str::<QcStatus>("\"FAIL\"").unwrap(),
            QcStatus::Fail
        );
    }

    #[test]
    fn test_report_aggregation() {
        let checks = vec![
            QcResult::pass("CHECK_A", "ok"),
            QcResult::fail("CHECK_B", "broken", Value::Null),
            QcResult::pass("CHECK_C", "ok"),
        ];
        let report = QcReport::from_results("acct-1", checks);

        assert_eq!(report.overall_status, QcStatus::Fail);
        assert_eq!(report.summary.total_checks, 3);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.warned, 0);
    }

    #[test]
    fn test_report_all_pass() {
        let checks = vec![QcResult::pass("CHECK_A", "ok"), QcResult::pass("CHECK_B", "ok")];
        let report = QcReport::from_results("acct-1", checks);
        assert_eq!(report.overall_status, QcStatus::Pass);
        assert_eq!(report.summary.failed, 0);
    }

    #[test]
    fn test_warn_does_not_escalate_to_fail() {
        let checks = vec![
            QcResult::pass("CHECK_A", "ok"),
            QcResult::warn("CHECK_B", "suspicious", Value::Null),
        ];
        let report = QcReport::from_results("acct-1", checks);
        assert_eq!(report.overall_status, QcStatus::Warn);
    }

    #[test]
    fn test_empty_battery_is_pass() {
        let report = QcReport::from_results("acct-1", Vec::new());
        assert_eq!(report.overall_status, QcStatus::Pass);
        assert_eq!(report.summary.total_checks, 0);
    }
}
