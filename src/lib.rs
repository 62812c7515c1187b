//! # Fraud Dashboard Core
//!
//! State and logic behind a fraud-monitoring dashboard. Rendering belongs to the
//! host; this crate hands it view models built from immutable fixtures.
//!
//! ## Features
//!
//! - **Typed records**: transactions and alerts with closed status/severity/type enums
//! - **Search & filters**: case-insensitive text search plus enum and risk-bucket filters
//! - **Aggregates**: alert and risk counters recomputed from the fixture lists
//! - **CSV import**: header-checked, row-validated transaction import with a template
//! - **Flag workflow**: cancellable confirm-then-auto-close submission for suspicious transactions
//! - **Settings & analytics**: the settings form model and the report datasets
//!
//! Nothing here persists, talks to a network, or scores transactions; risk scores
//! and AI confidence values are fixture data.

pub mod aggregates;
pub mod alerts;
#[cfg(feature = "analytics")]
pub mod analytics;
pub mod csv_import;
pub mod fixtures;
pub mod flagging;
pub mod presentation;
pub mod search;
pub mod settings;
pub mod views;

pub use aggregates::{count_where, AlertSummary, RiskBreakdown, TransactionSummary};
pub use alerts::{Alert, AlertAction, AlertActionRequest, AlertStatus, AlertType, Severity};
pub use csv_import::{
    FileStatus, ImportError, ImportSession, ImportedTransaction, RowStatus, UploadedFile,
};
pub use flagging::{FlagDialog, FlagError, FlagPhase, FlagReport};
pub use search::{AlertFilter, EnumFilter, RiskBucket, Searchable, TransactionFilter};
pub use settings::{Settings, SettingsError};
pub use views::{AlertsPanelState, DashboardHome, TransactionTableState};

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Returned when a wire name does not match any variant of a closed enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Transaction status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Flagged,
    Blocked,
}

impl TransactionStatus {
    pub const fn all() -> [TransactionStatus; 4] {
        [
            TransactionStatus::Completed,
            TransactionStatus::Pending,
            TransactionStatus::Flagged,
            TransactionStatus::Blocked,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Flagged => "flagged",
            TransactionStatus::Blocked => "blocked",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Flagged => "Flagged",
            TransactionStatus::Blocked => "Blocked",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransactionStatus::all()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("transaction status", s))
    }
}

/// A monitored card transaction.
///
/// `date` is display text and is never parsed. `risk_score` is a 0-100 fixture
/// value with no computation behind it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub user: String,
    pub location: String,
    pub merchant: String,
    pub date: String,
    pub status: TransactionStatus,
    pub risk_score: u8,
    pub category: String,
}

impl Transaction {
    /// Risk bucket of this transaction's score
    pub fn risk_bucket(&self) -> RiskBucket {
        RiskBucket::of(self.risk_score)
    }

    /// Export as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Dashboard runtime configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Artificial delay between confirming a flag and the success state
    pub flag_submit_delay: Duration,
    /// How long the success state stays up before the dialog closes itself
    pub flag_close_delay: Duration,
    /// MIME types the importer accepts in addition to any `.csv` file name
    pub accepted_mime_types: Vec<String>,
    /// File name offered for the CSV template download
    pub template_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            flag_submit_delay: Duration::from_millis(1500),
            flag_close_delay: Duration::from_millis(2000),
            accepted_mime_types: vec![
                "text/csv".to_string(),
                "application/vnd.ms-excel".to_string(),
            ],
            template_file_name: csv_import::TEMPLATE_FILE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_wire_name() {
        for status in TransactionStatus::all() {
            assert_eq!(status.as_str().parse::<TransactionStatus>(), Ok(status));
        }
        assert_eq!("FLAGGED".parse(), Ok(TransactionStatus::Flagged));
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "refunded".parse::<TransactionStatus>().unwrap_err();
        assert_eq!(err.kind, "transaction status");
        assert!(err.to_string().contains("refunded"));
    }

    #[test]
    fn test_transaction_json_uses_camel_case() {
        let tx = &fixtures::mock_transactions()[0];
        let json = tx.to_json().unwrap();
        assert!(json.contains("\"riskScore\": 95"));
        assert!(json.contains("\"status\": \"flagged\""));
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.flag_submit_delay, Duration::from_millis(1500));
        assert_eq!(config.flag_close_delay, Duration::from_millis(2000));
        assert_eq!(config.template_file_name, "transaction_template.csv");
        assert!(config.accepted_mime_types.iter().any(|m| m == "text/csv"));
    }
}
