//! Summary counters for stat cards.
//!
//! Counts are recomputed from the full fixture list on every call. Nothing is
//! cached: the source never changes and is a handful of records long.

use crate::alerts::{Alert, AlertStatus, Severity};
use crate::search::RiskBucket;
use crate::Transaction;
use serde::{Deserialize, Serialize};

/// Number of records satisfying `predicate`
pub fn count_where<T, F>(records: &[T], predicate: F) -> usize
where
    F: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(*r)).count()
}

/// Counters above the alerts list. Always computed from the unfiltered alerts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertSummary {
    pub active: usize,
    pub critical: usize,
    pub high: usize,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        Self {
            active: count_where(alerts, |a| a.status == AlertStatus::Active),
            critical: count_where(alerts, |a| a.severity == Severity::Critical),
            high: count_where(alerts, |a| a.severity == Severity::High),
        }
    }
}

/// "Showing N of M" figures for the transaction table
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionSummary {
    pub shown: usize,
    pub total: usize,
}

impl TransactionSummary {
    pub fn caption(&self) -> String {
        format!("Showing {} of {} transactions", self.shown, self.total)
    }
}

/// Transaction counts per risk bucket
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskBreakdown {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let in_bucket =
            |bucket: RiskBucket| count_where(transactions, |t| t.risk_bucket() == bucket);
        Self {
            high: in_bucket(RiskBucket::High),
            medium: in_bucket(RiskBucket::Medium),
            low: in_bucket(RiskBucket::Low),
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{mock_alerts, mock_transactions};

    #[test]
    fn test_alert_summary_from_fixtures() {
        let summary = AlertSummary::from_alerts(&mock_alerts());
        assert_eq!(
            summary,
            AlertSummary {
                active: 2,
                critical: 1,
                high: 2,
            }
        );
    }

    #[test]
    fn test_alert_summary_empty() {
        assert_eq!(AlertSummary::from_alerts(&[]), AlertSummary::default());
    }

    #[test]
    fn test_risk_breakdown_partitions_transactions() {
        let transactions = mock_transactions();
        let breakdown = RiskBreakdown::from_transactions(&transactions);
        assert_eq!(breakdown.high, 2);
        assert_eq!(breakdown.medium, 1);
        assert_eq!(breakdown.low, 2);
        assert_eq!(breakdown.total(), transactions.len());
    }

    #[test]
    fn test_caption() {
        let summary = TransactionSummary { shown: 2, total: 5 };
        assert_eq!(summary.caption(), "Showing 2 of 5 transactions");
    }

    #[test]
    fn test_count_where_recomputes() {
        let mut transactions = mock_transactions();
        assert_eq!(count_where(&transactions, |t| t.amount > 1000.0), 3);
        transactions.truncate(1);
        assert_eq!(count_where(&transactions, |t| t.amount > 1000.0), 1);
    }
}
