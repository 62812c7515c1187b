//! Search and filter predicates for the transaction table and alerts panel.
//!
//! A record is shown iff the free-text query is empty or is a case-insensitive
//! substring of one of its searchable fields, AND every enum filter is `All` or
//! equals the record's field. Results keep fixture order.

use crate::alerts::{Alert, AlertStatus, AlertType, Severity};
use crate::{ParseEnumError, Transaction, TransactionStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Score at or above which a transaction is high risk
pub const HIGH_RISK_MIN: u8 = 70;
/// Score at or above which a transaction is at least medium risk
pub const MEDIUM_RISK_MIN: u8 = 30;

/// Records that take part in free-text search
pub trait Searchable {
    /// Field values the query is matched against
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.id, &self.user, &self.merchant, &self.location]
    }
}

impl Searchable for Alert {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.id, &self.user, &self.merchant, &self.description]
    }
}

/// Case-insensitive substring query. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TextQuery {
    raw: String,
    folded: String,
}

impl TextQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        if self.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.folded))
    }
}

impl From<String> for TextQuery {
    fn from(raw: String) -> Self {
        TextQuery::new(raw)
    }
}

impl From<TextQuery> for String {
    fn from(query: TextQuery) -> Self {
        query.raw
    }
}

/// A dropdown selection: either "all" or one specific value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumFilter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> EnumFilter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            EnumFilter::All => true,
            EnumFilter::Only(wanted) => wanted == value,
        }
    }
}

impl<T> FromStr for EnumFilter<T>
where
    T: FromStr<Err = ParseEnumError>,
{
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(EnumFilter::All)
        } else {
            s.parse().map(EnumFilter::Only)
        }
    }
}

/// Risk score bucket. Boundaries are half-open: 70 is high, 30 is medium.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    High,
    Medium,
    Low,
}

impl RiskBucket {
    pub const fn all() -> [RiskBucket; 3] {
        [RiskBucket::High, RiskBucket::Medium, RiskBucket::Low]
    }

    pub fn of(score: u8) -> Self {
        if score >= HIGH_RISK_MIN {
            RiskBucket::High
        } else if score >= MEDIUM_RISK_MIN {
            RiskBucket::Medium
        } else {
            RiskBucket::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBucket::High => "high",
            RiskBucket::Medium => "medium",
            RiskBucket::Low => "low",
        }
    }

    /// Badge text
    pub fn label(&self) -> &'static str {
        match self {
            RiskBucket::High => "High Risk",
            RiskBucket::Medium => "Medium Risk",
            RiskBucket::Low => "Low Risk",
        }
    }

    /// Dropdown option text, with the score range
    pub fn option_label(&self) -> &'static str {
        match self {
            RiskBucket::High => "High Risk (70+)",
            RiskBucket::Medium => "Medium Risk (30-69)",
            RiskBucket::Low => "Low Risk (0-29)",
        }
    }
}

impl FromStr for RiskBucket {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RiskBucket::all()
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("risk bucket", s))
    }
}

/// Filters for the transaction table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub query: TextQuery,
    pub status: EnumFilter<TransactionStatus>,
    pub risk: EnumFilter<RiskBucket>,
}

impl TransactionFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = TextQuery::new(query);
        self
    }

    pub fn with_status(mut self, status: EnumFilter<TransactionStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_risk(mut self, risk: EnumFilter<RiskBucket>) -> Self {
        self.risk = risk;
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.query.matches(transaction)
            && self.status.matches(&transaction.status)
            && self.risk.matches(&transaction.risk_bucket())
    }

    /// Matching transactions in their original order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        let shown: Vec<&Transaction> = transactions.iter().filter(|t| self.matches(t)).collect();
        log::debug!(
            "transaction filter {:?}/{:?}/{:?}: {} of {}",
            self.query.as_str(),
            self.status,
            self.risk,
            shown.len(),
            transactions.len()
        );
        shown
    }
}

/// Filters for the alerts panel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertFilter {
    pub query: TextQuery,
    pub severity: EnumFilter<Severity>,
    pub status: EnumFilter<AlertStatus>,
    pub alert_type: EnumFilter<AlertType>,
}

impl AlertFilter {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = TextQuery::new(query);
        self
    }

    pub fn with_severity(mut self, severity: EnumFilter<Severity>) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_status(mut self, status: EnumFilter<AlertStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_type(mut self, alert_type: EnumFilter<AlertType>) -> Self {
        self.alert_type = alert_type;
        self
    }

    pub fn matches(&self, alert: &Alert) -> bool {
        self.query.matches(alert)
            && self.severity.matches(&alert.severity)
            && self.status.matches(&alert.status)
            && self.alert_type.matches(&alert.alert_type)
    }

    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts.iter().filter(|a| self.matches(a)).collect()
    }
}
