//! Per-view UI state.
//!
//! Each view owns its filter selections and the records it renders, and turns
//! them into view models on demand. There is no shared mutable state between
//! views.

use crate::aggregates::{AlertSummary, TransactionSummary};
use crate::alerts::{Alert, AlertAction, AlertStatus, AlertType, Severity};
use crate::fixtures::{dashboard_stats, mock_alerts, mock_transactions, recent_alerts};
use crate::flagging::{suspicion_reasons, FlagDialog};
use crate::presentation::{
    alert_status_badge, clamp_percent, format_amount, format_relative, risk_badge, severity_badge,
    transaction_status_badge, Badge, RecentAlert, StatCard, Tab,
};
use crate::search::{AlertFilter, EnumFilter, RiskBucket, TextQuery, TransactionFilter};
use crate::{DashboardConfig, Transaction, TransactionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NO_ALERTS_MESSAGE: &str = "No alerts found";

/// One rendered row of the transaction table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRow {
    pub id: String,
    pub amount: String,
    pub user: String,
    pub merchant: String,
    pub location: String,
    pub date: String,
    pub status: Badge,
    pub risk_score: u8,
    pub risk: Badge,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            amount: format_amount(tx.amount),
            user: tx.user.clone(),
            merchant: tx.merchant.clone(),
            location: tx.location.clone(),
            date: tx.date.clone(),
            status: transaction_status_badge(tx.status),
            risk_score: clamp_percent(tx.risk_score),
            risk: risk_badge(tx.risk_score),
        }
    }
}

/// State of the transactions tab
#[derive(Debug, Clone)]
pub struct TransactionTableState {
    transactions: Vec<Transaction>,
    filter: TransactionFilter,
}

impl Default for TransactionTableState {
    fn default() -> Self {
        Self::new(mock_transactions())
    }
}

impl TransactionTableState {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            filter: TransactionFilter::default(),
        }
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = TextQuery::new(query);
    }

    pub fn set_status(&mut self, status: EnumFilter<TransactionStatus>) {
        self.filter.status = status;
    }

    pub fn set_risk(&mut self, risk: EnumFilter<RiskBucket>) {
        self.filter.risk = risk;
    }

    pub fn visible(&self) -> Vec<&Transaction> {
        self.filter.apply(&self.transactions)
    }

    pub fn rows(&self) -> Vec<TransactionRow> {
        self.visible().into_iter().map(TransactionRow::from).collect()
    }

    pub fn summary(&self) -> TransactionSummary {
        TransactionSummary {
            shown: self.visible().len(),
            total: self.transactions.len(),
        }
    }

    /// "Showing N of M transactions"
    pub fn caption(&self) -> String {
        self.summary().caption()
    }

    /// Open the flag dialog for a transaction, if it exists
    pub fn open_flag_dialog(&self, id: &str, config: &DashboardConfig) -> Option<FlagDialog> {
        let tx = self.transactions.iter().find(|t| t.id == id)?;
        let reasons = suspicion_reasons(tx);
        Some(FlagDialog::open_with_config(tx.clone(), reasons, config))
    }
}

/// One rendered alert card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertCard {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub severity: Badge,
    pub status: Badge,
    pub description: String,
    pub transaction_id: String,
    pub amount: String,
    pub user: String,
    pub location: String,
    pub merchant: String,
    pub risk_score: u8,
    pub ai_confidence: String,
    pub when: String,
    pub actions: Vec<AlertAction>,
}

impl AlertCard {
    pub fn from_alert(alert: &Alert, now: DateTime<Utc>) -> Self {
        Self {
            id: alert.id.clone(),
            title: alert.alert_type.label().to_string(),
            icon: alert.alert_type.icon().to_string(),
            severity: severity_badge(alert.severity),
            status: alert_status_badge(alert.status),
            description: alert.description.clone(),
            transaction_id: alert.transaction_id.clone(),
            amount: format_amount(alert.amount),
            user: alert.user.clone(),
            location: alert.location.clone(),
            merchant: alert.merchant.clone(),
            risk_score: clamp_percent(alert.risk_score),
            ai_confidence: format!("{}%", clamp_percent(alert.ai_confidence)),
            when: format_relative(&alert.timestamp, now),
            actions: alert.available_actions(),
        }
    }
}

/// State of the alerts tab
#[derive(Debug, Clone)]
pub struct AlertsPanelState {
    alerts: Vec<Alert>,
    filter: AlertFilter,
}

impl Default for AlertsPanelState {
    fn default() -> Self {
        Self::new(mock_alerts())
    }
}

impl AlertsPanelState {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self {
            alerts,
            filter: AlertFilter::default(),
        }
    }

    pub fn filter(&self) -> &AlertFilter {
        &self.filter
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = TextQuery::new(query);
    }

    pub fn set_severity(&mut self, severity: EnumFilter<Severity>) {
        self.filter.severity = severity;
    }

    pub fn set_status(&mut self, status: EnumFilter<AlertStatus>) {
        self.filter.status = status;
    }

    pub fn set_type(&mut self, alert_type: EnumFilter<AlertType>) {
        self.filter.alert_type = alert_type;
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn visible(&self) -> Vec<&Alert> {
        self.filter.apply(&self.alerts)
    }

    pub fn cards(&self, now: DateTime<Utc>) -> Vec<AlertCard> {
        self.visible()
            .into_iter()
            .map(|a| AlertCard::from_alert(a, now))
            .collect()
    }

    /// Counters ignore the current filters
    pub fn summary(&self) -> AlertSummary {
        AlertSummary::from_alerts(&self.alerts)
    }

    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// Placeholder text when no alert passes the filters
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(NO_ALERTS_MESSAGE)
    }
}

/// Home tab content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardHome {
    pub stats: Vec<StatCard>,
    pub recent_alerts: Vec<RecentAlert>,
}

impl Default for DashboardHome {
    fn default() -> Self {
        Self {
            stats: dashboard_stats(),
            recent_alerts: recent_alerts(),
        }
    }
}

impl DashboardHome {
    /// Tab strip with badge counts taken from `alerts`
    pub fn tabs(alerts: &[Alert]) -> Vec<(Tab, Option<usize>)> {
        Tab::all()
            .into_iter()
            .map(|tab| (tab, tab.badge(alerts)))
            .collect()
    }
}
