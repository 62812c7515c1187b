//! Security alerts raised against transactions, and the actions an analyst can
//! request on them.

use crate::ParseEnumError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Alert category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    HighRiskTransaction,
    UnusualLocation,
    VelocityCheck,
    MerchantRisk,
    PatternAnomaly,
}

impl AlertType {
    pub const fn all() -> [AlertType; 5] {
        [
            AlertType::HighRiskTransaction,
            AlertType::UnusualLocation,
            AlertType::VelocityCheck,
            AlertType::MerchantRisk,
            AlertType::PatternAnomaly,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::HighRiskTransaction => "high_risk_transaction",
            AlertType::UnusualLocation => "unusual_location",
            AlertType::VelocityCheck => "velocity_check",
            AlertType::MerchantRisk => "merchant_risk",
            AlertType::PatternAnomaly => "pattern_anomaly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertType::HighRiskTransaction => "High Risk Transaction",
            AlertType::UnusualLocation => "Unusual Location",
            AlertType::VelocityCheck => "Velocity Check",
            AlertType::MerchantRisk => "Merchant Risk",
            AlertType::PatternAnomaly => "Pattern Anomaly",
        }
    }

    /// Icon name the renderer looks up for this alert type
    pub fn icon(&self) -> &'static str {
        match self {
            AlertType::HighRiskTransaction => "credit-card",
            AlertType::UnusualLocation => "map-pin",
            AlertType::VelocityCheck => "trending-up",
            AlertType::MerchantRisk => "shield",
            AlertType::PatternAnomaly => "alert-circle",
        }
    }
}

/// Alert severity, most severe first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const fn all() -> [Severity; 4] {
        [Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    /// Critical and high alerts get the destructive treatment
    pub fn is_elevated(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }
}

/// Where an alert sits in analyst triage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
    Dismissed,
}

impl AlertStatus {
    pub const fn all() -> [AlertStatus; 4] {
        [
            AlertStatus::Active,
            AlertStatus::Acknowledged,
            AlertStatus::Resolved,
            AlertStatus::Dismissed,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Acknowledged => "acknowledged",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Dismissed => "dismissed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::Active => "Active",
            AlertStatus::Acknowledged => "Acknowledged",
            AlertStatus::Resolved => "Resolved",
            AlertStatus::Dismissed => "Dismissed",
        }
    }
}

macro_rules! impl_wire_name {
    ($ty:ty, $kind:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::all()
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ParseEnumError::new($kind, s))
            }
        }
    };
}

impl_wire_name!(AlertType, "alert type");
impl_wire_name!(Severity, "severity");
impl_wire_name!(AlertStatus, "alert status");

/// A fraud alert tied to a transaction.
///
/// `transaction_id` is a loose reference; nothing checks that the transaction
/// exists. `timestamp` is ISO-8601 text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub status: AlertStatus,
    pub transaction_id: String,
    pub amount: f64,
    pub user: String,
    pub location: String,
    pub merchant: String,
    pub timestamp: String,
    pub description: String,
    pub risk_score: u8,
    pub ai_confidence: u8,
}

impl Alert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    /// Actions offered on this alert's card
    pub fn available_actions(&self) -> Vec<AlertAction> {
        if self.is_active() {
            vec![AlertAction::View, AlertAction::Acknowledge, AlertAction::Dismiss]
        } else {
            vec![AlertAction::View]
        }
    }
}

/// Analyst action on an alert card
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertAction {
    View,
    Acknowledge,
    Dismiss,
}

impl AlertAction {
    pub fn label(&self) -> &'static str {
        match self {
            AlertAction::View => "View",
            AlertAction::Acknowledge => "Acknowledge",
            AlertAction::Dismiss => "Dismiss",
        }
    }
}

/// Record of a requested action. The alert itself is left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertActionRequest {
    pub alert_id: String,
    pub action: AlertAction,
    /// False when the action is not offered for the alert's status
    pub accepted: bool,
}

/// Request an action on an alert.
///
/// Only logs the request; fixtures have no lifecycle to advance.
pub fn handle_action(alert: &Alert, action: AlertAction) -> AlertActionRequest {
    let accepted = alert.available_actions().contains(&action);
    if accepted {
        log::info!("alert {} action: {}", alert.id, action.label());
    } else {
        log::warn!(
            "alert {} action {} not offered for status {}",
            alert.id,
            action.label(),
            alert.status
        );
    }
    AlertActionRequest {
        alert_id: alert.id.clone(),
        action,
        accepted,
    }
}
