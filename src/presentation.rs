//! Display mappings: badges, labels, and amount/time formatting.
//!
//! Every mapping is an exhaustive `match`, so adding a status or severity
//! variant fails to compile until it has a badge.

use crate::aggregates::count_where;
use crate::alerts::{Alert, AlertStatus, Severity};
use crate::search::RiskBucket;
use crate::TransactionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Badge style understood by the renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
    Destructive,
}

/// Highlight drawn around a badge
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Glow {
    #[default]
    None,
    Red,
    Green,
    Blue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub text: String,
    pub variant: BadgeVariant,
    pub glow: Glow,
}

impl Badge {
    fn new(text: impl Into<String>, variant: BadgeVariant, glow: Glow) -> Self {
        Self {
            text: text.into(),
            variant,
            glow,
        }
    }
}

pub fn transaction_status_badge(status: TransactionStatus) -> Badge {
    let (variant, glow) = match status {
        TransactionStatus::Completed => (BadgeVariant::Secondary, Glow::None),
        TransactionStatus::Pending => (BadgeVariant::Outline, Glow::None),
        TransactionStatus::Flagged | TransactionStatus::Blocked => {
            (BadgeVariant::Destructive, Glow::Red)
        }
    };
    Badge::new(status.label(), variant, glow)
}

pub fn severity_badge(severity: Severity) -> Badge {
    let variant = match severity {
        Severity::Critical | Severity::High => BadgeVariant::Destructive,
        Severity::Medium => BadgeVariant::Outline,
        Severity::Low => BadgeVariant::Secondary,
    };
    let glow = if severity.is_elevated() {
        Glow::Red
    } else {
        Glow::None
    };
    Badge::new(severity.label(), variant, glow)
}

pub fn alert_status_badge(status: AlertStatus) -> Badge {
    let (variant, glow) = match status {
        AlertStatus::Active => (BadgeVariant::Destructive, Glow::Red),
        AlertStatus::Acknowledged => (BadgeVariant::Outline, Glow::None),
        AlertStatus::Resolved => (BadgeVariant::Secondary, Glow::Green),
        AlertStatus::Dismissed => (BadgeVariant::Secondary, Glow::None),
    };
    Badge::new(status.label(), variant, glow)
}

pub fn risk_badge(score: u8) -> Badge {
    let bucket = RiskBucket::of(score);
    let (variant, glow) = match bucket {
        RiskBucket::High => (BadgeVariant::Destructive, Glow::Red),
        RiskBucket::Medium => (BadgeVariant::Outline, Glow::None),
        RiskBucket::Low => (BadgeVariant::Secondary, Glow::Green),
    };
    Badge::new(bucket.label(), variant, glow)
}

/// Clamp a 0-100 indicator for display
pub fn clamp_percent(value: u8) -> u8 {
    value.min(100)
}

/// Upper-case the first character, leave the rest as is
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(mut whole: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if whole < 1000 {
            groups.push(whole.to_string());
            break;
        }
        groups.push(format!("{:03}", whole % 1000));
        whole /= 1000;
    }
    groups.reverse();
    groups.join(",")
}

fn split_cents(amount: f64) -> (bool, u64, u64) {
    let cents = (amount.abs() * 100.0).round() as u64;
    (amount < 0.0 && cents > 0, cents / 100, cents % 100)
}

/// `$2,847.99`, `$4,200`, `$890.5`: grouped, up to two fraction digits,
/// trailing zeros dropped
pub fn format_amount(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    let fraction = if cents == 0 {
        String::new()
    } else if cents % 10 == 0 {
        format!(".{}", cents / 10)
    } else {
        format!(".{cents:02}")
    };
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}{fraction}", group_thousands(whole))
}

/// `$4,200.00`: grouped, always two fraction digits
pub fn format_currency(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    let sign = if negative { "-" } else { "" };
    format!("{sign}${}.{cents:02}", group_thousands(whole))
}

/// "N minutes ago" under an hour, "N hours ago" under a day, else "N days ago".
///
/// Timestamps that do not parse as RFC 3339 come back unchanged.
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(at) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let elapsed_ms = (now - at.with_timezone(&Utc)).num_milliseconds();
    let minutes = elapsed_ms.div_euclid(60_000);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);

    if minutes < 60 {
        format!("{minutes} minutes ago")
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else {
        format!("{days} days ago")
    }
}

/// Navigation tabs
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Dashboard,
    Transactions,
    Alerts,
    Reports,
    Settings,
}

impl Tab {
    pub const fn all() -> [Tab; 5] {
        [
            Tab::Dashboard,
            Tab::Transactions,
            Tab::Alerts,
            Tab::Reports,
            Tab::Settings,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Transactions => "transactions",
            Tab::Alerts => "alerts",
            Tab::Reports => "reports",
            Tab::Settings => "settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Transactions => "Transactions",
            Tab::Alerts => "Alerts",
            Tab::Reports => "Reports",
            Tab::Settings => "Settings",
        }
    }

    /// Unknown ids fall back to the dashboard
    pub fn from_id(id: &str) -> Tab {
        Tab::all()
            .into_iter()
            .find(|tab| tab.id() == id)
            .unwrap_or_default()
    }

    /// Count shown next to the tab label; only the alerts tab has one
    pub fn badge(&self, alerts: &[Alert]) -> Option<usize> {
        match self {
            Tab::Alerts => Some(count_where(alerts, Alert::is_active)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

/// Headline metric card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub trend: Trend,
}

impl StatCard {
    pub fn new(title: &str, value: &str, change: &str, trend: Trend) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            trend,
        }
    }

    pub fn caption(&self) -> String {
        format!("{} from last month", self.change)
    }
}

/// One entry of the home tab's recent-alert strip
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentAlert {
    pub id: String,
    pub kind: String,
    pub amount: String,
    pub user: String,
    pub time: String,
    pub risk: Severity,
}

impl RecentAlert {
    pub fn new(
        id: &str,
        kind: &str,
        amount: &str,
        user: &str,
        time: &str,
        risk: Severity,
    ) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            amount: amount.to_string(),
            user: user.to_string(),
            time: time.to_string(),
            risk,
        }
    }

    pub fn badge(&self) -> Badge {
        if self.risk == Severity::High {
            Badge::new("High Risk", BadgeVariant::Destructive, Glow::Red)
        } else {
            Badge::new(
                format!("{} Risk", self.risk.label()),
                BadgeVariant::Secondary,
                Glow::None,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::mock_alerts;
    use chrono::TimeZone;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2847.99), "$2,847.99");
        assert_eq!(format_amount(4200.0), "$4,200");
        assert_eq!(format_amount(890.5), "$890.5");
        assert_eq!(format_amount(0.0), "$0");
        assert_eq!(format_amount(1_234_567.1), "$1,234,567.1");
        assert_eq!(format_amount(-5.0), "-$5");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(4200.0), "$4,200.00");
        assert_eq!(format_currency(156.5), "$156.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(format_relative("2024-01-15T11:45:00Z", now), "15 minutes ago");
        assert_eq!(format_relative("2024-01-15T09:15:00Z", now), "2 hours ago");
        assert_eq!(format_relative("2024-01-14T11:00:00Z", now), "1 days ago");
        assert_eq!(format_relative("2024-01-15T11:00:00Z", now), "1 hours ago");
        assert_eq!(format_relative("yesterday", now), "yesterday");
    }

    #[test]
    fn test_badges() {
        let flagged = transaction_status_badge(TransactionStatus::Flagged);
        assert_eq!(flagged.variant, BadgeVariant::Destructive);
        assert_eq!(flagged.text, "Flagged");
        assert_eq!(flagged.glow, Glow::Red);
        assert_eq!(transaction_status_badge(TransactionStatus::Pending).glow, Glow::None);

        assert_eq!(severity_badge(Severity::Critical).glow, Glow::Red);
        assert_eq!(severity_badge(Severity::Medium).variant, BadgeVariant::Outline);
        assert_eq!(alert_status_badge(AlertStatus::Resolved).glow, Glow::Green);
        assert_eq!(alert_status_badge(AlertStatus::Dismissed).glow, Glow::None);

        assert_eq!(risk_badge(70).text, "High Risk");
        assert_eq!(risk_badge(30).text, "Medium Risk");
        assert_eq!(risk_badge(29).text, "Low Risk");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("acknowledged"), "Acknowledged");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_clamp_percent() {
        assert_eq!(clamp_percent(92), 92);
        assert_eq!(clamp_percent(140), 100);
    }

    #[test]
    fn test_tabs() {
        assert_eq!(Tab::from_id("alerts"), Tab::Alerts);
        assert_eq!(Tab::from_id("nowhere"), Tab::Dashboard);
        let alerts = mock_alerts();
        assert_eq!(Tab::Alerts.badge(&alerts), Some(2));
        assert_eq!(Tab::Reports.badge(&alerts), None);
    }

    #[test]
    fn test_recent_alert_badge() {
        let high = RecentAlert::new("A", "k", "$1", "u", "now", Severity::High);
        assert_eq!(high.badge().variant, BadgeVariant::Destructive);
        let medium = RecentAlert::new("B", "k", "$1", "u", "now", Severity::Medium);
        assert_eq!(medium.badge().text, "Medium Risk");
    }
}
