//! Hard-coded records the dashboard renders. Built fresh on each call and never
//! mutated afterwards.

use crate::alerts::{Alert, AlertStatus, AlertType, Severity};
use crate::presentation::{RecentAlert, StatCard, Trend};
use crate::{Transaction, TransactionStatus};

#[allow(clippy::too_many_arguments)]
fn transaction(
    id: &str,
    amount: f64,
    user: &str,
    location: &str,
    merchant: &str,
    date: &str,
    status: TransactionStatus,
    risk_score: u8,
    category: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        user: user.to_string(),
        location: location.to_string(),
        merchant: merchant.to_string(),
        date: date.to_string(),
        status,
        risk_score,
        category: category.to_string(),
    }
}

/// Transactions shown on the transactions tab, in display order
pub fn mock_transactions() -> Vec<Transaction> {
    vec![
        transaction(
            "TXN-001",
            2847.99,
            "john.doe@email.com",
            "Lagos, Nigeria",
            "UNKNOWN MERCHANT LLC",
            "2024-01-15 03:47",
            TransactionStatus::Flagged,
            95,
            "Online Purchase",
        ),
        transaction(
            "TXN-002",
            156.5,
            "jane.smith@email.com",
            "New York, USA",
            "Amazon.com",
            "2024-01-15 14:22",
            TransactionStatus::Completed,
            12,
            "E-commerce",
        ),
        transaction(
            "TXN-003",
            4200.0,
            "mike.wilson@email.com",
            "London, UK",
            "Crypto Exchange Pro",
            "2024-01-15 09:15",
            TransactionStatus::Blocked,
            88,
            "Cryptocurrency",
        ),
        transaction(
            "TXN-004",
            89.99,
            "sarah.johnson@email.com",
            "Toronto, Canada",
            "Netflix Inc.",
            "2024-01-15 16:30",
            TransactionStatus::Completed,
            5,
            "Subscription",
        ),
        transaction(
            "TXN-005",
            1250.0,
            "alex.brown@email.com",
            "Sydney, Australia",
            "Electronics Store XYZ",
            "2024-01-15 11:45",
            TransactionStatus::Pending,
            34,
            "Electronics",
        ),
    ]
}

struct AlertSeed {
    id: &'static str,
    alert_type: AlertType,
    severity: Severity,
    status: AlertStatus,
    transaction_id: &'static str,
    amount: f64,
    user: &'static str,
    location: &'static str,
    merchant: &'static str,
    timestamp: &'static str,
    description: &'static str,
    risk_score: u8,
    ai_confidence: u8,
}

impl From<AlertSeed> for Alert {
    fn from(seed: AlertSeed) -> Self {
        Alert {
            id: seed.id.to_string(),
            alert_type: seed.alert_type,
            severity: seed.severity,
            status: seed.status,
            transaction_id: seed.transaction_id.to_string(),
            amount: seed.amount,
            user: seed.user.to_string(),
            location: seed.location.to_string(),
            merchant: seed.merchant.to_string(),
            timestamp: seed.timestamp.to_string(),
            description: seed.description.to_string(),
            risk_score: seed.risk_score,
            ai_confidence: seed.ai_confidence,
        }
    }
}

/// Alerts shown on the alerts tab, in display order
pub fn mock_alerts() -> Vec<Alert> {
    let seeds = [
        AlertSeed {
            id: "ALT-001",
            alert_type: AlertType::HighRiskTransaction,
            severity: Severity::Critical,
            status: AlertStatus::Active,
            transaction_id: "TXN-001",
            amount: 2847.99,
            user: "john.doe@email.com",
            location: "Lagos, Nigeria",
            merchant: "UNKNOWN MERCHANT LLC",
            timestamp: "2024-01-15T03:47:00Z",
            description: "Transaction amount significantly exceeds user's typical spending pattern and originates from high-risk location",
            risk_score: 95,
            ai_confidence: 92,
        },
        AlertSeed {
            id: "ALT-002",
            alert_type: AlertType::UnusualLocation,
            severity: Severity::High,
            status: AlertStatus::Active,
            transaction_id: "TXN-003",
            amount: 4200.0,
            user: "mike.wilson@email.com",
            location: "London, UK",
            merchant: "Crypto Exchange Pro",
            timestamp: "2024-01-15T09:15:00Z",
            description: "User typically transacts from North America, this transaction originates from Europe",
            risk_score: 88,
            ai_confidence: 85,
        },
        AlertSeed {
            id: "ALT-003",
            alert_type: AlertType::VelocityCheck,
            severity: Severity::Medium,
            status: AlertStatus::Acknowledged,
            transaction_id: "TXN-005",
            amount: 1250.0,
            user: "alex.brown@email.com",
            location: "Sydney, Australia",
            merchant: "Electronics Store XYZ",
            timestamp: "2024-01-15T11:45:00Z",
            description: "Multiple high-value transactions detected within short time window",
            risk_score: 67,
            ai_confidence: 78,
        },
        AlertSeed {
            id: "ALT-004",
            alert_type: AlertType::MerchantRisk,
            severity: Severity::High,
            status: AlertStatus::Resolved,
            transaction_id: "TXN-007",
            amount: 890.5,
            user: "emma.davis@email.com",
            location: "Miami, USA",
            merchant: "SUSPICIOUS VENDOR INC",
            timestamp: "2024-01-14T22:30:00Z",
            description: "Merchant flagged in fraud database with multiple reported incidents",
            risk_score: 82,
            ai_confidence: 94,
        },
        AlertSeed {
            id: "ALT-005",
            alert_type: AlertType::PatternAnomaly,
            severity: Severity::Medium,
            status: AlertStatus::Dismissed,
            transaction_id: "TXN-009",
            amount: 156.99,
            user: "david.kim@email.com",
            location: "Seoul, South Korea",
            merchant: "Gaming Platform Pro",
            timestamp: "2024-01-14T18:20:00Z",
            description: "Unusual transaction pattern detected based on user behavior analysis",
            risk_score: 45,
            ai_confidence: 71,
        },
    ];
    seeds.into_iter().map(Alert::from).collect()
}

/// Headline cards on the home tab
pub fn dashboard_stats() -> Vec<StatCard> {
    vec![
        StatCard::new("Total Transactions", "12,847", "+12.5%", Trend::Up),
        StatCard::new("Suspicious Transactions", "23", "-8.2%", Trend::Down),
        StatCard::new("Alerts Today", "7", "+2", Trend::Up),
        StatCard::new("Active Users", "1,429", "+5.1%", Trend::Up),
    ]
}

/// Recent-alert strip on the home tab. Pre-formatted; not derived from
/// [`mock_alerts`].
pub fn recent_alerts() -> Vec<RecentAlert> {
    vec![
        RecentAlert::new(
            "ALT-001",
            "High Risk Transaction",
            "$2,847.99",
            "john.doe@email.com",
            "2 minutes ago",
            Severity::High,
        ),
        RecentAlert::new(
            "ALT-002",
            "Unusual Location",
            "$156.50",
            "jane.smith@email.com",
            "15 minutes ago",
            Severity::Medium,
        ),
        RecentAlert::new(
            "ALT-003",
            "Velocity Check Failed",
            "$4,200.00",
            "mike.wilson@email.com",
            "1 hour ago",
            Severity::High,
        ),
    ]
}
