//! Dashboard tour
//!
//! Walks through each tab: stats, filtered transactions, alert cards, a CSV
//! import and a flag submission. Run with `RUST_LOG=info` to see the log lines.

use chrono::Utc;
use fraud_dashboard_core::alerts::handle_action;
use fraud_dashboard_core::presentation::format_amount;
use fraud_dashboard_core::{
    AlertAction, AlertStatus, AlertsPanelState, DashboardConfig, DashboardHome, EnumFilter,
    ImportSession, RiskBucket, Settings, TransactionTableState,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    println!("=== Fraud Dashboard Tour ===\n");

    // Home
    println!("1. Dashboard");
    let home = DashboardHome::default();
    for card in &home.stats {
        println!("   {:<24} {:>8}  ({})", card.title, card.value, card.caption());
    }
    for alert in &home.recent_alerts {
        println!("   {} {} {} [{}]", alert.id, alert.kind, alert.amount, alert.badge().text);
    }
    println!();

    // Transactions
    println!("2. High-risk transactions");
    let mut table = TransactionTableState::default();
    table.set_risk(EnumFilter::Only(RiskBucket::High));
    for row in table.rows() {
        println!(
            "   {} {:>10} {:<28} {} / {}",
            row.id, row.amount, row.user, row.status.text, row.risk.text
        );
    }
    println!("   {}", table.caption());
    println!();

    // Alerts
    println!("3. Active alerts");
    let mut panel = AlertsPanelState::default();
    panel.set_status(EnumFilter::Only(AlertStatus::Active));
    let summary = panel.summary();
    println!(
        "   active: {}, critical: {}, high: {}",
        summary.active, summary.critical, summary.high
    );
    for card in panel.cards(Utc::now()) {
        println!("   {} {} ({}) {}", card.id, card.title, card.severity.text, card.when);
    }
    if let Some(alert) = panel.alerts().first() {
        let request = handle_action(alert, AlertAction::Acknowledge);
        println!("   acknowledge {} accepted: {}", request.alert_id, request.accepted);
    }
    println!();

    // Import
    println!("4. CSV import");
    let mut session = ImportSession::new();
    let download = session.template();
    let uploads = [
        (download.file_name.as_str(), download.mime_type.as_str(), download.contents.clone()),
        (
            "batch.csv",
            "text/csv",
            "id,amount,user,location,merchant,date,category\n\
             TXN-100,-5,a@b.com,Paris,Shop,2024-01-01,Retail\n\
             TXN-101,42.5,not-an-email,Oslo,Cafe,,\n\
             TXN-001,9.99,dup@example.com,Rome,Deli,2024-01-02,Food"
                .to_string(),
        ),
        ("notes.txt", "text/plain", "hello".to_string()),
    ];
    for (name, mime_type, text) in &uploads {
        match session.process_file(name, mime_type, text) {
            Ok(file) => {
                println!(
                    "   {}: {:?}, {} valid, {} invalid",
                    file.name,
                    file.status,
                    file.valid_count(),
                    file.invalid_count()
                );
                for row in file.transactions.iter().filter(|r| !r.is_valid()) {
                    if let Some(issue) = row.error {
                        println!("     {} -> {}", row.id, issue);
                    }
                }
            }
            Err(err) => println!("   {name}: {err}"),
        }
    }
    let imported = session.import();
    println!("   imported {} transaction(s)", imported.len());
    println!();

    // Flagging
    println!("5. Flag a transaction");
    let config = DashboardConfig {
        flag_submit_delay: Duration::from_millis(150),
        flag_close_delay: Duration::from_millis(200),
        ..DashboardConfig::default()
    };
    let table = TransactionTableState::default();
    if let Some(mut dialog) = table.open_flag_dialog("TXN-001", &config) {
        println!(
            "   {} {}",
            dialog.transaction().id,
            format_amount(dialog.transaction().amount)
        );
        for reason in dialog.reasons() {
            println!("   - {reason}");
        }
        dialog.set_notes("Cardholder denies purchase");
        match dialog.confirm(&CancellationToken::new()).await {
            Ok(report) => println!("   report {} filed", report.report_id),
            Err(err) => println!("   flag failed: {err}"),
        }
    }
    println!();

    // Settings
    println!("6. Settings");
    let mut settings = Settings::default();
    settings.risk_threshold = 80;
    match settings.save() {
        Ok(json) => println!("   saved {} bytes", json.len()),
        Err(err) => println!("   invalid settings: {err}"),
    }
}
