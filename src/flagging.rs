//! Flag-transaction confirmation.
//!
//! `Idle -> Submitting -> Submitted -> Idle (closed)`. Submission is a fixed
//! artificial delay with no network call behind it, so it cannot fail. Both
//! delays race a [`CancellationToken`]; the owning view cancels it on teardown
//! and the workflow stops without touching the dialog again.

use crate::presentation::format_amount;
use crate::search::RiskBucket;
use crate::{DashboardConfig, Transaction, TransactionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub const CONFIRM_LABEL: &str = "Flag Transaction";
pub const SUBMITTING_LABEL: &str = "Flagging...";
pub const SUCCESS_MESSAGE: &str =
    "Our security team has been notified and will review this transaction within 24 hours.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlagPhase {
    Idle,
    Submitting,
    Submitted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("flag submission cancelled")]
    Cancelled,

    #[error("flag dialog is busy: {0:?}")]
    NotIdle(FlagPhase),

    #[error("flag dialog is closed")]
    Closed,
}

/// What a completed submission reported
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlagReport {
    pub report_id: Uuid,
    pub transaction_id: String,
    pub reasons: Vec<String>,
    pub notes: Option<String>,
    pub flagged_at: DateTime<Utc>,
}

/// Confirmation dialog for flagging one transaction
#[derive(Debug)]
pub struct FlagDialog {
    transaction: Transaction,
    reasons: Vec<String>,
    notes: String,
    open: bool,
    phase: watch::Sender<FlagPhase>,
    submit_delay: Duration,
    close_delay: Duration,
    last_report: Option<FlagReport>,
}

impl FlagDialog {
    /// Open the dialog for `transaction` with precomputed suspicion reasons
    pub fn open(transaction: Transaction, reasons: Vec<String>) -> Self {
        Self::open_with_config(transaction, reasons, &DashboardConfig::default())
    }

    pub fn open_with_config(
        transaction: Transaction,
        reasons: Vec<String>,
        config: &DashboardConfig,
    ) -> Self {
        let (phase, _) = watch::channel(FlagPhase::Idle);
        Self {
            transaction,
            reasons,
            notes: String::new(),
            open: true,
            phase,
            submit_delay: config.flag_submit_delay,
            close_delay: config.flag_close_delay,
            last_report: None,
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phase(&self) -> FlagPhase {
        *self.phase.borrow()
    }

    /// Watch phase changes
    pub fn subscribe(&self) -> watch::Receiver<FlagPhase> {
        self.phase.subscribe()
    }

    pub fn last_report(&self) -> Option<&FlagReport> {
        self.last_report.as_ref()
    }

    /// Text of the confirm button for the current phase
    pub fn confirm_label(&self) -> &'static str {
        match self.phase() {
            FlagPhase::Submitting => SUBMITTING_LABEL,
            FlagPhase::Idle | FlagPhase::Submitted => CONFIRM_LABEL,
        }
    }

    fn set_phase(&mut self, phase: FlagPhase) {
        self.phase.send_replace(phase);
    }

    async fn wait(delay: Duration, cancel: &CancellationToken) -> Result<(), FlagError> {
        tokio::select! {
            () = cancel.cancelled() => Err(FlagError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }

    /// Submit the flag, show the success state, then close.
    ///
    /// Returns once the dialog has closed itself. On cancellation the dialog
    /// is left exactly as it was when the token fired.
    pub async fn confirm(&mut self, cancel: &CancellationToken) -> Result<FlagReport, FlagError> {
        if !self.open {
            return Err(FlagError::Closed);
        }
        let phase = self.phase();
        if phase != FlagPhase::Idle {
            return Err(FlagError::NotIdle(phase));
        }

        self.set_phase(FlagPhase::Submitting);
        log::info!("flagging transaction {}", self.transaction.id);
        Self::wait(self.submit_delay, cancel).await?;

        let notes = self.notes.trim();
        let report = FlagReport {
            report_id: Uuid::new_v4(),
            transaction_id: self.transaction.id.clone(),
            reasons: self.reasons.clone(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            flagged_at: Utc::now(),
        };
        self.last_report = Some(report.clone());
        self.set_phase(FlagPhase::Submitted);
        log::info!(
            "transaction {} flagged as report {}",
            report.transaction_id,
            report.report_id
        );

        Self::wait(self.close_delay, cancel).await?;
        self.dismiss();
        Ok(report)
    }

    /// Close without submitting; clears notes and any success state
    pub fn dismiss(&mut self) {
        self.open = false;
        self.notes.clear();
        self.set_phase(FlagPhase::Idle);
    }
}

/// Reasons derived from the record itself, for callers without a
/// precomputed list
pub fn suspicion_reasons(transaction: &Transaction) -> Vec<String> {
    let mut reasons = Vec::new();

    if transaction.risk_bucket() == RiskBucket::High {
        reasons.push(format!(
            "Risk score {} is in the high-risk band",
            transaction.risk_score
        ));
    }

    match transaction.status {
        TransactionStatus::Flagged | TransactionStatus::Blocked => {
            reasons.push(format!("Transaction is already {}", transaction.status));
        }
        TransactionStatus::Completed | TransactionStatus::Pending => {}
    }

    if transaction.amount >= 1000.0 {
        reasons.push(format!(
            "Amount {} is above the review threshold",
            format_amount(transaction.amount)
        ));
    }

    reasons
}
