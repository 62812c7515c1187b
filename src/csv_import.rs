//! CSV transaction import.
//!
//! Naive comma splitting: no quoting or escaping, so a comma or newline inside
//! a field value misparses. The first non-blank line is the header row and
//! must name every column in [`REQUIRED_HEADERS`]; otherwise the whole file is
//! rejected and no rows are parsed. Row problems never abort a file: the row is
//! kept and marked invalid with a reason.

use crate::{DashboardConfig, Transaction, TransactionStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

/// Columns every import file must declare, in reporting order
pub const REQUIRED_HEADERS: [&str; 7] = [
    "id", "amount", "user", "location", "merchant", "date", "category",
];

/// Template offered for download
pub const TEMPLATE_CSV: &str = "id,amount,user,location,merchant,date,category\n\
TXN-001,100.50,user@example.com,New York USA,Sample Store,2024-01-15 10:30,Shopping\n";

pub const TEMPLATE_FILE_NAME: &str = "transaction_template.csv";
pub const TEMPLATE_MIME_TYPE: &str = "text/csv";

/// Leading numeric prefix, the way loose numeric coercion reads `"12abc"` as 12
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("pattern is valid")
});

/// File-level import failures
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportError {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unsupported file type: {name} ({mime_type})")]
    UnsupportedFile { name: String, mime_type: String },

    #[error("No file named {0} is being processed")]
    UnknownFile(String),
}

/// Why a row is not importable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowIssue {
    InvalidAmount,
    InvalidEmail,
    DuplicateId,
}

impl RowIssue {
    pub fn message(&self) -> &'static str {
        match self {
            RowIssue::InvalidAmount => "Invalid amount",
            RowIssue::InvalidEmail => "Invalid email format",
            RowIssue::DuplicateId => "Duplicate transaction ID",
        }
    }
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Valid,
    Invalid,
    Duplicate,
}

/// One parsed data row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportedTransaction {
    pub id: String,
    pub amount: f64,
    pub user: String,
    pub location: String,
    pub merchant: String,
    pub date: String,
    pub category: String,
    pub status: RowStatus,
    /// Last issue recorded for the row. Later checks overwrite earlier ones.
    pub error: Option<RowIssue>,
}

impl ImportedTransaction {
    pub fn is_valid(&self) -> bool {
        self.status == RowStatus::Valid
    }

    fn mark(&mut self, status: RowStatus, issue: RowIssue) {
        self.status = status;
        self.error = Some(issue);
    }

    /// Promote to a monitored transaction. Imports enter as pending with no score.
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: self.id,
            amount: self.amount,
            user: self.user,
            location: self.location,
            merchant: self.merchant,
            date: self.date,
            status: TransactionStatus::Pending,
            risk_score: 0,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Processing,
    Completed,
    Error,
}

/// Per-file import record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub size: usize,
    pub mime_type: String,
    pub transactions: Vec<ImportedTransaction>,
    pub status: FileStatus,
    pub errors: Vec<String>,
}

impl UploadedFile {
    pub fn valid_count(&self) -> usize {
        self.transactions.iter().filter(|t| t.is_valid()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.transactions.len() - self.valid_count()
    }
}

/// The template as a download
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateDownload {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

pub fn template() -> TemplateDownload {
    template_named(TEMPLATE_FILE_NAME)
}

/// The template offered under `file_name`
pub fn template_named(file_name: &str) -> TemplateDownload {
    TemplateDownload {
        file_name: file_name.to_string(),
        mime_type: TEMPLATE_MIME_TYPE.to_string(),
        contents: TEMPLATE_CSV.to_string(),
    }
}

/// Read a leading decimal number; anything unreadable becomes 0
pub fn coerce_amount(raw: &str) -> f64 {
    LEADING_NUMBER
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn field<'a>(headers: &[String], values: &[&'a str], name: &str) -> &'a str {
    headers
        .iter()
        .position(|h| h == name)
        .and_then(|i| values.get(i).copied())
        .unwrap_or("")
}

fn or_else(value: &str, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        fallback()
    } else {
        value.to_string()
    }
}

/// Parse and validate CSV text. `now` supplies placeholder ids and dates.
///
/// Both row checks always run, amount first and email second, so a row that
/// fails both reports the email problem.
pub fn parse_transactions(
    text: &str,
    now: DateTime<Utc>,
) -> Result<Vec<ImportedTransaction>, ImportError> {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = lines
        .next()
        .map(|line| line.split(',').map(|h| h.trim().to_lowercase()).collect())
        .unwrap_or_default();

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let millis = now.timestamp_millis();
    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let line_index = index + 1;
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        let get = |name: &str| field(&headers, &values, name);

        let mut row = ImportedTransaction {
            id: or_else(get("id"), || format!("TXN-{millis}-{line_index}")),
            amount: coerce_amount(get("amount")),
            user: get("user").to_string(),
            location: get("location").to_string(),
            merchant: get("merchant").to_string(),
            date: or_else(get("date"), || {
                now.to_rfc3339_opts(SecondsFormat::Millis, true)
            }),
            category: or_else(get("category"), || "Unknown".to_string()),
            status: RowStatus::Valid,
            error: None,
        };

        if row.amount <= 0.0 {
            row.mark(RowStatus::Invalid, RowIssue::InvalidAmount);
        }
        if !row.user.contains('@') {
            row.mark(RowStatus::Invalid, RowIssue::InvalidEmail);
        }

        log::debug!("row {}: {} {:?}", line_index + 1, row.id, row.status);
        rows.push(row);
    }
    Ok(rows)
}

/// Files picked for import in one sitting of the import dialog
#[derive(Debug, Clone)]
pub struct ImportSession {
    accepted_mime_types: Vec<String>,
    template_file_name: String,
    files: Vec<UploadedFile>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::with_config(&DashboardConfig::default())
    }

    pub fn with_config(config: &DashboardConfig) -> Self {
        Self {
            accepted_mime_types: config.accepted_mime_types.clone(),
            template_file_name: config.template_file_name.clone(),
            files: Vec::new(),
        }
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Template download under the configured file name
    pub fn template(&self) -> TemplateDownload {
        template_named(&self.template_file_name)
    }

    /// CSV by MIME type or by a `.csv` file name
    pub fn accepts(&self, name: &str, mime_type: &str) -> bool {
        self.accepted_mime_types.iter().any(|m| m == mime_type) || name.ends_with(".csv")
    }

    /// Register a picked file as processing. A file with the same name replaces
    /// the earlier entry.
    pub fn begin_file(
        &mut self,
        name: &str,
        mime_type: &str,
        size: usize,
    ) -> Result<&UploadedFile, ImportError> {
        if !self.accepts(name, mime_type) {
            log::warn!("skipping {name}: unsupported type {mime_type:?}");
            return Err(ImportError::UnsupportedFile {
                name: name.to_string(),
                mime_type: mime_type.to_string(),
            });
        }

        let replaced = self.files.iter().any(|f| f.name == name);
        self.files.retain(|f| f.name != name);
        if replaced {
            self.refresh_duplicates();
        }
        self.files.push(UploadedFile {
            name: name.to_string(),
            size,
            mime_type: mime_type.to_string(),
            transactions: Vec::new(),
            status: FileStatus::Processing,
            errors: Vec::new(),
        });
        let index = self.files.len() - 1;
        Ok(&self.files[index])
    }

    /// Parse the text of a file previously passed to [`Self::begin_file`]
    pub fn finish_file(
        &mut self,
        name: &str,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<&UploadedFile, ImportError> {
        let index = self
            .files
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| ImportError::UnknownFile(name.to_string()))?;

        match parse_transactions(text, now) {
            Ok(rows) => {
                let file = &mut self.files[index];
                file.transactions = rows;
                file.status = FileStatus::Completed;
            }
            Err(err) => {
                let file = &mut self.files[index];
                log::warn!("rejected {}: {err}", file.name);
                file.status = FileStatus::Error;
                file.errors = vec![err.to_string()];
            }
        }
        self.refresh_duplicates();

        let file = &self.files[index];
        if file.status == FileStatus::Completed {
            log::info!(
                "parsed {}: {} rows, {} valid",
                file.name,
                file.transactions.len(),
                file.valid_count()
            );
        }
        Ok(file)
    }

    /// Register and parse a file in one step
    pub fn process_file(
        &mut self,
        name: &str,
        mime_type: &str,
        text: &str,
    ) -> Result<&UploadedFile, ImportError> {
        self.begin_file(name, mime_type, text.len())?;
        self.finish_file(name, text, Utc::now())
    }

    // Recomputed over the whole session in file order: the first valid row
    // with an id keeps it, later valid rows with the same id are duplicates.
    fn refresh_duplicates(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();
        for row in self.files.iter_mut().flat_map(|f| f.transactions.iter_mut()) {
            if row.status == RowStatus::Duplicate {
                row.status = RowStatus::Valid;
                row.error = None;
            }
            if row.is_valid() && !seen.insert(row.id.clone()) {
                row.mark(RowStatus::Duplicate, RowIssue::DuplicateId);
            }
        }
    }

    pub fn remove_file(&mut self, name: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.name != name);
        let removed = self.files.len() != before;
        if removed {
            self.refresh_duplicates();
        }
        removed
    }

    /// Rows eligible for import, across all files
    pub fn valid_transactions(&self) -> Vec<&ImportedTransaction> {
        self.files
            .iter()
            .flat_map(|f| f.transactions.iter())
            .filter(|t| t.is_valid())
            .collect()
    }

    /// Take the valid rows and reset the session
    pub fn import(&mut self) -> Vec<ImportedTransaction> {
        let rows: Vec<ImportedTransaction> = std::mem::take(&mut self.files)
            .into_iter()
            .flat_map(|f| f.transactions)
            .filter(|t| t.is_valid())
            .collect();
        log::info!("importing {} transactions", rows.len());
        rows
    }
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    const HEADER: &str = "id,amount,user,location,merchant,date,category";

    fn parse_one(row: &str) -> ImportedTransaction {
        let text = format!("{HEADER}\n{row}\n");
        let mut rows = parse_transactions(&text, now()).unwrap();
        assert_eq!(rows.len(), 1);
        rows.remove(0)
    }

    #[test]
    fn test_template_parses_to_one_valid_row() {
        let rows = parse_transactions(TEMPLATE_CSV, now()).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!(row.is_valid());
        assert_eq!(row.id, "TXN-001");
        assert_eq!(row.amount, 100.50);
        assert_eq!(row.user, "user@example.com");
        assert_eq!(row.location, "New York USA");
        assert_eq!(row.merchant, "Sample Store");
        assert_eq!(row.date, "2024-01-15 10:30");
        assert_eq!(row.category, "Shopping");
    }

    #[test]
    fn test_headers_matched_by_name_not_position() {
        let text = "CATEGORY, User ,amount,id,date,merchant,location\n\
                    Food,a@b.com,12.5,X-1,2024-01-01,Cafe,Paris\n";
        let rows = parse_transactions(text, now()).unwrap();
        assert_eq!(rows[0].id, "X-1");
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].user, "a@b.com");
        assert_eq!(rows[0].location, "Paris");
    }

    #[test]
    fn test_missing_headers_named_in_required_order() {
        let text = "id,user,location,merchant,category\nTXN-1,a@b.com,x,y,z\n";
        let err = parse_transactions(text, now()).unwrap_err();
        assert_eq!(
            err,
            ImportError::MissingColumns(vec!["amount".to_string(), "date".to_string()])
        );
        assert_eq!(err.to_string(), "Missing required columns: amount, date");
    }

    #[test]
    fn test_empty_file_missing_every_column() {
        let err = parse_transactions("\n  \n", now()).unwrap_err();
        assert_eq!(
            err,
            ImportError::MissingColumns(REQUIRED_HEADERS.iter().map(|h| h.to_string()).collect())
        );
    }

    #[test]
    fn test_invalid_amounts() {
        for raw in ["-5", "abc", "0", ""] {
            let row = parse_one(&format!("T1,{raw},a@b.com,l,m,d,c"));
            assert_eq!(row.status, RowStatus::Invalid, "amount {raw:?}");
            assert_eq!(row.error, Some(RowIssue::InvalidAmount));
        }
    }

    #[test]
    fn test_invalid_email_overrides_amount_issue() {
        let row = parse_one("T1,-5,not-an-email,l,m,d,c");
        assert_eq!(row.status, RowStatus::Invalid);
        assert_eq!(row.error, Some(RowIssue::InvalidEmail));

        let row = parse_one("T1,10,not-an-email,l,m,d,c");
        assert_eq!(row.error, Some(RowIssue::InvalidEmail));
    }

    #[test]
    fn test_fallbacks_for_empty_fields() {
        let row = parse_one(",20,a@b.com,,,,");
        assert_eq!(row.id, format!("TXN-{}-1", now().timestamp_millis()));
        assert_eq!(row.date, "2024-01-15T10:30:00.000Z");
        assert_eq!(row.category, "Unknown");
        assert_eq!(row.location, "");
        assert!(row.is_valid());
    }

    #[test]
    fn test_short_row_treats_missing_values_as_empty() {
        let row = parse_one("T9,15");
        assert_eq!(row.user, "");
        assert_eq!(row.error, Some(RowIssue::InvalidEmail));
        assert_eq!(row.category, "Unknown");
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount("12abc"), 12.0);
        assert_eq!(coerce_amount(" 3.5 "), 3.5);
        assert_eq!(coerce_amount(".25"), 0.25);
        assert_eq!(coerce_amount("1e3"), 1000.0);
        assert_eq!(coerce_amount("abc"), 0.0);
        assert_eq!(coerce_amount("-5"), -5.0);
    }

    #[test]
    fn test_blank_lines_and_crlf_ignored() {
        let text = format!("{HEADER}\r\n\r\nT1,5,a@b.com,l,m,d,c\r\n\n");
        let rows = parse_transactions(&text, now()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "c");
    }

    #[test]
    fn test_embedded_comma_misparses() {
        let row = parse_one("T1,5,a@b.com,\"Paris, France\",m,d,c");
        assert_eq!(row.location, "\"Paris");
        assert_eq!(row.merchant, "France\"");
    }

    #[test]
    fn test_session_rejects_non_csv() {
        let mut session = ImportSession::new();
        let err = session
            .process_file("report.pdf", "application/pdf", TEMPLATE_CSV)
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFile { .. }));
        assert!(session.files().is_empty());

        assert!(session.accepts("export.csv", ""));
        assert!(session.accepts("export.txt", "application/vnd.ms-excel"));
    }

    #[test]
    fn test_session_file_lifecycle() {
        let mut session = ImportSession::new();
        let file = session.begin_file("a.csv", "text/csv", 10).unwrap();
        assert_eq!(file.status, FileStatus::Processing);

        let file = session.finish_file("a.csv", TEMPLATE_CSV, now()).unwrap();
        assert_eq!(file.status, FileStatus::Completed);
        assert!(file.errors.is_empty());

        assert!(matches!(
            session.finish_file("b.csv", TEMPLATE_CSV, now()),
            Err(ImportError::UnknownFile(_))
        ));
    }

    #[test]
    fn test_bad_file_does_not_affect_others() {
        let mut session = ImportSession::new();
        session.process_file("good.csv", "text/csv", TEMPLATE_CSV).unwrap();
        let bad = session
            .process_file("bad.csv", "text/csv", "id,user\nT1,a@b.com\n")
            .unwrap();
        assert_eq!(bad.status, FileStatus::Error);
        assert!(bad.transactions.is_empty());
        assert_eq!(bad.errors.len(), 1);

        assert_eq!(session.file("good.csv").unwrap().status, FileStatus::Completed);
        assert_eq!(session.valid_transactions().len(), 1);
    }

    #[test]
    fn test_duplicates_across_files() {
        let mut session = ImportSession::new();
        session.process_file("one.csv", "text/csv", TEMPLATE_CSV).unwrap();
        let two = session.process_file("two.csv", "text/csv", TEMPLATE_CSV).unwrap();
        assert_eq!(two.transactions[0].status, RowStatus::Duplicate);
        assert_eq!(two.transactions[0].error, Some(RowIssue::DuplicateId));
        assert_eq!(session.valid_transactions().len(), 1);
    }

    #[test]
    fn test_removing_original_frees_its_duplicate() {
        let mut session = ImportSession::new();
        session.process_file("one.csv", "text/csv", TEMPLATE_CSV).unwrap();
        session.process_file("two.csv", "text/csv", TEMPLATE_CSV).unwrap();
        assert_eq!(session.valid_transactions().len(), 1);

        assert!(session.remove_file("one.csv"));
        let two = session.file("two.csv").unwrap();
        assert_eq!(two.transactions[0].status, RowStatus::Valid);
        assert_eq!(two.transactions[0].error, None);

        let imported = session.import();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, "TXN-001");
    }

    #[test]
    fn test_duplicate_within_file_freed_by_earlier_removal() {
        let text = format!("{HEADER}\nT1,5,a@b.com,l,m,d,c\nT1,6,a@b.com,l,m,d,c\n");
        let mut session = ImportSession::new();
        session.process_file("one.csv", "text/csv", TEMPLATE_CSV).unwrap();
        session.process_file("two.csv", "text/csv", &text).unwrap();
        session.process_file("three.csv", "text/csv", TEMPLATE_CSV).unwrap();

        fn statuses(session: &ImportSession, name: &str) -> Vec<RowStatus> {
            session
                .file(name)
                .unwrap()
                .transactions
                .iter()
                .map(|r| r.status)
                .collect()
        }
        let first_kept = vec![RowStatus::Valid, RowStatus::Duplicate];
        assert_eq!(statuses(&session, "two.csv"), first_kept);
        assert_eq!(statuses(&session, "three.csv"), vec![RowStatus::Duplicate]);

        session.remove_file("one.csv");
        assert_eq!(statuses(&session, "two.csv"), first_kept);
        assert_eq!(statuses(&session, "three.csv"), vec![RowStatus::Valid]);
        assert_eq!(session.valid_transactions().len(), 2);
    }

    #[test]
    fn test_rejected_reupload_frees_ids() {
        let mut session = ImportSession::new();
        session.process_file("one.csv", "text/csv", TEMPLATE_CSV).unwrap();
        session.process_file("two.csv", "text/csv", TEMPLATE_CSV).unwrap();
        session
            .process_file("one.csv", "text/csv", "id,user\nTXN-001,a@b.com\n")
            .unwrap();
        assert!(session.file("two.csv").unwrap().transactions[0].is_valid());
    }

    #[test]
    fn test_same_name_replaces_entry() {
        let mut session = ImportSession::new();
        session.process_file("one.csv", "text/csv", TEMPLATE_CSV).unwrap();
        let again = session.process_file("one.csv", "text/csv", TEMPLATE_CSV).unwrap();
        assert!(again.transactions[0].is_valid());
        assert_eq!(session.files().len(), 1);
    }

    #[test]
    fn test_invalid_row_does_not_claim_id() {
        let text = format!("{HEADER}\nT1,-1,a@b.com,l,m,d,c\nT1,5,a@b.com,l,m,d,c\n");
        let mut session = ImportSession::new();
        let file = session.process_file("x.csv", "text/csv", &text).unwrap();
        assert_eq!(file.transactions[0].status, RowStatus::Invalid);
        assert_eq!(file.transactions[1].status, RowStatus::Valid);
    }

    #[test]
    fn test_import_takes_valid_rows_and_resets() {
        let text = format!("{HEADER}\nT1,5,a@b.com,l,m,d,c\nT2,abc,a@b.com,l,m,d,c\n");
        let mut session = ImportSession::new();
        session.process_file("x.csv", "text/csv", &text).unwrap();
        assert!(session.remove_file("x.csv"));
        assert!(!session.remove_file("x.csv"));

        session.process_file("x.csv", "text/csv", &text).unwrap();
        let imported = session.import();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, "T1");
        assert!(session.files().is_empty());

        let tx = imported[0].clone().into_transaction();
        assert_eq!(tx.status, TransactionStatus::Pending);
    }

    #[test]
    fn test_session_template_uses_configured_name() {
        let config = DashboardConfig {
            template_file_name: "fraud_import.csv".to_string(),
            ..DashboardConfig::default()
        };
        let session = ImportSession::with_config(&config);
        let download = session.template();
        assert_eq!(download.file_name, "fraud_import.csv");
        assert_eq!(download.contents, TEMPLATE_CSV);
        assert_eq!(ImportSession::new().template(), template());
    }

    #[test]
    fn test_template_download() {
        let download = template();
        assert_eq!(download.file_name, "transaction_template.csv");
        assert_eq!(download.mime_type, "text/csv");
        assert!(download.contents.starts_with(HEADER));
    }
}
