use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::domain::{format_cents, Expense, DATE_FORMAT, LEDGER_COLUMNS};

/// One non-blank, non-header line of the ledger, split into its columns.
///
/// Missing columns are empty strings; columns past the fourth are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRow {
    /// 1-based line number in the file
    pub line: u64,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub payment_method: String,
}

/// The comma-delimited file holding every expense.
///
/// There is no locking: two processes appending at once may interleave lines.
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the ledger with its header line if it does not exist yet.
    pub fn ensure(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create ledger {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record(LEDGER_COLUMNS)
            .context("Failed to write ledger header")?;
        writer.flush().context("Failed to write ledger header")?;
        info!(path = %self.path.display(), "created ledger");
        Ok(())
    }

    /// Append one expense as a single line.
    ///
    /// Writes the header first when the file is new or empty, and a line break
    /// when the last line was left unterminated.
    pub fn append(&self, expense: &Expense) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open ledger {}", self.path.display()))?;

        let len = file
            .metadata()
            .context("Failed to read ledger metadata")?
            .len();
        if len > 0 && !ends_with_newline(&mut file)? {
            file.write_all(b"\n")
                .context("Failed to terminate last ledger line")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if len == 0 {
            writer
                .write_record(LEDGER_COLUMNS)
                .context("Failed to write ledger header")?;
        }

        writer
            .write_record([
                expense.date.format(DATE_FORMAT).to_string(),
                expense.category.as_str().to_string(),
                format_cents(expense.amount_cents),
                expense.payment_method.as_str().to_string(),
            ])
            .context("Failed to append expense")?;
        writer.flush().context("Failed to append expense")?;

        debug!(path = %self.path.display(), "appended ledger line");
        Ok(())
    }

    /// Read every record line in file order.
    ///
    /// A missing file reads as empty. Blank lines and header lines are skipped;
    /// duplicates are kept.
    pub fn read_rows(&self) -> Result<Vec<LedgerRow>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "ledger missing, reading as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open ledger {}", self.path.display()));
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.byte_records() {
            let record = result
                .with_context(|| format!("Failed to read ledger {}", self.path.display()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            // Invalid UTF-8 in one line must not hide the rest of the ledger.
            if std::str::from_utf8(record.as_slice()).is_err() {
                warn!(path = %self.path.display(), line, "ledger line is not valid UTF-8");
            }
            let mut fields: Vec<String> = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();

            if fields.iter().all(|field| field.is_empty()) || is_header(&fields) {
                continue;
            }

            fields.resize(LEDGER_COLUMNS.len(), String::new());
            let mut fields = fields.into_iter();
            let mut next = || fields.next().unwrap_or_default();
            rows.push(LedgerRow {
                line,
                date: next(),
                category: next(),
                amount: next(),
                payment_method: next(),
            });
        }

        debug!(path = %self.path.display(), rows = rows.len(), "read ledger");
        Ok(rows)
    }
}

fn is_header(fields: &[String]) -> bool {
    fields.len() >= LEDGER_COLUMNS.len()
        && LEDGER_COLUMNS
            .iter()
            .zip(fields)
            .all(|(column, field)| column.eq_ignore_ascii_case(field))
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))
        .context("Failed to inspect ledger tail")?;
    file.read_exact(&mut last)
        .context("Failed to inspect ledger tail")?;
    Ok(last[0] == b'\n')
}
