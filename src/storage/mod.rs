mod ledger_file;

pub use ledger_file::*;

/// Default ledger location, relative to the working directory.
pub const DEFAULT_LEDGER_PATH: &str = "expenses.csv";
