pub mod application;
pub mod cli;
pub mod domain;
pub mod mcp;
pub mod storage;

pub use domain::*;
pub use storage::LedgerFile;
