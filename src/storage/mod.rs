//! Storage layer for Lana
//!
//! The services live in memory. This layer only reads the ledger snapshot
//! they are seeded from and writes it back when asked to.

pub mod file_io;
pub mod init;

pub use file_io::{json_file_valid, read_json, read_json_required, write_json_atomic};
pub use init::{initialize_storage, sample_ledger};

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LanaError;
use crate::models::Ledger;

/// Reads and writes one ledger snapshot file
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the snapshot; a missing file yields an empty ledger
    pub fn load(&self) -> Result<Ledger, LanaError> {
        let ledger: Ledger = read_json(&self.path)?;
        debug!(
            path = %self.path.display(),
            transactions = ledger.transactions.len(),
            budgets = ledger.budgets.len(),
            "ledger loaded"
        );
        Ok(ledger)
    }

    pub fn save(&self, ledger: &Ledger) -> Result<(), LanaError> {
        write_json_atomic(&self.path, ledger)?;
        debug!(path = %self.path.display(), "ledger saved");
        Ok(())
    }
}
