//! DuckDB Connection Helper
//!
//! Opens a writable DuckDB connection on a database file or in memory. The
//! caller owns the returned connection; dropping it closes the database.
//!
//! # Example
//! ```rust
//! use nutrition_analytics::db::connect_duckdb;
//! use nutrition_analytics::paths::data_raw_path;
//!
//! let conn = connect_duckdb(":memory:")?;
//! let _tsv = data_raw_path(["eurostat", "prc_hicp_aind_tabular.tsv"]);
//! // conn.prepare("SELECT * FROM read_csv_auto(?) LIMIT 5")?
//! let answer: i64 = conn.query_row("SELECT 42", [], |row| row.get(0))?;
//! assert_eq!(answer, 42);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use duckdb::{AccessMode, Config, Connection};
use std::path::{Path, PathBuf};

use crate::error::{IndicatorError, Result};

/// Marker selecting an in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Where a connection points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    InMemory,
    File(PathBuf),
}

impl DbTarget {
    /// `":memory:"` or an empty string mean in-memory; anything else is a path
    pub fn parse(target: &str) -> Self {
        if target.is_empty() || target == IN_MEMORY {
            DbTarget::InMemory
        } else {
            DbTarget::File(PathBuf::from(target))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            DbTarget::InMemory => IN_MEMORY.to_string(),
            DbTarget::File(path) => path.display().to_string(),
        }
    }

    /// Open a read-write connection on this target
    pub fn open(&self) -> Result<Connection> {
        let wrap = |source| IndicatorError::ConnectionOpen {
            target: self.describe(),
            source,
        };

        let config = Config::default()
            .access_mode(AccessMode::ReadWrite)
            .map_err(wrap)?;

        let conn = match self {
            DbTarget::InMemory => Connection::open_in_memory_with_flags(config),
            DbTarget::File(path) => Connection::open_with_flags(path, config),
        }
        .map_err(wrap)?;

        tracing::debug!("Opened DuckDB connection on {}", self.describe());
        Ok(conn)
    }
}

/// Open a DuckDB connection on a file path or `":memory:"`
///
/// # Errors
/// `ConnectionOpen` if DuckDB cannot open the target (missing parent
/// directory, permissions, not a DuckDB file, ...).
pub fn connect_duckdb(target: &str) -> Result<Connection> {
    DbTarget::parse(target).open()
}

/// Open an in-memory DuckDB connection
pub fn connect_duckdb_in_memory() -> Result<Connection> {
    DbTarget::InMemory.open()
}

/// Open a DuckDB database file
pub fn connect_duckdb_file(path: &Path) -> Result<Connection> {
    DbTarget::File(path.to_path_buf()).open()
}
