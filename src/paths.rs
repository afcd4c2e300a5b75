//! Project Paths
//!
//! Builds paths under the conventional project layout:
//!
//! ```text
//! <root>/
//!   ├─ src/
//!   ├─ data_raw/
//!   ├─ data_processed/
//!   └─ notebooks/
//! ```
//!
//! The root is the crate directory (two levels above this file), unless
//! `NUTRITION_ANALYTICS_ROOT` is set; a relative override is resolved against
//! the current working directory. Nothing here checks that paths exist.
//!
//! # Example
//! ```rust
//! use nutrition_analytics::paths::{data_processed_path, data_raw_path};
//!
//! let raw = data_raw_path(["openfoodfacts", "en.openfoodfacts.org.products.csv"]);
//! let processed = data_processed_path(["openfoodfacts", "openfoodfacts_subset.parquet"]);
//! assert!(raw.ends_with("data_raw/openfoodfacts/en.openfoodfacts.org.products.csv"));
//! assert!(processed.ends_with("data_processed/openfoodfacts/openfoodfacts_subset.parquet"));
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the project root
pub const ROOT_ENV_VAR: &str = "NUTRITION_ANALYTICS_ROOT";

/// Conventional top-level project directories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectDir {
    DataRaw,
    DataProcessed,
    Notebooks,
}

impl ProjectDir {
    pub fn dir_name(self) -> &'static str {
        match self {
            ProjectDir::DataRaw => "data_raw",
            ProjectDir::DataProcessed => "data_processed",
            ProjectDir::Notebooks => "notebooks",
        }
    }
}

/// Path builder anchored at an explicit project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root from `NUTRITION_ANALYTICS_ROOT`, falling back to the crate directory
    pub fn discover() -> Self {
        match std::env::var(ROOT_ENV_VAR) {
            Ok(root) if !root.is_empty() => Self::new(absolute_root(Path::new(&root))),
            _ => Self::new(env!("CARGO_MANIFEST_DIR")),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<dir>/<parts...>`
    pub fn join<I, P>(&self, dir: ProjectDir, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.root.join(dir.dir_name());
        for part in parts {
            path.push(part);
        }
        path
    }

    pub fn data_raw<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.join(ProjectDir::DataRaw, parts)
    }

    pub fn data_processed<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.join(ProjectDir::DataProcessed, parts)
    }

    pub fn notebooks<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.join(ProjectDir::Notebooks, parts)
    }
}

/// Anchor a relative root at the current working directory
///
/// If the working directory cannot be read the path is returned unchanged.
fn absolute_root(root: &Path) -> PathBuf {
    if root.is_absolute() {
        return root.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(root),
        Err(e) => {
            tracing::warn!("Cannot resolve relative project root {:?}: {}", root, e);
            root.to_path_buf()
        }
    }
}

/// Root of the project
pub fn project_root() -> PathBuf {
    ProjectPaths::discover().root
}

/// Path inside `data_raw`
pub fn data_raw_path<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    ProjectPaths::discover().data_raw(parts)
}

/// Path inside `data_processed`
pub fn data_processed_path<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    ProjectPaths::discover().data_processed(parts)
}

/// Path inside `notebooks`
pub fn notebooks_path<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    ProjectPaths::discover().notebooks(parts)
}
