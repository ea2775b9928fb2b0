/// Data layer: core types, loading, cleaning, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TitleTable (raw)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  fill "Unknown", trim, parse dates → TitleTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────┐
///   │ filter / aggregate    │  type subset, counts, scatter points
///   └──────────────────────┘
/// ```

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

use std::path::Path;

use error::PrepError;
use model::TitleTable;

/// A cleaned table plus the missing-value report of the raw input.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub table: TitleTable,
    pub missing_before: Vec<(String, usize)>,
}

/// Load and clean `path`, logging the missing-value report along the way.
pub fn prepare(path: &Path) -> Result<Prepared, PrepError> {
    let raw = loader::load_file(path)?;
    let missing_before = aggregate::missing_summary(&raw);
    for (column, missing) in missing_before.iter().filter(|(_, n)| *n > 0) {
        log::info!("missing values before cleaning: {column} = {missing}");
    }

    let table = clean::clean(&raw)?;
    log::info!(
        "loaded {} titles with columns {:?} from {}",
        table.len(),
        table.column_names,
        path.display()
    );

    Ok(Prepared {
        table,
        missing_before,
    })
}
