use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::charts::Dashboard;
use crate::data::aggregate::missing_summary;
use crate::data::filter::TitleType;
use crate::data::model::TitleTable;
use crate::data::{prepare, Prepared};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Cleaned table; read-only once set.
    pub table: TitleTable,

    /// The six chart panels; also holds the dropdown selection and top-N.
    pub dashboard: Dashboard,

    /// File the table came from.
    pub source: PathBuf,

    /// Null counts per column before and after cleaning.
    pub missing_before: Vec<(String, usize)>,
    pub missing_after: Vec<(String, usize)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state for a freshly prepared table.
    pub fn new(source: &Path, prepared: Prepared, filter: TitleType, top_n: usize) -> Result<Self> {
        let dashboard = Dashboard::build(&prepared.table, filter, top_n)?;
        Ok(Self {
            missing_after: missing_summary(&prepared.table),
            missing_before: prepared.missing_before,
            table: prepared.table,
            dashboard,
            source: source.to_path_buf(),
            status_message: None,
        })
    }

    /// Selected value of the type dropdown.
    pub fn filter(&self) -> TitleType {
        self.dashboard.filter
    }

    /// Replace the table with the contents of `path`. On failure the current
    /// table stays and the error is shown in the status line.
    pub fn open(&mut self, path: &Path) {
        let result = prepare(path)
            .map_err(anyhow::Error::from)
            .and_then(|prepared| {
                AppState::new(path, prepared, self.dashboard.filter, self.dashboard.top_n)
            });
        match result {
            Ok(state) => *self = state,
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Handle a dropdown change: recompute the two filter-dependent charts.
    pub fn set_filter(&mut self, filter: TitleType) {
        if filter == self.filter() {
            return;
        }
        match self.dashboard.apply_filter(&self.table, filter) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::error!("Failed to apply filter {filter}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn export(&mut self, path: &Path) {
        if let Err(e) = self.dashboard.write_json(path) {
            log::error!("{e:#}");
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
