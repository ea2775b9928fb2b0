use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::error::PrepError;

/// Placeholder written into categorical columns that had no value.
pub const UNKNOWN: &str = "Unknown";

/// Column names of the title catalogue.
pub mod columns {
    pub const SHOW_ID: &str = "show_id";
    pub const TITLE: &str = "title";
    pub const TYPE: &str = "type";
    pub const DIRECTOR: &str = "director";
    pub const CAST: &str = "cast";
    pub const COUNTRY: &str = "country";
    pub const DATE_ADDED: &str = "date_added";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const RATING: &str = "rating";
    pub const DURATION: &str = "duration";
    pub const LISTED_IN: &str = "listed_in";
    pub const DESCRIPTION: &str = "description";
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of the title table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Known columns get a fixed type at load time,
/// anything else is guessed from its text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TitleRecord – one row of the catalogue
// ---------------------------------------------------------------------------

/// A single title (one row of the source table).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleRecord {
    /// column_name → value. A column missing from the map reads as null.
    pub cells: BTreeMap<String, CellValue>,
}

static NULL: CellValue = CellValue::Null;

impl TitleRecord {
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).as_str()
    }

    pub fn title(&self) -> Option<&str> {
        self.text(columns::TITLE)
    }

    pub fn kind(&self) -> Option<&str> {
        self.text(columns::TYPE)
    }

    pub fn release_year(&self) -> Option<i64> {
        self.get(columns::RELEASE_YEAR).as_i64()
    }
}

// ---------------------------------------------------------------------------
// TitleTable – the complete loaded catalogue
// ---------------------------------------------------------------------------

/// An ordered collection of titles plus the column names in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleTable {
    pub records: Vec<TitleRecord>,
    pub column_names: Vec<String>,
}

impl TitleTable {
    pub fn new(column_names: Vec<String>, records: Vec<TitleRecord>) -> Self {
        TitleTable {
            records,
            column_names,
        }
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Fail with [`PrepError::InvalidColumn`] unless `column` is part of the header.
    pub fn require_column(&self, column: &str) -> Result<(), PrepError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(PrepError::InvalidColumn(column.to_string()))
        }
    }

    /// Same columns, subset of rows.
    pub fn with_records(&self, records: Vec<TitleRecord>) -> Self {
        TitleTable {
            records,
            column_names: self.column_names.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a table from `(column, value)` rows; empty strings become null.
    pub(crate) fn table(column_names: &[&str], rows: &[&[(&str, &str)]]) -> TitleTable {
        let records = rows
            .iter()
            .map(|row| TitleRecord {
                cells: row
                    .iter()
                    .map(|(col, val)| {
                        (col.to_string(), crate::data::loader::typed_cell(col, val))
                    })
                    .collect(),
            })
            .collect();
        TitleTable::new(column_names.iter().map(|c| c.to_string()).collect(), records)
    }

    #[test]
    fn missing_cells_read_as_null() {
        let t = table(&["title", "type"], &[&[("title", "Heat")]]);
        assert!(t.records[0].get("type").is_null());
        assert_eq!(t.records[0].title(), Some("Heat"));
    }

    #[test]
    fn require_column_names_the_column() {
        let t = table(&["title"], &[]);
        let err = t.require_column("rating").unwrap_err();
        assert_eq!(err.to_string(), "column 'rating' not found in table");
    }

    #[test]
    fn dates_display_iso() {
        let d = NaiveDate::from_ymd_opt(2021, 9, 25).unwrap();
        assert_eq!(CellValue::Date(d).to_string(), "2021-09-25");
    }
}
