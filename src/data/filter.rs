use std::fmt;

use serde::Serialize;

use super::error::PrepError;
use super::model::{columns, TitleTable};

// ---------------------------------------------------------------------------
// Filter state: which kind of title is shown
// ---------------------------------------------------------------------------

/// The two legal values of the `type` column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum TitleType {
    #[default]
    Movie,
    TvShow,
}

impl TitleType {
    pub const ALL: [TitleType; 2] = [TitleType::Movie, TitleType::TvShow];

    /// The value as it appears in the `type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TitleType::Movie => "Movie",
            TitleType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rows whose `type` equals `value`, in their original order.
///
/// No match is not an error: the result is simply an empty table.
pub fn filter_by_type(table: &TitleTable, value: &str) -> Result<TitleTable, PrepError> {
    table.require_column(columns::TYPE)?;

    let records = table
        .records
        .iter()
        .filter(|r| r.kind() == Some(value))
        .cloned()
        .collect();
    Ok(table.with_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    fn mixed() -> TitleTable {
        table(
            &["title", "type"],
            &[
                &[("title", "A"), ("type", "Movie")],
                &[("title", "B"), ("type", "TV Show")],
                &[("title", "C"), ("type", "Movie")],
                &[("title", "D")],
            ],
        )
    }

    #[test]
    fn keeps_matching_rows_in_order() {
        let movies = filter_by_type(&mixed(), TitleType::Movie.as_str()).unwrap();
        let titles: Vec<_> = movies.records.iter().filter_map(|r| r.title()).collect();
        assert_eq!(titles, ["A", "C"]);
        assert!(movies.records.iter().all(|r| r.kind() == Some("Movie")));
        assert_eq!(movies.column_names, mixed().column_names);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let t = table(&["title", "type"], &[&[("title", "A"), ("type", "Movie")]]);
        let shows = filter_by_type(&t, "TV Show").unwrap();
        assert!(shows.is_empty());
    }

    #[test]
    fn missing_type_column_is_invalid() {
        let t = table(&["title"], &[]);
        assert!(matches!(
            filter_by_type(&t, "Movie"),
            Err(PrepError::InvalidColumn(_))
        ));
    }

    #[test]
    fn labels_match_column_values() {
        assert_eq!(TitleType::TvShow.to_string(), "TV Show");
        assert_eq!(TitleType::default(), TitleType::Movie);
    }
}
