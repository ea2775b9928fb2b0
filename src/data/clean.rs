use chrono::NaiveDate;

use super::error::PrepError;
use super::model::{columns, CellValue, TitleRecord, TitleTable, UNKNOWN};

/// Columns whose nulls are replaced with [`UNKNOWN`].
pub const FILLED_COLUMNS: [&str; 3] = [columns::DIRECTOR, columns::CAST, columns::COUNTRY];

/// Columns stripped of leading/trailing whitespace.
pub const TRIMMED_COLUMNS: [&str; 3] = [columns::TYPE, columns::COUNTRY, columns::RATING];

/// Accepted `date_added` layouts, tried in order.
const DATE_FORMATS: [&str; 5] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y"];

/// Produce an analysis-ready copy of `table`:
///
/// * nulls in [`FILLED_COLUMNS`] become `"Unknown"`,
/// * text in [`TRIMMED_COLUMNS`] is trimmed (nulls stay null),
/// * `date_added` is parsed into a date; unparseable values become null.
///
/// Cleaning an already clean table returns an equal table.
pub fn clean(table: &TitleTable) -> Result<TitleTable, PrepError> {
    for column in FILLED_COLUMNS
        .iter()
        .chain(TRIMMED_COLUMNS.iter())
        .chain(std::iter::once(&columns::DATE_ADDED))
    {
        table.require_column(column)?;
    }

    let records: Vec<TitleRecord> = table.records.iter().map(clean_record).collect();

    let dropped_dates = table
        .records
        .iter()
        .zip(&records)
        .filter(|(before, after)| {
            !before.get(columns::DATE_ADDED).is_null() && after.get(columns::DATE_ADDED).is_null()
        })
        .count();
    if dropped_dates > 0 {
        log::warn!("{dropped_dates} unparseable date_added values set to null");
    }

    Ok(table.with_records(records))
}

fn clean_record(record: &TitleRecord) -> TitleRecord {
    let mut cells = record.cells.clone();

    for column in FILLED_COLUMNS {
        let cell = cells.entry(column.to_string()).or_insert(CellValue::Null);
        if cell.is_null() {
            *cell = CellValue::Text(UNKNOWN.to_string());
        }
    }

    for column in TRIMMED_COLUMNS {
        if let Some(CellValue::Text(s)) = cells.get_mut(column) {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
    }

    if let Some(cell) = cells.get_mut(columns::DATE_ADDED) {
        *cell = date_cell(cell);
    }

    TitleRecord { cells }
}

fn date_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Date(d) => CellValue::Date(*d),
        CellValue::Text(s) => parse_date(s).map(CellValue::Date).unwrap_or(CellValue::Null),
        _ => CellValue::Null,
    }
}

/// Parse a `date_added` value in any of the accepted layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    const COLS: &[&str] = &[
        "title",
        "type",
        "director",
        "cast",
        "country",
        "date_added",
        "release_year",
        "rating",
    ];

    fn messy() -> TitleTable {
        table(
            COLS,
            &[
                &[
                    ("title", "Heat"),
                    ("type", " Movie "),
                    ("country", "United States "),
                    ("date_added", " September 25, 2021"),
                    ("release_year", "1995"),
                    ("rating", "R"),
                ],
                &[
                    ("title", "Dark"),
                    ("type", "TV Show"),
                    ("director", "Baran bo Odar"),
                    ("date_added", "not a date"),
                    ("release_year", "2017"),
                    ("rating", "\tTV-MA"),
                ],
                &[("title", "Nothing"), ("type", "Movie")],
            ],
        )
    }

    #[test]
    fn fills_unknown_in_categorical_columns() {
        let cleaned = clean(&messy()).unwrap();
        for rec in &cleaned.records {
            for col in FILLED_COLUMNS {
                assert!(!rec.get(col).is_null(), "{col} still null");
            }
        }
        assert_eq!(cleaned.records[0].text("director"), Some(UNKNOWN));
        assert_eq!(cleaned.records[1].text("director"), Some("Baran bo Odar"));
        assert_eq!(cleaned.records[2].text("country"), Some(UNKNOWN));
    }

    #[test]
    fn other_nulls_are_kept() {
        let cleaned = clean(&messy()).unwrap();
        assert!(cleaned.records[2].get("rating").is_null());
        assert!(cleaned.records[2].get("date_added").is_null());
    }

    #[test]
    fn trims_type_country_rating() {
        let cleaned = clean(&messy()).unwrap();
        for rec in &cleaned.records {
            for col in TRIMMED_COLUMNS {
                if let Some(s) = rec.text(col) {
                    assert_eq!(s, s.trim(), "{col} not trimmed");
                }
            }
        }
        assert_eq!(cleaned.records[0].kind(), Some("Movie"));
        assert_eq!(cleaned.records[0].text("country"), Some("United States"));
        assert_eq!(cleaned.records[1].text("rating"), Some("TV-MA"));
    }

    #[test]
    fn unparseable_dates_become_null() {
        let cleaned = clean(&messy()).unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 9, 25).unwrap();
        assert_eq!(cleaned.records[0].get("date_added"), &CellValue::Date(expected));
        assert!(cleaned.records[1].get("date_added").is_null());
    }

    #[test]
    fn clean_is_idempotent() {
        let once = clean(&messy()).unwrap();
        let twice = clean(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_left_untouched() {
        let raw = messy();
        let _ = clean(&raw).unwrap();
        assert_eq!(raw.records[0].kind(), Some(" Movie "));
        assert!(raw.records[0].get("director").is_null());
    }

    #[test]
    fn missing_column_is_reported() {
        let t = table(&["title", "type"], &[&[("title", "Heat"), ("type", "Movie")]]);
        let err = clean(&t).unwrap_err();
        assert!(matches!(err, PrepError::InvalidColumn(ref c) if c == "director"));
    }

    #[test]
    fn accepted_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2019, 3, 1);
        for raw in ["March 1, 2019", "Mar 1, 2019", "2019-03-01", "03/01/2019", "01-Mar-19"] {
            assert_eq!(parse_date(raw), expected, "{raw}");
        }
        assert_eq!(parse_date(""), None);
    }
}
