use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::error::PrepError;
use super::model::{columns, CellValue, TitleTable, UNKNOWN};

/// Count of rows per distinct value, most frequent first.
///
/// Nulls are not counted. Equal counts keep the order in which the value was
/// first seen in the table.
pub fn value_counts(table: &TitleTable, column: &str) -> Result<Vec<(String, usize)>, PrepError> {
    table.require_column(column)?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for record in &table.records {
        let cell = record.get(column);
        if cell.is_null() {
            continue;
        }
        let key = cell.to_string();
        match position.get(&key).copied() {
            Some(i) => counts[i].1 += 1,
            None => {
                position.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // `sort_by` is stable, so ties stay in first-encountered order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

/// The `n` most frequent values of `column`.
pub fn top_n_counts(
    table: &TitleTable,
    column: &str,
    n: usize,
) -> Result<Vec<(String, usize)>, PrepError> {
    let mut counts = value_counts(table, column)?;
    counts.truncate(n);
    Ok(counts)
}

/// Number of titles per release year, ascending by year.
pub fn year_series_counts(table: &TitleTable) -> Result<Vec<(i64, usize)>, PrepError> {
    table.require_column(columns::RELEASE_YEAR)?;

    let mut per_year: BTreeMap<i64, usize> = BTreeMap::new();
    for year in table.records.iter().filter_map(|r| r.release_year()) {
        *per_year.entry(year).or_default() += 1;
    }
    Ok(per_year.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Release year vs. duration
// ---------------------------------------------------------------------------

/// One title placed on the release-year / duration plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub release_year: i64,
    pub duration: f64,
    pub kind: String,
    pub title: String,
}

/// Numeric part of a duration cell: minutes for movies, seasons for shows.
pub fn duration_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Integer(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        CellValue::Text(s) => {
            let s = s.trim();
            let digits = s
                .find(|c: char| !c.is_ascii_digit())
                .map_or(s, |end| &s[..end]);
            digits.parse::<u32>().ok().map(f64::from)
        }
        _ => None,
    }
}

/// Points for the scatter chart, in row order. Rows without a release year
/// or a numeric duration are skipped.
pub fn scatter_points(table: &TitleTable) -> Result<Vec<ScatterPoint>, PrepError> {
    for column in [columns::RELEASE_YEAR, columns::DURATION, columns::TYPE, columns::TITLE] {
        table.require_column(column)?;
    }

    Ok(table
        .records
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                release_year: r.release_year()?,
                duration: duration_value(r.get(columns::DURATION))?,
                kind: r.kind().unwrap_or(UNKNOWN).to_string(),
                title: r.title().unwrap_or_default().to_string(),
            })
        })
        .collect())
}

/// Null cells per column, in header order.
pub fn missing_summary(table: &TitleTable) -> Vec<(String, usize)> {
    table
        .column_names
        .iter()
        .map(|col| {
            let missing = table.records.iter().filter(|r| r.get(col).is_null()).count();
            (col.clone(), missing)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
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
        "duration",
    ];

    #[test]
    fn country_ties_keep_first_seen_order() {
        let raw = table(
            COLS,
            &[
                &[("country", "USA")],
                &[],
                &[("country", "USA")],
                &[("country", "India")],
            ],
        );
        let cleaned = clean(&raw).unwrap();
        let top = top_n_counts(&cleaned, "country", 2).unwrap();
        assert_eq!(top, vec![("USA".to_string(), 2), ("Unknown".to_string(), 1)]);
    }

    #[test]
    fn top_n_is_truncated_and_non_increasing() {
        let ratings = ["TV-MA", "R", "TV-MA", "PG", "G", "TV-14", "R", "NR", "TV-MA"];
        let rows: Vec<Vec<(&str, &str)>> = ratings.iter().map(|r| vec![("rating", *r)]).collect();
        let row_refs: Vec<&[(&str, &str)]> = rows.iter().map(|r| r.as_slice()).collect();
        let t = table(COLS, &row_refs);

        let top = top_n_counts(&t, "rating", 5).unwrap();
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
        assert_eq!(top[0], ("TV-MA".to_string(), 3));
        assert_eq!(top[1], ("R".to_string(), 2));
        // PG, G, TV-14 tie at one; the first two seen make the cut.
        assert_eq!(top[2].0, "PG");
        assert_eq!(top[3].0, "G");
    }

    #[test]
    fn nulls_are_not_counted() {
        let t = table(COLS, &[&[("rating", "R")], &[]]);
        assert_eq!(value_counts(&t, "rating").unwrap(), vec![("R".to_string(), 1)]);
    }

    #[test]
    fn unknown_column_is_invalid() {
        let t = table(COLS, &[]);
        let err = top_n_counts(&t, "genre", 10).unwrap_err();
        assert!(matches!(err, PrepError::InvalidColumn(ref c) if c == "genre"));
    }

    #[test]
    fn years_ascending_without_duplicates() {
        let t = table(
            COLS,
            &[
                &[("release_year", "2020")],
                &[("release_year", "2018")],
                &[("release_year", "2020")],
                &[("release_year", "2019")],
            ],
        );
        assert_eq!(
            year_series_counts(&t).unwrap(),
            vec![(2018, 1), (2019, 1), (2020, 2)]
        );
    }

    #[test]
    fn rows_without_year_are_skipped() {
        let t = table(COLS, &[&[("release_year", "2001")], &[("title", "Undated")]]);
        assert_eq!(year_series_counts(&t).unwrap(), vec![(2001, 1)]);
    }

    #[test]
    fn durations_parse_leading_number() {
        assert_eq!(duration_value(&CellValue::Text("90 min".into())), Some(90.0));
        assert_eq!(duration_value(&CellValue::Text("2 Seasons".into())), Some(2.0));
        assert_eq!(duration_value(&CellValue::Integer(45)), Some(45.0));
        assert_eq!(duration_value(&CellValue::Text("n/a".into())), None);
        assert_eq!(duration_value(&CellValue::Null), None);
    }

    #[test]
    fn scatter_skips_rows_without_duration() {
        let t = table(
            COLS,
            &[
                &[
                    ("title", "Heat"),
                    ("type", "Movie"),
                    ("release_year", "1995"),
                    ("duration", "170 min"),
                ],
                &[("title", "Dark"), ("type", "TV Show"), ("release_year", "2017")],
            ],
        );
        let points = scatter_points(&t).unwrap();
        assert_eq!(
            points,
            vec![ScatterPoint {
                release_year: 1995,
                duration: 170.0,
                kind: "Movie".into(),
                title: "Heat".into(),
            }]
        );
    }

    #[test]
    fn missing_summary_follows_header() {
        let t = table(&["title", "rating"], &[&[("title", "Heat")], &[]]);
        assert_eq!(
            missing_summary(&t),
            vec![("title".to_string(), 1), ("rating".to_string(), 2)]
        );
    }
}
