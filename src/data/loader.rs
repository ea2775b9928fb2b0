use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::PrepError;
use super::model::{columns, CellValue, TitleRecord, TitleTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a title table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma separated, UTF-8, header row (the usual catalogue export)
/// * `.json`    – `[{ "title": "...", "type": "Movie", ... }, ...]`
/// * `.parquet` – flat columns, one per field
pub fn load_file(path: &Path) -> Result<TitleTable, PrepError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(PrepError::UnsupportedFormat(other.to_string())),
    };
    log::debug!(
        "read {} rows, columns {:?} from {}",
        table.len(),
        table.column_names,
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, PrepError> {
    File::open(path).map_err(|source| PrepError::Load {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Cell typing
// ---------------------------------------------------------------------------

/// Type a raw text cell by its column. Known text columns stay text verbatim
/// (whitespace included), `release_year` becomes an integer, unknown columns
/// are guessed. Empty cells are null.
pub(crate) fn typed_cell(column: &str, raw: &str) -> CellValue {
    if raw.is_empty() {
        return CellValue::Null;
    }
    match column {
        columns::RELEASE_YEAR => parse_year(raw)
            .map(CellValue::Integer)
            .unwrap_or_else(|| CellValue::Text(raw.to_string())),
        columns::SHOW_ID
        | columns::TITLE
        | columns::TYPE
        | columns::DIRECTOR
        | columns::CAST
        | columns::COUNTRY
        | columns::DATE_ADDED
        | columns::RATING
        | columns::DURATION
        | columns::LISTED_IN
        | columns::DESCRIPTION => CellValue::Text(raw.to_string()),
        _ => guess_cell_type(raw),
    }
}

fn parse_year(raw: &str) -> Option<i64> {
    let s = raw.trim();
    s.parse::<i64>().ok().or_else(|| {
        // Pandas writes integer columns that contained NaN as "2019.0".
        s.parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn guess_cell_type(s: &str) -> CellValue {
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one title per record.
fn load_csv(path: &Path) -> Result<TitleTable, PrepError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PrepError::malformed(path, format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| PrepError::malformed(path, format!("CSV row {row_no}: {e}")))?;

        let cells = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), typed_cell(col, value)))
            .collect();

        records.push(TitleRecord { cells });
    }

    Ok(TitleTable::new(headers, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "release_year": 2020, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<TitleTable, PrepError> {
    let text = std::fs::read_to_string(path).map_err(|source| PrepError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|e| PrepError::malformed(path, e))?;

    let rows = root
        .as_array()
        .ok_or_else(|| PrepError::malformed(path, "expected top-level JSON array"))?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or_else(|| PrepError::malformed(path, format!("row {i} is not a JSON object")))?;

        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
            cells.insert(key.clone(), json_to_cell(key, val));
        }
        records.push(TitleRecord { cells });
    }

    Ok(TitleTable::new(column_names, records))
}

fn json_to_cell(column: &str, val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => typed_cell(column, s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                typed_cell(column, &f.to_string())
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). String columns are typed the same way
/// as CSV cells; `Date32` columns load as dates directly.
fn load_parquet(path: &Path) -> Result<TitleTable, PrepError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)
        .map_err(|e| PrepError::malformed(path, format!("reading parquet metadata: {e}")))?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| PrepError::malformed(path, format!("building parquet reader: {e}")))?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| PrepError::malformed(path, format!("reading record batch: {e}")))?;

        for row in 0..batch.num_rows() {
            let cells = column_names
                .iter()
                .zip(batch.columns())
                .map(|(name, col)| (name.clone(), extract_cell(name, col, row)))
                .collect();
            records.push(TitleRecord { cells });
        }
    }

    Ok(TitleTable::new(column_names, records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(name: &str, col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => typed_cell(name, col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => typed_cell(name, col.as_string::<i64>().value(row)),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => {
            typed_cell(name, &col.as_primitive::<Float32Type>().value(row).to_string())
        }
        DataType::Float64 => {
            typed_cell(name, &col.as_primitive::<Float64Type>().value(row).to_string())
        }
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map(CellValue::Date)
            .unwrap_or(CellValue::Null),
        DataType::Boolean => CellValue::Text(col.as_boolean().value(row).to_string()),
        other => {
            log::warn!("column '{name}' has unsupported type {other:?}, reading as null");
            CellValue::Null
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const CSV: &str = "\
show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description
s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,A documentary.
s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas\",A drama.
";

    #[test]
    fn loads_csv_with_header_order_and_nulls() {
        let file = write_temp(".csv", CSV);
        let table = load_file(file.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names[0], "show_id");
        assert_eq!(table.column_names[7], "release_year");

        let first = &table.records[0];
        assert_eq!(first.kind(), Some("Movie"));
        assert_eq!(first.release_year(), Some(2020));
        assert!(first.get("cast").is_null());
        // Dates stay raw until cleaning.
        assert_eq!(first.text("date_added"), Some("September 25, 2021"));

        let second = &table.records[1];
        assert!(second.get("director").is_null());
        assert_eq!(
            second.text("listed_in"),
            Some("International TV Shows, TV Dramas")
        );
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_file(Path::new("/definitely/not/here/netflix.csv")).unwrap_err();
        assert!(matches!(err, PrepError::Load { .. }));
        assert!(err.to_string().contains("netflix.csv"));
    }

    #[test]
    fn ragged_csv_is_malformed() {
        let file = write_temp(".csv", "title,type\nHeat,Movie,extra\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, PrepError::Malformed { .. }));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, PrepError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn loads_json_records() {
        let file = write_temp(
            ".json",
            r#"[{"title": "Heat", "type": "Movie", "release_year": 1995, "rating": null},
                {"title": "Dark", "type": "TV Show", "release_year": "2017"}]"#,
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].release_year(), Some(1995));
        assert_eq!(table.records[1].release_year(), Some(2017));
        assert!(table.records[0].get("rating").is_null());
        assert!(table.has_column("rating"));
    }

    #[test]
    fn json_keeps_key_order() {
        let file = write_temp(".json", r#"[{"type":"Movie","title":"Heat","release_year":1995}]"#);
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.column_names, ["type", "title", "release_year"]);
    }

    #[test]
    fn loads_parquet_columns() {
        use std::sync::Arc;

        use arrow::array::{Date32Array, Int64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("type", DataType::Utf8, true),
            Field::new("title", DataType::Utf8, false),
            Field::new("release_year", DataType::Int64, false),
            Field::new("date_added", DataType::Date32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some(" Movie "), None])),
                Arc::new(StringArray::from(vec!["Heat", "Dark"])),
                Arc::new(Int64Array::from(vec![1995, 2017])),
                Arc::new(Date32Array::from(vec![Some(18895), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".pq").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(file.path()).unwrap();
        assert_eq!(table.column_names, ["type", "title", "release_year", "date_added"]);
        assert_eq!(table.len(), 2);

        let heat = &table.records[0];
        assert_eq!(heat.get("type"), &CellValue::Text(" Movie ".into()));
        assert_eq!(heat.get("release_year"), &CellValue::Integer(1995));
        assert_eq!(
            heat.get("date_added"),
            &CellValue::Date(chrono::NaiveDate::from_ymd_opt(2021, 9, 25).unwrap())
        );

        let dark = &table.records[1];
        assert!(dark.get("type").is_null());
        assert!(dark.get("date_added").is_null());
        assert_eq!(dark.release_year(), Some(2017));
    }

    #[test]
    fn typed_cells_by_column() {
        assert_eq!(typed_cell("release_year", "2019.0"), CellValue::Integer(2019));
        assert_eq!(typed_cell("title", "1984"), CellValue::Text("1984".into()));
        assert_eq!(typed_cell("rating", " TV-MA "), CellValue::Text(" TV-MA ".into()));
        assert_eq!(typed_cell("score", "7.5"), CellValue::Float(7.5));
        assert_eq!(typed_cell("director", ""), CellValue::Null);
    }
}
