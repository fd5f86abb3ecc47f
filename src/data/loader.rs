use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use super::model::{
    LaunchRecord, RecordStore, COL_BOOSTER, COL_CLASS, COL_FLIGHT, COL_PAYLOAD, COL_SITE,
    REQUIRED_COLUMNS,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – headered CSV, e.g. `spacex_launch_dash.csv`
/// * `.parquet` – the same columns stored as Parquet
pub fn load_file(path: &Path) -> Result<RecordStore, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Column positions of the required fields inside a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    site: usize,
    class: usize,
    payload: usize,
    booster: usize,
    flight: usize,
}

impl ColumnIndex {
    /// Resolve every required column, reporting the first one that is absent.
    fn resolve(lookup: impl Fn(&str) -> Option<usize>) -> Result<Self, LoadError> {
        let mut found = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in found.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = lookup(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()))?;
        }
        let [site, class, payload, booster, flight] = found;
        Ok(ColumnIndex {
            site,
            class,
            payload,
            booster,
            flight,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Only the five required columns
/// are read; anything else (`Mission Outcome`, `Booster Version`, …) is
/// ignored.
pub fn load_csv(path: &Path) -> Result<RecordStore, LoadError> {
    let file = File::open(path)?;
    load_csv_reader(file)
}

/// Same as [`load_csv`] over any byte source.
pub fn load_csv_reader<R: Read>(source: R) -> Result<RecordStore, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let idx = ColumnIndex::resolve(|name| headers.iter().position(|h| h == name))?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        records.push(LaunchRecord {
            site: parse_text(cell(idx.site), row_no, COL_SITE)?,
            outcome: parse_class(cell(idx.class), row_no)?,
            payload_mass_kg: parse_float(cell(idx.payload), row_no, COL_PAYLOAD)?,
            booster_version_category: parse_text(cell(idx.booster), row_no, COL_BOOSTER)?,
            flight_number: parse_integer(cell(idx.flight), row_no, COL_FLIGHT)?,
        });
    }

    RecordStore::from_records(records)
}

fn parse_text(s: &str, row: usize, col: &str) -> Result<String, LoadError> {
    if s.is_empty() {
        return Err(LoadError::invalid(row, col, "empty value"));
    }
    Ok(s.to_string())
}

fn parse_float(s: &str, row: usize, col: &str) -> Result<f64, LoadError> {
    s.parse::<f64>()
        .map_err(|_| LoadError::invalid(row, col, format!("'{s}' is not a number")))
}

/// Integers written as floats (`"12.0"`) are accepted; fractional values are not.
fn parse_integer(s: &str, row: usize, col: &str) -> Result<i64, LoadError> {
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>().ok().and_then(whole_number) {
        Some(i) => Ok(i),
        None => Err(LoadError::invalid(row, col, format!("'{s}' is not an integer"))),
    }
}

/// `f` as an `i64` when it is integral and representable; `as` would saturate.
fn whole_number(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn parse_class(s: &str, row: usize) -> Result<bool, LoadError> {
    let value = parse_integer(s, row, COL_CLASS)?;
    class_to_outcome(value, row)
}

fn class_to_outcome(value: i64, row: usize) -> Result<bool, LoadError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(LoadError::invalid(row, COL_CLASS, format!("expected 0 or 1, got {other}"))),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// Expected schema: the required columns by name. Text columns are `Utf8` or
/// `LargeUtf8`; numeric columns may be any of `Int32`, `Int64`, `Float32`,
/// `Float64`. Works with files written by both Pandas and Polars.
pub fn load_parquet(path: &Path) -> Result<RecordStore, LoadError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let schema = builder.schema().clone();
    let idx = ColumnIndex::resolve(|name| schema.index_of(name).ok())?;

    let reader = builder.build()?;
    let mut records = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result?;

        let site = batch.column(idx.site);
        let class = batch.column(idx.class);
        let payload = batch.column(idx.payload);
        let booster = batch.column(idx.booster);
        let flight = batch.column(idx.flight);

        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let class_value = extract_integer(class, row, row_no, COL_CLASS)?;

            records.push(LaunchRecord {
                site: extract_string(site, row, row_no, COL_SITE)?,
                outcome: class_to_outcome(class_value, row_no)?,
                payload_mass_kg: extract_f64(payload, row, row_no, COL_PAYLOAD)?,
                booster_version_category: extract_string(booster, row, row_no, COL_BOOSTER)?,
                flight_number: extract_integer(flight, row, row_no, COL_FLIGHT)?,
            });
        }
        offset += batch.num_rows();
    }

    RecordStore::from_records(records)
}

// -- Parquet / Arrow helpers --

fn extract_string(
    col: &ArrayRef,
    row: usize,
    row_no: usize,
    name: &str,
) -> Result<String, LoadError> {
    if col.is_null(row) {
        return Err(LoadError::invalid(row_no, name, "null value"));
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => {
            let reason = format!("expected a string column, got {other:?}");
            return Err(LoadError::invalid(row_no, name, reason));
        }
    };
    parse_text(value.trim(), row_no, name)
}

fn extract_f64(col: &ArrayRef, row: usize, row_no: usize, name: &str) -> Result<f64, LoadError> {
    if col.is_null(row) {
        return Err(LoadError::invalid(row_no, name, "null value"));
    }
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(row) as f64),
        other => {
            let reason = format!("expected a numeric column, got {other:?}");
            Err(LoadError::invalid(row_no, name, reason))
        }
    }
}

fn extract_integer(
    col: &ArrayRef,
    row: usize,
    row_no: usize,
    name: &str,
) -> Result<i64, LoadError> {
    match col.data_type() {
        DataType::Int64 if !col.is_null(row) => Ok(col.as_primitive::<Int64Type>().value(row)),
        DataType::Int32 if !col.is_null(row) => {
            Ok(col.as_primitive::<Int32Type>().value(row) as i64)
        }
        _ => {
            let f = extract_f64(col, row, row_no, name)?;
            whole_number(f)
                .ok_or_else(|| LoadError::invalid(row_no, name, format!("{f} is not an integer")))
        }
    }
}
