use std::path::Path;

use arrow::array::Array;
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use chrono::{NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::error::{LoadError, Result};
use super::model::{Transaction, TransactionTable};

/// Source column headers, in schema order.
pub const COLUMNS: [&str; 8] = [
    "Date",
    "Store",
    "Gender",
    "Nationality",
    "Category",
    "PaymentMethod",
    "Age",
    "TotalAmount",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a transaction table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the eight schema columns (extras ignored)
/// * `.json`    – `[{ "Date": "...", "Store": "...", ... }, ...]`
/// * `.parquet` – one column per schema field (recommended for big exports)
pub fn load_file(path: &Path) -> Result<TransactionTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let transactions = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(TransactionTable::from_transactions(transactions))
}

// ---------------------------------------------------------------------------
// Row conversion shared by every format
// ---------------------------------------------------------------------------

/// One row as text, before type conversion.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Store")]
    store: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Nationality")]
    nationality: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "PaymentMethod")]
    payment_method: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "TotalAmount")]
    total_amount: String,
}

impl RawRow {
    /// Build a row from cells given in [`COLUMNS`] order.
    fn from_cells(cells: [String; 8]) -> Self {
        let [date, store, gender, nationality, category, payment_method, age, total_amount] =
            cells;
        RawRow {
            date,
            store,
            gender,
            nationality,
            category,
            payment_method,
            age,
            total_amount,
        }
    }

    fn into_transaction(self, row: usize) -> Result<Transaction> {
        Ok(Transaction {
            date: parse_date(&self.date, row)?,
            store: non_empty(self.store, row, "Store")?,
            gender: non_empty(self.gender, row, "Gender")?,
            nationality: non_empty(self.nationality, row, "Nationality")?,
            category: non_empty(self.category, row, "Category")?,
            payment_method: non_empty(self.payment_method, row, "PaymentMethod")?,
            age: parse_age(&self.age, row)?,
            total_amount: parse_amount(&self.total_amount, row)?,
        })
    }
}

fn non_empty(value: String, row: usize, column: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LoadError::EmptyValue { row, column });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a calendar date, accepting the layouts dataframe exports commonly
/// produce. Month-first wins over day-first when both would parse.
fn parse_date(s: &str, row: usize) -> Result<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .ok_or_else(|| LoadError::InvalidDate {
            row,
            value: s.to_string(),
        })
}

/// Parse a non-negative integer age. Whole floats like `34.0` are accepted.
fn parse_age(s: &str, row: usize) -> Result<u32> {
    let s = s.trim();
    if let Ok(age) = s.parse::<u32>() {
        return Ok(age);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Ok(f as u32)
        }
        _ => Err(LoadError::InvalidAge {
            row,
            value: s.to_string(),
        }),
    }
}

/// Parse a finite, non-negative amount.
fn parse_amount(s: &str, row: usize) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(LoadError::InvalidAmount {
            row,
            value: s.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. The eight schema columns may
/// appear in any order; any other columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut transactions = Vec::new();
    for (i, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;
        transactions.push(raw.into_transaction(i + 1)?);
    }
    Ok(transactions)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Date": "2024-03-01", "Store": "Dubai Mall", "Age": 34, "TotalAmount": 120.5, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Transaction>> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<Map<String, JsonValue>> = serde_json::from_str(&text)?;

    records
        .iter()
        .enumerate()
        .map(|(i, obj)| {
            let row = i + 1;
            let mut cells: [String; 8] = Default::default();
            for (cell, column) in cells.iter_mut().zip(COLUMNS) {
                *cell = json_cell(obj, column, row)?;
            }
            RawRow::from_cells(cells).into_transaction(row)
        })
        .collect()
}

fn json_cell(obj: &Map<String, JsonValue>, column: &'static str, row: usize) -> Result<String> {
    match obj.get(column) {
        None => Err(LoadError::MissingColumn(column)),
        Some(JsonValue::Null) => Err(LoadError::EmptyValue { row, column }),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per schema field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): text columns may be Utf8, LargeUtf8 or
/// Utf8View, `Date` may be a date, timestamp or text column, `Age` and
/// `TotalAmount` any numeric type.
fn load_parquet(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut transactions = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let mut columns = Vec::with_capacity(COLUMNS.len());
        for column in COLUMNS {
            let idx = schema
                .index_of(column)
                .map_err(|_| LoadError::MissingColumn(column))?;
            let array = batch.column(idx).clone();
            check_column_type(column, array.data_type())?;
            columns.push((column, array));
        }

        for batch_row in 0..batch.num_rows() {
            let row = transactions.len() + 1;
            let mut cells: [String; 8] = Default::default();
            for (cell, (column, array)) in cells.iter_mut().zip(&columns) {
                if array.is_null(batch_row) {
                    return Err(LoadError::EmptyValue { row, column: *column });
                }
                *cell = array_value_to_string(&**array, batch_row)?;
            }
            transactions.push(RawRow::from_cells(cells).into_transaction(row)?);
        }
    }

    Ok(transactions)
}

fn check_column_type(column: &'static str, data_type: &DataType) -> Result<()> {
    let is_text = matches!(
        data_type,
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View
    );
    let supported = match column {
        "Date" => {
            is_text
                || matches!(
                    data_type,
                    DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, None)
                )
        }
        "Age" | "TotalAmount" => data_type.is_numeric(),
        _ => is_text,
    };
    if supported {
        Ok(())
    } else {
        Err(LoadError::UnsupportedColumnType {
            column,
            data_type: data_type.to_string(),
        })
    }
}
