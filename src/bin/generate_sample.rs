use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use chrono::{Days, NaiveDate};
use parquet::arrow::ArrowWriter;
use sales_lens::data::loader::COLUMNS;
use sales_lens::data::model::Transaction;

const STORES: [&str; 4] = ["Al Barsha", "Mushrif Mall", "Al Wahda", "Sharjah Central"];
const GENDERS: [&str; 2] = ["Male", "Female"];
const NATIONALITIES: [&str; 6] = ["UAE", "India", "Pakistan", "Philippines", "Egypt", "UK"];
const CATEGORIES: [&str; 6] = [
    "Grocery",
    "Electronics",
    "Fashion",
    "Household",
    "Beauty",
    "Bakery",
];
const PAYMENT_METHODS: [&str; 3] = ["Cash", "Card", "Mobile Wallet"];

/// Price range (AED) per category, same order as `CATEGORIES`.
const PRICE_RANGES: [(f64, f64); 6] = [
    (20.0, 350.0),
    (150.0, 4500.0),
    (60.0, 900.0),
    (30.0, 600.0),
    (25.0, 400.0),
    (5.0, 80.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize % len
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.index(items.len())]
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid start date");

    (0..rows)
        .map(|_| {
            let cat_idx = rng.index(CATEGORIES.len());
            let (lo, hi) = PRICE_RANGES[cat_idx];
            let amount = (rng.uniform(lo, hi) * 100.0).round() / 100.0;
            Transaction {
                date: start + Days::new(rng.index(90) as u64),
                store: rng.pick(&STORES).to_string(),
                gender: rng.pick(&GENDERS).to_string(),
                nationality: rng.pick(&NATIONALITIES).to_string(),
                category: CATEGORIES[cat_idx].to_string(),
                payment_method: rng.pick(&PAYMENT_METHODS).to_string(),
                age: 18 + rng.index(53) as u32,
                total_amount: amount,
            }
        })
        .collect()
}

fn write_csv(path: &str, transactions: &[Transaction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for tx in transactions {
        writer.serialize(tx).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn text_column(transactions: &[Transaction], f: fn(&Transaction) -> &str) -> ArrayRef {
    Arc::new(StringArray::from(
        transactions.iter().map(f).collect::<Vec<_>>(),
    ))
}

fn to_record_batch(transactions: &[Transaction]) -> Result<RecordBatch> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch");
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|&name| {
                let data_type = match name {
                    "Date" => DataType::Date32,
                    "Age" => DataType::Int64,
                    "TotalAmount" => DataType::Float64,
                    _ => DataType::Utf8,
                };
                Field::new(name, data_type, false)
            })
            .collect::<Vec<_>>(),
    ));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Date32Array::from(
            transactions
                .iter()
                .map(|t| (t.date - epoch).num_days() as i32)
                .collect::<Vec<_>>(),
        )),
        text_column(transactions, |t| &t.store),
        text_column(transactions, |t| &t.gender),
        text_column(transactions, |t| &t.nationality),
        text_column(transactions, |t| &t.category),
        text_column(transactions, |t| &t.payment_method),
        Arc::new(Int64Array::from(
            transactions.iter().map(|t| t.age as i64).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            transactions.iter().map(|t| t.total_amount).collect::<Vec<_>>(),
        )),
    ];

    RecordBatch::try_new(schema, columns).context("building record batch")
}

fn write_parquet(path: &str, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let rows: usize = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("row count '{arg}' is not a number"))?,
        None => 50,
    };

    let mut rng = SimpleRng::new(42);
    let transactions = generate(rows, &mut rng);

    let csv_path = "sample_transactions.csv";
    let parquet_path = "sample_transactions.parquet";

    write_csv(csv_path, &transactions)?;
    let batch = to_record_batch(&transactions)?;
    write_parquet(parquet_path, &batch)?;

    let preview = batch.slice(0, batch.num_rows().min(5));
    log::info!("First rows:\n{}", pretty_format_batches(&[preview])?);

    println!("Wrote {rows} transactions to {csv_path} and {parquet_path}");
    Ok(())
}
