use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Transaction – one row of the dataset
// ---------------------------------------------------------------------------

/// A single sales transaction.
///
/// Field names serialize to the source file's column headers, so written
/// rows load back through the normal loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Nationality")]
    pub nationality: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "TotalAmount")]
    pub total_amount: f64,
}

// ---------------------------------------------------------------------------
// Dimension – a categorical column that can be filtered on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Store,
    Gender,
    Nationality,
    Category,
    PaymentMethod,
}

impl Dimension {
    /// All categorical dimensions, in the order the filter panel shows them.
    pub const ALL: [Dimension; 5] = [
        Dimension::Store,
        Dimension::Gender,
        Dimension::Nationality,
        Dimension::Category,
        Dimension::PaymentMethod,
    ];

    /// Human-readable label for filter headers.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Store => "Store",
            Dimension::Gender => "Gender",
            Dimension::Nationality => "Nationality",
            Dimension::Category => "Category",
            Dimension::PaymentMethod => "Payment Method",
        }
    }

    /// Column header in the source file.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Store => "Store",
            Dimension::Gender => "Gender",
            Dimension::Nationality => "Nationality",
            Dimension::Category => "Category",
            Dimension::PaymentMethod => "PaymentMethod",
        }
    }

    pub fn value_of(self, tx: &Transaction) -> &str {
        match self {
            Dimension::Store => &tx.store,
            Dimension::Gender => &tx.gender,
            Dimension::Nationality => &tx.nationality,
            Dimension::Category => &tx.category,
            Dimension::PaymentMethod => &tx.payment_method,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// TransactionTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
///
/// Built once after loading and never mutated; the presentation layer holds
/// it behind an `Arc` and hands out shared references to the engines.
#[derive(Debug, Clone, Default)]
pub struct TransactionTable {
    /// All transactions (rows), in file order.
    pub transactions: Vec<Transaction>,
    /// For each dimension the distinct values in first-occurrence order.
    distinct: BTreeMap<Dimension, Vec<String>>,
    age_bounds: Option<(u32, u32)>,
    date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl TransactionTable {
    /// Build column indices from the loaded transactions.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let mut distinct: BTreeMap<Dimension, Vec<String>> = BTreeMap::new();
        let mut seen: BTreeMap<Dimension, HashSet<&str>> = BTreeMap::new();
        let mut age_bounds: Option<(u32, u32)> = None;
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;

        for tx in &transactions {
            for dim in Dimension::ALL {
                let value = dim.value_of(tx);
                if seen.entry(dim).or_default().insert(value) {
                    distinct.entry(dim).or_default().push(value.to_string());
                }
            }
            age_bounds = Some(match age_bounds {
                Some((lo, hi)) => (lo.min(tx.age), hi.max(tx.age)),
                None => (tx.age, tx.age),
            });
            date_bounds = Some(match date_bounds {
                Some((lo, hi)) => (lo.min(tx.date), hi.max(tx.date)),
                None => (tx.date, tx.date),
            });
        }

        TransactionTable {
            transactions,
            distinct,
            age_bounds,
            date_bounds,
        }
    }

    /// Distinct values of a dimension, in the order they first appear.
    pub fn distinct_values(&self, dim: Dimension) -> &[String] {
        self.distinct.get(&dim).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Smallest and largest age in the dataset.
    pub fn age_bounds(&self) -> Option<(u32, u32)> {
        self.age_bounds
    }

    /// Earliest and latest transaction date.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_bounds
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand used across the data-layer tests.
    pub(crate) fn tx(store: &str, category: &str, age: u32, total_amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            store: store.to_string(),
            gender: "Female".to_string(),
            nationality: "UAE".to_string(),
            category: category.to_string(),
            payment_method: "Card".to_string(),
            age,
            total_amount,
        }
    }

    #[test]
    fn test_distinct_values_keep_first_occurrence_order() {
        let table = TransactionTable::from_transactions(vec![
            tx("Sharjah", "Grocery", 30, 10.0),
            tx("Dubai", "Electronics", 41, 20.0),
            tx("Sharjah", "Bakery", 22, 5.0),
            tx("Abu Dhabi", "Grocery", 58, 7.5),
        ]);
        assert_eq!(
            table.distinct_values(Dimension::Store),
            ["Sharjah", "Dubai", "Abu Dhabi"]
        );
        assert_eq!(
            table.distinct_values(Dimension::Category),
            ["Grocery", "Electronics", "Bakery"]
        );
        assert_eq!(table.distinct_values(Dimension::Gender), ["Female"]);
        assert_eq!(table.age_bounds(), Some((22, 58)));
    }

    #[test]
    fn test_date_bounds() {
        let mut early = tx("Dubai", "Grocery", 30, 1.0);
        early.date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let late = tx("Dubai", "Grocery", 30, 1.0);
        let table = TransactionTable::from_transactions(vec![late.clone(), early.clone()]);
        assert_eq!(table.date_bounds(), Some((early.date, late.date)));
    }

    #[test]
    fn test_empty_table_has_no_bounds() {
        let table = TransactionTable::from_transactions(Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.age_bounds(), None);
        assert_eq!(table.date_bounds(), None);
        assert!(table.distinct_values(Dimension::Store).is_empty());
    }

    #[test]
    fn test_dimension_accessors() {
        let t = tx("Ajman", "Toys", 19, 3.0);
        assert_eq!(Dimension::Store.value_of(&t), "Ajman");
        assert_eq!(Dimension::Category.value_of(&t), "Toys");
        assert_eq!(Dimension::PaymentMethod.value_of(&t), "Card");
        assert_eq!(Dimension::PaymentMethod.column(), "PaymentMethod");
        assert_eq!(Dimension::PaymentMethod.to_string(), "Payment Method");
    }
}
