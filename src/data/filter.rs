use std::collections::{BTreeMap, BTreeSet};

use super::model::{Dimension, Transaction, TransactionTable};

// ---------------------------------------------------------------------------
// Filter selection: allowed values per dimension plus an age range
// ---------------------------------------------------------------------------

/// One render cycle's filter choices.
///
/// A dimension passes a transaction only when the transaction's value is in
/// that dimension's allowed set. A dimension with no entry, or an empty set,
/// allows nothing. The age range is inclusive on both ends; an inverted range
/// matches no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    allowed: BTreeMap<Dimension, BTreeSet<String>>,
    pub min_age: u32,
    pub max_age: u32,
}

impl FilterSelection {
    /// A selection with no allowed values and the given age range.
    pub fn new(min_age: u32, max_age: u32) -> Self {
        Self {
            allowed: BTreeMap::new(),
            min_age,
            max_age,
        }
    }

    /// Select every value of every dimension and the full age range
    /// (i.e., show everything).
    pub fn all(table: &TransactionTable) -> Self {
        let (min_age, max_age) = table.age_bounds().unwrap_or((0, u32::MAX));
        Dimension::ALL
            .into_iter()
            .fold(Self::new(min_age, max_age), |sel, dim| {
                sel.with_values(dim, table.distinct_values(dim).iter().cloned())
            })
    }

    pub fn with_values<I, S>(mut self, dim: Dimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_values(dim, values);
        self
    }

    /// Allowed values for `dim`, if the dimension has an entry.
    pub fn allowed(&self, dim: Dimension) -> Option<&BTreeSet<String>> {
        self.allowed.get(&dim)
    }

    pub fn is_allowed(&self, dim: Dimension, value: &str) -> bool {
        self.allowed
            .get(&dim)
            .is_some_and(|set| set.contains(value))
    }

    /// Replace the allowed set of `dim`.
    pub fn set_values<I, S>(&mut self, dim: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed
            .insert(dim, values.into_iter().map(Into::into).collect());
    }

    /// Flip membership of a single value.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let selected = self.allowed.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Deselect all values of `dim`.
    pub fn clear(&mut self, dim: Dimension) {
        self.allowed.insert(dim, BTreeSet::new());
    }

    pub fn set_age_range(&mut self, min_age: u32, max_age: u32) {
        self.min_age = min_age;
        self.max_age = max_age;
    }

    /// Whether a transaction passes every dimension and the age range.
    pub fn matches(&self, tx: &Transaction) -> bool {
        (self.min_age..=self.max_age).contains(&tx.age)
            && Dimension::ALL
                .into_iter()
                .all(|dim| self.is_allowed(dim, dim.value_of(tx)))
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the transactions matching `selection`, in their original order.
pub fn apply_filters<'a>(
    records: &'a [Transaction],
    selection: &FilterSelection,
) -> Vec<&'a Transaction> {
    records.iter().filter(|tx| selection.matches(tx)).collect()
}

/// Return indices of transactions that pass all filters.
pub fn filtered_indices(table: &TransactionTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| selection.matches(tx))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::summarize;
    use crate::data::model::tests::tx;

    fn scenario() -> Vec<Transaction> {
        vec![
            tx("Dubai", "Grocery", 30, 100.0),
            tx("Sharjah", "Grocery", 40, 50.0),
            tx("Dubai", "Electronics", 20, 200.0),
        ]
    }

    #[test]
    fn test_all_selection_is_identity() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        let sel = FilterSelection::all(&table);
        let out: Vec<Transaction> = apply_filters(&records, &sel).into_iter().cloned().collect();
        assert_eq!(out, records);
        assert_eq!(filtered_indices(&table, &sel), vec![0, 1, 2]);
    }

    #[test]
    fn test_any_empty_dimension_excludes_everything() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        for dim in Dimension::ALL {
            let mut sel = FilterSelection::all(&table);
            sel.clear(dim);
            assert!(apply_filters(&records, &sel).is_empty(), "{dim} cleared");
        }
    }

    #[test]
    fn test_missing_dimension_entry_excludes_everything() {
        let records = scenario();
        let sel = FilterSelection::new(0, 100)
            .with_values(Dimension::Store, ["Dubai", "Sharjah"])
            .with_values(Dimension::Gender, ["Female"])
            .with_values(Dimension::Nationality, ["UAE"])
            .with_values(Dimension::Category, ["Grocery", "Electronics"]);
        assert!(apply_filters(&records, &sel).is_empty());
    }

    #[test]
    fn test_category_restriction() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        let sel = FilterSelection::all(&table).with_values(Dimension::Category, ["Electronics"]);
        let out = apply_filters(&records, &sel);
        assert_eq!(out, vec![&records[2]]);

        let summary = summarize(out);
        assert_eq!(summary.total_sales, 200.0);
        assert_eq!(summary.transaction_count, 1);
    }

    #[test]
    fn test_unknown_values_match_nothing() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        let sel = FilterSelection::all(&table).with_values(Dimension::Store, ["Al Ain"]);
        assert!(apply_filters(&records, &sel).is_empty());
    }

    #[test]
    fn test_age_range_is_inclusive() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        let mut sel = FilterSelection::all(&table);
        sel.set_age_range(30, 40);
        assert_eq!(filtered_indices(&table, &sel), vec![0, 1]);
        sel.set_age_range(20, 20);
        assert_eq!(filtered_indices(&table, &sel), vec![2]);
    }

    #[test]
    fn test_inverted_age_range_matches_nothing() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        let mut sel = FilterSelection::all(&table);
        sel.set_age_range(40, 20);
        assert!(apply_filters(&records, &sel).is_empty());
    }

    #[test]
    fn test_filter_preserves_order() {
        let records = vec![
            tx("Dubai", "Toys", 25, 1.0),
            tx("Sharjah", "Toys", 26, 2.0),
            tx("Dubai", "Toys", 27, 3.0),
            tx("Dubai", "Toys", 28, 4.0),
        ];
        let table = TransactionTable::from_transactions(records.clone());
        let sel = FilterSelection::all(&table).with_values(Dimension::Store, ["Dubai"]);
        let ages: Vec<u32> = apply_filters(&records, &sel).iter().map(|t| t.age).collect();
        assert_eq!(ages, vec![25, 27, 28]);
    }

    #[test]
    fn test_single_dimension_complement_conserves_count() {
        let records = scenario();
        let table = TransactionTable::from_transactions(records.clone());
        let sel = FilterSelection::all(&table).with_values(Dimension::Store, ["Dubai"]);
        let complement = FilterSelection::all(&table).with_values(Dimension::Store, ["Sharjah"]);

        let kept = summarize(apply_filters(&records, &sel)).transaction_count;
        let rest = summarize(apply_filters(&records, &complement)).transaction_count;
        assert_eq!(kept + rest, summarize(&records).transaction_count);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut sel = FilterSelection::new(0, 10);
        sel.toggle(Dimension::Gender, "Male");
        assert!(sel.is_allowed(Dimension::Gender, "Male"));
        sel.toggle(Dimension::Gender, "Male");
        assert!(!sel.is_allowed(Dimension::Gender, "Male"));
        assert_eq!(sel.allowed(Dimension::Gender).map(|s| s.len()), Some(0));
    }

    #[test]
    fn test_empty_records() {
        let sel = FilterSelection::new(0, 100);
        assert!(apply_filters(&[], &sel).is_empty());
        let table = TransactionTable::default();
        assert!(filtered_indices(&table, &FilterSelection::all(&table)).is_empty());
    }
}
