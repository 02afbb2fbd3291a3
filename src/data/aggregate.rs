use std::collections::HashMap;
use std::fmt;

use super::model::Transaction;

// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------

/// Fixed age groups for the age breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    Youth,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

/// Bucket edges: bucket `i` holds ages in `EDGES[i]..EDGES[i + 1]`.
const EDGES: [u32; 6] = [15, 25, 35, 45, 55, 100];

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Youth,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
    ];

    /// Bucket containing `age`, or `None` below 15 or from 100 up.
    pub fn for_age(age: u32) -> Option<AgeBucket> {
        Self::ALL
            .into_iter()
            .zip(EDGES.windows(2))
            .find(|(_, edge)| (edge[0]..edge[1]).contains(&age))
            .map(|(bucket, _)| bucket)
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBucket::Youth => "16-24",
            AgeBucket::YoungAdult => "25-34",
            AgeBucket::Adult => "35-44",
            AgeBucket::MiddleAged => "45-54",
            AgeBucket::Senior => "55+",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Aggregation result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySales {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeGroupSales {
    pub bucket: AgeBucket,
    pub total: f64,
}

/// Summary metrics and breakdowns over a set of transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub total_sales: f64,
    pub transaction_count: usize,
    /// Only categories present in the input, largest total first.
    pub sales_by_category: Vec<CategorySales>,
    /// Always all five buckets, in label order, zero when empty.
    pub sales_by_age_group: [AgeGroupSales; 5],
}

impl Default for AggregationResult {
    fn default() -> Self {
        Self {
            total_sales: 0.0,
            transaction_count: 0,
            sales_by_category: Vec::new(),
            sales_by_age_group: AgeBucket::ALL.map(|bucket| AgeGroupSales { bucket, total: 0.0 }),
        }
    }
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

// ---------------------------------------------------------------------------
// Summarize
// ---------------------------------------------------------------------------

/// Compute totals and grouped sums in a single pass.
///
/// Categories with equal totals keep the order in which they first appear
/// in `records`.
pub fn summarize<'a, I>(records: I) -> AggregationResult
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut result = AggregationResult::default();
    let mut category_index: HashMap<&'a str, usize> = HashMap::new();

    for tx in records {
        result.transaction_count += 1;

        let idx = *category_index
            .entry(tx.category.as_str())
            .or_insert_with(|| {
                result.sales_by_category.push(CategorySales {
                    category: tx.category.clone(),
                    total: 0.0,
                });
                result.sales_by_category.len() - 1
            });
        result.sales_by_category[idx].total += tx.total_amount;

        if let Some(bucket) = AgeBucket::for_age(tx.age) {
            result.sales_by_age_group[bucket as usize].total += tx.total_amount;
        }
    }

    // Stable sort keeps first-occurrence order among ties.
    result
        .sales_by_category
        .sort_by(|a, b| b.total.total_cmp(&a.total));

    // Summed from the groups so it equals their sum exactly.
    result.total_sales = result.sales_by_category.iter().map(|c| c.total).sum();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::tx;

    fn age_totals(result: &AggregationResult) -> Vec<(&'static str, f64)> {
        result
            .sales_by_age_group
            .iter()
            .map(|g| (g.bucket.label(), g.total))
            .collect()
    }

    #[test]
    fn test_scenario_totals_and_breakdowns() {
        let records = vec![
            tx("Dubai", "Grocery", 30, 100.0),
            tx("Dubai", "Grocery", 40, 50.0),
            tx("Dubai", "Electronics", 20, 200.0),
        ];
        let result = summarize(&records);
        assert_eq!(result.total_sales, 350.0);
        assert_eq!(result.transaction_count, 3);
        assert_eq!(
            result.sales_by_category,
            vec![
                CategorySales { category: "Electronics".into(), total: 200.0 },
                CategorySales { category: "Grocery".into(), total: 150.0 },
            ]
        );
        assert_eq!(
            age_totals(&result),
            vec![
                ("16-24", 200.0),
                ("25-34", 100.0),
                ("35-44", 50.0),
                ("45-54", 0.0),
                ("55+", 0.0),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let result = summarize(&[] as &[Transaction]);
        assert!(result.is_empty());
        assert_eq!(result.total_sales, 0.0);
        assert!(result.sales_by_category.is_empty());
        assert_eq!(result.sales_by_age_group.len(), 5);
        assert!(result.sales_by_age_group.iter().all(|g| g.total == 0.0));
        assert_eq!(result, AggregationResult::default());
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AgeBucket::for_age(14), None);
        assert_eq!(AgeBucket::for_age(15), Some(AgeBucket::Youth));
        assert_eq!(AgeBucket::for_age(24), Some(AgeBucket::Youth));
        assert_eq!(AgeBucket::for_age(25), Some(AgeBucket::YoungAdult));
        assert_eq!(AgeBucket::for_age(35), Some(AgeBucket::Adult));
        assert_eq!(AgeBucket::for_age(54), Some(AgeBucket::MiddleAged));
        assert_eq!(AgeBucket::for_age(55), Some(AgeBucket::Senior));
        assert_eq!(AgeBucket::for_age(99), Some(AgeBucket::Senior));
        assert_eq!(AgeBucket::for_age(100), None);
    }

    #[test]
    fn test_age_25_lands_in_second_bucket() {
        let result = summarize(&[tx("Dubai", "Toys", 25, 40.0)]);
        assert_eq!(
            age_totals(&result),
            vec![
                ("16-24", 0.0),
                ("25-34", 40.0),
                ("35-44", 0.0),
                ("45-54", 0.0),
                ("55+", 0.0),
            ]
        );
    }

    #[test]
    fn test_out_of_bucket_ages_still_count_toward_totals() {
        let records = vec![
            tx("Dubai", "Toys", 12, 10.0),
            tx("Dubai", "Toys", 100, 20.0),
            tx("Dubai", "Toys", 25, 5.0),
        ];
        let result = summarize(&records);
        assert_eq!(result.total_sales, 35.0);
        assert_eq!(result.transaction_count, 3);
        let bucketed: f64 = result.sales_by_age_group.iter().map(|g| g.total).sum();
        assert_eq!(bucketed, 5.0);
        assert_eq!(result.sales_by_age_group[1].total, 5.0);
    }

    #[test]
    fn test_category_sum_matches_total() {
        let records = vec![
            tx("Dubai", "Grocery", 30, 12.25),
            tx("Dubai", "Bakery", 61, 3.5),
            tx("Dubai", "Grocery", 44, 7.75),
            tx("Dubai", "Fashion", 18, 90.0),
        ];
        let result = summarize(&records);
        let by_category: f64 = result.sales_by_category.iter().map(|c| c.total).sum();
        assert_eq!(by_category, result.total_sales);
        assert_eq!(result.sales_by_category[0].category, "Fashion");
    }

    #[test]
    fn test_category_sum_matches_total_with_inexact_amounts() {
        let records = vec![
            tx("Dubai", "A", 30, 127.53),
            tx("Dubai", "B", 30, 380.48),
            tx("Dubai", "B", 30, 325.8),
            tx("Dubai", "A", 30, 46.93),
        ];
        let result = summarize(&records);
        let by_category: f64 = result.sales_by_category.iter().map(|c| c.total).sum();
        assert_eq!(by_category, result.total_sales);
        assert!((result.total_sales - 880.74).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_occurrence_order() {
        let records = vec![
            tx("Dubai", "Toys", 30, 10.0),
            tx("Dubai", "Bakery", 30, 10.0),
            tx("Dubai", "Apparel", 30, 10.0),
        ];
        let names: Vec<String> = summarize(&records)
            .sales_by_category
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, vec!["Toys", "Bakery", "Apparel"]);
    }

    #[test]
    fn test_age_groups_always_in_label_order() {
        let records = vec![tx("Dubai", "Toys", 70, 500.0), tx("Dubai", "Toys", 16, 1.0)];
        let labels: Vec<&str> = summarize(&records)
            .sales_by_age_group
            .iter()
            .map(|g| g.bucket.label())
            .collect();
        assert_eq!(labels, vec!["16-24", "25-34", "35-44", "45-54", "55+"]);
    }
}
