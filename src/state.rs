use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::{summarize, AggregationResult};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::{Dimension, TransactionTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub table: Option<Arc<TransactionTable>>,

    /// Current filter choices.
    pub selection: FilterSelection,

    /// Indices of transactions passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and breakdowns over `visible_indices` (cached).
    pub summary: AggregationResult,

    /// Colours for category bars, keyed on the full category list.
    pub category_colors: Option<ColorMap>,

    /// Currency code shown next to sales figures.
    pub currency: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            selection: FilterSelection::new(0, 0),
            visible_indices: Vec::new(),
            summary: AggregationResult::default(),
            category_colors: None,
            currency: "AED".to_string(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and select everything.
    pub fn set_table(&mut self, table: TransactionTable) {
        self.selection = FilterSelection::all(&table);
        self.category_colors = Some(ColorMap::new(table.distinct_values(Dimension::Category)));
        self.table = Some(Arc::new(table));
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and `summary` after a filter change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.visible_indices = filtered_indices(table, &self.selection);
        self.summary = summarize(
            self.visible_indices
                .iter()
                .map(|&i| &table.transactions[i]),
        );
        log::debug!(
            "{} of {} transactions visible",
            self.visible_indices.len(),
            table.len()
        );
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &str) {
        self.selection.toggle(dim, value);
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(table) = &self.table {
            self.selection
                .set_values(dim, table.distinct_values(dim).iter().cloned());
            self.refilter();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.clear(dim);
        self.refilter();
    }

    pub fn set_age_range(&mut self, min_age: u32, max_age: u32) {
        self.selection.set_age_range(min_age, max_age);
        self.refilter();
    }

    /// Back to the show-everything selection.
    pub fn reset_filters(&mut self) {
        if let Some(table) = &self.table {
            self.selection = FilterSelection::all(table);
            self.refilter();
        }
    }
}
