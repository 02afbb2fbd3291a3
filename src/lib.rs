//! Sales-by-demographics dashboard: load a transaction table, narrow it with
//! categorical and age filters, and summarise what is left.
//!
//! [`data::filter::apply_filters`] and [`data::aggregate::summarize`] are pure
//! functions over an immutable [`data::model::TransactionTable`]; everything
//! else exists to feed them and show their output.

pub mod color;
pub mod data;
pub mod fmt;
pub mod settings;
pub mod state;
