pub mod dashboard;
pub mod panels;
pub mod table;
