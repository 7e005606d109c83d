pub mod catalog;
pub mod type_chart;
