//! Display module for formatted CLI output

pub mod table;

pub use table::{ScenarioRow, TableRenderer};
