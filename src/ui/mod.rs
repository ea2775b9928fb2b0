//! egui rendering of the dashboard.

pub mod panels;
pub mod plot;
pub mod table;
