pub mod engine;
pub mod chart;
pub mod rail;
pub mod state;
pub mod data;
