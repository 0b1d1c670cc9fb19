pub mod config;
pub mod error;
pub mod neighborhood;
pub mod proforma;
pub mod telemetry;
