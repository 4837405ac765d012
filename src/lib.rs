pub mod config;
pub mod generate;
pub mod logging;
pub mod model;
pub mod repo;
pub mod transactions;
