pub mod filter_engine;
pub mod kpi_aggregator;
pub mod service;
pub mod view_builder;
