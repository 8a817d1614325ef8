pub mod csv_source;
pub mod dataset_store;
pub mod error;

pub use error::LoadError;
