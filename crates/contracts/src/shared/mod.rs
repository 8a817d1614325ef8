pub mod indicators;
pub mod pivot;
pub mod store;
