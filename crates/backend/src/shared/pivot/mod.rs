pub mod matrix_builder;

pub use matrix_builder::*;
