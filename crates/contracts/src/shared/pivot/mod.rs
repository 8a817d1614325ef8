pub mod matrix;
pub mod schema;

pub use matrix::*;
pub use schema::*;
