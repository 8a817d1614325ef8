use serde::{Deserialize, Serialize};

/// How values landing in the same pivot cell are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    /// Arithmetic mean of all values
    #[default]
    Mean,
    /// Value of the last row seen
    Last,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
    /// Sum of values
    Sum,
}

impl AggregateFunction {
    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            AggregateFunction::Mean => "mean",
            AggregateFunction::Last => "last",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
            AggregateFunction::Sum => "sum",
        }
    }
}
