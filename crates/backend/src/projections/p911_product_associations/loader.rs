use contracts::projections::p911_product_associations::{AssociationRule, ProductSet};
use std::io::Read;
use std::path::Path;

use crate::shared::data::csv_source;
use crate::shared::data::LoadError;

pub const DATASET: &str = "associations";

const ANTECEDENTS: &str = "antecedents";
const CONSEQUENTS: &str = "consequents";
const LIFT: &str = "lift";
const STORE: &str = "Store";

/// Parse association rules (`antecedents`, `consequents`, `lift`, `Store`).
pub fn read_associations<R: Read>(input: R) -> Result<Vec<AssociationRule>, LoadError> {
    csv_source::read_rows(
        DATASET,
        input,
        &[ANTECEDENTS, CONSEQUENTS, LIFT, STORE],
        |fields| {
            let lift = fields.number(LIFT)?;
            if lift < 0.0 {
                return Err(fields.invalid(LIFT, "lift must be non-negative"));
            }
            Ok(AssociationRule {
                antecedent: fields.parse::<ProductSet>(ANTECEDENTS)?,
                consequent: fields.parse::<ProductSet>(CONSEQUENTS)?,
                lift,
                store: fields.store_id(STORE)?,
            })
        },
    )
}

pub fn load_associations(path: &Path) -> Result<Vec<AssociationRule>, LoadError> {
    let file = csv_source::open(DATASET, path)?;
    let rules = read_associations(file)?;
    tracing::info!(
        "Loaded {} association rules from {}",
        rules.len(),
        path.display()
    );
    Ok(rules)
}
