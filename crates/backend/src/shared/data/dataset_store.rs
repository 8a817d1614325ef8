use contracts::projections::p910_demand_forecast::ForecastRow;
use contracts::projections::p911_product_associations::AssociationRule;
use contracts::projections::p912_store_sales::SalesRecord;
use once_cell::sync::OnceCell;

use super::error::LoadError;
use crate::projections::{p910_demand_forecast, p911_product_associations, p912_store_sales};
use crate::shared::config::DatasetsConfig;

static DATASETS: OnceCell<Datasets> = OnceCell::new();

/// The three read-only base tables
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    /// Never empty after a successful load
    pub forecast: Vec<ForecastRow>,
    pub associations: Vec<AssociationRule>,
    pub sales: Vec<SalesRecord>,
}

impl Datasets {
    /// Load all sources; the first failure aborts the whole load
    pub fn load(config: &DatasetsConfig) -> Result<Self, LoadError> {
        let forecast = p910_demand_forecast::loader::load_forecast(
            &config.forecast_path,
            &config.forecast_date_format,
        )?;
        let associations =
            p911_product_associations::loader::load_associations(&config.associations_path)?;
        let sales =
            p912_store_sales::loader::load_sales(&config.sales_path, &config.sales_date_format)?;

        Ok(Self {
            forecast,
            associations,
            sales,
        })
    }
}

/// Load the datasets and install them for the rest of the process lifetime.
pub fn initialize_datasets(config: &DatasetsConfig) -> Result<&'static Datasets, LoadError> {
    if DATASETS.get().is_some() {
        return Err(LoadError::AlreadyInitialized);
    }
    let datasets = Datasets::load(config)?;
    DATASETS
        .try_insert(datasets)
        .map_err(|_| LoadError::AlreadyInitialized)
}
