pub mod p910_demand_forecast;
pub mod p911_product_associations;
pub mod p912_store_sales;
