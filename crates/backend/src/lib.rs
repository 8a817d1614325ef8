pub mod api;
pub mod dashboards;
pub mod projections;
pub mod routes;
pub mod shared;
