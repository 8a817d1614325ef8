use contracts::shared::pivot::AggregateFunction;
use contracts::shared::store::StoreId;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub datasets: DatasetsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    /// Enables debug-level logging
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetsConfig {
    pub forecast_path: PathBuf,
    pub associations_path: PathBuf,
    pub sales_path: PathBuf,
    #[serde(default = "default_forecast_date_format")]
    pub forecast_date_format: String,
    #[serde(default = "default_sales_date_format")]
    pub sales_date_format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Stores selected when the dashboard opens
    #[serde(default = "default_stores")]
    pub default_stores: Vec<StoreId>,
    /// Policy for duplicate antecedent/consequent pairs in the lift matrix
    #[serde(default)]
    pub lift_aggregate: AggregateFunction,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_stores: default_stores(),
            lift_aggregate: AggregateFunction::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_forecast_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_sales_date_format() -> String {
    "%d-%m-%Y".to_string()
}

fn default_stores() -> Vec<StoreId> {
    vec![StoreId(1)]
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 8050
debug = false

[datasets]
forecast_path = "data/forecast_data.csv"
associations_path = "data/product_associations.csv"
sales_path = "data/Walmart.csv"
forecast_date_format = "%Y-%m-%d"
sales_date_format = "%d-%m-%Y"

[dashboard]
default_stores = [1]
lift_aggregate = "mean"
"#;

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::File(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Embedded => f.write_str("embedded defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub origin: ConfigOrigin,
}

/// Load configuration.
///
/// Search order:
/// 1. File named by `DASHBOARD_CONFIG`
/// 2. config.toml next to the executable
/// 3. config.toml in the working directory
/// 4. Embedded default config
///
/// Runs before logging is set up, so it reports its choice via `origin`.
pub fn load_config() -> anyhow::Result<LoadedConfig> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(explicit);
        let config = load_from_file(&path)?;
        return Ok(LoadedConfig {
            config,
            origin: ConfigOrigin::File(path),
        });
    }

    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(std::env::current_dir()?.join("config.toml"));

    for path in candidates {
        if path.exists() {
            let config = load_from_file(&path)?;
            return Ok(LoadedConfig {
                config,
                origin: ConfigOrigin::File(path),
            });
        }
    }

    // Fall back to default config, paths relative to the working directory
    let config = parse_config(DEFAULT_CONFIG, &std::env::current_dir()?)?;
    Ok(LoadedConfig {
        config,
        origin: ConfigOrigin::Embedded,
    })
}

/// Read a config file; relative dataset paths resolve against its directory
pub fn load_from_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read config {}: {e}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&contents, base_dir)
}

/// Parse TOML and resolve relative dataset paths against `base_dir`
pub fn parse_config(contents: &str, base_dir: &Path) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.datasets.resolve_paths(base_dir);
    Ok(config)
}

impl DatasetsConfig {
    fn resolve_paths(&mut self, base_dir: &Path) {
        for path in [
            &mut self.forecast_path,
            &mut self.associations_path,
            &mut self.sales_path,
        ] {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }
}
