use std::env;
use std::net::SocketAddr;

use crate::error::AppError;
use crate::sheets::{DEFAULT_SHEET_CSV_URL, SheetConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub sheet: SheetConfig,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match (lookup("DATABASE_URL"), lookup("DB_NAME")) {
            (Some(url), _) => url,
            (None, Some(name)) => format!("sqlite://{}.db", name),
            (None, None) => {
                return Err(AppError::Config(
                    "DATABASE_URL or DB_NAME must be set".to_string(),
                ));
            }
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let mut sheet = SheetConfig::default();
        if let Some(url) = lookup("SHEET_CSV_URL") {
            sheet.csv_url = url;
        }

        Ok(Self {
            database_url,
            bind_addr,
            sheet,
        })
    }
}
