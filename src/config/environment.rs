//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto razonable para desarrollo.

use std::env;
use std::path::PathBuf;

use crate::utils::errors::{AppError, AppResult};

/// Tamaño de página por defecto de los listados
pub const DEFAULT_PAGE_OFFSET: usize = 20;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub data_dir: PathBuf,
    pub page_offset: usize,
    pub cors_origins: Vec<String>,
    pub seed_demo_data: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            data_dir: PathBuf::from("./data"),
            page_offset: DEFAULT_PAGE_OFFSET,
            cors_origins: Vec::new(),
            seed_demo_data: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Internal(format!("{} must be a valid value, got '{}'", name, raw))),
        _ => Ok(default),
    }
}

impl EnvironmentConfig {
    /// Lee la configuración del entorno (llamar tras `dotenvy::dotenv()`)
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        let page_offset: usize = parse_var("PAGE_OFFSET", defaults.page_offset)?;
        if page_offset == 0 {
            return Err(AppError::Internal("PAGE_OFFSET must be positive".to_string()));
        }

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            data_dir: env::var("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            page_offset,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            seed_demo_data: parse_var("SEED_DEMO_DATA", defaults.seed_demo_data)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.page_offset, DEFAULT_PAGE_OFFSET);
    }

    #[test]
    fn test_parse_var_falls_back_when_unset() {
        let value: usize = parse_var("TRANSIT_AGENCY_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }
}
