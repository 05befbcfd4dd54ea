use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::diameters::DiameterSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub data: DataConfig,
    pub diameters: DiametersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiametersConfig {
    /// CSV reference file holding the measured disk diameters.
    pub csv_path: PathBuf,
    pub settings: DiameterSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3001".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                    format!("sqlite://{}/database.sqlite", data_dir.display())
                }),
                max_connections: env::var("DB_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()?,
            },
            data: DataConfig {
                upload_dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("uploads")),
                logs_dir: env::var("LOGS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("logs")),
                data_dir: data_dir.clone(),
            },
            diameters: DiametersConfig {
                csv_path: env::var("DIAMETERS_CSV")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| data_dir.join("diameters.csv")),
                settings: DiameterSettings {
                    image_suffix: env::var("DIAMETER_IMAGE_SUFFIX")
                        .unwrap_or_else(|_| ".png".to_string()),
                    max_disks: env::var("DIAMETER_MAX_DISKS")
                        .unwrap_or_else(|_| "6".to_string())
                        .parse()?,
                },
            },
        })
    }
}
