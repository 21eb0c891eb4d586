use serde::Deserialize;
use std::collections::HashSet;
use std::env;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub layout: LayoutConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки базы данных
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Раскладка салона: количество мест, ширина ряда и места,
// закрытые для продажи с самого начала
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub seats: usize,
    pub row_width: usize,
    pub pre_booked: Vec<i64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            seats: 80,
            row_width: 7,
            pre_booked: vec![0, 1, 2, 15, 22, 23, 33, 34, 35],
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seats < 1 {
            return Err(ConfigError::SeatCount(self.seats as i64));
        }
        if self.row_width < 1 || self.row_width > self.seats {
            return Err(ConfigError::RowWidth(self.row_width as i64));
        }
        let mut seen = HashSet::new();
        for &id in &self.pre_booked {
            if id < 0 || id >= self.seats as i64 {
                return Err(ConfigError::PreBookedOutOfRange(id));
            }
            if !seen.insert(id) {
                return Err(ConfigError::PreBookedDuplicate(id));
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seatwise=debug".to_string()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://seatwise.db".to_string()),
                pool_size: env::var("DB_POOL_SIZE")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("DB_POOL_SIZE must be a valid number"),
            },
            layout: LayoutConfig {
                seats: env::var("SEAT_COUNT")
                    .unwrap_or_else(|_| "80".to_string())
                    .parse()
                    .expect("SEAT_COUNT must be a valid number"),
                row_width: env::var("ROW_WIDTH")
                    .unwrap_or_else(|_| "7".to_string())
                    .parse()
                    .expect("ROW_WIDTH must be a valid number"),
                pre_booked: env::var("PRE_BOOKED_SEATS")
                    .unwrap_or_else(|_| "0,1,2,15,22,23,33,34,35".to_string())
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(|part| {
                        part.parse()
                            .expect("PRE_BOOKED_SEATS must be comma-separated seat ids")
                    })
                    .collect(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }
}
