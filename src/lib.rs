pub mod cache;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod models;
pub mod reservation_log;
pub mod store;
pub mod telemetry;

use crate::cache::SeatCache;
use crate::config::Config;
use crate::database::Database;
use crate::engine::AllocationEngine;
use crate::error::{BookingError, InitError};
use crate::models::{Reservation, SeatStatus};
use crate::reservation_log::ReservationLog;
use crate::store::SeatStore;

// Корневое состояние системы бронирования: один пул соединений,
// компоненты поверх него
pub struct ReservationSystem {
    pub db: Database,
    pub store: SeatStore,
    pub log: ReservationLog,
    pub engine: AllocationEngine,
    pub config: Config,
}

impl ReservationSystem {
    /// Opens the pool, runs migrations and wires the components together.
    /// [`ReservationSystem::initialize`] must still run once before any
    /// other operation.
    pub async fn new(config: Config) -> Result<Self, InitError> {
        config.validate()?;

        let db = Database::new(&config.database.url, config.database.pool_size)
            .await
            .map_err(InitError::Connect)?;
        db.run_migrations().await?;

        let cache = SeatCache::new(db.clone());
        let store = SeatStore::new(db.clone(), cache, config.layout.clone());
        let log = ReservationLog::new(db.clone());
        let engine = AllocationEngine::new(store.clone(), log.clone());

        Ok(Self {
            db,
            store,
            log,
            engine,
            config,
        })
    }

    /// Idempotent seeding of the seat table.
    pub async fn initialize(&self) -> Result<(), BookingError> {
        self.store.initialize().await
    }

    /// Status of every seat ordered by id, for rendering.
    pub async fn display(&self) -> Result<Vec<SeatStatus>, BookingError> {
        self.store.load().await
    }

    pub async fn count_available(&self) -> Result<usize, BookingError> {
        self.store.count_available().await
    }

    /// Books `requested` seats, preferring a single row. Returned ids are
    /// 0-based; any 1-based display translation is the front end's job.
    pub async fn book(&self, requested: usize) -> Result<Vec<i64>, BookingError> {
        self.engine.book(requested).await
    }

    /// Audit trail, oldest first.
    pub async fn reservations(&self) -> Result<Vec<Reservation>, BookingError> {
        self.log.all().await
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}
