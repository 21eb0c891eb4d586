use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::database::Database;
use crate::models::{Seat, SeatStatus};

// Кеш статусов мест. Единственный источник истины - таблица seats;
// кеш только read-through и сбрасывается после коммита.
#[derive(Clone)]
pub struct SeatCache {
    db: Database,
    statuses: Arc<RwLock<Option<Arc<Vec<SeatStatus>>>>>,
}

impl SeatCache {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            statuses: Arc::new(RwLock::new(None)),
        }
    }

    // Прогрев кеша при старте
    pub async fn warmup(&self) {
        info!("Starting seat cache warmup...");
        match self.get_statuses().await {
            Ok(statuses) => info!("Seat cache warmup done, {} seats", statuses.len()),
            Err(e) => warn!("Seat cache warmup failed: {:?}", e),
        }
    }

    /// Статусы всех мест по возрастанию seat_id.
    pub async fn get_statuses(&self) -> Result<Arc<Vec<SeatStatus>>, sqlx::Error> {
        // Сначала пробуем кеш
        if let Some(statuses) = self.statuses.read().await.clone() {
            return Ok(statuses);
        }

        // Если кеша нет - идем в БД
        let loaded = Arc::new(self.load_from_db().await?);
        *self.statuses.write().await = Some(loaded.clone());
        Ok(loaded)
    }

    // Вызывается только после зафиксированной транзакции
    pub async fn invalidate(&self) {
        *self.statuses.write().await = None;
    }

    async fn load_from_db(&self) -> Result<Vec<SeatStatus>, sqlx::Error> {
        let seats =
            sqlx::query_as::<_, Seat>("SELECT seat_id, status FROM seats ORDER BY seat_id")
                .fetch_all(&self.db.pool)
                .await?;
        Ok(seats.into_iter().map(|seat| seat.status).collect())
    }
}
