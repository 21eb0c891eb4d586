use sqlx::SqliteConnection;
use std::collections::HashSet;
use tracing::{error, info};

use crate::cache::SeatCache;
use crate::config::LayoutConfig;
use crate::database::Database;
use crate::error::BookingError;
use crate::models::SeatStatus;

/// Durable seat state. Reads go through the cache, mutation happens only
/// inside a caller-owned transaction via [`SeatStore::mark_booked`].
#[derive(Clone)]
pub struct SeatStore {
    db: Database,
    cache: SeatCache,
    layout: LayoutConfig,
}

impl SeatStore {
    pub fn new(db: Database, cache: SeatCache, layout: LayoutConfig) -> Self {
        Self { db, cache, layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }

    /// Idempotent: seeds the layout on the first run, leaves existing rows
    /// untouched afterwards.
    pub async fn initialize(&self) -> Result<(), BookingError> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seats")
            .fetch_one(&self.db.pool)
            .await?;

        if existing == 0 {
            self.seed().await?;
        } else {
            info!(
                "Seats already initialized ({} rows), keeping current state",
                existing
            );
        }

        self.cache.warmup().await;
        Ok(())
    }

    async fn seed(&self) -> Result<(), BookingError> {
        let pre_booked: HashSet<i64> = self.layout.pre_booked.iter().copied().collect();

        let mut tx = self.db.pool.begin().await?;
        for seat_id in 0..self.layout.seats as i64 {
            let status = if pre_booked.contains(&seat_id) {
                SeatStatus::Booked
            } else {
                SeatStatus::Free
            };
            sqlx::query("INSERT INTO seats (seat_id, status) VALUES (?, ?)")
                .bind(seat_id)
                .bind(status)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        info!(
            "Seeded {} seats, {} pre-booked",
            self.layout.seats,
            pre_booked.len()
        );
        Ok(())
    }

    /// Status of every seat ordered by id.
    pub async fn load(&self) -> Result<Vec<SeatStatus>, BookingError> {
        Ok(self.cache.get_statuses().await?.as_ref().clone())
    }

    /// Ascending ids of the currently free seats.
    pub async fn available_ids(&self) -> Result<Vec<i64>, BookingError> {
        let statuses = self.cache.get_statuses().await?;
        Ok(statuses
            .iter()
            .enumerate()
            .filter(|(_, status)| status.is_free())
            .map(|(id, _)| id as i64)
            .collect())
    }

    pub async fn count_available(&self) -> Result<usize, BookingError> {
        let statuses = self.cache.get_statuses().await?;
        Ok(statuses.iter().filter(|status| status.is_free()).count())
    }

    // Снимок статусов внутри транзакции вызывающего, мимо кеша
    pub(crate) async fn load_in_tx(
        &self,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<SeatStatus>, BookingError> {
        let statuses =
            sqlx::query_scalar::<_, SeatStatus>("SELECT status FROM seats ORDER BY seat_id")
                .fetch_all(conn)
                .await?;
        Ok(statuses)
    }

    /// Flips every id Free -> Booked inside the caller's transaction.
    ///
    /// Every id must be in range and currently free; anything else is a
    /// broken contract upstream and aborts the whole attempt.
    pub(crate) async fn mark_booked(
        &self,
        conn: &mut SqliteConnection,
        ids: &[i64],
    ) -> Result<(), BookingError> {
        for &id in ids {
            if id < 0 || id >= self.layout.seats as i64 {
                error!("mark_booked called with out-of-range seat id {}", id);
                return Err(BookingError::InvalidSeat(id));
            }
        }

        for &id in ids {
            let updated =
                sqlx::query("UPDATE seats SET status = 1 WHERE seat_id = ? AND status = 0")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?
                    .rows_affected();
            if updated != 1 {
                error!("mark_booked called with already booked seat id {}", id);
                return Err(BookingError::AlreadyBooked(id));
            }
        }
        Ok(())
    }

    // Кеш трогаем только после успешного коммита
    pub(crate) async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }
}
