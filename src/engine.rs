use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::BookingError;
use crate::models::SeatStatus;
use crate::reservation_log::ReservationLog;
use crate::store::SeatStore;

/// Picks seats for a request and drives the atomic commit across the seat
/// store and the reservation log.
///
/// Everything from the availability check to the commit runs under one
/// store-wide lock, so two overlapping requests can never pick the same
/// seat.
pub struct AllocationEngine {
    store: SeatStore,
    log: ReservationLog,
    guard: Mutex<()>,
}

impl AllocationEngine {
    pub fn new(store: SeatStore, log: ReservationLog) -> Self {
        Self {
            store,
            log,
            guard: Mutex::new(()),
        }
    }

    /// Books `requested` seats and returns their ids, ascending and 0-based.
    ///
    /// Seat update and log append share one transaction: on any failure the
    /// transaction rolls back and the cache is left untouched, so nothing
    /// observable changes.
    pub async fn book(&self, requested: usize) -> Result<Vec<i64>, BookingError> {
        if requested < 1 {
            return Err(BookingError::InvalidRequest);
        }

        let _guard = self.guard.lock().await;

        let mut tx = self.store.db().pool.begin().await?;
        let statuses = self.store.load_in_tx(&mut tx).await?;
        let available = statuses.iter().filter(|status| status.is_free()).count();

        let Some(ids) = select_seats(&statuses, requested, self.store.layout().row_width) else {
            debug!(
                "Rejecting booking: {} requested, {} available",
                requested, available
            );
            return Err(BookingError::InsufficientSeats {
                requested,
                available,
            });
        };

        self.store.mark_booked(&mut tx, &ids).await?;
        let reservation = self.log.append(&mut tx, &ids, Utc::now()).await?;
        tx.commit().await?;

        // Транзакция зафиксирована - только теперь трогаем кеш
        self.store.invalidate_cache().await;

        info!(
            "🎫 Reservation {} committed: seats {:?}",
            reservation.reservation_id, ids
        );
        Ok(ids)
    }
}

/// Greedy selection: the first row with enough free seats wins, otherwise
/// the first `requested` free ids overall. Deliberately not a bin-packer;
/// the single-row check is the only look-ahead there is.
pub(crate) fn select_seats(
    statuses: &[SeatStatus],
    requested: usize,
    row_width: usize,
) -> Option<Vec<i64>> {
    let free: Vec<i64> = statuses
        .iter()
        .enumerate()
        .filter(|(_, status)| status.is_free())
        .map(|(id, _)| id as i64)
        .collect();

    if free.len() < requested {
        return None;
    }

    // Сначала пробуем уместить весь запрос в один ряд
    for (row, seats) in statuses.chunks(row_width).enumerate() {
        let offset = (row * row_width) as i64;
        let row_free: Vec<i64> = seats
            .iter()
            .enumerate()
            .filter(|(_, status)| status.is_free())
            .map(|(pos, _)| offset + pos as i64)
            .collect();
        if row_free.len() >= requested {
            return Some(row_free[..requested].to_vec());
        }
    }

    // Ни один ряд не вмещает - первые свободные по всему салону
    Some(free[..requested].to_vec())
}
