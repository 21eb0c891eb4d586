use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::database::Database;
use crate::error::BookingError;
use crate::models::Reservation;

/// Append-only audit trail of committed bookings. There is deliberately no
/// update or delete here.
#[derive(Clone)]
pub struct ReservationLog {
    db: Database,
}

impl ReservationLog {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // Пишет запись внутри транзакции вызывающего; id выдает база
    pub(crate) async fn append(
        &self,
        conn: &mut SqliteConnection,
        seat_ids: &[i64],
        timestamp: DateTime<Utc>,
    ) -> Result<Reservation, BookingError> {
        let encoded = Reservation::encode_ids(seat_ids);
        let result = sqlx::query("INSERT INTO reservations (seat_ids, timestamp) VALUES (?, ?)")
            .bind(&encoded)
            .bind(timestamp)
            .execute(&mut *conn)
            .await?;

        Ok(Reservation {
            reservation_id: result.last_insert_rowid(),
            seat_ids: seat_ids.to_vec(),
            timestamp,
        })
    }

    /// Full history, oldest first.
    pub async fn all(&self) -> Result<Vec<Reservation>, BookingError> {
        let rows = sqlx::query_as::<_, (i64, String, DateTime<Utc>)>(
            "SELECT reservation_id, seat_ids, timestamp FROM reservations ORDER BY reservation_id",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(reservation_id, raw, timestamp)| Reservation {
                reservation_id,
                seat_ids: Reservation::parse_ids(&raw),
                timestamp,
            })
            .collect())
    }

    pub async fn count(&self) -> Result<i64, BookingError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.db.pool)
            .await?)
    }
}
