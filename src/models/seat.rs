use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Seat occupancy as persisted: 0 = free, 1 = booked.
///
/// The only transition is `Free -> Booked`; nothing in the system frees a
/// seat again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i64)]
pub enum SeatStatus {
    Free = 0,
    Booked = 1,
}

impl SeatStatus {
    pub fn is_free(self) -> bool {
        self == SeatStatus::Free
    }

    // Символ для текстовой схемы салона
    pub fn symbol(self) -> char {
        match self {
            SeatStatus::Free => 'O',
            SeatStatus::Booked => 'X',
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Seat {
    pub seat_id: i64,
    pub status: SeatStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_cabin_symbols() {
        assert!(SeatStatus::Free.is_free());
        assert!(!SeatStatus::Booked.is_free());
        assert_eq!(SeatStatus::Free.symbol(), 'O');
        assert_eq!(SeatStatus::Booked.symbol(), 'X');
    }
}
