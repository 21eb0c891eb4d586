use thiserror::Error;

// Ошибки конфигурации: раскладка салона проверяется до открытия БД
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("seat count must be at least 1, got {0}")]
    SeatCount(i64),
    #[error("row width must be between 1 and the seat count, got {0}")]
    RowWidth(i64),
    #[error("pre-booked seat id {0} is outside the layout")]
    PreBookedOutOfRange(i64),
    #[error("pre-booked seat id {0} is listed more than once")]
    PreBookedDuplicate(i64),
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Outcome of a booking attempt that did not succeed.
///
/// `InvalidSeat` and `AlreadyBooked` are contract violations inside the
/// store and abort the attempt without any partial write. `Persistence`
/// is the "try again" condition: the selection never happened as far as
/// the durable state is concerned.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("requested seat count must be at least 1")]
    InvalidRequest,
    #[error("not enough free seats: requested {requested}, available {available}")]
    InsufficientSeats { requested: usize, available: usize },
    #[error("seat id {0} is outside the layout")]
    InvalidSeat(i64),
    #[error("seat id {0} is already booked")]
    AlreadyBooked(i64),
    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl BookingError {
    /// Транзиентная ошибка: фронтенд может предложить повторить запрос
    pub fn is_transient(&self) -> bool {
        matches!(self, BookingError::Persistence(_))
    }
}
