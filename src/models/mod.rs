pub mod reservation;
pub mod seat;

pub use reservation::Reservation;
pub use seat::{Seat, SeatStatus};
