use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One committed booking: which seats, and when. Records are append-only;
/// there is no update or delete path anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: i64,
    pub seat_ids: Vec<i64>,
    pub timestamp: DateTime<Utc>,
}

impl Reservation {
    /// Ascending ids joined by commas, the persisted TEXT form.
    pub fn encode_ids(ids: &[i64]) -> String {
        ids.iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn parse_ids(raw: &str) -> Vec<i64> {
        raw.split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_ids_ascending_comma_joined() {
        assert_eq!(Reservation::encode_ids(&[3, 4, 5, 6]), "3,4,5,6");
        assert_eq!(Reservation::encode_ids(&[42]), "42");
        assert_eq!(Reservation::encode_ids(&[]), "");
    }

    #[test]
    fn parses_back_what_it_encodes() {
        let ids = vec![0, 7, 13, 79];
        assert_eq!(Reservation::parse_ids(&Reservation::encode_ids(&ids)), ids);
        assert_eq!(Reservation::parse_ids(""), Vec::<i64>::new());
    }
}
