use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

use seatwise::config::{AppConfig, Config, DatabaseConfig, LayoutConfig};
use seatwise::error::BookingError;
use seatwise::models::SeatStatus;
use seatwise::ReservationSystem;

const PRE_BOOKED: [i64; 9] = [0, 1, 2, 15, 22, 23, 33, 34, 35];

fn config_for(path: &Path, layout: LayoutConfig) -> Config {
    Config {
        app: AppConfig {
            environment: "test".to_string(),
            rust_log: "seatwise=debug".to_string(),
        },
        database: DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            pool_size: 2,
        },
        layout,
    }
}

async fn open_system(path: &Path) -> Result<ReservationSystem> {
    let system = ReservationSystem::new(config_for(path, LayoutConfig::default())).await?;
    system.initialize().await?;
    Ok(system)
}

#[tokio::test]
async fn initialize_seeds_the_reference_layout_once() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    let display = system.display().await?;
    assert_eq!(display.len(), 80);
    for (id, status) in display.iter().enumerate() {
        let expected = if PRE_BOOKED.contains(&(id as i64)) {
            SeatStatus::Booked
        } else {
            SeatStatus::Free
        };
        assert_eq!(*status, expected, "seat {}", id);
    }
    assert_eq!(system.count_available().await?, 71);

    // a second initialize is a no-op
    system.initialize().await?;
    assert_eq!(system.display().await?, display);
    assert_eq!(system.count_available().await?, 71);
    Ok(())
}

#[tokio::test]
async fn booking_prefers_a_single_row() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    // row 0 is ids 0..7 with 0,1,2 pre-booked, leaving exactly four seats
    assert_eq!(system.book(4).await?, vec![3, 4, 5, 6]);
    assert_eq!(system.count_available().await?, 67);

    // row 0 is now full; row 1 is the first row with seven free seats
    assert_eq!(system.book(7).await?, vec![7, 8, 9, 10, 11, 12, 13]);
    assert_eq!(system.count_available().await?, 60);
    Ok(())
}

#[tokio::test]
async fn booking_falls_back_across_rows_when_no_row_fits() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    // widest row holds 7, so a request for 8 takes the first free ids overall
    assert_eq!(system.book(8).await?, vec![3, 4, 5, 6, 7, 8, 9, 10]);
    Ok(())
}

#[tokio::test]
async fn booking_flips_exactly_the_returned_seats() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    let before = system.display().await?;
    let available_before = system.count_available().await?;

    let ids = system.book(5).await?;
    assert_eq!(ids.len(), 5);
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    for &id in &ids {
        assert_eq!(before[id as usize], SeatStatus::Free);
    }

    let after = system.display().await?;
    let changed: Vec<i64> = before
        .iter()
        .zip(after.iter())
        .enumerate()
        .filter(|(_, (b, a))| b != a)
        .map(|(id, _)| id as i64)
        .collect();
    assert_eq!(changed, ids);
    assert_eq!(system.count_available().await?, available_before - 5);
    Ok(())
}

#[tokio::test]
async fn insufficient_request_changes_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    let before = system.display().await?;
    match system.book(72).await {
        Err(BookingError::InsufficientSeats {
            requested,
            available,
        }) => {
            assert_eq!(requested, 72);
            assert_eq!(available, 71);
        }
        other => panic!("expected InsufficientSeats, got {:?}", other),
    }

    assert_eq!(system.display().await?, before);
    assert!(system.reservations().await?.is_empty());
    assert_eq!(system.log.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn zero_seat_request_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    let err = system.book(0).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidRequest));
    assert!(!err.is_transient());
    assert_eq!(system.count_available().await?, 71);
    Ok(())
}

#[tokio::test]
async fn every_booking_appends_exactly_one_reservation() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    let first = system.book(4).await?;
    let second = system.book(7).await?;

    let reservations = system.reservations().await?;
    assert_eq!(reservations.len(), 2);
    assert_eq!(reservations[0].reservation_id, 1);
    assert_eq!(reservations[0].seat_ids, first);
    assert_eq!(reservations[1].reservation_id, 2);
    assert_eq!(reservations[1].seat_ids, second);
    assert!(reservations[0].timestamp <= reservations[1].timestamp);
    Ok(())
}

#[tokio::test]
async fn state_survives_a_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("seats.db");

    let system = open_system(&path).await?;
    system.book(4).await?;
    system.book(7).await?;
    let display = system.display().await?;
    let available = system.count_available().await?;
    system.close().await;

    let reopened = open_system(&path).await?;
    assert_eq!(reopened.display().await?, display);
    assert_eq!(reopened.count_available().await?, available);
    assert_eq!(reopened.reservations().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn the_whole_cabin_can_be_consumed() -> Result<()> {
    let dir = TempDir::new()?;
    let system = open_system(&dir.path().join("seats.db")).await?;

    // no upper bound besides the free count: one request may take everything
    let ids = system.book(71).await?;
    assert_eq!(ids.len(), 71);
    assert_eq!(system.count_available().await?, 0);

    match system.book(1).await {
        Err(BookingError::InsufficientSeats {
            requested,
            available,
        }) => {
            assert_eq!(requested, 1);
            assert_eq!(available, 0);
        }
        other => panic!("expected InsufficientSeats, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn custom_layouts_are_respected() -> Result<()> {
    let dir = TempDir::new()?;
    let layout = LayoutConfig {
        seats: 10,
        row_width: 4,
        pre_booked: vec![],
    };
    let system =
        ReservationSystem::new(config_for(&dir.path().join("seats.db"), layout)).await?;
    system.initialize().await?;

    assert_eq!(system.book(3).await?, vec![0, 1, 2]);
    // row 0 only has seat 3 left, row 1 still fits the request
    assert_eq!(system.book(3).await?, vec![4, 5, 6]);
    // no row with three free seats remains: 3, 7 and 8 win by id order
    assert_eq!(system.book(3).await?, vec![3, 7, 8]);
    assert_eq!(system.count_available().await?, 1);
    Ok(())
}

#[tokio::test]
async fn invalid_layout_is_refused_before_touching_the_database() -> Result<()> {
    let dir = TempDir::new()?;
    let layout = LayoutConfig {
        seats: 10,
        row_width: 4,
        pre_booked: vec![10],
    };
    let result = ReservationSystem::new(config_for(&dir.path().join("seats.db"), layout)).await;
    assert!(result.is_err());
    Ok(())
}
