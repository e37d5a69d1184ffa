//! Reservation bookkeeping over the train catalog.

/// Single-owner reservation manager.
pub mod manager;
/// Lock-guarded handle for callers that share one manager.
pub mod shared;

pub use manager::ReservationManager;
pub use shared::SharedReservations;
