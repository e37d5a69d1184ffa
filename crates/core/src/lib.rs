#![warn(clippy::all, missing_docs)]

//! Core domain logic for the train reservation manager.
//!
//! This crate hosts the train and ticket models, the seed catalog,
//! configuration handling, and the reservation manager that keeps
//! seat bookings and issued tickets consistent with each other.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod reservation;

pub use crate::catalog::TrainSpec;
pub use crate::config::AppConfig;
pub use crate::error::{CatalogError, ReservationError};
pub use crate::models::{SeatNumber, Ticket, TicketId, Train, TrainNumber, TrainSummary};
pub use crate::reservation::{ReservationManager, SharedReservations};
