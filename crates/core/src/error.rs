//! Error types raised by the reservation core.

use thiserror::Error;

use crate::models::{SeatNumber, TicketId, TrainNumber};

/// Failure reported by a reservation operation.
///
/// Every variant is recoverable: the operation that produced it left the
/// manager untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// No train in the catalog carries this number.
    #[error("train {0} not found")]
    TrainNotFound(TrainNumber),

    /// Every seat on the train is already booked.
    #[error("no seats available on train {0}")]
    NoSeatsAvailable(TrainNumber),

    /// The seat is outside `1..=capacity` or already booked.
    #[error("seat {seat} on train {train} is already booked or invalid")]
    SeatUnavailable {
        /// Train the booking targeted.
        train: TrainNumber,
        /// Requested seat number.
        seat: SeatNumber,
    },

    /// The ticket id is not active (never issued or already cancelled).
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    /// Seat bookings and active tickets disagree.
    #[error("seat {seat} on train {train} is out of step with the active tickets")]
    InconsistentState {
        /// Ticket whose booking could not be reconciled, `None` for a seat
        /// booked without any ticket.
        ticket: Option<TicketId>,
        /// Train referenced by the ticket.
        train: TrainNumber,
        /// Seat referenced by the ticket.
        seat: SeatNumber,
    },

    /// Every ticket id up to `TicketId::MAX` has been issued.
    #[error("no ticket ids left to issue")]
    TicketIdsExhausted,

    /// The passenger name was empty or only whitespace.
    #[error("passenger name cannot be empty")]
    EmptyPassengerName,
}

/// Problems detected while validating a seed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog contains no trains.
    #[error("catalog contains no trains")]
    Empty,

    /// Two entries share the same train number.
    #[error("train number {0} appears more than once")]
    DuplicateTrain(TrainNumber),

    /// A train was declared with no seats.
    #[error("train {0} has zero capacity")]
    ZeroCapacity(TrainNumber),

    /// A train was declared without a name.
    #[error("train {0} has a blank name")]
    BlankName(TrainNumber),
}
