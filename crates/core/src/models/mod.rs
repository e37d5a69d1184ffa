#![allow(missing_docs)]

//! Shared domain models.

mod ticket;
mod train;

pub use ticket::Ticket;
pub use train::{Train, TrainSummary};

/// Identifier of a train within the catalog.
pub type TrainNumber = u32;
/// Seat slot on a train, valid range `1..=capacity`.
pub type SeatNumber = u32;
/// Identifier assigned to a ticket when it is issued.
pub type TicketId = u32;
