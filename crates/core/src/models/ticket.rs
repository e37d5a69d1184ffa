use std::fmt;

use chrono::{DateTime, Utc};
use super::{SeatNumber, TicketId, TrainNumber};

/// Immutable record of one successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    train_number: TrainNumber,
    passenger_name: String,
    seat_number: SeatNumber,
    booked_at: DateTime<Utc>,
}

impl Ticket {
    /// Issue a ticket with the id handed out by the reservation manager.
    pub(crate) fn issue(
        id: TicketId,
        train_number: TrainNumber,
        passenger_name: impl Into<String>,
        seat_number: SeatNumber,
    ) -> Self {
        Self {
            id,
            train_number,
            passenger_name: passenger_name.into(),
            seat_number,
            booked_at: Utc::now(),
        }
    }

    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn train_number(&self) -> TrainNumber {
        self.train_number
    }

    pub fn passenger_name(&self) -> &str {
        &self.passenger_name
    }

    pub fn seat_number(&self) -> SeatNumber {
        self.seat_number
    }

    /// When the ticket was issued.
    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ticket ID: {}, Train No: {}, Passenger: {}, Seat: {}",
            self.id, self.train_number, self.passenger_name, self.seat_number
        )
    }
}
