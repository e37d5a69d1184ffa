use std::{collections::BTreeSet, fmt};

use super::{SeatNumber, TrainNumber};
use crate::catalog::TrainSpec;

/// A train from the catalog together with its currently booked seats.
#[derive(Debug, Clone)]
pub struct Train {
    number: TrainNumber,
    name: String,
    source: String,
    destination: String,
    capacity: u32,
    booked_seats: BTreeSet<SeatNumber>,
}

impl Train {
    /// Create a train with every seat free.
    pub fn new(
        number: TrainNumber,
        name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
            capacity,
            booked_seats: BTreeSet::new(),
        }
    }

    pub fn number(&self) -> TrainNumber {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Total number of seats on the train.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Seats currently held by active tickets, in ascending order.
    pub fn booked_seats(&self) -> &BTreeSet<SeatNumber> {
        &self.booked_seats
    }

    pub fn is_booked(&self, seat: SeatNumber) -> bool {
        self.booked_seats.contains(&seat)
    }

    /// Number of seats that can still be booked.
    pub fn available_seats(&self) -> u32 {
        // booked_seats only ever holds values in 1..=capacity
        self.capacity - self.booked_seats.len() as u32
    }

    /// Mark `seat` as booked. Returns `false` when the seat is out of range or
    /// already taken, leaving the train unchanged.
    pub fn book_seat(&mut self, seat: SeatNumber) -> bool {
        if seat == 0 || seat > self.capacity {
            return false;
        }
        self.booked_seats.insert(seat)
    }

    /// Release `seat`, reporting whether it was booked.
    pub fn cancel_seat(&mut self, seat: SeatNumber) -> bool {
        self.booked_seats.remove(&seat)
    }

    /// Snapshot of the train suitable for listing.
    pub fn summary(&self) -> TrainSummary {
        TrainSummary {
            number: self.number,
            name: self.name.clone(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            available: self.available_seats(),
            capacity: self.capacity,
        }
    }
}

impl From<&TrainSpec> for Train {
    fn from(spec: &TrainSpec) -> Self {
        Train::new(
            spec.number,
            spec.name.clone(),
            spec.source.clone(),
            spec.destination.clone(),
            spec.capacity,
        )
    }
}

/// Per-train line shown when listing the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainSummary {
    /// Train number.
    pub number: TrainNumber,
    /// Display name.
    pub name: String,
    /// Departure station.
    pub source: String,
    /// Arrival station.
    pub destination: String,
    /// Seats still free.
    pub available: u32,
    /// Total seats.
    pub capacity: u32,
}

impl fmt::Display for TrainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Train No: {}, Name: {}, Route: {} to {}, Available Seats: {}/{}",
            self.number, self.name, self.source, self.destination, self.available, self.capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Train {
        Train::new(101, "Express 101", "CityA", "CityB", 3)
    }

    #[test]
    fn booking_reduces_available_seats() {
        let mut train = sample();
        assert_eq!(train.available_seats(), 3);
        assert!(train.book_seat(2));
        assert_eq!(train.available_seats(), 2);
        assert!(train.is_booked(2));
        assert_eq!(
            train.available_seats() as usize + train.booked_seats().len(),
            train.capacity() as usize
        );
    }

    #[test]
    fn out_of_range_seats_are_rejected() {
        let mut train = sample();
        assert!(!train.book_seat(0));
        assert!(!train.book_seat(4));
        assert!(train.booked_seats().is_empty());
    }

    #[test]
    fn double_booking_is_rejected() {
        let mut train = sample();
        assert!(train.book_seat(1));
        assert!(!train.book_seat(1));
        assert_eq!(train.booked_seats().len(), 1);
    }

    #[test]
    fn cancel_reports_whether_seat_was_held() {
        let mut train = sample();
        assert!(!train.cancel_seat(1));
        train.book_seat(1);
        assert!(train.cancel_seat(1));
        assert_eq!(train.available_seats(), 3);
    }

    #[test]
    fn summary_renders_route_and_seats() {
        let mut train = sample();
        train.book_seat(3);
        assert_eq!(
            train.summary().to_string(),
            "Train No: 101, Name: Express 101, Route: CityA to CityB, Available Seats: 2/3"
        );
    }
}
