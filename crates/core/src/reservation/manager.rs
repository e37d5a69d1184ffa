use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::{
    catalog::{self, TrainSpec},
    config::{AppConfig, DEFAULT_TICKET_ID_BASE},
    error::{CatalogError, ReservationError},
    models::{SeatNumber, Ticket, TicketId, Train, TrainNumber, TrainSummary},
};

/// Owns every train and every active ticket.
///
/// Each booked seat corresponds to exactly one active ticket and each active
/// ticket to exactly one booked seat. All operations either apply fully or
/// leave the manager untouched.
#[derive(Debug, Clone)]
pub struct ReservationManager {
    trains: Vec<Train>,
    tickets: BTreeMap<TicketId, Ticket>,
    next_ticket_id: Option<TicketId>,
}

impl Default for ReservationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationManager {
    /// Manager over the built-in catalog, numbering tickets from 1001.
    pub fn new() -> Self {
        let trains = catalog::default_catalog().iter().map(Train::from).collect();
        Self {
            trains,
            tickets: BTreeMap::new(),
            next_ticket_id: Some(DEFAULT_TICKET_ID_BASE),
        }
    }

    /// Manager over a custom catalog.
    pub fn with_catalog(
        specs: &[TrainSpec],
        ticket_id_base: TicketId,
    ) -> Result<Self, CatalogError> {
        catalog::validate(specs)?;
        Ok(Self {
            trains: specs.iter().map(Train::from).collect(),
            tickets: BTreeMap::new(),
            next_ticket_id: Some(ticket_id_base),
        })
    }

    /// Manager seeded from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::with_catalog(&config.trains, config.ticket_id_base)
    }

    /// Lazily summarise every train in catalog order.
    ///
    /// The iterator can be cloned or requested again to restart the listing.
    pub fn list_trains(&self) -> impl Iterator<Item = TrainSummary> + Clone + '_ {
        self.trains.iter().map(Train::summary)
    }

    /// Trains in catalog order.
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    /// Train with the given number, if it is in the catalog.
    pub fn find_train(&self, number: TrainNumber) -> Option<&Train> {
        self.trains.iter().find(|train| train.number() == number)
    }

    fn find_train_mut(&mut self, number: TrainNumber) -> Option<&mut Train> {
        self.trains.iter_mut().find(|train| train.number() == number)
    }

    /// Id the next successful booking will receive, `None` once every id
    /// has been issued.
    pub fn next_ticket_id(&self) -> Option<TicketId> {
        self.next_ticket_id
    }

    /// Active tickets ordered by id.
    pub fn active_tickets(&self) -> impl Iterator<Item = &Ticket> + '_ {
        self.tickets.values()
    }

    /// Book `seat` on `train_number` for `passenger_name` and issue a ticket.
    pub fn book_ticket(
        &mut self,
        train_number: TrainNumber,
        passenger_name: &str,
        seat: SeatNumber,
    ) -> Result<Ticket, ReservationError> {
        let passenger_name = passenger_name.trim();
        if passenger_name.is_empty() {
            return Err(ReservationError::EmptyPassengerName);
        }

        let id = self
            .next_ticket_id
            .ok_or(ReservationError::TicketIdsExhausted)?;
        let train = self
            .find_train_mut(train_number)
            .ok_or(ReservationError::TrainNotFound(train_number))?;
        if train.available_seats() == 0 {
            return Err(ReservationError::NoSeatsAvailable(train_number));
        }
        if !train.book_seat(seat) {
            return Err(ReservationError::SeatUnavailable {
                train: train_number,
                seat,
            });
        }

        self.next_ticket_id = id.checked_add(1);
        let ticket = Ticket::issue(id, train_number, passenger_name, seat);
        self.tickets.insert(id, ticket.clone());

        info!(
            ticket = id,
            train = train_number,
            seat,
            passenger = passenger_name,
            booked_at = %ticket.booked_at(),
            "ticket booked"
        );
        Ok(ticket)
    }

    /// Cancel an active ticket, freeing its seat. Returns the cancelled ticket.
    pub fn cancel_ticket(&mut self, ticket_id: TicketId) -> Result<Ticket, ReservationError> {
        let (train_number, seat) = match self.tickets.get(&ticket_id) {
            Some(ticket) => (ticket.train_number(), ticket.seat_number()),
            None => return Err(ReservationError::TicketNotFound(ticket_id)),
        };

        let inconsistent = ReservationError::InconsistentState {
            ticket: Some(ticket_id),
            train: train_number,
            seat,
        };
        let Some(train) = self.find_train_mut(train_number) else {
            warn!(ticket = ticket_id, train = train_number, "ticket references unknown train");
            return Err(inconsistent);
        };
        if !train.cancel_seat(seat) {
            warn!(ticket = ticket_id, train = train_number, seat, "ticket seat was not booked");
            return Err(inconsistent);
        }

        let ticket = self
            .tickets
            .remove(&ticket_id)
            .ok_or(ReservationError::TicketNotFound(ticket_id))?;
        info!(ticket = ticket_id, train = train_number, seat, "ticket cancelled");
        Ok(ticket)
    }

    /// Active ticket with the given id.
    pub fn ticket_details(&self, ticket_id: TicketId) -> Option<&Ticket> {
        let ticket = self.tickets.get(&ticket_id);
        debug!(ticket = ticket_id, found = ticket.is_some(), "ticket lookup");
        ticket
    }

    /// Check that booked seats and active tickets match one to one.
    pub fn audit(&self) -> Result<(), ReservationError> {
        let mut held = 0usize;
        for ticket in self.tickets.values() {
            let violation = ReservationError::InconsistentState {
                ticket: Some(ticket.id()),
                train: ticket.train_number(),
                seat: ticket.seat_number(),
            };
            match self.find_train(ticket.train_number()) {
                Some(train) if train.is_booked(ticket.seat_number()) => held += 1,
                _ => return Err(violation),
            }
        }

        let booked: usize = self
            .trains
            .iter()
            .map(|train| train.booked_seats().len())
            .sum();
        if booked != held {
            // a seat is booked without a ticket; report the first one found
            for train in &self.trains {
                for &seat in train.booked_seats() {
                    let owned = self
                        .tickets
                        .values()
                        .any(|t| t.train_number() == train.number() && t.seat_number() == seat);
                    if !owned {
                        return Err(ReservationError::InconsistentState {
                            ticket: None,
                            train: train.number(),
                            seat,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
