use std::sync::Arc;

use parking_lot::Mutex;

use super::ReservationManager;
use crate::{
    error::ReservationError,
    models::{SeatNumber, Ticket, TicketId, TrainNumber, TrainSummary},
};

/// Thread-safe handle around a [`ReservationManager`].
///
/// A single mutex guards the train seats and the ticket map together, so a
/// booking or cancellation is never observed half applied.
#[derive(Clone, Default)]
pub struct SharedReservations {
    inner: Arc<Mutex<ReservationManager>>,
}

impl SharedReservations {
    /// Wrap an existing manager.
    pub fn new(manager: ReservationManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Summaries of every train, in catalog order.
    pub fn list_trains(&self) -> Vec<TrainSummary> {
        self.inner.lock().list_trains().collect()
    }

    /// Summary of one train, if present.
    pub fn find_train(&self, number: TrainNumber) -> Option<TrainSummary> {
        self.inner.lock().find_train(number).map(|train| train.summary())
    }

    /// See [`ReservationManager::book_ticket`].
    pub fn book_ticket(
        &self,
        train_number: TrainNumber,
        passenger_name: &str,
        seat: SeatNumber,
    ) -> Result<Ticket, ReservationError> {
        self.inner.lock().book_ticket(train_number, passenger_name, seat)
    }

    /// See [`ReservationManager::cancel_ticket`].
    pub fn cancel_ticket(&self, ticket_id: TicketId) -> Result<Ticket, ReservationError> {
        self.inner.lock().cancel_ticket(ticket_id)
    }

    /// Copy of an active ticket.
    pub fn ticket_details(&self, ticket_id: TicketId) -> Option<Ticket> {
        self.inner.lock().ticket_details(ticket_id).cloned()
    }

    /// Run `f` with exclusive access to the manager.
    pub fn with<R>(&self, f: impl FnOnce(&mut ReservationManager) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, thread};

    use super::*;

    #[test]
    fn concurrent_bookings_stay_consistent() {
        let shared = SharedReservations::default();

        let ids: Vec<TicketId> = thread::scope(|scope| {
            let handles: Vec<_> = (1..=10u32)
                .map(|worker| {
                    let shared = shared.clone();
                    scope.spawn(move || {
                        // every worker also fights over seat 1
                        let contested = shared.book_ticket(101, "Rival", 1).ok();
                        let own = shared
                            .book_ticket(101, &format!("Worker {worker}"), worker + 10)
                            .expect("distinct seat");
                        contested.into_iter().map(|t| t.id()).chain([own.id()]).collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().expect("worker panicked"))
                .collect()
        });

        assert_eq!(ids.len(), 11);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        let summary = shared.find_train(101).expect("train 101");
        assert_eq!(summary.available, 50 - 11);
        assert_eq!(shared.with(|manager| manager.audit()), Ok(()));
    }

    #[test]
    fn cancel_through_handle() {
        let shared = SharedReservations::new(ReservationManager::new());
        let ticket = shared.book_ticket(202, "Alice", 3).expect("booking");
        assert_eq!(shared.ticket_details(ticket.id()), Some(ticket.clone()));

        shared.cancel_ticket(ticket.id()).expect("cancel");
        assert_eq!(shared.ticket_details(ticket.id()), None);
        assert_eq!(shared.list_trains()[1].available, 75);
    }
}
