use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use railres_core::{
    ReservationError, ReservationManager, SeatNumber, TicketId, TrainNumber, TrainSummary,
};
use tracing::{debug, warn};

const MENU_ITEMS: [&str; 5] = [
    "1. Display Available Trains",
    "2. Book Ticket",
    "3. Cancel Ticket",
    "4. View Ticket Details",
    "5. Exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ListTrains,
    Book,
    Cancel,
    Details,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ListTrains),
            "2" => Some(Self::Book),
            "3" => Some(Self::Cancel),
            "4" => Some(Self::Details),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Interactive menu that forwards commands to the reservation manager.
pub struct App<R, W> {
    manager: ReservationManager,
    input: R,
    output: W,
    styled: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(manager: ReservationManager, input: R, output: W, styled: bool) -> Self {
        Self {
            manager,
            input,
            output,
            styled,
        }
    }

    #[cfg(test)]
    pub fn manager(&self) -> &ReservationManager {
        &self.manager
    }

    /// Serve menu commands until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render_menu()?;
            let Some(line) = self.prompt_line("Enter your choice: ")? else {
                debug!("input closed, leaving menu loop");
                break;
            };

            match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.output, "Exiting system. Goodbye!")?;
                    break;
                }
                Some(choice) => {
                    debug!(?choice, "menu choice");
                    self.dispatch(choice)?;
                }
                None => self.failure("Invalid choice. Please try again.")?,
            }
        }
        self.output.flush().context("failed to flush output")
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::ListTrains => self.list_trains(),
            MenuChoice::Book => self.book_ticket(),
            MenuChoice::Cancel => self.cancel_ticket(),
            MenuChoice::Details => self.ticket_details(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn render_menu(&mut self) -> Result<()> {
        let title = "--- Train Reservation System Menu ---";
        if self.styled {
            writeln!(self.output, "\n{}", title.bold().cyan())?;
        } else {
            writeln!(self.output, "\n{title}")?;
        }
        for item in MENU_ITEMS {
            writeln!(self.output, "{item}")?;
        }
        Ok(())
    }

    fn list_trains(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Available Trains ---")?;
        let summaries: Vec<TrainSummary> = self.manager.list_trains().collect();
        for summary in summaries {
            writeln!(self.output, "{summary}")?;
        }
        Ok(())
    }

    fn book_ticket(&mut self) -> Result<()> {
        let Some(number) = self.prompt_number("Enter Train Number: ")? else {
            return Ok(());
        };
        let summary = TrainNumber::try_from(number)
            .ok()
            .and_then(|number| self.manager.find_train(number))
            .map(|train| train.summary());
        let Some(summary) = summary else {
            return self.failure("Invalid Train Number.");
        };
        if summary.available == 0 {
            return self.failure("No seats available on this train.");
        }

        let Some(name) = self.prompt_line("Enter Passenger Name: ")? else {
            return Ok(());
        };
        if name.trim().is_empty() {
            return self.failure("Passenger name cannot be empty.");
        }

        let prompt = format!("Enter desired Seat Number (1-{}): ", summary.capacity);
        let Some(seat) = self.prompt_number(&prompt)? else {
            return Ok(());
        };
        let Ok(seat) = SeatNumber::try_from(seat) else {
            return self.failure(format!("Seat {seat} is already booked or invalid."));
        };

        match self.manager.book_ticket(summary.number, &name, seat) {
            Ok(ticket) => self.success(format!("Ticket booked successfully! {ticket}")),
            Err(err) => {
                warn!("booking on train {} failed: {err}", summary.number);
                self.failure(failure_message(&err))
            }
        }
    }

    fn cancel_ticket(&mut self) -> Result<()> {
        let Some(id) = self.prompt_number("Enter Ticket ID to cancel: ")? else {
            return Ok(());
        };
        let Ok(id) = TicketId::try_from(id) else {
            return self.failure("Invalid Ticket ID.");
        };

        match self.manager.cancel_ticket(id) {
            Ok(ticket) => self.success(format!("Ticket {} cancelled successfully.", ticket.id())),
            Err(err) => {
                warn!("cancelling ticket {id} failed: {err}");
                self.failure(failure_message(&err))
            }
        }
    }

    fn ticket_details(&mut self) -> Result<()> {
        let Some(id) = self.prompt_number("Enter Ticket ID to view details: ")? else {
            return Ok(());
        };
        let ticket = TicketId::try_from(id)
            .ok()
            .and_then(|id| self.manager.ticket_details(id))
            .cloned();

        match ticket {
            Some(ticket) => {
                writeln!(self.output, "\n--- Ticket Details ---")?;
                writeln!(self.output, "{ticket}")?;
                Ok(())
            }
            None => self.failure("Ticket not found."),
        }
    }

    /// Read one line after showing `prompt`. `None` means input is exhausted.
    fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt_number(&mut self, prompt: &str) -> Result<Option<i64>> {
        let Some(line) = self.prompt_line(prompt)? else {
            return Ok(None);
        };
        match line.trim().parse::<i64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                self.failure("Please enter a valid number.")?;
                Ok(None)
            }
        }
    }

    fn success(&mut self, message: impl Display) -> Result<()> {
        let message = message.to_string();
        if self.styled {
            writeln!(self.output, "{}", message.green())?;
        } else {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }

    fn failure(&mut self, message: impl Display) -> Result<()> {
        let message = message.to_string();
        if self.styled {
            writeln!(self.output, "{}", message.red())?;
        } else {
            writeln!(self.output, "{message}")?;
        }
        Ok(())
    }
}

fn failure_message(err: &ReservationError) -> String {
    match err {
        ReservationError::TrainNotFound(_) => "Invalid Train Number.".to_string(),
        ReservationError::NoSeatsAvailable(_) => "No seats available on this train.".to_string(),
        ReservationError::SeatUnavailable { seat, .. } => {
            format!("Seat {seat} is already booked or invalid.")
        }
        ReservationError::TicketNotFound(_) => "Invalid Ticket ID.".to_string(),
        ReservationError::InconsistentState { .. } => {
            "Error cancelling ticket. Seat might not be marked as booked.".to_string()
        }
        ReservationError::TicketIdsExhausted => "No more tickets can be issued.".to_string(),
        ReservationError::EmptyPassengerName => "Passenger name cannot be empty.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use railres_core::TrainSpec;

    fn run_session(manager: ReservationManager, script: &str) -> Result<(String, ReservationManager)> {
        let mut output = Vec::new();
        let mut app = App::new(manager, script.as_bytes(), &mut output, false);
        app.run()?;
        let manager = app.manager().clone();
        drop(app);
        Ok((String::from_utf8(output)?, manager))
    }

    #[test]
    fn lists_catalog() -> Result<()> {
        let (output, _) = run_session(ReservationManager::new(), "1\n5\n")?;
        assert!(output.contains("--- Available Trains ---"));
        assert!(output.contains(
            "Train No: 101, Name: Express 101, Route: CityA to CityB, Available Seats: 50/50"
        ));
        assert!(output.contains(
            "Train No: 202, Name: Superfast 202, Route: CityB to CityC, Available Seats: 75/75"
        ));
        assert!(output.ends_with("Exiting system. Goodbye!\n"));
        Ok(())
    }

    #[test]
    fn book_view_and_cancel() -> Result<()> {
        let script = "2\n101\nAlice\n5\n4\n1001\n2\n101\nBob\n5\n3\n1001\n4\n1001\n5\n";
        let (output, manager) = run_session(ReservationManager::new(), script)?;

        assert!(output.contains("Enter desired Seat Number (1-50): "));
        assert!(output.contains(
            "Ticket booked successfully! Ticket ID: 1001, Train No: 101, Passenger: Alice, Seat: 5"
        ));
        assert!(output.contains("--- Ticket Details ---"));
        assert!(output.contains("Seat 5 is already booked or invalid."));
        assert!(output.contains("Ticket 1001 cancelled successfully."));
        assert!(output.contains("Ticket not found."));

        let train = manager.find_train(101).expect("train 101");
        assert_eq!(train.available_seats(), 50);
        assert_eq!(manager.next_ticket_id(), Some(1002));
        Ok(())
    }

    #[test]
    fn unknown_train_stops_before_asking_for_name() -> Result<()> {
        let (output, _) = run_session(ReservationManager::new(), "2\n999\n5\n")?;
        assert!(output.contains("Invalid Train Number."));
        assert!(!output.contains("Enter Passenger Name"));
        Ok(())
    }

    #[test]
    fn sold_out_train_is_reported_up_front() -> Result<()> {
        let mut manager =
            ReservationManager::with_catalog(&[TrainSpec::new(7, "Tiny", "X", "Y", 1)], 1001)?;
        manager.book_ticket(7, "Alice", 1)?;

        let (output, _) = run_session(manager, "2\n7\n5\n")?;
        assert!(output.contains("No seats available on this train."));
        assert!(!output.contains("Enter Passenger Name"));
        Ok(())
    }

    #[test]
    fn rejects_bad_input_and_keeps_looping() -> Result<()> {
        let script = "9\nabc\n2\n101\n\n2\n202\nCarol\n0\n2\n202\nCarol\n-3\n3\n77\n3\nxyz\n5\n";
        let (output, manager) = run_session(ReservationManager::new(), script)?;

        assert_eq!(output.matches("Invalid choice. Please try again.").count(), 2);
        assert!(output.contains("Passenger name cannot be empty."));
        assert!(output.contains("Seat 0 is already booked or invalid."));
        assert!(output.contains("Seat -3 is already booked or invalid."));
        assert!(output.contains("Invalid Ticket ID."));
        assert!(output.contains("Please enter a valid number."));
        assert!(output.ends_with("Exiting system. Goodbye!\n"));
        assert_eq!(manager.active_tickets().count(), 0);
        Ok(())
    }

    #[test]
    fn end_of_input_ends_session() -> Result<()> {
        let (output, manager) = run_session(ReservationManager::new(), "2\n101\nAlice\n")?;
        assert!(!output.contains("Exiting system"));
        assert_eq!(manager.active_tickets().count(), 0);
        Ok(())
    }

    #[test]
    fn exhausted_ticket_ids_are_reported() -> Result<()> {
        let manager = ReservationManager::with_catalog(
            &[TrainSpec::new(7, "Tiny", "X", "Y", 5)],
            TicketId::MAX,
        )?;
        let (output, manager) = run_session(manager, "2\n7\nAlice\n1\n2\n7\nBob\n2\n5\n")?;
        assert!(output.contains("Ticket booked successfully! Ticket ID: 4294967295"));
        assert!(output.contains("No more tickets can be issued."));
        assert_eq!(manager.active_tickets().count(), 1);
        assert_eq!(manager.audit(), Ok(()));
        Ok(())
    }

    #[test]
    fn menu_choices_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), Some(MenuChoice::ListTrains));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }
}
