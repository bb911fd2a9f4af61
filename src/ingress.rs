//! The single entry point for host interaction events.

use crate::{rows::RowStore, table::RecordTable};
use core::time::Duration;
use tracing::{instrument, trace};

/// An interaction the host observed inside the table, already resolved to its row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<Row> {
	/// A field in `row` received focus.
	Focus { row: Row },
	/// A field in `row` lost focus.
	Blur { row: Row },
	/// The user changed `field` in `row` to `value`.
	Input { row: Row, field: String, value: String },
	/// The remove control of `row` was activated.
	Remove { row: Row },
}

/// A deferred prune the host should run after [`PruneTicket::delay`].
///
/// Only the most recently issued ticket is honoured; focusing any row revokes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "The prune only happens once the ticket is passed to `run_deferred_prune`."]
pub struct PruneTicket {
	generation: u64,
	delay: Duration,
}
impl PruneTicket {
	#[must_use]
	pub fn delay(&self) -> Duration {
		self.delay
	}
}

impl<R: RowStore> RecordTable<R> {
	/// Applies one interaction event.
	///
	/// Returns a [`PruneTicket`] when a deferred prune has to be scheduled.
	#[instrument(skip(self))]
	pub fn dispatch(&mut self, event: TableEvent<R::Row>) -> Option<PruneTicket> {
		match event {
			TableEvent::Focus { row } => {
				self.focus(&row);
				None
			}
			TableEvent::Blur { row } => Some(self.blur(&row)),
			TableEvent::Input { row, field, value } => {
				self.record_input(&row, &field, &value);
				None
			}
			TableEvent::Remove { row } => {
				self.remove_row(&row);
				None
			}
		}
	}

	fn focus(&mut self, row: &R::Row) {
		if self.pending_prune.take().is_some() {
			trace!("Cancelled pending prune.");
		}

		let index = match self.rows.index_of(row) {
			Some(index) => index,
			None => return trace!("Focus in a row that isn't part of the table."),
		};
		if Some(index) == self.last_index() {
			self.append_blank_row();
		}
		self.rows.set_active(row, true);
		self.remove_empty_rows(Some(row));
	}

	fn blur(&mut self, row: &R::Row) -> PruneTicket {
		self.rows.set_active(row, false);

		self.prune_generation += 1;
		self.pending_prune = Some(self.prune_generation);
		PruneTicket {
			generation: self.prune_generation,
			delay: self.options.prune_delay,
		}
	}

	/// Whether `ticket` is the one a prune is currently pending for.
	#[must_use]
	pub fn is_pending(&self, ticket: PruneTicket) -> bool {
		self.pending_prune == Some(ticket.generation)
	}

	/// Runs the prune scheduled by `ticket`, unless it was revoked in the meantime.
	///
	/// Returns whether the prune ran.
	#[instrument(skip(self))]
	pub fn run_deferred_prune(&mut self, ticket: PruneTicket) -> bool {
		if !self.is_pending(ticket) {
			trace!("Ignoring revoked prune ticket.");
			return false;
		}
		self.pending_prune = None;
		self.remove_empty_rows(None);
		true
	}
}
