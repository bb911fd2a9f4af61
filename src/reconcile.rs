//! Decides whether an edit adds or updates a record, and announces removals.

use crate::{
	notification::{ChangeType, Notification},
	record::Record,
	rows::RowStore,
	table::RecordTable,
};
use tracing::{debug, instrument, trace};

impl<R: RowStore> RecordTable<R> {
	/// Queues the [`Notification::Change`] + specific pair for one mutation.
	pub(crate) fn emit(&mut self, change_type: ChangeType, record: Record, index: usize) {
		debug!(%change_type, index, record = ?record.redacted(), "Record changed.");
		self.outbox.extend(Notification::pair(change_type, record, index));
	}

	/// Classifies a user edit of `field` in `row`.
	///
	/// Editing the trailing blank row first grows the table.
	/// An uncommitted row is added together with every uncommitted row above it, top-down.
	/// A committed row is updated, with `value` taken as-is for the edited field.
	#[instrument(skip(self, row, value))]
	pub(crate) fn record_input(&mut self, row: &R::Row, field: &str, value: &str) {
		let index = match self.rows.index_of(row) {
			Some(index) => index,
			None => return trace!("Input in a row that isn't part of the table."),
		};
		if Some(index) == self.last_index() {
			self.append_blank_row();
		}

		if index + 1 > self.records_count {
			self.commit_through(index);
		} else {
			let mut record = self.serialize(row);
			record.insert(field, value);
			self.emit(ChangeType::Update, record, index);
		}
	}

	/// Announces rows `records_count..=index` as added, in ascending order.
	fn commit_through(&mut self, index: usize) {
		while self.records_count <= index {
			let j = self.records_count;
			let record = match self.rows.get(j) {
				Some(row) => self.serialize(&row),
				None => break,
			};
			self.records_count += 1;
			self.emit(ChangeType::Add, record, j);
		}
	}

	/// Deletes `row` on behalf of its remove control, then prunes blank rows.
	///
	/// Only committed rows are announced. The trailing blank row can't be removed this way.
	#[instrument(skip(self, row))]
	pub(crate) fn remove_row(&mut self, row: &R::Row) {
		let index = match self.rows.index_of(row) {
			Some(index) => index,
			None => return trace!("Removal of a row that isn't part of the table."),
		};
		if Some(index) == self.last_index() {
			return debug!("Ignored removal of the trailing blank row.");
		}

		let record = self.serialize(row);
		self.rows.remove(index);
		if index < self.records_count {
			self.records_count -= 1;
			self.emit(ChangeType::Remove, record, index);
		} else {
			trace!("Removed uncommitted row {} silently.", index);
		}

		self.remove_empty_rows(None);
	}
}
