//! Keeps exactly one blank row available at the end and prunes rows that went blank again.

use crate::{notification::ChangeType, record::Record, rows::RowStore, table::RecordTable};
use tracing::{instrument, trace};

impl<R: RowStore> RecordTable<R> {
	/// Clones the template, populates it from `record` if given, and inserts it.
	///
	/// Without `at`, the row goes right before the trailing blank row.
	/// With `at`, the position is clamped into `0..=records_count()`.
	///
	/// Returns the index the new row was inserted at. Nothing is announced here.
	pub(crate) fn insert_row(&mut self, record: Option<&Record>, at: Option<usize>) -> usize {
		let row = self.rows.duplicate(&self.template);
		if let Some(record) = record {
			for (name, _) in self.rows.fields(&row) {
				self.rows.set_field(&row, &name, record.value(&name));
			}
		}

		let index = match at {
			None => self.last_index().unwrap_or(0),
			Some(at) => at.min(self.records_count),
		};
		self.rows.insert(index, row);
		trace!("Inserted row at {}.", index);
		index
	}

	/// Appends a fresh copy of the template as new trailing blank row.
	pub(crate) fn append_blank_row(&mut self) {
		let row = self.rows.duplicate(&self.template);
		let index = self.rows.len();
		self.rows.insert(index, row);
		trace!("Grew table to {} row(s).", index + 1);
	}

	/// Removes blank rows directly above the trailing blank row, bottom-up.
	///
	/// Stops at the first row that has content, at `except`, or at the top.
	/// The trailing blank row itself is never removed.
	/// Removing a committed row announces it and decrements the committed count.
	#[instrument(skip(self, except))]
	pub fn remove_empty_rows(&mut self, except: Option<&R::Row>) {
		while let Some(index) = self.rows.len().checked_sub(2) {
			let row = match self.rows.get(index) {
				Some(row) => row,
				None => break,
			};
			if except == Some(&row) {
				break;
			}

			let record = self.serialize(&row);
			if !record.matches_defaults(&self.defaults, self.options.identity_field.as_deref()) {
				break;
			}

			self.rows.remove(index);
			if index < self.records_count {
				self.records_count -= 1;
				self.emit(ChangeType::Remove, record, index);
			} else {
				trace!("Pruned uncommitted row {}.", index);
			}
		}
	}
}
