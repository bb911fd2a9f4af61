use crate::{
	error::Error,
	notification::{ChangeType, Notification},
	options::Options,
	record::{serialize_fields, Record},
	rows::RowStore,
};
use std::collections::{vec_deque, VecDeque};
use tracing::{debug, instrument, trace, warn};

/// Keeps a host table of editable rows in sync with an ordered sequence of records.
///
/// The last row is always a blank sentinel. Rows `0..records_count()` have been announced
/// as committed records through exactly one [`Notification::Add`] each; rows below that haven't.
///
/// Notifications are queued and must be collected through [`RecordTable::drain_notifications`].
#[derive(Debug)]
pub struct RecordTable<R: RowStore> {
	pub(crate) rows: R,
	pub(crate) template: R::Row,
	pub(crate) defaults: Record,
	pub(crate) records_count: usize,
	pub(crate) options: Options,
	pub(crate) prune_generation: u64,
	pub(crate) pending_prune: Option<u64>,
	pub(crate) outbox: VecDeque<Notification>,
}

/// Where [`RecordTable::add`] inserts and how new rows are decorated.
pub struct AddOptions<'a, Row> {
	/// Clamped into `0..=records_count()`. Defaults to the end of the records.
	pub at: Option<usize>,
	/// Called for each inserted row after its fields were populated.
	pub decorate: Option<&'a mut dyn FnMut(&Row, &Record)>,
}
impl<Row> Default for AddOptions<'_, Row> {
	fn default() -> Self {
		Self { at: None, decorate: None }
	}
}
impl<'a, Row> AddOptions<'a, Row> {
	#[must_use]
	pub fn at(at: usize) -> Self {
		Self { at: Some(at), decorate: None }
	}
}

/// Addresses one row for [`RecordTable::update`] and [`RecordTable::remove`].
///
/// A missing or out-of-range `at` makes the call a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct At {
	pub at: Option<usize>,
}
impl At {
	#[must_use]
	pub fn index(at: usize) -> Self {
		Self { at: Some(at) }
	}
}

impl<R: RowStore> RecordTable<R> {
	/// Captures the last row of `rows` as template.
	///
	/// The template row itself stays in place as the trailing blank row.
	///
	/// # Errors
	///
	/// Iff `rows` is empty.
	#[instrument(skip(rows))]
	pub fn new(rows: R, options: Options) -> Result<Self, Error> {
		let last = rows.len().checked_sub(1).and_then(|last| rows.get(last)).ok_or(Error::MissingTemplateRow)?;
		let template = rows.duplicate(&last);
		let defaults = serialize_fields(rows.fields(&template));
		debug!(defaults = ?defaults.redacted(), "Captured template row.");
		Ok(Self {
			rows,
			template,
			defaults,
			records_count: 0,
			options,
			prune_generation: 0,
			pending_prune: None,
			outbox: VecDeque::new(),
		})
	}

	#[must_use]
	pub fn rows(&self) -> &R {
		&self.rows
	}

	/// Direct access to the host rows.
	///
	/// Structural changes made through this bypass the record bookkeeping.
	pub fn rows_mut(&mut self) -> &mut R {
		&mut self.rows
	}

	#[must_use]
	pub fn options(&self) -> &Options {
		&self.options
	}

	/// Number of leading rows announced as committed records.
	#[must_use]
	pub fn records_count(&self) -> usize {
		self.records_count
	}

	/// The record of the blank template row.
	#[must_use]
	pub fn defaults(&self) -> &Record {
		&self.defaults
	}

	#[must_use]
	pub fn serialize(&self, row: &R::Row) -> Record {
		serialize_fields(self.rows.fields(row))
	}

	#[must_use]
	pub fn is_empty_row(&self, row: &R::Row) -> bool {
		self.serialize(row).matches_defaults(&self.defaults, self.options.identity_field.as_deref())
	}

	/// Index of the trailing blank row.
	pub(crate) fn last_index(&self) -> Option<usize> {
		self.rows.len().checked_sub(1)
	}

	/// Rows that may be addressed positionally, i.e. all but the trailing blank one.
	pub(crate) fn record_rows_len(&self) -> usize {
		self.rows.len().saturating_sub(1)
	}

	/// Records of all rows except the trailing blank one, committed or not, in DOM order.
	#[must_use]
	pub fn get(&self) -> Vec<Record> {
		(0..self.record_rows_len()).filter_map(|index| self.rows.get(index)).map(|row| self.serialize(&row)).collect()
	}

	/// Inserts one row per record and announces each as added.
	///
	/// Records are inserted consecutively starting at `options.at`, which is clamped into `0..=records_count()`.
	/// Fields missing from a record are left empty.
	#[instrument(skip(self, records, options), fields(at = ?options.at))]
	pub fn add(&mut self, records: impl IntoIterator<Item = Record>, options: AddOptions<'_, R::Row>) {
		let AddOptions { at, mut decorate } = options;
		let mut at = at.unwrap_or_else(|| self.record_rows_len());
		for record in records {
			let index = self.insert_row(Some(&record), Some(at));
			let row = match self.rows.get(index) {
				Some(row) => row,
				None => {
					warn!("Inserted row vanished at index {}.", index);
					continue;
				}
			};
			if let Some(decorate) = decorate.as_mut() {
				decorate(&row, &record);
			}
			self.records_count += 1;
			let record = self.serialize(&row);
			self.emit(ChangeType::Add, record, index);
			at = index + 1;
		}
	}

	/// Writes `changed_properties` into the row at `options.at` and announces the update.
	#[instrument(skip(self, changed_properties))]
	pub fn update<K, V>(&mut self, changed_properties: impl IntoIterator<Item = (K, V)>, options: At)
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let (index, row) = match self.addressed_row(options) {
			Some(addressed) => addressed,
			None => return warn!("`update` ignored: {:?} is not a record row.", options.at),
		};
		for (name, value) in changed_properties {
			self.rows.set_field(&row, name.as_ref(), value.as_ref());
		}
		let record = self.serialize(&row);
		self.emit(ChangeType::Update, record, index);
	}

	/// Deletes the row at `options.at` and announces its removal.
	///
	/// The committed count is decremented unconditionally, so this is meant for committed rows only.
	#[instrument(skip(self))]
	pub fn remove(&mut self, options: At) {
		let (index, row) = match self.addressed_row(options) {
			Some(addressed) => addressed,
			None => return warn!("`remove` ignored: {:?} is not a record row.", options.at),
		};
		if index >= self.records_count {
			warn!("Positional `remove` of uncommitted row {} (records_count: {}).", index, self.records_count);
		}
		let record = self.serialize(&row);
		self.rows.remove(index);
		self.records_count = self.records_count.saturating_sub(1);
		self.emit(ChangeType::Remove, record, index);
	}

	/// Moves the row at `from` so it ends up at `to`, without any notification.
	///
	/// `to` is clamped into the region `from` belongs to: committed rows stay among
	/// `0..records_count()` and uncommitted ones stay between those and the trailing blank row.
	///
	/// Returns the index the row ended up at, or [`None`] if `from` isn't a record row.
	#[instrument(skip(self))]
	pub fn move_row(&mut self, from: usize, to: usize) -> Option<usize> {
		let len = self.record_rows_len();
		if from >= len {
			warn!("`move_row` ignored: {} is not a record row.", from);
			return None;
		}
		let to = if from < self.records_count { to.min(self.records_count - 1) } else { to.max(self.records_count).min(len - 1) };
		if from != to {
			let row = self.rows.remove(from)?;
			self.rows.insert(to, row);
			trace!("Moved row {} to {}.", from, to);
		}
		Some(to)
	}

	/// Takes all queued notifications, oldest first.
	pub fn drain_notifications(&mut self) -> vec_deque::Drain<'_, Notification> {
		self.outbox.drain(..)
	}

	#[must_use]
	pub fn has_pending_notifications(&self) -> bool {
		!self.outbox.is_empty()
	}

	fn addressed_row(&self, At { at }: At) -> Option<(usize, R::Row)> {
		let index = at.filter(|&at| at < self.record_rows_len())?;
		self.rows.get(index).map(|row| (index, row))
	}
}
