//! A [`RowStore`] without a DOM, for headless use.

use crate::rows::RowStore;
use core::{
	cell::{Cell, RefCell},
	fmt::{self, Debug, Formatter},
};
use std::rc::Rc;

/// A row handle. Clones refer to the same row; equality is identity.
#[derive(Clone)]
pub struct MemoryRow(Rc<RowState>);

struct RowState {
	fields: RefCell<Vec<(String, String)>>,
	active: Cell<bool>,
}

impl MemoryRow {
	/// Creates a detached row with the given `(name, value)` fields, in order.
	pub fn new<N: Into<String>, V: Into<String>>(fields: impl IntoIterator<Item = (N, V)>) -> Self {
		Self(Rc::new(RowState {
			fields: RefCell::new(fields.into_iter().map(|(n, v)| (n.into(), v.into())).collect()),
			active: Cell::new(false),
		}))
	}

	/// Raw value of the first field named `name`.
	#[must_use]
	pub fn value(&self, name: &str) -> Option<String> {
		self.0.fields.borrow().iter().find(|(n, _)| n == name).map(|(_, v)| v.clone())
	}

	/// Overwrites every field named `name`, like typing into it would.
	pub fn set_value(&self, name: &str, value: &str) {
		for (_, v) in self.0.fields.borrow_mut().iter_mut().filter(|(n, _)| n == name) {
			value.clone_into(v);
		}
	}

	#[must_use]
	pub fn is_active(&self) -> bool {
		self.0.active.get()
	}
}
impl PartialEq for MemoryRow {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}
impl Eq for MemoryRow {}
impl Debug for MemoryRow {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut tuple = f.debug_tuple("MemoryRow");
		tuple.field(&(Rc::as_ptr(&self.0) as *const ()));
		if cfg!(feature = "dangerous-logging") {
			tuple.field(&*self.0.fields.borrow());
		}
		tuple.finish()
	}
}

/// An ordered list of [`MemoryRow`]s standing in for a `<tbody>`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
	rows: Vec<MemoryRow>,
}
impl MemoryRows {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// A body holding only a template row with the given blank `(name, value)` fields.
	pub fn with_template<N: Into<String>, V: Into<String>>(fields: impl IntoIterator<Item = (N, V)>) -> Self {
		Self { rows: vec![MemoryRow::new(fields)] }
	}

	/// Appends a row directly, bypassing any table bookkeeping.
	pub fn push(&mut self, row: MemoryRow) {
		self.rows.push(row);
	}

	pub fn iter(&self) -> impl Iterator<Item = &MemoryRow> {
		self.rows.iter()
	}
}
impl RowStore for MemoryRows {
	type Row = MemoryRow;

	fn len(&self) -> usize {
		self.rows.len()
	}

	fn get(&self, index: usize) -> Option<MemoryRow> {
		self.rows.get(index).cloned()
	}

	fn index_of(&self, row: &MemoryRow) -> Option<usize> {
		self.rows.iter().position(|r| r == row)
	}

	fn fields(&self, row: &MemoryRow) -> Vec<(String, String)> {
		row.0.fields.borrow().clone()
	}

	fn set_field(&mut self, row: &MemoryRow, name: &str, value: &str) {
		row.set_value(name, value);
	}

	fn duplicate(&self, row: &MemoryRow) -> MemoryRow {
		MemoryRow::new(row.0.fields.borrow().iter().cloned())
	}

	fn insert(&mut self, index: usize, row: MemoryRow) {
		let index = index.min(self.rows.len());
		self.rows.insert(index, row);
	}

	fn remove(&mut self, index: usize) -> Option<MemoryRow> {
		(index < self.rows.len()).then(|| self.rows.remove(index))
	}

	fn set_active(&mut self, row: &MemoryRow, active: bool) {
		row.0.active.set(active);
	}
}
