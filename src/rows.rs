use core::fmt::Debug;

/// The host table a [`RecordTable`](`crate::RecordTable`) keeps in sync with its records.
///
/// Rows are handles owned by the host; the table only drives their lifecycle.
/// Row equality must be identity: two handles are equal iff they refer to the same row.
///
/// Indices are DOM positions among the rows, starting at `0` at the top.
pub trait RowStore {
	type Row: Clone + PartialEq + Debug;

	/// Number of rows currently in the table, including the trailing blank row.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn get(&self, index: usize) -> Option<Self::Row>;

	/// Current position of `row`, or [`None`] if it isn't part of the table (anymore).
	fn index_of(&self, row: &Self::Row) -> Option<usize>;

	/// Reads every named field of `row` as raw `(name, value)` pairs, in document order.
	fn fields(&self, row: &Self::Row) -> Vec<(String, String)>;

	/// Sets every field of `row` named `name` to `value`. Unknown names are ignored.
	fn set_field(&mut self, row: &Self::Row, name: &str, value: &str);

	/// Deep-copies `row` into a new row that is not part of the table.
	fn duplicate(&self, row: &Self::Row) -> Self::Row;

	/// Inserts a detached `row` so that it ends up at `index`. `index == self.len()` appends.
	fn insert(&mut self, index: usize, row: Self::Row);

	fn remove(&mut self, index: usize) -> Option<Self::Row>;

	/// Marks `row` as the one currently being edited, or clears that mark.
	fn set_active(&mut self, row: &Self::Row, active: bool) {
		let _ = (row, active);
	}
}
