#![allow(dead_code)]

use editable_table_dom::{
	memory::{MemoryRow, MemoryRows},
	ChangeType, Notification, Options, Record, RecordTable, RowStore, TableEvent,
};

pub const TEMPLATE: [(&str, &str); 2] = [("name", ""), ("qty", "0")];

/// A table holding only its blank template row.
pub fn table() -> RecordTable<MemoryRows> {
	table_with(Options::default())
}

pub fn table_with(options: Options) -> RecordTable<MemoryRows> {
	RecordTable::new(MemoryRows::with_template(TEMPLATE.iter().copied()), options).unwrap()
}

/// A table with `blank_rows` blank rows above the template row, none of them committed.
pub fn table_with_blank_rows(blank_rows: usize) -> RecordTable<MemoryRows> {
	let mut rows = MemoryRows::new();
	for _ in 0..=blank_rows {
		rows.push(MemoryRow::new(TEMPLATE.iter().copied()));
	}
	RecordTable::new(rows, Options::default()).unwrap()
}

pub fn row(table: &RecordTable<MemoryRows>, index: usize) -> MemoryRow {
	table.rows().get(index).unwrap()
}

pub fn record(fields: &[(&str, &str)]) -> Record {
	fields.iter().copied().collect()
}

/// Focuses the row at `index` and types `value` into `field`, leaving the focus there.
pub fn type_into(table: &mut RecordTable<MemoryRows>, index: usize, field: &str, value: &str) -> MemoryRow {
	let row = row(table, index);
	assert_eq!(table.dispatch(TableEvent::Focus { row: row.clone() }), None);
	edit(table, &row, field, value);
	row
}

/// Types into `row` without moving the focus.
pub fn edit(table: &mut RecordTable<MemoryRows>, row: &MemoryRow, field: &str, value: &str) {
	row.set_value(field, value);
	assert_eq!(
		table.dispatch(TableEvent::Input {
			row: row.clone(),
			field: field.to_owned(),
			value: value.to_owned(),
		}),
		None
	);
}

pub fn drain(table: &mut RecordTable<MemoryRows>) -> Vec<Notification> {
	table.drain_notifications().collect()
}

/// The specific notifications as `(type, index)`, asserting each follows its matching `Change`.
pub fn specific(notifications: &[Notification]) -> Vec<(ChangeType, usize)> {
	assert_eq!(notifications.len() % 2, 0, "Unpaired notification in {:#?}", notifications);
	notifications
		.chunks(2)
		.map(|pair| {
			let (change_type, record, index) = match &pair[0] {
				Notification::Change { change_type, record, index } => (*change_type, record, *index),
				other => panic!("Expected `Change`, found {:?}", other),
			};
			let expected = Notification::pair(change_type, record.clone(), index);
			assert_eq!(pair[1], expected[1]);
			(change_type, index)
		})
		.collect()
}
