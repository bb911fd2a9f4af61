mod memory_table_;

use editable_table_dom::{memory::MemoryRow, AddOptions, At, ChangeType, Record, RowStore};
use memory_table_::{drain, record, row, specific, table, type_into};

#[test]
fn get_skips_the_trailing_blank_row() {
	let mut table = table();
	assert!(table.get().is_empty());

	type_into(&mut table, 0, "name", "Apples");
	let records = table.get();
	assert_eq!(records, vec![record(&[("name", "Apples"), ("qty", "0")])]);
	assert_eq!(records, table.get());
}

#[test]
fn get_includes_uncommitted_rows() {
	let mut table = table();
	type_into(&mut table, 0, "name", "Apples");
	row(&table, 1).set_value("name", "Pears");
	table.dispatch(editable_table_dom::TableEvent::Focus { row: row(&table, 1) });

	assert_eq!(table.records_count(), 1);
	assert_eq!(table.get().len(), 2);
}

#[test]
fn add_appends_after_the_committed_records() {
	let mut table = table();
	table.add(vec![record(&[("name", "Apples"), ("qty", "1")]), record(&[("name", "Pears"), ("qty", "2")])], AddOptions::default());

	let notifications = drain(&mut table);
	assert_eq!(specific(&notifications), vec![(ChangeType::Add, 0), (ChangeType::Add, 1)]);
	assert_eq!(notifications[3].record(), &record(&[("name", "Pears"), ("qty", "2")]));
	assert_eq!(table.records_count(), 2);
	assert_eq!(table.rows().len(), 3);
	assert!(table.is_empty_row(&row(&table, 2)));
}

#[test]
fn add_fills_missing_fields_with_empty_strings() {
	let mut table = table();
	table.add(vec![record(&[("name", "Apples")])], AddOptions::default());
	assert_eq!(table.get(), vec![record(&[("name", "Apples"), ("qty", "")])]);
}

#[test]
fn add_at_inserts_consecutively() {
	let mut table = table();
	table.add(vec![record(&[("name", "c")])], AddOptions::default());
	table.add(vec![record(&[("name", "a")]), record(&[("name", "b")])], AddOptions::at(0));

	assert_eq!(specific(&drain(&mut table)), vec![(ChangeType::Add, 0), (ChangeType::Add, 0), (ChangeType::Add, 1)]);
	let names: Vec<String> = table.get().iter().map(|r| r.value("name").to_owned()).collect();
	assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn add_clamps_at_to_the_committed_records() {
	let mut table = table();
	type_into(&mut table, 0, "name", "Apples");
	// An uncommitted row between the records and the trailing blank row.
	table.dispatch(editable_table_dom::TableEvent::Focus { row: row(&table, 1) });
	assert_eq!(table.rows().len(), 3);
	drain(&mut table);

	table.add(vec![record(&[("name", "Pears")])], AddOptions::at(10));
	assert_eq!(specific(&drain(&mut table)), vec![(ChangeType::Add, 1)]);
	assert_eq!(row(&table, 1).value("name").as_deref(), Some("Pears"));
	assert_eq!(table.records_count(), 2);
}

#[test]
fn add_decorates_each_row() {
	let mut table = table();
	let mut decorated: Vec<(MemoryRow, Record)> = Vec::new();
	let mut decorate = |row: &MemoryRow, record: &Record| decorated.push((row.clone(), record.clone()));
	table.add(
		vec![record(&[("name", "Apples")]), record(&[("name", "Pears")])],
		AddOptions {
			at: None,
			decorate: Some(&mut decorate),
		},
	);

	assert_eq!(decorated.len(), 2);
	assert_eq!(decorated[0].0, row(&table, 0));
	assert_eq!(decorated[1].1, record(&[("name", "Pears")]));
}

#[test]
fn update_writes_fields_and_announces() {
	let mut table = table();
	table.add(vec![record(&[("name", "Apples"), ("qty", "1")])], AddOptions::default());
	drain(&mut table);

	table.update(vec![("qty", " 9 ")], At::index(0));
	let notifications = drain(&mut table);
	assert_eq!(specific(&notifications), vec![(ChangeType::Update, 0)]);
	assert_eq!(notifications[1].record(), &record(&[("name", "Apples"), ("qty", "9")]));
	assert_eq!(row(&table, 0).value("qty").as_deref(), Some(" 9 "));
}

#[test]
fn update_out_of_range_is_a_no_op() {
	let mut table = table();
	table.add(vec![record(&[("name", "a")]), record(&[("name", "b")])], AddOptions::default());
	drain(&mut table);
	let before = table.get();

	table.update(vec![("qty", "9")], At::index(5));
	table.update(vec![("qty", "9")], At::index(2));
	table.update(vec![("qty", "9")], At::default());

	assert!(drain(&mut table).is_empty());
	assert_eq!(table.get(), before);
	assert_eq!(table.records_count(), 2);
}

#[test]
fn remove_deletes_the_row_at_index() {
	let mut table = table();
	table.add(vec![record(&[("name", "a")]), record(&[("name", "b")])], AddOptions::default());
	drain(&mut table);

	table.remove(At::index(0));
	let notifications = drain(&mut table);
	assert_eq!(specific(&notifications), vec![(ChangeType::Remove, 0)]);
	assert_eq!(notifications[1].record(), &record(&[("name", "a"), ("qty", "")]));
	assert_eq!(table.records_count(), 1);
	assert_eq!(table.get(), vec![record(&[("name", "b"), ("qty", "")])]);
}

#[test]
fn remove_out_of_range_is_a_no_op() {
	let mut table = table();
	table.add(vec![record(&[("name", "a")])], AddOptions::default());
	drain(&mut table);

	table.remove(At::index(1));
	table.remove(At::default());

	assert!(drain(&mut table).is_empty());
	assert_eq!(table.records_count(), 1);
	assert_eq!(table.rows().len(), 2);
}

#[test]
fn move_row_keeps_committed_rows_together() {
	let mut table = table();
	table.add(vec![record(&[("name", "a")]), record(&[("name", "b")])], AddOptions::default());
	table.dispatch(editable_table_dom::TableEvent::Focus { row: row(&table, 2) });
	row(&table, 2).set_value("name", "uncommitted");
	drain(&mut table);

	assert_eq!(table.move_row(0, 5), Some(1));
	assert_eq!(table.get()[0].value("name"), "b");
	assert_eq!(table.get()[1].value("name"), "a");

	assert_eq!(table.move_row(2, 0), Some(2), "Uncommitted rows stay below the records.");
	assert_eq!(table.move_row(3, 0), None, "The trailing blank row can't be moved.");

	assert!(drain(&mut table).is_empty());
	assert_eq!(table.records_count(), 2);
}
