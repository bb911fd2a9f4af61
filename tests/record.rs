use editable_table_dom::{serialize_fields, Record};

#[test]
fn serialization_trims_values() {
	let record = serialize_fields(vec![("name", "  Apples \n"), ("qty", "\t3")]);
	assert_eq!(record.get("name"), Some("Apples"));
	assert_eq!(record.get("qty"), Some("3"));
	assert_eq!(record.len(), 2);
}

#[test]
fn later_fields_win() {
	let record = serialize_fields(vec![("name", "first"), ("name", "second")]);
	assert_eq!(record.get("name"), Some("second"));
	assert_eq!(record.len(), 1);
}

#[test]
fn missing_fields_read_as_empty() {
	let record = Record::new();
	assert_eq!(record.get("name"), None);
	assert_eq!(record.value("name"), "");
	assert!(record.is_empty());
}

#[test]
fn emptiness_compares_every_default() {
	let defaults: Record = vec![("name", ""), ("qty", "0")].into_iter().collect();

	assert!(defaults.clone().matches_defaults(&defaults, None));

	let edited: Record = vec![("name", ""), ("qty", "5")].into_iter().collect();
	assert!(!edited.matches_defaults(&defaults, None));

	let cleared: Record = vec![("name", ""), ("qty", "")].into_iter().collect();
	assert!(!cleared.matches_defaults(&defaults, None));
}

#[test]
fn emptiness_ignores_unknown_fields() {
	let defaults: Record = vec![("name", "")].into_iter().collect();
	let extended: Record = vec![("name", ""), ("note", "hello")].into_iter().collect();
	assert!(extended.matches_defaults(&defaults, None));
}

#[test]
fn missing_fields_match_blank_defaults_only() {
	let defaults: Record = vec![("name", ""), ("qty", "0")].into_iter().collect();
	let partial: Record = vec![("qty", "0")].into_iter().collect();
	assert!(partial.matches_defaults(&defaults, None));

	let partial: Record = vec![("name", "")].into_iter().collect();
	assert!(!partial.matches_defaults(&defaults, None));
}

#[test]
fn emptiness_skips_the_identity_field() {
	let defaults: Record = vec![("id", ""), ("name", "")].into_iter().collect();
	let identified: Record = vec![("id", "k3j2x9a"), ("name", "")].into_iter().collect();
	assert!(identified.matches_defaults(&defaults, Some("id")));
	assert!(!identified.matches_defaults(&defaults, None));
}
