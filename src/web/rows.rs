use crate::rows::RowStore;
use core::convert::TryFrom;
use tracing::{error, warn};
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// [`RowStore`] over the `<tr>` children of a `<tbody>`.
///
/// Named fields are the descendants matching the field selector that carry a `name` attribute.
#[derive(Debug, Clone)]
pub struct DomRows {
	body: Element,
	field_selector: String,
	active_class: String,
}
impl DomRows {
	#[must_use]
	pub fn new(body: Element, field_selector: impl Into<String>, active_class: impl Into<String>) -> Self {
		Self {
			body,
			field_selector: field_selector.into(),
			active_class: active_class.into(),
		}
	}

	#[must_use]
	pub fn body(&self) -> &Element {
		&self.body
	}

	#[must_use]
	pub fn field_selector(&self) -> &str {
		&self.field_selector
	}

	/// The row of this body that contains `target`, if any.
	#[must_use]
	pub fn row_of(&self, target: &Element) -> Option<Element> {
		let row = target.closest("tr").ok().flatten()?;
		(row.parent_element().as_ref() == Some(&self.body)).then(|| row)
	}

	/// Whether `element` is one of the named fields.
	#[must_use]
	pub fn is_field(&self, element: &Element) -> bool {
		element.has_attribute("name") && element.matches(&self.field_selector).unwrap_or(false)
	}

	fn named_fields(&self, row: &Element) -> Vec<Element> {
		let nodes = match row.query_selector_all(&self.field_selector) {
			Ok(nodes) => nodes,
			Err(error) => {
				error!("Invalid field selector {:?}: {:?}", self.field_selector, error);
				return Vec::new();
			}
		};
		(0..nodes.length())
			.filter_map(|i| nodes.item(i))
			.filter_map(|node| node.dyn_into::<Element>().ok())
			.filter(|element| element.has_attribute("name"))
			.collect()
	}
}

/// The live `value` of a form control. [`None`] for other elements.
#[must_use]
pub fn read_value(element: &Element) -> Option<String> {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		Some(input.value())
	} else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
		Some(select.value())
	} else {
		element.dyn_ref::<HtmlTextAreaElement>().map(HtmlTextAreaElement::value)
	}
}

fn write_value(element: &Element, value: &str) {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		input.set_value(value)
	} else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
		select.set_value(value)
	} else if let Some(text_area) = element.dyn_ref::<HtmlTextAreaElement>() {
		text_area.set_value(value)
	} else {
		warn!("Can't write a value into <{}>.", element.tag_name())
	}
}

impl RowStore for DomRows {
	type Row = Element;

	fn len(&self) -> usize {
		self.body.children().length() as usize
	}

	fn get(&self, index: usize) -> Option<Element> {
		self.body.children().item(u32::try_from(index).ok()?)
	}

	fn index_of(&self, row: &Element) -> Option<usize> {
		let children = self.body.children();
		(0..children.length()).position(|i| children.item(i).as_ref() == Some(row))
	}

	fn fields(&self, row: &Element) -> Vec<(String, String)> {
		self.named_fields(row)
			.into_iter()
			.filter_map(|field| {
				let name = field.get_attribute("name")?;
				Some((name, read_value(&field).unwrap_or_default()))
			})
			.collect()
	}

	fn set_field(&mut self, row: &Element, name: &str, value: &str) {
		for field in self.named_fields(row) {
			if field.get_attribute("name").as_deref() == Some(name) {
				write_value(&field, value)
			}
		}
	}

	fn duplicate(&self, row: &Element) -> Element {
		row.clone_node_with_deep(true)
			.expect_throw("editable-table-dom: Could not clone row.")
			.dyn_into::<Element>()
			.expect_throw("editable-table-dom: Cloned row is not an element.")
	}

	fn insert(&mut self, index: usize, row: Element) {
		let reference = u32::try_from(index).ok().and_then(|index| self.body.children().item(index));
		if let Err(error) = self.body.insert_before(&row, reference.as_deref()) {
			error!("Failed to insert row at {}: {:?}", index, error)
		}
	}

	fn remove(&mut self, index: usize) -> Option<Element> {
		let row = self.get(index)?;
		match self.body.remove_child(&row) {
			Ok(_) => Some(row),
			Err(error) => {
				error!("Failed to remove row {}: {:?}", index, error);
				None
			}
		}
	}

	fn set_active(&mut self, row: &Element, active: bool) {
		if let Err(error) = row.class_list().toggle_with_force(&self.active_class, active) {
			error!("Failed to toggle class {:?}: {:?}", self.active_class, error)
		}
	}
}
