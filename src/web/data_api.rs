use super::EditableTable;
use crate::options::Options;
use core::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{debug, error, instrument, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Document, Element};

const ACTIVATING: [&str; 3] = ["focus", "input", "click"];

/// Declarative activation: attaches an [`EditableTable`] to each `<table>` carrying the spy attribute
/// the first time one of its descendants is focused, edited or clicked.
///
/// The attribute is removed on activation. Activated tables live as long as this [`DataApi`].
pub struct DataApi {
	document: Document,
	state: Rc<State>,
	listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

#[derive(Debug)]
struct State {
	options: Options,
	tables: RefCell<Vec<EditableTable>>,
}

impl DataApi {
	#[must_use]
	#[instrument(skip(document))]
	pub fn install(document: &Document, options: Options) -> Self {
		let state = Rc::new(State {
			options,
			tables: RefCell::new(Vec::new()),
		});

		let mut listener_options = AddEventListenerOptions::new();
		listener_options.capture(true).passive(true);

		let mut listeners = Vec::with_capacity(ACTIVATING.len());
		for &name in &ACTIVATING {
			let handler_state = Rc::clone(&state);
			let listener = Closure::wrap(
				Box::new(move |event: web_sys::Event| handler_state.activate(&event)) as Box<dyn FnMut(web_sys::Event)>
			);
			if let Err(error) =
				document.add_event_listener_with_callback_and_add_event_listener_options(name, listener.as_ref().unchecked_ref(), &listener_options)
			{
				error!("Failed to add event listener {:?}: {:?}", name, error)
			}
			listeners.push((name, listener));
		}

		Self {
			document: document.clone(),
			state,
			listeners,
		}
	}

	/// Tables activated so far, in activation order.
	#[must_use]
	pub fn tables(&self) -> Ref<'_, [EditableTable]> {
		Ref::map(self.state.tables.borrow(), Vec::as_slice)
	}

	/// The instance attached to `table`, if it was activated.
	#[must_use]
	pub fn table(&self, table: &Element) -> Option<Ref<'_, EditableTable>> {
		let tables = self.state.tables.borrow();
		let index = tables.iter().position(|t| t.element() == table)?;
		Some(Ref::map(tables, |tables| &tables[index]))
	}
}

impl State {
	fn activate(&self, event: &web_sys::Event) {
		let target = match event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
			Some(target) => target,
			None => return,
		};
		let selector = format!("table[{}]", self.options.spy_attribute);
		let table = match target.closest(&selector) {
			Ok(Some(table)) => table,
			Ok(None) => return,
			Err(error) => return error!("Invalid spy attribute {:?}: {:?}", self.options.spy_attribute, error),
		};

		if let Err(error) = table.remove_attribute(&self.options.spy_attribute) {
			warn!("Could not remove {:?}: {:?}", self.options.spy_attribute, error)
		}
		// Listeners added to the table now still receive the current event, since it's only at the document.
		match EditableTable::attach(table, self.options.clone()) {
			Ok(editable_table) => {
				debug!("Activated {:?}.", editable_table);
				self.tables.borrow_mut().push(editable_table)
			}
			Err(error) => warn!("Could not activate editable table: {}", error),
		}
	}
}

impl Drop for DataApi {
	fn drop(&mut self) {
		for (name, listener) in self.listeners.drain(..) {
			if let Err(error) =
				self.document.remove_event_listener_with_callback_and_bool(name, listener.as_ref().unchecked_ref(), true)
			{
				error!("Failed to remove event listener {:?}: {:?}", name, error)
			}
		}
		self.state.tables.borrow_mut().clear();
	}
}
