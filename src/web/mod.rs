//! Browser bindings: an [`EditableTable`] drives a [`RecordTable`] from DOM events.
//!
//! Notifications are dispatched on the table element as bubbling, composed [***CustomEvent***](https://developer.mozilla.org/en-US/docs/Web/API/CustomEvent)s
//! named `record:change`, `record:add`, `record:update` and `record:remove`.
//! Their `detail` is `{ changeType, record, index }` for `record:change` and `{ record, index }` otherwise.

mod data_api;
mod rows;

pub use data_api::DataApi;
pub use rows::{read_value, DomRows};

use crate::{
	error::Error,
	ingress::{PruneTicket, TableEvent},
	notification::{Granularity, Notification, Subscribers, SubscriptionId},
	options::Options,
	record::Record,
	table::{AddOptions, At, RecordTable},
};
use core::{
	cell::{Cell, RefCell},
	convert::TryFrom,
	fmt::{self, Debug, Formatter},
};
use js_sys::{Function, Object, Reflect};
use std::{
	collections::VecDeque,
	rc::{Rc, Weak},
};
use tracing::{error, instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, CustomEvent, CustomEventInit, Element, HtmlElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ingress {
	Focus,
	Blur,
	Click,
	Input,
	Change,
}

const LISTENED: [(&str, Ingress); 5] = [
	("focus", Ingress::Focus),
	("blur", Ingress::Blur),
	("click", Ingress::Click),
	("input", Ingress::Input),
	("change", Ingress::Change),
];

/// Controls that report edits through `change` rather than `input`.
const CHANGE_ONLY_FIELDS: &str = "select,input[type=checkbox],input[type=radio]";

/// Attached to a `<table>`, this keeps its `<tbody>` rows in sync with a sequence of records.
///
/// The table's last row at the time of attaching is the template for new rows.
///
/// Event listeners are removed and a pending prune is cancelled when this instance is dropped.
pub struct EditableTable {
	shared: Rc<Shared>,
	listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
	_prune: Closure<dyn FnMut()>,
}

#[derive(Debug)]
struct Shared {
	element: Element,
	view: DomRows,
	remove_selector: String,
	engine: RefCell<RecordTable<DomRows>>,
	/// Events waiting for the engine. DOM mutations can fire events synchronously (removing a focused field blurs it).
	pending: RefCell<VecDeque<(Ingress, TableEvent<Element>)>>,
	/// The last field edit routed from an `input` event, so that the following `change` is not applied twice.
	last_input: RefCell<Option<(Element, String)>>,
	subscribers: RefCell<Subscribers>,
	timer: Cell<Option<(i32, PruneTicket)>>,
	prune_callback: RefCell<Option<Function>>,
	flushing: Cell<bool>,
}

impl EditableTable {
	/// # Errors
	///
	/// If `table` has no `<tbody>`, or that has no rows.
	#[instrument(skip(table))]
	pub fn attach(table: Element, options: Options) -> Result<Self, Error> {
		let body = table.query_selector("tbody").ok().flatten().ok_or(Error::MissingBody)?;
		let rows = DomRows::new(body, options.field_selector.clone(), options.active_class.clone());
		let view = rows.clone();
		let remove_selector = options.remove_selector.clone();
		let engine = RecordTable::new(rows, options)?;

		let shared = Rc::new(Shared {
			element: table,
			view,
			remove_selector,
			engine: RefCell::new(engine),
			pending: RefCell::new(VecDeque::new()),
			last_input: RefCell::new(None),
			subscribers: RefCell::new(Subscribers::new()),
			timer: Cell::new(None),
			prune_callback: RefCell::new(None),
			flushing: Cell::new(false),
		});

		let prune = {
			let weak: Weak<Shared> = Rc::downgrade(&shared);
			Closure::wrap(Box::new(move || {
				if let Some(shared) = weak.upgrade() {
					shared.run_prune()
				}
			}) as Box<dyn FnMut()>)
		};
		*shared.prune_callback.borrow_mut() = Some(prune.as_ref().unchecked_ref::<Function>().clone());

		let mut listener_options = AddEventListenerOptions::new();
		listener_options.capture(true).passive(true);

		let mut listeners = Vec::with_capacity(LISTENED.len());
		for &(name, ingress) in &LISTENED {
			let handler_shared = Rc::clone(&shared);
			let listener = Closure::wrap(
				Box::new(move |event: web_sys::Event| handler_shared.ingress(ingress, &event)) as Box<dyn FnMut(web_sys::Event)>
			);
			if let Err(error) = shared
				.element
				.add_event_listener_with_callback_and_add_event_listener_options(name, listener.as_ref().unchecked_ref(), &listener_options)
			{
				error!("Failed to add event listener {:?}: {:?}", name, error)
			}
			listeners.push((name, listener));
		}

		Ok(Self { shared, listeners, _prune: prune })
	}

	#[must_use]
	pub fn element(&self) -> &Element {
		&self.shared.element
	}

	#[must_use]
	pub fn records_count(&self) -> usize {
		self.shared.engine.borrow().records_count()
	}

	/// Records of all rows except the trailing blank one.
	#[must_use]
	pub fn get(&self) -> Vec<Record> {
		self.shared.engine.borrow().get()
	}

	/// See [`RecordTable::add`]. `options.decorate` must not call back into this table.
	pub fn add(&self, records: impl IntoIterator<Item = Record>, options: AddOptions<'_, Element>) {
		self.shared.with_engine(|engine| engine.add(records, options));
	}

	/// See [`RecordTable::update`].
	pub fn update<K: AsRef<str>, V: AsRef<str>>(&self, changed_properties: impl IntoIterator<Item = (K, V)>, options: At) {
		self.shared.with_engine(|engine| engine.update(changed_properties, options));
	}

	/// See [`RecordTable::remove`].
	pub fn remove(&self, options: At) {
		self.shared.with_engine(|engine| engine.remove(options));
	}

	/// See [`RecordTable::move_row`].
	pub fn move_row(&self, from: usize, to: usize) -> Option<usize> {
		self.shared.with_engine(|engine| engine.move_row(from, to)).flatten()
	}

	/// Registers a Rust observer in addition to the DOM events.
	///
	/// Callbacks may use this table's record API, but must not (un)subscribe.
	pub fn subscribe(&self, granularity: Granularity, callback: impl 'static + FnMut(&Notification)) -> SubscriptionId {
		self.shared.subscribers.borrow_mut().subscribe(granularity, callback)
	}

	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		self.shared.subscribers.borrow_mut().unsubscribe(id)
	}
}

impl Debug for EditableTable {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("EditableTable").field("element", &self.shared.element).field("listeners", &self.listeners.len()).finish()
	}
}

impl Drop for EditableTable {
	fn drop(&mut self) {
		for (name, listener) in self.listeners.drain(..) {
			if let Err(error) =
				self.shared.element.remove_event_listener_with_callback_and_bool(name, listener.as_ref().unchecked_ref(), true)
			{
				error!("Failed to remove event listener {:?}: {:?}", name, error)
			}
		}
		self.shared.cancel_prune();
		self.shared.prune_callback.borrow_mut().take();
	}
}

impl Shared {
	#[instrument(skip(self, event))]
	fn ingress(&self, ingress: Ingress, event: &web_sys::Event) {
		let target = match event.target().and_then(|target| target.dyn_into::<Element>().ok()) {
			Some(target) => target,
			None => return,
		};
		let row = match self.view.row_of(&target) {
			Some(row) => row,
			None => return trace!("Event target is outside of the table body."),
		};

		let table_event = match ingress {
			Ingress::Focus => TableEvent::Focus { row },
			Ingress::Blur => TableEvent::Blur { row },
			Ingress::Input | Ingress::Change => {
				if !self.view.is_field(&target) {
					return;
				}
				let field = match target.get_attribute("name") {
					Some(field) => field,
					None => return,
				};
				let value = read_value(&target).unwrap_or_default();
				if ingress == Ingress::Change {
					if !target.matches(CHANGE_ONLY_FIELDS).unwrap_or(false) {
						return;
					}
					let routed = matches!(self.last_input.take(), Some((last, last_value)) if last == target && last_value == value);
					if routed {
						return trace!("This `change` repeats an edit already routed from `input`.");
					}
				} else {
					*self.last_input.borrow_mut() = Some((target, value.clone()));
				}
				TableEvent::Input { row, field, value }
			}
			Ingress::Click => {
				if self.view.is_field(&target) {
					return;
				}
				if target.closest(&self.remove_selector).ok().flatten().is_some() {
					TableEvent::Remove { row }
				} else {
					return focus_first_field(&target, self.view.field_selector());
				}
			}
		};

		self.pending.borrow_mut().push_back((ingress, table_event));
		self.pump();
	}

	/// Applies queued events until none are left, then flushes notifications.
	///
	/// Events that arrive while the engine is busy stay queued and are applied by the outer call.
	fn pump(&self) {
		loop {
			let (ingress, ticket) = {
				let mut engine = match self.engine.try_borrow_mut() {
					Ok(engine) => engine,
					Err(_) => return trace!("Engine busy, event stays queued."),
				};
				let (ingress, table_event) = match self.pending.borrow_mut().pop_front() {
					Some(next) => next,
					None => break,
				};
				(ingress, engine.dispatch(table_event))
			};
			match (ingress, ticket) {
				(Ingress::Focus, _) => self.cancel_prune(),
				(_, Some(ticket)) => self.arm_prune(ticket),
				(_, None) => (),
			}
		}
		self.flush();
	}

	/// Runs `f` on the engine, then applies any events its DOM changes fired.
	///
	/// Returns [`None`] if the engine is already in use further up the stack.
	fn with_engine<T>(&self, f: impl FnOnce(&mut RecordTable<DomRows>) -> T) -> Option<T> {
		let result = match self.engine.try_borrow_mut() {
			Ok(mut engine) => f(&mut engine),
			Err(_) => {
				warn!("Editable table called back into itself while busy. Ignoring the call.");
				return None;
			}
		};
		self.pump();
		Some(result)
	}

	fn cancel_prune(&self) {
		if let Some((handle, _)) = self.timer.take() {
			if let Some(window) = web_sys::window() {
				window.clear_timeout_with_handle(handle)
			}
		}
	}

	fn arm_prune(&self, ticket: PruneTicket) {
		self.cancel_prune();
		let window = match web_sys::window() {
			Some(window) => window,
			None => return error!("No window to schedule the prune in."),
		};
		let callback = self.prune_callback.borrow();
		let callback = match callback.as_ref() {
			Some(callback) => callback,
			None => return,
		};
		let delay = i32::try_from(ticket.delay().as_millis()).unwrap_or(i32::MAX);
		match window.set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay) {
			Ok(handle) => self.timer.set(Some((handle, ticket))),
			Err(error) => error!("Failed to schedule prune: {:?}", error),
		}
	}

	fn run_prune(&self) {
		if let Some((_, ticket)) = self.timer.take() {
			self.with_engine(|engine| engine.run_deferred_prune(ticket));
		}
	}

	/// Delivers queued notifications until none are left.
	///
	/// Re-entrant calls return immediately; their notifications are picked up by the outer loop.
	fn flush(&self) {
		if self.flushing.replace(true) {
			return;
		}
		loop {
			let batch: Vec<Notification> = self.engine.borrow_mut().drain_notifications().collect();
			if batch.is_empty() {
				break;
			}
			for notification in &batch {
				self.subscribers.borrow_mut().deliver(notification);
				self.dispatch_dom_event(notification);
			}
		}
		self.flushing.set(false);
	}

	fn dispatch_dom_event(&self, notification: &Notification) {
		let span = trace_span!("dispatch_dom_event", event = notification.event_name());
		let _enter = span.enter();

		let mut init = CustomEventInit::new();
		init.bubbles(true).cancelable(false).composed(true).detail(&detail(notification));
		let event = match CustomEvent::new_with_event_init_dict(notification.event_name(), &init) {
			Ok(event) => event,
			Err(error) => return error!("Failed to create {:?}: {:?}", notification.event_name(), error),
		};
		if let Err(error) = self.element.dispatch_event(&event) {
			error!("Failed to dispatch {:?}: {:?}", notification.event_name(), error)
		}
	}
}

fn focus_first_field(target: &Element, field_selector: &str) {
	match target.query_selector(field_selector) {
		Ok(Some(field)) => match field.dyn_into::<HtmlElement>() {
			Ok(field) => {
				if let Err(error) = field.focus() {
					warn!("Could not focus field: {:?}", error)
				}
			}
			Err(field) => trace!("{:?} is not focusable.", field),
		},
		Ok(None) => (),
		Err(error) => error!("Invalid field selector {:?}: {:?}", field_selector, error),
	}
}

fn set(target: &Object, key: &str, value: &JsValue) {
	if let Err(error) = Reflect::set(target, &JsValue::from_str(key), value) {
		error!("Failed to set {:?}: {:?}", key, error)
	}
}

/// Converts `record` into a plain object.
#[must_use]
pub fn record_to_object(record: &Record) -> Object {
	let object = Object::new();
	for (name, value) in record.fields() {
		set(&object, name, &JsValue::from_str(value));
	}
	object
}

#[allow(clippy::cast_precision_loss)]
fn detail(notification: &Notification) -> Object {
	let detail = Object::new();
	if let Some(change_type) = notification.change_type() {
		set(&detail, "changeType", &JsValue::from_str(change_type.as_str()));
	}
	set(&detail, "record", &record_to_object(notification.record()));
	set(&detail, "index", &JsValue::from_f64(notification.index() as f64));
	detail
}
