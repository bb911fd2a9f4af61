//! Record notifications and their Rust-side subscribers.

use crate::record::Record;
use core::fmt::{self, Debug, Display, Formatter};
use tracing::{debug, instrument, trace};

/// Classifies a single record mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
	Add,
	Update,
	Remove,
}
impl ChangeType {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			ChangeType::Add => "add",
			ChangeType::Update => "update",
			ChangeType::Remove => "remove",
		}
	}
}
impl Display for ChangeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One observable notification.
///
/// Each classified mutation produces a [`Notification::Change`] immediately followed by its specific counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
	Change { change_type: ChangeType, record: Record, index: usize },
	Add { record: Record, index: usize },
	Update { record: Record, index: usize },
	Remove { record: Record, index: usize },
}
impl Notification {
	/// The generic/specific pair announcing one mutation, in delivery order.
	#[must_use]
	pub fn pair(change_type: ChangeType, record: Record, index: usize) -> [Self; 2] {
		let specific = match change_type {
			ChangeType::Add => Notification::Add { record: record.clone(), index },
			ChangeType::Update => Notification::Update { record: record.clone(), index },
			ChangeType::Remove => Notification::Remove { record: record.clone(), index },
		};
		[Notification::Change { change_type, record, index }, specific]
	}

	/// DOM event name this notification is dispatched as.
	#[must_use]
	pub fn event_name(&self) -> &'static str {
		match self {
			Notification::Change { .. } => "record:change",
			Notification::Add { .. } => "record:add",
			Notification::Update { .. } => "record:update",
			Notification::Remove { .. } => "record:remove",
		}
	}

	/// [`None`] for the specific notifications, since their type is implied.
	#[must_use]
	pub fn change_type(&self) -> Option<ChangeType> {
		match self {
			Notification::Change { change_type, .. } => Some(*change_type),
			_ => None,
		}
	}

	#[must_use]
	pub fn record(&self) -> &Record {
		match self {
			Notification::Change { record, .. }
			| Notification::Add { record, .. }
			| Notification::Update { record, .. }
			| Notification::Remove { record, .. } => record,
		}
	}

	#[must_use]
	pub fn index(&self) -> usize {
		match self {
			Notification::Change { index, .. }
			| Notification::Add { index, .. }
			| Notification::Update { index, .. }
			| Notification::Remove { index, .. } => *index,
		}
	}

	fn is_specific(&self, change_type: ChangeType) -> bool {
		matches!(
			(self, change_type),
			(Notification::Add { .. }, ChangeType::Add) | (Notification::Update { .. }, ChangeType::Update) | (Notification::Remove { .. }, ChangeType::Remove)
		)
	}
}

/// Which notifications a subscriber receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
	/// Only [`Notification::Change`].
	Change,
	/// Only the specific notification of this type.
	Specific(ChangeType),
	All,
}
impl Granularity {
	fn accepts(self, notification: &Notification) -> bool {
		match self {
			Granularity::All => true,
			Granularity::Change => matches!(notification, Notification::Change { .. }),
			Granularity::Specific(change_type) => notification.is_specific(change_type),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
	id: SubscriptionId,
	granularity: Granularity,
	callback: Box<dyn FnMut(&Notification)>,
}

/// Rust closures observing a table's notifications, in subscription order.
#[derive(Default)]
pub struct Subscribers {
	next_id: u64,
	entries: Vec<Subscriber>,
}
impl Debug for Subscribers {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscribers").field("next_id", &self.next_id).field("len", &self.entries.len()).finish()
	}
}
impl Subscribers {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe(&mut self, granularity: Granularity, callback: impl 'static + FnMut(&Notification)) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;
		self.entries.push(Subscriber {
			id,
			granularity,
			callback: Box::new(callback),
		});
		trace!("Subscribed {:?} for {:?}.", id, granularity);
		id
	}

	/// Returns whether `id` was still subscribed.
	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let len = self.entries.len();
		self.entries.retain(|subscriber| subscriber.id != id);
		len != self.entries.len()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	#[instrument(skip(self, notification), fields(event = notification.event_name(), index = notification.index()))]
	pub fn deliver(&mut self, notification: &Notification) {
		debug!(record = ?notification.record().redacted(), "Delivering notification.");
		for subscriber in &mut self.entries {
			if subscriber.granularity.accepts(notification) {
				(subscriber.callback)(notification);
			}
		}
	}
}
