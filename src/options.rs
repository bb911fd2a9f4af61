use core::time::Duration;

/// Per-table configuration.
///
/// The selectors, class and attribute are only consulted by the [`web`](`crate::web`) layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	/// How long pruning waits after a row loses focus.
	pub prune_delay: Duration,
	/// A field that doesn't count towards row emptiness, like a record id.
	pub identity_field: Option<String>,
	pub field_selector: String,
	pub remove_selector: String,
	pub active_class: String,
	/// Marks tables that [`DataApi`](`crate::web::DataApi`) attaches to on first interaction.
	pub spy_attribute: String,
}
impl Default for Options {
	fn default() -> Self {
		Self {
			prune_delay: Duration::from_millis(100),
			identity_field: None,
			field_selector: "[name]".to_owned(),
			remove_selector: "[data-remove]".to_owned(),
			active_class: "active".to_owned(),
			spy_attribute: "data-editable-spy".to_owned(),
		}
	}
}
impl Options {
	#[must_use]
	pub fn with_prune_delay(mut self, prune_delay: Duration) -> Self {
		self.prune_delay = prune_delay;
		self
	}

	#[must_use]
	pub fn with_identity_field(mut self, identity_field: impl Into<String>) -> Self {
		self.identity_field = Some(identity_field.into());
		self
	}

	#[must_use]
	pub fn with_field_selector(mut self, field_selector: impl Into<String>) -> Self {
		self.field_selector = field_selector.into();
		self
	}

	#[must_use]
	pub fn with_remove_selector(mut self, remove_selector: impl Into<String>) -> Self {
		self.remove_selector = remove_selector.into();
		self
	}

	#[must_use]
	pub fn with_active_class(mut self, active_class: impl Into<String>) -> Self {
		self.active_class = active_class.into();
		self
	}

	#[must_use]
	pub fn with_spy_attribute(mut self, spy_attribute: impl Into<String>) -> Self {
		self.spy_attribute = spy_attribute.into();
		self
	}
}
