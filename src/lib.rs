#![doc(html_root_url = "https://docs.rs/editable-table-dom/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Turns an HTML table into an auto-growing record editor.
//!
//! [`RecordTable`] is the host-independent engine, driven through the [`RowStore`] seam.
//! [`web::EditableTable`] attaches it to a DOM `<table>`, and [`memory::MemoryRows`] runs it without one.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod error;
mod growth;
mod ingress;
mod notification;
mod options;
mod reconcile;
mod record;
mod rows;
mod table;

pub mod memory;
pub mod web;

pub use error::Error;
pub use ingress::{PruneTicket, TableEvent};
pub use notification::{ChangeType, Granularity, Notification, Subscribers, SubscriptionId};
pub use options::Options;
pub use record::{serialize_fields, Record};
pub use rows::RowStore;
pub use table::{AddOptions, At, RecordTable};
