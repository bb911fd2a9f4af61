use core::fmt::{self, Display, Formatter};

/// Why a table couldn't be attached.
///
/// Once attached, tables have no error path: malformed calls are logged and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	/// The table element has no `<tbody>`.
	MissingBody,
	/// There is no last row to capture as template.
	MissingTemplateRow,
}
impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Error::MissingBody => f.write_str("editable table has no <tbody>"),
			Error::MissingTemplateRow => f.write_str("editable table has no row to use as template"),
		}
	}
}
impl std::error::Error for Error {}
