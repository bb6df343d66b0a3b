pub mod error;
pub mod line_list;
pub mod wide;

pub use error::{IngestError, Result};
pub use line_list::{HEADER_RENAMES, read_line_list};
pub use wide::{COUNTRY_COLUMN, WideTable};
