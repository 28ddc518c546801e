pub mod error;
pub mod styleguide;

pub use error::{Result, ResultExt, StylebookError};
pub use styleguide::{Block, FileResult, Styleguide, TOC_KEY, TocTag};
