//! Page component widgets.
//!
//! - `primitives`: text measurement, bold text, rules and bars
//! - `header`: page title block and section headers
//! - `rows`: row, progress and separator components

pub mod header;
pub mod primitives;
pub mod rows;

pub use header::{draw_page_title, draw_section_header};
pub use primitives::{draw_bold_text, draw_text, fit_font, split_two_lines, text_width};
pub use rows::{draw_progress, draw_row, draw_separator};
