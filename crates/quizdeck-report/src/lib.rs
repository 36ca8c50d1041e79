//! quizdeck-report: Rendering of question blocks, the navigation panel,
//! and score cards.
//!
//! `html` produces a self-contained page; `table` and `text` produce what
//! the terminal front end prints.

pub mod html;
pub mod table;
pub mod text;

pub use html::{generate_html, write_html_report, HtmlPage};
