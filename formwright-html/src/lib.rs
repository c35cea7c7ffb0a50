//! # formwright-html
//!
//! Renders formwright forms as fillable HTML.
//!
//! - [`render_form`] / [`render_form_with`] - A whole form, sections in order
//! - [`render_field`] - One control with its label and error
//! - [`DynamicForm`] - Values and errors of a form being filled in
//!
//! Unknown field types render a visible "Unknown Component" placeholder.

mod render;
pub use render::{HtmlOptions, escape_html, render_field, render_form, render_form_with};

mod form;
pub use form::DynamicForm;
