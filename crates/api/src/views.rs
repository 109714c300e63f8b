//! Shared HTML building blocks.
//!
//! View rendering is deliberately thin: plain string builders behind a
//! common page layout. Field values arriving here have already been
//! sanitized by the validation layer.

use animart_core::validate::{escape_markup, FieldError};
use animart_db::models::item::ItemSummary;
use axum::http::StatusCode;

/// Wrap a page body in the shared document layout.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/animes\">Animes</a> | \
         <a href=\"/categories\">Categories</a> | <a href=\"/items\">Items</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

/// The generic error view for not-found and store-failure conditions.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>Error</h1>\n<p>{}</p>\n<p>Status: {}</p>",
        escape_markup(message),
        status.as_u16()
    );
    layout("Error", &body)
}

/// Render the field-level validation messages, or nothing when the list is
/// empty.
pub fn field_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"errors\">\n");
    for error in errors {
        out.push_str(&format!("<li>{}</li>\n", error.message));
    }
    out.push_str("</ul>\n");
    out
}

/// A labelled single-line text input, pre-filled with `value`.
pub fn text_input(label: &str, name: &str, value: &str) -> String {
    format!(
        "<p><label for=\"{name}\">{label}</label> \
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\"></p>\n"
    )
}

/// A labelled textarea, pre-filled with `value`.
pub fn textarea(label: &str, name: &str, value: &str) -> String {
    format!(
        "<p><label for=\"{name}\">{label}</label><br>\
         <textarea id=\"{name}\" name=\"{name}\" rows=\"4\" cols=\"60\">{value}</textarea></p>\n"
    )
}

/// An item listing shared by the dependency views (delete guards, detail
/// pages of referenced records).
pub fn item_summaries(items: &[ItemSummary]) -> String {
    if items.is_empty() {
        return String::from("<p>There are no items.</p>\n");
    }
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!(
            "<li><a href=\"/item/{}\">{}</a>: {}</li>\n",
            item.id, item.name, item.description
        ));
    }
    out.push_str("</ul>\n");
    out
}
