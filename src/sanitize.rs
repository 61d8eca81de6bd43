//! Output-boundary HTML escaping.
//!
//! Stored text is kept exactly as the author sent it. Every user-supplied
//! string is escaped once, when a record is turned into a response body.
//! Escaping is not idempotent (`&` becomes `&amp;` again on a second pass),
//! so nothing else in the crate calls this.

use std::borrow::Cow;

/// Escape `&`, `<`, `>`, `"` and `'` so a browser cannot treat `text` as markup.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    html_escape::encode_quoted_attribute(text)
}
