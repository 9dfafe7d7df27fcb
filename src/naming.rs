//! Naming template rendering.
//!
//! Templates are plain strings with `{field}` placeholders, for example
//! `{title} - {artist}`. Rendering substitutes every placeholder that has a
//! string value in the field map and leaves all others untouched.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::{Captures, Regex};
use serde_json::Value;

pub type NamingFields = BTreeMap<String, Value>;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Renders `template` against `fields` in a single pass.
///
/// Substituted values are not scanned again, so a value that itself looks
/// like `{field}` ends up in the output verbatim. Placeholders without a
/// field, or whose field is not a string, are left as written.
pub fn render(template: &str, fields: &NamingFields) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            fields
                .get(&caps[1])
                .and_then(sanitize)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Makes a metadata value safe to embed in a single path segment.
///
/// Path separators become `|`. Only string values are accepted.
pub fn sanitize(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.replace(['/', '\\'], "|"))
}
