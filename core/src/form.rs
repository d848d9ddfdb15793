//! `application/x-www-form-urlencoded` body encoding.

use std::collections::BTreeMap;

use crate::error::HttpError;

/// Media type for form-encoded bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Form fields: key to one or more values.
pub type FormData = BTreeMap<String, Vec<String>>;

/// Encode form fields, sorted by key, one `key=value` pair per value.
pub fn encode_form(form: &FormData) -> Result<String, HttpError> {
    let pairs: Vec<(&str, &str)> = form
        .iter()
        .flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str())))
        .collect();
    serde_urlencoded::to_string(pairs).map_err(|e| HttpError::Construction(e.to_string()))
}

/// True when the media type of `content_type` is form-urlencoded, ignoring
/// parameters such as `charset`.
pub fn is_form_urlencoded(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case(FORM_URLENCODED))
        .unwrap_or(false)
}
