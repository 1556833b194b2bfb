//! Presence checks shared by drafts and patches.

/// Whether an optional text input is absent or blank.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|text| text.trim().is_empty())
}

/// Whether an optional text input is present but blank.
pub(crate) fn is_set_but_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| text.trim().is_empty())
}

/// Push `name` onto `missing` when `value` is absent or blank.
pub(crate) fn require(missing: &mut Vec<&'static str>, name: &'static str, value: &Option<String>) {
    if is_blank(value) {
        missing.push(name);
    }
}

/// Push `name` onto `empty` when `value` is present but blank.
pub(crate) fn reject_blank(
    empty: &mut Vec<&'static str>,
    name: &'static str,
    value: &Option<String>,
) {
    if is_set_but_blank(value) {
        empty.push(name);
    }
}

/// Trimmed owned copy of a validated input.
pub(crate) fn take(value: Option<String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}
