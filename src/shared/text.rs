//! Small text helpers shared by the FAQ, template and config layers.

/// True when the value is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Trims every label and drops the blank ones, keeping order.
pub fn clean_labels<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| label.as_ref().trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}

/// Splits a delimited list ("hours, open" or "hours;open") into clean labels.
pub fn split_labels(raw: &str, delimiter: char) -> Vec<String> {
    clean_labels(raw.split(delimiter))
}
