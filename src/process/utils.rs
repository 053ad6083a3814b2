/// Collapse embedded line breaks to spaces and trim surrounding whitespace.
///
/// PDF table extraction leaves wrapped cell text as multi-line strings, so
/// "Analisi\nMatematica" must compare equal to "Analisi Matematica".
pub fn normalize_cell(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Normalized text of the cell at `idx`, or `None` when the cell is missing
/// or blank.
pub fn cell_text(row: &[Option<String>], idx: usize) -> Option<String> {
    let text = normalize_cell(row.get(idx)?.as_deref()?);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Case-insensitive substring test against an uppercase needle.
pub fn contains_upper(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(needle)
}
