pub mod email;
pub mod job;
pub mod profile;

/// Trims every entry and drops the blanks. Shared by record normalizers.
pub(crate) fn strip_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
