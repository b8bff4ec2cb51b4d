//! Pure pagination math and page-window shaping helpers.

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = (start + safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Parse a one-based page argument.
///
/// Returns `Some(page)` when the value is valid (`>= 1`), otherwise `None`.
pub fn parse_one_based_page(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value.parse::<usize>().ok().filter(|page| *page >= 1),
        None => Some(1),
    }
}

/// Render a page window of titled entries into an embed description.
///
/// Entries keep their input order, so numbered titles ("1.", "2.", …)
/// stay aligned with the store enumeration.
pub fn paginated_entries_description(
    entries: &[(String, String)],
    per_page: usize,
    page: usize,
) -> String {
    let total = total_pages(entries.len(), per_page);
    let page = clamp_page(page, total);
    let (start, end) = page_window(entries.len(), per_page, page);

    entries[start..end]
        .iter()
        .map(|(title, body)| format!("**{title}**\n{body}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_math_covers_boundaries() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);

        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(9, 3), 3);
        assert_eq!(clamp_page(2, 0), 1);

        assert_eq!(page_window(12, 5, 1), (0, 5));
        assert_eq!(page_window(12, 5, 3), (10, 12));
    }

    #[test]
    fn one_based_page_parsing() {
        assert_eq!(parse_one_based_page(None), Some(1));
        assert_eq!(parse_one_based_page(Some("4")), Some(4));
        assert_eq!(parse_one_based_page(Some("0")), None);
        assert_eq!(parse_one_based_page(Some("four")), None);
    }

    #[test]
    fn entry_description_windows_in_order() {
        let entries: Vec<(String, String)> = (1..=7)
            .map(|i| (format!("{i}. user"), format!("Since: day {i}")))
            .collect();

        let description = paginated_entries_description(&entries, 5, 2);
        assert!(description.starts_with("**6. user**\nSince: day 6"));
        assert!(description.contains("**7. user**"));
        assert!(!description.contains("**5. user**"));
    }
}
