//! Page window calculation for question listings
//!
//! Pages are 1-based windows of [`QUESTIONS_PER_PAGE`] items over an already ordered list.
//! Asking for a page past the end is not an error, it simply yields nothing.

/// Number of questions shown per page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Parse the `page` query parameter
///
/// Absent or non-numeric values fall back to page 1. Numeric values below 1 are kept as-is
/// so that [`paginate`] returns an empty page for them. Numbers that overflow `i64`
/// saturate, so they still land past the last page.
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(value) = raw.map(str::trim) else {
        return 1;
    };

    if let Ok(page) = value.parse::<i64>() {
        return page;
    }

    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 1;
    }

    if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

/// Calculate the `(start, end)` slice bounds of a page
///
/// Returns `None` when the page holds no items: pages below 1 or past the last item.
pub fn page_bounds(total_items: usize, page: i64, limit: usize) -> Option<(usize, usize)> {
    if page < 1 || limit == 0 {
        return None;
    }

    let start = usize::try_from(page - 1).ok()?.checked_mul(limit)?;
    if start >= total_items {
        return None;
    }

    let end = (start + limit).min(total_items);
    Some((start, end))
}

/// Return the items on the given page of [`QUESTIONS_PER_PAGE`] items
pub fn paginate<T: Clone>(items: &[T], page: i64) -> Vec<T> {
    match page_bounds(items.len(), page, QUESTIONS_PER_PAGE) {
        Some((start, end)) => items[start..end].to_vec(),
        None => Vec::new(),
    }
}
