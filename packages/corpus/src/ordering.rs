//! Article ordering within a law.
//!
//! Articles are ordered numerically by their leading digits, then
//! lexicographically. Ids without leading digits (supplementary provisions
//! such as `suppl_1` or `fusoku_2`) sort after all numbered articles.

use std::cmp::Ordering;

/// Leading decimal digits of an article id, if any.
fn numeric_prefix(id: &str) -> Option<u64> {
    let end = id
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(id.len());
    id[..end].parse().ok()
}

/// Compare two article ids.
///
/// # Examples
/// ```
/// use std::cmp::Ordering;
/// use osaka_kenpo_corpus::ordering::compare_article_ids;
///
/// assert_eq!(compare_article_ids("2", "10"), Ordering::Less);
/// assert_eq!(compare_article_ids("suppl_1", "103"), Ordering::Greater);
/// ```
pub fn compare_article_ids(a: &str, b: &str) -> Ordering {
    match (numeric_prefix(a), numeric_prefix(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Sort items in place by their article id.
pub fn sort_by_article_id<T, F>(items: &mut [T], id: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare_article_ids(id(a), id(b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("12"), Some(12));
        assert_eq!(numeric_prefix("2_2"), Some(2));
        assert_eq!(numeric_prefix("suppl_1"), None);
        assert_eq!(numeric_prefix(""), None);
    }

    #[test]
    fn test_numbered_before_supplementary() {
        let mut ids = vec!["suppl_1", "10", "fusoku_1", "2_2", "1", "2"];
        sort_by_article_id(&mut ids, |s| s);
        assert_eq!(ids, vec!["1", "2", "2_2", "10", "fusoku_1", "suppl_1"]);
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let mut ids = vec!["100", "9", "1050", "11"];
        sort_by_article_id(&mut ids, |s| s);
        assert_eq!(ids, vec!["9", "11", "100", "1050"]);
    }

    #[test]
    fn test_same_number_tie_breaks_lexicographically() {
        assert_eq!(compare_article_ids("3_2", "3_10"), Ordering::Greater);
        assert_eq!(compare_article_ids("3", "3_2"), Ordering::Less);
        assert_eq!(compare_article_ids("3", "3"), Ordering::Equal);
    }

    #[test]
    fn test_overflowing_number_sorts_last() {
        let huge = "99999999999999999999999";
        assert_eq!(compare_article_ids(huge, "1"), Ordering::Greater);
    }
}
