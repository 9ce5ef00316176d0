// src/sort.rs
//! Sort policy applied after filtering.

use serde::Serialize;

use crate::model::ContentRecord;

/// Ordering applied to the filtered set. Both modes sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest `published_at` first; undated records last.
    #[default]
    Recency,
    /// Most likes first; missing likes count as 0.
    Engagement,
}

impl SortMode {
    pub fn from_sort_by_likes(sort_by_likes: bool) -> Self {
        if sort_by_likes {
            SortMode::Engagement
        } else {
            SortMode::Recency
        }
    }
}

/// Stable in-place sort; ties keep their incoming (retrieval) order.
pub fn sort_records(records: &mut [&ContentRecord], mode: SortMode) {
    match mode {
        SortMode::Engagement => {
            records.sort_by(|a, b| b.likes_or_zero().total_cmp(&a.likes_or_zero()))
        }
        SortMode::Recency => records.sort_by_key(|r| std::cmp::Reverse(r.sort_timestamp())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, published: Option<&str>, likes: Option<f64>) -> ContentRecord {
        let mut r = ContentRecord::new(id, format!("https://example.com/{id}"));
        r.published_at = published.map(str::to_string);
        r.likes = likes;
        r
    }

    fn ids(v: &[&ContentRecord]) -> Vec<String> {
        v.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn recency_puts_undated_and_malformed_last() {
        let a = rec("a", Some("2024-01-08T00:00:00Z"), None);
        let b = rec("b", None, None);
        let c = rec("c", Some("2024-01-09T00:00:00Z"), None);
        let d = rec("d", Some("not a date"), None);
        let mut v = vec![&a, &b, &c, &d];
        sort_records(&mut v, SortMode::Recency);
        assert_eq!(ids(&v), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn engagement_sorts_by_likes_with_absent_as_zero() {
        let a = rec("a", None, Some(10.0));
        let b = rec("b", None, None);
        let c = rec("c", None, Some(250.0));
        let d = rec("d", None, Some(0.0));
        let mut v = vec![&a, &b, &c, &d];
        sort_records(&mut v, SortMode::Engagement);
        assert_eq!(ids(&v), vec!["c", "a", "b", "d"]);
        for pair in v.windows(2) {
            assert!(pair[0].likes_or_zero() >= pair[1].likes_or_zero());
        }
    }

    #[test]
    fn mode_follows_sort_by_likes_flag() {
        assert_eq!(SortMode::from_sort_by_likes(true), SortMode::Engagement);
        assert_eq!(SortMode::from_sort_by_likes(false), SortMode::Recency);
    }
}
