//! Comparison-file index construction and lookup.

use std::collections::BTreeMap;

use crate::domain::ComparisonFileIndex;

/// Names the detail file holding the pairwise comparison view for two
/// submissions.
#[cfg_attr(test, mockall::automock)]
pub trait ComparisonFileNamer {
    /// File name for the detail view of the given pair.
    fn file_name(&self, first: &str, second: &str) -> String;
}

/// Default naming scheme: `<min>-<max>.json` over the sorted id pair.
#[derive(Debug, Default, Clone)]
pub struct DashedJsonNamer;

impl DashedJsonNamer {
    /// Create a new namer.
    pub fn new() -> Self {
        Self
    }
}

impl ComparisonFileNamer for DashedJsonNamer {
    fn file_name(&self, first: &str, second: &str) -> String {
        if first <= second {
            format!("{first}-{second}.json")
        } else {
            format!("{second}-{first}.json")
        }
    }
}

/// Build the two-level submission-id lookup for a set of compared pairs.
///
/// Each pair is stored once in canonical (sorted) order; readers resolve the
/// other direction through [`lookup_comparison_file`].
pub fn build_comparison_file_index<'a, N, I>(pairs: I, namer: &N) -> ComparisonFileIndex
where
    N: ComparisonFileNamer,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut index: ComparisonFileIndex = BTreeMap::new();
    for (first, second) in pairs {
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        index
            .entry(low.to_string())
            .or_default()
            .insert(high.to_string(), namer.file_name(low, high));
    }
    index
}

/// Resolve the detail-file name for a pair, accepting either id order.
pub fn lookup_comparison_file<'a>(
    index: &'a ComparisonFileIndex,
    first: &str,
    second: &str,
) -> Option<&'a str> {
    index
        .get(first)
        .and_then(|inner| inner.get(second))
        .or_else(|| index.get(second).and_then(|inner| inner.get(first)))
        .map(String::as_str)
}

/// Whether a submission id appears anywhere in the lookup, as an outer or an
/// inner key.
pub fn resolves_submission_id(index: &ComparisonFileIndex, id: &str) -> bool {
    index.contains_key(id) || index.values().any(|inner| inner.contains_key(id))
}

#[cfg(test)]
mod tests {
    use super::{
        ComparisonFileNamer, DashedJsonNamer, MockComparisonFileNamer,
        build_comparison_file_index, lookup_comparison_file, resolves_submission_id,
    };

    #[test]
    fn dashed_namer_sorts_the_pair() {
        let namer = DashedJsonNamer::new();
        assert_eq!(namer.file_name("B", "A"), "A-B.json");
        assert_eq!(namer.file_name("A", "B"), "A-B.json");
    }

    #[test]
    fn index_stores_each_pair_once_in_canonical_order() {
        let namer = DashedJsonNamer::new();
        let index = build_comparison_file_index([("B", "A"), ("A", "C")], &namer);

        let inner = index.get("A").expect("outer key");
        assert_eq!(inner.get("B").map(String::as_str), Some("A-B.json"));
        assert_eq!(inner.get("C").map(String::as_str), Some("A-C.json"));
        assert!(!index.contains_key("B"));
    }

    #[test]
    fn lookup_is_symmetric() {
        let namer = DashedJsonNamer::new();
        let index = build_comparison_file_index([("A", "B")], &namer);

        assert_eq!(lookup_comparison_file(&index, "A", "B"), Some("A-B.json"));
        assert_eq!(lookup_comparison_file(&index, "B", "A"), Some("A-B.json"));
        assert_eq!(lookup_comparison_file(&index, "A", "C"), None);
    }

    #[test]
    fn resolves_outer_and_inner_keys() {
        let namer = DashedJsonNamer::new();
        let index = build_comparison_file_index([("A", "B")], &namer);

        assert!(resolves_submission_id(&index, "A"));
        assert!(resolves_submission_id(&index, "B"));
        assert!(!resolves_submission_id(&index, "F"));
    }

    #[test]
    fn custom_namer_drives_file_names() {
        let mut namer = MockComparisonFileNamer::new();
        namer
            .expect_file_name()
            .returning(|first, second| format!("{first}_{second}.html"));

        let index = build_comparison_file_index([("A", "B")], &namer);
        assert_eq!(lookup_comparison_file(&index, "B", "A"), Some("A_B.html"));
    }
}
