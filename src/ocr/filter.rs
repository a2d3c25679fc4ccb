//! Fragment filtering
//!
//! Keeps fragments with non-blank text and confidence at or above a
//! threshold. The default of 0 drops Tesseract's -1 rows.

use super::types::TextFragment;

/// Confidence/emptiness filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentFilter {
    min_confidence: i32,
}

impl Default for FragmentFilter {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FragmentFilter {
    pub fn new(min_confidence: i32) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> i32 {
        self.min_confidence
    }

    pub fn accepts(&self, fragment: &TextFragment) -> bool {
        !fragment.text.trim().is_empty() && fragment.confidence >= self.min_confidence
    }

    /// Drop rejected fragments, keeping the survivors in their original order
    pub fn apply(&self, fragments: Vec<TextFragment>) -> Vec<TextFragment> {
        fragments.into_iter().filter(|f| self.accepts(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_fragments(fragments: Vec<TextFragment>) -> Vec<TextFragment> {
        FragmentFilter::default().apply(fragments)
    }

    fn sample() -> Vec<TextFragment> {
        vec![
            TextFragment::new("", 0, 0, 100, 100, -1),
            TextFragment::new("HELLO", 10, 10, 50, 20, 96),
            TextFragment::new("   ", 5, 5, 5, 5, 80),
            TextFragment::new("faint", 70, 10, 30, 20, 0),
            TextFragment::new("ghost", 70, 40, 30, 20, -1),
            TextFragment::new("\t\n", 1, 1, 1, 1, 50),
            TextFragment::new("WORLD", 10, 40, 50, 20, 42),
        ]
    }

    #[test]
    fn test_default_filter() {
        let kept = filter_fragments(sample());
        let texts: Vec<&str> = kept.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["HELLO", "faint", "WORLD"]);
    }

    #[test]
    fn test_output_is_ordered_subset() {
        let input = sample();
        let kept = filter_fragments(input.clone());

        let mut cursor = input.iter();
        for fragment in &kept {
            assert!(cursor.any(|f| f == fragment), "{fragment:?} out of order");
            assert!(fragment.confidence >= 0);
            assert!(!fragment.text.trim().is_empty());
        }
    }

    #[test]
    fn test_idempotent() {
        let filter = FragmentFilter::new(40);
        let once = filter.apply(sample());
        let twice = filter.apply(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_threshold() {
        let kept = FragmentFilter::new(50).apply(sample());
        let texts: Vec<&str> = kept.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["HELLO"]);
    }

    #[test]
    fn test_negative_threshold_still_drops_blank_text() {
        let kept = FragmentFilter::new(-1).apply(sample());
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|f| !f.text.trim().is_empty()));
    }

    #[test]
    fn test_text_is_not_rewritten() {
        let kept = filter_fragments(vec![TextFragment::new(" padded ", 0, 0, 1, 1, 10)]);
        assert_eq!(kept[0].text, " padded ");
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_fragments(Vec::new()).is_empty());
    }
}
