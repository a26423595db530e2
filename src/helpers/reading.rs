//! Reading time estimation

use crate::content::ContentBlock;

/// Fixed reading speed the estimate assumes
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate reading time in whole minutes for a post's content
///
/// Counts whitespace-separated words in every section heading and in
/// the flattened text of every section body, then divides by
/// [`WORDS_PER_MINUTE`] rounding up. A post with no countable words
/// estimates to zero; the number is surfaced as computed, without a
/// display floor.
pub fn estimate(blocks: &[ContentBlock]) -> u32 {
    let words: usize = blocks
        .iter()
        .map(|block| {
            let heading = block.heading.as_deref().map_or(0, count_words);
            heading + count_words(&block.body.as_text())
        })
        .sum();

    words.div_ceil(WORDS_PER_MINUTE) as u32
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RichText;

    fn block(heading: Option<&str>, words: usize) -> ContentBlock {
        let text = vec!["word"; words].join(" ");
        ContentBlock {
            heading: heading.map(String::from),
            body: RichText::paragraph(&text),
        }
    }

    #[test]
    fn test_empty_content_is_zero() {
        assert_eq!(estimate(&[]), 0);
    }

    #[test]
    fn test_exactly_one_minute() {
        assert_eq!(estimate(&[block(None, 200)]), 1);
    }

    #[test]
    fn test_one_word_over_rounds_up() {
        assert_eq!(estimate(&[block(None, 201)]), 2);
    }

    #[test]
    fn test_heading_words_count() {
        // Four heading words plus 196 body words land exactly on the limit
        assert_eq!(estimate(&[block(Some("a four word heading"), 196)]), 1);
        assert_eq!(estimate(&[block(Some("a four word heading"), 197)]), 2);
    }

    #[test]
    fn test_words_sum_across_blocks() {
        let blocks = [block(Some("one"), 100), block(None, 99)];
        assert_eq!(estimate(&blocks), 1);

        let blocks = [block(Some("one"), 100), block(None, 100)];
        assert_eq!(estimate(&blocks), 2);
    }

    #[test]
    fn test_missing_heading_contributes_nothing() {
        assert_eq!(estimate(&[block(None, 1)]), 1);
    }

    #[test]
    fn test_count_words_splits_on_any_whitespace() {
        assert_eq!(count_words("one  two\tthree\nfour"), 4);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words(""), 0);
    }
}
