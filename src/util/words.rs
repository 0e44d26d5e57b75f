//! Whole-word matching over kernel tables
//!
//! `/proc/partitions` and `/proc/diskstats` are whitespace-delimited, so
//! whole-word matching (`grep -w` semantics) reduces to field equality.
//! This keeps "sda" from matching the "sda1" partition rows.

/// Check whether a line contains the given word as a whole
/// whitespace-delimited field
///
/// # Examples
/// ```
/// use blocksmoke::util::words::contains_word;
///
/// assert!(contains_word("   8        0  976762584 sda", "sda"));
/// assert!(!contains_word("   8        1  976760832 sda1", "sda"));
/// ```
pub fn contains_word(line: &str, word: &str) -> bool {
    line.split_whitespace().any(|field| field == word)
}

/// Return the first line of `text` containing `word` as a whole field,
/// mirroring `grep -w -m 1`
pub fn first_line_with_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    text.lines().find(|line| contains_word(line, word))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTITIONS: &str = "major minor  #blocks  name\n\
\n\
   8        0  976762584 sda\n\
   8        1  976760832 sda1\n\
 259        0  500107608 nvme0n1\n";

    #[test]
    fn test_contains_word_exact_field() {
        assert!(contains_word("   8        0 sda 123 456", "sda"));
        assert!(contains_word("sda", "sda"));
    }

    #[test]
    fn test_contains_word_rejects_substrings() {
        assert!(!contains_word("   8        1 sda1 123 456", "sda"));
        assert!(!contains_word("sdab", "sda"));
        assert!(!contains_word("xsda", "sda"));
    }

    #[test]
    fn test_first_line_with_word_picks_first_match() {
        let line = first_line_with_word(PARTITIONS, "sda").expect("match");
        assert!(line.contains("976762584"));
        assert!(!line.contains("sda1"));
    }

    #[test]
    fn test_first_line_with_word_absent() {
        assert!(first_line_with_word(PARTITIONS, "sdb").is_none());
        assert!(first_line_with_word("", "sda").is_none());
    }

    #[test]
    fn test_first_line_with_word_partition_suffix_only() {
        // A table holding only the partition row must not count as the disk.
        let text = "   8        1  976760832 sda1\n";
        assert!(first_line_with_word(text, "sda").is_none());
    }
}
