use std::borrow::Cow;
use std::path::Path;

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '+' | '=' | ',' | '@' | '%')
}

/// Render a path for a `sh -c` command line. Plain paths pass through unchanged,
/// anything else is single-quoted.
pub fn quote_path<P: AsRef<Path>>(path: P) -> String {
    let s = path.as_ref().to_string_lossy();
    quote_word(&s).into_owned()
}

pub fn quote_word(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.chars().all(is_shell_safe) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!("'{}'", s.replace('\'', r"'\''")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths_unchanged() {
        assert_eq!(quote_path("out/aligned_sorted.bam"), "out/aligned_sorted.bam");
        assert_eq!(quote_path("/data/run-1/reads.fastq"), "/data/run-1/reads.fastq");
    }

    #[test]
    fn test_spaces_are_quoted() {
        assert_eq!(quote_path("my reads.fastq"), "'my reads.fastq'");
    }

    #[test]
    fn test_single_quote_escaped() {
        assert_eq!(quote_word("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_empty_is_quoted() {
        assert_eq!(quote_word(""), "''");
    }
}
