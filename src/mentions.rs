use once_cell::sync::Lazy;
use regex::Regex;

// "@" followed by two whitespace-separated word tokens (first + last name)
static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+\s+\w+)").expect("valid mention regex"));

// http(s) scheme up to the next whitespace; trailing punctuation stays
// attached to the token
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

/// Extract `@First Last` mentions from free text, without the leading `@`,
/// in order of occurrence. Duplicates are preserved — downstream counts
/// may rely on a name appearing twice.
pub fn extract_mentions(text: &str) -> Vec<String> {
    MENTION_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Extract bare http/https URLs from free text, in order of occurrence,
/// duplicates preserved.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_and_last_names() {
        let mentions = extract_mentions("Hi @John Doe, see @Jane Smith's update");
        assert_eq!(mentions, ["John Doe", "Jane Smith"]);
    }

    #[test]
    fn single_token_mention_does_not_match() {
        // A lone token is not a first+last mention
        let mentions = extract_mentions("thanks @JohnDoe");
        assert!(mentions.is_empty());
    }

    #[test]
    fn mention_greedily_takes_the_next_two_word_tokens() {
        // The pattern knows nothing about real names; any two word tokens
        // after the @ are captured
        let mentions = extract_mentions("ping @everyone please");
        assert_eq!(mentions, ["everyone please"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let mentions = extract_mentions("@John Doe and again @John Doe");
        assert_eq!(mentions, ["John Doe", "John Doe"]);
    }

    #[test]
    fn empty_text_yields_empty_list() {
        assert!(extract_mentions("").is_empty());
        assert!(extract_urls("").is_empty());
    }

    #[test]
    fn extracts_urls_in_order() {
        let urls = extract_urls("See https://example.com/doc and https://foo.bar/x?y=1.");
        assert_eq!(urls, ["https://example.com/doc", "https://foo.bar/x?y=1."]);
    }

    #[test]
    fn trailing_punctuation_stays_attached() {
        // The token boundary is whitespace, nothing smarter
        let urls = extract_urls("read http://a.example/p.");
        assert_eq!(urls, ["http://a.example/p."]);
    }

    #[test]
    fn plain_text_has_no_urls() {
        assert!(extract_urls("no links here, just words").is_empty());
    }
}
