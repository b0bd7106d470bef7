/// Escape `& < > " '` and nothing else
pub fn escape_html(text: &str) -> String {
    html_escape::encode_quoted_attribute(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert!(!escape_html("\"quoted\" 'single'").contains(['"', '\'']));
    }

    #[test]
    fn slashes_and_urls_are_kept() {
        assert_eq!(escape_html("http://x"), "http://x");
        assert_eq!(escape_html("</b>"), "&lt;/b&gt;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_html("Just words 123"), "Just words 123");
    }
}
