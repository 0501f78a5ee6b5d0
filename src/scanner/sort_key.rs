//! Sort keys for display strings.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Leading words dropped from sort keys, compared case-sensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredArticles(Vec<String>);

impl IgnoredArticles {
    /// Parse a space-separated list such as `"The El La"`.
    pub fn parse(list: &str) -> Self {
        Self(list.split_whitespace().map(str::to_string).collect())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.iter().any(|a| a == word)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoredArticles {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Strip combining diacritical marks: `"Céu"` becomes `"Ceu"`.
pub fn remove_accents(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Turn a display string into its sort key.
///
/// Accents are removed first, so an accented article still matches its plain
/// form. Leading articles are dropped only while something follows them;
/// a value that is nothing but an article keeps it. Applying this to its own
/// output returns the output unchanged.
///
/// # Example
///
/// ```
/// use tagscan::scanner::{sanitize_field_for_sorting, IgnoredArticles};
///
/// let articles = IgnoredArticles::parse("The O");
/// assert_eq!(sanitize_field_for_sorting("The Beatles", &articles), "Beatles");
/// assert_eq!(sanitize_field_for_sorting("Õ Blésq Blom", &articles), "Blesq Blom");
/// ```
pub fn sanitize_field_for_sorting(value: &str, articles: &IgnoredArticles) -> String {
    let normalized = remove_accents(value);
    let mut rest = normalized.trim();

    while let Some((first, remainder)) = rest.split_once(char::is_whitespace) {
        let remainder = remainder.trim_start();
        if remainder.is_empty() || !articles.contains(first) {
            break;
        }
        rest = remainder;
    }

    rest.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles() -> IgnoredArticles {
        IgnoredArticles::parse("The O")
    }

    #[test]
    fn test_sanitize_accents() {
        assert_eq!(sanitize_field_for_sorting("Céu", &articles()), "Ceu");
        assert_eq!(
            sanitize_field_for_sorting("Céu", &IgnoredArticles::default()),
            "Ceu"
        );
    }

    #[test]
    fn test_removes_articles() {
        assert_eq!(sanitize_field_for_sorting("The Beatles", &articles()), "Beatles");
    }

    #[test]
    fn test_removes_accented_articles() {
        assert_eq!(
            sanitize_field_for_sorting("Õ Blésq Blom", &articles()),
            "Blesq Blom"
        );
    }

    #[test]
    fn test_articles_are_case_sensitive() {
        assert_eq!(sanitize_field_for_sorting("the Beatles", &articles()), "the Beatles");
    }

    #[test]
    fn test_article_must_be_a_whole_word() {
        assert_eq!(sanitize_field_for_sorting("Theatre", &articles()), "Theatre");
        assert_eq!(sanitize_field_for_sorting("Ocean", &articles()), "Ocean");
    }

    #[test]
    fn test_lone_article_is_kept() {
        assert_eq!(sanitize_field_for_sorting("The", &articles()), "The");
        assert_eq!(sanitize_field_for_sorting("The  ", &articles()), "The");
    }

    #[test]
    fn test_extra_whitespace() {
        assert_eq!(
            sanitize_field_for_sorting("  The \t Rolling Stones ", &articles()),
            "Rolling Stones"
        );
    }

    #[test]
    fn test_empty_and_unmatched() {
        assert_eq!(sanitize_field_for_sorting("", &articles()), "");
        assert_eq!(sanitize_field_for_sorting("Abba", &articles()), "Abba");
    }

    #[test]
    fn test_idempotent() {
        let articles = articles();
        for input in [
            "The The",
            "The O Band",
            "Õ The Céu",
            "  The   Beatles ",
            "Ærøskøbing",
            "O",
            "",
            "Ünïcödé ñame",
        ] {
            let once = sanitize_field_for_sorting(input, &articles);
            let twice = sanitize_field_for_sorting(&once, &articles);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_parse_ignored_articles() {
        let parsed = IgnoredArticles::parse("The El  La\tLos");
        assert_eq!(parsed.iter().collect::<Vec<_>>(), vec!["The", "El", "La", "Los"]);
        assert!(parsed.contains("La"));
        assert!(!parsed.contains("la"));
        assert!(IgnoredArticles::parse("   ").is_empty());
    }

    #[test]
    fn test_remove_accents() {
        assert_eq!(remove_accents("Beyoncé"), "Beyonce");
        assert_eq!(remove_accents("Sigur Rós"), "Sigur Ros");
        assert_eq!(remove_accents("plain"), "plain");
    }
}
