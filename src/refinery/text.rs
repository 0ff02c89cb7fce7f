// * Text Normalizer
// * Whitespace cleanup, level classification and the two duration detectors the
// * extraction cascades are built from.

use regex::Regex;
use scraper::ElementRef;
use std::fmt;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static DURATION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(duration|time|estimated|approximately|approx):\s*")
        .expect("Invalid duration label regex")
});

// * Substring vocabulary for the broad sniff: time units plus commitment wording
const TIME_KEYWORDS: &[&str] = &[
    "hour", "hours", "hr", "hrs",
    "week", "weeks", "wk", "wks",
    "month", "months", "mo", "mos",
    "day", "days", "minute", "minutes", "min", "mins",
    "approx", "approximately", "estimated", "complete",
    "pace", "commitment", "time",
];

// * Ordered: the first pattern that matches wins, even if a later one would match more.
// * Plural units come first inside each alternation so "4 weeks" is captured whole.
static DURATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(\d+(?:\.\d+)?)\s*(hours|hour|hrs|hr)\s*(?:per\s*week|weekly)?",
        r"(\d+(?:\.\d+)?)\s*(weeks|week|wks|wk)",
        r"(\d+(?:\.\d+)?)\s*(months|month|mos|mo)",
        r"(\d+(?:\.\d+)?)\s*(days|day)",
        r"(\d+(?:\.\d+)?)\s*(minutes|minute|mins|min)",
        r"approximately\s*(\d+(?:\.\d+)?)\s*(hours|hour|weeks|week)",
        r"about\s*(\d+(?:\.\d+)?)\s*(hours|hour|weeks|week)",
        r"(\d+(?:\.\d+)?)-(\d+(?:\.\d+)?)\s*(hours|hour|weeks|week)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid duration pattern"))
    .collect()
});

/// Difficulty level advertised by a course page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapses whitespace runs to single spaces and trims. Idempotent.
pub fn clean(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// `clean` for optional input; `None` becomes the empty string.
pub fn clean_opt(text: Option<&str>) -> String {
    text.map(clean).unwrap_or_default()
}

/// First level keyword found, checked beginner, intermediate, advanced in that order.
pub fn classify_level(text: &str) -> Option<Level> {
    let lower = text.to_lowercase();
    if lower.contains("beginner") {
        Some(Level::Beginner)
    } else if lower.contains("intermediate") {
        Some(Level::Intermediate)
    } else if lower.contains("advanced") {
        Some(Level::Advanced)
    } else {
        None
    }
}

/// Returns the cleaned text, minus a leading label, if it carries any time signal.
pub fn sniff_duration_phrase(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if !TIME_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return None;
    }
    let cleaned = clean(text);
    Some(DURATION_LABEL.replace(&cleaned, "").into_owned())
}

/// First match of the ordered duration patterns against the lowercased text.
pub fn extract_duration_pattern(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let lower = text.to_lowercase();
    DURATION_PATTERNS
        .iter()
        .find_map(|re| re.find(&lower))
        .map(|m| m.as_str().trim().to_string())
}

// * Elements whose text never renders as page copy
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Whether text directly inside `el` is script, style or template source.
pub fn hides_text(el: &ElementRef) -> bool {
    HIDDEN_TEXT_PARENTS.contains(&el.value().name())
}

/// Text nodes under `el` in document order, skipping script and style bodies.
pub fn visible_text<'a>(el: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    el.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|parent| hides_text(&parent));
        (!hidden).then_some(&**text)
    })
}

/// Text of an element with each text node trimmed and joined by single spaces.
pub fn element_text(el: &ElementRef) -> String {
    let joined = visible_text(*el)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    clean(&joined)
}

/// Raw concatenated text of an element, cleaned.
pub fn element_text_raw(el: &ElementRef) -> String {
    clean(&visible_text(*el).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("a   b\n\tc"), "a b c");
        assert_eq!(clean("   padded  "), "padded");
        assert_eq!(clean_opt(None), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for s in ["a   b\n\tc", "  x ", "", "\u{a0}nbsp\u{a0}text", "one"] {
            let once = clean(s);
            assert_eq!(clean(&once), once);
        }
    }

    #[test]
    fn test_classify_level() {
        assert_eq!(
            classify_level("This is an Intermediate course"),
            Some(Level::Intermediate)
        );
        assert_eq!(classify_level("no info"), None);
        assert_eq!(classify_level("ADVANCED level"), Some(Level::Advanced));
    }

    #[test]
    fn test_classify_level_priority() {
        assert_eq!(
            classify_level("From beginner to advanced"),
            Some(Level::Beginner)
        );
        assert_eq!(
            classify_level("advanced topics for the intermediate learner"),
            Some(Level::Intermediate)
        );
    }

    #[test]
    fn test_sniff_strips_label() {
        assert_eq!(
            sniff_duration_phrase("Duration:   4 weeks"),
            Some("4 weeks".to_string())
        );
        assert_eq!(
            sniff_duration_phrase("Approx: 10 hours"),
            Some("10 hours".to_string())
        );
    }

    #[test]
    fn test_sniff_rejects_text_without_signals() {
        assert_eq!(sniff_duration_phrase("Taught by experts"), None);
        assert_eq!(sniff_duration_phrase(""), None);
    }

    #[test]
    fn test_sniff_accepts_commitment_wording() {
        assert_eq!(
            sniff_duration_phrase("Flexible schedule, learn at your own pace"),
            Some("Flexible schedule, learn at your own pace".to_string())
        );
    }

    #[test]
    fn test_extract_duration_pattern_approximately() {
        let found = extract_duration_pattern("approximately 4 weeks to complete").unwrap();
        assert!(found.contains('4'));
        assert!(found.contains("weeks"));
    }

    #[test]
    fn test_extract_duration_pattern_priority() {
        // * Hours are checked before weeks, so the per-week phrase wins
        assert_eq!(
            extract_duration_pattern("4 weeks at 3 hours per week"),
            Some("3 hours per week".to_string())
        );
        assert_eq!(
            extract_duration_pattern("About 2.5 Months"),
            Some("2.5 months".to_string())
        );
    }

    #[test]
    fn test_extract_duration_pattern_trims_trailing_space() {
        assert_eq!(
            extract_duration_pattern("12 hours to finish"),
            Some("12 hours".to_string())
        );
    }

    #[test]
    fn test_extract_duration_pattern_none() {
        assert_eq!(extract_duration_pattern("Self-paced"), None);
        assert_eq!(extract_duration_pattern(""), None);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Beginner.to_string(), "Beginner");
        assert_eq!(Level::Advanced.as_str(), "Advanced");
    }

    #[test]
    fn test_element_text_skips_script_and_style() {
        let doc = scraper::Html::parse_fragment(
            r#"<div><style>.x { color: red }</style><script>{"level":"Advanced"}</script><span>Intro</span> course</div>"#,
        );
        let div = doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "div")
            .unwrap();
        assert_eq!(element_text(&div), "Intro course");
        assert_eq!(element_text_raw(&div), "Intro course");
    }
}
