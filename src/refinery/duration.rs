// * Duration cascade
// * Eight independent strategies ordered from most to least specific. Each one is a pure
// * function over the parsed document; the cascade takes the first acceptable answer.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, trace};

use super::text::{
    clean, element_text, extract_duration_pattern, hides_text, sniff_duration_phrase, visible_text,
};
use crate::config::constants::MAX_DURATION_LEN;

/// Signature shared by every duration strategy.
pub type DurationStrategy = fn(&Html) -> Option<String>;

/// Strategies in the order they are tried.
pub const DURATION_STRATEGIES: &[(&str, DurationStrategy)] = &[
    ("duration_selectors", from_duration_selectors),
    ("json_ld", from_json_ld),
    ("info_sections", from_info_sections),
    ("metadata_blocks", from_metadata_blocks),
    ("commitment_labels", from_commitment_labels),
    ("headings", from_headings),
    ("page_text", from_page_text),
    ("generic_elements", from_generic_elements),
];

static SELECTORS_DURATION: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_all(&[
        r#"[data-testid*="duration"]"#,
        r#"[class*="duration"]"#,
        r#"[class*="time"]"#,
        r#"[class*="Duration"]"#,
        r#"[aria-label*="duration"]"#,
        r#"[aria-label*="time"]"#,
        ".rc-Duration",
        ".duration-text",
        ".course-duration",
    ])
});

static SELECTORS_METADATA: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    parse_all(&[
        r#"[class*="sidebar"]"#,
        r#"[class*="meta"]"#,
        r#"[class*="info"]"#,
        r#"[class*="details"]"#,
        r#"[class*="overview"]"#,
        r#"[class*="stats"]"#,
        r#"[class*="course-info"]"#,
        r#"[class*="CourseInfo"]"#,
    ])
});

static SELECTOR_JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());
static SELECTOR_SECTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div, section").unwrap());
static SELECTOR_HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title, h1, h2, h3").unwrap());
static SELECTOR_TEXT_BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span, div, li, p").unwrap());

// * Class fragments that mark a course-info area
const INFO_CLASS_KEYWORDS: &[&str] = &["info", "detail", "overview", "about", "course-info"];

// * Labels that usually sit next to the time commitment
const COMMITMENT_KEYWORDS: &[&str] = &[
    "commitment",
    "time to complete",
    "estimated time",
    "duration",
    "length",
];

const COMMITMENT_SIBLINGS: usize = 3;

static NUMERIC_TIME_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+\s*(hour|hours|week|weeks|month|months|day|days|hr|hrs|wk|wks)\b")
        .expect("Invalid numeric time token regex")
});

static COMMITMENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    COMMITMENT_KEYWORDS
        .iter()
        .map(|k| Regex::new(&format!("(?i){}", regex::escape(k))).expect("Invalid commitment regex"))
        .collect()
});

// * High-value phrasings scanned against the whole page text, in order
static PAGE_TEXT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+(?:\.\d+)?)\s*(?:to\s*)?(\d+(?:\.\d+)?)?\s*(hours?|hrs?)\s*(?:per\s*week|weekly)",
        r"(?i)complete\s*in\s*(\d+(?:\.\d+)?)\s*(weeks?|months?|days?)",
        r"(?i)(\d+(?:\.\d+)?)\s*(weeks?|months?)\s*(?:to\s*complete|duration|long)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid page text regex"))
    .collect()
});

fn parse_all(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
}

/// Rejects runaway candidates (whole paragraphs that merely mention time).
pub fn is_plausible(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().count() <= MAX_DURATION_LEN
}

/// Runs the cascade and returns the first plausible duration.
pub fn extract_duration(document: &Html) -> Option<String> {
    for (name, strategy) in DURATION_STRATEGIES {
        match strategy(document) {
            Some(found) if is_plausible(&found) => {
                debug!(strategy = *name, duration = %found, "Duration resolved");
                return Some(found);
            }
            Some(rejected) => trace!(strategy = *name, "Rejected duration candidate: {}", rejected),
            None => trace!(strategy = *name, "No duration candidate"),
        }
    }
    None
}

/// Strategy 1: elements whose naming says duration/time, keyword-sniffed.
pub fn from_duration_selectors(document: &Html) -> Option<String> {
    SELECTORS_DURATION.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|el| sniff_duration_phrase(&element_text(&el)))
            .find(|d| is_plausible(d))
    })
}

/// Strategy 2: `timeRequired` or `duration` in JSON-LD blocks.
pub fn from_json_ld(document: &Html) -> Option<String> {
    for script in document.select(&SELECTOR_JSON_LD) {
        let raw: String = script.text().collect();
        let data: Value = match serde_json::from_str(raw.trim()) {
            Ok(v) => v,
            Err(e) => {
                debug!("Skipping malformed JSON-LD block: {}", e);
                continue;
            }
        };
        if let Some(found) = json_ld_duration(&data) {
            return Some(found);
        }
    }
    None
}

fn json_ld_duration(data: &Value) -> Option<String> {
    match data {
        Value::Object(map) => {
            let direct = map
                .get("timeRequired")
                .or_else(|| map.get("duration"))
                .and_then(json_scalar_text);
            direct.or_else(|| match map.get("@graph") {
                Some(Value::Array(items)) => items.iter().find_map(json_ld_duration),
                _ => None,
            })
        }
        Value::Array(items) => items.iter().find_map(json_ld_duration),
        _ => None,
    }
}

fn json_scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => clean(s),
        Value::Number(n) => n.to_string(),
        Value::Null => return None,
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Strategy 3: numeric time tokens inside info/detail/overview/about sections.
pub fn from_info_sections(document: &Html) -> Option<String> {
    document
        .select(&SELECTOR_SECTIONS)
        .filter(has_info_class)
        .find_map(|section| {
            descendant_elements(section, &["span", "div", "li", "p"])
                .map(|el| element_text(&el))
                .filter(|txt| NUMERIC_TIME_TOKEN.is_match(txt))
                .filter_map(|txt| sniff_duration_phrase(&txt))
                .find(|d| is_plausible(d))
        })
}

fn has_info_class(el: &ElementRef) -> bool {
    el.value().classes().any(|class| {
        let lower = class.to_lowercase();
        INFO_CLASS_KEYWORDS.iter().any(|k| lower.contains(k))
    })
}

/// Strategy 4: sidebar/meta/stats blocks, precise pattern only.
pub fn from_metadata_blocks(document: &Html) -> Option<String> {
    SELECTORS_METADATA.iter().find_map(|selector| {
        document
            .select(selector)
            .find_map(|el| extract_duration_pattern(&element_text(&el)))
    })
}

/// Strategy 5: text nodes carrying a commitment label, checked with their next siblings.
pub fn from_commitment_labels(document: &Html) -> Option<String> {
    for pattern in COMMITMENT_PATTERNS.iter() {
        for node in document.root_element().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            if !pattern.is_match(text) {
                continue;
            }
            let Some(parent) = node.parent().and_then(ElementRef::wrap) else {
                continue;
            };
            if hides_text(&parent) {
                continue;
            }
            let neighbours = parent
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .take(COMMITMENT_SIBLINGS);
            let found = std::iter::once(parent)
                .chain(neighbours)
                .find_map(|el| extract_duration_pattern(&element_text(&el)));
            if found.is_some() {
                return found;
            }
        }
    }
    None
}

/// Strategy 6: page title and top-level headings.
pub fn from_headings(document: &Html) -> Option<String> {
    document
        .select(&SELECTOR_HEADINGS)
        .find_map(|el| extract_duration_pattern(&element_text(&el)))
}

/// Strategy 7: "N hours per week", "complete in N weeks", "N weeks to complete".
pub fn from_page_text(document: &Html) -> Option<String> {
    let page_text = clean(&visible_text(document.root_element()).collect::<Vec<_>>().join(" "));
    PAGE_TEXT_PATTERNS
        .iter()
        .find_map(|re| re.find(&page_text))
        .map(|m| m.as_str().trim().to_string())
}

/// Strategy 8: any short text block with a precise duration match.
pub fn from_generic_elements(document: &Html) -> Option<String> {
    document.select(&SELECTOR_TEXT_BLOCKS).find_map(|el| {
        let txt = element_text(&el);
        let len = txt.chars().count();
        if len > 5 && len < 100 {
            extract_duration_pattern(&txt)
        } else {
            None
        }
    })
}

/// Descendant elements (excluding `root`) with one of the given tag names, in document order.
pub(crate) fn descendant_elements<'a>(
    root: ElementRef<'a>,
    names: &'a [&'a str],
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| names.contains(&el.value().name()))
}
