// * Concept / skill extraction
// * Primary: list items under "What you'll learn" / "Skills you'll gain" headings.
// * Fallback: short skill chips matched against a domain vocabulary.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use super::duration::descendant_elements;
use super::text::element_text_raw;
use crate::config::constants::MAX_CONCEPTS;

static SELECTOR_SECTION_HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2, h3").unwrap());
static SELECTOR_CHIPS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span, div").unwrap());

// * Straight and curly apostrophes both occur in the catalog copy
static LEARN_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(what you('|’)ll learn|skills you('|’)ll gain|skills you will gain)")
        .expect("Invalid learn heading regex")
});

const LISTS_PER_ANCHOR: usize = 3;

const LIST_TAGS: &[&str] = &["ul", "ol"];
const ITEM_TAGS: &[&str] = &["li"];

const CHIP_MIN_TOKENS: usize = 2;
const CHIP_MAX_TOKENS: usize = 6;

const SKILL_VOCABULARY: &[&str] = &[
    "python", "java", "c++", "c ", "html", "css", "sql",
    "data", "oop", "api", "algorithms", "arrays", "pandas",
    "django", "spring", "react", "dom", "selectors", "queries",
    "object-oriented", "inheritance", "polymorphism", "encapsulation",
    "debug", "testing", "performance", "asynchronous", "promises",
];

/// Order-preserving set of concept strings.
#[derive(Debug, Default)]
struct ConceptSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl ConceptSet {
    fn push(&mut self, item: String) {
        if !item.is_empty() && self.seen.insert(item.clone()) {
            self.items.push(item);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Concepts for a detail page, deduplicated and capped.
pub fn extract_concepts(document: &Html) -> Vec<String> {
    let mut concepts = from_learning_sections(document);
    if concepts.is_empty() {
        concepts = from_skill_chips(document);
    }
    concepts.truncate(MAX_CONCEPTS);
    concepts
}

/// List items below learning-outcome headings.
pub fn from_learning_sections(document: &Html) -> Vec<String> {
    let mut lists: Vec<ElementRef> = Vec::new();

    for heading in document.select(&SELECTOR_SECTION_HEADINGS) {
        let heading_text = element_text_raw(&heading);
        if !LEARN_HEADING.is_match(&heading_text) {
            continue;
        }

        if let Some(parent) = heading.parent().and_then(ElementRef::wrap) {
            lists.extend(descendant_elements(parent, LIST_TAGS).take(LISTS_PER_ANCHOR));
        }

        if let Some(sibling) = heading.next_siblings().find_map(ElementRef::wrap) {
            lists.extend(descendant_elements(sibling, LIST_TAGS).take(LISTS_PER_ANCHOR));
        }
    }

    let mut concepts = ConceptSet::default();
    for list in lists {
        for item in descendant_elements(list, ITEM_TAGS) {
            concepts.push(element_text_raw(&item));
        }
    }
    concepts.into_vec()
}

/// Short chip-like elements that mention a known skill term.
pub fn from_skill_chips(document: &Html) -> Vec<String> {
    let mut concepts = ConceptSet::default();
    for chip in document.select(&SELECTOR_CHIPS) {
        let txt = element_text_raw(&chip);
        if is_skill_chip(&txt) {
            concepts.push(txt);
        }
    }
    concepts.into_vec()
}

fn is_skill_chip(text: &str) -> bool {
    let tokens = text.split_whitespace().count();
    if !(CHIP_MIN_TOKENS..=CHIP_MAX_TOKENS).contains(&tokens) {
        return false;
    }
    let lower = text.to_lowercase();
    SKILL_VOCABULARY.iter().any(|term| lower.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn test_learning_section_under_parent() {
        let html = doc(
            r#"<section><h2>What you'll learn</h2>
               <ul><li>Loops</li><li>Functions</li><li>Loops</li></ul></section>"#,
        );
        assert_eq!(extract_concepts(&html), vec!["Loops", "Functions"]);
    }

    #[test]
    fn test_learning_section_curly_apostrophe_and_sibling() {
        let html = doc(
            r#"<div><h3>Skills you’ll gain</h3><div class="chips"><ul><li>SQL  Joins</li></ul></div></div>"#,
        );
        assert_eq!(extract_concepts(&html), vec!["SQL Joins"]);
    }

    #[test]
    fn test_learning_section_list_limit() {
        let lists: String = (1..=5)
            .map(|i| format!("<ul><li>Topic {}</li></ul>", i))
            .collect();
        let html = doc(&format!("<div><h2>Skills you will gain</h2>{}</div>", lists));
        assert_eq!(
            from_learning_sections(&html),
            vec!["Topic 1", "Topic 2", "Topic 3"]
        );
    }

    #[test]
    fn test_concepts_capped_in_order() {
        let items: String = (1..=45).map(|i| format!("<li>Skill {}</li>", i)).collect();
        let html = doc(&format!("<section><h2>What you'll learn</h2><ul>{}</ul></section>", items));

        let concepts = extract_concepts(&html);
        assert_eq!(concepts.len(), 30);
        assert_eq!(concepts[0], "Skill 1");
        assert_eq!(concepts[29], "Skill 30");
    }

    #[test]
    fn test_chip_fallback() {
        let html = doc(
            r#"<span>Python Programming</span><span>Python</span>
               <span>Object-Oriented Design</span><span>Nice weather today friends</span>
               <span>Python Programming</span>"#,
        );
        assert_eq!(
            extract_concepts(&html),
            vec!["Python Programming", "Object-Oriented Design"]
        );
    }

    #[test]
    fn test_chip_fallback_not_used_when_sections_found() {
        let html = doc(
            r#"<section><h2>What you'll learn</h2><ul><li>Recursion</li></ul></section>
               <span>Data Structures</span>"#,
        );
        assert_eq!(extract_concepts(&html), vec!["Recursion"]);
    }

    #[test]
    fn test_is_skill_chip_token_bounds() {
        assert!(!is_skill_chip("sql"));
        assert!(is_skill_chip("SQL queries"));
        assert!(!is_skill_chip("one two three four five six python"));
    }
}
