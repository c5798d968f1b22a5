//! Markdown deck files: the document the slideshow reads its panels from.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;

use crate::animation::AnimationRole;
use crate::error::SlideshowError;

/// Trailing `{.class}` attribute block, e.g. `Hello {.fade-in}`.
static ANIMATION_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\{\.([A-Za-z][A-Za-z0-9-]*)\}\s*$").expect("valid attribute regex")
});

#[derive(Debug, Clone)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<SlideContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SlideContent {
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub text: String,
    pub animation: Option<AnimationRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading(u8),
    Paragraph,
    Bullet,
    Code,
}

pub fn load(path: &Path) -> anyhow::Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let deck = parse(&content).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(deck)
}

pub fn parse(content: &str) -> Result<Deck, SlideshowError> {
    let content = content.replace("\r\n", "\n");
    let (meta, body) = extract_front_matter(&content)?;
    let slides: Vec<SlideContent> = split(body)
        .iter()
        .map(|raw| parse_slide(raw))
        .filter(|slide| !slide.elements.is_empty())
        .collect();

    if slides.is_empty() {
        return Err(SlideshowError::EmptyDeck);
    }
    Ok(Deck { meta, slides })
}

fn extract_front_matter(content: &str) -> Result<(DeckMeta, &str), SlideshowError> {
    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok((DeckMeta::default(), content));
    };
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            let meta = if yaml.trim().is_empty() {
                DeckMeta::default()
            } else {
                serde_yaml::from_str(yaml)?
            };
            return Ok((meta, body));
        }
        offset += line.len();
    }
    // no closing fence: not front matter
    Ok((DeckMeta::default(), content))
}

/// Split a deck body into raw slide sources.
///
/// Slides break on:
/// 1. `---` with blank lines on both sides
/// 2. Three or more consecutive blank lines
/// 3. A `# ` heading when the current slide already has content
///
/// Nothing inside a fenced code block breaks a slide.
pub fn split(body: &str) -> Vec<String> {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code = false;
    let mut blank_run = 0;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_code = !in_code;
            blank_run = 0;
        } else if !in_code {
            if trimmed.is_empty() {
                blank_run += 1;
                if blank_run == 3 {
                    flush(&mut current, &mut slides);
                }
                if blank_run >= 3 {
                    continue;
                }
            } else {
                blank_run = 0;
            }

            if is_dash_separator(trimmed) {
                let prev_blank = current.last().is_none_or(|l| l.trim().is_empty());
                let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
                if prev_blank && next_blank {
                    flush(&mut current, &mut slides);
                    continue;
                }
            }

            if trimmed.starts_with("# ") && current.iter().any(|l| !l.trim().is_empty()) {
                flush(&mut current, &mut slides);
            }
        }

        current.push(line);
    }
    flush(&mut current, &mut slides);
    slides
}

fn flush(current: &mut Vec<&str>, slides: &mut Vec<String>) {
    let text = current.join("\n").trim().to_string();
    if !text.is_empty() {
        slides.push(text);
    }
    current.clear();
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

fn parse_slide(raw: &str) -> SlideContent {
    let mut elements = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut code: Option<Vec<&str>> = None;

    for line in raw.lines() {
        let trimmed = line.trim();

        if let Some(block) = code.as_mut() {
            if trimmed.starts_with("```") {
                elements.push(Element {
                    kind: ElementKind::Code,
                    text: block.join("\n"),
                    animation: None,
                });
                code = None;
            } else {
                block.push(line);
            }
            continue;
        }

        if trimmed.starts_with("```") {
            flush_paragraph(&mut paragraph, &mut elements);
            code = Some(Vec::new());
        } else if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut elements);
        } else if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut elements);
            elements.push(element(ElementKind::Heading(level), text));
        } else if let Some(text) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            flush_paragraph(&mut paragraph, &mut elements);
            elements.push(element(ElementKind::Bullet, text));
        } else {
            paragraph.push(trimmed);
        }
    }

    flush_paragraph(&mut paragraph, &mut elements);
    if let Some(block) = code {
        // unterminated fence runs to the end of the slide
        elements.push(Element {
            kind: ElementKind::Code,
            text: block.join("\n"),
            animation: None,
        });
    }
    SlideContent { elements }
}

fn flush_paragraph(paragraph: &mut Vec<&str>, elements: &mut Vec<Element>) {
    if !paragraph.is_empty() {
        elements.push(element(ElementKind::Paragraph, &paragraph.join(" ")));
        paragraph.clear();
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    line[level..]
        .strip_prefix(' ')
        .map(|text| (level as u8, text.trim()))
}

fn element(kind: ElementKind, text: &str) -> Element {
    let (text, animation) = split_animation(text);
    Element {
        kind,
        text,
        animation,
    }
}

/// Strip a trailing animation attribute from `text`. Unknown classes stay
/// part of the text.
fn split_animation(text: &str) -> (String, Option<AnimationRole>) {
    if let Some(caps) = ANIMATION_ATTR.captures(text) {
        if let Some(role) = AnimationRole::from_class(&caps[1]) {
            let start = caps.get(0).map_or(text.len(), |m| m.start());
            return (text[..start].to_string(), Some(role));
        }
    }
    (text.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(content: &str) -> Deck {
        match parse(content) {
            Ok(deck) => deck,
            Err(e) => panic!("parse failed: {e}"),
        }
    }

    #[test]
    fn test_blank_line_split() {
        let slides = split("Slide one\n\n\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_two_blank_lines_do_not_split() {
        let slides = split("Slide one\n\n\nStill one");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_dash_separator() {
        let slides = split("Slide one\n\n---\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_dash_without_blank_lines_is_content() {
        let slides = split("Slide one\n---\nStill one");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_heading_inference() {
        let slides = split("# First\n\nContent\n\n# Second\n\nMore content");
        assert_eq!(slides.len(), 2);
        assert!(slides[0].starts_with("# First"));
        assert!(slides[1].starts_with("# Second"));
    }

    #[test]
    fn test_h2_no_split() {
        assert_eq!(split("# Title\n\n## Subtitle\n\nContent").len(), 1);
    }

    #[test]
    fn test_combined_separators() {
        let slides = split("Slide one\n\n\n\n---\n\n\n\nSlide two");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn test_heading_in_code_block_no_split() {
        let slides = split("# Title\n\n```python\n# a comment\n\n\n\nprint('hi')\n```");
        assert_eq!(slides.len(), 1, "code block must not split");
    }

    #[test]
    fn test_elements() {
        let deck = deck("# Welcome\n\nFirst line\nsecond line\n\n- one\n* two\n\n```\nlet x = 1;\n```");
        let kinds: Vec<ElementKind> = deck.slides[0].elements.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Heading(1),
                ElementKind::Paragraph,
                ElementKind::Bullet,
                ElementKind::Bullet,
                ElementKind::Code,
            ]
        );
        assert_eq!(deck.slides[0].elements[1].text, "First line second line");
        assert_eq!(deck.slides[0].elements[4].text, "let x = 1;");
    }

    #[test]
    fn test_animation_tags() {
        let deck = deck("# Hello {.fade-in}\n\n- up {.slide-up}\n- plain\n- other {.glow}");
        let elements = &deck.slides[0].elements;
        assert_eq!(elements[0].text, "Hello");
        assert_eq!(elements[0].animation, Some(AnimationRole::FadeIn));
        assert_eq!(elements[1].text, "up");
        assert_eq!(elements[1].animation, Some(AnimationRole::SlideUp));
        assert_eq!(elements[2].animation, None);
        assert_eq!(elements[3].text, "other {.glow}");
        assert_eq!(elements[3].animation, None);
    }

    #[test]
    fn test_front_matter() {
        let deck = deck("---\ntitle: Launch\ntheme: dark\n---\n# One\n\n---\n\n# Two {.slide-left}\n");
        assert_eq!(deck.meta.title.as_deref(), Some("Launch"));
        assert_eq!(deck.meta.theme.as_deref(), Some("dark"));
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(
            deck.slides[1].elements[0].animation,
            Some(AnimationRole::SlideLeft)
        );
    }

    #[test]
    fn test_invalid_front_matter() {
        let result = parse("---\ntitle: [unclosed\n---\n# One\n");
        assert!(matches!(result, Err(SlideshowError::InvalidFrontMatter(_))));
    }

    #[test]
    fn test_sample_deck() {
        let deck = deck(include_str!("../../../sample-decks/intro.md"));
        assert_eq!(deck.meta.title.as_deref(), Some("Slideshow"));
        assert_eq!(deck.slides.len(), 5);
        let code = deck.slides[3]
            .elements
            .iter()
            .find(|e| e.kind == ElementKind::Code);
        assert!(
            code.is_some_and(|e| e.text.starts_with("# Heading {.fade-in}")),
            "code block should be kept verbatim"
        );
    }

    #[test]
    fn test_empty_deck() {
        assert!(matches!(parse("\n\n  \n"), Err(SlideshowError::EmptyDeck)));
        assert!(matches!(
            parse("---\ntitle: Nothing\n---\n"),
            Err(SlideshowError::EmptyDeck)
        ));
    }
}
