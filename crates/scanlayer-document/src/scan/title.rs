// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Title inference — pick a document title from recognized text by looking for
// the first named entity (organization, person or place).

use tracing::debug;

/// Kind of a tagged name span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Organization,
    Person,
    Place,
    /// A capitalized name that fits none of the above.
    Other,
}

impl EntityKind {
    /// Whether spans of this kind can become a title.
    pub fn is_title_candidate(self) -> bool {
        !matches!(self, EntityKind::Other)
    }
}

/// A span of the input text tagged with an entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSpan {
    pub kind: EntityKind,
    /// The span exactly as it appears in the input.
    pub text: String,
}

/// Named-entity tagging capability.
pub trait EntityTagger {
    /// Tagged spans in the order they appear in `text`.
    fn tag(&self, text: &str) -> Vec<TaggedSpan>;
}

/// First organization, person or place span in `text`, otherwise `fallback`.
pub fn infer_title(text: &str, tagger: &dyn EntityTagger, fallback: &str) -> String {
    match tagger
        .tag(text)
        .into_iter()
        .find(|span| span.kind.is_title_candidate())
    {
        Some(span) => {
            debug!(title = %span.text, kind = ?span.kind, "Title inferred from text");
            span.text
        }
        None => {
            debug!(fallback, "No named entity found; using fallback title");
            fallback.to_owned()
        }
    }
}

const ORG_SUFFIXES: &[&str] = &[
    "inc", "ltd", "limited", "gmbh", "ag", "corp", "corporation", "llc", "plc", "co",
    "company", "university", "bank",
];
const HONORIFICS: &[&str] = &["mr", "mrs", "ms", "miss", "dr", "prof", "sir"];
const PLACE_PREPOSITIONS: &[&str] = &["in", "at", "from", "near"];
const FUNCTION_WORDS: &[&str] = &["the", "a", "an", "this", "that", "our", "your", "dear"];

/// Rule-based tagger over runs of capitalized words.
///
/// Runs are broken by lowercase words, digits and trailing punctuation. A run
/// is an organization when it ends in a corporate suffix, a place when the
/// word before it is `in`, `at`, `from` or `near`, and a person when it starts
/// with an honorific or has at least two words. A lone capitalized word that
/// opens a sentence is not tagged.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl EntityTagger for HeuristicTagger {
    fn tag(&self, text: &str) -> Vec<TaggedSpan> {
        let tokens = tokenize(text);
        let mut spans = Vec::new();
        let mut sentence_start = true;
        let mut i = 0;

        while i < tokens.len() {
            if !tokens[i].is_capitalized() {
                sentence_start = tokens[i].closes_sentence;
                i += 1;
                continue;
            }

            let run_start = i;
            let mut end = i;
            while end < tokens.len() && tokens[end].is_capitalized() {
                end += 1;
                if tokens[end - 1].breaks_run {
                    break;
                }
            }
            let opens_sentence = sentence_start;
            sentence_start = tokens[end - 1].closes_sentence;
            i = end;

            let mut first = run_start;
            if opens_sentence && end - first > 1 && tokens[first].is_one_of(FUNCTION_WORDS) {
                first += 1;
            }
            let words = &tokens[first..end];
            let preceding = run_start.checked_sub(1).map(|idx| &tokens[idx]);

            let at_sentence_start = opens_sentence && first == run_start;
            if let Some((kind, last)) = classify(words, preceding, at_sentence_start) {
                spans.push(TaggedSpan {
                    kind,
                    text: text[words[0].start..words[last].end].to_owned(),
                });
            }
        }
        spans
    }
}

/// Kind of a run plus the index of its last word.
fn classify(
    words: &[Token<'_>],
    preceding: Option<&Token<'_>>,
    opens_sentence: bool,
) -> Option<(EntityKind, usize)> {
    if let Some(suffix) = words
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, word)| word.is_one_of(ORG_SUFFIXES))
        .map(|(idx, _)| idx)
    {
        return Some((EntityKind::Organization, suffix));
    }

    let last = words.len() - 1;
    if preceding.is_some_and(|word| word.is_one_of(PLACE_PREPOSITIONS)) {
        return Some((EntityKind::Place, last));
    }
    if words.len() >= 2 {
        return Some((EntityKind::Person, last));
    }
    if opens_sentence || words[0].is_one_of(HONORIFICS) {
        return None;
    }
    Some((EntityKind::Other, last))
}

#[derive(Debug)]
struct Token<'a> {
    /// The word with surrounding punctuation removed.
    core: &'a str,
    start: usize,
    end: usize,
    breaks_run: bool,
    closes_sentence: bool,
}

impl Token<'_> {
    fn is_capitalized(&self) -> bool {
        self.core.chars().next().is_some_and(char::is_uppercase)
    }

    fn is_one_of(&self, list: &[&str]) -> bool {
        let lower = self.core.to_lowercase();
        list.contains(&lower.as_str())
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = None;
    let boundary = std::iter::once((text.len(), ' '));
    for (idx, ch) in text.char_indices().chain(boundary) {
        if ch.is_whitespace() {
            if let Some(start) = word_start.take() {
                if let Some(token) = make_token(text, start, idx) {
                    tokens.push(token);
                }
            }
        } else if word_start.is_none() {
            word_start = Some(idx);
        }
    }
    tokens
}

fn make_token(text: &str, start: usize, end: usize) -> Option<Token<'_>> {
    let raw = &text[start..end];
    let leading = raw.len() - raw.trim_start_matches(is_wrapping_punct).len();
    let core = raw[leading..].trim_end_matches(|c: char| is_wrapping_punct(c) || is_inner_punct(c));
    if core.is_empty() {
        return None;
    }
    let core_start = start + leading;
    let core_end = core_start + core.len();
    let trailing = &text[core_end..end];

    let abbreviation = HONORIFICS.contains(&core.to_lowercase().as_str());
    let ends_sentence = trailing.contains(['.', '!', '?']);
    Some(Token {
        core,
        start: core_start,
        end: core_end,
        breaks_run: !trailing.is_empty() && !abbreviation,
        closes_sentence: ends_sentence && !abbreviation,
    })
}

fn is_wrapping_punct(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '"' | '\'' | '“' | '”' | '‘' | '’')
}

fn is_inner_punct(c: char) -> bool {
    matches!(c, ',' | '.' | ';' | ':' | '!' | '?')
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "OCR Generated PDF";

    fn title(text: &str) -> String {
        infer_title(text, &HeuristicTagger, FALLBACK)
    }

    #[test]
    fn organization_with_suffix() {
        assert_eq!(title("Invoice from ACME Widgets Ltd for services"), "ACME Widgets Ltd");
    }

    #[test]
    fn organization_stops_at_suffix() {
        assert_eq!(title("INVOICE ACME LTD Total 42.00"), "INVOICE ACME LTD");
    }

    #[test]
    fn person_with_honorific() {
        assert_eq!(
            title("Meeting notes. Dr. Jane Smith presented the results."),
            "Dr. Jane Smith"
        );
    }

    #[test]
    fn place_after_preposition() {
        assert_eq!(title("Shipped to a warehouse in Rotterdam yesterday"), "Rotterdam");
    }

    #[test]
    fn lone_sentence_opener_is_not_a_title() {
        assert_eq!(title("Receipt total due 42.00"), FALLBACK);
    }

    #[test]
    fn empty_text_falls_back() {
        assert_eq!(title(""), FALLBACK);
        assert_eq!(title("   "), FALLBACK);
    }

    #[test]
    fn other_spans_are_skipped() {
        let spans = HeuristicTagger.tag("paid via Paypal by Anna Berg");
        assert_eq!(spans[0].kind, EntityKind::Other);
        assert_eq!(spans[0].text, "Paypal");
        assert_eq!(spans[1].kind, EntityKind::Person);
        assert_eq!(title("paid via Paypal by Anna Berg"), "Anna Berg");
    }

    #[test]
    fn punctuation_breaks_runs() {
        let spans = HeuristicTagger.tag("contact Anna Berg, Oslo Bank");
        let texts: Vec<_> = spans.iter().map(|span| span.text.as_str()).collect();
        assert_eq!(texts, ["Anna Berg", "Oslo Bank"]);
        assert_eq!(spans[1].kind, EntityKind::Organization);
    }

    #[test]
    fn leading_function_word_is_dropped() {
        let spans = HeuristicTagger.tag("The Royal Bank statement");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "Royal Bank");
        assert_eq!(spans[0].kind, EntityKind::Organization);
    }

    struct FixedTagger(Vec<TaggedSpan>);

    impl EntityTagger for FixedTagger {
        fn tag(&self, _text: &str) -> Vec<TaggedSpan> {
            self.0.clone()
        }
    }

    #[test]
    fn custom_tagger_is_used_verbatim() {
        let tagger = FixedTagger(vec![
            TaggedSpan {
                kind: EntityKind::Other,
                text: "ignored".into(),
            },
            TaggedSpan {
                kind: EntityKind::Place,
                text: "São Paulo".into(),
            },
        ]);
        assert_eq!(infer_title("whatever", &tagger, FALLBACK), "São Paulo");
    }
}
