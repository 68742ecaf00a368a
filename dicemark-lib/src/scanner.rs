//! Find dice expressions, attack bonuses and saving throw DCs in narrative text.
//!
//! The text is first split into markup and text content, only text content is
//! scanned. Links are then reduced to their label, and the remaining text goes
//! through the detection passes in order. Each pass only sees the text left
//! unclaimed by the previous ones.

pub(crate) mod segment;
pub mod token;

use crate::parser;
use once_cell::sync::Lazy;
use regex::Regex;
use segment::Segment;
use std::ops::Range;
use token::Kind;
use token::Token;
use tracing::trace;

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]\(([^()]*)\)").expect("link pattern"));
static ATTACK_LABELLED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\battack: ?([+-]\d+)\b").expect("attack pattern"));
static ATTACK_TO_HIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|\W)([+-]\d+) to hit\b").expect("to hit pattern"));
static DICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b\d*d\d+(?:\s*[+-]\s*\d+)?\b").expect("dice pattern")
});
static SAVING_THROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bDC (\d+) ([A-Za-z]+) (?i:saving throw)").expect("saving throw pattern")
});

/// Token found by a pass, span relative to the scanned slice
struct Found {
    span: Range<usize>,
    notation: String,
    kind: Kind,
}

type Pass = fn(&str) -> Vec<Found>;

const PASSES: [Pass; 4] = [attack_labelled, attack_to_hit, plain_dice, saving_throw];

fn attack(regex: &Regex, slice: &str) -> Vec<Found> {
    regex
        .captures_iter(slice)
        .filter_map(|captures| {
            let bonus = captures.get(1)?;
            let value = bonus.as_str().parse::<i64>().ok()?;
            Some(Found {
                span: bonus.range(),
                notation: format!("1d20{value:+}"),
                kind: Kind::Attack,
            })
        })
        .collect()
}

fn attack_labelled(slice: &str) -> Vec<Found> {
    attack(&ATTACK_LABELLED, slice)
}

fn attack_to_hit(slice: &str) -> Vec<Found> {
    attack(&ATTACK_TO_HIT, slice)
}

fn plain_dice(slice: &str) -> Vec<Found> {
    DICE.find_iter(slice)
        .filter_map(|found| {
            let notation = parser::canonicalize(found.as_str());
            parser::parse(&notation).ok()?;
            Some(Found {
                span: found.range(),
                notation,
                kind: Kind::Dice,
            })
        })
        .collect()
}

fn saving_throw(slice: &str) -> Vec<Found> {
    SAVING_THROW
        .captures_iter(slice)
        .filter_map(|captures| {
            let dc = captures.get(1)?;
            let ability = captures.get(2)?;
            Some(Found {
                span: dc.range(),
                notation: "1d20".to_owned(),
                kind: Kind::Save {
                    dc: dc.as_str().parse().ok()?,
                    ability: ability.as_str().to_owned(),
                },
            })
        })
        .collect()
}

/// Piece of the scanned text, in order
#[derive(Debug)]
enum Piece {
    Markup(Range<usize>),
    Text(Range<usize>),
    /// Link reduced to its label
    Keyword {
        label: Range<usize>,
    },
    Token(Token),
}

fn links(text: &str, span: Range<usize>) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut cursor = span.start;
    for captures in LINK.captures_iter(&text[span.clone()]) {
        let (Some(link), Some(label)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let start = span.start + link.start();
        if cursor < start {
            pieces.push(Piece::Text(cursor..start));
        }
        pieces.push(Piece::Keyword {
            label: span.start + label.start()..span.start + label.end(),
        });
        cursor = span.start + link.end();
    }
    if cursor < span.end {
        pieces.push(Piece::Text(cursor..span.end));
    }
    pieces
}

fn apply(text: &str, span: Range<usize>, pass: Pass) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut cursor = span.start;
    for found in pass(&text[span.clone()]) {
        let start = span.start + found.span.start;
        let end = span.start + found.span.end;
        if cursor < start {
            pieces.push(Piece::Text(cursor..start));
        }
        pieces.push(Piece::Token(Token {
            matched: text[start..end].to_owned(),
            notation: found.notation,
            kind: found.kind,
            span: start..end,
        }));
        cursor = end;
    }
    if cursor < span.end {
        pieces.push(Piece::Text(cursor..span.end));
    }
    pieces
}

fn pieces(text: &str) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = segment::split(text)
        .into_iter()
        .flat_map(|segment| match segment {
            Segment::Markup(span) => vec![Piece::Markup(span)],
            Segment::Text(span) => links(text, span),
        })
        .collect();
    for pass in PASSES {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| match piece {
                Piece::Text(span) => apply(text, span, pass),
                piece => vec![piece],
            })
            .collect();
    }
    pieces
}

/// Find every token in the text, left to right
pub fn scan(text: &str) -> Vec<Token> {
    let tokens: Vec<Token> = pieces(text)
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Token(token) => Some(token),
            _ => None,
        })
        .collect();
    trace!(tokens = tokens.len(), "scanned");
    tokens
}

/// Wrap every token of the text in a marker span carrying its kind and
/// notation, and every link in a keyword span. Anything else is copied as is.
pub fn annotate(text: &str) -> String {
    let mut annotated = String::with_capacity(text.len());
    for piece in pieces(text) {
        match piece {
            Piece::Markup(span) | Piece::Text(span) => annotated.push_str(&text[span]),
            Piece::Keyword { label } => annotated.push_str(&token::keyword_marker(&text[label])),
            Piece::Token(token) => annotated.push_str(&token.marker()),
        }
    }
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notations(text: &str) -> Vec<(String, Kind)> {
        scan(text)
            .into_iter()
            .map(|token| (token.notation, token.kind))
            .collect()
    }

    #[test]
    fn attack_and_damage() {
        let text = "Attack: +7 to hit, deals 2d6+4 slashing";
        let tokens = scan(text);
        assert_eq!(2, tokens.len());
        assert_eq!("+7", tokens[0].matched);
        assert_eq!("1d20+7", tokens[0].notation);
        assert_eq!(Kind::Attack, tokens[0].kind);
        assert_eq!(8..10, tokens[0].span);
        assert_eq!("2d6+4", tokens[1].notation);
        assert_eq!(Kind::Dice, tokens[1].kind);
        assert_eq!(&text[tokens[1].span.clone()], "2d6+4");

        assert_eq!(
            concat!(
                r#"Attack: <span class="dicemark-roll" data-dicemark="attack-bonus" data-notation="1d20+7">+7</span>"#,
                r#" to hit, deals <span class="dicemark-roll" data-dicemark="plain-dice" data-notation="2d6+4">2d6+4</span> slashing"#,
            ),
            annotate(text)
        );
    }

    #[test]
    fn to_hit_bonus() {
        assert_eq!(
            vec![("1d20-1".to_owned(), Kind::Attack)],
            notations("Melee Weapon -1 to hit, reach 5 ft.")
        );
    }

    #[test]
    fn dice_before_to_hit_stays_whole() {
        let tokens = scan("roll 1d20+5 to hit");
        assert_eq!(1, tokens.len());
        assert_eq!("1d20+5", tokens[0].matched);
        assert_eq!(Kind::Dice, tokens[0].kind);
        assert_eq!(
            vec![("1d20+5".to_owned(), Kind::Attack)],
            notations("+5 to hit")
        );
    }

    #[test]
    fn dice_with_spaced_modifier() {
        let tokens = scan("Hit: 7 (1D8 + 3) piercing damage.");
        assert_eq!(1, tokens.len());
        assert_eq!("1D8 + 3", tokens[0].matched);
        assert_eq!("1d8+3", tokens[0].notation);
    }

    #[test]
    fn saving_throw_dc() {
        let text = "must make a DC 13 Dexterity saving throw, taking 3d6 fire damage";
        let tokens = scan(text);
        assert_eq!(2, tokens.len());
        assert_eq!("13", tokens[0].matched);
        assert_eq!("1d20", tokens[0].notation);
        assert_eq!(
            Kind::Save {
                dc: 13,
                ability: "Dexterity".to_owned()
            },
            tokens[0].kind
        );
        assert_eq!("3d6", tokens[1].notation);
        assert!(annotate(text).contains(
            r#"<span class="dicemark-roll" data-dicemark="saving-throw-dc" data-notation="1d20" data-dc="13" data-ability="dexterity">13</span>"#
        ));
    }

    #[test]
    fn tag_attributes_are_not_scanned() {
        let text = r#"<span data-dice="1d20+1">Roll</span> it"#;
        assert!(scan(text).is_empty());
        assert_eq!(text, annotate(text));
    }

    #[test]
    fn text_between_tags_is_scanned() {
        let text = "<p><b>Bite.</b> 2d10 piercing</p>";
        let tokens = scan(text);
        assert_eq!(1, tokens.len());
        assert_eq!("2d10", &text[tokens[0].span.clone()]);
        assert!(annotate(text).starts_with("<p><b>Bite.</b> <span"));
        assert!(annotate(text).ends_with("</span> piercing</p>"));
    }

    #[test]
    fn links_become_keywords() {
        let text = "casts [fireball](spell:8d6) for 8d6";
        let tokens = scan(text);
        assert_eq!(1, tokens.len());
        assert_eq!(text.rfind("8d6").unwrap(), tokens[0].span.start);
        let annotated = annotate(text);
        assert!(annotated.starts_with(
            r#"casts <span class="dicemark-keyword" data-dicemark="keyword">fireball</span> for "#
        ));
        assert!(!annotated.contains("spell:"));
    }

    #[test]
    fn annotate_is_idempotent() {
        let text = "[Shortsword](item) Attack: +4 to hit, 1d6 + 2, DC 10 Strength saving throw";
        let once = annotate(text);
        assert_eq!(once, annotate(&once));
        assert!(scan(&once).is_empty());
    }

    #[test]
    fn nothing_to_find() {
        let text = "The goblin deals damage & hides < behind > a rock.";
        assert!(scan(text).is_empty());
        assert_eq!(text, annotate(text));
        assert_eq!("", annotate(""));
    }

    #[test]
    fn malformed_dice_are_skipped() {
        assert!(scan("a 1d0 or 5001d6 or 2d6kh1 or xd6").is_empty());
    }

    #[test]
    fn spans_are_byte_offsets() {
        let text = "Épée: 1d8 tranchant";
        let tokens = scan(text);
        assert_eq!(1, tokens.len());
        assert_eq!("1d8", &text[tokens[0].span.clone()]);
    }

    #[test]
    fn tokens_activate() {
        let token = &scan("Attack: +5")[0];
        let solver = token.solver().unwrap();
        assert_eq!(5, solver.descriptor().get_modifier());
        assert!(solver.descriptor().is_single_d20());
    }
}
