use super::segment::MARKER_ATTRIBUTE;
use crate::error::Result;
use crate::solver::Solver;
use std::ops::Range;

/// What a token found in narrative text stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A dice expression written out, `2d6 + 4`
    Dice,
    /// An attack bonus rolled as a d20 plus the bonus
    Attack,
    /// A saving throw difficulty, checked with a flat d20
    Save { dc: u64, ability: String },
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Dice => "plain-dice",
            Kind::Attack => "attack-bonus",
            Kind::Save { .. } => "saving-throw-dc",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rollable unit found in narrative text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Substring as written in the text
    pub matched: String,
    /// Canonical notation ready to be parsed
    pub notation: String,
    pub kind: Kind,
    /// Byte range of `matched` in the scanned text
    pub span: Range<usize>,
}

impl Token {
    /// Solver for the token notation
    pub fn solver(&self) -> Result<Solver> {
        Solver::new(&self.notation)
    }

    pub(crate) fn marker(&self) -> String {
        let extra = match &self.kind {
            Kind::Save { dc, ability } => {
                format!(r#" data-dc="{dc}" data-ability="{}""#, ability.to_lowercase())
            }
            Kind::Dice | Kind::Attack => String::new(),
        };
        format!(
            r#"<span class="dicemark-roll" {MARKER_ATTRIBUTE}="{}" data-notation="{}"{extra}>{}</span>"#,
            self.kind, self.notation, self.matched
        )
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` *{}* `{}`", self.matched, self.kind, self.notation)
    }
}

pub(crate) fn keyword_marker(label: &str) -> String {
    format!(r#"<span class="dicemark-keyword" {MARKER_ATTRIBUTE}="keyword">{label}</span>"#)
}
