use crate::dice::limits;
use crate::dice::Descriptor;
use crate::dice::Keep;
use crate::error::Error;
use crate::error::Result;
use pest::iterators::Pair;
use pest::Parser as _;
use pest_derive::Parser;

/// Pest parser
#[derive(Parser)]
#[grammar = "notation.pest"]
pub struct Parser;

impl Parser {
    fn extract_number(pair: Pair<Rule>) -> Result<u64> {
        let number = match pair.as_rule() {
            Rule::number => pair,
            _ => pair
                .into_inner()
                .find(|inner| inner.as_rule() == Rule::number)
                .ok_or_else(|| Error::Notation("missing number".to_owned()))?,
        };
        number
            .as_str()
            .parse::<u64>()
            .map_err(|e| Error::Notation(format!("`{}` {}", number.as_str(), e)))
    }

    fn extract_signed(pair: Pair<Rule>) -> Result<i64> {
        let mut negative = false;
        let mut magnitude = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::sign => negative = inner.as_str() == "-",
                Rule::number => magnitude = Some(inner.as_str()),
                _ => unreachable!("{:#?}", inner),
            }
        }
        let magnitude = magnitude.ok_or_else(|| Error::Notation("missing number".to_owned()))?;
        let value = if negative {
            format!("-{magnitude}").parse::<i64>()
        } else {
            magnitude.parse::<i64>()
        };
        value.map_err(|e| Error::Notation(format!("`{}` {}", magnitude, e)))
    }

    fn extract_dice(dice: Pair<Rule>, canonical: String) -> Result<Descriptor> {
        let mut count = 1;
        let mut sides = 0;
        let mut keep = None;
        let mut modifier = 0;
        for inner in dice.into_inner() {
            match inner.as_rule() {
                Rule::count => count = Self::extract_number(inner)?,
                Rule::sides => sides = Self::extract_number(inner)?,
                Rule::keep_hi => keep = Some(Keep::High(Self::extract_number(inner)?)),
                Rule::keep_lo => keep = Some(Keep::Low(Self::extract_number(inner)?)),
                Rule::modifier => modifier = Self::extract_signed(inner)?,
                _ => unreachable!("{:#?}", inner),
            }
        }
        if count > limits::MAX_DICE_AMOUNT {
            return Err(Error::Notation(format!(
                "exceeded max allowed amount of dices `{}`",
                limits::MAX_DICE_AMOUNT
            )));
        }
        if sides == 0 {
            return Err(Error::Notation("dice need at least one side".to_owned()));
        }
        if sides > limits::MAX_DICE_SIDES {
            return Err(Error::Notation(format!(
                "exceeded max allowed number of dice sides `{}`",
                limits::MAX_DICE_SIDES
            )));
        }
        if matches!(keep, Some(keep) if keep.count() == 0) {
            return Err(Error::Notation("can't keep zero dice".to_owned()));
        }
        Ok(Descriptor::with_canonical(
            count, sides, keep, modifier, canonical,
        ))
    }
}

/// Strip whitespace and lowercase
pub(crate) fn canonicalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parse a dice notation (`2d6+3`, `d20`, `4d6kh3`) or a bare integer (`+5`).
///
/// Whitespace is stripped before parsing, so `1 0d6` reads as `10d6`.
pub fn parse(input: &str) -> Result<Descriptor> {
    let canonical = canonicalize(input);
    let notation = Parser::parse(Rule::notation, &canonical)?
        .next()
        .ok_or_else(|| Error::Notation(format!("`{input}` is empty")))?;
    for inner in notation.into_inner() {
        match inner.as_rule() {
            Rule::dice => return Parser::extract_dice(inner, canonical.clone()),
            Rule::flat => {
                let modifier = Parser::extract_signed(inner)?;
                return Ok(Descriptor::with_canonical(
                    0,
                    0,
                    None,
                    modifier,
                    canonical.clone(),
                ));
            }
            _ => (),
        }
    }
    Err(Error::Notation(format!("`{input}` has no dice nor number")))
}
