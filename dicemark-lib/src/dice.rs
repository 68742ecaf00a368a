pub(crate) mod keep;

pub(crate) mod limits {
    /// Arbitrary limits to avoid oom
    pub(crate) const MAX_DICE_AMOUNT: u64 = 5000;
    pub(crate) const MAX_DICE_SIDES: u64 = 5000;
}

pub use keep::Keep;

use crate::error::Error;
use crate::error::Result;

/// Mark if a single d20 roll is a critic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Critic {
    Success,
    Fumble,
    Not,
}

impl std::fmt::Display for Critic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Critic::Success => write!(f, "success"),
            Critic::Fumble => write!(f, "fumble"),
            Critic::Not => write!(f, "none"),
        }
    }
}

/// Keep one die result with its kept marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub value: u64,
    pub kept: bool,
}

/// Parsed dice expression: `count` dice of `sides` faces, an optional keep rule
/// and a flat modifier.
///
/// A descriptor with `sides == 0` is a flat modifier with no dice at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    count: u64,
    sides: u64,
    keep: Option<Keep>,
    modifier: i64,
    canonical: String,
}

impl Descriptor {
    pub(crate) fn with_canonical(
        count: u64,
        sides: u64,
        keep: Option<Keep>,
        modifier: i64,
        canonical: String,
    ) -> Self {
        Self {
            count,
            sides,
            keep,
            modifier,
            canonical,
        }
    }

    /// New dice expression, the canonical form is built from the parts
    pub fn dice(count: u64, sides: u64, keep: Option<Keep>, modifier: i64) -> Self {
        let mut canonical = format!("{count}d{sides}");
        if let Some(keep) = keep {
            canonical.push_str(&keep.to_string());
        }
        if modifier != 0 {
            canonical.push_str(&format!("{modifier:+}"));
        }
        Self::with_canonical(count, sides, keep, modifier, canonical)
    }

    /// New modifier only expression
    pub fn flat(modifier: i64) -> Self {
        Self::with_canonical(0, 0, None, modifier, modifier.to_string())
    }

    pub fn get_count(&self) -> u64 {
        self.count
    }

    pub fn get_sides(&self) -> u64 {
        self.sides
    }

    pub fn get_keep(&self) -> Option<Keep> {
        self.keep
    }

    pub fn get_modifier(&self) -> i64 {
        self.modifier
    }

    /// Lowercase notation without whitespace
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn is_flat(&self) -> bool {
        self.sides == 0
    }

    /// Exactly one twenty sided die and nothing kept or dropped
    pub fn is_single_d20(&self) -> bool {
        self.count == 1 && self.sides == 20 && self.keep.is_none()
    }

    /// Amount of dice that count toward the total
    pub fn kept_count(&self) -> u64 {
        match self.keep {
            Some(keep) => keep.count().min(self.count),
            None => self.count,
        }
    }

    /// Lowest reachable total, saturating at the `i64` bounds
    pub fn min(&self) -> i64 {
        i64::try_from(self.kept_count())
            .unwrap_or(i64::MAX)
            .saturating_add(self.modifier)
    }

    /// Highest reachable total, saturating at the `i64` bounds
    pub fn max(&self) -> i64 {
        i64::try_from(self.kept_count().saturating_mul(self.sides))
            .unwrap_or(i64::MAX)
            .saturating_add(self.modifier)
    }

    /// Check the descriptor can be resolved
    pub fn validate(&self) -> Result<()> {
        if self.count > limits::MAX_DICE_AMOUNT {
            return Err(Error::Descriptor(format!(
                "`{}` exceeded max allowed amount of dices `{}`",
                self.canonical,
                limits::MAX_DICE_AMOUNT
            )));
        }
        if self.sides > limits::MAX_DICE_SIDES {
            return Err(Error::Descriptor(format!(
                "`{}` exceeded max allowed number of dice sides `{}`",
                self.canonical,
                limits::MAX_DICE_SIDES
            )));
        }
        if self.sides == 0 && self.count != 0 {
            return Err(Error::Descriptor(format!(
                "`{}` rolls {} dice without sides",
                self.canonical, self.count
            )));
        }
        if self.sides == 0 && self.keep.is_some() {
            return Err(Error::Descriptor(format!(
                "`{}` keeps dice but rolls none",
                self.canonical
            )));
        }
        if matches!(self.keep, Some(keep) if keep.count() == 0) {
            return Err(Error::Descriptor(format!(
                "`{}` keeps no dice",
                self.canonical
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

impl std::str::FromStr for Descriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_canonical_form() {
        assert_eq!("2d20kh1+4", Descriptor::dice(2, 20, Some(Keep::High(1)), 4).canonical());
        assert_eq!("2d20kl1-1", Descriptor::dice(2, 20, Some(Keep::Low(1)), -1).canonical());
        assert_eq!("3d8", Descriptor::dice(3, 8, None, 0).canonical());
        assert_eq!("-2", Descriptor::flat(-2).canonical());
    }

    #[test]
    fn range_with_keep() {
        let d = Descriptor::dice(4, 6, Some(Keep::High(3)), 2);
        assert_eq!(5, d.min());
        assert_eq!(20, d.max());
        let d = Descriptor::dice(2, 6, Some(Keep::Low(5)), 0);
        assert_eq!(2, d.kept_count());
        assert_eq!(12, d.max());
    }

    #[test]
    fn flat_range() {
        let d = Descriptor::flat(7);
        assert!(d.is_flat());
        assert_eq!(7, d.min());
        assert_eq!(7, d.max());
    }

    #[test]
    fn invalid_descriptors() {
        assert!(Descriptor::dice(3, 0, None, 0).validate().is_err());
        assert!(Descriptor::dice(0, 0, Some(Keep::High(1)), 0).validate().is_err());
        assert!(Descriptor::dice(2, 6, Some(Keep::Low(0)), 0).validate().is_err());
        assert!(Descriptor::dice(0, 6, None, 3).validate().is_ok());
        assert!(Descriptor::flat(-4).validate().is_ok());
    }

    #[test]
    fn oversized_descriptors() {
        let error = Descriptor::dice(u64::MAX, 6, None, 0).validate().unwrap_err();
        assert!(matches!(error, Error::Descriptor(_)));
        assert!(Descriptor::dice(1, u64::MAX, None, 0).validate().is_err());
        assert!(Descriptor::dice(5000, 5000, None, 0).validate().is_ok());
    }

    #[test]
    fn range_saturates() {
        let d = crate::parser::parse("d6+9223372036854775807").unwrap();
        assert_eq!(i64::MAX, d.min());
        assert_eq!(i64::MAX, d.max());
        let d = Descriptor::dice(2, 6, None, i64::MIN);
        assert_eq!(i64::MIN + 2, d.min());
        let d = Descriptor::dice(u64::MAX, u64::MAX, None, 0);
        assert_eq!(i64::MAX, d.min());
        assert_eq!(i64::MAX, d.max());
    }
}
