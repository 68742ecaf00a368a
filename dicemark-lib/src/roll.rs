pub mod history;

use crate::dice;
use chrono::DateTime;
use chrono::Utc;
use itertools::Itertools;

/// Keep a resolved roll expression
#[derive(Debug, Clone)]
pub struct Result {
    descriptor: dice::Descriptor,
    display: String,
    outcomes: Vec<dice::Outcome>,
    kept_total: i64,
    total: i64,
    critic: dice::Critic,
    timestamp: DateTime<Utc>,
}

impl Result {
    pub(crate) fn new(
        descriptor: dice::Descriptor,
        display: String,
        outcomes: Vec<dice::Outcome>,
        kept_total: i64,
        total: i64,
        critic: dice::Critic,
    ) -> Self {
        Result {
            descriptor,
            display,
            outcomes,
            kept_total,
            total,
            critic,
            timestamp: Utc::now(),
        }
    }

    pub fn get_descriptor(&self) -> &dice::Descriptor {
        &self.descriptor
    }

    /// Input as typed, for echo
    pub fn get_display(&self) -> &str {
        &self.display
    }

    /// Every die in roll order, dropped ones included
    pub fn get_outcomes(&self) -> &[dice::Outcome] {
        &self.outcomes
    }

    /// Iterate the values of the dropped dice
    pub fn dropped(&self) -> impl Iterator<Item = u64> + '_ {
        self.outcomes.iter().filter(|o| !o.kept).map(|o| o.value)
    }

    /// Iterate the values of the kept dice
    pub fn kept(&self) -> impl Iterator<Item = u64> + '_ {
        self.outcomes.iter().filter(|o| o.kept).map(|o| o.value)
    }

    pub fn get_modifier(&self) -> i64 {
        self.descriptor.get_modifier()
    }

    pub fn get_kept_total(&self) -> i64 {
        self.kept_total
    }

    /// Kept total plus modifier
    pub fn get_total(&self) -> i64 {
        self.total
    }

    pub fn get_critic(&self) -> dice::Critic {
        self.critic
    }

    pub fn get_timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl std::fmt::Display for Result {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self.display.trim())?;
        if !self.descriptor.is_flat() {
            write!(
                f,
                " [{}]",
                self.outcomes
                    .iter()
                    .map(|o| if o.kept {
                        o.value.to_string()
                    } else {
                        format!("~~{}~~", o.value)
                    })
                    .format(", ")
            )?;
            match self.get_modifier() {
                m if m > 0 => write!(f, " + {m}")?,
                m if m < 0 => write!(f, " - {}", m.unsigned_abs())?,
                _ => (),
            }
        }
        write!(f, " = **{}**", self.total)?;
        match self.critic {
            dice::Critic::Success => write!(f, " *critical success*")?,
            dice::Critic::Fumble => write!(f, " *fumble*")?,
            dice::Critic::Not => (),
        }
        Ok(())
    }
}

/// Interface for rolling dices
///
/// Every throw must return a value in `1..=sides`.
pub trait Source {
    fn throw(&mut self, sides: u64) -> u64;
}

