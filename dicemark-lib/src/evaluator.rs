use crate::dice;
use crate::error::Result;
use crate::roll;
use tracing::trace;

/// Represent an evaluator
pub(crate) struct Evaluator;

impl Evaluator {
    fn critic(descriptor: &dice::Descriptor, values: &[u64]) -> dice::Critic {
        if !descriptor.is_single_d20() {
            return dice::Critic::Not;
        }
        match values {
            [20] => dice::Critic::Success,
            [1] => dice::Critic::Fumble,
            _ => dice::Critic::Not,
        }
    }

    // compute a whole descriptor
    pub(crate) fn eval<S: roll::Source + ?Sized>(
        descriptor: &dice::Descriptor,
        display: &str,
        source: &mut S,
    ) -> Result<roll::Result> {
        descriptor.validate()?;
        let values = Self::roll(descriptor.get_count(), descriptor.get_sides(), source)?;
        let kept = match descriptor.get_keep() {
            Some(keep) => keep.select(&values),
            None => vec![true; values.len()],
        };
        let outcomes: Vec<dice::Outcome> = values
            .iter()
            .zip(kept)
            .map(|(&value, kept)| dice::Outcome { value, kept })
            .collect();
        let kept_total = outcomes
            .iter()
            .filter(|o| o.kept)
            .try_fold(0i64, |acc, o| {
                i64::try_from(o.value)
                    .ok()
                    .and_then(|value| acc.checked_add(value))
            })
            .ok_or("kept total overflows")?;
        let total = kept_total
            .checked_add(descriptor.get_modifier())
            .ok_or("total overflows")?;
        let critic = Self::critic(descriptor, &values);
        trace!(
            notation = descriptor.canonical(),
            ?values,
            kept_total,
            total,
            %critic,
            "evaluated"
        );
        Ok(roll::Result::new(
            descriptor.clone(),
            display.to_owned(),
            outcomes,
            kept_total,
            total,
            critic,
        ))
    }

    pub(crate) fn roll<S: roll::Source + ?Sized>(
        amount: u64,
        sides: u64,
        source: &mut S,
    ) -> Result<Vec<u64>> {
        (0..amount)
            .map(|_| match source.throw(sides) {
                value if (1..=sides).contains(&value) => Ok(value),
                value => Err(format!("source threw {value} for a {sides} sided dice").into()),
            })
            .collect()
    }
}
