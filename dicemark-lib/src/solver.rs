use crate::dice;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::parser;
use crate::roll;
use crate::roll::history::History;
use rand::Rng;
use tracing::debug;

/// Default random dice roller
pub struct RandomSource<'a, T: Rng> {
    pub generator: &'a mut T,
}

impl<T: Rng> roll::Source for RandomSource<'_, T> {
    fn throw(&mut self, sides: u64) -> u64 {
        self.generator.gen_range(1..=sides)
    }
}

/// Resolve a descriptor with the provided source, echoing its canonical form
pub fn resolve<S: roll::Source + ?Sized>(
    descriptor: &dice::Descriptor,
    source: &mut S,
) -> Result<roll::Result> {
    Evaluator::eval(descriptor, descriptor.canonical(), source)
}

/// Represent a solver, holds the query string and its parsed descriptor
#[derive(Clone, Debug)]
pub struct Solver {
    query: String,
    descriptor: dice::Descriptor,
}

impl Solver {
    pub fn new(input: &str) -> Result<Self> {
        Ok(Solver {
            query: input.to_owned(),
            descriptor: parser::parse(input)?,
        })
    }

    /// Solver for an already built descriptor, echoing its canonical form
    pub fn from_descriptor(descriptor: dice::Descriptor) -> Self {
        Solver {
            query: descriptor.canonical().to_owned(),
            descriptor,
        }
    }

    /// Two d20 keeping the highest, i.e. `2d20kh1` plus modifier
    pub fn advantage(modifier: i64) -> Self {
        Self::from_descriptor(dice::Descriptor::dice(
            2,
            20,
            Some(dice::Keep::High(1)),
            modifier,
        ))
    }

    /// Two d20 keeping the lowest, i.e. `2d20kl1` plus modifier
    pub fn disadvantage(modifier: i64) -> Self {
        Self::from_descriptor(dice::Descriptor::dice(
            2,
            20,
            Some(dice::Keep::Low(1)),
            modifier,
        ))
    }

    /// Solve the roll expression using the default Rng source
    pub fn solve(&self) -> Result<roll::Result> {
        self.solve_with(&mut rand::thread_rng())
    }

    /// Solve the roll expression using the provided Rng source
    pub fn solve_with<S: Rng>(&self, generator: &mut S) -> Result<roll::Result> {
        self.solve_with_source(&mut RandomSource { generator })
    }

    /// Solve the roll expression using the provided source
    pub fn solve_with_source<S: roll::Source + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<roll::Result> {
        let result = Evaluator::eval(&self.descriptor, &self.query, source)?;
        debug!(
            query = self.query.as_str(),
            total = result.get_total(),
            "solved"
        );
        Ok(result)
    }

    /// Solve with the provided source and record the result in the history
    pub fn solve_recorded<S: roll::Source + ?Sized>(
        &self,
        source: &mut S,
        history: &mut History,
    ) -> Result<roll::Result> {
        let result = self.solve_with_source(source)?;
        history.record(result.clone());
        Ok(result)
    }

    pub fn descriptor(&self) -> &dice::Descriptor {
        &self.descriptor
    }

    /// Return the query string
    pub fn as_str(&self) -> &str {
        &self.query
    }
}
