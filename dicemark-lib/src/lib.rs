pub mod dice;
pub mod error;
mod evaluator;
mod parser;
pub mod roll;
pub mod scanner;
pub mod solver;

pub use parser::parse;
pub use parser::Rule;
