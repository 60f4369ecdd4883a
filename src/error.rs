//! Error type shared by the rewriter, the interpreters and preset loading.

use thiserror::Error;

/// Everything that can go wrong between a grammar and its geometry.
#[derive(Error, Debug)]
pub enum LSystemError {
    #[error("stochastic rule for '{symbol}' has no successors")]
    EmptyProduction { symbol: char },

    #[error("stochastic rule for '{symbol}' has invalid probability {probability}")]
    InvalidProbability { symbol: char, probability: f64 },

    #[error("probabilities for '{symbol}' sum to {sum}, expected 1.0")]
    ProbabilitySum { symbol: char, sum: f64 },

    #[error("unbalanced ']' at position {position}: branch stack is empty")]
    UnbalancedBracket { position: usize },

    #[error("'[' at position {position} exceeds the maximum branch depth of {limit}")]
    StackOverflow { position: usize, limit: usize },

    #[error("generation {iteration} grew to {length} symbols, limit is {limit}")]
    ExpansionLimit {
        iteration: usize,
        length: usize,
        limit: usize,
    },

    #[error("unknown color '{value}'")]
    UnknownColor { value: String },

    #[error("malformed preset: {0}")]
    Preset(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LSystemError>;
