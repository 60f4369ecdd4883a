//! Grammar definition: an axiom plus a table of production rules.
//!
//! Symbols are single `char`s. Any symbol without a rule is copied unchanged
//! during rewriting (identity rule). A rule is either deterministic (one fixed
//! successor) or stochastic (an ordered list of weighted successors).

use crate::error::{LSystemError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Allowed distance between the sum of a stochastic rule's weights and `1.0`.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// The right-hand side of a rule.
///
/// Deserializes untagged, so a preset can write either `"F": "FF"` or
/// `"F": [["F[+F]", 0.5], ["F[-F]", 0.5]]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Production {
    /// Always replaced by this string.
    Deterministic(String),
    /// Replaced by one of these, chosen by cumulative probability in list order.
    Stochastic(Vec<(String, f64)>),
}

impl Production {
    /// Length of the longest successor this rule can emit.
    pub fn max_successor_len(&self) -> usize {
        match self {
            Self::Deterministic(s) => s.chars().count(),
            Self::Stochastic(options) => options
                .iter()
                .map(|(s, _)| s.chars().count())
                .max()
                .unwrap_or(0),
        }
    }

    fn validate(&self, symbol: char) -> Result<()> {
        let Self::Stochastic(options) = self else {
            return Ok(());
        };
        if options.is_empty() {
            return Err(LSystemError::EmptyProduction { symbol });
        }
        let mut sum = 0.0;
        for &(_, probability) in options {
            if !probability.is_finite() || probability < 0.0 {
                return Err(LSystemError::InvalidProbability {
                    symbol,
                    probability,
                });
            }
            sum += probability;
        }
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(LSystemError::ProbabilitySum { symbol, sum });
        }
        Ok(())
    }
}

/// An axiom and its rule table. Immutable input to [`crate::rewriter::rewrite`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    /// The generation-0 string.
    pub axiom: String,
    /// Rules keyed by the symbol they replace.
    #[serde(default)]
    pub rules: BTreeMap<char, Production>,
}

impl Grammar {
    /// Creates a grammar with no rules: every symbol maps to itself.
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            rules: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) a deterministic rule (builder pattern).
    pub fn with_rule(mut self, symbol: char, successor: impl Into<String>) -> Self {
        self.rules
            .insert(symbol, Production::Deterministic(successor.into()));
        self
    }

    /// Adds (or replaces) a stochastic rule (builder pattern).
    ///
    /// The order of `options` is kept as given; it decides which successor
    /// wins on a boundary draw.
    pub fn with_stochastic_rule<S: Into<String>>(
        mut self,
        symbol: char,
        options: impl IntoIterator<Item = (S, f64)>,
    ) -> Self {
        let options = options.into_iter().map(|(s, p)| (s.into(), p)).collect();
        self.rules.insert(symbol, Production::Stochastic(options));
        self
    }

    /// The rule for `symbol`, if any.
    pub fn production(&self, symbol: char) -> Option<&Production> {
        self.rules.get(&symbol)
    }

    /// Checks every stochastic rule: non-empty, finite non-negative weights
    /// summing to `1.0` within [`PROBABILITY_TOLERANCE`].
    ///
    /// Rules are checked in symbol order, so the first offending symbol is
    /// reported deterministically.
    pub fn validate(&self) -> Result<()> {
        for (&symbol, production) in &self.rules {
            production.validate(symbol)?;
        }
        Ok(())
    }

    /// True when no rule needs a random draw.
    pub fn is_deterministic(&self) -> bool {
        self.rules
            .values()
            .all(|p| matches!(p, Production::Deterministic(_)))
    }

    /// The worst-case per-round growth factor: the longest successor of any
    /// rule, and never less than 1 (identity copies keep length).
    pub fn expansion_factor(&self) -> usize {
        self.rules
            .values()
            .map(Production::max_successor_len)
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// Saturating upper bound on the expanded length after `iterations` rounds.
    pub fn estimated_length(&self, iterations: usize) -> usize {
        let factor = self.expansion_factor();
        let mut length = self.axiom.chars().count();
        for _ in 0..iterations {
            if length == 0 || factor == 1 {
                break;
            }
            length = length.saturating_mul(factor);
            if length == usize::MAX {
                break;
            }
        }
        length
    }
}
