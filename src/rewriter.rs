//! Parallel rewriting of an axiom under a [`Grammar`].
//!
//! Each round replaces every symbol of the previous round's full output at
//! once. Stochastic rules draw from an injected [`RandomSource`], so a seeded
//! generator reproduces the same expansion.

use crate::error::{LSystemError, Result};
use crate::grammar::{Grammar, Production};
use rand::Rng;

/// Expanded lengths above this trigger a growth warning before rewriting starts.
pub const GROWTH_WARNING_LENGTH: usize = 1_000_000;

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    /// Next value, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted. Yields `0.0` if empty.
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Replays `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Limits applied while rewriting.
#[derive(Clone, Debug, Default)]
pub struct RewriteOptions {
    /// Abort with [`LSystemError::ExpansionLimit`] once a generation holds more
    /// than this many symbols. `None` means unbounded.
    pub max_length: Option<usize>,
}

/// Picks a successor by prefix sum: the first entry whose cumulative weight
/// is `>= r` wins, so `r == 0.5` over `[(A, 0.5), (B, 0.5)]` selects `A`.
///
/// If rounding leaves the total short of `r`, the last entry is used rather
/// than dropping the symbol. Returns `None` only for an empty list.
pub fn select_successor(options: &[(String, f64)], r: f64) -> Option<&str> {
    let mut cumulative = 0.0;
    for (successor, probability) in options {
        cumulative += probability;
        if r <= cumulative {
            return Some(successor.as_str());
        }
    }
    let (last, _) = options.last()?;
    tracing::warn!(r, cumulative, "no cumulative match; using last successor");
    Some(last.as_str())
}

/// Expands `grammar.axiom` for `iterations` rounds with no length ceiling.
pub fn rewrite<R: RandomSource + ?Sized>(
    grammar: &Grammar,
    iterations: usize,
    rng: &mut R,
) -> Result<String> {
    rewrite_with(grammar, iterations, rng, &RewriteOptions::default())
}

/// Expands `grammar.axiom` for `iterations` rounds.
///
/// The grammar is validated before any rewriting. Zero iterations returns the
/// axiom unchanged.
pub fn rewrite_with<R: RandomSource + ?Sized>(
    grammar: &Grammar,
    iterations: usize,
    rng: &mut R,
    options: &RewriteOptions,
) -> Result<String> {
    grammar.validate()?;

    let estimate = grammar.estimated_length(iterations);
    if estimate > GROWTH_WARNING_LENGTH {
        tracing::warn!(
            iterations,
            estimate,
            factor = grammar.expansion_factor(),
            "expansion may grow very large"
        );
    }

    let mut current = grammar.axiom.clone();
    for iteration in 1..=iterations {
        let (next, length) = step(grammar, &current, rng, iteration, options.max_length)?;
        tracing::debug!(iteration, length, "rewrite round complete");
        current = next;
    }
    Ok(current)
}

fn step<R: RandomSource + ?Sized>(
    grammar: &Grammar,
    input: &str,
    rng: &mut R,
    iteration: usize,
    max_length: Option<usize>,
) -> Result<(String, usize)> {
    let mut next = String::with_capacity(input.len());
    let mut length = 0usize;

    for symbol in input.chars() {
        match grammar.production(symbol) {
            Some(Production::Deterministic(successor)) => {
                next.push_str(successor);
                length += successor.chars().count();
            }
            Some(Production::Stochastic(choices)) => {
                let r = rng.next_unit();
                if let Some(successor) = select_successor(choices, r) {
                    next.push_str(successor);
                    length += successor.chars().count();
                }
            }
            None => {
                next.push(symbol);
                length += 1;
            }
        }

        if let Some(limit) = max_length
            && length > limit
        {
            return Err(LSystemError::ExpansionLimit {
                iteration,
                length,
                limit,
            });
        }
    }

    Ok((next, length))
}

/// Iterator over successive generations, starting with the axiom itself.
///
/// Each generation is rewritten from the previous one only when requested,
/// so `take(n)` performs `n - 1` rounds and leaves the random source in the
/// same state as `rewrite(grammar, n - 1, rng)`. The `max_length` ceiling of
/// the given options applies; after yielding an
/// [`LSystemError::ExpansionLimit`] the iterator ends. Otherwise it never ends
/// on its own, so bound it with [`Iterator::take`].
pub struct Generations<'a, R: RandomSource + ?Sized> {
    grammar: &'a Grammar,
    rng: &'a mut R,
    max_length: Option<usize>,
    previous: Option<String>,
    generation: usize,
    warned: bool,
    finished: bool,
}

impl<'a, R: RandomSource + ?Sized> Generations<'a, R> {
    /// Validates `grammar`; nothing is rewritten until the first `next()`.
    pub fn new(grammar: &'a Grammar, rng: &'a mut R, options: &RewriteOptions) -> Result<Self> {
        grammar.validate()?;
        Ok(Self {
            grammar,
            rng,
            max_length: options.max_length,
            previous: None,
            generation: 0,
            warned: false,
            finished: false,
        })
    }
}

impl<R: RandomSource + ?Sized> Iterator for Generations<'_, R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        if self.finished {
            return None;
        }

        let produced = match &self.previous {
            None => Ok((self.grammar.axiom.clone(), self.grammar.axiom.chars().count())),
            Some(previous) => step(
                self.grammar,
                previous,
                &mut *self.rng,
                self.generation,
                self.max_length,
            ),
        };

        match produced {
            Ok((current, length)) => {
                if length > GROWTH_WARNING_LENGTH && !self.warned {
                    self.warned = true;
                    tracing::warn!(
                        generation = self.generation,
                        length,
                        "generation has grown very large"
                    );
                }
                tracing::debug!(generation = self.generation, length, "generation ready");
                self.previous = Some(current.clone());
                self.generation += 1;
                Some(Ok(current))
            }
            Err(err) => {
                self.finished = true;
                self.previous = None;
                Some(Err(err))
            }
        }
    }
}
