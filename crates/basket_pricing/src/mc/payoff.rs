//! Basket payoff evaluation.
//!
//! A European basket payoff examines only the terminal step of a path:
//! the terminal levels are combined linearly (equal weights, the
//! arithmetic mean, by default), the strike is applied with call/put
//! clamping, and the result is discounted to present value with a
//! factor computed once at construction.

use basket_core::types::error::InputError;

use super::paths::MultiPath;

/// Direction of the optionality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// Pays `max(basket - strike, 0)`.
    Call,
    /// Pays `max(strike - basket, 0)`.
    Put,
}

/// Basket combination rule: option kind, strike, and terminal weights.
///
/// With `weights: None` the basket value is the arithmetic mean of the
/// terminal asset levels — the conventional default for a plain basket
/// option. A custom weight vector (one entry per asset) selects any
/// other linear combination.
///
/// # Examples
///
/// ```rust
/// use basket_pricing::mc::{OptionKind, PayoffSpec};
///
/// let plain = PayoffSpec::arithmetic_call(100.0);
/// assert_eq!(plain.kind, OptionKind::Call);
///
/// let weighted = PayoffSpec::arithmetic_put(95.0).with_weights(vec![0.7, 0.3]);
/// assert!(weighted.weights.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffSpec {
    /// Call or put.
    pub kind: OptionKind,
    /// Strike level the basket value is compared against.
    pub strike: f64,
    /// Per-asset terminal weights; `None` means equal weighting.
    pub weights: Option<Vec<f64>>,
}

impl PayoffSpec {
    /// Arithmetic-mean basket call.
    pub fn arithmetic_call(strike: f64) -> Self {
        Self {
            kind: OptionKind::Call,
            strike,
            weights: None,
        }
    }

    /// Arithmetic-mean basket put.
    pub fn arithmetic_put(strike: f64) -> Self {
        Self {
            kind: OptionKind::Put,
            strike,
            weights: None,
        }
    }

    /// Replaces the equal weighting with a custom weight vector.
    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = Some(weights);
        self
    }
}

/// Capability seam for mapping one completed path to one discounted
/// payoff.
///
/// Implementations are stateless with respect to individual paths and
/// safe to invoke concurrently on different paths.
pub trait PathPayoff {
    /// Discounted payoff of one path.
    fn evaluate(&self, path: &MultiPath) -> f64;
}

/// Terminal basket payoff with precomputed weights and discount factor.
#[derive(Clone, Debug, PartialEq)]
pub struct BasketPayoff {
    kind: OptionKind,
    strike: f64,
    /// Resolved per-asset weights (equal weighting becomes `1/n` each).
    weights: Vec<f64>,
    /// `exp(-r * T)`, computed once.
    discount: f64,
}

impl BasketPayoff {
    /// Resolves a [`PayoffSpec`] against the basket size and binds the
    /// discount factor.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DimensionMismatch`] if a custom weight
    /// vector does not have one entry per asset.
    pub fn new(spec: &PayoffSpec, n_assets: usize, discount: f64) -> Result<Self, InputError> {
        let weights = match &spec.weights {
            Some(weights) => {
                if weights.len() != n_assets {
                    return Err(InputError::DimensionMismatch {
                        name: "payoff weights",
                        got: weights.len(),
                        expected: n_assets,
                    });
                }
                weights.clone()
            }
            None => vec![1.0 / n_assets as f64; n_assets],
        };

        Ok(Self {
            kind: spec.kind,
            strike: spec.strike,
            weights,
            discount,
        })
    }

    /// The discount factor bound at construction.
    #[inline]
    pub fn discount(&self) -> f64 {
        self.discount
    }
}

impl PathPayoff for BasketPayoff {
    fn evaluate(&self, path: &MultiPath) -> f64 {
        let basket: f64 = path
            .terminal()
            .iter()
            .zip(&self.weights)
            .map(|(&level, &weight)| level * weight)
            .sum();

        let intrinsic = match self.kind {
            OptionKind::Call => (basket - self.strike).max(0.0),
            OptionKind::Put => (self.strike - basket).max(0.0),
        };

        intrinsic * self.discount
    }
}
