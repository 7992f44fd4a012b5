//! Term aggregation.
//!
//! Terms are bucketed per free-index expression, in enumeration order.
//! Leg-grouped patterns keep one [`LegGroup`] per leg assignment, empty
//! groups included. The RPA pattern is bucketed by its intermediate vertex
//! indices `(b, c)` and combined into an [`RpaSum`] whose parts carry the
//! vertex-product index they are multiplied with.

use std::collections::BTreeMap;

use pffrg_algebra::model::RANK;
use pffrg_algebra::{Channel, Grouping};

use crate::error::{GenerationError, Result};
use crate::evaluate::{EvaluationStats, Evaluator, Legs, Term};

/// The terms generated under one leg assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegGroup {
    /// The leg assignment.
    pub legs: Legs,
    /// Terms in enumeration order.
    pub terms: Vec<Term>,
}

/// All terms of one pattern for one free-index assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Generating channel.
    pub channel: Channel,
    /// First free index.
    pub mu: usize,
    /// Second free index.
    pub nu: usize,
    /// One group per leg assignment, in enumeration order.
    pub groups: Vec<LegGroup>,
}

impl Expression {
    /// Number of terms across all groups.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.groups.iter().map(|g| g.terms.len()).sum()
    }

    /// Whether no group holds a term.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.terms.is_empty())
    }

    /// Iterates over every term in order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.groups.iter().flat_map(|g| g.terms.iter())
    }
}

/// One `(b, c)` bucket of the RPA channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpaPart {
    /// Intermediate vertex index on the `mu` side.
    pub b: usize,
    /// Intermediate vertex index on the `nu` side.
    pub c: usize,
    /// Position in the externally supplied vertex-product array.
    pub vertex_index: usize,
    /// Terms in enumeration order.
    pub terms: Vec<Term>,
}

/// The RPA expression for one `(mu, nu)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpaSum {
    /// First free index.
    pub mu: usize,
    /// Second free index.
    pub nu: usize,
    /// All sixteen `(b, c)` buckets, `c` varying fastest.
    pub parts: Vec<RpaPart>,
}

impl RpaSum {
    /// Number of terms across all parts.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.parts.iter().map(|p| p.terms.len()).sum()
    }
}

/// Index of `vertexProduct[...]` multiplying bucket `(b, c)` of `t<mu><nu>`.
#[must_use]
pub fn vertex_product_index(mu: usize, b: usize, c: usize, nu: usize) -> usize {
    64 * mu + 16 * b + 4 * c + nu
}

/// Free-index pairs in output order, `nu` varying fastest.
pub fn free_pairs() -> impl Iterator<Item = (usize, usize)> {
    (0..RANK).flat_map(|mu| (0..RANK).map(move |nu| (mu, nu)))
}

/// Collects one expression grouped by leg assignment.
///
/// # Errors
///
/// Propagates evaluation errors.
pub fn collect_legs(
    eval: &Evaluator<'_>,
    mu: usize,
    nu: usize,
    stats: &mut EvaluationStats,
) -> Result<Expression> {
    let mut groups = Vec::new();
    for legs in eval.leg_assignments() {
        let (terms, s) = eval.terms(mu, nu, &legs)?;
        stats.merge(s);
        groups.push(LegGroup { legs, terms });
    }
    Ok(Expression {
        channel: eval.pattern().channel,
        mu,
        nu,
        groups,
    })
}

/// Collects one expression bucketed by the pattern's two grouping indices.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedPattern`] if the pattern is grouped by
/// legs, and propagates evaluation errors.
pub fn collect_internal_pairs(
    eval: &Evaluator<'_>,
    mu: usize,
    nu: usize,
    stats: &mut EvaluationStats,
) -> Result<RpaSum> {
    let pattern = eval.pattern();
    let Grouping::Internals(x, y) = pattern.grouping else {
        return Err(GenerationError::MalformedPattern {
            channel: pattern.channel,
            reason: "pattern is not grouped by internal indices".to_owned(),
        });
    };
    let mut buckets: BTreeMap<(usize, usize), Vec<Term>> = BTreeMap::new();
    for legs in eval.leg_assignments() {
        let (terms, s) = eval.terms(mu, nu, &legs)?;
        stats.merge(s);
        for term in terms {
            let key = (term.tuple.internals[x], term.tuple.internals[y]);
            buckets.entry(key).or_default().push(term);
        }
    }
    let parts = (0..RANK)
        .flat_map(|b| (0..RANK).map(move |c| (b, c)))
        .map(|(b, c)| RpaPart {
            b,
            c,
            vertex_index: vertex_product_index(mu, b, c, nu),
            terms: buckets.remove(&(b, c)).unwrap_or_default(),
        })
        .collect();
    Ok(RpaSum { mu, nu, parts })
}
