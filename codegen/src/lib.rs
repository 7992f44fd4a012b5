//! PFFRG term generator.
//!
//! Reads the contraction patterns from `pffrg_algebra::Catalog::full()` and
//! enumerates them into the terms of the pseudo-fermion vertex flow equation
//! (five channels plus the Schwinger–Dyson auxiliary expression) and of the
//! spin correlation. Generation is single-threaded and deterministic: the
//! same configuration always yields byte-identical output.
//!
//! ```
//! use pffrg_codegen::{generate_flow, render, FlowConfig};
//!
//! let output = generate_flow(&FlowConfig::default())?;
//! assert_eq!(output.report.flow_counts(), [4096, 1024, 4096, 4096, 4096]);
//! let text = render::render_flow(&output);
//! assert!(text.contains("Channel no 0: "));
//! # Ok::<(), pffrg_codegen::GenerationError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod aggregate;
pub mod config;
pub mod emit;
pub mod error;
pub mod evaluate;
pub mod json;
pub mod mapping;
pub mod normalize;
pub mod render;

use std::collections::BTreeMap;

use pffrg_algebra::model::IDENTITY;
use pffrg_algebra::symmetry::Z;
use pffrg_algebra::{Catalog, Channel, ContractionPattern, Symmetry};
use tracing::{debug, info, warn};

pub use aggregate::{Expression, LegGroup, RpaPart, RpaSum};
pub use config::{FlowConfig, OperandStyle, SpinConfig};
pub use error::{GenerationError, Result};
pub use evaluate::{EvaluationStats, Evaluator, Term};
pub use normalize::Phase;

/// Report of what was generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Terms emitted per channel.
    pub terms: BTreeMap<Channel, usize>,
    /// Enumeration statistics over all channels.
    pub stats: EvaluationStats,
}

impl GenerationReport {
    /// Term counts of the five flow-equation channels in counter order.
    #[must_use]
    pub fn flow_counts(&self) -> [usize; 5] {
        Channel::FLOW.map(|c| self.count(c))
    }

    /// Terms emitted for `channel`.
    #[must_use]
    pub fn count(&self, channel: Channel) -> usize {
        self.terms.get(&channel).copied().unwrap_or_default()
    }

    fn record(&mut self, channel: Channel, stats: EvaluationStats) {
        *self.terms.entry(channel).or_default() += stats.terms;
        self.stats.merge(stats);
        debug!(
            channel = %channel,
            terms = stats.terms,
            candidates = stats.candidates,
            filtered = stats.filtered,
            dropped = stats.dropped,
            "channel enumerated"
        );
    }
}

/// Structured flow-equation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutput {
    /// Configuration the output was generated with.
    pub config: FlowConfig,
    /// Schwinger–Dyson expression, `0` component then `z` component.
    pub schwinger_dyson: Vec<Expression>,
    /// Channel 0, all sixteen `(mu, nu)`.
    pub s: Vec<Expression>,
    /// Channel 1, all sixteen `(mu, nu)`.
    pub rpa: Vec<RpaSum>,
    /// Channel 2, all sixteen `(mu, nu)`.
    pub t_left: Vec<Expression>,
    /// Channel 3, all sixteen `(mu, nu)`.
    pub t_right: Vec<Expression>,
    /// Channel 4, all sixteen `(mu, nu)`.
    pub u: Vec<Expression>,
    /// Counts.
    pub report: GenerationReport,
}

/// Structured spin-correlation output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutput {
    /// Configuration the output was generated with.
    pub config: SpinConfig,
    /// Terms without a Kronecker delta.
    pub first: Expression,
    /// Terms with a Kronecker delta.
    pub second: Expression,
    /// Terms quadratic in propagators.
    pub quadratic: Expression,
    /// Counts.
    pub report: GenerationReport,
}

/// Outer components of the Schwinger–Dyson expression: the identity and
/// the first generator the model keeps.
#[must_use]
pub fn schwinger_dyson_components(symmetry: Symmetry) -> [usize; 2] {
    if symmetry.reduced_rotation {
        [IDENTITY, Z]
    } else {
        [IDENTITY, 1]
    }
}

fn find(catalog: &Catalog, channel: Channel) -> Result<&ContractionPattern> {
    catalog
        .find(channel)
        .ok_or_else(|| GenerationError::MalformedPattern {
            channel,
            reason: "no pattern in catalog".to_owned(),
        })
}

fn leg_expressions(
    pattern: &ContractionPattern,
    symmetry: Symmetry,
    report: &mut GenerationReport,
) -> Result<Vec<Expression>> {
    let eval = Evaluator::new(pattern, symmetry)?;
    let mut stats = EvaluationStats::default();
    let exprs = aggregate::free_pairs()
        .map(|(mu, nu)| aggregate::collect_legs(&eval, mu, nu, &mut stats))
        .collect::<Result<Vec<_>>>()?;
    report.record(pattern.channel, stats);
    Ok(exprs)
}

/// Generates every flow-equation expression.
///
/// # Errors
///
/// Returns [`GenerationError::Config`] for an invalid configuration,
/// [`GenerationError::MalformedPattern`] if a catalog pattern fails its
/// check, and [`GenerationError::CoefficientOutOfRange`] if a contraction
/// leaves `{0, ±1, ±i}`.
pub fn generate_flow(config: &FlowConfig) -> Result<FlowOutput> {
    config.validate()?;
    if config.symmetry.time_reversal {
        warn!("time-reversal restriction has no reference flow-equation output; generating anyway");
    }
    let catalog = Catalog::full();
    let symmetry = config.symmetry;
    let mut report = GenerationReport::default();

    let sde_pattern = find(catalog, Channel::SchwingerDyson)?;
    let sde_eval = Evaluator::new(sde_pattern, symmetry)?;
    let mut sde_stats = EvaluationStats::default();
    let schwinger_dyson = schwinger_dyson_components(symmetry)
        .into_iter()
        .map(|mu| aggregate::collect_legs(&sde_eval, mu, IDENTITY, &mut sde_stats))
        .collect::<Result<Vec<_>>>()?;
    report.record(Channel::SchwingerDyson, sde_stats);

    let s = leg_expressions(find(catalog, Channel::S)?, symmetry, &mut report)?;

    let rpa_eval = Evaluator::new(find(catalog, Channel::Rpa)?, symmetry)?;
    let mut rpa_stats = EvaluationStats::default();
    let rpa = aggregate::free_pairs()
        .map(|(mu, nu)| aggregate::collect_internal_pairs(&rpa_eval, mu, nu, &mut rpa_stats))
        .collect::<Result<Vec<_>>>()?;
    report.record(Channel::Rpa, rpa_stats);

    let t_left = leg_expressions(find(catalog, Channel::TLeft)?, symmetry, &mut report)?;
    let t_right = leg_expressions(find(catalog, Channel::TRight)?, symmetry, &mut report)?;
    let u = leg_expressions(find(catalog, Channel::U)?, symmetry, &mut report)?;

    info!(
        counts = ?report.flow_counts(),
        schwinger_dyson = report.count(Channel::SchwingerDyson),
        candidates = report.stats.candidates,
        "flow equation generated"
    );
    Ok(FlowOutput {
        config: *config,
        schwinger_dyson,
        s,
        rpa,
        t_left,
        t_right,
        u,
        report,
    })
}

/// Generates the spin-correlation expressions for one matrix element.
///
/// # Errors
///
/// Returns [`GenerationError::Config`] for an invalid configuration,
/// [`GenerationError::MalformedPattern`] if a catalog pattern fails its
/// check, and [`GenerationError::CoefficientOutOfRange`] if a contraction
/// leaves `{0, ±1, ±i}`.
pub fn generate_spin(config: &SpinConfig) -> Result<SpinOutput> {
    config.validate()?;
    let catalog = Catalog::full();
    let mut report = GenerationReport::default();
    let mut one = |channel: Channel| -> Result<Expression> {
        let eval = Evaluator::new(find(catalog, channel)?, config.symmetry)?;
        let mut stats = EvaluationStats::default();
        let expr = aggregate::collect_legs(&eval, config.mu, config.nu, &mut stats)?;
        report.record(channel, stats);
        Ok(expr)
    };
    let first = one(Channel::SpinFirst)?;
    let second = one(Channel::SpinSecond)?;
    let quadratic = one(Channel::SpinQuadratic)?;
    info!(
        mu = config.mu,
        nu = config.nu,
        first = report.count(Channel::SpinFirst),
        second = report.count(Channel::SpinSecond),
        quadratic = report.count(Channel::SpinQuadratic),
        "spin correlation generated"
    );
    Ok(SpinOutput {
        config: *config,
        first,
        second,
        quadratic,
        report,
    })
}
