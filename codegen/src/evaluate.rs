//! Contraction evaluation.
//!
//! One generic engine replaces the per-channel loop nests: an [`Odometer`]
//! walks the propagator legs (over the components the [`Symmetry`] admits)
//! and then the internal indices, the last declared index varying fastest.
//! For every admitted assignment the pattern's factors and lookups are
//! multiplied and the result is normalized into a [`Term`].

use pffrg_algebra::model::{IndexTuple, MAX_INTERNALS, MAX_LEGS, ONE, RANK, ZERO};
use pffrg_algebra::{table, Coefficient, ContractionPattern, Factor, Grouping, Slot, Symmetry};

use crate::error::{GenerationError, Result};
use crate::normalize::{normalize, Phase};

/// A mixed-radix counter over `start..end` ranges, yielding every
/// combination in lexicographic order.
#[derive(Debug, Clone)]
pub struct Odometer {
    start: [usize; MAX_INTERNALS],
    end: [usize; MAX_INTERNALS],
    len: usize,
    next: Option<[usize; MAX_INTERNALS]>,
}

impl Odometer {
    /// Creates an odometer over up to [`MAX_INTERNALS`] ranges.
    ///
    /// Ranges beyond the first [`MAX_INTERNALS`] are ignored. With no ranges
    /// the odometer yields one empty combination; with any empty range it
    /// yields nothing.
    #[must_use]
    pub fn new(ranges: impl IntoIterator<Item = std::ops::Range<usize>>) -> Self {
        let mut start = [0; MAX_INTERNALS];
        let mut end = [0; MAX_INTERNALS];
        let mut len = 0;
        let mut empty = false;
        for (i, r) in ranges.into_iter().take(MAX_INTERNALS).enumerate() {
            empty |= r.is_empty();
            start[i] = r.start;
            end[i] = r.end;
            len = i + 1;
        }
        Self {
            start,
            end,
            len,
            next: (!empty).then_some(start),
        }
    }
}

impl Iterator for Odometer {
    type Item = [usize; MAX_INTERNALS];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let mut advanced = current;
        for i in (0..self.len).rev() {
            advanced[i] += 1;
            if advanced[i] < self.end[i] {
                self.next = Some(advanced);
                return Some(current);
            }
            advanced[i] = self.start[i];
        }
        self.next = None;
        Some(current)
    }
}

/// Component assignment of the propagator legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Legs {
    /// Position of each component in the enumerated component set.
    pub ordinals: [usize; MAX_LEGS],
    /// Component values used in tensor lookups.
    pub components: [usize; MAX_LEGS],
    /// Number of legs in use.
    pub len: usize,
}

impl Legs {
    /// Ordinals of the legs in use.
    #[must_use]
    pub fn ordinals(&self) -> &[usize] {
        &self.ordinals[..self.len]
    }

    /// Components of the legs in use.
    #[must_use]
    pub fn components(&self) -> &[usize] {
        &self.components[..self.len]
    }
}

/// One nonvanishing product of a pattern under one assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    /// Index of the product within the pattern.
    pub product: usize,
    /// Normalized coefficient.
    pub phase: Phase,
    /// Leg assignment the term was generated under.
    pub legs: Legs,
    /// Full index assignment.
    pub tuple: IndexTuple,
}

/// Counts gathered while evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationStats {
    /// Assignments enumerated.
    pub candidates: usize,
    /// Assignments rejected by the reduced-rotation rule.
    pub filtered: usize,
    /// Products that vanished.
    pub dropped: usize,
    /// Terms emitted.
    pub terms: usize,
}

impl EvaluationStats {
    /// Adds `other` into `self`.
    pub fn merge(&mut self, other: EvaluationStats) {
        self.candidates += other.candidates;
        self.filtered += other.filtered;
        self.dropped += other.dropped;
        self.terms += other.terms;
    }
}

/// Checks that a pattern only references indices it declares.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedPattern`] naming the first violation.
pub fn check_pattern(pattern: &ContractionPattern) -> Result<()> {
    let malformed = |reason: String| GenerationError::MalformedPattern {
        channel: pattern.channel,
        reason,
    };
    if pattern.legs.len() > MAX_LEGS {
        return Err(malformed(format!(
            "{} legs declared, at most {MAX_LEGS} supported",
            pattern.legs.len()
        )));
    }
    if pattern.internals.len() > MAX_INTERNALS {
        return Err(malformed(format!(
            "{} internal indices declared, at most {MAX_INTERNALS} supported",
            pattern.internals.len()
        )));
    }
    if let Some(internal) = pattern.internals.iter().find(|i| i.start >= RANK) {
        return Err(malformed(format!(
            "internal index {} starts at {}, outside [0,{RANK})",
            internal.name, internal.start
        )));
    }
    if pattern.products.is_empty() {
        return Err(malformed("no products declared".to_owned()));
    }
    for slot in pattern.slots() {
        match slot {
            Slot::Leg(n) if n >= pattern.legs.len() => {
                return Err(malformed(format!(
                    "leg {n} referenced, {} declared",
                    pattern.legs.len()
                )));
            }
            Slot::Internal(n) if n >= pattern.internals.len() => {
                return Err(malformed(format!(
                    "internal index {n} referenced, {} declared",
                    pattern.internals.len()
                )));
            }
            _ => {}
        }
    }
    if let Grouping::Internals(x, y) = pattern.grouping {
        if x.max(y) >= pattern.internals.len() {
            return Err(malformed(format!(
                "grouping by internal indices ({x},{y}), {} declared",
                pattern.internals.len()
            )));
        }
    }
    Ok(())
}

/// Evaluates one pattern under one symmetry configuration.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    pattern: &'a ContractionPattern,
    symmetry: Symmetry,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator after checking the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedPattern`] if the pattern fails
    /// [`check_pattern`].
    pub fn new(pattern: &'a ContractionPattern, symmetry: Symmetry) -> Result<Self> {
        check_pattern(pattern)?;
        Ok(Self { pattern, symmetry })
    }

    /// The evaluated pattern.
    #[must_use]
    pub fn pattern(&self) -> &'a ContractionPattern {
        self.pattern
    }

    /// The active symmetry configuration.
    #[must_use]
    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Every leg assignment in enumeration order, leg 0 outermost.
    pub fn leg_assignments(&self) -> impl Iterator<Item = Legs> {
        let components = self.symmetry.components();
        let len = self.pattern.legs.len();
        Odometer::new((0..len).map(|_| 0..components.len())).map(move |ordinals| {
            let mut legs = Legs {
                len,
                ..Legs::default()
            };
            for i in 0..len {
                legs.ordinals[i] = ordinals[i];
                legs.components[i] = components[ordinals[i]];
            }
            legs
        })
    }

    /// Whether the reduced-rotation rule admits every restricted pair.
    #[must_use]
    pub fn permits(&self, tuple: &IndexTuple) -> bool {
        !self.symmetry.reduced_rotation
            || self
                .pattern
                .restricted_pairs
                .iter()
                .all(|&(x, y)| self.symmetry.permits_pair(tuple.value(x), tuple.value(y)))
    }

    /// The phase-convention factor shared by every product.
    #[must_use]
    pub fn extra_factor(&self, tuple: &IndexTuple) -> Coefficient {
        self.pattern.factors.iter().fold(ONE, |acc, factor| {
            let v = |s: Slot| tuple.value(s);
            match *factor {
                Factor::Mixed(x, y, c) if (v(x) == 0) != (v(y) == 0) => acc * c,
                Factor::Identity(x, c) if v(x) == 0 => acc * c,
                Factor::Differ(x, y, c) if v(x) != v(y) => acc * c,
                Factor::Delta(x, y) if v(x) != v(y) => ZERO,
                Factor::Constant(c) => acc * c,
                _ => acc,
            }
        })
    }

    /// Checks that the free indices, and every index the pattern reads from
    /// `tuple`, are below [`RANK`].
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] naming the first out-of-range slot.
    pub fn check_tuple(&self, tuple: &IndexTuple) -> Result<()> {
        let mut slots = [Slot::Mu, Slot::Nu].into_iter().chain(self.pattern.slots());
        match slots.find(|&s| tuple.value(s) >= RANK) {
            Some(slot) => Err(GenerationError::Config(format!(
                "{}: index {slot:?} is {}, outside [0,{RANK})",
                self.pattern.channel,
                tuple.value(slot)
            ))),
            None => Ok(()),
        }
    }

    /// The raw coefficient of product `product` under `tuple`.
    ///
    /// Assignments rejected by the symmetry filter, and out-of-range product
    /// positions, yield zero.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if an index the pattern reads is
    /// outside `[0,4)`.
    pub fn coefficient(&self, tuple: &IndexTuple, product: usize) -> Result<Coefficient> {
        self.check_tuple(tuple)?;
        let Some(p) = self.pattern.products.get(product) else {
            return Ok(ZERO);
        };
        if !self.permits(tuple) {
            return Ok(ZERO);
        }
        Ok(p.lookups.iter().fold(self.extra_factor(tuple), |acc, l| {
            acc * table::lookup(tuple.value(l[0]), tuple.value(l[1]), tuple.value(l[2]))
        }))
    }

    /// Enumerates every internal assignment for fixed free indices and legs,
    /// returning the nonvanishing terms in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if `mu`, `nu` or a leg component is
    /// outside `[0,4)`, and [`GenerationError::CoefficientOutOfRange`] if a
    /// product leaves the admissible set.
    pub fn terms(&self, mu: usize, nu: usize, legs: &Legs) -> Result<(Vec<Term>, EvaluationStats)> {
        let mut out = Vec::new();
        let mut stats = EvaluationStats::default();
        let mut tuple = IndexTuple::with_free(mu, nu);
        tuple.legs = legs.components;
        self.check_tuple(&tuple)?;
        let ranges = self.pattern.internals.iter().map(|i| i.start..RANK);
        for internals in Odometer::new(ranges) {
            stats.candidates += 1;
            tuple.internals = internals;
            if !self.permits(&tuple) {
                stats.filtered += 1;
                continue;
            }
            let extra = self.extra_factor(&tuple);
            for (index, product) in self.pattern.products.iter().enumerate() {
                let value = product.lookups.iter().fold(extra, |acc, l| {
                    acc * table::lookup(tuple.value(l[0]), tuple.value(l[1]), tuple.value(l[2]))
                });
                match normalize(self.pattern.channel, value)? {
                    Some(phase) => {
                        stats.terms += 1;
                        out.push(Term {
                            product: index,
                            phase,
                            legs: *legs,
                            tuple,
                        });
                    }
                    None => stats.dropped += 1,
                }
            }
        }
        Ok((out, stats))
    }
}
