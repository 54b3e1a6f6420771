use std::{collections::HashMap, sync::Arc};

use tracing::trace;

use crate::{
    boundary::BoundaryCondition,
    config::{ExtrapolationPolicy, SplineConfig},
    error::SplineError,
    knot::Knot,
    spline::Spline,
};

/// Exact content key of a spline build: bit patterns of every knot coordinate,
/// the degree, the boundary condition and the config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SplineFingerprint {
    knots: Vec<(u64, u64)>,
    degree: usize,
    boundary: (u8, u64, u64),
    config: (u8, u64, u64, usize),
}

impl SplineFingerprint {
    pub fn new(knots: &[Knot], degree: usize, boundary: &BoundaryCondition, config: &SplineConfig) -> Self {
        let boundary = match *boundary {
            BoundaryCondition::Natural => (0, 0, 0),
            BoundaryCondition::Clamped { left, right } => (1, left.to_bits(), right.to_bits()),
            BoundaryCondition::NotAKnot => (2, 0, 0),
            BoundaryCondition::Periodic => (3, 0, 0),
        };
        let extrapolation = match config.extrapolation {
            ExtrapolationPolicy::Reject => 0,
            ExtrapolationPolicy::Clamp => 1,
            ExtrapolationPolicy::Linear => 2,
        };
        SplineFingerprint {
            knots: knots.iter().map(|k| (k.x.to_bits(), k.y.to_bits())).collect(),
            degree,
            boundary,
            config: (
                extrapolation,
                config.tolerance.to_bits(),
                config.pivot_tolerance.to_bits(),
                config.max_unknowns,
            ),
        }
    }
}

/// Memoises built splines by [SplineFingerprint].
///
/// The cache owns no global state: callers create it, and wrap it in a lock
/// themselves when it is shared between threads.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use poly_spline::{BoundaryCondition, Knot, SplineCache, SplineConfig};
///
/// let knots = [Knot::new(0.0, 1.0), Knot::new(1.0, 3.0), Knot::new(2.0, 2.0)];
/// let config = SplineConfig::default();
/// let mut cache = SplineCache::new();
///
/// let first = cache.get_or_build(&knots, 3, BoundaryCondition::Natural, &config).unwrap();
/// let second = cache.get_or_build(&knots, 3, BoundaryCondition::Natural, &config).unwrap();
///
/// assert!(Arc::ptr_eq(&first, &second));
/// assert_eq!(1, cache.hits());
/// ```
#[derive(Debug, Default)]
pub struct SplineCache {
    entries: HashMap<SplineFingerprint, Arc<Spline>>,
    hits: u64,
    misses: u64,
}

impl SplineCache {
    pub fn new() -> Self {
        SplineCache::default()
    }

    /// Returns the cached spline for equal content, otherwise builds and stores it.
    /// Failed builds are not stored.
    pub fn get_or_build(
        &mut self,
        knots: &[Knot],
        degree: usize,
        boundary: BoundaryCondition,
        config: &SplineConfig,
    ) -> Result<Arc<Spline>, SplineError> {
        let fingerprint = SplineFingerprint::new(knots, degree, &boundary, config);

        if let Some(spline) = self.entries.get(&fingerprint) {
            self.hits += 1;
            trace!(knots = knots.len(), degree, "spline cache hit");
            return Ok(Arc::clone(spline));
        }

        self.misses += 1;
        trace!(knots = knots.len(), degree, "spline cache miss");
        let spline = Arc::new(Spline::with_config(knots.to_vec(), degree, boundary, *config)?);
        self.entries.insert(fingerprint, Arc::clone(&spline));
        Ok(spline)
    }

    pub fn get(&self, fingerprint: &SplineFingerprint) -> Option<Arc<Spline>> {
        self.entries.get(fingerprint).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
