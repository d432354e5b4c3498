//! Selection of samples to drop.
//!
//! Each class group is put in an order where unwanted samples come first:
//! a uniform shuffle for the random criterion, ascending utility score for
//! score criteria (scores are negated for `large` so the same left-side cut
//! serves both orders). Positions outside the keep band `[from, to)` of that
//! order are dropped.
//!
//! Equal scores keep their relative group order (stable sort). Which of
//! several tied samples straddling the cut survives is therefore
//! deterministic but otherwise unspecified. NaN scores rank after every
//! number regardless of drop order.

use crate::config::DropConfig;
use crate::criterion::DropCriterion;
use crate::group::ClassGroups;
use crate::scores::UtilityScores;
use crate::trace::{trace_event, trace_span};
use crate::util::math::{in_unit_interval, percentile_pos};
use crate::util::{SampleDropError, SampleDropResult};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Fraction band `[from, to)` of an ordered class group that is kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeepBand {
    from: f64,
    to: f64,
}

impl KeepBand {
    /// Creates a band; requires `0 <= from <= to <= 1`.
    pub fn new(from: f64, to: f64) -> SampleDropResult<Self> {
        if !in_unit_interval(from) || !in_unit_interval(to) || from > to {
            return Err(SampleDropError::InvalidPercentileBand { from, to });
        }
        Ok(Self { from, to })
    }

    /// Keeps the upper `1 - drop_ratio` of each group.
    pub fn upper(drop_ratio: f64) -> SampleDropResult<Self> {
        Self::new(drop_ratio, 1.0)
    }

    /// Lower bound of the band.
    pub fn keep_from(&self) -> f64 {
        self.from
    }

    /// Upper bound of the band.
    pub fn keep_to(&self) -> f64 {
        self.to
    }

    /// Kept position range `(keep_from, keep_to)` for a group of `len`.
    pub fn cut(&self, len: usize) -> (usize, usize) {
        (percentile_pos(self.from, len), percentile_pos(self.to, len))
    }

    /// Splits an ordered group into `(kept, dropped)`.
    pub fn split(&self, ordered: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let (keep_from, keep_to) = self.cut(ordered.len());
        let kept = ordered[keep_from..keep_to].to_vec();
        let dropped = ordered[..keep_from]
            .iter()
            .chain(&ordered[keep_to..])
            .copied()
            .collect();
        (kept, dropped)
    }
}

/// Returns a uniformly shuffled copy of `group`.
pub fn shuffled_group<R: Rng + ?Sized>(group: &[usize], rng: &mut R) -> Vec<usize> {
    let mut out = group.to_vec();
    out.shuffle(rng);
    out
}

/// Ascending score order with NaN ranked after every number.
fn score_cmp(a: f64, b: f64) -> Ordering {
    a.is_nan()
        .cmp(&b.is_nan())
        .then_with(|| a.total_cmp(&b))
}

/// Returns a copy of `group` sorted by ascending score.
///
/// NaN scores rank last for either drop order, so a lower cut never drops
/// them.
pub fn ranked_group(group: &[usize], scores: &UtilityScores) -> SampleDropResult<Vec<usize>> {
    let mut keyed = group
        .iter()
        .map(|&idx| scores.score(idx).map(|score| (score, idx)))
        .collect::<SampleDropResult<Vec<_>>>()?;
    keyed.sort_by(|a, b| score_cmp(a.0, b.0));
    Ok(keyed.into_iter().map(|(_, idx)| idx).collect())
}

/// Drops the band complement of every class after shuffling it.
pub fn select_random<R: Rng + ?Sized>(
    groups: &ClassGroups,
    band: KeepBand,
    rng: &mut R,
) -> BTreeSet<usize> {
    let mut dropped = BTreeSet::new();
    for group in groups.iter() {
        let order = shuffled_group(group, rng);
        dropped.extend(band.split(&order).1);
    }
    dropped
}

/// Drops the band complement of every class ranked by `scores`.
///
/// `scores` must already be oriented so that samples to drop rank lowest.
pub fn select_by_scores(
    groups: &ClassGroups,
    scores: &UtilityScores,
    band: KeepBand,
) -> SampleDropResult<BTreeSet<usize>> {
    let mut dropped = BTreeSet::new();
    for group in groups.iter() {
        let order = ranked_group(group, scores)?;
        dropped.extend(band.split(&order).1);
    }
    Ok(dropped)
}

/// Selects samples to drop for a parsed criterion.
///
/// Score criteria read `{criterion_root}/{dataset}_{indicator}.json`.
pub fn select_with_criterion<R: Rng + ?Sized>(
    dataset: &str,
    criterion: &DropCriterion,
    groups: &ClassGroups,
    band: KeepBand,
    rng: &mut R,
    config: &DropConfig,
) -> SampleDropResult<BTreeSet<usize>> {
    let _span = trace_span!("sample_indices_to_drop", dataset = dataset).entered();

    match criterion {
        DropCriterion::Random => {
            trace_event!("drop.random", classes = groups.num_classes());
            Ok(select_random(groups, band, rng))
        }
        DropCriterion::Score { indicator, order } => {
            trace_event!(
                "drop.score",
                indicator = indicator.as_str(),
                order = order.as_str()
            );
            let scores =
                UtilityScores::open(config.criterion_root(), dataset, indicator)?.oriented(*order);
            select_by_scores(groups, &scores, band)
        }
    }
}

/// Selects the global indices to drop, keeping band `[keep_from, keep_to)`
/// of each class.
///
/// `criterion` is `random`/`rand` or `{indicator}_{small|large}`.
pub fn sample_indices_to_drop<R: Rng + ?Sized>(
    dataset: &str,
    criterion: &str,
    groups: &ClassGroups,
    keep_percentile_from: f64,
    keep_percentile_to: f64,
    rng: &mut R,
    config: &DropConfig,
) -> SampleDropResult<BTreeSet<usize>> {
    let criterion = criterion.parse::<DropCriterion>()?;
    let band = KeepBand::new(keep_percentile_from, keep_percentile_to)?;
    select_with_criterion(dataset, &criterion, groups, band, rng, config)
}
