//! Applying a drop selection to a labeled dataset.
//!
//! The applier always keeps the upper `keep_ratio` of each class order and
//! drops the lower `drop_ratio`: both the shuffled and the score-ranked
//! orders place unwanted samples on the left. Surviving samples keep their
//! relative order and class groups are rebuilt against the new positions.

use crate::config::DropConfig;
use crate::criterion::DropCriterion;
use crate::group::ClassGroups;
use crate::select::{select_with_criterion, KeepBand};
use crate::tensor::{DeviceCache, Image, ImageStack, LabelTensor, NoopCache};
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::math::in_unit_interval;
use crate::util::{SampleDropError, SampleDropResult};
use rand::Rng;
use std::collections::BTreeSet;

/// Resolves the drop ratio from exactly one of `drop_ratio` or `keep_ratio`.
pub fn resolve_drop_ratio(
    drop_ratio: Option<f64>,
    keep_ratio: Option<f64>,
) -> SampleDropResult<f64> {
    let value = match (drop_ratio, keep_ratio) {
        (Some(drop), None) => drop,
        (None, Some(keep)) => 1.0 - keep,
        _ => {
            return Err(SampleDropError::RatioConflict {
                drop_ratio,
                keep_ratio,
            })
        }
    };
    if !in_unit_interval(value) {
        return Err(SampleDropError::RatioOutOfRange { value });
    }
    Ok(value)
}

/// What to drop and how much.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropRequest<'a> {
    /// Dataset name, used to locate score files.
    pub dataset: &'a str,
    /// `random`/`rand` or `{indicator}_{small|large}`.
    pub criterion: &'a str,
    /// Fraction of each class to drop.
    pub drop_ratio: Option<f64>,
    /// Fraction of each class to keep.
    pub keep_ratio: Option<f64>,
}

impl<'a> DropRequest<'a> {
    /// Drops `drop_ratio` of each class.
    pub fn drop(dataset: &'a str, criterion: &'a str, drop_ratio: f64) -> Self {
        Self {
            dataset,
            criterion,
            drop_ratio: Some(drop_ratio),
            keep_ratio: None,
        }
    }

    /// Keeps `keep_ratio` of each class.
    pub fn keep(dataset: &'a str, criterion: &'a str, keep_ratio: f64) -> Self {
        Self {
            dataset,
            criterion,
            drop_ratio: None,
            keep_ratio: Some(keep_ratio),
        }
    }
}

/// Filtered dataset produced by [`drop_samples`].
#[derive(Clone, Debug, PartialEq)]
pub struct DropOutcome<T> {
    /// Surviving images stacked in original relative order.
    pub images: ImageStack<T>,
    /// Surviving labels, on the same device as `images`.
    pub labels: LabelTensor,
    /// Class groups indexing into the filtered arrays.
    pub classes: ClassGroups,
    /// Original indices that were removed.
    pub dropped: BTreeSet<usize>,
}

impl<T> DropOutcome<T> {
    /// Number of surviving samples.
    pub fn remaining(&self) -> usize {
        self.images.len()
    }
}

/// Drop runner bundling configuration and a device cache hook.
pub struct Dropper {
    config: DropConfig,
    cache: Box<dyn DeviceCache>,
}

impl Default for Dropper {
    fn default() -> Self {
        Self::new()
    }
}

impl Dropper {
    /// Creates a runner with default configuration and no cache hook.
    pub fn new() -> Self {
        Self {
            config: DropConfig::default(),
            cache: Box::new(NoopCache),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: DropConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs the hook called after filtering to release device memory.
    pub fn with_cache<C: DeviceCache + 'static>(mut self, cache: C) -> Self {
        self.cache = Box::new(cache);
        self
    }

    /// Filters the dataset; see [`drop_samples`].
    pub fn drop_samples<T, R: Rng + ?Sized>(
        &self,
        images: Vec<Image<T>>,
        labels: &[usize],
        classes: &ClassGroups,
        request: &DropRequest<'_>,
        rng: &mut R,
    ) -> SampleDropResult<DropOutcome<T>> {
        let drop_ratio = resolve_drop_ratio(request.drop_ratio, request.keep_ratio)?;
        let _span = trace_span!(
            "drop_samples",
            dataset = request.dataset,
            criterion = request.criterion,
            drop_ratio = drop_ratio
        )
        .entered();

        if images.len() != labels.len() {
            return Err(SampleDropError::LengthMismatch {
                images: images.len(),
                labels: labels.len(),
            });
        }
        let first = images.first().ok_or(SampleDropError::EmptyDataset)?;
        let shape = first.shape();
        let device = first.device();
        let num_classes = classes.num_classes();
        if let Some(&label) = labels.iter().find(|&&label| label >= num_classes) {
            return Err(SampleDropError::LabelOutOfRange { label, num_classes });
        }
        classes.check_bounds(images.len())?;

        let criterion = request.criterion.parse::<DropCriterion>()?;
        let band = KeepBand::upper(drop_ratio)?;
        let dropped = select_with_criterion(
            request.dataset,
            &criterion,
            classes,
            band,
            rng,
            &self.config,
        )?;

        let original = images.len();
        let (kept_images, kept_labels): (Vec<Image<T>>, Vec<usize>) = images
            .into_iter()
            .zip(labels.iter().copied())
            .enumerate()
            .filter(|(idx, _)| !dropped.contains(idx))
            .map(|(_, pair)| pair)
            .unzip();
        trace_event!(
            "drop.remaining",
            original = original,
            remaining = kept_images.len()
        );

        let rebuilt = ClassGroups::from_labels(&kept_labels, num_classes)?;
        for (class, group) in rebuilt.iter().enumerate() {
            trace_debug!("drop.class_remaining", class = class, remaining = group.len());
        }

        let images = if kept_images.is_empty() {
            ImageStack::empty(shape, device)
        } else {
            ImageStack::stack(kept_images)?
        };
        let labels = LabelTensor::new(&kept_labels, images.device());
        self.cache.release_unused(images.device());

        Ok(DropOutcome {
            images,
            labels,
            classes: rebuilt,
            dropped,
        })
    }
}

/// Drops `drop_ratio` (or keeps `keep_ratio`) of every class and rebuilds
/// the class groups against the filtered dataset.
///
/// Exactly one ratio must be set and the resulting drop ratio must lie in
/// `[0, 1]`. Group indices must address `images`, and every label must have
/// a group. Dropping everything yields an empty stack that keeps the input
/// sample shape and device.
pub fn drop_samples<T, R: Rng + ?Sized>(
    images: Vec<Image<T>>,
    labels: &[usize],
    classes: &ClassGroups,
    request: &DropRequest<'_>,
    rng: &mut R,
    config: &DropConfig,
) -> SampleDropResult<DropOutcome<T>> {
    Dropper::new()
        .with_config(config.clone())
        .drop_samples(images, labels, classes, request, rng)
}

#[cfg(test)]
mod tests {
    use super::resolve_drop_ratio;
    use crate::util::SampleDropError;

    #[test]
    fn resolve_prefers_the_given_ratio() {
        assert_eq!(resolve_drop_ratio(Some(0.3), None), Ok(0.3));
        let drop = resolve_drop_ratio(None, Some(0.75)).unwrap();
        assert!((drop - 0.25).abs() < 1e-12);
    }

    #[test]
    fn resolve_rejects_both_or_neither() {
        assert_eq!(
            resolve_drop_ratio(Some(0.1), Some(0.9)),
            Err(SampleDropError::RatioConflict {
                drop_ratio: Some(0.1),
                keep_ratio: Some(0.9),
            })
        );
        assert_eq!(
            resolve_drop_ratio(None, None),
            Err(SampleDropError::RatioConflict {
                drop_ratio: None,
                keep_ratio: None,
            })
        );
    }

    #[test]
    fn resolve_rejects_out_of_range() {
        assert_eq!(
            resolve_drop_ratio(Some(1.5), None),
            Err(SampleDropError::RatioOutOfRange { value: 1.5 })
        );
        assert_eq!(
            resolve_drop_ratio(None, Some(-0.5)),
            Err(SampleDropError::RatioOutOfRange { value: 1.5 })
        );
    }
}
