//! SampleDrop prunes a labeled in-memory dataset class by class.
//!
//! Each class group is ordered either by a uniform shuffle or by a
//! precomputed per-sample utility score, and only a percentile band of that
//! order is kept. [`drop_samples`] applies the selection to images and labels
//! and rebuilds the class groups against the filtered positions.

pub mod apply;
pub mod config;
pub mod criterion;
pub mod group;
pub mod scores;
pub mod select;
pub mod tensor;
mod trace;
pub mod util;

pub use apply::{drop_samples, resolve_drop_ratio, DropOutcome, DropRequest, Dropper};
pub use config::{DropConfig, DEFAULT_CRITERION_ROOT};
pub use criterion::{DropCriterion, DropOrder};
pub use group::ClassGroups;
pub use scores::{score_file_path, UtilityScores};
pub use select::{
    ranked_group, sample_indices_to_drop, select_by_scores, select_random,
    select_with_criterion, shuffled_group, KeepBand,
};
pub use tensor::{Device, DeviceCache, Image, ImageStack, LabelTensor, NoopCache, SampleShape};
pub use util::{SampleDropError, SampleDropResult};
