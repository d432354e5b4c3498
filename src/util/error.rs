//! Error types for sampledrop.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for sampledrop operations.
pub type SampleDropResult<T> = std::result::Result<T, SampleDropError>;

/// Errors that can occur while selecting or dropping samples.
#[derive(Debug, Error, PartialEq)]
pub enum SampleDropError {
    /// The criterion is neither `random`/`rand` nor `{indicator}_{order}`.
    #[error("malformed drop criterion: {criterion}")]
    MalformedCriterion { criterion: String },
    /// The order half of a criterion is not `small` or `large`.
    #[error("drop order must be `small` or `large`, got {order}")]
    InvalidDropOrder { order: String },
    /// The precomputed score file does not exist.
    #[error("score file not found: {}", path.display())]
    ScoreFileMissing { path: PathBuf },
    /// The score file exists but could not be read.
    #[error("failed to read score file {}: {reason}", path.display())]
    ScoreFileRead { path: PathBuf, reason: String },
    /// The score file is not a JSON array of numbers.
    #[error("failed to parse score file {}: {reason}", path.display())]
    ScoreFileParse { path: PathBuf, reason: String },
    /// A class group references a sample that has no score.
    #[error("no utility score for sample {index}")]
    MissingScore { index: usize },
    /// Both or neither of the ratios were supplied.
    #[error(
        "only one of drop_ratio ({drop_ratio:?}) and keep_ratio ({keep_ratio:?}) should be specified"
    )]
    RatioConflict {
        drop_ratio: Option<f64>,
        keep_ratio: Option<f64>,
    },
    /// The resolved drop ratio lies outside `[0, 1]`.
    #[error("drop ratio must lie in [0, 1], got {value}")]
    RatioOutOfRange { value: f64 },
    /// Percentile bounds violate `0 <= from <= to <= 1`.
    #[error("invalid keep percentile band [{from}, {to})")]
    InvalidPercentileBand { from: f64, to: f64 },
    /// Images and labels are not aligned.
    #[error("image count {images} does not match label count {labels}")]
    LengthMismatch { images: usize, labels: usize },
    /// A label has no class group.
    #[error("label {label} out of range for {num_classes} classes")]
    LabelOutOfRange { label: usize, num_classes: usize },
    /// An index exceeds the bounds of the referenced collection.
    #[error("{context} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// Sample dimensions are zero or overflow.
    #[error("invalid sample dimensions {channels}x{height}x{width}")]
    InvalidDimensions {
        channels: usize,
        height: usize,
        width: usize,
    },
    /// A sample buffer does not match its declared shape.
    #[error("buffer length mismatch: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Samples in one stack disagree on shape.
    #[error("sample {index} has a different shape than sample 0")]
    ShapeMismatch { index: usize },
    /// Samples in one stack live on different devices.
    #[error("sample {index} lives on a different device than sample 0")]
    DeviceMismatch { index: usize },
    /// The dataset has no samples.
    #[error("dataset has no samples")]
    EmptyDataset,
}
