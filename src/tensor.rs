//! Sample images, stacked image tensors and label tensors.
//!
//! `Image` owns one sample as a contiguous `channels x height x width`
//! buffer tagged with the device it lives on. `ImageStack` is the batched
//! form with a leading sample dimension; all samples share shape and device.

use crate::util::{SampleDropError, SampleDropResult};

/// Where a tensor's memory lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Device {
    /// Host memory.
    #[default]
    Cpu,
    /// Accelerator memory identified by ordinal.
    Accelerator(usize),
}

/// Hook for releasing cached but unused device memory.
pub trait DeviceCache {
    /// Releases cached allocations on `device` that no tensor still uses.
    fn release_unused(&self, device: Device);
}

/// Cache hook that does nothing, for host-only pipelines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCache;

impl DeviceCache for NoopCache {
    fn release_unused(&self, _device: Device) {}
}

/// Per-sample tensor shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleShape {
    channels: usize,
    height: usize,
    width: usize,
}

impl SampleShape {
    /// Creates a shape, rejecting zero or overflowing dimensions.
    pub fn new(channels: usize, height: usize, width: usize) -> SampleDropResult<Self> {
        let shape = Self {
            channels,
            height,
            width,
        };
        match shape.checked_numel() {
            Some(n) if n > 0 => Ok(shape),
            _ => Err(SampleDropError::InvalidDimensions {
                channels,
                height,
                width,
            }),
        }
    }

    fn checked_numel(&self) -> Option<usize> {
        self.channels
            .checked_mul(self.height)?
            .checked_mul(self.width)
    }

    /// Channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of elements in one sample.
    pub fn numel(&self) -> usize {
        self.channels * self.height * self.width
    }
}

/// One owned sample image.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    data: Vec<T>,
    shape: SampleShape,
    device: Device,
}

impl<T> Image<T> {
    /// Creates a host image; `data` must hold exactly `shape.numel()` values.
    pub fn new(data: Vec<T>, shape: SampleShape) -> SampleDropResult<Self> {
        let needed = shape.numel();
        if data.len() != needed {
            return Err(SampleDropError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            shape,
            device: Device::Cpu,
        })
    }

    /// Tags the image with `device`.
    pub fn on(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Returns the sample shape.
    pub fn shape(&self) -> SampleShape {
        self.shape
    }

    /// Returns the device the image lives on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Returns the flat sample buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

/// Images stacked along a leading sample dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageStack<T> {
    data: Vec<T>,
    shape: SampleShape,
    len: usize,
    device: Device,
}

impl<T> ImageStack<T> {
    /// Stacks `images` into one tensor.
    ///
    /// Every image must match the first one's shape and device. Stacking
    /// nothing is an error because the sample shape would be unknown; use
    /// [`ImageStack::empty`] when the shape is known.
    pub fn stack(images: Vec<Image<T>>) -> SampleDropResult<Self> {
        let first = images.first().ok_or(SampleDropError::EmptyDataset)?;
        let shape = first.shape;
        let device = first.device;
        let len = images.len();

        let total = len
            .checked_mul(shape.numel())
            .ok_or(SampleDropError::InvalidDimensions {
                channels: shape.channels,
                height: shape.height,
                width: shape.width,
            })?;
        let mut data = Vec::with_capacity(total);
        for (index, image) in images.into_iter().enumerate() {
            if image.shape != shape {
                return Err(SampleDropError::ShapeMismatch { index });
            }
            if image.device != device {
                return Err(SampleDropError::DeviceMismatch { index });
            }
            data.extend(image.data);
        }

        Ok(Self {
            data,
            shape,
            len,
            device,
        })
    }

    /// A stack with zero samples of `shape` on `device`.
    pub fn empty(shape: SampleShape, device: Device) -> Self {
        Self {
            data: Vec::new(),
            shape,
            len: 0,
            device,
        }
    }

    /// Number of stacked samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the stack holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shape of one sample.
    pub fn sample_shape(&self) -> SampleShape {
        self.shape
    }

    /// Full tensor dimensions `[samples, channels, height, width]`.
    pub fn dims(&self) -> [usize; 4] {
        [
            self.len,
            self.shape.channels,
            self.shape.height,
            self.shape.width,
        ]
    }

    /// Device holding the stack.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Flat backing buffer in sample-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Buffer of sample `index`, if in bounds.
    pub fn sample(&self, index: usize) -> Option<&[T]> {
        if index >= self.len {
            return None;
        }
        let n = self.shape.numel();
        let start = index * n;
        self.data.get(start..start + n)
    }
}

/// Integer class labels on a device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTensor {
    data: Vec<i64>,
    device: Device,
}

impl LabelTensor {
    /// Converts `labels` to a label tensor on `device`.
    pub fn new(labels: &[usize], device: Device) -> Self {
        Self {
            data: labels.iter().map(|&label| label as i64).collect(),
            device,
        }
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no labels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Device holding the labels.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Label values in sample order.
    pub fn as_slice(&self) -> &[i64] {
        &self.data
    }
}
