//! Per-class sample index groups.

use crate::util::{SampleDropError, SampleDropResult};

/// Sample indices grouped by class id `0..num_classes`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassGroups {
    groups: Vec<Vec<usize>>,
}

impl ClassGroups {
    /// Wraps per-class index lists; list `c` holds the samples of class `c`.
    pub fn new(groups: Vec<Vec<usize>>) -> Self {
        Self { groups }
    }

    /// Creates `num_classes` empty groups.
    pub fn with_classes(num_classes: usize) -> Self {
        Self {
            groups: vec![Vec::new(); num_classes],
        }
    }

    /// Groups positions of `labels` by label value.
    ///
    /// Each group lists positions in ascending order. A label without a
    /// group is an error.
    pub fn from_labels(labels: &[usize], num_classes: usize) -> SampleDropResult<Self> {
        let mut out = Self::with_classes(num_classes);
        for (idx, &label) in labels.iter().enumerate() {
            let group = out
                .groups
                .get_mut(label)
                .ok_or(SampleDropError::LabelOutOfRange { label, num_classes })?;
            group.push(idx);
        }
        Ok(out)
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.groups.len()
    }

    /// Indices of class `class`.
    pub fn class(&self, class: usize) -> Option<&[usize]> {
        self.groups.get(class).map(Vec::as_slice)
    }

    /// Iterates groups in class order.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(Vec::as_slice)
    }

    /// Total number of indices across all classes.
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Sizes of each group in class order.
    pub fn class_sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Vec::len).collect()
    }

    /// Fails if any index is not below `len`.
    pub(crate) fn check_bounds(&self, len: usize) -> SampleDropResult<()> {
        for &index in self.groups.iter().flatten() {
            if index >= len {
                return Err(SampleDropError::IndexOutOfBounds {
                    index,
                    len,
                    context: "class group",
                });
            }
        }
        Ok(())
    }

    /// Consumes the wrapper, returning the raw groups.
    pub fn into_inner(self) -> Vec<Vec<usize>> {
        self.groups
    }
}

impl From<Vec<Vec<usize>>> for ClassGroups {
    fn from(groups: Vec<Vec<usize>>) -> Self {
        Self::new(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::ClassGroups;
    use crate::util::SampleDropError;

    #[test]
    fn from_labels_groups_positions() {
        let groups = ClassGroups::from_labels(&[1, 0, 1, 2, 0], 3).unwrap();
        assert_eq!(groups.class(0), Some(&[1usize, 4][..]));
        assert_eq!(groups.class(1), Some(&[0usize, 2][..]));
        assert_eq!(groups.class(2), Some(&[3usize][..]));
        assert_eq!(groups.total_len(), 5);
    }

    #[test]
    fn from_labels_keeps_empty_classes() {
        let groups = ClassGroups::from_labels(&[0, 0], 3).unwrap();
        assert_eq!(groups.class_sizes(), vec![2, 0, 0]);
    }

    #[test]
    fn from_labels_rejects_unknown_label() {
        assert_eq!(
            ClassGroups::from_labels(&[0, 3], 2),
            Err(SampleDropError::LabelOutOfRange {
                label: 3,
                num_classes: 2,
            })
        );
    }

    #[test]
    fn check_bounds_reports_first_offender() {
        let groups = ClassGroups::new(vec![vec![0, 4], vec![1]]);
        assert!(groups.check_bounds(5).is_ok());
        assert_eq!(
            groups.check_bounds(4),
            Err(SampleDropError::IndexOutOfBounds {
                index: 4,
                len: 4,
                context: "class group",
            })
        );
    }
}
