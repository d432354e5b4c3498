use sampledrop::{
    ClassGroups, Device, DropConfig, DropCriterion, DropOrder, Image, ImageStack, LabelTensor,
    SampleDropError, SampleShape, UtilityScores,
};
use std::collections::BTreeMap;

#[test]
fn sample_shape_rejects_zero_dimensions() {
    let err = SampleShape::new(3, 0, 4).err().unwrap();
    assert_eq!(
        err,
        SampleDropError::InvalidDimensions {
            channels: 3,
            height: 0,
            width: 4,
        }
    );
    let shape = SampleShape::new(3, 2, 4).unwrap();
    assert_eq!(shape.numel(), 24);
    assert_eq!((shape.channels(), shape.height(), shape.width()), (3, 2, 4));
}

#[test]
fn sample_shape_rejects_overflowing_dimensions() {
    let err = SampleShape::new(usize::MAX, 2, 1).err().unwrap();
    assert_eq!(
        err,
        SampleDropError::InvalidDimensions {
            channels: usize::MAX,
            height: 2,
            width: 1,
        }
    );
}

#[test]
fn image_exposes_its_buffer() {
    let shape = SampleShape::new(1, 1, 3).unwrap();
    let image = Image::new(vec![7u8, 8, 9], shape).unwrap();
    assert_eq!(image.data(), &[7u8, 8, 9]);
    assert_eq!(image.shape(), shape);
}

#[test]
fn class_groups_into_inner_returns_raw_lists() {
    let groups = ClassGroups::from_labels(&[1, 0, 1], 2).unwrap();
    assert_eq!(groups.into_inner(), vec![vec![1], vec![0, 2]]);
}

#[test]
fn image_rejects_wrong_buffer_length() {
    let shape = SampleShape::new(1, 2, 2).unwrap();
    let err = Image::new(vec![0u8; 3], shape).err().unwrap();
    assert_eq!(err, SampleDropError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn stack_concatenates_samples_in_order() {
    let shape = SampleShape::new(1, 1, 2).unwrap();
    let images = vec![
        Image::new(vec![1u8, 2], shape).unwrap(),
        Image::new(vec![3u8, 4], shape).unwrap(),
        Image::new(vec![5u8, 6], shape).unwrap(),
    ];
    let stack = ImageStack::stack(images).unwrap();

    assert_eq!(stack.dims(), [3, 1, 1, 2]);
    assert_eq!(stack.as_slice(), &[1u8, 2, 3, 4, 5, 6]);
    assert_eq!(stack.sample(1), Some(&[3u8, 4][..]));
    assert!(stack.sample(3).is_none());
    assert_eq!(stack.device(), Device::Cpu);
}

#[test]
fn stack_rejects_mixed_shapes_and_devices() {
    let a = SampleShape::new(1, 1, 2).unwrap();
    let b = SampleShape::new(2, 1, 1).unwrap();

    let err = ImageStack::stack(vec![
        Image::new(vec![0u8, 0], a).unwrap(),
        Image::new(vec![0u8, 0], b).unwrap(),
    ])
    .err()
    .unwrap();
    assert_eq!(err, SampleDropError::ShapeMismatch { index: 1 });

    let err = ImageStack::stack(vec![
        Image::new(vec![0u8, 0], a).unwrap(),
        Image::new(vec![0u8, 0], a).unwrap(),
        Image::new(vec![0u8, 0], a).unwrap().on(Device::Accelerator(0)),
    ])
    .err()
    .unwrap();
    assert_eq!(err, SampleDropError::DeviceMismatch { index: 2 });

    let err = ImageStack::<u8>::stack(Vec::new()).err().unwrap();
    assert_eq!(err, SampleDropError::EmptyDataset);
}

#[test]
fn label_tensor_widens_to_i64() {
    let labels = LabelTensor::new(&[2, 0, 1], Device::Accelerator(3));
    assert_eq!(labels.as_slice(), &[2i64, 0, 1]);
    assert_eq!(labels.device(), Device::Accelerator(3));
}

#[test]
fn scores_from_map_reflect_explicit_keys() {
    let map = BTreeMap::from([(4usize, 0.5f64), (9, -1.0)]);
    let scores = UtilityScores::from_map(map);
    assert_eq!(scores.len(), 2);
    assert_eq!(scores.get(9), Some(-1.0));
    assert_eq!(scores.score(0), Err(SampleDropError::MissingScore { index: 0 }));
}

#[test]
fn criterion_display_round_trips_through_parse() {
    let criterion = DropCriterion::score("Forgetting", DropOrder::Large);
    let parsed: DropCriterion = criterion.to_string().parse().unwrap();
    assert_eq!(parsed, criterion);
    assert!("random".parse::<DropCriterion>().unwrap().is_random());
}

#[test]
fn config_loads_from_json() {
    let cfg = DropConfig::from_json_str(r#"{"criterion_root": "scores"}"#).unwrap();
    assert_eq!(cfg.criterion_root().to_str(), Some("scores"));
}
