use exercise::{
    ExerciseError, Keypoint, PoseObservation, PoseRecord, PoseSource, Predictor, PredictorConfig,
    RecordedPoseSource,
};

#[test]
fn test_null_line_is_no_body() {
    let mut source = RecordedPoseSource::new();
    assert_eq!(source.extract_pose("null").unwrap(), None);
    assert_eq!(source.frames_read(), 1);
}

#[test]
fn test_record_line_is_parsed() {
    let mut source = RecordedPoseSource::new();
    let pose = source
        .extract_pose(r#"{"confidence": 0.8, "keypoints": [[0.1, 0.2, 0.9], [0.3, 0.4, 0.5]]}"#)
        .unwrap()
        .unwrap();

    assert_eq!(pose.confidence, 0.8);
    assert_eq!(
        pose.keypoints,
        vec![Keypoint::new(0.1, 0.2, 0.9), Keypoint::new(0.3, 0.4, 0.5)]
    );
}

#[test]
fn test_garbage_line_is_extraction_error() {
    let mut source = RecordedPoseSource::new();
    source.extract_pose("null").unwrap();
    match source.extract_pose("{not json") {
        Err(ExerciseError::PoseExtraction(msg)) => assert!(msg.starts_with("frame 2")),
        other => panic!("expected PoseExtraction, got {:?}", other),
    }
}

#[test]
fn test_record_roundtrip_through_observation() {
    let observation = PoseObservation::new(vec![Keypoint::new(0.5, 0.25, 1.0)], 0.75);
    let line = serde_json::to_string(&PoseRecord::from(&observation)).unwrap();

    let mut source = RecordedPoseSource::new();
    assert_eq!(source.extract_pose(&line).unwrap(), Some(observation));
}

#[test]
fn test_replay_into_predictor() {
    let config = PredictorConfig::default()
        .with_window_size(4)
        .with_eviction_batch_size(2)
        .with_keypoint_count(1);
    let classifier = |input: &base::Tensor<f32>| -> exercise::Result<exercise::Classification> {
        assert_eq!(input.shape, vec![4, 3, 1]);
        exercise::Classification::from_scores(&["rest".to_string()], &[1.0], false)
    };
    let mut predictor = Predictor::new(config, RecordedPoseSource::new(), classifier).unwrap();

    let lines = [
        r#"{"confidence": 0.9, "keypoints": [[0.1, 0.1, 1.0]]}"#,
        "null",
        r#"{"confidence": 0.2, "keypoints": [[0.1, 0.1, 1.0]]}"#,
        r#"{"confidence": 0.9, "keypoints": [[0.2, 0.2, 1.0]]}"#,
        r#"{"confidence": 0.9, "keypoints": [[0.3, 0.3, 1.0]]}"#,
        r#"{"confidence": 0.9, "keypoints": [[0.4, 0.4, 1.0]]}"#,
    ];
    for line in lines {
        predictor.submit_frame(line).unwrap();
    }

    assert_eq!(predictor.source().frames_read(), 6);
    assert_eq!(predictor.window().len(), 4);
    let prediction = predictor.predict().unwrap().unwrap();
    assert_eq!(prediction.label, "rest");
    assert_eq!(prediction.confidence, 1.0);
}
