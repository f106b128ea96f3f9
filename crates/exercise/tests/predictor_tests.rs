use {
    base::Tensor,
    exercise::{
        Classification, Classifier, ExerciseError, FramePolicy, Keypoint, PoseObservation,
        PoseSource, Predictor, PredictorConfig, Result,
    },
    std::collections::HashMap,
};

const LABELS: [&str; 3] = ["squat", "jumping_jack", "lunge"];

enum FakeFrame {
    Body(f32),
    Empty,
    Corrupt,
    Unreadable,
    BadKeypoints,
}

#[derive(Default)]
struct FakeSource {
    calls: usize,
}

impl PoseSource for FakeSource {
    type Frame = FakeFrame;

    fn extract_pose(&mut self, frame: &FakeFrame) -> Result<Option<PoseObservation>> {
        self.calls += 1;
        match frame {
            FakeFrame::Body(confidence) => Ok(Some(PoseObservation::new(
                vec![Keypoint::new(0.5, 0.5, 0.8); 18],
                *confidence,
            ))),
            FakeFrame::Empty => Ok(None),
            FakeFrame::Corrupt => Err(ExerciseError::PoseExtraction(
                "cannot decode frame".to_string(),
            )),
            FakeFrame::Unreadable => Err(ExerciseError::Io("device gone".to_string())),
            FakeFrame::BadKeypoints => Ok(Some(PoseObservation::new(
                vec![Keypoint::new(0.5, 0.5, 0.8); 5],
                0.9,
            ))),
        }
    }
}

struct FakeClassifier {
    calls: usize,
    fail: bool,
    shapes: Vec<Vec<usize>>,
}

impl FakeClassifier {
    fn new() -> Self {
        Self {
            calls: 0,
            fail: false,
            shapes: Vec::new(),
        }
    }
}

impl Classifier for FakeClassifier {
    fn classify(&mut self, input: &Tensor<f32>) -> Result<Classification> {
        self.calls += 1;
        self.shapes.push(input.shape.clone());
        if self.fail {
            return Err(ExerciseError::Classification("model crashed".to_string()));
        }
        let labels: Vec<String> = LABELS.iter().map(|l| l.to_string()).collect();
        Classification::from_scores(&labels, &[0.7, 0.2, 0.1], false)
    }
}

fn predictor() -> Predictor<FakeSource, FakeClassifier> {
    Predictor::new(
        PredictorConfig::default(),
        FakeSource::default(),
        FakeClassifier::new(),
    )
    .unwrap()
}

fn feed(predictor: &mut Predictor<FakeSource, FakeClassifier>, count: usize) {
    for _ in 0..count {
        predictor.submit_frame(&FakeFrame::Body(0.9)).unwrap();
    }
}

#[test]
fn test_ready_after_sixty_confident_frames() {
    let mut predictor = predictor();
    feed(&mut predictor, 59);
    assert!(!predictor.is_ready());
    assert_eq!(predictor.predict().unwrap(), None);
    assert_eq!(predictor.classifier().calls, 0);

    feed(&mut predictor, 1);
    assert!(predictor.is_ready());

    let prediction = predictor.predict().unwrap().unwrap();
    assert!(LABELS.contains(&prediction.label.as_str()));
    assert_eq!(prediction.label, "squat");
    assert!((0.0..=1.0).contains(&prediction.confidence));
    assert!((prediction.confidence - 0.7).abs() < 1e-6);
    assert_eq!(predictor.classifier().calls, 1);
    assert_eq!(predictor.classifier().shapes[0], vec![60, 3, 18]);
}

#[test]
fn test_each_predict_call_classifies_once() {
    let mut predictor = predictor();
    feed(&mut predictor, 60);
    for expected in 1..=3 {
        predictor.predict().unwrap().unwrap();
        assert_eq!(predictor.classifier().calls, expected);
    }
    assert_eq!(predictor.window().len(), 60);
}

#[test]
fn test_window_oscillation_through_predictor() {
    let mut predictor = predictor();
    feed(&mut predictor, 61);
    assert_eq!(predictor.window().len(), 61);
    assert!(!predictor.is_ready());
    assert_eq!(predictor.predict().unwrap(), None);

    feed(&mut predictor, 1);
    assert_eq!(predictor.window().len(), 32);
    assert!(!predictor.is_ready());

    feed(&mut predictor, 28);
    assert_eq!(predictor.window().len(), 60);
    assert!(predictor.predict().unwrap().is_some());
}

#[test]
fn test_low_confidence_pose_is_returned_but_not_buffered() {
    let mut predictor = predictor();
    let pose = predictor.submit_frame(&FakeFrame::Body(0.4)).unwrap();
    assert_eq!(pose.map(|p| p.confidence), Some(0.4));
    assert!(predictor.window().is_empty());
}

#[test]
fn test_no_body_is_not_an_error() {
    let mut predictor = predictor();
    feed(&mut predictor, 10);
    assert_eq!(predictor.submit_frame(&FakeFrame::Empty).unwrap(), None);
    assert_eq!(predictor.window().len(), 10);
}

#[test]
fn test_extraction_failure_is_surfaced() {
    let mut predictor = predictor();
    feed(&mut predictor, 10);

    match predictor.submit_frame(&FakeFrame::Corrupt) {
        Err(ExerciseError::PoseExtraction(msg)) => assert!(msg.contains("cannot decode")),
        other => panic!("expected PoseExtraction, got {:?}", other),
    }
    assert_eq!(predictor.window().len(), 10);

    // the session continues after a bad frame
    feed(&mut predictor, 1);
    assert_eq!(predictor.window().len(), 11);
    assert_eq!(predictor.source().calls, 12);
}

#[test]
fn test_source_errors_are_reported_as_extraction_errors() {
    let mut predictor = predictor();
    match predictor.submit_frame(&FakeFrame::Unreadable) {
        Err(ExerciseError::PoseExtraction(msg)) => assert!(msg.contains("device gone")),
        other => panic!("expected PoseExtraction, got {:?}", other),
    }
}

#[test]
fn test_classification_failure_leaves_window_unchanged() {
    let mut predictor = Predictor::new(
        PredictorConfig::default(),
        FakeSource::default(),
        FakeClassifier {
            fail: true,
            ..FakeClassifier::new()
        },
    )
    .unwrap();
    feed(&mut predictor, 60);
    let before: Vec<PoseObservation> = predictor.window().iter().cloned().collect();

    match predictor.predict() {
        Err(ExerciseError::Classification(msg)) => assert!(msg.contains("model crashed")),
        other => panic!("expected Classification, got {:?}", other),
    }

    let after: Vec<PoseObservation> = predictor.window().iter().cloned().collect();
    assert_eq!(before, after);
    assert!(predictor.is_ready());
    assert_eq!(predictor.classifier().calls, 1);
}

#[test]
fn test_closure_classifier_errors_are_reported_as_classification_errors() {
    let classifier = |_input: &Tensor<f32>| -> Result<Classification> {
        Err(ExerciseError::Io("accelerator reset".to_string()))
    };
    let mut predictor =
        Predictor::new(PredictorConfig::default(), FakeSource::default(), classifier).unwrap();
    for _ in 0..60 {
        predictor.submit_frame(&FakeFrame::Body(0.9)).unwrap();
    }

    match predictor.predict() {
        Err(ExerciseError::Classification(msg)) => assert!(msg.contains("accelerator reset")),
        other => panic!("expected Classification, got {:?}", other),
    }
}

#[test]
fn test_missing_label_probability_defaults_to_zero() {
    let classifier = |_input: &Tensor<f32>| -> Result<Classification> {
        Ok(Classification {
            label: "plank".to_string(),
            probabilities: HashMap::from([("squat".to_string(), 1.0)]),
        })
    };
    let mut predictor =
        Predictor::new(PredictorConfig::default(), FakeSource::default(), classifier).unwrap();
    for _ in 0..60 {
        predictor.submit_frame(&FakeFrame::Body(0.9)).unwrap();
    }

    let prediction = predictor.predict().unwrap().unwrap();
    assert_eq!(prediction.label, "plank");
    assert_eq!(prediction.confidence, 0.0);
}

#[test]
fn test_malformed_pose_skips_prediction() {
    let mut predictor = predictor();
    feed(&mut predictor, 59);
    predictor.submit_frame(&FakeFrame::BadKeypoints).unwrap();
    assert!(predictor.is_ready());

    assert_eq!(predictor.predict().unwrap(), None);
    assert_eq!(predictor.classifier().calls, 0);
}

#[test]
fn test_malformed_pose_fails_fast() {
    let config = PredictorConfig::default().with_frame_policy(FramePolicy::FailFast);
    let mut predictor = Predictor::new(config, FakeSource::default(), FakeClassifier::new()).unwrap();
    feed(&mut predictor, 3);
    predictor.submit_frame(&FakeFrame::BadKeypoints).unwrap();
    feed(&mut predictor, 56);

    match predictor.predict() {
        Err(ExerciseError::MalformedFrame { index, .. }) => assert_eq!(index, 3),
        other => panic!("expected MalformedFrame, got {:?}", other),
    }
    assert_eq!(predictor.classifier().calls, 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = PredictorConfig::default().with_eviction_batch_size(0);
    let result = Predictor::new(config, FakeSource::default(), FakeClassifier::new());
    assert!(matches!(result, Err(ExerciseError::Config(_))));
}

#[test]
fn test_reset_clears_window() {
    let mut predictor = predictor();
    feed(&mut predictor, 60);
    assert!(predictor.is_ready());

    predictor.reset();
    assert!(!predictor.is_ready());
    assert!(predictor.window().is_empty());
}
