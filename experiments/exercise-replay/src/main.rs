use {
    anyhow::{Context, Result, bail},
    exercise::{ModelConfig, OnnxClassifier, Predictor, PredictorConfig, RecordedPoseSource},
    serde::Deserialize,
    std::{
        collections::BTreeMap,
        env,
        fs::File,
        io::{BufRead, BufReader},
    },
};

/// `{ "predictor": { ... }, "model": { "model_path": ..., "labels": [...] } }`
#[derive(Debug, Deserialize)]
struct ReplayConfig {
    #[serde(default)]
    predictor: PredictorConfig,
    model: ModelConfig,
}

const USAGE: &str = "usage: exercise-replay [--log-dir <dir>] <config.json> <poses.jsonl>";

fn main() -> Result<()> {
    let mut log_dir = None;
    let mut positional = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--log-dir" {
            let Some(dir) = args.next() else {
                bail!(USAGE);
            };
            log_dir = Some(dir);
        } else {
            positional.push(arg);
        }
    }

    match &log_dir {
        Some(dir) => {
            base::init_file_logger(dir).with_context(|| format!("opening log dir {}", dir))?
        }
        None => base::init_stdout_logger(),
    }
    if !cfg!(debug_assertions) {
        base::set_max_level(base::Level::Info);
    }

    let [config_path, poses_path] = positional.as_slice() else {
        bail!(USAGE);
    };

    let config_json = std::fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path))?;
    let config: ReplayConfig = serde_json::from_str(&config_json)
        .with_context(|| format!("parsing {}", config_path))?;
    config.predictor.validate()?;

    let classifier = OnnxClassifier::new(config.model)?;
    let mut predictor = Predictor::new(config.predictor, RecordedPoseSource::new(), classifier)?;

    let reader = BufReader::new(
        File::open(&poses_path).with_context(|| format!("opening {}", poses_path))?,
    );

    let mut tally: BTreeMap<String, usize> = BTreeMap::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if let Err(error) = predictor.submit_frame(&line) {
            base::log_warn!("skipping frame: {}", error);
            continue;
        }

        match predictor.predict() {
            Ok(Some(prediction)) => {
                base::log_info!(
                    "frame {}: {} ({:.1}%)",
                    predictor.source().frames_read(),
                    prediction.label,
                    prediction.confidence * 100.0
                );
                *tally.entry(prediction.label).or_default() += 1;
            }
            Ok(None) => {}
            Err(error) => base::log_error!("prediction failed: {}", error),
        }
    }

    base::log_info!(
        "replayed {} frames, {} predictions",
        predictor.source().frames_read(),
        tally.values().sum::<usize>()
    );
    for (label, count) in &tally {
        base::log_info!("  {}: {}", label, count);
    }

    Ok(())
}
