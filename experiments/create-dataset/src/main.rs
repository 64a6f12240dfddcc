mod settings;

use posedata_base::{init_logger, log_fatal};
use posedata_dataset::DatasetBuilder;
use posedata_infer::{ensure_model, ModelSource, MoveNet, OnnxBackend};
use settings::Settings;

fn main() {
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid settings: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logger(settings.log_target.clone()) {
        eprintln!("Failed to initialize logger: {e}");
        std::process::exit(1);
    }

    log::info!("Images: {}", settings.dataset.images_root().display());
    log::info!("Output: {}", settings.dataset.output_csv().display());

    let model_path = match ensure_model(&settings.model_path, settings.model_url.as_deref()) {
        Ok(path) => path,
        Err(e) => log_fatal!("Model unavailable: {}", e),
    };

    log::info!("Loading pose model {} on {}", model_path.display(), settings.device);
    let backend = OnnxBackend::new(settings.device.clone());
    let detector = match MoveNet::new(ModelSource::File(model_path), &backend) {
        Ok(detector) => detector,
        Err(e) => log_fatal!("Failed to load pose model: {}", e),
    };

    let mut builder = match DatasetBuilder::new(settings.dataset, detector) {
        Ok(builder) => builder,
        Err(e) => log_fatal!("Failed to open images: {}", e),
    };

    match builder.process() {
        Ok(summary) => log::info!(
            "Done: {} rows, {} images skipped",
            summary.rows,
            summary.skipped.len()
        ),
        Err(e) => log_fatal!("Dataset creation failed: {}", e),
    }
}
