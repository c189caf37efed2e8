/// knn-canvas Studio
///
/// A small JSON service around a trained nearest-neighbor classifier.
/// Served by a synchronous tiny_http server.
///
/// Run with:
///   cargo run --bin studio --release -- --train data/train
/// Then, for example:
///   curl --data-binary @apple_1.ppm http://127.0.0.1:7878/predict
///
/// Endpoints:
///   GET  /health   liveness plus training-set size
///   GET  /labels   training samples per label
///   GET  /stats    request counters
///   POST /predict  P3 body -> predicted label and neighbors
///   POST /preview  P3 body -> PNG

mod handlers;
mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::info;
use tiny_http::Server;

use knn_canvas::{KnnClassifier, KnnConfig, LoadMode};
use state::StudioState;

#[derive(Parser, Debug)]
#[command(version, about = "HTTP front end for a k-nearest-neighbor image classifier")]
struct Args {
    /// Directory of labeled training images.
    #[arg(long)]
    train: PathBuf,
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: String,
    #[arg(short, long)]
    k: Option<usize>,
    /// Decode training images on every query instead of once up front.
    #[arg(long)]
    lazy: bool,
    /// JSON classifier config.
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => KnnConfig::load_json(path)
            .with_context(|| format!("failed to read config {}", path))?,
        None => KnnConfig::default(),
    };
    if let Some(k) = args.k {
        config.k = k;
    }
    if args.lazy {
        config.load_mode = LoadMode::Lazy;
    }

    let classifier = KnnClassifier::from_directory(&args.train, &config)
        .with_context(|| format!("failed to load training set {}", args.train.display()))?;
    let shared_state = Arc::new(StudioState::new(classifier));

    let server = Server::http(&args.addr)
        .map_err(|e| anyhow!("failed to bind {}: {}", args.addr, e))?;
    info!("studio listening on http://{}", args.addr);

    // One thread per request; the classifier is only ever read.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
