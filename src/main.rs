use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use knn_canvas::codec;
use knn_canvas::dataset::{scan_paths, shuffle_seeded};
use knn_canvas::{distance, Canvas, KnnClassifier, KnnConfig, LoadMode};

/// knn-canvas: draw, convert and classify P3 images.
///
/// Set RUST_LOG=debug to see every prediction.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every image under --test and report the error rate.
    Evaluate {
        /// Directory of labeled training images.
        #[arg(long)]
        train: PathBuf,
        /// Directory of labeled test images.
        #[arg(long)]
        test: PathBuf,
        #[command(flatten)]
        knn: KnnArgs,
        /// Shuffle the test set with this seed before evaluating.
        #[arg(long)]
        seed: Option<u64>,
        /// Write the full report as JSON to this file.
        #[arg(long)]
        report: Option<String>,
    },
    /// Predict the label of a single image.
    Predict {
        #[arg(long)]
        train: PathBuf,
        #[command(flatten)]
        knn: KnnArgs,
        image: PathBuf,
    },
    /// Print the squared distance between two images of equal size.
    Distance { a: PathBuf, b: PathBuf },
    /// Draw lines and rectangles onto a white canvas and save it.
    ///
    /// The pen is applied first, then every --line, then every --rect.
    Draw {
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
        /// Pen color as R,G,B (default black).
        #[arg(long, value_parser = parse_ints::<3>)]
        pen: Option<[i32; 3]>,
        /// Segment as X1,Y1,X2,Y2; repeatable.
        #[arg(long, value_parser = parse_ints::<4>)]
        line: Vec<[i32; 4]>,
        /// Rectangle diagonal as X1,Y1,X2,Y2; repeatable.
        #[arg(long, value_parser = parse_ints::<4>)]
        rect: Vec<[i32; 4]>,
        /// Output file; `.png` writes PNG, anything else P3.
        out: PathBuf,
    },
    /// Convert between P3 and PNG, chosen by file extension.
    Convert { input: PathBuf, output: PathBuf },
}

/// Classifier options shared by `evaluate` and `predict`.
#[derive(Args, Debug)]
struct KnnArgs {
    /// Number of neighbors (overrides the config file; default 3).
    #[arg(short, long)]
    k: Option<usize>,
    /// Decode training images on every query instead of once up front.
    #[arg(long)]
    lazy: bool,
    /// JSON classifier config.
    #[arg(long)]
    config: Option<String>,
}

impl KnnArgs {
    fn resolve(&self) -> Result<KnnConfig> {
        let mut config = match &self.config {
            Some(path) => KnnConfig::load_json(path)
                .with_context(|| format!("failed to read config {}", path))?,
            None => KnnConfig::default(),
        };
        if let Some(k) = self.k {
            config.k = k;
        }
        if self.lazy {
            config.load_mode = LoadMode::Lazy;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate { train, test, knn, seed, report } => {
            let classifier = build_classifier(&train, &knn)?;
            let mut test_files = scan_paths(&test)
                .with_context(|| format!("failed to scan {}", test.display()))?;
            if let Some(seed) = seed {
                shuffle_seeded(&mut test_files, seed);
            }

            let result = classifier.evaluate(&test_files)?;
            println!(
                "{} test images, {} mismatches, error rate {:.4} ({} ms)",
                result.total, result.mismatches, result.error_rate, result.elapsed_ms
            );
            for ((expected, predicted), count) in result.confusion() {
                if expected != predicted {
                    println!("  {expected:>12} -> {predicted:<12} x{count}");
                }
            }
            if let Some(path) = report {
                result
                    .save_json(&path)
                    .with_context(|| format!("failed to write report {}", path))?;
                info!("report written to {}", path);
            }
        }
        Command::Predict { train, knn, image } => {
            let classifier = build_classifier(&train, &knn)?;
            let query = read_image(&image)?;
            let prediction = classifier.predict_detailed(&query)?;
            println!("{}", prediction.label);
            for n in &prediction.neighbors {
                let path = classifier.samples()[n.index].path();
                info!("  {:>14.1}  {}  {}", n.distance, n.label, path.display());
            }
        }
        Command::Distance { a, b } => {
            let d = distance(&read_image(&a)?, &read_image(&b)?)?;
            println!("{d}");
        }
        Command::Draw { width, height, pen, line, rect, out } => {
            let mut canvas = Canvas::with_size(width, height)?;
            if let Some([r, g, b]) = pen {
                canvas.set_pen_color(r, g, b)?;
            }
            for [x1, y1, x2, y2] in line {
                canvas.draw_line(x1, y1, x2, y2)?;
            }
            for [x1, y1, x2, y2] in rect {
                canvas.draw_rectangle(x1, y1, x2, y2)?;
            }
            write_image(&canvas, &out)?;
        }
        Command::Convert { input, output } => {
            let canvas = read_image(&input)?;
            write_image(&canvas, &output)?;
        }
    }
    Ok(())
}

fn build_classifier(train: &Path, args: &KnnArgs) -> Result<KnnClassifier> {
    let config = args.resolve()?;
    let classifier = KnnClassifier::from_directory(train, &config)
        .with_context(|| format!("failed to load training set {}", train.display()))?;
    if classifier.is_empty() {
        bail!("no .ppm images found under {}", train.display());
    }
    Ok(classifier)
}

fn is_ppm(path: &Path) -> bool {
    path.extension().map_or(true, |e| e.eq_ignore_ascii_case("ppm"))
}

fn read_image(path: &Path) -> Result<Canvas> {
    let canvas = if is_ppm(path) { codec::load(path) } else { codec::load_png(path) };
    canvas.with_context(|| format!("failed to read {}", path.display()))
}

fn write_image(canvas: &Canvas, path: &Path) -> Result<()> {
    let written = if is_ppm(path) { codec::save(canvas, path) } else { codec::save_png(canvas, path) };
    written.with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}x{} image to {}", canvas.width(), canvas.height(), path.display());
    Ok(())
}

/// Parses `N` comma-separated integers, e.g. `0,0,3,3`.
fn parse_ints<const N: usize>(s: &str) -> Result<[i32; N], String> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<i32>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|v: Vec<i32>| format!("expected {N} comma-separated integers, got {}", v.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_coordinates() {
        assert_eq!(parse_ints::<4>("0,0,3,3"), Ok([0, 0, 3, 3]));
        assert_eq!(parse_ints::<3>(" 255, 0 ,-1"), Ok([255, 0, -1]));
    }

    #[test]
    fn wrong_count_is_rejected() {
        let err = parse_ints::<4>("1,2,3").unwrap_err();
        assert!(err.contains("expected 4"), "{err}");
        assert!(parse_ints::<3>("1,2,3,4").is_err());
    }

    #[test]
    fn non_integers_are_rejected() {
        let err = parse_ints::<4>("0,0,x,3").unwrap_err();
        assert!(err.contains("\"x\""), "{err}");
        assert!(parse_ints::<3>("1,2,").is_err());
    }

    #[test]
    fn image_format_follows_the_extension() {
        assert!(is_ppm(Path::new("apple_1.ppm")));
        assert!(is_ppm(Path::new("APPLE_1.PPM")));
        assert!(is_ppm(Path::new("no_extension")));
        assert!(!is_ppm(Path::new("out.png")));
        assert!(!is_ppm(Path::new("photo.jpg")));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
