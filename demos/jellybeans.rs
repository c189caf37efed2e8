use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use knn_canvas::dataset::{scan_paths, shuffle_seeded};
use knn_canvas::{codec, Canvas, KnnClassifier, KnnConfig, Rgb};

const SIDE: i32 = 8;
const SEED: u64 = 301;

/// Base color of every jellybean flavor.
const FLAVORS: [(&str, [u8; 3]); 4] = [
    ("cherry", [200, 30, 40]),
    ("lime", [60, 190, 50]),
    ("blueberry", [40, 60, 190]),
    ("lemon", [230, 220, 60]),
];

/// A jellybean: a filled oval-ish blob of jittered flavor color on white.
fn jellybean(base: [u8; 3], rng: &mut StdRng) -> Result<Canvas, Box<dyn std::error::Error>> {
    let mut canvas = Canvas::with_size(SIDE, SIDE)?;
    let jitter = |c: u8, rng: &mut StdRng| (c as i32 + rng.gen_range(-40..=40)).clamp(0, 255) as u8;

    for y in 1..SIDE - 1 {
        let inset = if y == 1 || y == SIDE - 2 { 2 } else { 1 };
        let pen = Rgb::new(jitter(base[0], rng), jitter(base[1], rng), jitter(base[2], rng));
        canvas.set_pen(pen);
        canvas.draw_line(inset, y, SIDE - 1 - inset, y)?;
    }
    Ok(canvas)
}

fn write_split(dir: &Path, per_flavor: usize, rng: &mut StdRng) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    for (name, base) in FLAVORS {
        for i in 0..per_flavor {
            let canvas = jellybean(base, rng)?;
            codec::save(&canvas, dir.join(format!("{name}_{i}.ppm")))?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempfile::tempdir()?;
    let train = root.path().join("train");
    let test = root.path().join("test");

    let mut rng = StdRng::seed_from_u64(SEED);
    write_split(&train, 12, &mut rng)?;
    write_split(&test, 5, &mut rng)?;

    let classifier = KnnClassifier::from_directory(&train, &KnnConfig::default())?;
    println!("training set: {:?}", classifier.label_counts());

    let mut test_files = scan_paths(&test)?;
    shuffle_seeded(&mut test_files, SEED);

    for k in [1, 3, 5, 9] {
        let classifier = KnnClassifier::new(k, classifier.samples().to_vec())?;
        let report = classifier.evaluate(&test_files)?;
        println!(
            "k = {k}: {}/{} wrong, error rate {:.3}",
            report.mismatches, report.total, report.error_rate
        );
    }
    Ok(())
}
