mod common;

use pretty_assertions::assert_eq;

use knn_canvas::dataset::scan_paths;
use knn_canvas::{KnnClassifier, KnnConfig, KnnError, LoadMode};

fn config(k: usize, load_mode: LoadMode) -> KnnConfig {
    KnnConfig { k, load_mode }
}

#[test]
fn two_of_three_neighbors_decide() {
    let dir = tempfile::tempdir().unwrap();
    common::write_ppm(dir.path(), "a_1.ppm", &common::solid(4, 4, 10));
    common::write_ppm(dir.path(), "a_2.ppm", &common::solid(4, 4, 20));
    common::write_ppm(dir.path(), "b_1.ppm", &common::solid(4, 4, 240));

    let knn = KnnClassifier::from_directory(dir.path(), &config(3, LoadMode::Eager)).unwrap();
    assert_eq!(knn.len(), 3);
    assert_eq!(knn.predict(&common::solid(4, 4, 15)).unwrap(), "a");
}

#[test]
fn eager_and_lazy_loading_agree() {
    let train = tempfile::tempdir().unwrap();
    for (i, level) in [0u8, 30, 60].into_iter().enumerate() {
        common::write_ppm(train.path(), &format!("dark_{i}.ppm"), &common::solid(3, 3, level));
    }
    for (i, level) in [190u8, 220, 250].into_iter().enumerate() {
        common::write_ppm(train.path(), &format!("light_{i}.ppm"), &common::solid(3, 3, level));
    }

    let eager = KnnClassifier::from_directory(train.path(), &config(3, LoadMode::Eager)).unwrap();
    let lazy = KnnClassifier::from_directory(train.path(), &config(3, LoadMode::Lazy)).unwrap();
    assert!(eager.samples().iter().all(|s| s.is_loaded()));
    assert!(lazy.samples().iter().all(|s| !s.is_loaded()));

    for level in [5u8, 100, 140, 255] {
        let query = common::solid(3, 3, level);
        assert_eq!(
            eager.predict_detailed(&query).unwrap(),
            lazy.predict_detailed(&query).unwrap()
        );
    }
}

#[test]
fn classification_error_over_files() {
    let train = tempfile::tempdir().unwrap();
    let test = tempfile::tempdir().unwrap();
    common::write_ppm(train.path(), "dark_1.ppm", &common::solid(2, 2, 0));
    common::write_ppm(train.path(), "light_1.ppm", &common::solid(2, 2, 255));

    common::write_ppm(test.path(), "dark_7.ppm", &common::solid(2, 2, 20));
    common::write_ppm(test.path(), "light_7.ppm", &common::solid(2, 2, 230));
    // Mislabeled on purpose.
    common::write_ppm(test.path(), "dark_8.ppm", &common::solid(2, 2, 250));
    common::write_ppm(test.path(), "light_8.ppm", &common::solid(2, 2, 200));

    let knn = KnnClassifier::from_directory(train.path(), &config(1, LoadMode::Eager)).unwrap();
    let files = scan_paths(test.path()).unwrap();
    assert_eq!(knn.classification_error(&files).unwrap(), 0.25);

    let report = knn.evaluate(&files).unwrap();
    assert_eq!(report.total, 4);
    assert_eq!(report.mismatches, 1);
    let wrong: Vec<_> = report.outcomes.iter().filter(|o| !o.is_correct()).collect();
    assert_eq!(wrong[0].expected, "dark");
    assert_eq!(wrong[0].predicted, "light");
}

#[test]
fn empty_test_set_has_zero_error() {
    let train = tempfile::tempdir().unwrap();
    common::write_ppm(train.path(), "a_1.ppm", &common::solid(2, 2, 0));
    let knn = KnnClassifier::from_directory(train.path(), &KnnConfig { k: 1, ..Default::default() })
        .unwrap();

    let none: Vec<std::path::PathBuf> = Vec::new();
    assert_eq!(knn.classification_error(&none).unwrap(), 0.0);
}

#[test]
fn predictions_come_from_the_training_labels() {
    let train = tempfile::tempdir().unwrap();
    let labels = ["red", "green", "blue"];
    for (i, label) in labels.iter().enumerate() {
        let level = (i * 100) as u8;
        common::write_ppm(train.path(), &format!("{label}_{i}.ppm"), &common::solid(2, 2, level));
    }

    let knn = KnnClassifier::from_directory(train.path(), &config(1, LoadMode::Eager)).unwrap();
    for level in (0..=255u8).step_by(15) {
        let label = knn.predict(&common::solid(2, 2, level)).unwrap();
        assert!(labels.contains(&label.as_str()), "{label:?}");
    }
}

#[test]
fn unreadable_training_image_aborts_eager_load() {
    let train = tempfile::tempdir().unwrap();
    std::fs::write(train.path().join("bad_1.ppm"), "P6\n1 1\n255\n0 0 0\n").unwrap();

    let err = KnnClassifier::from_directory(train.path(), &config(1, LoadMode::Eager)).unwrap_err();
    assert!(matches!(err, KnnError::Canvas(_)));
}
