use machine_learning::persistence;
use purchase_classifier::{ExperimentConfig, run};

fn config_in(dir: &tempfile::TempDir) -> ExperimentConfig {
    ExperimentConfig {
        model_path: dir.path().join("trained_model.bin"),
        ..Default::default()
    }
}

#[test]
fn run_splits_trains_and_scores() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run(&config_in(&dir)).unwrap();

    assert_eq!(outcome.split.train.len(), 800);
    assert_eq!(outcome.split.test.len(), 200);
    assert_eq!(outcome.split.train.n_features(), 4);
    assert_eq!(outcome.split.test.n_features(), 4);
    assert!((0.0..=1.0).contains(&outcome.accuracy));
    assert_eq!(outcome.model.coef().len(), 4);
}

#[test]
fn run_writes_a_loadable_model() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let outcome = run(&config).unwrap();

    assert_eq!(outcome.model_path, config.model_path);
    assert!(config.model_path.exists());

    let loaded = persistence::load(&config.model_path).unwrap();
    assert_eq!(loaded, outcome.model);

    let y_pred = loaded.predict(outcome.split.test.x()).unwrap();
    assert_eq!(y_pred.len(), 200);
    assert!(y_pred.iter().all(|&label| label <= 1));
    assert_eq!(loaded.score(&outcome.split.test).unwrap(), outcome.accuracy);
}

#[test]
fn runs_with_the_same_seed_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let first = run(&config).unwrap();
    let first_bytes = std::fs::read(&config.model_path).unwrap();
    let second = run(&config).unwrap();

    assert_eq!(first.split, second.split);
    assert_eq!(first.model, second.model);
    assert_eq!(first.accuracy, second.accuracy);
    assert_eq!(std::fs::read(&config.model_path).unwrap(), first_bytes);
}

#[test]
fn unwritable_model_path_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExperimentConfig {
        model_path: dir.path().join("missing").join("trained_model.bin"),
        ..Default::default()
    };

    let err = run(&config).unwrap_err();
    assert!(err.to_string().contains("failed to save model"));
}

#[test]
fn invalid_test_size_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExperimentConfig {
        test_size: 1.5,
        ..config_in(&dir)
    };

    assert!(run(&config).is_err());
    assert!(!config.model_path.exists());
}
