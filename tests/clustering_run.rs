//! End-to-end clustering runs: corpus loading, the full K-Means loop,
//! persistence round-trips, and configuration validation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::Write;
use topika::clustering::{init, persist, report};
use topika::config::Settings;
use topika::{ClusterId, KMeansModel, RunState, SparseCorpus, VectorProvider};

/// Two well-separated groups of three documents each, over five terms.
/// Documents within a group are identical, so the kmeans++ second draw is
/// guaranteed to land in the other group regardless of seed.
fn write_fixture(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let corpus_path = dir.join("corpus.txt");
    let vocab_path = dir.join("vocab.txt");

    let mut corpus = File::create(&corpus_path).unwrap();
    for _ in 0..3 {
        writeln!(corpus, "0:1.0 1:0.8").unwrap();
    }
    for _ in 0..3 {
        writeln!(corpus, "3:1.0 4:0.7").unwrap();
    }

    let mut vocab = File::create(&vocab_path).unwrap();
    for term in ["ale", "brew", "cask", "delta", "engine"] {
        writeln!(vocab, "{term}").unwrap();
    }

    (corpus_path, vocab_path)
}

#[test]
fn full_run_separates_groups_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (corpus_path, vocab_path) = write_fixture(dir.path());
    let prefix = dir.path().join("model");
    let prefix = prefix.to_str().unwrap();

    let corpus = SparseCorpus::from_files(&corpus_path, Some(&vocab_path)).unwrap();
    assert_eq!(corpus.num_docs(), 6);
    assert_eq!(corpus.num_terms(), 5);

    let initializer = init::from_name("kmeans++").unwrap();
    let mut model = KMeansModel::new(&corpus, 2).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let summary = model
        .run(&corpus, initializer.as_ref(), 100, &mut rng)
        .unwrap();

    assert_eq!(summary.state, RunState::Converged);
    assert!(summary.iterations < 100);
    assert!(summary.inertia >= 0.0);

    // The two groups end up in different clusters, each internally uniform.
    let assignments = model.assignments();
    assert_eq!(assignments[0], assignments[1]);
    assert_eq!(assignments[1], assignments[2]);
    assert_eq!(assignments[3], assignments[4]);
    assert_eq!(assignments[4], assignments[5]);
    assert_ne!(assignments[0], assignments[3]);
    for &cluster in assignments {
        assert!(cluster.index() < 2);
    }

    model.save(prefix).unwrap();

    // Round-trip: numeric values within tolerance, assignments exact.
    let docs = persist::load_matrix(&dir.path().join("model.docs")).unwrap();
    assert_eq!(docs.len(), 6);
    for (loaded, original) in docs.iter().zip(model.documents()) {
        assert_eq!(loaded.len(), 5);
        for (a, b) in loaded.iter().zip(original) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    let centroids = persist::load_matrix(&dir.path().join("model.centroids")).unwrap();
    assert_eq!(centroids.len(), 2);
    for (loaded, original) in centroids.iter().zip(model.centroids()) {
        for (a, b) in loaded.iter().zip(original) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    let pairs = persist::load_assignments(&dir.path().join("model.clusters")).unwrap();
    assert_eq!(pairs.len(), 6);
    for (d_id, (doc, cluster)) in pairs.iter().enumerate() {
        assert_eq!(doc.index(), d_id);
        assert_eq!(*cluster, model.assignments()[d_id]);
    }
}

#[test]
fn report_names_terms_from_the_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    let (corpus_path, vocab_path) = write_fixture(dir.path());

    let corpus = SparseCorpus::from_files(&corpus_path, Some(&vocab_path)).unwrap();
    let initializer = init::from_name("kmeans++").unwrap();
    let mut model = KMeansModel::new(&corpus, 2).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    model
        .run(&corpus, initializer.as_ref(), 100, &mut rng)
        .unwrap();

    let mut out = Vec::new();
    report::print_topics(&model, &corpus, 2, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Cluster 1\n"));
    assert!(text.contains("Cluster 2\n"));
    // One topic is dominated by ale/brew, the other by delta/engine.
    assert!(text.contains("ale") || text.contains("brew"));
    assert!(text.contains("delta") || text.contains("engine"));
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let (corpus_path, vocab_path) = write_fixture(dir.path());
    let corpus = SparseCorpus::from_files(&corpus_path, Some(&vocab_path)).unwrap();
    let initializer = init::from_name("kmeans++").unwrap();

    let mut run = || -> (Vec<ClusterId>, Vec<Vec<f64>>) {
        let mut model = KMeansModel::new(&corpus, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        model
            .run(&corpus, initializer.as_ref(), 100, &mut rng)
            .unwrap();
        (model.assignments().to_vec(), model.centroids().to_vec())
    };

    let (assignments_a, centroids_a) = run();
    let (assignments_b, centroids_b) = run();
    assert_eq!(assignments_a, assignments_b);
    assert_eq!(centroids_a, centroids_b);
}

#[test]
fn settings_file_feeds_a_valid_run_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("topika.toml");
    std::fs::write(
        &config_path,
        r#"
        [kmeans]
        max-iters = 30
        topics = 2
        init-method = "randk"
        output-terms = 3
        model-prefix = "model"
        seed = 9
        "#,
    )
    .unwrap();

    let settings = Settings::load(Some(&config_path)).unwrap();
    let params = settings.kmeans.validate().unwrap();

    assert_eq!(params.max_iters, 30);
    assert_eq!(params.topics, 2);
    assert_eq!(params.init_method, "randk");
    assert_eq!(params.output_terms, 3);
    assert_eq!(params.seed, Some(9));
    assert!(init::from_name(&params.init_method).is_ok());
}

#[test]
fn missing_keys_are_all_reported_before_any_run() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("topika.toml");
    std::fs::write(&config_path, "[kmeans]\ntopics = 2\n").unwrap();

    let settings = Settings::load(Some(&config_path)).unwrap();
    let errors = settings.kmeans.validate().unwrap_err();
    assert_eq!(errors.len(), 4);
}
