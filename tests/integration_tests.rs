//! End-to-end tests of the estimator on synthetic line data.

use approx::assert_relative_eq;
use consensus::types::Point2D;
use consensus::{estimate_line, Line2D, Model, Ransac, RansacError, RansacSettings};
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rstest::rstest;

/// 80 points exactly on y = 2x + 1 and 20 uniform noise points, shuffled.
fn line_with_noise(seed: u64) -> Vec<Point2D> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points: Vec<Point2D> = (0..80)
        .map(|i| {
            let x = i as f64 * 0.125 - 5.0;
            Point2D::new(x, 2.0 * x + 1.0)
        })
        .collect();
    points.extend((0..20).map(|_| Point2D::new(rng.gen_range(-5.0..5.0), rng.gen_range(-10.0..12.0))));
    points.shuffle(&mut rng);
    points
}

fn uniform_noise(n: usize, seed: u64) -> Vec<Point2D> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point2D::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
        .collect()
}

fn settings(threshold: f64, iterations: usize) -> RansacSettings {
    RansacSettings::new(threshold, iterations).with_seed(2024)
}

#[test]
fn recovers_line_among_outliers() {
    let data = line_with_noise(7);
    let mut ransac = Ransac::<Line2D>::new(settings(0.01, 200)).unwrap();

    ransac.estimate(&data).unwrap();

    let line = ransac.best_model().expect("a line should be found");
    assert!((line.slope() - 2.0).abs() < 1e-6, "slope {}", line.slope());
    assert!((line.intercept() - 1.0).abs() < 1e-6, "intercept {}", line.intercept());

    let inliers = ransac.best_inliers().len();
    assert!((75..=80).contains(&inliers), "inliers {inliers}");
    assert_relative_eq!(ransac.best_score().unwrap(), inliers as f64 / 98.0);
}

#[test]
fn fixed_seed_is_reproducible() {
    let data = line_with_noise(11);
    let mut ransac = Ransac::<Line2D>::new(settings(0.01, 200)).unwrap();

    ransac.estimate(&data).unwrap();
    let first_model = ransac.best_model().cloned();
    let first_inliers = ransac.best_inliers().to_vec();

    ransac.estimate(&data).unwrap();
    assert_eq!(ransac.best_model().cloned(), first_model);
    assert_eq!(ransac.best_inliers(), first_inliers.as_slice());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(8)]
fn result_does_not_depend_on_thread_count(#[case] threads: usize) {
    let data = uniform_noise(60, 3);
    let mut reference = Ransac::<Line2D>::new(settings(2.0, 150).with_parallelism(1)).unwrap();
    let mut ransac = Ransac::<Line2D>::new(settings(2.0, 150).with_parallelism(threads)).unwrap();

    reference.estimate(&data).unwrap();
    ransac.estimate(&data).unwrap();

    assert_eq!(ransac.best_model(), reference.best_model());
    assert_eq!(ransac.best_inliers(), reference.best_inliers());
}

#[test]
fn pure_noise_has_low_consensus() {
    let data = uniform_noise(50, 99);
    let mut ransac = Ransac::<Line2D>::new(settings(1.0, 200)).unwrap();

    ransac.estimate(&data).unwrap();

    let score = ransac.best_score().unwrap();
    assert!(score < 0.3, "score {score}");
    assert_eq!(ransac.trials(), 200);
}

#[test]
fn minimal_data_boundary() {
    let mut ransac = Ransac::<Line2D>::new(settings(0.1, 20)).unwrap();
    let two = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)];
    assert!(matches!(
        ransac.estimate(&two),
        Err(RansacError::InsufficientData { len: 2, required: 2 })
    ));
    assert!(ransac.best_model().is_none());
    assert!(ransac.best_inliers().is_empty());

    let three = [
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 1.0),
        Point2D::new(2.0, 2.0),
    ];
    assert!(ransac.estimate(&three).is_ok());
    assert!(ransac.best_model().is_some());
    assert_eq!(ransac.best_inliers().len(), 1);
}

#[test]
fn duplicate_points_do_not_abort_the_run() {
    // Half of the data is one repeated point on the line, so many samples are degenerate.
    let mut data = vec![Point2D::new(4.0, 1.0); 10];
    data.extend((0..10).map(|i| Point2D::new(i as f64 + 2.0, 0.5 * i as f64)));
    let mut ransac = Ransac::<Line2D>::new(settings(0.01, 100)).unwrap();

    ransac.estimate(&data).unwrap();

    let line = ransac.best_model().unwrap();
    assert_relative_eq!(line.slope(), 0.5, epsilon = 1e-12);
    assert_eq!(ransac.best_inliers().len(), 18);
    assert_eq!(ransac.trials(), 100);
}

#[test]
fn later_run_replaces_earlier_result() {
    let mut ransac = Ransac::<Line2D>::new(settings(0.01, 100)).unwrap();
    ransac.estimate(&line_with_noise(1)).unwrap();
    assert_relative_eq!(ransac.best_model().unwrap().slope(), 2.0, epsilon = 1e-9);

    let flat: Vec<Point2D> = (0..20).map(|i| Point2D::new(i as f64, 3.0)).collect();
    ransac.estimate(&flat).unwrap();
    assert_relative_eq!(ransac.best_model().unwrap().slope(), 0.0);
    assert_relative_eq!(ransac.best_model().unwrap().intercept(), 3.0);
    assert_eq!(ransac.best_inliers().len(), 18);
}

#[test]
fn estimate_line_from_matrix() {
    let data = line_with_noise(5);
    let mut points = DMatrix::<f64>::zeros(data.len(), 2);
    for (i, p) in data.iter().enumerate() {
        points[(i, 0)] = p.x;
        points[(i, 1)] = p.y;
    }

    let result = estimate_line(&points, 0.01, Some(RansacSettings::default().with_seed(8))).unwrap();

    assert!((result.model.slope() - 2.0).abs() < 1e-6);
    assert!((75..=80).contains(&result.inliers.len()));
    assert_eq!(result.iterations, 1000);
}

#[test]
fn invalid_configuration_is_rejected() {
    assert!(matches!(
        Ransac::<Line2D>::with_threshold(0.0, 10),
        Err(RansacError::Configuration(_))
    ));
    assert!(matches!(
        Ransac::<Line2D>::with_threshold(1.0, 0),
        Err(RansacError::Configuration(_))
    ));
}

#[test]
fn unseeded_run_finds_the_line() {
    let data = line_with_noise(21);
    let mut ransac = Ransac::<Line2D>::with_threshold(0.01, 200).unwrap();

    ransac.estimate(&data).unwrap();

    let line = ransac.best_model().expect("a line should be found");
    assert!((line.slope() - 2.0).abs() < 1e-6, "slope {}", line.slope());
    assert!((line.intercept() - 1.0).abs() < 1e-6, "intercept {}", line.intercept());
    assert!((75..=80).contains(&ransac.best_inliers().len()));
    assert_eq!(ransac.best_sample().len(), 2);
    assert_eq!(ransac.trials(), 200);
}

#[test]
fn zero_threads_matches_single_thread() {
    let data = line_with_noise(4);
    let mut zero = Ransac::<Line2D>::new(settings(0.01, 120).with_parallelism(0)).unwrap();
    let mut one = Ransac::<Line2D>::new(settings(0.01, 120).with_parallelism(1)).unwrap();

    zero.estimate(&data).unwrap();
    one.estimate(&data).unwrap();

    assert_eq!(zero.best_model(), one.best_model());
    assert_eq!(zero.best_sample(), one.best_sample());
    assert_eq!(zero.best_inliers(), one.best_inliers());
}

#[test]
fn winning_sample_lies_on_the_line_but_outside_the_inliers() {
    let data = line_with_noise(7);
    let mut ransac = Ransac::<Line2D>::new(settings(0.01, 200)).unwrap();
    ransac.estimate(&data).unwrap();

    let line = ransac.best_model().unwrap();
    for p in ransac.best_sample() {
        assert!(line.distance_to(p) < 1e-9);
        assert!(!ransac.best_inliers().contains(p));
    }
}
