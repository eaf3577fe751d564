//! End-to-end tests of the Johansen pipeline
//!
//! These tests run the full workflow from generated or loaded series to a
//! report and check the structural properties every report must satisfy.

use cointegration_analysis::{
    build_regressors, concentrate, data_loader::SERIES_COLUMN, generate_cointegrated_pair,
    generate_random_walk, johansen_test, load_series_matrix, solve_generalized_eigen,
    write_series_csv, CointegratedPairConfig, CointegrationError, ConfidenceLevel,
    DeterministicOrder, JohansenConfig, MomentMatrices, SeriesMatrix, StatisticKind, TestReport,
};
use tempfile::tempdir;

fn fixture_series() -> SeriesMatrix {
    let pair = generate_cointegrated_pair(&CointegratedPairConfig::default()).unwrap();
    SeriesMatrix::from_columns(vec![
        ("series1".to_string(), pair.series1),
        ("series2".to_string(), pair.series2),
    ])
    .unwrap()
}

/// Three walks where the third is a combination of the first two plus noise.
fn trivariate_series(seed: u64, observations: usize) -> SeriesMatrix {
    let a = generate_random_walk(seed, observations, 0.02, 1.0).unwrap();
    let b = generate_random_walk(seed + 1, observations, -0.01, 0.7).unwrap();
    let noise = generate_random_walk(seed + 2, observations + 1, 0.0, 0.4).unwrap();
    let c = (0..observations)
        .map(|t| 0.8 * a[t] - 1.2 * b[t] + (noise[t + 1] - noise[t]))
        .collect();
    SeriesMatrix::from_columns(vec![
        ("a".to_string(), a),
        ("b".to_string(), b),
        ("c".to_string(), c),
    ])
    .unwrap()
}

fn assert_report_properties(report: &TestReport) {
    let n = report.dimension();
    let eigenvalues = report.eigenvalues();
    let trace = report.trace_statistics();
    let max_eigen = report.max_eigen_statistics();

    assert_eq!(eigenvalues.len(), n);
    assert_eq!(trace.len(), n);
    assert_eq!(max_eigen.len(), n);
    assert_eq!(report.eigenvectors().shape(), (n, n));

    assert!(eigenvalues.iter().all(|&l| (0.0..1.0).contains(&l)));
    assert!(eigenvalues.windows(2).all(|w| w[0] >= w[1]));

    for r in 0..n {
        let tail: f64 = max_eigen[r..].iter().sum();
        assert!(
            (trace[r] - tail).abs() <= 1e-8 * tail.abs().max(1.0),
            "trace[{}] = {} but tail sum is {}",
            r,
            trace[r],
            tail
        );
        assert!(trace[r] >= 0.0 && max_eigen[r] >= 0.0);
        if r + 1 < n {
            assert!(trace[r] >= trace[r + 1]);
            assert!(max_eigen[r] >= max_eigen[r + 1]);
        }
    }
}

/// Seed 42, 1000 observations, series2 = 2·series1 + N(0, 0.25): rank one at 95%.
#[test]
fn test_determinism_fixture_detects_one_relation() {
    let report = johansen_test(&fixture_series(), &JohansenConfig::default()).unwrap();
    assert_report_properties(&report);

    let trace = report.trace_statistics();
    let cv = report.trace_critical_values();
    assert!(trace[0] > cv[0].p95, "trace[0] = {} should exceed {}", trace[0], cv[0].p95);
    assert!(trace[1] < cv[1].p95, "trace[1] = {} should stay below {}", trace[1], cv[1].p95);

    assert!(report.rejects_no_cointegration(ConfidenceLevel::P95));
    assert_eq!(report.cointegration_rank(ConfidenceLevel::P95), 1);
    assert_eq!(report.effective_observations(), 998);

    // β ∝ (2, -1) up to scale: series2 - 2·series1 is stationary
    let beta = report.cointegrating_vector(0).unwrap();
    let loading = -beta[0] / beta[1];
    assert!((loading - 2.0).abs() < 0.01, "implied loading {}", loading);
}

/// Two runs on identical input are bit-identical.
#[test]
fn test_runs_are_idempotent() {
    let series = trivariate_series(11, 400);
    for order in DeterministicOrder::ALL {
        let config = JohansenConfig::new(2, order);
        let first = johansen_test(&series, &config).unwrap();
        let second = johansen_test(&series, &config).unwrap();

        assert_eq!(first, second);
        for (a, b) in first.eigenvalues().iter().zip(second.eigenvalues()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

/// Properties hold across deterministic orders and lag lengths.
#[test]
fn test_properties_across_configurations() {
    let series = trivariate_series(5, 300);
    for order in DeterministicOrder::ALL {
        for lag_order in 1..=3 {
            let config = JohansenConfig::new(lag_order, order);
            let report = johansen_test(&series, &config).unwrap();
            assert_report_properties(&report);
            assert_eq!(report.effective_observations(), 300 - lag_order - 1);
            assert_eq!(report.deterministic_order(), order);
        }
    }
}

/// Every eigenvector has unit S11-norm and the vectors are S11-orthogonal.
#[test]
fn test_eigenvectors_are_s11_normalized() {
    let series = trivariate_series(23, 250);
    let config = JohansenConfig::constant(2);

    let regressors = build_regressors(&series, &config).unwrap();
    let residuals = concentrate(&regressors).unwrap();
    let moments = MomentMatrices::from_residuals(&residuals);
    let eigen = solve_generalized_eigen(&moments).unwrap();

    let v = eigen.eigenvectors();
    let gram = v.transpose() * &moments.s11 * v;
    for i in 0..3 {
        assert!((gram[(i, i)] - 1.0).abs() < 1e-6, "vᵀS11v = {}", gram[(i, i)]);
        for j in 0..3 {
            if i != j {
                assert!(gram[(i, j)].abs() < 1e-6);
            }
        }
    }

    // Same numbers as the pipeline
    let report = johansen_test(&series, &config).unwrap();
    assert_eq!(report.eigenvalues(), eigen.eigenvalues());
    assert_eq!(report.eigenvectors(), eigen.eigenvectors());
}

/// Each cointegrating vector's largest-magnitude coefficient is positive.
#[test]
fn test_vector_sign_convention() {
    let report = johansen_test(&trivariate_series(8, 300), &JohansenConfig::default()).unwrap();
    for column in report.eigenvectors().column_iter() {
        let pivot = column
            .iter()
            .fold(0.0_f64, |acc, &x| if x.abs() > acc.abs() { x } else { acc });
        assert!(pivot > 0.0);
    }
}

/// Quoting the series in different units leaves the test unchanged.
///
/// Eigenvalues and statistics are invariant to rescaling each series; the
/// cointegrating coefficients scale inversely with their series.
#[test]
fn test_rescaled_units_give_same_eigenvalues() {
    let a = generate_random_walk(17, 500, 0.0, 1.0).unwrap();
    let b = generate_random_walk(18, 500, 0.0, 1.0).unwrap();
    let c: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + 0.5 * y).collect();
    let scaled = |sa: f64, sc: f64| {
        SeriesMatrix::from_columns(vec![
            ("a".to_string(), a.iter().map(|x| x * sa).collect()),
            ("c".to_string(), c.iter().map(|x| x * sc).collect()),
        ])
        .unwrap()
    };

    for order in DeterministicOrder::ALL {
        let config = JohansenConfig::new(1, order);
        let unit = johansen_test(&scaled(1.0, 1.0), &config).unwrap();

        for (sa, sc) in [(1e3, 1e-3), (1e4, 1e-4), (5e4, 1e-5), (1e-5, 5e4)] {
            let report = johansen_test(&scaled(sa, sc), &config)
                .unwrap_or_else(|e| panic!("{:?} at scales ({}, {}): {:?}", order, sa, sc, e));
            assert_report_properties(&report);

            for (r, (x, y)) in report.eigenvalues().iter().zip(unit.eigenvalues()).enumerate() {
                assert!(
                    (x - y).abs() <= 1e-8 * y.abs().max(1e-6),
                    "{:?} eigenvalue {} at scales ({}, {}): {} vs {}",
                    order,
                    r,
                    sa,
                    sc,
                    x,
                    y
                );
            }
            for (x, y) in report.trace_statistics().iter().zip(unit.trace_statistics()) {
                assert!((x - y).abs() <= 1e-6 * y.abs().max(1e-3));
            }
            assert_eq!(
                report.select_rank(StatisticKind::Trace, ConfidenceLevel::P95),
                unit.select_rank(StatisticKind::Trace, ConfidenceLevel::P95)
            );

            // β_scaled[j] · s_j = ±β[j], the sign fixed per column
            for r in 0..2 {
                let v = report.cointegrating_vector(r).unwrap();
                let u = unit.cointegrating_vector(r).unwrap();
                let back = [v[0] * sa, v[1] * sc];
                let sign = if back[0] * u[0] + back[1] * u[1] < 0.0 { -1.0 } else { 1.0 };
                for j in 0..2 {
                    assert!(
                        (sign * back[j] - u[j]).abs() <= 1e-6 * u.amax().max(1e-12),
                        "{:?} vector {} coefficient {}: {} vs {}",
                        order,
                        r,
                        j,
                        sign * back[j],
                        u[j]
                    );
                }
            }
        }
    }
}

/// A single series runs and yields one eigenvalue.
#[test]
fn test_single_series() {
    let walk = generate_random_walk(99, 500, 0.0, 1.0).unwrap();
    let series = SeriesMatrix::from_columns(vec![("walk".to_string(), walk)]).unwrap();
    let report = johansen_test(&series, &JohansenConfig::default()).unwrap();

    assert_report_properties(&report);
    assert_eq!(report.eigenvalues().len(), 1);
    assert_eq!(report.trace_statistics(), report.max_eigen_statistics());
}

/// Independent walks should not look cointegrated.
#[test]
fn test_independent_walks_rank_zero() {
    let a = generate_random_walk(1234, 800, 0.0, 1.0).unwrap();
    let b = generate_random_walk(5678, 800, 0.0, 1.0).unwrap();
    let series = SeriesMatrix::from_columns(vec![("a".to_string(), a), ("b".to_string(), b)]).unwrap();
    let report = johansen_test(&series, &JohansenConfig::default()).unwrap();

    assert_report_properties(&report);
    assert!(report.eigenvalues()[0] < 0.05);
}

/// Thirteen series have no tabulated critical values.
#[test]
fn test_thirteen_series_unsupported() {
    let columns = (0..13)
        .map(|i| {
            let walk = generate_random_walk(i as u64, 200, 0.0, 1.0).unwrap();
            (format!("s{}", i), walk)
        })
        .collect();
    let series = SeriesMatrix::from_columns(columns).unwrap();

    match johansen_test(&series, &JohansenConfig::default()) {
        Err(CointegrationError::UnsupportedDimension { series, order }) => {
            assert_eq!(series, 13);
            assert_eq!(order, 0);
        }
        other => panic!("Expected UnsupportedDimension, got {:?}", other),
    }
}

/// Generated files round-trip through the CSV boundary into the same report.
#[test]
fn test_csv_workflow_matches_in_memory() {
    let dir = tempdir().unwrap();
    let pair = generate_cointegrated_pair(&CointegratedPairConfig {
        observations: 300,
        ..Default::default()
    })
    .unwrap();
    let first = dir.path().join("series1.csv");
    let second = dir.path().join("series2.csv");
    write_series_csv(&first, &pair.series1).unwrap();
    write_series_csv(&second, &pair.series2).unwrap();

    let loaded = load_series_matrix(&[first, second], SERIES_COLUMN).unwrap();
    assert_eq!(loaded.names(), &["series1".to_string(), "series2".to_string()]);

    let in_memory = SeriesMatrix::from_columns(vec![
        ("series1".to_string(), pair.series1),
        ("series2".to_string(), pair.series2),
    ])
    .unwrap();

    let config = JohansenConfig::default();
    let from_files = johansen_test(&loaded, &config).unwrap();
    let direct = johansen_test(&in_memory, &config).unwrap();

    // Shortest round-trip formatting preserves every bit
    assert_eq!(from_files, direct);
    assert_eq!(
        from_files.select_rank(StatisticKind::Trace, ConfidenceLevel::P95),
        1
    );

    let rendered = from_files.to_string();
    assert!(rendered.contains("series1"));
    assert!(rendered.contains("Trace statistic"));
}
