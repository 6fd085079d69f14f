use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} got {}",
        expected,
        actual
    );
}

#[test]
fn test_empty_distribution_is_equal() {
    assert_eq!(atkinson_index(&[], DEFAULT_EPSILON).unwrap(), 0.0);
    assert_eq!(atkinson_index(&[], 1.0).unwrap(), 0.0);
}

#[test]
fn test_equal_shares_give_zero() {
    assert_close(atkinson_index(&[10.0, 10.0, 10.0, 10.0], DEFAULT_EPSILON).unwrap(), 0.0);

    for eps in [0.0, 0.25, 0.5, 1.0, 1.5, 2.0, 3.0] {
        for x in [0.001, 1.0, 42.0, 1e6] {
            let index = atkinson_index(&[x; 7], eps).unwrap();
            assert_close(index, 0.0);
        }
    }
}

#[test]
fn test_concentrated_distribution() {
    // mean 25, power mean (2.5)^2 = 6.25 -> 1 - 6.25/25
    let index = atkinson_index(&[0.0, 0.0, 0.0, 100.0], 0.5).unwrap();
    assert!(index > 0.0 && index < 1.0);
    assert_close(index, 0.75);
}

#[test]
fn test_log_form_at_epsilon_one() {
    // geometric mean of 1 and 4 is 2, arithmetic mean is 2.5
    assert_close(atkinson_index(&[1.0, 4.0], 1.0).unwrap(), 1.0 - 2.0 / 2.5);
}

#[test]
fn test_epsilon_two_is_harmonic_mean() {
    // harmonic mean of 1 and 3 is 1.5, arithmetic mean is 2
    assert_close(atkinson_index(&[1.0, 3.0], 2.0).unwrap(), 1.0 - 1.5 / 2.0);
}

#[test]
fn test_zero_share_at_high_aversion_hits_limit() {
    assert_eq!(atkinson_index(&[0.0, 5.0], 1.0).unwrap(), 1.0);
    assert_eq!(atkinson_index(&[0.0, 5.0], 2.0).unwrap(), 1.0);
}

#[test]
fn test_all_zero_distribution() {
    assert_eq!(atkinson_index(&[0.0, 0.0, 0.0], DEFAULT_EPSILON).unwrap(), 0.0);
    assert_eq!(atkinson_index(&[0.0, 0.0], 2.0).unwrap(), 0.0);
}

#[test]
fn test_higher_aversion_increases_index() {
    let shares = [1.0, 2.0, 3.0, 10.0];
    let low = atkinson_index(&shares, 0.25).unwrap();
    let mid = atkinson_index(&shares, 0.5).unwrap();
    let high = atkinson_index(&shares, 2.0).unwrap();
    assert!(low < mid && mid < high);
}

#[test]
fn test_negative_share_rejected() {
    let err = atkinson_index(&[1.0, -0.5, 2.0], DEFAULT_EPSILON).unwrap_err();
    assert_eq!(
        err,
        FairnessError::InvalidDistribution {
            index: 1,
            value: -0.5
        }
    );
}

#[test]
fn test_non_finite_share_rejected() {
    assert!(matches!(
        atkinson_index(&[1.0, f64::NAN], DEFAULT_EPSILON),
        Err(FairnessError::InvalidDistribution { index: 1, .. })
    ));
    assert!(matches!(
        atkinson_index(&[f64::INFINITY], DEFAULT_EPSILON),
        Err(FairnessError::InvalidDistribution { index: 0, .. })
    ));
}

#[test]
fn test_invalid_epsilon_rejected() {
    assert_eq!(
        atkinson_index(&[1.0, 2.0], -0.1),
        Err(FairnessError::InvalidEpsilon(-0.1))
    );
    assert!(atkinson_index(&[1.0, 2.0], f64::NAN).is_err());
}

#[test]
fn test_deterministic() {
    let shares: Vec<f64> = (0..100).map(|i| (i * 37 % 101) as f64).collect();
    let first = atkinson_index(&shares, DEFAULT_EPSILON).unwrap();
    for _ in 0..10 {
        assert_eq!(atkinson_index(&shares, DEFAULT_EPSILON).unwrap().to_bits(), first.to_bits());
    }
}

#[test]
fn test_equal_shares_at_extreme_magnitudes() {
    assert_eq!(atkinson_index(&[1e308; 4], 0.5).unwrap(), 0.0);
    assert_eq!(atkinson_index(&[1e-310; 4], 2.0).unwrap(), 0.0);
    assert_eq!(atkinson_index(&[f64::MAX; 3], 1.0).unwrap(), 0.0);
}

#[test]
fn test_scaling_does_not_change_index() {
    let base = atkinson_index(&[1.0, 3.0], 2.0).unwrap();
    let huge = atkinson_index(&[1e300, 3e300], 2.0).unwrap();
    let tiny = atkinson_index(&[1e-300, 3e-300], 2.0).unwrap();
    assert_close(huge, base);
    assert_close(tiny, base);
}
