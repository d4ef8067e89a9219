use std::f64::consts::PI;

use resonant_harmonics::{real_spherical_harmonic, ShEvaluator};

/// Midpoint-rule inner product of two real harmonics over the unit sphere.
fn inner_product(a: (u32, i32), b: (u32, i32)) -> f64 {
    let (n_theta, n_phi) = (180, 360);
    let d_theta = PI / n_theta as f64;
    let d_phi = 2.0 * PI / n_phi as f64;

    let mut sum = 0.0;
    for i in 0..n_theta {
        let theta = (i as f64 + 0.5) * d_theta;
        let weight = theta.sin() * d_theta * d_phi;
        for j in 0..n_phi {
            let phi = (j as f64 + 0.5) * d_phi;
            sum += real_spherical_harmonic(a.0, a.1, theta, phi)
                * real_spherical_harmonic(b.0, b.1, theta, phi)
                * weight;
        }
    }
    sum
}

fn basis(max_degree: u32) -> Vec<(u32, i32)> {
    (0..=max_degree)
        .flat_map(|l| (-(l as i32)..=l as i32).map(move |m| (l, m)))
        .collect()
}

#[test]
fn low_degree_basis_is_orthonormal() {
    let basis = basis(2);
    for (i, &a) in basis.iter().enumerate() {
        for &b in &basis[i..] {
            let expected = if a == b { 1.0 } else { 0.0 };
            let got = inner_product(a, b);
            assert!(
                (got - expected).abs() < 1e-3,
                "<Y{a:?}, Y{b:?}> = {got}, expected {expected}"
            );
        }
    }
}

#[test]
fn evaluator_agrees_with_direct_formula_across_sphere() {
    let mut sh = ShEvaluator::new(12).unwrap();
    for &(l, m) in &basis(12) {
        for k in 0..16 {
            let theta = PI * (k as f64 + 0.25) / 16.0;
            let phi = -PI + 2.0 * PI * k as f64 / 16.0;
            let cached = sh.evaluate(l, m, theta, phi).unwrap();
            let direct = real_spherical_harmonic(l, m, theta, phi);
            assert!(
                (cached - direct).abs() <= 1e-12 * direct.abs().max(1.0),
                "Y({l}, {m}) at ({theta}, {phi}): {cached} vs {direct}"
            );
        }
    }
}

#[test]
fn addition_theorem_sums_to_constant() {
    // Σ_m Y(l, m)² = (2l + 1) / 4π at every point.
    let mut sh = ShEvaluator::new(8).unwrap();
    for l in 0..=8u32 {
        let expected = (2 * l + 1) as f64 / (4.0 * PI);
        for (theta, phi) in [(0.1, 0.2), (1.3, -2.0), (2.7, 3.1)] {
            let sum: f64 = (-(l as i32)..=l as i32)
                .map(|m| sh.evaluate(l, m, theta, phi).unwrap().powi(2))
                .sum();
            assert!((sum - expected).abs() < 1e-10, "l = {l}: {sum} vs {expected}");
        }
    }
}

#[test]
fn repeated_frames_hit_the_cache() {
    let mut sh = ShEvaluator::new(8).unwrap();
    let angles: Vec<(f64, f64)> = (0..50).map(|i| (i as f64 * 0.06, i as f64 * 0.12)).collect();

    for _ in 0..3 {
        for &(theta, phi) in &angles {
            sh.evaluate(8, -5, theta, phi).unwrap();
        }
    }

    let stats = sh.harmonic_stats();
    assert_eq!(stats.misses, 50);
    assert_eq!(stats.hits, 100);
    assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-12);
}
