use approx::assert_abs_diff_eq;
use resonant_dcel::DcelOptions;
use resonant_deform::{BandEnergies, BandParameter, DeformConfig, DeformError, DeformationEngine};
use resonant_geometry::primitives::icosphere;

const Y00: f64 = 0.282_094_791_773_878_1;

#[test]
fn config_from_json_fills_defaults() {
    let config: DeformConfig = serde_json::from_str(
        r#"{
            "low": { "degree": 4, "order": -2, "magnitude": 1.0 },
            "energy_gain": 0.05
        }"#,
    )
    .unwrap();

    assert_eq!(config.low, BandParameter::try_new(4, -2, 1.0).unwrap());
    assert_eq!(config.energy_gain, 0.05);
    assert_eq!(config.mid, DeformConfig::default().mid);
    assert_eq!(config.phase_drift, 0.0);
    config.validate(40).unwrap();
}

#[test]
fn negative_degree_does_not_parse() {
    let parsed = serde_json::from_str::<DeformConfig>(
        r#"{ "high": { "degree": -3, "order": 0, "magnitude": 1.0 } }"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn parsed_order_out_of_range_is_rejected_on_install() {
    let config: DeformConfig =
        serde_json::from_str(r#"{ "mid": { "degree": 2, "order": 3, "magnitude": 1.0 } }"#).unwrap();

    let mesh = icosphere(1.0, 1).unwrap();
    let mut engine =
        DeformationEngine::new(mesh.clone(), &DcelOptions::default(), DeformConfig::default()).unwrap();
    assert!(matches!(engine.set_config(config), Err(DeformError::Harmonics(_))));
    assert!(DeformationEngine::new(mesh, &DcelOptions::default(), config).is_err());
}

#[test]
fn spectrum_drives_deformation() {
    let mut engine =
        DeformationEngine::new(icosphere(1.0, 3).unwrap(), &DcelOptions::default(), DeformConfig::default())
            .unwrap();

    let mut spectrum = vec![0u8; 30];
    spectrum[4] = 255;
    let energies = BandEnergies::from_spectrum(&spectrum).unwrap();
    assert_eq!(energies, BandEnergies::new(10.0, 0.0, 0.0));

    let stats = engine.deform(energies).unwrap();
    assert_eq!(stats.frame, 1);
    assert_eq!(stats.vertices, 642);
    assert!(stats.max_displacement > 0.0);
    assert_eq!(stats.fallback_vertices + stats.zeroed_basis + stats.clamped_vertices, 0);

    for normal in engine.normals() {
        assert_abs_diff_eq!(normal.length(), 1.0, epsilon = 1e-9);
    }
    assert!(engine.positions().iter().all(|p| p.is_finite()));
}

#[test]
fn monopole_displaces_uniformly() {
    let monopole = BandParameter::try_new(0, 0, 0.0).unwrap();
    let config = DeformConfig {
        low: monopole,
        mid: monopole,
        high: monopole,
        ..DeformConfig::default()
    };
    let mut engine =
        DeformationEngine::new(icosphere(2.0, 2).unwrap(), &DcelOptions::default(), config).unwrap();

    let energies = BandEnergies::new(1.0, 2.0, 3.0);
    let stats = engine.deform(energies).unwrap();
    let expected = 6.0 * config.energy_gain * config.radial_scale * Y00;
    assert_abs_diff_eq!(stats.max_displacement, expected, epsilon = 1e-12);

    let rest = engine.rest_pose().unwrap();
    for ((p, r), n) in engine.positions().iter().zip(rest.positions()).zip(rest.normals()) {
        assert_abs_diff_eq!((*p - *r).dot(*n), expected, epsilon = 1e-12);
    }
}

#[test]
fn welded_seams_move_together() {
    let soup = icosphere(1.0, 2).unwrap().to_soup();
    let mut engine =
        DeformationEngine::new(soup, &DcelOptions::welded(1e-6), DeformConfig::default()).unwrap();
    engine.deform(BandEnergies::new(6.0, 4.0, 2.0)).unwrap();

    let dcel = engine.dcel();
    assert!(dcel.diagnostics().welded_vertices > 0);
    for (i, vertex) in dcel.vertices().iter().enumerate() {
        let canonical = vertex.index.index();
        assert_eq!(engine.positions()[i], engine.positions()[canonical]);
        assert_eq!(engine.normals()[i], engine.normals()[canonical]);
    }
}

#[test]
fn silence_returns_to_rest() {
    let mut engine =
        DeformationEngine::new(icosphere(1.0, 2).unwrap(), &DcelOptions::default(), DeformConfig::default())
            .unwrap();
    for level in [3.0, 9.5, 0.25] {
        engine.deform(BandEnergies::new(level, level / 2.0, level / 3.0)).unwrap();
    }
    engine.deform(BandEnergies::ZERO).unwrap();

    let rest = engine.rest_pose().unwrap();
    assert_eq!(engine.positions(), rest.positions());
    assert_eq!(engine.frame(), 4);
}

#[test]
fn quantized_drift_reuses_cached_harmonics() {
    let config = DeformConfig {
        phase_drift: 0.5,
        angle_quantum: 1e-2,
        ..DeformConfig::default()
    };
    let mut engine =
        DeformationEngine::new(icosphere(1.0, 2).unwrap(), &DcelOptions::default(), config).unwrap();

    let energies = BandEnergies::new(5.0, 5.0, 5.0);
    for _ in 0..3 {
        assert!(engine.deform(energies).unwrap().basis_rebuilt);
    }
    let stats = engine.harmonic_stats();
    assert!(stats.hits >= 2 * stats.misses);
    assert!(engine.positions().iter().all(|p| p.is_finite()));
}
