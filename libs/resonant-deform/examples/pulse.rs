//! Drives an icosphere with a synthetic spectrum and logs every frame.
//!
//! ```text
//! RUST_LOG=debug cargo run -p resonant-deform --example pulse
//! ```

use std::f64::consts::TAU;

use resonant_dcel::DcelOptions;
use resonant_deform::{BandEnergies, DeformConfig, DeformationEngine};
use resonant_geometry::primitives::icosphere;
use tracing::info;

const BINS: usize = 96;
const FRAMES: usize = 120;

/// Three sines sweeping through the low, mid and high thirds of the bins.
fn synthetic_spectrum(frame: usize) -> Vec<u8> {
    let t = frame as f64 / FRAMES as f64;
    (0..BINS)
        .map(|bin| {
            let x = bin as f64 / BINS as f64;
            let kick = (TAU * (2.0 * t + x)).sin().max(0.0);
            let hum = 0.5 + 0.5 * (TAU * (5.0 * t - 3.0 * x)).sin();
            let hiss = if (bin + frame) % 7 == 0 { 1.0 } else { 0.2 };
            let level = if x < 1.0 / 3.0 {
                kick
            } else if x < 2.0 / 3.0 {
                hum * 0.6
            } else {
                hiss * 0.4
            };
            (level * 255.0).round() as u8
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mesh = icosphere(1.0, 4)?;
    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Meshed icosphere"
    );

    let mut engine = DeformationEngine::new(mesh, &DcelOptions::default(), DeformConfig::default())?;

    for frame in 0..FRAMES {
        let energies = BandEnergies::from_spectrum(&synthetic_spectrum(frame))?;
        let stats = engine.deform(energies)?;
        if frame % 10 == 0 {
            info!(
                frame = stats.frame,
                low = energies.low,
                mid = energies.mid,
                high = energies.high,
                max_displacement = stats.max_displacement,
                "Deformed"
            );
        }
    }

    let drifting = DeformConfig {
        phase_drift: 0.5,
        angle_quantum: 1e-3,
        ..*engine.config()
    };
    engine.set_config(drifting)?;
    for frame in 0..FRAMES / 4 {
        engine.deform(BandEnergies::from_spectrum(&synthetic_spectrum(frame))?)?;
    }

    let stats = engine.harmonic_stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        hit_rate = stats.hit_rate(),
        "Harmonic cache"
    );

    engine.deform(BandEnergies::ZERO)?;
    let rest = engine.rest_pose().map(|r| r.positions().to_vec()).unwrap_or_default();
    info!(at_rest = engine.positions() == rest.as_slice(), "Silence");
    Ok(())
}
