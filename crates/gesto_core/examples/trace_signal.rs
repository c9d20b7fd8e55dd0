//! Example: Trace a hysteresis volume over a synthetic hand path.
//!
//! Run with: cargo run --example trace_signal -- [thresholds.json]
//!
//! Without a file, a symmetric 3D box is used: active within 0.5 of the
//! origin on every axis, persisting out to 1.0.

use std::env;

use gesto_core::{Hysteresis, HysteresisRange, HysteresisVolume, VolumeConfig};
use gesto_math::DVec3;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut volume: HysteresisVolume<3> = match args.get(1) {
        Some(path) => {
            println!("Loading thresholds: {}", path);
            VolumeConfig::load(path)?.build()?
        }
        None => {
            let axis = HysteresisRange::symmetric(Hysteresis::new(1.0, 0.5));
            HysteresisVolume::new([axis; 3])
        }
    };

    println!("Conditions: {}", volume.conditions());
    println!("\n  step      x      y      z   active  interp");

    // A hand sweeping through the box along x, slightly off-center
    let steps = 24;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let hand = DVec3::new(-1.5 + 3.0 * t, 0.1, -0.2);
        let state = volume.update_vec(hand);
        println!(
            "  {:>4}  {:>5.2}  {:>5.2}  {:>5.2}   {:>6}  {:>6.3}",
            step, hand.x, hand.y, hand.z, state.active, state.interpolated
        );
    }

    println!("\n--- Thresholds ---");
    println!("{}", VolumeConfig::from_volume(&volume).to_json()?);

    Ok(())
}
