use anyhow::Result;
use log::{error, info, trace, warn};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

use orbitsim::{build_simulation, SimulationConfig};

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    info!("Starting orbitsim (headless)...");

    // --- Load Configuration ---
    let config = SimulationConfig::load("config.toml")?;

    // --- Build Scenario ---
    info!("Building simulation scenario...");
    let mut sim = build_simulation(&config)?;
    info!("Scenario initialized with {} bodies.", sim.body_count());

    // --- Simulation Loop ---
    let timestep_s = sim.settings().timestep_s;
    let total_steps = (config.timing.total_time_s / timestep_s).ceil() as u64;
    let record_interval_s = config.timing.record_interval_s.max(0.0);
    let mut record_interval_steps = (record_interval_s / timestep_s).max(1.0).round() as u64;

    if record_interval_steps == 0 {
        warn!(
            "Record interval ({:.2} s) is smaller than the timestep ({:.2} s). Recording every step.",
            record_interval_s, timestep_s
        );
        record_interval_steps = 1;
    }
    info!(
        "Recording snapshot every {} steps ({:.1} simulated seconds).",
        record_interval_steps,
        record_interval_steps as f64 * timestep_s
    );

    info!("Starting simulation loop for {} steps...", total_steps);
    let start_time = Instant::now();
    let mut previous_print_time = start_time;

    // --- Initial Snapshot (t = 0) ---
    sim.record_snapshot();

    for step in 0..total_steps {
        let step_start_time = Instant::now();
        if let Err(e) = sim.step() {
            error!("Error during simulation step {}: {}", step + 1, e);
            anyhow::bail!("Simulation step failed.");
        }
        let step_duration = step_start_time.elapsed();

        // Print status periodically
        let current_time = Instant::now();
        let print_interval_secs = 5.0;
        let should_print_status =
            current_time.duration_since(previous_print_time).as_secs_f64() >= print_interval_secs;
        let is_record_step = (step + 1) % record_interval_steps == 0;
        let is_last_step = step == total_steps - 1;

        if should_print_status || is_record_step || is_last_step {
            info!(
                "Step [{}/{}] ({:.1} s) | Bodies: {} | Step Time: {:6.3} ms | Elapsed: {:.2} s",
                step + 1,
                total_steps,
                sim.time_s(),
                sim.body_count(),
                step_duration.as_secs_f64() * 1000.0,
                start_time.elapsed().as_secs_f64()
            );
            previous_print_time = current_time;

            if is_record_step || is_last_step {
                sim.record_snapshot();
            }
        } else {
            trace!(
                "Step [{}/{}] completed in {:.3} ms",
                step + 1,
                total_steps,
                step_duration.as_secs_f64() * 1000.0
            );
        }
    }

    let total_duration = start_time.elapsed();
    info!(
        "Simulation finished in {:.3} seconds ({} snapshots recorded).",
        total_duration.as_secs_f64(),
        sim.recorded_snapshots().len()
    );

    // --- Save Recorded Data ---
    if config.output.save_snapshots {
        let output_format = config.output.format.as_deref().unwrap_or("json");
        let snapshots = sim.recorded_snapshots();

        match output_format {
            "json" => {
                let filename = format!("{}_snapshots.json", config.output.base_filename);
                match File::create(&filename) {
                    Ok(mut file) => match serde_json::to_string(snapshots) {
                        Ok(json_string) => {
                            if let Err(e) = file.write_all(json_string.as_bytes()) {
                                error!("Error writing snapshot JSON to '{}': {}", filename, e);
                            } else {
                                info!("All snapshots saved to {}", filename);
                            }
                        }
                        Err(e) => error!("Error serializing snapshots to JSON: {}", e),
                    },
                    Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
                }
            }
            "bincode" => {
                let filename = format!("{}_snapshots.bin", config.output.base_filename);
                match File::create(&filename) {
                    Ok(file) => match bincode::serialize_into(file, snapshots) {
                        Ok(_) => info!("All snapshots saved to {} (binary format)", filename),
                        Err(e) => error!("Error serializing snapshots to bincode: {}", e),
                    },
                    Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
                }
            }
            "messagepack" => {
                let filename = format!("{}_snapshots.msgpack", config.output.base_filename);
                match &mut File::create(&filename) {
                    Ok(file) => match rmp_serde::encode::write(file, snapshots) {
                        Ok(_) => info!("All snapshots saved to {} (MessagePack format)", filename),
                        Err(e) => error!("Error serializing snapshots to MessagePack: {}", e),
                    },
                    Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
                }
            }
            other => {
                warn!("Unknown output format: {}. Using JSON instead.", other);
                let filename = format!("{}_snapshots.json", config.output.base_filename);
                match File::create(&filename) {
                    Ok(mut file) => match serde_json::to_string(snapshots) {
                        Ok(json_string) => {
                            if let Err(e) = file.write_all(json_string.as_bytes()) {
                                error!("Error writing snapshot JSON to '{}': {}", filename, e);
                            } else {
                                info!("All snapshots saved to {}", filename);
                            }
                        }
                        Err(e) => error!("Error serializing snapshots to JSON: {}", e),
                    },
                    Err(e) => error!("Error creating snapshot file '{}': {}", filename, e),
                }
            }
        }
    } else {
        info!("Skipping snapshot export as per config (save_snapshots is false).");
    }

    // Save final positions if requested (separate from full snapshots)
    if config.output.save_positions {
        let filename = format!("{}_final_positions.csv", config.output.base_filename);

        match csv::Writer::from_path(&filename) {
            Ok(mut writer) => {
                writer.write_record(["tag", "x_m", "y_m", "vx_m_s", "vy_m_s"])?;
                for body in sim.bodies() {
                    writer.write_record(&[
                        body.tag().to_string(),
                        format!("{:.6e}", body.real_position.x),
                        format!("{:.6e}", body.real_position.y),
                        format!("{:.6e}", body.velocity.x),
                        format!("{:.6e}", body.velocity.y),
                    ])?;
                }
                writer.flush()?;
                info!("Final positions saved to {}", filename);
            }
            Err(e) => error!("Error saving CSV file '{}': {}", filename, e),
        }
    } else {
        info!("Skipping saving final positions as per config.");
    }

    info!("orbitsim complete.");
    Ok(())
}
