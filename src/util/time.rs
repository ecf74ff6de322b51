//! Time utilities for game simulation

/// Tick rate configuration
pub const SIMULATION_TPS: u32 = 60; // 60 simulation ticks per second
pub const REPORT_TPS: u32 = 10; // 10 position reports per second
pub const TICK_DURATION_MICROS: u64 = 1_000_000 / SIMULATION_TPS as u64;

/// Simulation ticks between two position reports
pub const REPORT_INTERVAL_TICKS: u32 = SIMULATION_TPS / REPORT_TPS;

/// Calculate delta time for physics (in seconds)
pub fn tick_delta() -> f32 {
    1.0 / SIMULATION_TPS as f32
}

/// Convert a duration in seconds into a whole number of simulation ticks
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs * SIMULATION_TPS as f32).round() as u64
}
