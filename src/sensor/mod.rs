// src/sensor/mod.rs

// One converter on one chip-select line, with its read cache.
mod unit;

// --- Public Re-exports ---
pub use unit::{DiagnosticHook, SensorState, SensorUnit};
