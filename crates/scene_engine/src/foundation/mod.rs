//! Shared building blocks: nalgebra aliases and camera math, frame timing
//! and logger setup.

pub mod math;
pub mod time;
pub mod logging;
