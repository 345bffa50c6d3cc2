// Library surface for the game engine, headless tests and the binary.
// Rendering lives in the binary (ui.rs) and is not exported here.
pub mod app_dirs;
pub mod config;
pub mod dataset;
pub mod ellipse;
pub mod error;
pub mod gaussian;
pub mod rng;
pub mod round;
pub mod runtime;
pub mod score;
pub mod session;
pub mod streak;
pub mod summary;
pub mod util;
