//! Snake Arcade - a terminal snake game with food kinds, power-ups and a maze mode
//!
//! This library provides:
//! - Core game rules and the session lifecycle (game module)
//! - High score persistence (storage module)
//! - Sound cues for game events (audio module)
//! - TUI rendering and keyboard mapping (render, input modules)
//! - The interactive play loop (app module)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod storage;
