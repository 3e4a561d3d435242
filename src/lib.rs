//! Typing session engine: tokenised practice text, a cursor/error state
//! machine over it, and rolling speed/accuracy metrics smoothed for display.
//!
//! The terminal front end in `main.rs` is one host for these pieces; nothing
//! here depends on it.

pub mod config;
pub mod engine;
pub mod generator;
pub mod keyboard;
pub mod session;
