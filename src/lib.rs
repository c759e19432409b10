//! # Connect Four
//!
//! A Connect Four game engine. It owns the board, enforces move legality,
//! detects wins and draws, and keeps turn order. Presentation code reads
//! engine state and forwards moves; it subscribes to the engine to learn
//! about changes.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, win detection, engine
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
