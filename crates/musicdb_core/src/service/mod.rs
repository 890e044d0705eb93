//! Use-case services over the music repository.
//!
//! # Responsibility
//! - Group multi-table read/write flows used by the CLI.
//! - Keep callers decoupled from storage details.

pub mod music_service;
