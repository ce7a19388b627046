//! tts-console-rs: terminal client for a text-to-speech web backend.
//!
//! This crate keeps a local copy of the backend's voice catalog and
//! generation history in sync, submits synthesis requests and resolves the
//! resulting playback and download locators.

pub mod backend;
pub mod cli;
pub mod config;
pub mod present;
pub mod sync;
