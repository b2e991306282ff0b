// Library target exists for the integration tests in tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// tests can drive the core via `quizdr::app` / `quizdr::quiz` without a
// terminal. Some items are only exercised through the binary, so suppress
// dead_code warnings.
#![allow(dead_code)]

pub mod app;
pub mod config;
pub mod quiz;
pub mod ui;

// Private: only the binary's event loop needs this
mod event;
