//! # qrvc Architecture
//!
//! qrvc prepares a QR code and a vCard file from contact data. The library is
//! UI-agnostic; the `qrvc` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts in the terminal, prints output │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - load → edit → publish, plus the bill of materials        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────┬──────────────────┬───────────────────────┐
//! │ model + codec    │ editor           │ store + render        │
//! │ Record, vCard    │ edit session,    │ CardStore trait,      │
//! │ text round trip  │ Prompter trait   │ QR raster             │
//! └──────────────────┴──────────────────┴───────────────────────┘
//! ```
//!
//! ## The Record
//!
//! A [`model::Record`] keeps every property of the card, including the ones
//! qrvc never edits, so that reading and writing a card loses nothing.
//! Repeated properties such as `TEL` are told apart by their `TYPE` tags; see
//! [`model`] for the rules.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes and returns plain Rust values. It never
//! writes to stdout/stderr, never exits the process, and reaches the user only
//! through the [`editor::Prompter`] trait and files only through
//! [`store::CardStore`].
//!
//! ## Testing Strategy
//!
//! 1. **Codec and model**: unit tests for escaping, folding, typed fields and
//!    byte-exact encoding.
//! 2. **Editor**: state machine tests driven by a scripted prompter.
//! 3. **Commands and API**: pipeline tests against `InMemoryStore`.
//! 4. **CLI**: end-to-end tests of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: facade
//! - [`codec`]: vCard decode/encode
//! - [`commands`]: business logic
//! - [`config`]: settings resolution
//! - [`editor`]: interactive edit session
//! - [`error`]: error types
//! - [`model`]: record and field types
//! - [`render`]: QR code raster
//! - [`store`]: transport

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod render;
pub mod store;
