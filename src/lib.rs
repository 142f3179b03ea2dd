//! # Mentora - AI-Powered Education Server
//!
//! Mentora serves three AI teaching features over JSON HTTP, backed by any of
//! the supported generation providers, plus CRUD for teacher-authored lesson
//! modules. The reusable runtime lives in `mentora-core`; this crate carries
//! the HTTP surface: route configuration, the uniform error body, and the
//! shared application state.
//!
//! ## Quickstart
//!
//! ```bash
//! # Export the API key for your provider
//! export GEMINI_API_KEY="your-key"
//!
//! # Launch the server (reads mentora.toml from the working directory)
//! mentora --port 8080
//!
//! # Summarize a lesson
//! curl -s localhost:8080/api/flows/summarize \
//!   -H 'content-type: application/json' \
//!   -d '{"topic": "Photosynthesis", "lessonContent": "..."}'
//! ```
//!
//! Persist long-lived defaults in `mentora.toml` instead of flags:
//!
//! ```toml
//! [provider]
//! name = "gemini"
//! model = "gemini-2.5-flash"
//! ```
//!
//! The binary in `main.rs` wires the routes to a configured provider;
//! integration tests assemble the same `App` against a scripted one.

pub mod error;
pub mod routes;
pub mod state;
