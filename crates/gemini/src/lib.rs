//! REST client for the Gemini `generateContent` API.
//!
//! Provides the typed wire format, an HTTP client with the error split
//! between transport failures and non-2xx API responses, and the
//! [`ContentGenerator`](client::ContentGenerator) seam the pipeline is
//! written against so tests can substitute a scripted backend.

pub mod client;
pub mod types;

pub use client::{ContentGenerator, GeminiClient, GeminiError, GeminiModel};
