//! Copydesk completion-service adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for OpenAI-compatible chat
//! completion APIs (OpenAI itself, OpenRouter, Ollama, LM Studio and other
//! servers exposing `POST {base_url}/chat/completions`). Additional providers
//! are added as new `impl` blocks in this crate without any changes to the
//! `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting and response
//! decoding live here. The [`pipeline`] crate sees only
//! [`pipeline::LlmProvider`].

mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider, DEFAULT_BASE_URL, DEFAULT_MODEL};
