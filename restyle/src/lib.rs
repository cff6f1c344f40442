//! Constraint-checked LLM rewriting for strings lifted from binaries.
//!
//! Re-exports the whole public surface: the error taxonomy, message and
//! generator seam, backoff retrier, and specifier validator from
//! `restyle-core`; the chat client, tokenizer, and token batcher from
//! `restyle-llm`; the rewrite loop, patch driver, voices, and program
//! analyzer from `restyle-rewrite`.

pub use restyle_core::*;
pub use restyle_llm::*;
pub use restyle_rewrite::*;
