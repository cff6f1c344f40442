//! Remote text-service client, token counting, and token-budgeted batching.

mod batch;
mod client;
mod token;

pub use batch::{Batch, TokenBatcher};
pub use client::{ChatClient, ChatClientBuilder};
pub use token::count_tokens;
