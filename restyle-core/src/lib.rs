mod error;
mod generate;
mod message;
mod retry;
mod specifier;

pub use error::RestyleError;
pub use generate::{GenerationRequest, Generator};
pub use message::{Message, Role};
pub use retry::{retry_with_backoff, BackoffPolicy};
pub use specifier::{extract_specifiers, is_compatible};
