use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

// The cl100k_base vocabulary load is expensive, so the instance is built once
// and shared process-wide.
static CL100K_BASE: OnceLock<CoreBPE> = OnceLock::new();

/// Counts tokens in `text` with the cl100k_base encoding. Used as an estimate
/// of remote cost, not as a character-accurate bound.
pub fn count_tokens(text: &str) -> usize {
    let bpe = CL100K_BASE
        .get_or_init(|| tiktoken_rs::cl100k_base().expect("cl100k_base vocabulary is bundled"));
    bpe.encode_with_special_tokens(text).len()
}
