//! Constraint-checked rewriting of strings lifted from binaries: the
//! multi-turn rewrite loop, the per-resource patch driver, and the bulk
//! program-analysis path.

mod analyze;
mod patch;
mod rewrite;
mod voice;

pub use analyze::{AnalyzerConfig, ProgramAnalyzer};
pub use patch::{StringPatch, StringResource};
pub use rewrite::{RewriteAttempt, RewriteConfig, RewriteOutcome, Rewriter, StringClass};
pub use voice::{CustomVoice, Voice, VoicePreset};
