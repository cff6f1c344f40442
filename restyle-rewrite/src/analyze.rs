//! Bulk analysis path: token-budgeted batches of extracted strings and symbol
//! names, one analysis request per batch.

use restyle_core::{GenerationRequest, Generator, Message};
use restyle_llm::{count_tokens, Batch, TokenBatcher};
use tracing::warn;

pub struct AnalyzerConfig {
    /// Empty defers to the client's default model.
    pub model: String,
    pub temperature: Option<f32>,
    /// Strings no longer than this are excluded from the string batches.
    pub min_length: usize,
    pub token_ceiling: usize,
    pub reply_budget: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            temperature: None,
            min_length: 20,
            token_ceiling: 3000,
            reply_budget: 400,
        }
    }
}

/// Asks the service what it can tell about a program from its strings and
/// symbol names, batch by batch.
pub struct ProgramAnalyzer<G> {
    generator: G,
    config: AnalyzerConfig,
}

impl<G: Generator> ProgramAnalyzer<G> {
    pub fn new(generator: G) -> Self {
        Self::with_config(generator, AnalyzerConfig::default())
    }

    pub fn with_config(generator: G, config: AnalyzerConfig) -> Self {
        Self { generator, config }
    }

    /// Produces a newline-joined description from every batch reply. Symbol
    /// names bypass the minimum-length filter since they are short by nature.
    /// A failed batch contributes nothing and does not abort the aggregate.
    pub async fn describe(&self, strings: &[String], symbols: &[String]) -> String {
        let batcher = TokenBatcher::new(
            count_tokens,
            self.config.min_length,
            self.config.token_ceiling,
        );
        let mut replies = Vec::new();
        self.collect(&batcher.batch(strings, false), "strings", &mut replies)
            .await;
        self.collect(
            &batcher.batch(symbols, true),
            "names of symbols",
            &mut replies,
        )
        .await;
        replies.join("\n")
    }

    async fn collect(&self, batches: &[Batch], label: &str, replies: &mut Vec<String>) {
        for batch in batches {
            let prompt = format!(
                "Here are {label} found in the binary:\n{}\n\nBased on these, what is everything \
                 you can tell me about this program? Explain your reasoning as much as possible.",
                batch.texts.join("\n")
            );
            let request = GenerationRequest {
                model: self.config.model.clone(),
                messages: vec![Message::user(prompt)],
                max_tokens: self.config.reply_budget,
                temperature: self.config.temperature,
            };
            match self.generator.generate(request).await {
                Ok(reply) => replies.push(reply),
                Err(err) => {
                    warn!(error = %err, texts = batch.texts.len(), "skipped failed analysis batch");
                }
            }
        }
    }
}

impl<G> ProgramAnalyzer<G> {
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
