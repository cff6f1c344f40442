//! The constrained rewrite loop: a multi-turn negotiation that asks the
//! remote service to restyle one string, checks every reply against the hard
//! constraints (length, format specifiers), and re-prompts until a reply
//! complies or the attempt budget runs out.

use restyle_core::{extract_specifiers, GenerationRequest, Generator, Message, RestyleError};
use restyle_llm::count_tokens;
use tracing::{debug, warn};

use crate::Voice;

const SAME_SPECIFIERS_PROMPT: &str =
    "Use the same format specifiers in the same order as the original.";
const MAKE_SHORTER_PROMPT: &str = "Make it shorter.";

const IDENTIFIER_CLAUSE: &str =
    "It is EXTREMELY important that your entire response contains no spaces.";
const SENTENCE_CLAUSE: &str = "If the input string contains any C format specifiers, then it is \
     EXTREMELY important that your response contains the same specifiers in the same order.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringClass {
    Identifier,
    Sentence,
}

impl StringClass {
    /// Strings without spaces are assumed to be identifiers and must remain
    /// space-free.
    pub fn classify(text: &str) -> Self {
        if text.contains(' ') {
            StringClass::Sentence
        } else {
            StringClass::Identifier
        }
    }
}

pub struct RewriteConfig {
    pub voice: Voice,
    /// Empty defers to the client's default model.
    pub model: String,
    pub temperature: Option<f32>,
    /// Strings shorter than this are left untouched by the patch driver.
    pub min_length: usize,
    /// Corrective turns allowed after the first attempt.
    pub max_retries: usize,
    pub identifier_clause: String,
    pub sentence_clause: String,
}

impl RewriteConfig {
    pub fn new(voice: Voice) -> Self {
        Self {
            voice,
            model: String::new(),
            temperature: None,
            min_length: 50,
            max_retries: 3,
            identifier_clause: IDENTIFIER_CLAUSE.to_string(),
            sentence_clause: SENTENCE_CLAUSE.to_string(),
        }
    }
}

/// Per-string negotiation record, updated once per turn.
#[derive(Clone, Debug)]
pub struct RewriteAttempt {
    pub class: StringClass,
    pub target_max: usize,
    pub attempts: usize,
    pub candidate: String,
    pub length_ok: bool,
    pub specifiers_ok: bool,
}

impl RewriteAttempt {
    fn new(class: StringClass, target_max: usize) -> Self {
        Self {
            class,
            target_max,
            attempts: 0,
            candidate: String::new(),
            length_ok: false,
            specifiers_ok: false,
        }
    }

    fn observe(&mut self, reply: &str, wanted: &[String]) {
        self.attempts += 1;
        self.candidate = match self.class {
            // The service likes to wrap identifiers in commentary; assume the
            // longest word in the reply is the rewrite itself.
            StringClass::Identifier => reply
                .split_whitespace()
                .max_by_key(|word| word.len())
                .unwrap_or_default()
                .to_string(),
            StringClass::Sentence => reply.to_string(),
        };
        self.length_ok = self.candidate.chars().count() <= self.target_max;
        // An empty requirement is vacuously satisfied; noise in the reply
        // must not fail it.
        self.specifiers_ok = wanted.is_empty() || extract_specifiers(&self.candidate) == wanted;
    }

    fn satisfied(&self) -> bool {
        self.length_ok && self.specifiers_ok
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// ASCII-only text, always shorter than the source.
    Rewritten { text: String, attempts: usize },
    /// No reply reproduced the source's format specifiers; emitting one would
    /// corrupt runtime formatting, so nothing is produced.
    Abandoned { attempts: usize },
}

/// Drives one constrained rewrite per call. Holds no per-string state, so a
/// single `Rewriter` can serve many concurrent loops.
pub struct Rewriter<G> {
    generator: G,
    pub(crate) config: RewriteConfig,
}

impl<G: Generator> Rewriter<G> {
    pub fn new(generator: G, config: RewriteConfig) -> Self {
        Self { generator, config }
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Negotiates a compliant rewrite of `text`. Transient service failures
    /// are absorbed below the generator seam; any error surfacing here is
    /// fatal for this string only.
    pub async fn rewrite(&self, text: &str) -> Result<RewriteOutcome, RestyleError> {
        let target_max = text.chars().count();
        let class = StringClass::classify(text);
        let wanted = extract_specifiers(text);
        let mut attempt = RewriteAttempt::new(class, target_max);

        let mut history = vec![Message::user(self.first_prompt(text, class))];
        // Allow room for creative replies on the first attempt; later turns
        // exist purely to converge.
        let mut reply = self
            .request(history.clone(), (2 * count_tokens(text)) as u32)
            .await?;
        attempt.observe(&reply, &wanted);

        while !attempt.satisfied() && attempt.attempts <= self.config.max_retries {
            history.push(Message::assistant(reply));
            let correction = if attempt.specifiers_ok {
                MAKE_SHORTER_PROMPT
            } else {
                SAME_SPECIFIERS_PROMPT
            };
            history.push(Message::user(correction));
            reply = self
                .request(history.clone(), (2 * target_max) as u32)
                .await?;
            attempt.observe(&reply, &wanted);
        }

        if !attempt.specifiers_ok {
            warn!(
                source = text,
                attempts = attempt.attempts,
                "no rewrite with matching format specifiers"
            );
            return Ok(RewriteOutcome::Abandoned {
                attempts: attempt.attempts,
            });
        }

        // The service sometimes slips in emojis and the like even when asked
        // not to.
        let cleaned: String = attempt
            .candidate
            .chars()
            .filter(|c| c.is_ascii() && (c.is_ascii_graphic() || c.is_ascii_whitespace()))
            .collect();
        // Truncate past the length requirement in every case, reserving one
        // character for the terminator.
        let text_out: String = cleaned.chars().take(target_max.saturating_sub(1)).collect();
        debug!(source = text, rewritten = %text_out, "rewrote string");
        Ok(RewriteOutcome::Rewritten {
            text: text_out,
            attempts: attempt.attempts,
        })
    }

    fn first_prompt(&self, text: &str, class: StringClass) -> String {
        let voice = &self.config.voice;
        let clause = match class {
            StringClass::Identifier => &self.config.identifier_clause,
            StringClass::Sentence => &self.config.sentence_clause,
        };
        format!(
            "You are a {}. I will send a message and you will respond by making the text of the \
             message more {}. The text you generate must be shorter or equal to the length of the \
             original message. It is EXTREMELY important that your version is shorter than the \
             original and contains only ASCII characters. {} If you understand, make the \
             following message more {}: \n{}",
            voice.noun(),
            voice.adjective(),
            clause,
            voice.adjective(),
            text
        )
    }

    async fn request(
        &self,
        messages: Vec<Message>,
        max_tokens: u32,
    ) -> Result<String, RestyleError> {
        self.generator
            .generate(GenerationRequest {
                model: self.config.model.clone(),
                messages,
                max_tokens,
                temperature: self.config.temperature,
            })
            .await
    }
}
