use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use restyle_core::{GenerationRequest, Generator, RestyleError};
use restyle_rewrite::{AnalyzerConfig, ProgramAnalyzer};

struct SequencedGenerator {
    outcomes: Mutex<VecDeque<Result<String, RestyleError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl SequencedGenerator {
    fn new(outcomes: Vec<Result<String, RestyleError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Generator for SequencedGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, RestyleError> {
        self.requests.lock().unwrap().push(request);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("unscripted reply".to_string()))
    }
}

fn config() -> AnalyzerConfig {
    AnalyzerConfig {
        min_length: 3,
        ..AnalyzerConfig::default()
    }
}

#[tokio::test]
async fn joins_string_and_symbol_batch_replies() {
    let generator = SequencedGenerator::new(vec![
        Ok("it parses network packets".to_string()),
        Ok("symbols suggest a TLS stack".to_string()),
    ]);
    let analyzer = ProgramAnalyzer::with_config(generator, config());

    let strings = vec![
        "connection reset by peer".to_string(),
        "handshake failed".to_string(),
    ];
    let symbols = vec!["a".to_string(), "b".to_string()];

    let description = analyzer.describe(&strings, &symbols).await;
    assert_eq!(
        description,
        "it parses network packets\nsymbols suggest a TLS stack"
    );
}

#[tokio::test]
async fn prompts_label_strings_and_symbols_separately() {
    let generator = SequencedGenerator::new(vec![Ok("first".to_string()), Ok("second".to_string())]);
    let analyzer = ProgramAnalyzer::with_config(generator, config());

    let strings = vec!["connection reset by peer".to_string()];
    // Short symbol names only survive because the symbol pass ignores the
    // minimum-length filter.
    let symbols = vec!["ab".to_string()];
    analyzer.describe(&strings, &symbols).await;

    let requests = analyzer.generator().requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].messages[0]
        .content
        .starts_with("Here are strings found in the binary:\nconnection reset by peer"));
    assert!(requests[1].messages[0]
        .content
        .starts_with("Here are names of symbols found in the binary:\nab"));
    assert!(requests.iter().all(|request| request.max_tokens == 400));
}

#[tokio::test]
async fn a_failed_batch_contributes_nothing() {
    let generator = SequencedGenerator::new(vec![
        Err(RestyleError::Provider("model is overloaded".to_string())),
        Ok("only the symbols answered".to_string()),
    ]);
    let analyzer = ProgramAnalyzer::with_config(generator, config());

    let strings = vec!["connection reset by peer".to_string()];
    let symbols = vec!["tls_handshake".to_string()];
    let description = analyzer.describe(&strings, &symbols).await;
    assert_eq!(description, "only the symbols answered");
}

#[tokio::test]
async fn strings_below_the_minimum_are_not_sent() {
    let generator = SequencedGenerator::new(vec![]);
    let analyzer = ProgramAnalyzer::with_config(generator, config());

    let strings = vec!["ab".to_string()];
    let description = analyzer.describe(&strings, &[]).await;
    assert_eq!(description, "");
    assert!(analyzer.generator().requests.lock().unwrap().is_empty());
}
