use restyle_llm::TokenBatcher;

// 1 token per ~4 characters, the rough shape of the real estimator.
fn approx(text: &str) -> usize {
    text.len().div_ceil(4)
}

#[test]
fn skips_texts_at_or_below_min_length() {
    let batcher = TokenBatcher::new(approx, 10, 3000);
    let texts = vec!["tiny".to_string(), "x".repeat(10), "y".repeat(11)];
    let batches = batcher.batch(&texts, false);
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].texts, vec!["y".repeat(11)]);
}

#[test]
fn ignore_min_keeps_short_texts() {
    let batcher = TokenBatcher::new(approx, 10, 3000);
    let symbols = vec!["sym_a".to_string(), "sym_b".to_string()];
    let batches = batcher.batch(&symbols, true);
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].texts, symbols);
}

#[test]
fn seals_batch_before_crossing_the_ceiling() {
    // Each text costs ~25 tokens; the ceiling fits exactly two.
    let texts: Vec<String> = (0..4u8).map(|_| "t".repeat(100)).collect();
    let batcher = TokenBatcher::new(approx, 5, 50);
    let batches = batcher.batch(&texts, false);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].texts.len(), 2);
    assert_eq!(batches[1].texts.len(), 2);
    assert!(batches.iter().all(|batch| batch.token_count <= 50));
}

#[test]
fn oversized_text_becomes_a_singleton_batch() {
    let batcher = TokenBatcher::new(approx, 5, 100);
    let texts = vec!["a".repeat(10), "b".repeat(4000), "c".repeat(10)];
    let batches = batcher.batch(&texts, false);
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].texts, vec!["a".repeat(10)]);
    assert_eq!(batches[1].texts, vec!["b".repeat(4000)]);
    assert!(batches[1].token_count > 100);
    assert_eq!(batches[2].texts, vec!["c".repeat(10)]);
}

#[test]
fn preserves_input_order_within_and_across_batches() {
    let texts: Vec<String> = (0..6).map(|i| format!("text number {i} padded")).collect();
    let batcher = TokenBatcher::new(approx, 5, 12);
    let batches = batcher.batch(&texts, false);
    let flattened: Vec<String> = batches.into_iter().flat_map(|batch| batch.texts).collect();
    assert_eq!(flattened, texts);
}

#[test]
fn trailing_batch_is_flushed() {
    let batcher = TokenBatcher::new(approx, 0, 1000);
    let batches = batcher.batch(&["hello world".to_string()], false);
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].texts, vec!["hello world".to_string()]);
}

#[test]
fn fully_filtered_input_produces_no_batches() {
    let batcher = TokenBatcher::new(approx, 20, 1000);
    let batches = batcher.batch(&["short".to_string(), "also short".to_string()], false);
    assert!(batches.is_empty());
}
