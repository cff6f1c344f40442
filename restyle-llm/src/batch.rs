/// A token-budgeted group of texts sent together in one remote request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    pub texts: Vec<String>,
    pub token_count: usize,
}

/// Groups candidate texts into batches whose estimated token cost stays under
/// a fixed ceiling. The counting function is injected so the estimator is
/// swappable; see [`crate::count_tokens`] for the default.
pub struct TokenBatcher<F> {
    count: F,
    min_length: usize,
    token_ceiling: usize,
}

impl<F: Fn(&str) -> usize> TokenBatcher<F> {
    pub fn new(count: F, min_length: usize, token_ceiling: usize) -> Self {
        Self {
            count,
            min_length,
            token_ceiling,
        }
    }

    /// Batches `texts` in order. Texts no longer than the minimum length are
    /// skipped entirely unless `ignore_min`. A batch is sealed before adding a
    /// text that would push its running cost over the ceiling; a text whose
    /// own cost already exceeds the ceiling still becomes a singleton batch
    /// rather than being split.
    pub fn batch<S: AsRef<str>>(&self, texts: &[S], ignore_min: bool) -> Vec<Batch> {
        let mut batches = Vec::new();
        let mut current = Batch::default();
        for text in texts {
            let text = text.as_ref();
            if !ignore_min && text.chars().count() <= self.min_length {
                continue;
            }
            let tokens = (self.count)(text);
            if !current.texts.is_empty() && current.token_count + tokens > self.token_ceiling {
                batches.push(std::mem::take(&mut current));
            }
            current.texts.push(text.to_string());
            current.token_count += tokens;
        }
        if !current.texts.is_empty() {
            batches.push(current);
        }
        batches
    }
}
