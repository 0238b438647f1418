//! Local template generator
//!
//! Used when no model is wired up. Picks generic decision-support phrases
//! and echoes the (shortened) title so the output reads as contextual.

use super::AlternativeGenerator;
use crate::error::GenerationFailure;
use crate::types::GeneratedAlternative;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Titles longer than this are cut and suffixed with `...`
pub const TITLE_ECHO_CHARS: usize = 30;

const PHRASES: &[&str] = &[
    "Go with the option that has the lowest upfront cost",
    "Choose the path with the strongest long-term payoff",
    "Pick the option you can start on this week",
    "Commit to the most easily reversible choice",
    "Take the option with the smallest downside if it fails",
    "Run a one-month trial of the most promising option",
    "Combine the two strongest options into a hybrid plan",
    "Wait until the biggest unknown is resolved, then decide",
    "Choose the option that keeps the most doors open",
    "Go with the option that best matches your top priority",
];

#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator {
    latency: Option<Duration>,
}

impl TemplateGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a network round trip before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Draw `count` phrases and attach the title echo
    pub fn expand(title: &str, count: usize) -> Vec<String> {
        let echo = echo_title(title);
        let mut rng = rand::thread_rng();
        let mut picked: Vec<&str> = Vec::with_capacity(count);

        // Without replacement per pass; reshuffle once the pool runs out
        while picked.len() < count {
            let remaining = count - picked.len();
            picked.extend(PHRASES.choose_multiple(&mut rng, remaining.min(PHRASES.len())));
        }

        picked
            .into_iter()
            .map(|phrase| {
                if echo.is_empty() {
                    phrase.to_string()
                } else {
                    format!("{} ({})", phrase, echo)
                }
            })
            .collect()
    }
}

/// Trimmed title, capped at [`TITLE_ECHO_CHARS`] characters
pub fn echo_title(title: &str) -> String {
    let title = title.trim();
    if title.chars().count() > TITLE_ECHO_CHARS {
        let cut: String = title.chars().take(TITLE_ECHO_CHARS).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

#[async_trait]
impl AlternativeGenerator for TemplateGenerator {
    async fn generate(
        &self,
        title: &str,
        _description: &str,
        count: usize,
    ) -> Result<Vec<GeneratedAlternative>, GenerationFailure> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        Ok(Self::expand(title, count)
            .into_iter()
            .map(|text| GeneratedAlternative { text })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_returns_exactly_count() {
        for count in [1, 3, PHRASES.len(), PHRASES.len() + 4] {
            assert_eq!(TemplateGenerator::expand("Move abroad", count).len(), count);
        }
    }

    #[test]
    fn test_distinct_while_pool_is_large_enough() {
        let picked = TemplateGenerator::expand("Move abroad", PHRASES.len());
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), PHRASES.len());
    }

    #[test]
    fn test_echo_short_title_untouched() {
        assert_eq!(echo_title("  Escolher stack "), "Escolher stack");
    }

    #[test]
    fn test_echo_long_title_truncated() {
        let title = "Decide whether to relocate the whole family overseas";
        let echo = echo_title(title);
        assert!(echo.ends_with("..."));
        assert_eq!(echo.chars().count(), TITLE_ECHO_CHARS + 3);
        assert!(title.starts_with(echo.trim_end_matches("...")));
    }

    #[test]
    fn test_echo_exactly_at_limit() {
        let title = "x".repeat(TITLE_ECHO_CHARS);
        assert_eq!(echo_title(&title), title);
    }

    #[test]
    fn test_entries_carry_title() {
        for text in TemplateGenerator::expand("Escolher stack", 3) {
            assert!(text.ends_with("(Escolher stack)"), "{text}");
        }
    }

    #[test]
    fn test_generate_through_trait() {
        let generator = TemplateGenerator::new();
        let generated =
            tokio_test::block_on(generator.generate("Escolher stack", "", 3)).unwrap();
        assert_eq!(generated.len(), 3);
        assert!(generated.iter().all(|g| !g.text.trim().is_empty()));
    }

    #[tokio::test]
    async fn test_latency_is_simulated() {
        let generator = TemplateGenerator::new().with_latency(Duration::from_millis(20));
        let started = tokio::time::Instant::now();
        generator.generate("T", "", 2).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
