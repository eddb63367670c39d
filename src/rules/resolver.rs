//! Local answer resolution against the rule and fact tables.
//!
//! Resolution runs in three phases, each only reached when the previous one
//! found nothing:
//! 1. substring containment against rule patterns
//! 2. keyword scoring against rule patterns
//! 3. keyword scoring against the legacy fact table

use super::tables::{legacy_facts, rule_table, LegacyFact, Rule};

/// Keywords are the significant tokens of a pattern: longer than 3 chars.
const MIN_KEYWORD_LEN: usize = 3;

/// Resolver over the static rule and fact tables.
pub struct Resolver {
    rules: Vec<Rule>,
    facts: Vec<LegacyFact>,
    accuracy: f64,
}

impl Resolver {
    /// Build a resolver over explicit tables.
    pub fn new(rules: Vec<Rule>, facts: Vec<LegacyFact>, accuracy: f64) -> Self {
        Self {
            rules,
            facts,
            accuracy,
        }
    }

    /// Build a resolver over the built-in school tables.
    pub fn with_accuracy(accuracy: f64) -> Self {
        Self::new(rule_table(), legacy_facts(), accuracy)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Resolve a question against the local tables.
    ///
    /// Returns `None` when nothing qualifies; the caller falls back to the
    /// cloud provider. Empty and whitespace-only questions never match.
    pub fn resolve(&self, question: &str) -> Option<String> {
        let question = question.trim().to_lowercase();
        if question.is_empty() {
            return None;
        }

        if let Some(answer) = self.match_containment(&question) {
            return Some(answer);
        }

        if let Some(answer) = self.match_keywords(&question) {
            return Some(answer);
        }

        self.match_legacy(&question)
    }

    /// Phase 1: first rule whose lowercased pattern contains the question or
    /// is contained by it wins outright.
    fn match_containment(&self, question: &str) -> Option<String> {
        for rule in &self.rules {
            let pattern = rule.pattern.to_lowercase();
            if question.contains(&pattern) || pattern.contains(question) {
                tracing::debug!("Containment match on rule '{}'", rule.pattern);
                return Some(rule.answer.clone());
            }
        }
        None
    }

    /// Phase 2: first rule with at least half of its keywords present, and
    /// never fewer than two, wins.
    fn match_keywords(&self, question: &str) -> Option<String> {
        for rule in &self.rules {
            let keywords = pattern_keywords(&rule.pattern);
            if keywords.is_empty() {
                continue;
            }

            let match_count = keywords.iter().filter(|kw| question.contains(*kw)).count();
            let match_ratio = match_count as f64 / keywords.len() as f64;

            if match_ratio >= 0.5 && match_count >= 2 {
                tracing::debug!(
                    "Keyword match on rule '{}' ({}/{} keywords)",
                    rule.pattern,
                    match_count,
                    keywords.len()
                );
                return Some(rule.answer.clone());
            }
        }
        None
    }

    /// Phase 3: best-scoring legacy fact at or above the accuracy threshold.
    /// The running maximum uses strict `>`, so among equal scores the first
    /// fact encountered keeps the win.
    fn match_legacy(&self, question: &str) -> Option<String> {
        let mut best_match: Option<String> = None;
        let mut max_score = 0.0_f64;

        for fact in &self.facts {
            if fact.keywords.is_empty() {
                continue;
            }

            let valid = fact
                .keywords
                .iter()
                .filter(|kw| question.contains(&kw.to_lowercase()))
                .count();
            let score = valid as f64 / fact.keywords.len() as f64;

            if score >= self.accuracy && score > max_score {
                max_score = score;
                best_match = fact.answer.primary().map(str::to_string);
            }
        }

        best_match
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::with_accuracy(0.6)
    }
}

/// Split a pattern into lowercased keywords longer than [`MIN_KEYWORD_LEN`].
fn pattern_keywords(pattern: &str) -> Vec<String> {
    pattern
        .to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_KEYWORD_LEN)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::tables::{FactAnswer, LegacyFact, Rule};

    fn fact(keywords: &[&str], answer: &str) -> LegacyFact {
        LegacyFact::new(keywords, answer)
    }

    #[test]
    fn exact_question_matches_verbatim() {
        let resolver = Resolver::default();
        let answer = resolver.resolve("What is the assembly time?");
        assert_eq!(
            answer.as_deref(),
            Some("Daily morning assembly is at 8:45 AM sharp.")
        );
    }

    #[test]
    fn containment_works_in_both_directions() {
        let resolver = Resolver::default();

        // Question embedded in a longer utterance still hits the rule.
        let answer = resolver.resolve("robot, what is the assembly time? thanks");
        assert_eq!(
            answer.as_deref(),
            Some("Daily morning assembly is at 8:45 AM sharp.")
        );

        // A short question contained inside a pattern also hits.
        let resolver = Resolver::new(
            vec![Rule::new("What is the assembly time?", "8:45 AM")],
            vec![],
            0.6,
        );
        assert_eq!(resolver.resolve("assembly time").as_deref(), Some("8:45 AM"));
    }

    #[test]
    fn containment_beats_keyword_scoring() {
        let resolver = Resolver::new(
            vec![
                Rule::new("alpha beta gamma delta", "keyword answer"),
                Rule::new("zeta", "containment answer"),
            ],
            vec![],
            0.6,
        );

        // Every keyword of the first rule is present, but the second rule's
        // pattern is a full substring, and phase 1 runs to completion first.
        let answer = resolver.resolve("zeta alpha beta, gamma delta");
        assert_eq!(answer.as_deref(), Some("containment answer"));
    }

    #[test]
    fn keyword_phase_requires_two_matches() {
        let resolver = Resolver::new(
            vec![Rule::new("libraries available anywhere", "lib answer")],
            vec![],
            0.6,
        );

        // One of three keywords present: ratio below 0.5 and count below 2.
        assert_eq!(resolver.resolve("are libraries open"), None);
    }

    #[test]
    fn single_keyword_rule_never_qualifies_on_count() {
        // 1/1 keywords present gives ratio 1.0, but count stays below 2.
        let resolver = Resolver::new(
            vec![Rule::new("uniform x y z", "uniform answer")],
            vec![],
            0.6,
        );
        assert_eq!(resolver.resolve("tell me about the uniform"), None);
    }

    #[test]
    fn keyword_phase_accepts_half_ratio_with_two_matches() {
        let resolver = Resolver::new(
            vec![Rule::new("first second third fourth", "scored answer")],
            vec![],
            0.6,
        );

        // 2/4 keywords: ratio exactly 0.5, count 2.
        let answer = resolver.resolve("the first and the second");
        assert_eq!(answer.as_deref(), Some("scored answer"));
    }

    #[test]
    fn keyword_phase_first_qualifying_rule_wins() {
        let resolver = Resolver::new(
            vec![
                Rule::new("alpha beta unrelated padding", "first"),
                Rule::new("alpha beta", "second"),
            ],
            vec![],
            0.6,
        );

        let answer = resolver.resolve("alpha and also beta");
        assert_eq!(answer.as_deref(), Some("first"));
    }

    #[test]
    fn legacy_phase_scores_against_threshold() {
        let resolver = Resolver::new(
            vec![],
            vec![fact(&["who", "founder", "mgm"], "Dr P K Sukumaran")],
            0.6,
        );

        // 1/3 keywords present falls short of the 0.6 threshold.
        assert_eq!(resolver.resolve("tell me about the school founder please"), None);

        // 3/3 keywords clears it.
        assert_eq!(
            resolver.resolve("who is the founder of mgm").as_deref(),
            Some("Dr P K Sukumaran")
        );
    }

    #[test]
    fn legacy_tie_keeps_first_winner() {
        let resolver = Resolver::new(
            vec![],
            vec![fact(&["alpha"], "first fact"), fact(&["alpha"], "second fact")],
            0.6,
        );

        let answer = resolver.resolve("alpha question");
        assert_eq!(answer.as_deref(), Some("first fact"));
    }

    #[test]
    fn legacy_higher_score_replaces_earlier_winner() {
        let resolver = Resolver::new(
            vec![],
            vec![
                fact(&["alpha", "omega"], "half score"),
                fact(&["alpha"], "full score"),
            ],
            0.5,
        );

        let answer = resolver.resolve("alpha question");
        assert_eq!(answer.as_deref(), Some("full score"));
    }

    #[test]
    fn founder_example_falls_through_to_provider() {
        let resolver = Resolver::default();
        assert_eq!(resolver.resolve("tell me about the school founder please"), None);
    }

    #[test]
    fn empty_and_odd_input_yields_none_without_panic() {
        let resolver = Resolver::default();

        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("   "), None);
        assert_eq!(resolver.resolve("???"), None);
        assert_eq!(resolver.resolve("xyzzy plugh"), None);
        assert!(resolver.resolve("névé 日本語 \u{0000}").is_none());
    }

    #[test]
    fn pattern_keywords_drop_short_tokens() {
        let kws = pattern_keywords("Who is the principal?");
        assert_eq!(kws, vec!["principal?".to_string()]);
    }

    #[test]
    fn variant_fact_answers_resolve_to_first_element() {
        let resolver = Resolver::new(
            vec![],
            vec![LegacyFact {
                keywords: vec!["alpha".to_string()],
                answer: FactAnswer::Variants(vec!["one".to_string(), "two".to_string()]),
            }],
            0.6,
        );

        assert_eq!(resolver.resolve("alpha").as_deref(), Some("one"));
    }
}
