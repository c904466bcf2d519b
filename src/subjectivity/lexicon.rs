//! Keyword lexicons and word-boundary indicator counting.
//!
//! Each lexical analyzer owns a [`Lexicon`]: an ordered list of categories,
//! each with a fixed set of indicator words or phrases. Declaration order
//! matters, it breaks ties.

use once_cell::sync::Lazy;
use regex::Regex;

use super::profile::{
    AuthenticityStyle, EmotionLevel, ExpressionMode, NarrativeType, SelfReferenceLevel,
    TemporalOrientation,
};

/// Compile a phrase into a word-boundary matcher.
fn phrase_pattern(phrase: &str) -> Regex {
    Regex::new(&format!(r"\b{}\b", regex::escape(phrase))).unwrap()
}

/// Count word-boundary occurrences of every phrase in `text`.
pub fn count_phrases(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|p| p.find_iter(text).count()).sum()
}

/// Compile a list of phrases.
pub fn compile(phrases: &[&str]) -> Vec<Regex> {
    phrases.iter().map(|p| phrase_pattern(p)).collect()
}

/// Winning category of a lexical analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<C> {
    pub category: C,
    pub score: f64,
    /// Normalized distribution in declaration order. Empty when nothing matched.
    pub distribution: Vec<(C, f64)>,
}

/// Ordered category → indicator set mapping with a fallback category.
pub struct Lexicon<C> {
    categories: Vec<(C, Vec<Regex>)>,
    fallback: C,
}

impl<C: Copy + PartialEq> Lexicon<C> {
    pub fn new(words: &[(C, &[&str])], fallback: C) -> Self {
        Self {
            categories: words
                .iter()
                .map(|(category, phrases)| (*category, compile(phrases)))
                .collect(),
            fallback,
        }
    }

    /// Raw indicator hits per category, in declaration order.
    pub fn counts(&self, text: &str) -> Vec<(C, f64)> {
        self.categories
            .iter()
            .map(|(category, patterns)| (*category, count_phrases(patterns, text) as f64))
            .collect()
    }

    pub fn classify(&self, text: &str) -> Classification<C> {
        self.classify_with(text, &[])
    }

    /// Classify `text`, adding extra (possibly fractional) hits per category
    /// before normalization.
    pub fn classify_with(&self, text: &str, extra: &[(C, f64)]) -> Classification<C> {
        let mut hits = self.counts(text);
        for (category, weight) in extra {
            if let Some(entry) = hits.iter_mut().find(|(c, _)| c == category) {
                entry.1 += weight;
            }
        }

        let total: f64 = hits.iter().map(|(_, h)| h).sum();
        if total <= 0.0 {
            return Classification {
                category: self.fallback,
                score: 0.5,
                distribution: Vec::new(),
            };
        }

        let distribution: Vec<(C, f64)> =
            hits.into_iter().map(|(c, h)| (c, h / total)).collect();

        // Strictly greater keeps the first declared category on ties.
        let mut best = distribution[0];
        for entry in &distribution[1..] {
            if entry.1 > best.1 {
                best = *entry;
            }
        }

        Classification {
            category: best.0,
            score: best.1,
            distribution,
        }
    }
}

// ============================================================================
// Indicator sets
// ============================================================================

const NARRATIVE_WORDS: &[(NarrativeType, &[&str])] = &[
    (
        NarrativeType::Conversational,
        &["you know", "i mean", "well", "anyway", "basically", "actually", "right"],
    ),
    (
        NarrativeType::Direct,
        &["definitely", "clearly", "exactly", "obviously", "simply", "of course", "for sure"],
    ),
    (
        NarrativeType::Reflective,
        &[
            "i think",
            "i realize",
            "i realized",
            "i understand",
            "i feel",
            "i wonder",
            "i believe",
            "looking back",
            "in hindsight",
            "i learned",
        ],
    ),
    (
        NarrativeType::Metaphorical,
        &["like a", "as if", "as though", "feels like", "reminds me", "it's like", "a kind of"],
    ),
];

const EMOTION_WORDS: &[(EmotionLevel, &[&str])] = &[
    (
        EmotionLevel::Intense,
        &[
            "extremely",
            "incredibly",
            "devastated",
            "furious",
            "terrified",
            "overwhelmed",
            "ecstatic",
            "absolutely",
            "heartbroken",
        ],
    ),
    (
        EmotionLevel::Expressive,
        &["happy", "sad", "angry", "excited", "love", "hate", "afraid", "worried", "proud", "hurt"],
    ),
    (EmotionLevel::Moderate, &["pretty", "quite", "rather", "fairly"]),
    (
        EmotionLevel::Reserved,
        &["fine", "okay", "alright", "somewhat", "a bit", "i guess", "not bad"],
    ),
];

const TEMPORAL_WORDS: &[(TemporalOrientation, &[&str])] = &[
    (
        TemporalOrientation::Past,
        &["was", "were", "used to", "back then", "remember", "ago", "had", "when i was"],
    ),
    (
        TemporalOrientation::Present,
        &["now", "currently", "today", "these days", "at the moment", "nowadays"],
    ),
    (
        TemporalOrientation::Future,
        &["will", "going to", "plan to", "hope to", "someday", "tomorrow", "in the future"],
    ),
];

const SELF_REFERENCE_WORDS: &[(SelfReferenceLevel, &[&str])] = &[
    (SelfReferenceLevel::High, &["i", "me", "my", "mine", "myself"]),
    (SelfReferenceLevel::Collective, &["we", "us", "our", "ours", "ourselves"]),
    (
        SelfReferenceLevel::Low,
        &["they", "them", "people", "someone", "everyone", "one", "he", "she"],
    ),
];

const AUTHENTICITY_WORDS: &[(AuthenticityStyle, &[&str])] = &[
    (
        AuthenticityStyle::Casual,
        &["yeah", "kinda", "gonna", "stuff", "cool", "totally", "whatever"],
    ),
    (
        AuthenticityStyle::Formal,
        &[
            "therefore",
            "however",
            "furthermore",
            "regarding",
            "in addition",
            "consequently",
            "moreover",
        ],
    ),
    (
        AuthenticityStyle::Intimate,
        &[
            "honestly",
            "to be honest",
            "deep down",
            "my heart",
            "personally",
            "truly",
            "vulnerable",
        ],
    ),
];

const EXPRESSION_WORDS: &[(ExpressionMode, &[&str])] = &[
    (
        ExpressionMode::Direct,
        &["i want", "i need", "i am", "i did", "i will", "i know", "certainly"],
    ),
    (
        ExpressionMode::Indirect,
        &["sort of", "kind of", "it seems", "somehow", "in a way", "more or less"],
    ),
];

pub static NARRATIVE: Lazy<Lexicon<NarrativeType>> =
    Lazy::new(|| Lexicon::new(NARRATIVE_WORDS, NarrativeType::Conversational));

pub static EMOTION: Lazy<Lexicon<EmotionLevel>> =
    Lazy::new(|| Lexicon::new(EMOTION_WORDS, EmotionLevel::Moderate));

pub static TEMPORAL: Lazy<Lexicon<TemporalOrientation>> =
    Lazy::new(|| Lexicon::new(TEMPORAL_WORDS, TemporalOrientation::Present));

pub static SELF_REFERENCE: Lazy<Lexicon<SelfReferenceLevel>> =
    Lazy::new(|| Lexicon::new(SELF_REFERENCE_WORDS, SelfReferenceLevel::Moderate));

pub static AUTHENTICITY: Lazy<Lexicon<AuthenticityStyle>> =
    Lazy::new(|| Lexicon::new(AUTHENTICITY_WORDS, AuthenticityStyle::Casual));

pub static EXPRESSION: Lazy<Lexicon<ExpressionMode>> =
    Lazy::new(|| Lexicon::new(EXPRESSION_WORDS, ExpressionMode::Balanced));

/// Phrases that mark explicit self-reflection.
pub static REFLECTION_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        "i think",
        "i realize",
        "i realized",
        "i wonder",
        "i believe",
        "i understand",
        "i learned",
        "i noticed",
        "looking back",
        "in hindsight",
        "it made me",
    ])
});

/// Conditional and hedging words.
pub static CONDITIONALS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&["if", "would", "could", "might", "perhaps", "maybe", "unless"])
});

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundary_matching() {
        let patterns = compile(&["now"]);
        assert_eq!(count_phrases(&patterns, "now and then, right now"), 2);
        assert_eq!(count_phrases(&patterns, "i know nowhere"), 0);
    }

    #[test]
    fn test_phrase_matching_spans_words() {
        let patterns = compile(&["looking back"]);
        assert_eq!(count_phrases(&patterns, "looking back, looking backwards"), 1);
    }

    #[test]
    fn test_classify_zero_hits_falls_back() {
        let result = NARRATIVE.classify("zzz qqq");
        assert_eq!(result.category, NarrativeType::Conversational);
        assert_eq!(result.score, 0.5);
        assert!(result.distribution.is_empty());
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let result = TEMPORAL.classify("i was there and now i will go");
        let total: f64 = result.distribution.iter().map(|(_, s)| s).sum();
        assert!((total - 1.0).abs() < 1e-12);
        let max = result
            .distribution
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::MIN, f64::max);
        assert_eq!(result.score, max);
    }

    #[test]
    fn test_ties_resolve_to_first_declared() {
        // one past hit, one future hit
        let result = TEMPORAL.classify("it was fine, it will be fine");
        assert_eq!(result.category, TemporalOrientation::Past);
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn test_extra_hits_shift_distribution() {
        let result = EMOTION.classify_with("", &[(EmotionLevel::Intense, 1.8)]);
        assert_eq!(result.category, EmotionLevel::Intense);
        assert_eq!(result.score, 1.0);
    }
}
