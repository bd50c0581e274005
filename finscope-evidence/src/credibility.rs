//! Static credibility registry: domain → trust score in `[0, 1]`.
//!
//! Scores are editorial judgments, not computed. The registry is built once
//! at startup (optionally merged with configured overrides) and never
//! mutated afterwards, so concurrent runs share it without locking.

use std::collections::HashMap;

use crate::error::SearchError;
use crate::pipeline::url_normalize::normalize_domain;

/// Score for any domain absent from the registry.
pub const DEFAULT_SCORE: f64 = 0.5;

/// Built-in table of financial sources.
const BUILTIN_SCORES: &[(&str, f64)] = &[
    // Regulators, central banks and exchanges.
    ("rbi.org.in", 1.0),
    ("sebi.gov.in", 1.0),
    ("finmin.nic.in", 1.0),
    ("irdai.gov.in", 1.0),
    ("pfrda.org.in", 1.0),
    ("federalreserve.gov", 1.0),
    ("sec.gov", 1.0),
    ("ecb.europa.eu", 1.0),
    ("bankofengland.co.uk", 1.0),
    ("imf.org", 0.95),
    ("worldbank.org", 0.95),
    ("bis.org", 0.95),
    ("nseindia.com", 0.95),
    ("bseindia.com", 0.95),
    // Tier-1 financial press.
    ("reuters.com", 0.9),
    ("bloomberg.com", 0.9),
    ("ft.com", 0.9),
    ("wsj.com", 0.9),
    ("economist.com", 0.85),
    ("cnbc.com", 0.8),
    ("marketwatch.com", 0.75),
    // Investment banks, research houses and rating agencies.
    ("goldmansachs.com", 0.85),
    ("jpmorgan.com", 0.85),
    ("morganstanley.com", 0.85),
    ("moodys.com", 0.85),
    ("spglobal.com", 0.85),
    ("fitchratings.com", 0.85),
    ("crisil.com", 0.85),
    ("icra.in", 0.8),
    ("mckinsey.com", 0.8),
    ("morningstar.com", 0.8),
    // Regional financial media.
    ("economictimes.indiatimes.com", 0.8),
    ("livemint.com", 0.8),
    ("business-standard.com", 0.8),
    ("thehindubusinessline.com", 0.75),
    ("financialexpress.com", 0.75),
    ("moneycontrol.com", 0.75),
    ("ndtvprofit.com", 0.7),
    ("investopedia.com", 0.7),
    ("finance.yahoo.com", 0.7),
];

/// Immutable mapping from normalised domain to credibility score.
#[derive(Debug, Clone)]
pub struct CredibilityRegistry {
    scores: HashMap<String, f64>,
    default_score: f64,
}

impl CredibilityRegistry {
    /// The curated built-in table with the standard default score.
    pub fn builtin() -> Self {
        let scores = BUILTIN_SCORES
            .iter()
            .map(|(domain, score)| (normalize_domain(domain), *score))
            .collect();
        Self {
            scores,
            default_score: DEFAULT_SCORE,
        }
    }

    /// The built-in table merged with configured entries.
    ///
    /// Override keys are normalised the same way lookups are, so
    /// `"WWW.Example.com"` replaces `"example.com"`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the default or any override score
    /// is outside `[0, 1]`, or an override key is blank.
    pub fn with_overrides<I>(default_score: f64, overrides: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        check_score("default_score", default_score)?;
        let mut registry = Self::builtin();
        registry.default_score = default_score;

        for (domain, score) in overrides {
            let key = normalize_domain(&domain);
            if key.is_empty() {
                return Err(SearchError::Config(
                    "credibility override domain must not be blank".into(),
                ));
            }
            check_score(&key, score)?;
            registry.scores.insert(key, score);
        }
        Ok(registry)
    }

    /// Credibility of `domain`, or the default score when it is unknown.
    ///
    /// Case-insensitive and ignores a leading `www.`. Never fails.
    pub fn score_for(&self, domain: &str) -> f64 {
        self.scores
            .get(&normalize_domain(domain))
            .copied()
            .unwrap_or(self.default_score)
    }

    /// Whether `domain` has an explicit entry.
    pub fn contains(&self, domain: &str) -> bool {
        self.scores.contains_key(&normalize_domain(domain))
    }

    /// The score applied to unknown domains.
    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Default for CredibilityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_score(label: &str, score: f64) -> Result<(), SearchError> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(SearchError::Config(format!(
            "credibility score for {label} must be within [0, 1], got {score}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regulators_score_highest() {
        let registry = CredibilityRegistry::builtin();
        assert!((registry.score_for("rbi.org.in") - 1.0).abs() < f64::EPSILON);
        assert!((registry.score_for("sebi.gov.in") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_ignores_case_and_www() {
        let registry = CredibilityRegistry::builtin();
        assert!((registry.score_for("WWW.Reuters.COM") - 0.9).abs() < f64::EPSILON);
        assert!((registry.score_for("reuters.com") - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_domain_gets_default() {
        let registry = CredibilityRegistry::builtin();
        assert!((registry.score_for("random-blog.example") - DEFAULT_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn score_for_is_total() {
        let registry = CredibilityRegistry::builtin();
        for input in ["", "   ", "://", "not a domain", "www.", "\u{1F4B0}.com"] {
            assert!(
                (registry.score_for(input) - DEFAULT_SCORE).abs() < f64::EPSILON,
                "{input:?}"
            );
        }
    }

    #[test]
    fn subdomain_is_not_parent_domain() {
        let registry = CredibilityRegistry::builtin();
        assert!((registry.score_for("blogs.reuters.com") - DEFAULT_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn builtin_scores_within_unit_interval() {
        for (domain, score) in BUILTIN_SCORES {
            assert!((0.0..=1.0).contains(score), "{domain} has {score}");
        }
    }

    #[test]
    fn builtin_has_no_duplicate_keys() {
        let registry = CredibilityRegistry::builtin();
        assert_eq!(registry.len(), BUILTIN_SCORES.len());
        assert!(!registry.is_empty());
    }

    #[test]
    fn overrides_replace_and_extend() {
        let registry = CredibilityRegistry::with_overrides(
            0.4,
            vec![
                ("WWW.Reuters.com".to_string(), 0.95),
                ("valueresearchonline.com".to_string(), 0.7),
            ],
        )
        .expect("valid overrides");
        assert!((registry.score_for("reuters.com") - 0.95).abs() < f64::EPSILON);
        assert!((registry.score_for("valueresearchonline.com") - 0.7).abs() < f64::EPSILON);
        assert!((registry.score_for("unknown.example") - 0.4).abs() < f64::EPSILON);
        assert!((registry.default_score() - 0.4).abs() < f64::EPSILON);
        assert!(registry.contains("rbi.org.in"));
    }

    #[test]
    fn out_of_range_override_rejected() {
        let err = CredibilityRegistry::with_overrides(0.5, vec![("x.com".to_string(), 1.5)])
            .unwrap_err();
        assert!(err.to_string().contains("x.com"));
    }

    #[test]
    fn nan_default_rejected() {
        assert!(CredibilityRegistry::with_overrides(f64::NAN, Vec::new()).is_err());
    }

    #[test]
    fn blank_override_domain_rejected() {
        let err = CredibilityRegistry::with_overrides(0.5, vec![("  ".to_string(), 0.9)])
            .unwrap_err();
        assert!(err.to_string().contains("blank"));
    }
}
