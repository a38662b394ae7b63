//! crates/health_tracker_core/src/symptoms.rs
//!
//! Keyword-based symptom risk scoring.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown risk level: {0}")]
pub struct UnknownRiskLevel(pub String);

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(UnknownRiskLevel(other.to_string())),
        }
    }
}

/// The outcome of scoring a set of symptoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomAnalysis {
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub food_recommendations: Vec<String>,
}

impl Default for SymptomAnalysis {
    fn default() -> Self {
        Self {
            risk_level: RiskLevel::Low,
            risk_score: 0,
            food_recommendations: Vec::new(),
        }
    }
}

/// A keyword rule. When any keyword matches, the rule's outcome replaces
/// whatever an earlier rule produced.
struct Rule {
    keywords: &'static [&'static str],
    risk_level: RiskLevel,
    risk_score: i32,
    food_recommendations: &'static [&'static str],
}

// Evaluated in order; the last matching rule wins.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["pain", "irregular"],
        risk_level: RiskLevel::Medium,
        risk_score: 5,
        food_recommendations: &["Eat more fiber", "Limit processed foods"],
    },
    Rule {
        keywords: &["hair loss", "acne"],
        risk_level: RiskLevel::High,
        risk_score: 8,
        food_recommendations: &["Increase protein", "Consult a doctor"],
    },
];

/// Splits comma-separated input into trimmed, lowercased, non-empty tokens.
pub fn parse_symptoms(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Scores a list of normalized symptom tokens.
pub fn analyze_symptoms(symptoms: &[String]) -> SymptomAnalysis {
    let mut analysis = SymptomAnalysis::default();

    for rule in RULES {
        let matched = rule
            .keywords
            .iter()
            .any(|keyword| symptoms.iter().any(|s| s == keyword));
        if matched {
            analysis = SymptomAnalysis {
                risk_level: rule.risk_level,
                risk_score: rule.risk_score,
                food_recommendations: rule
                    .food_recommendations
                    .iter()
                    .map(|r| r.to_string())
                    .collect(),
            };
        }
    }

    analysis
}
