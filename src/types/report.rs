//! Suggestion report types.

use serde::{Deserialize, Serialize};

use super::nutrition::{MacroTotals, NutritionProfile};

/// Goal-conditioned feedback for one meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub food_type: String,
    /// Profile of the meal, with the estimated calories.
    pub nutrition: NutritionProfile,
    /// Identifier of the goal the report was computed against.
    pub goal: String,
    pub goal_description: String,
    pub daily_target: u32,
    /// Intake so far plus this meal.
    pub after_meal: MacroTotals,
    /// Daily targets minus `after_meal`, clamped at zero.
    pub remaining: MacroTotals,
    /// Advisories in priority order.
    pub suggestions: Vec<String>,
}

/// Presentation category of an advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Over budget or calorie-heavy choice.
    Warning,
    /// Positive reinforcement.
    Success,
    /// Actionable hint.
    Tip,
    /// Neutral statement.
    Note,
}

const WARNING_KEYWORDS: &[&str] = &["over", "excess", "reached", "consider a lower", "lighter"];
const SUCCESS_KEYWORDS: &[&str] = &["good", "excellent", "great", "high fiber"];
const TIP_KEYWORDS: &[&str] = &["consider", "try", "adding"];

impl SuggestionKind {
    /// Categorize an advisory by keyword, checking warning, success and tip
    /// keywords in that order.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        let any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
        if any(WARNING_KEYWORDS) {
            Self::Warning
        } else if any(SUCCESS_KEYWORDS) {
            Self::Success
        } else if any(TIP_KEYWORDS) {
            Self::Tip
        } else {
            Self::Note
        }
    }

    /// Short tag for plain-text rendering.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Tip => "tip",
            Self::Note => "note",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_advisories() {
        assert_eq!(
            SuggestionKind::classify("This meal would put you 479 calories over your daily target."),
            SuggestionKind::Warning
        );
        assert_eq!(
            SuggestionKind::classify("Consider a lighter option or smaller portion."),
            SuggestionKind::Warning
        );
        assert_eq!(
            SuggestionKind::classify("Excellent protein content for muscle building!"),
            SuggestionKind::Success
        );
        assert_eq!(
            SuggestionKind::classify("High fiber helps keep you full longer."),
            SuggestionKind::Success
        );
        assert_eq!(
            SuggestionKind::classify("Try to maintain variety in your diet."),
            SuggestionKind::Tip
        );
        assert_eq!(
            SuggestionKind::classify("You'll have 1215 calories remaining for the day."),
            SuggestionKind::Note
        );
    }
}
