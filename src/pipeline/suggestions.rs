//! Goal-conditioned meal advisories.
//!
//! Advisories come from ordered rule tables. The calorie-budget rules run
//! first, then the rules of the active goal; each matching rule appends one
//! message, so several advisories may apply to the same meal. An unrecognised
//! goal borrows the maintenance targets but gets budget advisories only.

use crate::catalog;
use crate::types::{
    ConsumedState, DietaryGoal, GoalKind, MacroTotals, NutritionProfile, SuggestionReport,
};

use super::calories::CalorieEstimator;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub nutrition: &'a NutritionProfile,
    pub goal: &'a DietaryGoal,
    pub after_meal: &'a MacroTotals,
    pub remaining: &'a MacroTotals,
}

impl RuleContext<'_> {
    fn daily_target(&self) -> f64 {
        f64::from(self.goal.daily_calories)
    }

    fn over_budget(&self) -> bool {
        self.after_meal.calories > self.daily_target()
    }

    fn excess(&self) -> f64 {
        self.after_meal.calories - self.daily_target()
    }
}

/// One advisory: when it applies and what it says.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub message: fn(&RuleContext<'_>) -> String,
}

impl Rule {
    /// The rule's message if it applies.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<String> {
        (self.applies)(ctx).then(|| (self.message)(ctx))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

pub static BUDGET_RULES: [Rule; 3] = [
    Rule {
        name: "over_budget",
        applies: |c| c.over_budget(),
        message: |c| {
            format!(
                "This meal would put you {:.0} calories over your daily target.",
                c.excess()
            )
        },
    },
    Rule {
        name: "smaller_portion",
        applies: |c| c.over_budget(),
        message: |_| "Consider a lighter option or smaller portion.".to_string(),
    },
    Rule {
        name: "remaining_budget",
        applies: |c| !c.over_budget(),
        message: |c| {
            format!(
                "You'll have {:.0} calories remaining for the day.",
                c.remaining.calories
            )
        },
    },
];

pub static WEIGHT_LOSS_RULES: [Rule; 3] = [
    Rule {
        name: "satiating_protein",
        applies: |c| c.nutrition.protein_g >= 20.0,
        message: |_| "Good protein content for satiety!".to_string(),
    },
    Rule {
        name: "high_fiber",
        applies: |c| c.nutrition.fiber_g >= 3.0,
        message: |_| "High fiber helps keep you full longer.".to_string(),
    },
    Rule {
        name: "lower_calorie_alternative",
        applies: |c| c.nutrition.calories > 400.0,
        message: |_| "Consider a lower calorie alternative for faster results.".to_string(),
    },
];

pub static MUSCLE_GAIN_RULES: [Rule; 3] = [
    Rule {
        name: "muscle_protein",
        applies: |c| c.nutrition.protein_g >= 25.0,
        message: |_| "Excellent protein content for muscle building!".to_string(),
    },
    // Disjoint from `muscle_protein` by threshold.
    Rule {
        name: "add_protein",
        applies: |c| c.nutrition.protein_g < 15.0,
        message: |_| "Consider adding a protein source to this meal.".to_string(),
    },
    Rule {
        name: "recovery_carbs",
        applies: |c| c.nutrition.carbs_g >= 30.0,
        message: |_| "Good carbs for energy and recovery.".to_string(),
    },
];

pub static MAINTENANCE_RULES: [Rule; 2] = [
    Rule {
        name: "balanced",
        applies: |c| c.nutrition.calories < 500.0,
        message: |_| "Well-balanced meal for maintenance.".to_string(),
    },
    Rule {
        name: "variety",
        applies: |_| true,
        message: |_| "Try to maintain variety in your diet.".to_string(),
    },
];

/// Rules of a goal, without the budget rules.
pub fn goal_rules(goal: GoalKind) -> &'static [Rule] {
    match goal {
        GoalKind::WeightLoss => &WEIGHT_LOSS_RULES,
        GoalKind::Maintenance => &MAINTENANCE_RULES,
        GoalKind::MuscleGain => &MUSCLE_GAIN_RULES,
    }
}

/// Evaluate the budget rules then the goal's rules, in order. Without a
/// recognised goal only the budget rules run.
pub fn evaluate_rules(goal: Option<GoalKind>, ctx: &RuleContext<'_>) -> Vec<String> {
    let goal_specific = goal.map(goal_rules).unwrap_or_default();
    BUDGET_RULES
        .iter()
        .chain(goal_specific)
        .filter_map(|rule| rule.evaluate(ctx))
        .collect()
}

/// Builds suggestion reports. A pure function of its inputs and the
/// calorie estimator.
#[derive(Clone, Copy)]
pub struct SuggestionEngine<'a> {
    calories: CalorieEstimator<'a>,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(calories: CalorieEstimator<'a>) -> Self {
        Self { calories }
    }

    /// Report for one serving of `food_type`, or `None` if the food is not
    /// in the catalog.
    ///
    /// The report echoes `goal` as given. An unknown goal uses the
    /// maintenance targets and fires no goal-specific advisories.
    pub fn build_report(
        &self,
        food_type: &str,
        goal: &str,
        consumed: &ConsumedState,
    ) -> Option<SuggestionReport> {
        let kind = GoalKind::from_name(goal);
        if kind.is_none() {
            tracing::debug!(goal, "unknown dietary goal, using maintenance targets");
        }
        self.report(food_type, goal, kind, consumed)
    }

    pub fn build_report_for(
        &self,
        food_type: &str,
        goal: GoalKind,
        consumed: &ConsumedState,
    ) -> Option<SuggestionReport> {
        self.report(food_type, goal.name(), Some(goal), consumed)
    }

    fn report(
        &self,
        food_type: &str,
        goal_name: &str,
        goal: Option<GoalKind>,
        consumed: &ConsumedState,
    ) -> Option<SuggestionReport> {
        let nutrition = self.calories.nutrition_info(food_type)?;
        let profile = catalog::goal_profile(goal.unwrap_or_default());

        let targets = MacroTotals {
            calories: f64::from(profile.daily_calories),
            protein_g: profile.protein_target_g(),
            carbs_g: profile.carbs_target_g(),
            fat_g: profile.fat_target_g(),
        };
        let after_meal = consumed.with_meal(&nutrition);
        let remaining = targets.saturating_sub(&after_meal);

        let ctx = RuleContext {
            nutrition: &nutrition,
            goal: profile,
            after_meal: &after_meal,
            remaining: &remaining,
        };
        let suggestions = evaluate_rules(goal, &ctx);

        Some(SuggestionReport {
            food_type: food_type.to_string(),
            nutrition,
            goal: goal_name.to_string(),
            goal_description: profile.description.to_string(),
            daily_target: profile.daily_calories,
            after_meal,
            remaining,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SuggestionEngine<'static> {
        SuggestionEngine::new(CalorieEstimator::new(None))
    }

    fn ctx_for<'a>(
        nutrition: &'a NutritionProfile,
        goal: &'a DietaryGoal,
        after_meal: &'a MacroTotals,
        remaining: &'a MacroTotals,
    ) -> RuleContext<'a> {
        RuleContext {
            nutrition,
            goal,
            after_meal,
            remaining,
        }
    }

    #[test]
    fn lower_calorie_threshold_is_exclusive() {
        let goal = GoalKind::WeightLoss.profile();
        let totals = MacroTotals::default();
        let rule = &WEIGHT_LOSS_RULES[2];

        let at = NutritionProfile::new(400.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(rule.evaluate(&ctx_for(&at, goal, &totals, &totals)), None);

        let above = NutritionProfile::new(400.5, 0.0, 0.0, 0.0, 0.0);
        assert!(rule.evaluate(&ctx_for(&above, goal, &totals, &totals)).is_some());
    }

    #[test]
    fn muscle_protein_rules_are_disjoint() {
        let goal = GoalKind::MuscleGain.profile();
        let totals = MacroTotals::default();
        for protein in [0.0, 14.9, 15.0, 20.0, 24.9, 25.0, 60.0] {
            let n = NutritionProfile::new(100.0, protein, 0.0, 0.0, 0.0);
            let ctx = ctx_for(&n, goal, &totals, &totals);
            let hits = MUSCLE_GAIN_RULES[..2]
                .iter()
                .filter(|r| (r.applies)(&ctx))
                .count();
            assert!(hits <= 1, "protein {protein} matched {hits} rules");
        }
    }

    #[test]
    fn pizza_for_weight_loss() {
        let report = engine()
            .build_report("pizza", "weight_loss", &ConsumedState::default())
            .unwrap();
        assert_eq!(report.goal, "weight_loss");
        assert_eq!(report.daily_target, 1500);
        assert_eq!(
            report.suggestions,
            vec!["You'll have 1215 calories remaining for the day."]
        );
    }

    #[test]
    fn steak_over_maintenance_budget() {
        let consumed = ConsumedState {
            calories: 1800.0,
            ..Default::default()
        };
        let report = engine()
            .build_report("steak", "maintenance", &consumed)
            .unwrap();
        assert_eq!(report.after_meal.calories, 2479.0);
        assert_eq!(report.remaining.calories, 0.0);
        assert_eq!(
            report.suggestions,
            vec![
                "This meal would put you 479 calories over your daily target.",
                "Consider a lighter option or smaller portion.",
                "Try to maintain variety in your diet.",
            ]
        );
    }

    #[test]
    fn chicken_for_muscle_gain() {
        let report = engine()
            .build_report("chicken", "muscle-gain", &ConsumedState::default())
            .unwrap();
        assert_eq!(
            report.suggestions,
            vec![
                "You'll have 2165 calories remaining for the day.",
                "Excellent protein content for muscle building!",
            ]
        );
    }

    #[test]
    fn burger_for_weight_loss_gets_every_advisory() {
        let report = engine()
            .build_report("burger", "weight_loss", &ConsumedState::default())
            .unwrap();
        assert_eq!(
            report.suggestions,
            vec![
                "You'll have 960 calories remaining for the day.",
                "Good protein content for satiety!",
                "Consider a lower calorie alternative for faster results.",
            ]
        );
    }

    #[test]
    fn macro_targets() {
        let report = engine()
            .build_report("apple", "maintenance", &ConsumedState::default())
            .unwrap();
        // 2000 kcal: 25% protein / 4, 50% carbs / 4, 25% fat / 9.
        assert!((report.remaining.protein_g - (125.0 - 0.5)).abs() < 1e-9);
        assert!((report.remaining.carbs_g - (250.0 - 25.0)).abs() < 1e-9);
        assert!((report.remaining.fat_g - (2000.0 * 0.25 / 9.0 - 0.3)).abs() < 1e-9);
    }

    #[test]
    fn unknown_goal_gets_budget_advice_only() {
        let report = engine()
            .build_report("pizza", "keto", &ConsumedState::default())
            .unwrap();
        assert_eq!(report.goal, "keto");
        assert_eq!(report.daily_target, 2000);
        assert_eq!(
            report.suggestions,
            vec!["You'll have 1715 calories remaining for the day."]
        );
    }

    #[test]
    fn goal_rules_need_a_known_goal() {
        let goal = GoalKind::Maintenance.profile();
        let n = NutritionProfile::new(100.0, 0.0, 0.0, 0.0, 0.0);
        let totals = MacroTotals::default();
        let ctx = ctx_for(&n, goal, &totals, &totals);
        assert_eq!(evaluate_rules(None, &ctx).len(), 1);
        assert_eq!(evaluate_rules(Some(GoalKind::Maintenance), &ctx).len(), 3);
    }

    #[test]
    fn unknown_food_has_no_report() {
        assert!(
            engine()
                .build_report("tofu", "maintenance", &ConsumedState::default())
                .is_none()
        );
    }
}
