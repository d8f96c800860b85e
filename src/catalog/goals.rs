//! Dietary goal parameters.

use crate::types::{DietaryGoal, GoalKind};

static WEIGHT_LOSS: DietaryGoal = DietaryGoal {
    daily_calories: 1500,
    protein_ratio: 0.35,
    carbs_ratio: 0.35,
    fat_ratio: 0.30,
    description: "Focus on high protein, moderate carbs, and healthy fats",
};

static MAINTENANCE: DietaryGoal = DietaryGoal {
    daily_calories: 2000,
    protein_ratio: 0.25,
    carbs_ratio: 0.50,
    fat_ratio: 0.25,
    description: "Balanced nutrition to maintain current weight",
};

static MUSCLE_GAIN: DietaryGoal = DietaryGoal {
    daily_calories: 2500,
    protein_ratio: 0.40,
    carbs_ratio: 0.40,
    fat_ratio: 0.20,
    description: "High protein and carbs for muscle building",
};

/// Parameters of a goal.
pub fn goal_profile(goal: GoalKind) -> &'static DietaryGoal {
    match goal {
        GoalKind::WeightLoss => &WEIGHT_LOSS,
        GoalKind::Maintenance => &MAINTENANCE,
        GoalKind::MuscleGain => &MUSCLE_GAIN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_sum_to_one() {
        for goal in GoalKind::ALL {
            let p = goal_profile(goal);
            let sum = p.protein_ratio + p.carbs_ratio + p.fat_ratio;
            assert!((sum - 1.0).abs() < 1e-9, "{goal} ratios sum to {sum}");
        }
    }

    #[test]
    fn daily_budgets() {
        assert_eq!(goal_profile(GoalKind::WeightLoss).daily_calories, 1500);
        assert_eq!(goal_profile(GoalKind::Maintenance).daily_calories, 2000);
        assert_eq!(goal_profile(GoalKind::MuscleGain).daily_calories, 2500);
    }
}
