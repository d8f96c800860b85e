//! Suggestion reports for known foods, without classification.

use nutrilens::catalog::{food_categories, nutrition_profile};
use nutrilens::pipeline::{CalorieEstimator, SuggestionEngine};
use nutrilens::{CalorieSource, ConsumedState, FallbackReason, GoalKind};

fn engine() -> SuggestionEngine<'static> {
    SuggestionEngine::new(CalorieEstimator::new(None))
}

fn consumed(calories: f64) -> ConsumedState {
    ConsumedState {
        calories,
        ..Default::default()
    }
}

#[test]
fn pizza_for_weight_loss_on_an_empty_day() {
    let report = engine()
        .build_report("pizza", "weight_loss", &ConsumedState::default())
        .unwrap();
    assert_eq!(report.daily_target, 1500);
    assert_eq!(report.after_meal.calories, 285.0);
    assert_eq!(report.remaining.calories, 1215.0);
    assert_eq!(
        report.suggestions,
        vec!["You'll have 1215 calories remaining for the day."]
    );
}

#[test]
fn steak_over_maintenance_budget() {
    let report = engine()
        .build_report("steak", "maintenance", &consumed(1800.0))
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
        .build_report_for("chicken", GoalKind::MuscleGain, &ConsumedState::default())
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
fn burger_for_weight_loss_collects_every_matching_rule() {
    let report = engine()
        .build_report("burger", "weight-loss", &consumed(200.0))
        .unwrap();
    assert_eq!(
        report.suggestions,
        vec![
            "You'll have 760 calories remaining for the day.",
            "Good protein content for satiety!",
            "Consider a lower calorie alternative for faster results.",
        ]
    );
}

#[test]
fn unknown_food_has_no_report() {
    for goal in GoalKind::ALL {
        assert!(
            engine()
                .build_report_for("tofu", goal, &ConsumedState::default())
                .is_none()
        );
    }
}

#[test]
fn fallback_estimate_is_the_table_value() {
    let estimator = CalorieEstimator::new(None);
    for food in food_categories() {
        let estimate = estimator.estimate(food).unwrap();
        assert_eq!(estimate.calories, nutrition_profile(food).unwrap().calories);
        assert_eq!(
            estimate.source,
            CalorieSource::Fallback(FallbackReason::NoRegressor)
        );
    }
}

#[test]
fn remaining_is_never_negative() {
    let intakes = [0.0, 500.0, 1499.0, 1500.0, 2400.0, 5000.0];
    for food in food_categories() {
        for goal in GoalKind::ALL {
            for &calories in &intakes {
                let state = ConsumedState {
                    calories,
                    protein_g: calories / 20.0,
                    carbs_g: calories / 8.0,
                    fat_g: calories / 30.0,
                };
                let report = engine().build_report_for(food, goal, &state).unwrap();
                let r = &report.remaining;
                for value in [r.calories, r.protein_g, r.carbs_g, r.fat_g] {
                    assert!(value >= 0.0, "{food}/{goal}/{calories}: {r:?}");
                }
                assert!(!report.suggestions.is_empty());
            }
        }
    }
}

#[test]
fn reports_are_reproducible() {
    let state = ConsumedState {
        calories: 1234.5,
        protein_g: 61.0,
        carbs_g: 140.0,
        fat_g: 40.0,
    };
    for food in food_categories() {
        let first = engine().build_report(food, "muscle_gain", &state).unwrap();
        let second = engine().build_report(food, "muscle_gain", &state).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn report_json_shape() {
    let report = engine()
        .build_report("egg", "maintenance", &ConsumedState::default())
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["food_type"], "egg");
    assert_eq!(json["goal"], "maintenance");
    assert_eq!(json["daily_target"], 2000);
    assert_eq!(json["nutrition"]["calories"], 155.0);
    assert_eq!(json["remaining"]["calories"], 1845.0);
    assert_eq!(
        json["suggestions"],
        serde_json::json!([
            "You'll have 1845 calories remaining for the day.",
            "Well-balanced meal for maintenance.",
            "Try to maintain variety in your diet.",
        ])
    );
}

#[test]
fn progress_before_and_after_the_meal() {
    let before = consumed(600.0);
    let report = engine().build_report("pizza", "weight_loss", &before).unwrap();
    let goal = GoalKind::WeightLoss.profile();
    assert_eq!(goal.remaining_before_meal(&before), 900.0);
    assert_eq!(goal.progress(&before), 0.4);
    assert!((goal.progress(&report.after_meal) - 885.0 / 1500.0).abs() < 1e-12);
}
