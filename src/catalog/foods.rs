//! Per-serving nutrition of the recognised food categories.

use crate::types::NutritionProfile;

/// Recognised food categories, in catalog order.
pub const FOOD_CATEGORIES: [&str; 15] = [
    "apple", "banana", "burger", "pizza", "salad", "sandwich", "pasta", "rice", "chicken", "fish",
    "bread", "egg", "soup", "steak", "sushi",
];

// (calories, protein, carbs, fat, fiber)
static NUTRITION_TABLE: [(&str, NutritionProfile); 15] = [
    ("apple", NutritionProfile::new(95.0, 0.5, 25.0, 0.3, 4.4)),
    ("banana", NutritionProfile::new(105.0, 1.3, 27.0, 0.4, 3.1)),
    ("burger", NutritionProfile::new(540.0, 25.0, 40.0, 29.0, 2.0)),
    ("pizza", NutritionProfile::new(285.0, 12.0, 36.0, 10.0, 2.5)),
    ("salad", NutritionProfile::new(150.0, 5.0, 12.0, 10.0, 4.0)),
    ("sandwich", NutritionProfile::new(350.0, 15.0, 35.0, 16.0, 3.0)),
    ("pasta", NutritionProfile::new(380.0, 14.0, 75.0, 2.0, 3.0)),
    ("rice", NutritionProfile::new(205.0, 4.3, 45.0, 0.4, 0.6)),
    ("chicken", NutritionProfile::new(335.0, 38.0, 0.0, 20.0, 0.0)),
    ("fish", NutritionProfile::new(206.0, 22.0, 0.0, 12.0, 0.0)),
    ("bread", NutritionProfile::new(79.0, 2.7, 15.0, 1.0, 0.6)),
    ("egg", NutritionProfile::new(155.0, 13.0, 1.1, 11.0, 0.0)),
    ("soup", NutritionProfile::new(120.0, 6.0, 15.0, 4.0, 2.0)),
    ("steak", NutritionProfile::new(679.0, 62.0, 0.0, 48.0, 0.0)),
    ("sushi", NutritionProfile::new(200.0, 9.0, 38.0, 1.0, 1.0)),
];

/// Nominal profile of a food category, or `None` if it is not in the catalog.
///
/// Lookup is exact; labels are lowercase.
pub fn nutrition_profile(food_type: &str) -> Option<NutritionProfile> {
    NUTRITION_TABLE
        .iter()
        .find(|(name, _)| *name == food_type)
        .map(|(_, profile)| *profile)
}

/// Iterate over the recognised categories.
pub fn food_categories() -> impl Iterator<Item = &'static str> {
    FOOD_CATEGORIES.iter().copied()
}

/// The full table as `(category, profile)` pairs.
pub fn nutrition_table() -> &'static [(&'static str, NutritionProfile)] {
    &NUTRITION_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_a_profile() {
        for food in food_categories() {
            assert!(nutrition_profile(food).is_some(), "missing profile for {food}");
        }
        assert_eq!(nutrition_table().len(), FOOD_CATEGORIES.len());
    }

    #[test]
    fn unknown_food_has_no_profile() {
        assert!(nutrition_profile("tofu").is_none());
        assert!(nutrition_profile("Pizza").is_none());
    }

    #[test]
    fn steak_profile() {
        let steak = nutrition_profile("steak").unwrap();
        assert_eq!(steak.calories, 679.0);
        assert_eq!(steak.protein_g, 62.0);
        assert_eq!(steak.fat_g, 48.0);
    }
}
