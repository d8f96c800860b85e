//! Static nutrition and dietary-goal tables.
//!
//! These tables are the single source of truth for macro values and goal
//! parameters. They are compiled in and never change at runtime.

mod foods;
mod goals;

pub use foods::{FOOD_CATEGORIES, food_categories, nutrition_profile, nutrition_table};
pub use goals::goal_profile;
