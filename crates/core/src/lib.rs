pub mod budget;
pub mod classify;
pub mod directory;
pub mod models;

pub use budget::{is_low_budget, BudgetRange, LOW_BUDGET_CEILING};
pub use classify::{
    is_developed_destination, is_domestic, is_same_language_context, normalize, Country,
    TravelPersona,
};
pub use directory::hospitals_for;
pub use models::*;
