pub mod error;
pub mod itinerary;
pub mod models;
pub mod query;
pub mod selection;

pub use error::PlanError;
pub use itinerary::{assemble, NO_HOTELS, NO_RESTAURANTS};
pub use models::*;
pub use query::{normalize_text, QueryParser, RegexQueryParser};
pub use selection::{select_candidates, BudgetTier, CandidateSets};
