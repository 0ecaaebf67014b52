mod openai;
mod template;

use std::env;

use anyhow::Result;
use rihla_core::{Itinerary, TripRequest};

pub use openai::OpenAiNarrator;
pub use template::TemplateNarrator;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Turns a structured itinerary into traveller-facing prose. The hosted
/// model is used when an API key is configured; otherwise the offline
/// template keeps the endpoint fully functional.
pub enum Narrator {
    OpenAi(OpenAiNarrator),
    Template(TemplateNarrator),
}

impl Narrator {
    pub fn from_env() -> Self {
        match env::var("RIHLA_OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                let model = env::var("RIHLA_OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
                Self::OpenAi(OpenAiNarrator::new(key.trim().to_string(), model))
            }
            _ => Self::Template(TemplateNarrator),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "openai",
            Self::Template(_) => "template",
        }
    }

    pub async fn narrate(&self, request: &TripRequest, itinerary: &Itinerary) -> Result<String> {
        match self {
            Self::OpenAi(narrator) => narrator.generate(request, itinerary).await,
            Self::Template(narrator) => Ok(narrator.generate(request, itinerary)),
        }
    }
}

/// Splits finished prose into the line list the API returns.
pub fn into_lines(narrative: &str) -> Vec<String> {
    narrative.lines().map(|line| line.to_string()).collect()
}
