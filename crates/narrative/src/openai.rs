use anyhow::{Context, Result};
use reqwest::Client;
use rihla_core::{Itinerary, TripRequest};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiNarrator {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiNarrator {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    pub async fn generate(&self, request: &TripRequest, itinerary: &Itinerary) -> Result<String> {
        let prompt = build_prompt(request, itinerary);
        let payload = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "temperature": 0.7
        });

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(self.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .context("narrative request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("narrative model non-success status {}: {}", status.as_u16(), body);
        }

        let body: serde_json::Value = response.json().await.context("narrative parse failed")?;
        extract_message_content(&body)
            .filter(|value| !value.trim().is_empty())
            .context("narrative output text missing")
    }
}

fn build_prompt(request: &TripRequest, itinerary: &Itinerary) -> String {
    let city = request.city.name();
    let days = request.days;
    let itinerary_json =
        serde_json::to_string_pretty(itinerary).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are a professional travel curator writing for a premium travel app.\n\
         Create a {days}-day travel itinerary for {city}.\n\n\
         Formatting rules:\n\
         - Title: \"**{city} – {days} Day Itinerary**\" plus the country flag if known.\n\
         - Add a short tagline (one catchy sentence).\n\
         - Use headings: \"**Day X – …**\" with an emoji.\n\
         - Subsections: \"**☀️ Morning:**\", \"**🌤️ Afternoon:**\", \"**🌙 Evening:**\".\n\
         - Each subsection is a short paragraph of 2-3 sentences, not bullet points.\n\
         - Day 1 Morning must include hotel check-in at one realistic hotel.\n\
         - From Day 2 onwards, only say \"Breakfast at hotel\" and keep the same hotel throughout.\n\
         - Bold all hotels, restaurants, landmarks, and key experiences.\n\
         - Keep the tone lively, polished, and smooth, with no robotic listing or filler blog tone.\n\
         - Always cover exactly {days} days.\n\n\
         JSON itinerary data (for reference only):\n{itinerary_json}"
    )
}

fn extract_message_content(payload: &serde_json::Value) -> Option<String> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|value| value.to_string())
}
