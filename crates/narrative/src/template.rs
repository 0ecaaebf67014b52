use rihla_core::{Itinerary, TripRequest, NO_HOTELS, NO_RESTAURANTS};

/// Offline narrator used when no model key is configured. Follows the same
/// formatting contract as the hosted model so clients see one shape.
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn generate(&self, request: &TripRequest, itinerary: &Itinerary) -> String {
        let city = request.city.name();
        let days = request.days;

        let mut out = String::new();
        out.push_str(&format!("**{city} – {days} Day Itinerary** 🇦🇪\n"));
        out.push_str(&format!(
            "{days} easy-paced days through the best of {city}.\n"
        ));

        for day in &itinerary.days {
            out.push('\n');
            out.push_str(&format!("**Day {} – {} 🌇**\n", day.day, city));

            if day.day == 1 {
                if day.hotel == NO_HOTELS {
                    out.push_str(&format!(
                        "**☀️ Morning:** Start fresh with **{}**. Take it slow and let the city set the pace.\n",
                        day.morning
                    ));
                } else {
                    out.push_str(&format!(
                        "**☀️ Morning:** Check in at **{}** and drop your bags. Then ease into the day at **{}**.\n",
                        day.hotel, day.morning
                    ));
                }
            } else {
                out.push_str(&format!(
                    "**☀️ Morning:** Breakfast at hotel, then head out to **{}**.\n",
                    day.morning
                ));
            }

            out.push_str(&format!(
                "**🌤️ Afternoon:** Carry on to **{}**. Leave room for a slow coffee along the way.\n",
                day.afternoon
            ));

            match (day.dinner == NO_RESTAURANTS, day.hotel == NO_HOTELS) {
                (false, false) => out.push_str(&format!(
                    "**🌙 Evening:** Dinner at **{}**. Wind down back at **{}**.\n",
                    day.dinner, day.hotel
                )),
                (true, false) => out.push_str(&format!(
                    "**🌙 Evening:** Graze wherever the evening takes you, then wind down back at **{}**.\n",
                    day.hotel
                )),
                (false, true) => out.push_str(&format!(
                    "**🌙 Evening:** Dinner at **{}**, then an early night.\n",
                    day.dinner
                )),
                (true, true) => out.push_str(
                    "**🌙 Evening:** Keep the evening free and follow the waterfront lights.\n",
                ),
            }
        }

        out
    }
}
