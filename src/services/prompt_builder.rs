//! Prompt Builder
//!
//! Pure functions that produce the natural-language instructions sent to the
//! text generation endpoint: one prompt for the tour title and one per day.
//! Identical inputs always produce identical prompt text.

use crate::models::trip::TourStyle;
use crate::services::training_examples::clean_reference_example;

/// How many example titles or day samples a prompt embeds.
pub const MAX_PROMPT_EXAMPLES: usize = 3;
/// How many destination highlights a day prompt mentions.
pub const MAX_PROMPT_HIGHLIGHTS: usize = 3;
/// Day samples are cut to this many characters.
pub const MAX_EXAMPLE_CHARS: usize = 300;

/// Everything the day prompt needs to know about one day.
#[derive(Debug, Clone)]
pub struct DayPromptContext<'a> {
    pub destination: &'a str,
    pub previous_destination: Option<&'a str>,
    pub is_first_day: bool,
    pub is_last_day: bool,
    pub is_destination_change: bool,
    pub tour_style: TourStyle,
    pub interests: &'a [String],
    pub highlights: &'a [String],
}

impl DayPromptContext<'_> {
    /// One line describing what kind of day this is. First and last day win
    /// over a destination change.
    fn framing(&self) -> String {
        if self.is_first_day {
            format!(
                "This is arrival day in {}. Start with arrival at airport, private transfer to hotel.",
                self.destination
            )
        } else if self.is_last_day {
            format!(
                "This is departure day from {}. End with private transfer to airport.",
                self.destination
            )
        } else if self.is_destination_change {
            format!(
                "Traveling from {} to {} today.",
                self.previous_destination.unwrap_or("the previous destination"),
                self.destination
            )
        } else {
            format!("Full day in {}.", self.destination)
        }
    }

    fn context(&self) -> String {
        let highlights: Vec<&str> = self
            .highlights
            .iter()
            .take(MAX_PROMPT_HIGHLIGHTS)
            .map(String::as_str)
            .collect();

        [
            self.framing(),
            format!("This is a {} tour.", self.tour_style),
            format!("Main attractions: {}", highlights.join(", ")),
            format!("Traveler interests: {}", self.interests.join(", ")),
        ]
        .join(" ")
    }
}

pub fn build_title_prompt(
    country: &str,
    destinations: &[String],
    total_days: u32,
    tour_style: TourStyle,
    example_titles: &[String],
) -> String {
    let examples_text = if example_titles.is_empty() {
        String::new()
    } else {
        let lines: Vec<String> = example_titles
            .iter()
            .take(MAX_PROMPT_EXAMPLES)
            .map(|title| format!("- \"{}\"", title))
            .collect();
        format!(
            "\n\nExamples from your professional itineraries:\n{}",
            lines.join("\n")
        )
    };

    format!(
        "Generate a professional, attractive tour package title for a {total_days}-day {tour_style} tour of {country} visiting {destinations}.

Requirements:
- Keep it concise (5-10 words)
- Make it sound professional and appealing
- Include the word \"{country}\"
- Do NOT include the number of days
{examples_text}

Generate ONLY the title, nothing else:",
        destinations = destinations.join(", "),
    )
}

pub fn build_day_prompt(context: &DayPromptContext<'_>, examples: &[String]) -> String {
    let examples_section = if examples.is_empty() {
        String::new()
    } else {
        let mut section = String::from(
            "\n\nREAL EXAMPLES FROM YOUR PROFESSIONAL ITINERARIES (learn from this writing style):\n\n",
        );
        for (i, example) in examples.iter().take(MAX_PROMPT_EXAMPLES).enumerate() {
            let cleaned = clean_reference_example(example);
            let truncated: String = cleaned.chars().take(MAX_EXAMPLE_CHARS).collect();
            section.push_str(&format!("Example {}: {}\n\n", i + 1, truncated));
        }
        section
    };

    format!(
        "Write a professional tour itinerary description for this day:

{context}

CRITICAL RULES:
1. Do NOT start with day numbers or day titles (like \"Day 1\", \"Day 4 -\", etc.)
2. Do NOT mention breakfast on arrival day (first day of tour)
3. For full days in same city, always start with \"After breakfast\"
4. Only use \"Upon arrival\" for actual arrivals (first day or when arriving in a new city)
5. Do NOT invent details like meals, lunch on board, or services not mentioned in context
6. Only describe what is actually provided - be conservative and factual
7. If meals are not mentioned in context, do NOT mention them in description
8. LEARN FROM THE REAL EXAMPLES BELOW - match their professional tone and structure
{examples_section}
Generic examples of GOOD descriptions:
- Arrival day: \"Upon arrival at Istanbul Airport, you will be met and privately transferred to your hotel. Rest of the day at leisure.\"
- Full day: \"After breakfast, enjoy a full day exploring Istanbul. Visit the Hagia Sophia and Blue Mosque. Return to hotel.\"
- City change: \"After breakfast, fly from Istanbul to Cappadocia. Upon arrival, visit the Goreme Open Air Museum.\"
- Departure day: \"After breakfast, check out and transfer to the airport for your departure flight.\"

Examples of BAD descriptions (avoid these):
- \"Day 1 - Istanbul: Upon arrival...\"
- \"Upon arrival in Istanbul\" (when already in Istanbul)
- \"Breakfast is included\" (on arrival day)
- \"Enjoy lunch on board\" (when lunch is not included)
- \"At own expense\" (don't mention optional purchases)

Write 2-3 sentences describing the day's activities. Be factual and conservative - only describe what is actually provided. Match the professional writing style from the real examples above.

Description:",
        context = context.context(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn full_day<'a>(interests: &'a [String], highlights: &'a [String]) -> DayPromptContext<'a> {
        DayPromptContext {
            destination: "Istanbul",
            previous_destination: Some("Istanbul"),
            is_first_day: false,
            is_last_day: false,
            is_destination_change: false,
            tour_style: TourStyle::Private,
            interests,
            highlights,
        }
    }

    #[test]
    fn test_title_prompt_contents() {
        let prompt = build_title_prompt(
            "Turkey",
            &strings(&["Istanbul", "Cappadocia"]),
            7,
            TourStyle::Sic,
            &strings(&["Classic Turkey", "Magic of Anatolia", "Turkish Delight", "Fourth"]),
        );

        assert!(prompt.starts_with(
            "Generate a professional, attractive tour package title for a 7-day SIC tour of Turkey visiting Istanbul, Cappadocia."
        ));
        assert!(prompt.contains("Include the word \"Turkey\""));
        assert!(prompt.contains("Do NOT include the number of days"));
        assert!(prompt.contains("- \"Classic Turkey\"\n- \"Magic of Anatolia\"\n- \"Turkish Delight\""));
        assert!(!prompt.contains("Fourth"));
        assert!(prompt.ends_with("Generate ONLY the title, nothing else:"));
    }

    #[test]
    fn test_title_prompt_without_examples() {
        let prompt = build_title_prompt("Turkey", &strings(&["Ephesus"]), 3, TourStyle::Private, &[]);
        assert!(!prompt.contains("Examples from your professional itineraries"));
    }

    #[test]
    fn test_day_prompt_framing() {
        let interests = strings(&["history"]);
        let highlights = strings(&["Hagia Sophia"]);

        let mut ctx = full_day(&interests, &highlights);
        assert!(build_day_prompt(&ctx, &[]).contains("Full day in Istanbul."));

        ctx.is_destination_change = true;
        ctx.destination = "Cappadocia";
        assert!(build_day_prompt(&ctx, &[]).contains("Traveling from Istanbul to Cappadocia today."));

        ctx.is_last_day = true;
        assert!(build_day_prompt(&ctx, &[]).contains("This is departure day from Cappadocia."));

        ctx.is_first_day = true;
        ctx.previous_destination = None;
        assert!(build_day_prompt(&ctx, &[]).contains("This is arrival day in Cappadocia."));
    }

    #[test]
    fn test_day_prompt_hints_and_rules() {
        let interests = strings(&["history", "photography"]);
        let highlights = strings(&["Hagia Sophia", "Blue Mosque", "Topkapi Palace", "Grand Bazaar"]);
        let prompt = build_day_prompt(&full_day(&interests, &highlights), &[]);

        assert!(prompt.contains("This is a Private tour."));
        assert!(prompt.contains("Main attractions: Hagia Sophia, Blue Mosque, Topkapi Palace"));
        assert!(!prompt.contains("Grand Bazaar"));
        assert!(prompt.contains("Traveler interests: history, photography"));
        assert!(prompt.contains("always start with \"After breakfast\""));
        assert!(prompt.contains("Write 2-3 sentences"));
        assert!(!prompt.contains("REAL EXAMPLES"));
        assert!(prompt.ends_with("Description:"));
    }

    #[test]
    fn test_day_prompt_embeds_cleaned_examples() {
        let interests = strings(&["history"]);
        let highlights = strings(&[]);
        let long_example = format!("Day 9 - Antalya: {}", "x".repeat(400));
        let examples = vec![
            "Day 3 - Cappadocia: Morning balloon ride, then transfer to hotel.".to_string(),
            long_example,
            "After breakfast, visit the Library of Celsus and the Great Theatre of Ephesus.".to_string(),
            "A fourth example that should never be embedded in the prompt text at all.".to_string(),
        ];
        let prompt = build_day_prompt(&full_day(&interests, &highlights), &examples);

        assert!(prompt.contains("Example 1: Morning balloon ride, then transfer to hotel.\n\n"));
        assert!(prompt.contains(&format!("Example 2: {}\n\n", "x".repeat(300))));
        assert!(!prompt.contains(&"x".repeat(301)));
        assert!(prompt.contains("Example 3: After breakfast, visit the Library of Celsus"));
        assert!(!prompt.contains("fourth example"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let interests = strings(&["food"]);
        let highlights = strings(&["Kaleici Old Town"]);
        let examples = strings(&["Day 1 - Antalya: Arrival and transfer to your seaside hotel for the night."]);
        let ctx = full_day(&interests, &highlights);

        assert_eq!(build_day_prompt(&ctx, &examples), build_day_prompt(&ctx, &examples));
        assert_eq!(
            build_title_prompt("Turkey", &interests, 4, TourStyle::Sic, &examples),
            build_title_prompt("Turkey", &interests, 4, TourStyle::Sic, &examples)
        );
    }
}
