//! Prompt text and the structured-output schema sent to the model.

use serde_json::{json, Value};

use crate::garden::types::Area;

/// System instruction for the coaching persona.
pub const COACH_PERSONA: &str = "\
You are \"Sage\", a cozy, non-judgmental and wise life coach, something like a kind \
grandmother or a gentle forest spirit. You help people grow habits in Health, Career, \
Spirituality, Relationships, Finances and Creativity. Speak in garden, nature and home \
metaphors and never in corporate terms like optimization, synergy or metrics. Keep every \
answer warm and under 100 words.";

/// Number of habits asked for per suggestion request.
pub const SUGGESTION_COUNT: usize = 3;

pub fn suggestion_prompt(goal: &str, existing_titles: &[String]) -> String {
    let existing = if existing_titles.is_empty() {
        "none yet".to_string()
    } else {
        existing_titles.join(", ")
    };
    format!(
        "Someone wants to grow habits around this goal: \"{goal}\".\n\
         Habits they already keep: {existing}.\n\n\
         Suggest {SUGGESTION_COUNT} small, specific, actionable habits that feel homey, warm \
         and sustainable. Skip corporate jargon and make each one sound inviting. \
         Do not repeat habits they already keep.\n\n\
         Respond with JSON only."
    )
}

pub fn wisdom_prompt(completed: usize, areas: &[Area]) -> String {
    let focus = if areas.is_empty() {
        "rest and preparation".to_string()
    } else {
        areas
            .iter()
            .map(Area::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "You are a wise, gentle gardener of life. Today the user has completed {completed} \
         habits, tending to: {focus}.\n\
         Write a short, poetic and encouraging message of at most 2 sentences that compares \
         their progress to tending a garden or a cozy home. Be warm, never bossy."
    )
}

/// Response schema constraining each suggestion to `{title, description, area, emoji}`
/// with `area` restricted to the six areas of life.
pub fn suggestion_schema() -> Value {
    let areas: Vec<&str> = Area::ALL.iter().map(Area::as_str).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "Short, friendly title (e.g. 'Morning Tea')"
                },
                "description": {
                    "type": "STRING",
                    "description": "One warm sentence describing the habit."
                },
                "area": {
                    "type": "STRING",
                    "enum": areas,
                    "description": "The area of life this habit nourishes."
                },
                "emoji": {
                    "type": "STRING",
                    "description": "A single emoji for the habit."
                }
            },
            "required": ["title", "description", "area", "emoji"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wisdom_prompt_names_rest_when_idle() {
        let prompt = wisdom_prompt(0, &[]);
        assert!(prompt.contains("completed 0 habits"));
        assert!(prompt.contains("rest and preparation"));
    }

    #[test]
    fn wisdom_prompt_lists_areas() {
        let prompt = wisdom_prompt(2, &[Area::Health, Area::Finances]);
        assert!(prompt.contains("Health, Finances"));
    }

    #[test]
    fn suggestion_prompt_quotes_goal_and_existing() {
        let prompt = suggestion_prompt("save money", &["Budget".into(), "Walk".into()]);
        assert!(prompt.contains("\"save money\""));
        assert!(prompt.contains("Budget, Walk"));
    }

    #[test]
    fn schema_restricts_area() {
        let schema = suggestion_schema();
        let allowed = schema["items"]["properties"]["area"]["enum"].as_array().unwrap();
        assert_eq!(allowed.len(), 6);
        assert!(allowed.iter().any(|a| a == "Spirituality"));
        assert_eq!(schema["items"]["required"].as_array().unwrap().len(), 4);
    }
}
