//! Helpers that turn free-form training itinerary text into short per-day
//! writing samples for the generation prompts.

use regex::Regex;
use std::sync::OnceLock;

/// Extracted day samples must be longer than this to be useful.
const MIN_EXAMPLE_CHARS: usize = 50;

const DAY_MARKER: &str = "day ";

/// True when a (trimmed) line opens a new day, e.g. "Day 2 - Cappadocia".
pub fn is_day_marker(line: &str) -> bool {
    line.get(..DAY_MARKER.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(DAY_MARKER))
        .unwrap_or(false)
}

/// Meal code annotations such as "(B)" or "(B, D)".
fn is_meal_code(line: &str) -> bool {
    line.starts_with('(')
}

/// Split `raw_text` into day segments and return up to `max_examples` of the
/// substantial ones, in document order.
///
/// Day marker lines only delimit segments; their own text is not kept.
pub fn extract_day_examples(raw_text: &str, max_examples: usize) -> Vec<String> {
    let mut examples = Vec::new();
    let mut current_day: Vec<&str> = Vec::new();

    for line in raw_text.lines().map(str::trim) {
        if is_day_marker(line) {
            if !current_day.is_empty() {
                push_if_substantial(&mut examples, &current_day);
                if examples.len() >= max_examples {
                    current_day.clear();
                    break;
                }
            }
            current_day.clear();
        } else if !line.is_empty() && !is_meal_code(line) {
            current_day.push(line);
        }
    }

    if !current_day.is_empty() && examples.len() < max_examples {
        push_if_substantial(&mut examples, &current_day);
    }

    examples.truncate(max_examples);
    examples
}

fn push_if_substantial(examples: &mut Vec<String>, lines: &[&str]) {
    let text = lines.join(" ");
    let text = text.trim();
    if text.chars().count() > MIN_EXAMPLE_CHARS {
        examples.push(text.to_string());
    }
}

/// Strip a leading "Day N - City:" heading from a sample so the model does
/// not learn to emit day titles.
pub fn clean_reference_example(example: &str) -> String {
    if !is_day_marker(example) {
        return example.to_string();
    }

    match example.split_once('-') {
        Some((_, rest)) => {
            let rest = rest.trim();
            match rest.split_once(':') {
                Some((_, body)) => body.trim().to_string(),
                None => rest.to_string(),
            }
        }
        None => example.to_string(),
    }
}

/// Tidy pasted or uploaded itinerary text before it is stored.
pub fn normalize_training_content(content: &str) -> String {
    static BLANK_RUNS: OnceLock<Regex> = OnceLock::new();
    let blank_runs = BLANK_RUNS.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"));

    let content = content.replace("\r\n", "\n");
    blank_runs.replace_all(content.trim(), "\n\n").into_owned()
}
