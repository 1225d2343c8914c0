use crate::models::{KeywordRules, Topic};

/// Assigns exactly one topic to free-text input. Matching is ordered,
/// first-match-wins: emergency keywords are checked before anything else so
/// a message like "chest pain and fever" always triages as an emergency.
/// Substring containment (not whole-word) is intentional; it trades
/// precision for recall, which is the safe direction for red-flag
/// detection.
pub fn classify(text: &str, rules: &KeywordRules) -> Topic {
    let lower = text.to_lowercase();

    if contains_any(&lower, &rules.emergency) {
        return Topic::Emergency;
    }
    if contains_any(&lower, &rules.symptoms) {
        return Topic::SymptomsEducation;
    }
    if contains_any(&lower, &rules.vaccination) {
        return Topic::Vaccination;
    }

    Topic::Default
}

fn contains_any(input: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| input.contains(needle.as_str()))
}
