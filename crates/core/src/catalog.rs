use crate::classify::classify;
use crate::models::{KeywordRules, Topic, TriageResponse};

const DISCLAIMER: &str =
    "Health information only. Not a medical diagnosis. If symptoms worsen, seek a clinician.";

const EMERGENCY_BODY: &str = "\u{1F6A8} URGENT ACTION NEEDED\n\nWHAT TO DO NOW:\n• Call 102 immediately\n• Stay calm and don't leave patient alone\n• If breathing problems - sit patient upright\n\nNEAREST EMERGENCY CARE:\nFinding closest facilities...";

const SYMPTOMS_BODY: &str = "FEVER & COUGH EDUCATION\n\nWHAT TO DO NOW:\n• Monitor temperature twice daily\n• Drink plenty of safe fluids\n• Rest and avoid contact with others\n\nWHEN TO SEEK CARE:\n• Temperature > 100.4°F (38°C) for 3+ days\n• Difficulty breathing\n• Severe weakness or dehydration\n\nPREVENTION IN 3 STEPS:\n• Wash hands frequently with soap\n• Wear mask in crowded places\n• Get adequate rest and nutrition";

const VACCINATION_BODY: &str = "VACCINATION SCHEDULE\n\nFOR ADULTS:\n• COVID-19 booster: Every 6 months\n• Flu vaccine: Yearly (before monsoon)\n• Tetanus: Every 10 years\n\nFOR CHILDREN (0-2 years):\n• Birth: BCG, Hepatitis B, OPV\n• 6 weeks: DPT, IPV, Hib, Rotavirus\n• 10 weeks: DPT, IPV, Hib, Rotavirus\n• 14 weeks: DPT, IPV, Hib, Rotavirus\n\nNEXT STEPS:\nVisit nearest PHC on Tuesdays/Thursdays. Carry vaccination card.\n\nHealth information only. Consult healthcare provider for personalized advice.";

/// Builds the templated response for a classified message. Pure transform:
/// same `(topic, text)` in, byte-identical response out. Dialing and clinic
/// navigation are signalled through the flags only; the engine performs no
/// side effects itself.
pub fn respond(topic: Topic, original_text: &str) -> TriageResponse {
    match topic {
        Topic::Emergency => TriageResponse {
            topic,
            body: format!("{EMERGENCY_BODY}\n\n{DISCLAIMER}"),
            quick_replies: Vec::new(),
            emergency: true,
            show_actions: true,
        },
        Topic::SymptomsEducation => TriageResponse {
            topic,
            body: format!("{SYMPTOMS_BODY}\n\n{DISCLAIMER}"),
            quick_replies: labels(&["Find Clinic", "Prevention Tips", "Vaccines"]),
            emergency: false,
            show_actions: false,
        },
        // The vaccination template carries its own closing advice line
        // instead of the standard disclaimer.
        Topic::Vaccination => TriageResponse {
            topic,
            body: VACCINATION_BODY.to_string(),
            quick_replies: labels(&["Find PHC", "Child Vaccines", "Adult Vaccines"]),
            emergency: false,
            show_actions: false,
        },
        Topic::Default => TriageResponse {
            topic,
            // The user text is inserted verbatim as display content. It is
            // never parsed or interpreted; rendering it as anything other
            // than plain text is the UI's responsibility to escape.
            body: format!(
                "I understand you're asking about \"{original_text}\".\n\nI can help you with:\n• \u{1FA7A} Symptoms education and when to seek care\n• \u{1F489} Vaccination schedules for all ages\n• \u{1F3E5} Nearby clinics and health centers\n• \u{1F4E2} Local health alerts and outbreaks\n• \u{1F6E1} Prevention tips and health education\n\nWhat would you like to know more about?\n\n{DISCLAIMER}"
            ),
            quick_replies: labels(&["Symptoms Guide", "Find Clinics", "Vaccines", "Prevention"]),
            emergency: false,
            show_actions: false,
        },
    }
}

/// Classification plus response construction behind one handle. Owns the
/// keyword rules so callers configure the vocabulary once at startup.
#[derive(Debug, Clone, Default)]
pub struct TriageEngine {
    rules: KeywordRules,
}

impl TriageEngine {
    pub fn new(rules: KeywordRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &KeywordRules {
        &self.rules
    }

    pub fn classify(&self, text: &str) -> Topic {
        classify(text, &self.rules)
    }

    pub fn triage(&self, text: &str) -> TriageResponse {
        respond(self.classify(text), text)
    }
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_response_signals_urgent_treatment() {
        let response = respond(Topic::Emergency, "chest pain");
        assert!(response.emergency);
        assert!(response.show_actions);
        assert!(response.body.contains("Call 102"));
        assert!(response.quick_replies.is_empty());
    }

    #[test]
    fn non_emergency_responses_carry_the_disclaimer() {
        let response = respond(Topic::SymptomsEducation, "fever");
        assert!(!response.emergency);
        assert!(response
            .body
            .ends_with("If symptoms worsen, seek a clinician."));
    }

    #[test]
    fn vaccination_quick_replies_are_exact() {
        let response = respond(Topic::Vaccination, "vaccine");
        assert_eq!(
            response.quick_replies,
            vec!["Find PHC", "Child Vaccines", "Adult Vaccines"]
        );
    }

    #[test]
    fn default_response_interpolates_text_verbatim() {
        let response = respond(Topic::Default, "xyzzy");
        assert!(response.body.contains("xyzzy"));
        assert!(response.body.starts_with("I understand you're asking about \"xyzzy\""));
    }

    #[test]
    fn default_response_does_not_interpret_markup() {
        let payload = "<script>alert(1)</script>";
        let response = respond(Topic::Default, payload);
        // Inserted as-is: literal display content, nothing stripped or
        // expanded.
        assert!(response.body.contains(payload));
    }

    #[test]
    fn respond_is_deterministic() {
        let first = respond(Topic::Default, "some question");
        let second = respond(Topic::Default, "some question");
        assert_eq!(first, second);
    }

    #[test]
    fn engine_triage_matches_classify_then_respond() {
        let engine = TriageEngine::default();
        let text = "What vaccines does my baby need";
        assert_eq!(engine.classify(text), Topic::Vaccination);
        assert_eq!(engine.triage(text), respond(Topic::Vaccination, text));
    }

    #[test]
    fn engine_flags_emergency_input() {
        let engine = TriageEngine::default();
        let response = engine.triage("I have chest pain and can't breathe");
        assert_eq!(response.topic, Topic::Emergency);
        assert!(response.emergency);
        assert!(response.show_actions);
        assert!(response.body.contains("Call 102"));
    }
}
