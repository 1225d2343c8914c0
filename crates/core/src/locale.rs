use crate::models::Language;

/// Chrome strings for one language: the seeded greeting, the input
/// placeholder, the greeting's quick-reply labels and the assistant title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub greeting: &'static str,
    pub placeholder: &'static str,
    pub quick_replies: &'static [&'static str],
    pub title: &'static str,
}

/// Static localization table. Total: `Language::from_code` already folds
/// unknown codes to English, so every code resolves to an entry. Adding a
/// language is one new `Language` variant plus one arm here.
pub fn ui_strings(language: Language) -> UiStrings {
    match language {
        Language::En => UiStrings {
            greeting: "Namaste! I'm Swasthya Mitra, your health assistant. I can help with prevention tips, symptoms education, vaccines, or nearby clinics. What do you need today?",
            placeholder: "Type your health question...",
            quick_replies: &["Symptoms", "Vaccines", "Clinics", "Alerts", "Prevention"],
            title: "Swasthya Mitra",
        },
        Language::Hi => UiStrings {
            greeting: "नमस्ते! मैं स्वास्थ्य मित्र हूं, आपका स्वास्थ्य सहायक। मैं रोकथाम के टिप्स, लक्षणों की शिक्षा, टीकाकरण या नज़दीकी क्लिनिक की जानकारी में मदद कर सकता हूं। आज आपको क्या चाहिए?",
            placeholder: "अपना स्वास्थ्य प्रश्न टाइप करें...",
            quick_replies: &["लक्षण", "टीके", "क्लिनिक", "चेतावनी", "रोकथाम"],
            title: "स्वास्थ्य मित्र",
        },
        Language::Mr => UiStrings {
            greeting: "नमस्कार! मी स्वास्थ्य मित्र आहे, तुमचा आरोग्य सहाय्यक। मी प्रतिबंधात्मक टिप्स, लक्षणांचे शिक्षण, लसीकरण किंवा जवळच्या क्लिनिकची माहिती देऊ शकतो. आज तुम्हाला काय हवे?",
            placeholder: "तुमचा आरोग्य प्रश्न टाइप करा...",
            quick_replies: &["लक्षणे", "लसी", "क्लिनिक", "इशारे", "प्रतिबंध"],
            title: "स्वास्थ्य मित्र",
        },
        Language::Bn => UiStrings {
            greeting: "নমস্কার! আমি স্বাস্থ্য মিত্র, আপনার স্বাস্থ্য সহায়ক। আমি প্রতিরোধমূলক টিপস, উপসর্গের শিক্ষা, টিকাদান বা কাছাকাছি ক্লিনিকের তথ্য দিতে পারি। আজ আপনার কী প্রয়োজন?",
            placeholder: "আপনার স্বাস্থ্য প্রশ্ন টাইপ করুন...",
            quick_replies: &["উপসর্গ", "টিকা", "ক্লিনিক", "সতর্কতা", "প্রতিরোধ"],
            title: "স্বাস্থ্য মিত্র",
        },
        Language::Or => UiStrings {
            greeting: "ନମସ୍କାର! ମୁଁ ସ୍ୱାସ୍ଥ୍ୟ ମିତ୍ର, ଆପଣଙ୍କର ସ୍ୱାସ୍ଥ୍ୟ ସହାୟକ। ମୁଁ ପ୍ରତିରୋଧ ଟିପ୍ସ, ଲକ୍ଷଣ ଶିକ୍ଷା, ଟିକାକରଣ କିମ୍ବା ନିକଟସ୍ଥ କ୍ଲିନିକ୍ ର ସୂଚନା ଦେଇପାରେ। ଆଜି ଆପଣଙ୍କର କଣ ଦରକାର?",
            placeholder: "ଆପଣଙ୍କର ସ୍ୱାସ୍ଥ୍ୟ ପ୍ରଶ୍ନ ଟାଇପ୍ କରନ୍ତୁ...",
            quick_replies: &["ଲକ୍ଷଣ", "ଟିକା", "କ୍ଲିନିକ୍", "ଚେତାବନୀ", "ପ୍ରତିରୋଧ"],
            title: "ସ୍ୱାସ୍ଥ୍ୟ ମିତ୍ର",
        },
    }
}
