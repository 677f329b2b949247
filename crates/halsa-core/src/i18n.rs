//! Localized display strings.
//!
//! The assistant speaks English and Swedish. Every string the UI shows is
//! resolved through a [`Translations`] table so that no component carries
//! hard-coded copy. The table is looked up explicitly and passed by value
//! through constructors; there is no ambient "current language" anywhere.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    En,
    #[default]
    Sv,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sv => "sv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" => Some(Language::En),
            "sv" => Some(Language::Sv),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Language::En => Language::Sv,
            Language::Sv => Language::En,
        }
    }

    pub fn all() -> Vec<Language> {
        vec![Language::En, Language::Sv]
    }
}

/// The full set of display strings for one language.
#[derive(Debug)]
pub struct Translations {
    pub welcome_message: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub popular_questions: &'static str,
    pub suggested_questions: [&'static str; 3],
    pub input_placeholder: &'static str,
    pub label_you: &'static str,
    pub label_assistant: &'static str,
    pub error_no_answer: &'static str,
    pub error_something_went_wrong: &'static str,
    pub loading_messages: [&'static str; 8],
}

static EN: Translations = Translations {
    welcome_message: "Hello! 👋 Welcome to Doktor.se. I am your health assistant, and I can help answer your questions about symptoms, diseases, or general health. The information I provide comes from articles published on the Doktor.se website.",
    title: "Doktor.se",
    subtitle: "Your health assistant",
    popular_questions: "Popular questions",
    suggested_questions: [
        "What are the symptoms of a cold?",
        "How do you treat headaches?",
        "When should I seek care?",
    ],
    input_placeholder: "Ask a question about your health...",
    label_you: "You",
    label_assistant: "Assistant",
    error_no_answer: "I couldn't find an answer to your question.",
    error_something_went_wrong: "Something went wrong. Please try again in a moment.",
    loading_messages: [
        "Thinking for a better response...",
        "Searching through health articles...",
        "Analyzing your question...",
        "Gathering relevant information...",
        "Processing your request...",
        "Finding the best answer...",
        "Consulting medical resources...",
        "Preparing a thoughtful response...",
    ],
};

static SV: Translations = Translations {
    welcome_message: "Hej! 👋 Välkommen till Doktor.se. Jag är din hälsoassistent och kan hjälpa dig att få svar på dina frågor om symtom, sjukdomar eller allmän hälsa. Informationen jag ger kommer från artiklar som publiceras på Doktor.se webbplats.",
    title: "Doktor.se",
    subtitle: "Din hälsoassistent",
    popular_questions: "Populära frågor",
    suggested_questions: [
        "Vad är symtom på förkylning?",
        "Hur behandlar man huvudvärk?",
        "När ska jag söka vård?",
    ],
    input_placeholder: "Ställ en fråga om din hälsa...",
    label_you: "Du",
    label_assistant: "Assistenten",
    error_no_answer: "Jag kunde inte hitta ett svar på din fråga.",
    error_something_went_wrong: "Något gick fel. Försök igen om en stund.",
    loading_messages: [
        "Tänker på ett bättre svar...",
        "Söker igenom hälsoartiklar...",
        "Analyserar din fråga...",
        "Samlar relevant information...",
        "Bearbetar din förfrågan...",
        "Hittar det bästa svaret...",
        "Konsulterar medicinska resurser...",
        "Förbereder ett genomtänkt svar...",
    ],
};

impl Translations {
    pub fn for_language(language: Language) -> &'static Translations {
        match language {
            Language::En => &EN,
            Language::Sv => &SV,
        }
    }
}
