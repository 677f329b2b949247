//! Conversation state holder.
//!
//! [`ChatSession`] is a pure state machine: it stages outbound requests and
//! records their outcomes, but never performs I/O itself. The caller
//! dispatches the staged [`ChatRequest`] (in the TUI, as a spawned tokio
//! task) and feeds the result back through [`ChatSession::settle`]. The
//! busy flag is the only concurrency control: while an exchange is in
//! flight, further submissions are refused, not queued.

use chrono::Utc;
use tracing::{error, info};

use crate::i18n::{Language, Translations};
use crate::state::{ChatMessage, ChatRole, WELCOME_ID};
use crate::transport::{ChatError, ChatReply, ChatRequest};

pub struct ChatSession {
    language: Language,
    messages: Vec<ChatMessage>,
    busy: bool,
    next_id: u64,
}

impl ChatSession {
    /// A fresh conversation: one synthetic assistant greeting in the
    /// active language.
    pub fn new(language: Language) -> Self {
        let welcome = ChatMessage {
            id: WELCOME_ID.to_string(),
            role: ChatRole::Assistant,
            content: Translations::for_language(language)
                .welcome_message
                .to_string(),
            created_at: Utc::now(),
            website_urls: Vec::new(),
        };
        Self {
            language,
            messages: vec![welcome],
            busy: false,
            next_id: 1,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn translations(&self) -> &'static Translations {
        Translations::for_language(self.language)
    }

    /// Switch the active language, rewriting the greeting in place. The
    /// greeting is matched by its reserved id, never by position.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        let welcome_text = Translations::for_language(language).welcome_message;
        if let Some(msg) = self.messages.iter_mut().find(|m| m.id == WELCOME_ID) {
            msg.content = welcome_text.to_string();
        }
    }

    /// Stage a user message for sending. Returns the request to dispatch,
    /// or `None` when the text is blank or an exchange is already in
    /// flight; in both refusal cases the conversation is untouched.
    ///
    /// The request's history is the conversation as it stood before this
    /// submission; the new text rides in the request's own message field.
    pub fn submit(&mut self, text: &str) -> Option<ChatRequest> {
        let text = text.trim();
        if text.is_empty() || self.busy {
            return None;
        }

        let history = self.messages.clone();
        let id = self.allocate_id("user");
        self.messages.push(ChatMessage {
            id,
            role: ChatRole::User,
            content: text.to_string(),
            created_at: Utc::now(),
            website_urls: Vec::new(),
        });
        self.busy = true;

        Some(ChatRequest {
            message: text.to_string(),
            history,
            language: self.language,
        })
    }

    /// Record the outcome of the in-flight exchange. Appends exactly one
    /// assistant message and clears the busy flag; failures become the
    /// localized generic error string.
    pub fn settle(&mut self, outcome: Result<ChatReply, ChatError>) {
        let (content, website_urls) = match outcome {
            Ok(ChatReply::Answered {
                message,
                website_urls,
            }) => (message, website_urls),
            Ok(ChatReply::Degraded { message }) => {
                info!("backend had no answer, showing the fallback text");
                (message, Vec::new())
            }
            Err(err) => {
                error!(error = %err, "chat exchange failed");
                (
                    Translations::for_language(self.language)
                        .error_something_went_wrong
                        .to_string(),
                    Vec::new(),
                )
            }
        };

        let id = self.allocate_id("assistant");
        self.messages.push(ChatMessage {
            id,
            role: ChatRole::Assistant,
            content,
            created_at: Utc::now(),
            website_urls,
        });
        self.busy = false;
    }

    fn allocate_id(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(text: &str) -> Result<ChatReply, ChatError> {
        Ok(ChatReply::Answered {
            message: text.to_string(),
            website_urls: vec!["https://doktor.se/artiklar/forkylning".to_string()],
        })
    }

    #[test]
    fn test_new_session_holds_only_the_welcome_message() {
        let session = ChatSession::new(Language::En);
        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, WELCOME_ID);
        assert_eq!(messages[0].role, ChatRole::Assistant);
        assert_eq!(
            messages[0].content,
            Translations::for_language(Language::En).welcome_message
        );
        assert!(!session.is_busy());
    }

    #[test]
    fn test_blank_submissions_are_refused() {
        let mut session = ChatSession::new(Language::Sv);
        assert!(session.submit("").is_none());
        assert!(session.submit("   ").is_none());
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_submit_while_busy_is_refused() {
        let mut session = ChatSession::new(Language::Sv);
        let first = session.submit("Vad är symtom på förkylning?");
        assert!(first.is_some());
        assert!(session.is_busy());

        let second = session.submit("Hur behandlar man huvudvärk?");
        assert!(second.is_none());
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn test_submit_appends_user_message_and_snapshots_history() {
        let mut session = ChatSession::new(Language::En);
        let request = session
            .submit("  What are the symptoms of a cold?  ")
            .unwrap();

        // The staged request carries the trimmed text and the conversation
        // as it stood before the user message was appended.
        assert_eq!(request.message, "What are the symptoms of a cold?");
        assert_eq!(request.language, Language::En);
        assert_eq!(request.history.len(), 1);
        assert_eq!(request.history[0].id, WELCOME_ID);

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "What are the symptoms of a cold?");
    }

    #[test]
    fn test_answered_settlement_appends_one_assistant_message() {
        let mut session = ChatSession::new(Language::En);
        session.submit("What are the symptoms of a cold?").unwrap();
        session.settle(answered("A runny nose, sore throat, and cough."));

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(messages[2].content, "A runny nose, sore throat, and cough.");
        assert_eq!(messages[2].website_urls.len(), 1);
        assert!(!session.is_busy());
    }

    #[test]
    fn test_failed_settlement_appends_localized_error() {
        let mut session = ChatSession::new(Language::Sv);
        session.submit("Vad är symtom på förkylning?").unwrap();
        session.settle(Err(ChatError::Status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        )));

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(
            messages[2].content,
            Translations::for_language(Language::Sv).error_something_went_wrong
        );
        assert!(!session.is_busy());
    }

    #[test]
    fn test_degraded_settlement_carries_fallback_text() {
        let mut session = ChatSession::new(Language::Sv);
        session.submit("Vad är symtom på förkylning?").unwrap();
        session.settle(Ok(ChatReply::Degraded {
            message: Translations::for_language(Language::Sv)
                .error_no_answer
                .to_string(),
        }));

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages[2].content,
            Translations::for_language(Language::Sv).error_no_answer
        );
        assert!(messages[2].website_urls.is_empty());
    }

    #[test]
    fn test_language_switch_rewrites_welcome_by_id() {
        let mut session = ChatSession::new(Language::Sv);
        session.submit("Vad är symtom på förkylning?").unwrap();
        session.settle(answered("Snuva och halsont."));

        let ids_before: Vec<String> = session
            .messages()
            .iter()
            .map(|m| m.id.clone())
            .collect();

        session.set_language(Language::En);

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages[0].content,
            Translations::for_language(Language::En).welcome_message
        );
        // Only the welcome content changed; every id is stable.
        let ids_after: Vec<String> = messages.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids_before, ids_after);
        assert_eq!(messages[1].content, "Vad är symtom på förkylning?");
    }

    #[test]
    fn test_message_ids_are_unique_and_monotonic() {
        let mut session = ChatSession::new(Language::Sv);
        session.submit("första").unwrap();
        session.settle(answered("svar"));
        session.submit("andra").unwrap();
        session.settle(answered("svar igen"));

        let ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["welcome", "user-1", "assistant-2", "user-3", "assistant-4"]
        );
    }
}
