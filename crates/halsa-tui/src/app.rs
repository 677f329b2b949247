use std::time::Duration;

use halsa_core::{
    ChatClient, ChatError, ChatReply, ChatRequest, ChatSession, Config, Language, MessageTicker,
    Typewriter,
};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::tui::TICK_RATE;

/// Interval between rotating loading messages.
const TICKER_INTERVAL: Duration = Duration::from_millis(2000);
/// Delay between revealed characters of an answer.
const TYPE_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub session: ChatSession,
    pub client: ChatClient,

    // Composer state
    pub input: String,
    pub cursor: usize, // cursor position in input, in characters

    // Chat viewport (dimensions updated during render)
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,
    pub chat_total_lines: u16,
    pub follow_bottom: bool,

    // Loading and reveal effects
    pub ticker: MessageTicker,
    pub typewriter: Typewriter,
    pub animation_frame: u8,

    // In-flight exchange
    pub reply_task: Option<JoinHandle<Result<ChatReply, ChatError>>>,
}

impl App {
    pub fn new(client: ChatClient, language: Language) -> Self {
        let session = ChatSession::new(language);
        let ticker = MessageTicker::new(loading_messages(language), TICKER_INTERVAL);

        // The greeting types in like any other assistant message.
        let mut typewriter = Typewriter::new(TYPE_DELAY, true);
        if let Some(welcome) = session.messages().first() {
            typewriter.set_target(&welcome.content);
        }

        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            session,
            client,

            input: String::new(),
            cursor: 0,

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            chat_total_lines: 0,
            follow_bottom: true,

            ticker,
            typewriter,
            animation_frame: 0,

            reply_task: None,
        }
    }

    /// Submit the composer contents. The composer is only cleared when the
    /// session accepts the text; a refused submission (blank text, busy
    /// session) leaves it untouched.
    pub fn submit_input(&mut self) {
        if let Some(request) = self.session.submit(&self.input) {
            self.input.clear();
            self.cursor = 0;
            self.dispatch(request);
        }
    }

    /// Submit a suggested question verbatim.
    pub fn submit_text(&mut self, text: &str) {
        if let Some(request) = self.session.submit(text) {
            self.dispatch(request);
        }
    }

    fn dispatch(&mut self, request: ChatRequest) {
        self.ticker.set_active(true);
        self.follow_bottom = true;
        let client = self.client.clone();
        self.reply_task = Some(tokio::spawn(async move { client.ask(&request).await }));
    }

    /// Advance the animation clocks by one tick.
    pub fn on_tick(&mut self) {
        self.ticker.advance(TICK_RATE);
        if self.typewriter.advance(TICK_RATE) || self.typewriter.is_typing() {
            // Keep the growing answer in view while it reveals.
            if self.follow_bottom {
                self.scroll_to_bottom();
            }
        }
        if self.session.is_busy() {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        }
    }

    /// Settle the in-flight exchange once its task has finished.
    pub async fn poll_reply(&mut self) {
        let finished = self
            .reply_task
            .as_ref()
            .is_some_and(JoinHandle::is_finished);
        if !finished {
            return;
        }
        let Some(task) = self.reply_task.take() else {
            return;
        };

        // The handle is finished, so this await resolves immediately; a
        // join error means the task panicked or was aborted.
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(err) => Err(ChatError::Interrupted(err)),
        };

        self.session.settle(outcome);
        self.ticker.set_active(false);
        self.animation_frame = 0;
        if let Some(last) = self.session.messages().last() {
            self.typewriter.set_target(&last.content);
        }
        self.follow_bottom = true;
    }

    /// Flip between English and Swedish: rewrites the greeting, refreshes
    /// the rotating loading strings, and persists the choice.
    pub fn toggle_language(&mut self) {
        let next = self.session.language().toggle();
        self.session.set_language(next);
        self.ticker.set_messages(loading_messages(next));

        // A rewritten greeting is new assistant text; retarget the reveal
        // when the greeting is still the latest message on screen.
        if self.session.messages().len() == 1 {
            if let Some(welcome) = self.session.messages().first() {
                self.typewriter.set_target(&welcome.content);
            }
        }

        if let Err(err) = Config::save_language(next) {
            warn!(error = %err, "could not persist language choice");
        }
    }

    /// Suggested questions are offered only while the conversation holds
    /// nothing but the greeting and no exchange is in flight.
    pub fn fresh_conversation(&self) -> bool {
        self.session.messages().len() == 1 && !self.session.is_busy()
    }

    // Chat viewport scrolling. Manual movement detaches from the bottom;
    // a new submission or settlement re-attaches.
    pub fn scroll_up(&mut self) {
        self.follow_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max_scroll = self.chat_total_lines.saturating_sub(self.chat_height);
        self.chat_scroll = self.chat_scroll.saturating_add(1).min(max_scroll);
        if self.chat_scroll >= max_scroll {
            self.follow_bottom = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.follow_bottom = false;
        self.chat_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.chat_scroll = self.chat_total_lines.saturating_sub(self.chat_height);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // An abandoned exchange must not outlive the session it belongs to.
        if let Some(task) = self.reply_task.take() {
            task.abort();
        }
    }
}

fn loading_messages(language: Language) -> Vec<String> {
    halsa_core::Translations::for_language(language)
        .loading_messages
        .iter()
        .map(|m| m.to_string())
        .collect()
}
