pub mod config;
pub mod i18n;
pub mod session;
pub mod state;
pub mod ticker;
pub mod transport;
pub mod typewriter;

// Re-export main types for convenience
pub use config::Config;
pub use i18n::{Language, Translations};
pub use session::ChatSession;
pub use state::{ChatMessage, ChatRole, WELCOME_ID};
pub use ticker::MessageTicker;
pub use transport::{ChatClient, ChatError, ChatReply, ChatRequest};
pub use typewriter::Typewriter;
