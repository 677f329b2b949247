//! Typewriter reveal of assistant answers.

use std::time::Duration;

/// Convert a character index to a byte index for UTF-8 safe slicing.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Reveals a target string one character at a time.
///
/// Like [`crate::ticker::MessageTicker`], the revealer is advanced by the
/// owning event loop's clock rather than a timer of its own, so no reveal
/// step can fire after the owner is gone.
#[derive(Debug, Clone)]
pub struct Typewriter {
    target: String,
    delay: Duration,
    auto_start: bool,
    revealed_chars: usize,
    typing: bool,
    elapsed: Duration,
}

impl Typewriter {
    pub fn new(delay: Duration, auto_start: bool) -> Self {
        Self {
            target: String::new(),
            delay,
            auto_start,
            revealed_chars: 0,
            typing: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Point the revealer at new text. Comparison is by value: setting the
    /// same text again is a no-op, anything else restarts from an empty
    /// prefix. An empty target resets without ever completing.
    pub fn set_target(&mut self, text: &str) {
        if text == self.target {
            return;
        }
        self.target = text.to_string();
        self.revealed_chars = 0;
        self.elapsed = Duration::ZERO;
        self.typing = self.auto_start && !self.target.is_empty();
    }

    /// Begin revealing a target that was set while auto-start was off.
    pub fn start(&mut self) {
        if !self.target.is_empty() && self.revealed_chars < self.target.chars().count() {
            self.typing = true;
        }
    }

    /// Advance the reveal clock, uncovering one character per full delay
    /// period. Returns `true` exactly once, on the call that reveals the
    /// final character.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if !self.typing {
            return false;
        }

        let total = self.target.chars().count();
        if self.delay.is_zero() {
            self.revealed_chars = total;
        } else {
            self.elapsed += delta;
            while self.elapsed >= self.delay && self.revealed_chars < total {
                self.elapsed -= self.delay;
                self.revealed_chars += 1;
            }
        }

        if self.revealed_chars >= total {
            self.typing = false;
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    /// The revealed prefix of the target, cut on a character boundary.
    pub fn displayed(&self) -> &str {
        &self.target[..char_to_byte_index(&self.target, self.revealed_chars)]
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(20);

    fn revealer(text: &str) -> Typewriter {
        let mut tw = Typewriter::new(DELAY, true);
        tw.set_target(text);
        tw
    }

    #[test]
    fn test_reveals_progressively() {
        let mut tw = revealer("hej");
        assert_eq!(tw.displayed(), "");
        assert!(tw.is_typing());
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "h");
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "he");
    }

    #[test]
    fn test_completion_fires_exactly_once() {
        let target = "hälsa";
        let mut tw = revealer(target);
        let mut completions = 0;
        for _ in 0..(target.chars().count() + 5) {
            if tw.advance(DELAY) {
                completions += 1;
            }
        }
        assert_eq!(tw.displayed(), target);
        assert!(!tw.is_typing());
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_large_delta_completes_in_one_call() {
        let mut tw = revealer("abc");
        assert!(tw.advance(Duration::from_secs(1)));
        assert_eq!(tw.displayed(), "abc");
        assert!(!tw.advance(Duration::from_secs(1)));
    }

    #[test]
    fn test_retarget_resets_before_revealing_new_text() {
        let mut tw = revealer("first answer");
        tw.advance(DELAY);
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "fi");
        tw.set_target("second");
        assert_eq!(tw.displayed(), "");
        assert!(tw.is_typing());
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "s");
    }

    #[test]
    fn test_same_target_is_a_no_op() {
        let mut tw = revealer("svar");
        tw.advance(DELAY);
        tw.set_target("svar");
        assert_eq!(tw.displayed(), "s");
        assert!(tw.is_typing());
    }

    #[test]
    fn test_empty_target_resets_without_completion() {
        let mut tw = revealer("pending");
        tw.advance(DELAY);
        tw.set_target("");
        assert_eq!(tw.displayed(), "");
        assert!(!tw.is_typing());
        assert!(!tw.advance(Duration::from_secs(1)));
    }

    #[test]
    fn test_auto_start_off_waits_for_start() {
        let mut tw = Typewriter::new(DELAY, false);
        tw.set_target("vänta");
        tw.advance(Duration::from_secs(1));
        assert_eq!(tw.displayed(), "");
        assert!(!tw.is_typing());
        tw.start();
        assert!(tw.is_typing());
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "v");
    }

    #[test]
    fn test_multibyte_characters_slice_cleanly() {
        let mut tw = revealer("å👋ö");
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "å");
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "å👋");
        tw.advance(DELAY);
        assert_eq!(tw.displayed(), "å👋ö");
    }
}
