use std::time::Duration;

use crate::config::TypingConfig;


/// One step of the animation: what to show, and how long until the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay: Duration,
}

/// Types a phrase out, holds it, deletes it, moves on to the next one.
///
/// Works in characters, not bytes. Never ends unless there is nothing to type.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    shown: usize,
    deleting: bool,
    type_delay: Duration,
    delete_delay: Duration,
    hold: Duration,
}

impl Typewriter {
    pub fn new(config: &TypingConfig) -> Self {
        Self {
            phrases: config.phrases.clone(),
            phrase: 0,
            shown: 0,
            deleting: false,
            type_delay: Duration::from_millis(config.type_delay_ms.into()),
            delete_delay: Duration::from_millis(config.delete_delay_ms.into()),
            hold: Duration::from_millis(config.hold_ms.into()),
        }
    }

    pub fn tick(&mut self) -> Option<Frame> {
        let phrase = self.phrases.get(self.phrase)?;
        let len = phrase.chars().count();

        if !self.deleting {
            if self.shown < len {
                self.shown += 1;
            }
            let text = phrase.chars().take(self.shown).collect();

            if self.shown == len {
                self.deleting = true;
                return Some(Frame { text, delay: self.hold });
            }
            return Some(Frame { text, delay: self.type_delay });
        }

        self.shown = self.shown.saturating_sub(1);
        let text = phrase.chars().take(self.shown).collect();

        if self.shown == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
        }

        Some(Frame { text, delay: self.delete_delay })
    }
}

impl Iterator for Typewriter {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(phrases: &[&str]) -> TypingConfig {
        TypingConfig {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            ..TypingConfig::default()
        }
    }

    fn frame(text: &str, ms: u64) -> Frame {
        Frame { text: text.to_string(), delay: Duration::from_millis(ms) }
    }

    #[test]
    fn types_holds_deletes_and_wraps() {
        let frames: Vec<Frame> = Typewriter::new(&config(&["ab", "c"])).take(8).collect();

        assert_eq!(
            frames,
            vec![
                frame("a", 80),
                frame("ab", 1000),
                frame("a", 50),
                frame("", 50),
                frame("c", 1000),
                frame("", 50),
                frame("a", 80),
                frame("ab", 1000),
            ]
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let texts: Vec<String> = Typewriter::new(&config(&["héé"])).take(3).map(|f| f.text).collect();
        assert_eq!(texts, vec!["h", "hé", "héé"]);
    }

    #[test]
    fn nothing_to_type_means_no_frames() {
        assert_eq!(Typewriter::new(&config(&[])).tick(), None);
    }

    #[test]
    fn empty_phrase_does_not_stall() {
        let texts: Vec<String> = Typewriter::new(&config(&["", "x"])).take(4).map(|f| f.text).collect();
        assert_eq!(texts, vec!["", "", "x", ""]);
    }

    #[test]
    fn default_phrases_cycle() {
        let phrase_len = TypingConfig::default().phrases[0].chars().count();
        let mut writer = Typewriter::new(&TypingConfig::default());

        let full = writer.by_ref().nth(phrase_len - 1).unwrap();
        assert_eq!(full.text, "Crafting Clean, Scalable Web Solutions");
        assert_eq!(full.delay, Duration::from_millis(1000));
    }
}
