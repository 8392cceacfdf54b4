//! Transient on-screen message: fully visible for a while, then fades out.

use crate::core::constants::{MESSAGE_FADE_MS, MESSAGE_VISIBLE_MS};

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView<'a> {
    pub text: &'a str,
    /// 1.0 while fully visible, falling linearly to 0.0 over the fade.
    pub opacity: f32,
}

/// Holds at most one message. A new message replaces the old one and
/// restarts its timing.
#[derive(Debug, Clone, Default)]
pub struct MessageBanner {
    current: Option<(String, u64)>,
}

impl MessageBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>, now_ms: u64) {
        self.current = Some((text.into(), now_ms));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn view(&self, now_ms: u64) -> Option<MessageView<'_>> {
        let (text, shown_at) = self.current.as_ref()?;
        let elapsed = now_ms.saturating_sub(*shown_at);
        if elapsed < MESSAGE_VISIBLE_MS {
            return Some(MessageView { text, opacity: 1.0 });
        }
        let fading = elapsed - MESSAGE_VISIBLE_MS;
        if fading >= MESSAGE_FADE_MS {
            return None;
        }
        Some(MessageView {
            text,
            opacity: 1.0 - fading as f32 / MESSAGE_FADE_MS as f32,
        })
    }
}
