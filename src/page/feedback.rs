//! Homepage button feedback: a short flash followed by a delayed notice.

use std::time::{Duration, Instant};

/// Each half of the flash (fade out, then fade back in).
pub const FLASH_HALF: Duration = Duration::from_millis(100);
pub const NOTICE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    SignUp,
    Download,
}

impl PageButton {
    /// Look a button up by its class name on the page.
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "sign-up-button" => Some(PageButton::SignUp),
            "download-button" => Some(PageButton::Download),
            _ => None,
        }
    }

    pub fn notice(self) -> &'static str {
        match self {
            PageButton::SignUp => "Thank you for subscribing to the email list.",
            PageButton::Download => "Your download will commence shortly.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    FadingOut,
    FadingIn,
    Steady,
}

#[derive(Debug, Clone, Default)]
pub struct ButtonFeedback {
    pressed: Option<(PageButton, Instant)>,
}

impl ButtonFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the flash and schedule the notice, replacing any pending one.
    pub fn press(&mut self, button: PageButton, now: Instant) {
        self.pressed = Some((button, now));
    }

    /// Press by class name; unknown classes are logged and ignored.
    pub fn press_class(&mut self, class: &str, now: Instant) -> Option<PageButton> {
        match PageButton::from_class(class) {
            Some(button) => {
                self.press(button, now);
                Some(button)
            }
            None => {
                tracing::warn!(class, "no feedback for unknown button");
                None
            }
        }
    }

    /// Flash state of `button` at `now`.
    pub fn flash(&self, button: PageButton, now: Instant) -> FlashPhase {
        match self.pressed {
            Some((pressed, at)) if pressed == button => {
                let elapsed = now.saturating_duration_since(at);
                if elapsed < FLASH_HALF {
                    FlashPhase::FadingOut
                } else if elapsed < FLASH_HALF * 2 {
                    FlashPhase::FadingIn
                } else {
                    FlashPhase::Steady
                }
            }
            _ => FlashPhase::Steady,
        }
    }

    /// Return the notice once its delay has passed; it is delivered only once.
    pub fn take_notice(&mut self, now: Instant) -> Option<&'static str> {
        let (button, at) = self.pressed?;
        if now.saturating_duration_since(at) < NOTICE_DELAY {
            return None;
        }
        self.pressed = None;
        Some(button.notice())
    }

    pub fn is_pending(&self) -> bool {
        self.pressed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_then_notice_once() {
        let t0 = Instant::now();
        let mut fb = ButtonFeedback::new();
        fb.press(PageButton::SignUp, t0);

        assert_eq!(fb.flash(PageButton::SignUp, t0), FlashPhase::FadingOut);
        assert_eq!(fb.flash(PageButton::SignUp, t0 + Duration::from_millis(150)), FlashPhase::FadingIn);
        assert_eq!(fb.flash(PageButton::SignUp, t0 + Duration::from_millis(200)), FlashPhase::Steady);
        assert_eq!(fb.flash(PageButton::Download, t0), FlashPhase::Steady);

        assert_eq!(fb.take_notice(t0 + Duration::from_millis(999)), None);
        assert_eq!(
            fb.take_notice(t0 + NOTICE_DELAY),
            Some("Thank you for subscribing to the email list.")
        );
        assert_eq!(fb.take_notice(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn later_press_replaces_pending_notice() {
        let t0 = Instant::now();
        let mut fb = ButtonFeedback::new();
        fb.press(PageButton::SignUp, t0);
        fb.press(PageButton::Download, t0 + Duration::from_millis(500));

        assert_eq!(fb.take_notice(t0 + NOTICE_DELAY), None);
        assert_eq!(
            fb.take_notice(t0 + Duration::from_millis(1500)),
            Some("Your download will commence shortly.")
        );
        assert!(!fb.is_pending());
    }

    #[test]
    fn unknown_class_is_ignored() {
        let t0 = Instant::now();
        let mut fb = ButtonFeedback::new();
        assert_eq!(fb.press_class("hero-banner", t0), None);
        assert!(!fb.is_pending());
        assert_eq!(fb.press_class("download-button", t0), Some(PageButton::Download));
    }
}
