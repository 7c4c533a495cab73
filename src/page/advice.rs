//! Tiered-region advice toggle.
//!
//! One guidance section is visible at a time; choosing a tier shows its
//! section, hides the others and updates the header.

use crate::domain::TierStatus;

const HEADER_PREFIX: &str = "Tier Status: ";

#[derive(Debug, Clone)]
pub struct AdviceBoard {
    visible: Option<TierStatus>,
    header: String,
}

impl Default for AdviceBoard {
    fn default() -> Self {
        Self {
            visible: None,
            header: "Tier Status".to_string(),
        }
    }
}

impl AdviceBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a tier by its menu label.
    ///
    /// Unknown labels are logged and leave the board untouched.
    pub fn select(&mut self, label: &str) -> Option<TierStatus> {
        let Some(tier) = TierStatus::from_label(label.trim()) else {
            tracing::warn!(label, "unrecognised tier selection");
            return None;
        };
        self.select_tier(tier);
        Some(tier)
    }

    pub fn select_tier(&mut self, tier: TierStatus) {
        self.visible = Some(tier);
        self.header = format!("{HEADER_PREFIX}{}", tier.display_name());
    }

    pub fn selected(&self) -> Option<TierStatus> {
        self.visible
    }

    pub fn is_visible(&self, tier: TierStatus) -> bool {
        self.visible == Some(tier)
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Guidance lines of the visible section (empty when nothing is selected).
    pub fn visible_guidance(&self) -> &'static [&'static str] {
        self.visible.map(guidance).unwrap_or(&[])
    }
}

/// Headline rules for each tier.
pub fn guidance(tier: TierStatus) -> &'static [&'static str] {
    match tier {
        TierStatus::Tier1 => &[
            "Medium alert.",
            "Meet in groups of up to six, indoors or outdoors.",
            "Shops, gyms and hospitality may open with COVID-secure measures.",
            "Work from home where you can.",
        ],
        TierStatus::Tier2 => &[
            "High alert.",
            "Do not mix with other households indoors unless in your support bubble.",
            "Meet in groups of up to six outdoors.",
            "Pubs and bars may only serve alcohol with a substantial meal.",
        ],
        TierStatus::Tier3 => &[
            "Very high alert.",
            "Do not meet other households indoors or in private gardens.",
            "Hospitality is closed except for takeaway and delivery.",
            "Avoid travelling outside the area except where necessary.",
        ],
        TierStatus::NationalLockdown => &[
            "Stay at home.",
            "Leave home only for essential shopping, work you cannot do from home, exercise or medical need.",
            "Non-essential shops and hospitality are closed.",
            "Do not meet anyone outside your household or support bubble.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_a_tier_shows_only_that_section() {
        let mut board = AdviceBoard::new();
        assert_eq!(board.select("Tier 2"), Some(TierStatus::Tier2));

        assert_eq!(board.header(), "Tier Status: Tier 2");
        assert!(board.is_visible(TierStatus::Tier2));
        for other in [TierStatus::Tier1, TierStatus::Tier3, TierStatus::NationalLockdown] {
            assert!(!board.is_visible(other));
        }
        assert_eq!(board.visible_guidance()[0], "High alert.");
    }

    #[test]
    fn switching_tiers_hides_the_previous_one() {
        let mut board = AdviceBoard::new();
        board.select("Tier 3");
        board.select("National Lockdown");
        assert!(!board.is_visible(TierStatus::Tier3));
        assert_eq!(board.selected(), Some(TierStatus::NationalLockdown));
        assert_eq!(board.header(), "Tier Status: National Lockdown");
    }

    #[test]
    fn unknown_label_is_a_no_op() {
        let mut board = AdviceBoard::new();
        board.select("Tier 1");
        assert_eq!(board.select("Tier 4"), None);
        assert_eq!(board.header(), "Tier Status: Tier 1");
        assert_eq!(board.selected(), Some(TierStatus::Tier1));
    }

    #[test]
    fn nothing_visible_initially() {
        let board = AdviceBoard::new();
        assert!(board.visible_guidance().is_empty());
        assert_eq!(board.header(), "Tier Status");
    }
}
