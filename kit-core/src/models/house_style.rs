use serde::{Deserialize, Serialize};

/// Pricing tier of a kit, used to pick the ready-home multiplier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseStyle {
    AFrame,
    #[default]
    Standard,
}

impl HouseStyle {
    /// Tag that marks an A-frame kit inside a catalog description.
    pub const A_FRAME_TAG: &'static str = "A-FRAME";

    /// Classifies a kit from its catalog description.
    ///
    /// The pricing spreadsheet has no style column, so the style is derived
    /// once at import time from the description text (case-insensitive).
    pub fn classify(description: &str) -> Self {
        if description.to_uppercase().contains(Self::A_FRAME_TAG) {
            Self::AFrame
        } else {
            Self::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn classify_detects_a_frame_in_any_case() {
        assert_eq!(HouseStyle::classify("Kit A-Frame 32m²"), HouseStyle::AFrame);
        assert_eq!(HouseStyle::classify("KIT A-FRAME"), HouseStyle::AFrame);
        assert_eq!(HouseStyle::classify("pousada a-frame duplo"), HouseStyle::AFrame);
    }

    #[test]
    fn classify_defaults_to_standard() {
        assert_eq!(HouseStyle::classify("Pousada 40m²"), HouseStyle::Standard);
        assert_eq!(HouseStyle::classify(""), HouseStyle::Standard);
    }

    #[test]
    fn classify_requires_the_hyphen() {
        assert_eq!(HouseStyle::classify("Kit A Frame"), HouseStyle::Standard);
    }
}
