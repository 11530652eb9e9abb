/// The classified purpose of a user click.
///
/// Produced once per click by a single classification pass and then handed
/// to the intent dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    // Buttons that always preempt navigation.
    OrderCatering,
    JoinTeam,
    Apply,
    RequestContribution,
    /// A directions button inside a location card.
    GetDirections {
        /// Location name taken from the card heading.
        location: String,
        /// Postal address with line breaks collapsed.
        address: String,
    },
    /// The site logo linking to `#`.
    BackToTop,
    /// A link standing in for content that does not exist on the page yet.
    Placeholder {
        /// Message table key: the anchor href, or `read-more`.
        key: String,
    },
    /// A feature card without its own link.
    FeatureCard {
        /// Trimmed text of the card's heading.
        heading: String,
    },
}

impl Intent {
    /// Returns the message table key for intents backed by a fixed message.
    #[must_use]
    pub fn message_key(&self) -> Option<&str> {
        match self {
            Intent::OrderCatering => Some("#catering"),
            Intent::JoinTeam => Some("#careers"),
            Intent::Apply => Some("#apply"),
            Intent::RequestContribution => Some("#contribution"),
            Intent::Placeholder { key } => Some(key),
            Intent::FeatureCard { heading } => Some(heading),
            Intent::GetDirections { .. } | Intent::BackToTop => None,
        }
    }

    /// Whether handling this intent replaces the browser's default action.
    ///
    /// Feature cards are not links, so there is nothing to suppress.
    #[must_use]
    pub fn preempts_navigation(&self) -> bool {
        !matches!(self, Intent::FeatureCard { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_buttons_map_to_anchor_keys() {
        assert_eq!(Intent::OrderCatering.message_key(), Some("#catering"));
        assert_eq!(Intent::JoinTeam.message_key(), Some("#careers"));
        assert_eq!(Intent::Apply.message_key(), Some("#apply"));
        assert_eq!(
            Intent::RequestContribution.message_key(),
            Some("#contribution")
        );
    }

    #[test]
    fn formatted_intents_have_no_key() {
        assert_eq!(Intent::BackToTop.message_key(), None);
        let directions = Intent::GetDirections {
            location: "Main St".into(),
            address: "1 Main St".into(),
        };
        assert_eq!(directions.message_key(), None);
    }

    #[test]
    fn feature_cards_do_not_preempt() {
        let card = Intent::FeatureCard {
            heading: "Locations".into(),
        };
        assert!(!card.preempts_navigation());
        assert!(Intent::BackToTop.preempts_navigation());
    }
}
