//! Fixed copy for placeholder popups and call-to-action buttons.

use std::collections::HashMap;

use saibaba_bridge::notification::{NotificationRequest, Severity};

/// Static title, message and severity for a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    pub title: &'static str,
    pub message: &'static str,
    pub severity: Severity,
}

impl MessageTemplate {
    const fn info(title: &'static str, message: &'static str) -> Self {
        Self {
            title,
            message,
            severity: Severity::Info,
        }
    }

    const fn success(title: &'static str, message: &'static str) -> Self {
        Self {
            title,
            message,
            severity: Severity::Success,
        }
    }

    /// Instantiates the template as a presentable request.
    pub fn to_request(&self) -> NotificationRequest {
        NotificationRequest::new(self.title, self.message, self.severity)
    }
}

/// Key of the entry shown for "read more" links on news cards.
pub const READ_MORE_KEY: &str = "read-more";

const ENTRIES: &[(&str, MessageTemplate)] = &[
    // call-to-action buttons
    (
        "#catering",
        MessageTemplate::success(
            "🍩 Order Catering",
            "Our catering services are perfect for any occasion! Contact us at catering@saibabagroup.com or call (555) 123-4567 to place your order.",
        ),
    ),
    (
        "#careers",
        MessageTemplate::success(
            "💼 Join Our Team",
            "Thank you for your interest in joining Saibaba Group! Visit careers@saibabagroup.com to view current openings and submit your application.",
        ),
    ),
    (
        "#apply",
        MessageTemplate::info(
            "📝 Career Application",
            "We're excited about your interest! Our HR team will reach out to discuss opportunities. Email your resume to hr@saibabagroup.com",
        ),
    ),
    (
        "#contribution",
        MessageTemplate::info(
            "❤️ Charitable Contribution Request",
            "Saibaba Cares is committed to giving back! Submit your request to cares@saibabagroup.com with details about your organization and event.",
        ),
    ),
    // sections that are not built yet
    (
        "#locations",
        MessageTemplate::info(
            "📍 Find Our Locations",
            "Our Dunkin' locations are spread across multiple states! Visit locations.saibabagroup.com to find the nearest one to you.",
        ),
    ),
    (
        "#team",
        MessageTemplate::info(
            "👥 Our Team",
            "Meet the dedicated professionals behind Saibaba Group who make excellence happen every day!",
        ),
    ),
    (
        "#about",
        MessageTemplate::info(
            "ℹ️ About Us",
            "Saibaba Group has been proudly serving communities as a Dunkin' franchise network for over 15 years.",
        ),
    ),
    (
        "#difference",
        MessageTemplate::info(
            "⭐ The Saibaba Difference",
            "Our commitment to Mission, Vision & Values sets us apart in the franchise industry.",
        ),
    ),
    (
        "#cares",
        MessageTemplate::info(
            "💝 Saibaba Cares",
            "Community involvement and philanthropy are at the heart of everything we do!",
        ),
    ),
    (
        "#privacy",
        MessageTemplate::info(
            "🔒 Privacy Policy",
            "Your privacy is important to us. Our full privacy policy details how we protect your information.",
        ),
    ),
    (
        "#cookies",
        MessageTemplate::info(
            "🍪 Cookie Policy",
            "We use cookies to enhance your browsing experience. Learn more about our cookie usage policy.",
        ),
    ),
    (
        "#all-news",
        MessageTemplate::info(
            "📰 News & Updates",
            "Stay updated with all our latest news and store development updates! Visit news.saibabagroup.com",
        ),
    ),
    (
        READ_MORE_KEY,
        MessageTemplate::info(
            "📰 News & Updates",
            "This article will be available soon. Follow us on social media for the latest updates!",
        ),
    ),
    // feature card headings
    (
        "Mission, Vision, & Values",
        MessageTemplate::info(
            "🎯 Mission, Vision, & Values",
            "Excellence, Integrity, Community, and Service drive everything we do at Saibaba Group!",
        ),
    ),
    (
        "Locations",
        MessageTemplate::info(
            "📍 Our Locations",
            "Find your nearest Saibaba Group Dunkin' location and experience America's Favorite Coffee!",
        ),
    ),
];

/// Read-only lookup from a symbolic target (an anchor href, a feature card
/// heading, or [`READ_MORE_KEY`]) to the popup shown for it.
#[derive(Debug, Clone)]
pub struct MessageTable {
    entries: HashMap<&'static str, MessageTemplate>,
}

impl Default for MessageTable {
    fn default() -> Self {
        Self {
            entries: ENTRIES.iter().copied().collect(),
        }
    }
}

impl MessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`. A miss is a normal outcome.
    pub fn resolve(&self, key: &str) -> Option<&MessageTemplate> {
        self.entries.get(key)
    }

    /// Whether `key` has an entry.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
