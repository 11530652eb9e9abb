use serde::{Deserialize, Serialize};

/// Timing of the toast lifecycle, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Delay between inserting the toast and starting its enter transition.
    pub enter_delay_ms: u32,
    /// Time a toast stays up before dismissing itself.
    pub lifetime_ms: u32,
    /// Length of the exit transition; the node is removed once it elapses.
    pub exit_transition_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            enter_delay_ms: 10,
            lifetime_ms: 5000,
            exit_transition_ms: 300,
        }
    }
}

/// Scroll-driven geometry, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Height reserved for the sticky header when scrolling to an anchor.
    pub header_offset: f64,
    /// Scroll position past which the header shrinks.
    pub shrink_threshold: f64,
    /// How far above a section's top the section already counts as current.
    pub active_nav_margin: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: 100.0,
            shrink_threshold: 100.0,
            active_nav_margin: 150.0,
        }
    }
}

/// Hero rotator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeroConfig {
    /// Time each slide stays active.
    pub interval_ms: u32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self { interval_ms: 5000 }
    }
}

/// Intersection parameters for the reveal-on-scroll animation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible.
    pub threshold: f64,
    /// CSS margin applied to the viewport when testing intersection.
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -3.125rem 0px".to_owned(),
        }
    }
}

/// Global site configuration.
///
/// Every field has a default so a page may override any subset of it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Brand name printed in the startup banner.
    pub site_name: String,
    /// Tagline printed under the banner.
    pub tagline: String,
    pub toast: ToastConfig,
    pub scroll: ScrollConfig,
    pub hero: HeroConfig,
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Saibaba Group".to_owned(),
            tagline: "Serving communities with excellence.".to_owned(),
            toast: ToastConfig::default(),
            scroll: ScrollConfig::default(),
            hero: HeroConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}
