use saibaba_bridge::config::SiteConfig;

use crate::dom::Dom;

/// Id of the inline `<script type="application/toml">` element that may
/// carry configuration overrides.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Errors that can occur while loading the site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The embedded configuration is not valid TOML or does not match the
    /// expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
}

/// Loads the site configuration embedded in the page.
///
/// A page without a configuration element gets the defaults; fields the
/// embedded TOML leaves out keep their default values.
pub fn load_config<D: Dom>(dom: &D) -> Result<SiteConfig, ConfigError> {
    let Some(element) = dom.element_by_id(CONFIG_ELEMENT_ID) else {
        log::debug!("No #{CONFIG_ELEMENT_ID} element, using default configuration");
        return Ok(SiteConfig::default());
    };

    let contents = dom.text_content(&element);
    log::info!("Loading configuration from #{CONFIG_ELEMENT_ID}");
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn missing_element_yields_defaults() {
        let dom = MemoryDom::new();
        assert_eq!(load_config(&dom).unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let dom = MemoryDom::new();
        dom.add_to_body("script")
            .id(CONFIG_ELEMENT_ID)
            .attr("type", "application/toml")
            .text("site_name = \"Test Group\"\n\n[hero]\ninterval_ms = 2000\n");

        let config = load_config(&dom).unwrap();
        assert_eq!(config.site_name, "Test Group");
        assert_eq!(config.hero.interval_ms, 2000);
        assert_eq!(config.toast, SiteConfig::default().toast);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dom = MemoryDom::new();
        dom.add_to_body("script")
            .id(CONFIG_ELEMENT_ID)
            .text("[hero]\ninterval_ms = \"soon\"\n");

        assert!(matches!(
            load_config(&dom),
            Err(ConfigError::DeserializeError(_))
        ));
    }
}
