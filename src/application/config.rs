//! Enhancer configuration.
//!
//! Every field has a default matching the site's stylesheet conventions, so a
//! host only overrides what differs. The configuration can be embedded in the
//! page as JSON (for example in a `data-enhance` attribute) and read with
//! [`EnhancerConfig::from_json`]. Unknown keys are rejected.

use crate::domain::focus::FOCUSABLE_SELECTOR;
use crate::domain::selector::{SelectorError, SelectorList};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid selector for `{field}`: {source}")]
    InvalidSelector {
        field: &'static str,
        #[source]
        source: SelectorError,
    },
    #[error("`{field}` must be greater than zero")]
    Zero { field: &'static str },
}

/// Parse a configured selector, naming the field on failure.
pub(crate) fn selector(field: &'static str, value: &str) -> Result<SelectorList, ConfigError> {
    SelectorList::parse(value).map_err(|source| ConfigError::InvalidSelector { field, source })
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnhancerConfig {
    pub navigation: NavigationConfig,
    pub scroll_reveal: ScrollRevealConfig,
    pub anchors: AnchorConfig,
    pub images: ImageConfig,
    pub forms: FormConfig,
    pub toasts: ToastConfig,
    pub hover: HoverConfig,
    pub spacing: SpacingConfig,
    pub logo: LogoConfig,
}

impl EnhancerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check numeric ranges. Selectors are checked when features compile them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.navigation.breakpoint == 0 {
            return Err(ConfigError::Zero {
                field: "navigation.breakpoint",
            });
        }
        if self.toasts.lifetime_ms == 0 {
            return Err(ConfigError::Zero {
                field: "toasts.lifetime_ms",
            });
        }
        if self.spacing.breakpoint == 0 {
            return Err(ConfigError::Zero {
                field: "spacing.breakpoint",
            });
        }
        Ok(())
    }
}

/// Navigation disclosure settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Navigation root; carries the open class.
    pub root: String,
    /// Toggle control; carries `aria-expanded`.
    pub toggle: String,
    /// Panel whose focusable descendants form the focus trap.
    pub list: String,
    /// Links that close the panel when activated.
    pub link: String,
    pub focusable: String,
    pub open_class: String,
    /// Class added to `<body>` while the panel is open.
    pub scroll_lock_class: String,
    /// Viewport width (px) at and above which an open panel is closed.
    pub breakpoint: u32,
    pub resize_debounce_ms: u64,
    /// Delay before focusing into a freshly opened panel, so the open
    /// transition has laid out its links.
    pub focus_settle_ms: u64,
}

impl NavigationConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn focus_settle(&self) -> Duration {
        Duration::from_millis(self.focus_settle_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            root: ".c-nav#main-nav".into(),
            toggle: ".c-nav__toggle".into(),
            list: ".c-nav__list".into(),
            link: ".c-nav__link".into(),
            focusable: FOCUSABLE_SELECTOR.into(),
            open_class: "is-open".into(),
            scroll_lock_class: "u-no-scroll".into(),
            breakpoint: 1024,
            resize_debounce_ms: 150,
            focus_settle_ms: 100,
        }
    }
}

/// Options handed to the scroll-reveal library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollRevealConfig {
    /// Elements that must not animate; their `data-aos` is stripped.
    pub layout_sensitive: String,
    pub once: bool,
    pub mirror: bool,
    pub duration_ms: u64,
    pub easing: String,
    pub offset: u32,
}

impl Default for ScrollRevealConfig {
    fn default() -> Self {
        Self {
            layout_sensitive: "[data-aos][data-avoid-layout=\"true\"]".into(),
            once: false,
            mirror: false,
            duration_ms: 600,
            easing: "ease-out".into(),
            offset: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorConfig {
    pub links: String,
    /// Fixed header whose height offsets the scroll target.
    pub header: String,
    /// Offset used when the header is missing.
    pub fallback_header_height: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            links: "a[href^=\"#\"]".into(),
            header: ".l-header".into(),
            fallback_header_height: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
    pub selector: String,
    pub fluid_class: String,
    /// Images with this class are above the fold and never lazy-loaded.
    pub logo_class: String,
    pub critical_attribute: String,
    /// Replacement `src` for images that fail to load.
    pub placeholder: String,
    pub logo_max_height: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            selector: "img".into(),
            fluid_class: "img-fluid".into(),
            logo_class: "c-logo__img".into(),
            critical_attribute: "data-critical".into(),
            placeholder: PLACEHOLDER_SVG.into(),
            logo_max_height: "40px".into(),
        }
    }
}

const PLACEHOLDER_SVG: &str = "data:image/svg+xml,%3Csvg xmlns=\"http://www.w3.org/2000/svg\" \
viewBox=\"0 0 400 300\"%3E%3Crect width=\"400\" height=\"300\" fill=\"%23e9ecef\"/%3E\
%3Ctext x=\"50%25\" y=\"50%25\" dominant-baseline=\"middle\" text-anchor=\"middle\" \
font-family=\"sans-serif\" font-size=\"18\" fill=\"%236c757d\"%3EAfbeelding niet beschikbaar\
%3C/text%3E%3C/svg%3E";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub selector: String,
    pub submit_button: String,
    /// Fields posted as JSON.
    pub fields: String,
    pub endpoint: String,
    pub validated_class: String,
    pub sending_label: String,
    pub success_message: String,
    /// Shown when the endpoint rejects the submission without a message.
    pub failure_message: String,
    /// Shown when the endpoint is unreachable or answers garbage.
    pub network_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            selector: ".needs-validation".into(),
            submit_button: "button[type=\"submit\"]".into(),
            fields: "input, select, textarea".into(),
            endpoint: "process.php".into(),
            validated_class: "was-validated".into(),
            sending_label: "Verzenden...".into(),
            success_message: "Uw bericht is succesvol verzonden!".into(),
            failure_message: "Er is een fout opgetreden. Probeer het later opnieuw.".into(),
            network_message: "Er is een fout opgetreden. Controleer uw internetverbinding.".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastConfig {
    pub container_id: String,
    pub lifetime_ms: u64,
    /// Time between hiding a toast and detaching it.
    pub fade_ms: u64,
    pub close_label: String,
}

impl ToastConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            container_id: "toast-container".into(),
            lifetime_ms: 5000,
            fade_ms: 150,
            close_label: "Sluiten".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoverConfig {
    pub selector: String,
    pub scale: f64,
    pub opacity: f64,
    pub duration_ms: u64,
    pub easing: String,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            selector: ".card, .feature-card, .animal-card, .btn-primary, .btn-success".into(),
            scale: 1.02,
            opacity: 0.95,
            duration_ms: 300,
            easing: "easeOutQuad".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpacingConfig {
    pub selector: String,
    /// Viewport width (px) below which gaps are added.
    pub breakpoint: u32,
    pub gap_class: String,
    /// Marks containers whose gap was added here, so only those are reverted.
    pub marker_attribute: String,
    pub resize_debounce_ms: u64,
}

impl SpacingConfig {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            selector: ".d-flex".into(),
            breakpoint: 576,
            gap_class: "gap-3".into(),
            marker_attribute: "data-mobile-gap-added".into(),
            resize_debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub selector: String,
    pub href: String,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            selector: ".c-logo".into(),
            href: "/".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = EnhancerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.navigation.breakpoint, 1024);
        assert_eq!(config.navigation.resize_debounce(), Duration::from_millis(150));
        assert_eq!(config.spacing.resize_debounce(), Duration::from_millis(200));
        assert_eq!(config.toasts.lifetime(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_selectors_parse() {
        let config = EnhancerConfig::default();
        for (field, value) in [
            ("navigation.root", &config.navigation.root),
            ("navigation.focusable", &config.navigation.focusable),
            ("scroll_reveal.layout_sensitive", &config.scroll_reveal.layout_sensitive),
            ("anchors.links", &config.anchors.links),
            ("forms.submit_button", &config.forms.submit_button),
            ("hover.selector", &config.hover.selector),
        ] {
            selector(field, value).unwrap();
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EnhancerConfig::from_json(
            r#"{"navigation": {"breakpoint": 900}, "forms": {"endpoint": "/api/contact"}}"#,
        )
        .unwrap();
        assert_eq!(config.navigation.breakpoint, 900);
        assert_eq!(config.navigation.open_class, "is-open");
        assert_eq!(config.forms.endpoint, "/api/contact");
        assert_eq!(config.toasts.fade_ms, 150);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = EnhancerConfig::from_json(r#"{"navigation": {"breakpiont": 900}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_zero_values_rejected() {
        let err = EnhancerConfig::from_json(r#"{"toasts": {"lifetime_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Zero { field: "toasts.lifetime_ms" }));

        let err = EnhancerConfig::from_json(r#"{"navigation": {"breakpoint": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Zero { field: "navigation.breakpoint" }));
    }

    #[test]
    fn test_invalid_selector_names_field() {
        let err = selector("logo.selector", "a > b").unwrap_err();
        assert!(err.to_string().contains("logo.selector"));
    }
}
