//! Enhancement features and their one-shot flags.

use std::fmt;

/// An independently initialized enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    ScrollReveal,
    Navigation,
    Anchors,
    ActiveMenu,
    Images,
    Forms,
    HoverAnimation,
    ResponsiveSpacing,
    LogoLink,
}

impl Feature {
    /// Every feature, in initialization order.
    pub const ALL: [Feature; 9] = [
        Feature::ScrollReveal,
        Feature::Navigation,
        Feature::Anchors,
        Feature::ActiveMenu,
        Feature::Images,
        Feature::Forms,
        Feature::HoverAnimation,
        Feature::ResponsiveSpacing,
        Feature::LogoLink,
    ];

    /// Stable feature name.
    pub fn name(self) -> &'static str {
        match self {
            Feature::ScrollReveal => "scroll-reveal",
            Feature::Navigation => "navigation",
            Feature::Anchors => "anchors",
            Feature::ActiveMenu => "active-menu",
            Feature::Images => "images",
            Feature::Forms => "forms",
            Feature::HoverAnimation => "hover-animation",
            Feature::ResponsiveSpacing => "responsive-spacing",
            Feature::LogoLink => "logo-link",
        }
    }

    /// Look a feature up by its stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set once a feature has been initialized; never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlag {
    initialized: bool,
}

impl FeatureFlag {
    pub fn is_set(&self) -> bool {
        self.initialized
    }

    /// Set the flag. Returns `true` if it was not set before.
    pub fn mark(&mut self) -> bool {
        !std::mem::replace(&mut self.initialized, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
        assert_eq!(Feature::from_name("unknown"), None);
    }

    #[test]
    fn test_flag_marks_once() {
        let mut flag = FeatureFlag::default();
        assert!(!flag.is_set());
        assert!(flag.mark());
        assert!(!flag.mark());
        assert!(flag.is_set());
    }
}
