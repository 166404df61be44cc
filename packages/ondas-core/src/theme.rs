//! Visual theme model and its derived attributes.
//!
//! A [`Theme`] is a named visual variant of the app. Each variant carries a
//! static table of derived attributes: a display-name suffix, the alternate
//! app icon it maps to, and a pure function from a base asset name to the
//! themed asset name. The table is the single source of truth for
//! theme-dependent naming; UI layers resolve assets through it rather than
//! branching on the variant themselves.

use serde::{Deserialize, Serialize};

/// Identifier of the dark alternate app icon registered by the shells.
///
/// `None` always means the primary icon, so only non-default icons need
/// identifiers.
pub const ESCURO_ICON: &str = "escuro";

/// Fixed preference order used when cycling through app icons.
///
/// Starts at the primary icon (`None`) and advances modulo the cycle length.
/// Kept as an explicit list rather than derived from [`Theme::ALL`]; the
/// `icon_cycle_covers_theme_icons` test pins the two together so adding a
/// theme without updating the cycle fails loudly.
pub const ICON_CYCLE: [Option<&str>; 2] = [None, Some(ESCURO_ICON)];

/// A visual variant of the application.
///
/// Serialized as the lowercase identifier (`"default"` / `"escuro"`), which
/// is also the value persisted in the preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// The standard light appearance with the primary app icon.
    #[default]
    Default,
    /// The dark appearance, paired with the dark alternate icon.
    Escuro,
}

impl Theme {
    /// All themes, in cycle order.
    pub const ALL: [Theme; 2] = [Theme::Default, Theme::Escuro];

    /// Returns the successor in the cyclic theme order (wraps around).
    #[must_use]
    pub fn next(self) -> Theme {
        match self {
            Theme::Default => Theme::Escuro,
            Theme::Escuro => Theme::Default,
        }
    }

    /// Suffix appended to the app's display name while this theme is active.
    #[must_use]
    pub fn display_suffix(self) -> &'static str {
        match self {
            Theme::Default => "",
            Theme::Escuro => " Escuro",
        }
    }

    /// The alternate app icon this theme maps to.
    ///
    /// `None` maps to the primary icon.
    #[must_use]
    pub fn icon_id(self) -> Option<&'static str> {
        match self {
            Theme::Default => None,
            Theme::Escuro => Some(ESCURO_ICON),
        }
    }

    /// Maps a base asset name to this theme's variant of the asset.
    ///
    /// Pure function: the default theme uses base names unchanged, other
    /// themes append their identifier (`"logo"` -> `"logo-escuro"`).
    #[must_use]
    pub fn themed_asset_name(self, base: &str) -> String {
        match self {
            Theme::Default => base.to_string(),
            Theme::Escuro => format!("{base}-escuro"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_round_trips_over_all_themes() {
        for theme in Theme::ALL {
            assert_eq!(theme.next().next(), theme);
        }
    }

    #[test]
    fn next_always_changes_the_theme() {
        for theme in Theme::ALL {
            assert_ne!(theme.next(), theme);
        }
    }

    #[test]
    fn default_theme_is_default_variant() {
        assert_eq!(Theme::default(), Theme::Default);
    }

    #[test]
    fn serializes_to_lowercase_identifiers() {
        assert_eq!(serde_json::to_string(&Theme::Default).unwrap(), "\"default\"");
        assert_eq!(serde_json::to_string(&Theme::Escuro).unwrap(), "\"escuro\"");
    }

    #[test]
    fn deserializes_from_persisted_identifiers() {
        assert_eq!(
            serde_json::from_str::<Theme>("\"escuro\"").unwrap(),
            Theme::Escuro
        );
    }

    #[test]
    fn icon_mapping_matches_variants() {
        assert_eq!(Theme::Default.icon_id(), None);
        assert_eq!(Theme::Escuro.icon_id(), Some(ESCURO_ICON));
    }

    #[test]
    fn icon_cycle_covers_theme_icons() {
        // The cycle is maintained by hand; make sure it stays in lockstep
        // with the icons the theme table can produce.
        for theme in Theme::ALL {
            assert!(
                ICON_CYCLE.contains(&theme.icon_id()),
                "icon for {theme:?} missing from ICON_CYCLE"
            );
        }
        assert_eq!(ICON_CYCLE.len(), Theme::ALL.len());
    }

    #[test]
    fn asset_names_follow_the_theme() {
        assert_eq!(Theme::Default.themed_asset_name("logo"), "logo");
        assert_eq!(Theme::Escuro.themed_asset_name("logo"), "logo-escuro");
    }

    #[test]
    fn display_suffix_is_empty_for_default_only() {
        assert_eq!(Theme::Default.display_suffix(), "");
        assert_eq!(Theme::Escuro.display_suffix(), " Escuro");
    }
}
