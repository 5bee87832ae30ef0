//! Text of the map/space toggle control
//!
//! The toggle shows where a click will take you: "View from Space" while the
//! map is showing, "View Map" while the globe is.

/// Language used when a requested one has no entry
pub const DEFAULT_LANGUAGE: &str = "en";

/// Label currently due on the toggle control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleLabel {
    ViewFromSpace,
    ViewMap,
}

impl ToggleLabel {
    /// Translation key as used by the app's string tables
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            ToggleLabel::ViewFromSpace => "viewFromSpace",
            ToggleLabel::ViewMap => "viewMap",
        }
    }

    /// Label text in `language`, English when the language is unknown.
    #[must_use]
    pub fn text(self, language: &str) -> &'static str {
        let (from_space, map) = match language {
            "fr" => ("Vue de l'Espace", "Vue Carte"),
            "es" => ("Vista desde el Espacio", "Vista Mapa"),
            "de" => ("Ansicht aus dem Weltraum", "Kartenansicht"),
            "it" => ("Vista dallo Spazio", "Vista Mappa"),
            "ru" => ("Вид из космоса", "Вид карты"),
            _ => ("View from Space", "View Map"),
        };
        match self {
            ToggleLabel::ViewFromSpace => from_space,
            ToggleLabel::ViewMap => map,
        }
    }
}

/// Languages with their own toggle labels
pub const SUPPORTED_LANGUAGES: [&str; 6] = ["en", "fr", "es", "de", "it", "ru"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(ToggleLabel::ViewFromSpace.key(), "viewFromSpace");
        assert_eq!(ToggleLabel::ViewMap.key(), "viewMap");
    }

    #[test]
    fn test_translations_and_fallback() {
        assert_eq!(ToggleLabel::ViewMap.text("de"), "Kartenansicht");
        assert_eq!(ToggleLabel::ViewFromSpace.text("fr"), "Vue de l'Espace");
        assert_eq!(ToggleLabel::ViewFromSpace.text("pt"), "View from Space");
        assert_eq!(
            ToggleLabel::ViewMap.text(DEFAULT_LANGUAGE),
            ToggleLabel::ViewMap.text("xx")
        );
    }

    #[test]
    fn test_every_language_has_distinct_labels() {
        for lang in SUPPORTED_LANGUAGES {
            assert_ne!(
                ToggleLabel::ViewFromSpace.text(lang),
                ToggleLabel::ViewMap.text(lang)
            );
        }
    }
}
