//! Map layer styles.
//!
//! The default palette is embedded from `styles/default.toml` at compile
//! time: city A blue, city B's original position a faint gray, and city B
//! moved onto city A in red.

use city_compare_comparison_models::StyleConfig;

const DEFAULT_STYLES: &str = include_str!("../styles/default.toml");

/// Parses a style table from TOML.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or a role is missing.
pub fn parse_styles(toml_str: &str) -> Result<StyleConfig, toml::de::Error> {
    toml::de::from_str(toml_str)
}

/// Returns the built-in layer styles.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (caught by the tests below,
/// since the file is embedded at compile time).
#[must_use]
pub fn default_styles() -> StyleConfig {
    parse_styles(DEFAULT_STYLES).unwrap_or_else(|e| panic!("Failed to parse default styles: {e}"))
}

#[cfg(test)]
mod tests {
    use city_compare_comparison_models::LayerRole;

    use super::*;

    #[test]
    fn default_styles_parse() {
        let styles = default_styles();
        assert_eq!(styles.style(LayerRole::Reference).fill_color, "blue");
        assert_eq!(styles.style(LayerRole::Original).stroke_color, "gray");
        assert_eq!(styles.style(LayerRole::Translated).fill_color, "red");
    }

    #[test]
    fn original_layer_is_de_emphasized() {
        let styles = default_styles();
        let original = styles.style(LayerRole::Original);
        for role in [LayerRole::Reference, LayerRole::Translated] {
            let other = styles.style(role);
            assert!(original.fill_opacity < other.fill_opacity);
            assert!(original.stroke_weight < other.stroke_weight);
        }
    }

    #[test]
    fn opacities_are_fractions() {
        let styles = default_styles();
        for role in LayerRole::ALL {
            let opacity = styles.style(*role).fill_opacity;
            assert!((0.0..=1.0).contains(&opacity), "{role}: {opacity}");
        }
    }

    #[test]
    fn missing_role_is_rejected() {
        let partial = r#"
            [reference]
            fillColor = "blue"
            strokeColor = "blue"
            strokeWeight = 2.0
            fillOpacity = 0.4
        "#;
        assert!(parse_styles(partial).is_err());
    }
}
