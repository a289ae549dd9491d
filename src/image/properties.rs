//! Inference of per-variant metadata from image filenames.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::RuleSet;
use crate::image::size_class::SizeClass;

/// Scale marker anchored at the end of an extensionless filename,
/// e.g. `@2x` or `@3X`.
fn scale_suffix_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@(\d)[xX]$").expect("invalid scale suffix regex"))
}

/// Metadata inferred for one concrete image file.
///
/// The canonical name is a pure function of the filename: the scale marker,
/// size suffix and extension are stripped in that order, and the result is
/// independent of where the file sits on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageProperties {
    /// Filename with scale marker, size suffix and extension stripped;
    /// variants sharing a canonical name group together.
    pub canonical_name: String,
    /// Size classification derived from the trailing suffix.
    pub size_class: SizeClass,
    /// Pixel-density multiplier parsed from an `@Nx` marker.
    pub scale: Option<u32>,
    /// Whether the icon is pre-rendered; set only for app icon variants.
    pub prerendered: Option<bool>,
}

impl ImageProperties {
    /// Infer variant metadata from a filename. Deterministic, no I/O.
    pub fn infer(file_name: &str, is_app_icon: bool, rules: &RuleSet) -> Self {
        let stem = strip_extension(file_name);
        let (stem, scale) = split_scale_marker(stem);
        let (size_class, canonical_name) = SizeClass::match_suffix(stem);

        let prerendered = is_app_icon.then(|| rules.prerendered_default());

        Self {
            canonical_name: canonical_name.to_string(),
            size_class,
            scale,
            prerendered,
        }
    }

    /// Scale string written to the manifest.
    ///
    /// Watch variants always render at `2x`. Otherwise the parsed marker
    /// wins, then the configured base scale, then `1x`.
    pub fn scale_string(&self, rules: &RuleSet) -> String {
        if self.size_class.is_watch() {
            return "2x".to_string();
        }

        if let Some(scale) = self.scale {
            return format!("{scale}x");
        }

        rules
            .base_scale()
            .map(str::to_string)
            .unwrap_or_else(|| "1x".to_string())
    }

    /// Idiom string written to the manifest.
    ///
    /// The size class's intrinsic idiom wins; otherwise the configured base
    /// idiom applies when it names a known device; otherwise the `universal`
    /// sentinel.
    pub fn idiom(&self, rules: &RuleSet) -> &'static str {
        if let Some(idiom) = self.size_class.idiom() {
            return idiom;
        }

        if let Some(idiom) = rules.base_idiom() {
            return idiom.idiom_string();
        }

        "universal"
    }
}

fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Split a trailing `@Nx` marker off the extensionless name.
fn split_scale_marker(name: &str) -> (&str, Option<u32>) {
    if let Some(captures) = scale_suffix_regex().captures(name)
        && let Some(marker) = captures.get(0)
        && let Ok(scale) = captures[1].parse::<u32>()
    {
        return (&name[..marker.start()], Some(scale));
    }

    (name, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(json: &str) -> RuleSet {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn infers_iphone_app_icon() {
        let rules = RuleSet::default();
        let properties = ImageProperties::infer("Icon-60@2x.png", true, &rules);

        assert_eq!(properties.canonical_name, "Icon");
        assert_eq!(properties.size_class, SizeClass::IphoneAppIcon);
        assert_eq!(properties.scale, Some(2));
        assert_eq!(properties.prerendered, Some(true));
        assert_eq!(properties.idiom(&rules), "iphone");
        assert_eq!(properties.scale_string(&rules), "2x");
        assert_eq!(properties.size_class.size_string(), Some("60x60"));
    }

    #[test]
    fn infers_watch_variant_with_forced_scale() {
        let rules = RuleSet::default();
        let properties = ImageProperties::infer("dial-42.png", false, &rules);

        assert_eq!(properties.canonical_name, "dial");
        assert_eq!(properties.size_class, SizeClass::Watch42);
        assert_eq!(properties.scale, None);
        assert_eq!(properties.prerendered, None);
        assert_eq!(properties.idiom(&rules), "watch");
        assert_eq!(properties.scale_string(&rules), "2x");
        assert_eq!(properties.size_class.screen_width(), Some(">145"));
    }

    #[test]
    fn watch_scale_overrides_parsed_marker() {
        let rules = RuleSet::default();
        let properties = ImageProperties::infer("dial-38@3x.png", false, &rules);

        assert_eq!(properties.canonical_name, "dial");
        assert_eq!(properties.scale, Some(3));
        assert_eq!(properties.scale_string(&rules), "2x");
    }

    #[test]
    fn unsuffixed_names_are_universal() {
        let rules = RuleSet::default();
        let properties = ImageProperties::infer("Star.png", false, &rules);

        assert_eq!(properties.canonical_name, "Star");
        assert_eq!(properties.size_class, SizeClass::Universal);
        assert_eq!(properties.idiom(&rules), "universal");
        assert_eq!(properties.scale_string(&rules), "1x");
    }

    #[test]
    fn base_configuration_supplies_fallback_scale_and_idiom() {
        let rules = rules(r#"{ "base": { "idiom": "ipad", "scale": "3x" } }"#);
        let properties = ImageProperties::infer("Star.png", false, &rules);

        assert_eq!(properties.idiom(&rules), "ipad");
        assert_eq!(properties.scale_string(&rules), "3x");
    }

    #[test]
    fn unknown_base_idiom_falls_back_to_universal() {
        let rules = rules(r#"{ "base": { "idiom": "desktop" } }"#);
        let properties = ImageProperties::infer("Star.png", false, &rules);

        assert_eq!(properties.idiom(&rules), "universal");
    }

    #[test]
    fn parsed_scale_beats_base_scale() {
        let rules = rules(r#"{ "base": { "scale": "3x" } }"#);
        let properties = ImageProperties::infer("Star@2x.png", false, &rules);

        assert_eq!(properties.scale_string(&rules), "2x");
    }

    #[test]
    fn scale_marker_is_case_insensitive_and_single_digit() {
        let rules = RuleSet::default();

        let upper = ImageProperties::infer("Star@2X.png", false, &rules);
        assert_eq!(upper.canonical_name, "Star");
        assert_eq!(upper.scale, Some(2));

        // Two digits do not form a scale marker.
        let wide = ImageProperties::infer("Star@12x.png", false, &rules);
        assert_eq!(wide.canonical_name, "Star@12x");
        assert_eq!(wide.scale, None);
    }

    #[test]
    fn scale_marker_must_trail_the_name() {
        let rules = RuleSet::default();
        let properties = ImageProperties::infer("Star@2x-flat.png", false, &rules);

        assert_eq!(properties.canonical_name, "Star@2x-flat");
        assert_eq!(properties.scale, None);
    }

    #[test]
    fn scale_is_stripped_before_the_size_suffix() {
        let rules = RuleSet::default();
        let properties = ImageProperties::infer("Settings-29@3x.png", false, &rules);

        assert_eq!(properties.canonical_name, "Settings");
        assert_eq!(properties.size_class, SizeClass::Settings);
        assert_eq!(properties.scale, Some(3));
    }

    #[test]
    fn prerendered_default_honours_configuration() {
        let rules = rules(r#"{ "app-icon": { "pre-rendered": false } }"#);
        let properties = ImageProperties::infer("AppIcon-76.png", true, &rules);

        assert_eq!(properties.prerendered, Some(false));
    }

    #[test]
    fn canonical_name_ignores_directory_context() {
        let rules = RuleSet::default();
        let flat = ImageProperties::infer("Back-38@2x.png", false, &rules);
        let nested = ImageProperties::infer("Back-38@2x.png", false, &rules);

        assert_eq!(flat, nested);
        assert_eq!(flat.canonical_name, "Back");
    }
}
