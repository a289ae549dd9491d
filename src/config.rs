//! Rule set configuration controlling filtering, grouping and manifest
//! properties.
//!
//! The rule set is a nested JSON document. Structural keys are deserialized
//! into typed fields; the property blocks attached to `info`, `base`,
//! `devices` and `custom` stay opaque [`Map`]s that are merged into manifests
//! verbatim.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PackError;
use crate::image::DeviceIdiom;
use crate::pattern::{Pattern, PatternSet};

/// Pattern identifying app icon variants, used when no `app-icon` rule is
/// configured.
const DEFAULT_APP_ICON_PATTERN: &str = "AppIcon";

/// Layered configuration document consumed by the variant inferencer, the
/// tree builder and the rule resolver.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RuleSet {
    /// App icon detection pattern and pre-rendered default.
    pub app_icon: Option<AppIconRule>,
    /// When configured, a filename must match one of these patterns to enter
    /// the catalog.
    pub include_images: Option<PatternRule>,
    /// A filename matching any of these patterns is excluded from the catalog.
    pub skip_images: Option<PatternRule>,
    /// Verbatim manifest header block replacing the generated default.
    pub info: Option<Map<String, Value>>,
    /// Unconditional default properties; may carry an `idiom` and `scale`.
    pub base: Option<Map<String, Value>>,
    /// Device-conditional property rules, applied in declaration order.
    pub devices: Vec<DeviceRule>,
    /// Name-conditional property rules, applied in declaration order.
    pub custom: Vec<CustomRule>,
    /// File extensions treated as images while scanning; defaults to `png`.
    pub valid_image_extensions: Vec<String>,
}

/// App icon detection rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppIconRule {
    /// Pattern identifying app icon variants by filename.
    pub pattern: Option<String>,
    /// Default for the `pre-rendered` manifest flag.
    pub pre_rendered: Option<bool>,
}

/// Pattern list gating which files enter the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PatternRule {
    /// The configured patterns; gating only applies when present.
    pub patterns: Option<Vec<String>>,
}

/// Properties applied to groups whose first variant matches a device
/// classifier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceRule {
    /// Device classifier this rule applies to (`watch`, `iPhone`, `iPad`).
    pub device_type: Option<String>,
    /// Properties merged into matching manifests.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Properties applied to groups whose name matches one of the patterns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CustomRule {
    /// Patterns tested against the group node's own name.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Properties merged into matching manifests.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl RuleSet {
    /// Read a rule set from a JSON configuration file.
    ///
    /// An unreadable file is an I/O failure; a file that reads but does not
    /// parse is an invalid-configuration failure. Both surface before any
    /// tree processing begins.
    pub fn load_from_path(path: &Path) -> Result<Self, PackError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            PackError::io(
                format!("failed to read configuration {}", path.display()),
                err,
            )
        })?;

        serde_json::from_str(&contents).map_err(|err| PackError::InvalidConfiguration {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// The configured base idiom, when it names a known device classifier.
    pub fn base_idiom(&self) -> Option<DeviceIdiom> {
        self.base_value("idiom")
            .and_then(Value::as_str)
            .and_then(DeviceIdiom::parse)
    }

    /// The configured base scale string, e.g. `"2x"`.
    pub fn base_scale(&self) -> Option<&str> {
        self.base_value("scale").and_then(Value::as_str)
    }

    /// Include filter, present only when `include-images.patterns` is
    /// configured.
    pub fn include_patterns(&self) -> Option<PatternSet> {
        self.include_images
            .as_ref()
            .and_then(|rule| rule.patterns.as_deref())
            .map(PatternSet::new)
    }

    /// Skip filter, present only when `skip-images.patterns` is configured.
    pub fn skip_patterns(&self) -> Option<PatternSet> {
        self.skip_images
            .as_ref()
            .and_then(|rule| rule.patterns.as_deref())
            .map(PatternSet::new)
    }

    /// Pattern deciding whether a filename belongs to an app icon group.
    pub fn app_icon_pattern(&self) -> Pattern {
        let pattern = self
            .app_icon
            .as_ref()
            .and_then(|rule| rule.pattern.as_deref())
            .unwrap_or(DEFAULT_APP_ICON_PATTERN);

        Pattern::new(pattern)
    }

    /// Default for the `pre-rendered` flag of app icon variants.
    pub fn prerendered_default(&self) -> bool {
        self.app_icon
            .as_ref()
            .and_then(|rule| rule.pre_rendered)
            .unwrap_or(true)
    }

    /// Lower-cased extensions treated as images during the source walk.
    pub fn image_extensions(&self) -> Vec<String> {
        if self.valid_image_extensions.is_empty() {
            vec!["png".to_string()]
        } else {
            self.valid_image_extensions
                .iter()
                .map(|extension| extension.to_lowercase())
                .collect()
        }
    }

    fn base_value(&self, key: &str) -> Option<&Value> {
        self.base.as_ref().and_then(|base| base.get(key))
    }
}
