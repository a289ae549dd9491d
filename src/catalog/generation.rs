//! Depth-first emission of manifests, the copy plan and the result log.
//!
//! The walk is a pure fold: each node computes its own manifest document,
//! image records and copy operations, then merges the results of its child
//! directories. Nothing is shared between recursive branches, so the two
//! consumers of the tree never observe partial state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use same_file::is_same_file;
use serde_json::{Map, Value};

use crate::catalog::builder::AssetCatalog;
use crate::catalog::rules::contents_for;
use crate::catalog::tree::NodeId;
use crate::error::PackError;
use crate::image::{DeviceIdiom, ImageProperties, SizeClass};

/// Name of the manifest document written into every catalog directory.
const MANIFEST_FILE_NAME: &str = "Contents.json";

/// How much detail the generation pass records about individual images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Only count the images included.
    Fast,
    /// Additionally record every emitted image manifest entry.
    Detailed,
}

/// Aggregated outcome of one generation pass over the tree.
#[derive(Debug)]
pub struct CatalogLog {
    log_level: LogLevel,
    /// Total number of image records emitted.
    pub image_count: usize,
    /// Per-image manifest records, populated at the detailed level.
    pub images: Vec<Map<String, Value>>,
    /// Manifest documents keyed by catalog-relative directory path.
    pub manifests: BTreeMap<PathBuf, Map<String, Value>>,
    /// Planned `(source, destination)` copy operations.
    pub copy_plan: Vec<(PathBuf, PathBuf)>,
    /// Generated Swift source, when an output path was configured.
    pub code: Option<String>,
}

impl CatalogLog {
    fn new(log_level: LogLevel) -> Self {
        Self {
            log_level,
            image_count: 0,
            images: Vec::new(),
            manifests: BTreeMap::new(),
            copy_plan: Vec::new(),
            code: None,
        }
    }

    /// Merge a subtree's result into this one.
    fn append(&mut self, other: CatalogLog) {
        self.image_count += other.image_count;
        if self.log_level == LogLevel::Detailed {
            self.images.extend(other.images);
        }
        self.manifests.extend(other.manifests);
        self.copy_plan.extend(other.copy_plan);
    }
}

impl AssetCatalog {
    /// Emit the catalog: one manifest per directory node, copies for every
    /// variant, and the generated Swift file when an output was configured.
    ///
    /// A dry run computes manifests, the copy plan and the image count
    /// identically to a real run but performs no filesystem writes. Failures
    /// partway through a real run abort the remaining traversal and can
    /// leave a partially populated output tree.
    pub fn apply_changes(&self, log_level: LogLevel, dry_run: bool) -> Result<CatalogLog, PackError> {
        if self.overwrite {
            if !dry_run && self.destination.exists() {
                remove_existing(&self.destination)?;
            }
        } else {
            if self.destination.exists() {
                return Err(PackError::precondition(format!(
                    "an asset catalog already exists at: {}",
                    self.destination.display()
                )));
            }

            if let Some(swift_output) = &self.swift_output
                && swift_output.exists()
            {
                return Err(PackError::precondition(format!(
                    "a Swift file already exists at: {}",
                    swift_output.display()
                )));
            }
        }

        let generated_code = match &self.swift_output {
            Some(swift_output) => {
                let code = self.swift_code(self.target)?;
                if !dry_run {
                    fs::write(swift_output, &code).map_err(|err| {
                        PackError::io(
                            format!("failed to write {}", swift_output.display()),
                            err,
                        )
                    })?;
                }
                Some(code)
            }
            None => None,
        };

        let mut log = self.apply_node(self.tree().root(), log_level, dry_run)?;
        log.code = generated_code;
        Ok(log)
    }

    fn apply_node(
        &self,
        id: NodeId,
        log_level: LogLevel,
        dry_run: bool,
    ) -> Result<CatalogLog, PackError> {
        let tree = self.tree();
        let node = tree.node(id);
        let relative_path: PathBuf = tree.path_components(id).iter().collect();

        let mut images: Vec<Map<String, Value>> = Vec::new();
        let mut copies: Vec<(PathBuf, PathBuf)> = Vec::new();
        let mut first_device: Option<&'static str> = None;

        for child_id in tree.children(id) {
            let child = tree.node(*child_id);
            let (Some(source), Some(properties)) = (&child.source_path, &child.properties) else {
                continue;
            };

            if first_device.is_none() {
                first_device = Some(properties.size_class.device_type());
            }

            // Notification, Settings and Spotlight images are kept separate
            // per idiom; without a base idiom both an iPhone and an iPad
            // record are emitted for the same file.
            match properties.size_class {
                SizeClass::Notification | SizeClass::Settings | SizeClass::Spotlight => {
                    match self.base_idiom {
                        Some(idiom) => images.push(self.image_record(
                            &child.name,
                            properties,
                            Some(idiom.idiom_string()),
                        )),
                        None => {
                            for idiom in [DeviceIdiom::Iphone, DeviceIdiom::Ipad] {
                                images.push(self.image_record(
                                    &child.name,
                                    properties,
                                    Some(idiom.idiom_string()),
                                ));
                            }
                        }
                    }
                }
                _ => images.push(self.image_record(&child.name, properties, None)),
            }

            let destination = self.destination.join(&relative_path).join(&child.name);
            copies.push((source.clone(), destination));
        }

        let mut contents = contents_for(&self.rules, &node.name, first_device);
        if !images.is_empty() {
            contents.insert(
                "images".to_string(),
                Value::Array(images.iter().cloned().map(Value::Object).collect()),
            );
        }

        if !dry_run {
            let folder = self.destination.join(&relative_path);
            fs::create_dir_all(&folder).map_err(|err| {
                PackError::io(format!("failed to create {}", folder.display()), err)
            })?;

            write_manifest(&folder, &contents)?;

            for (source, destination) in &copies {
                copy_image(source, destination)?;
            }
        }

        let mut log = CatalogLog::new(log_level);
        log.image_count = images.len();
        if log_level == LogLevel::Detailed {
            log.images = images;
        }
        log.manifests.insert(relative_path, contents);
        log.copy_plan = copies;

        for child_id in tree.children(id) {
            if tree.node(*child_id).is_directory() {
                log.append(self.apply_node(*child_id, log_level, dry_run)?);
            }
        }

        Ok(log)
    }

    /// One manifest record for a single image file.
    fn image_record(
        &self,
        file_name: &str,
        properties: &ImageProperties,
        idiom_override: Option<&str>,
    ) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("filename".to_string(), Value::from(file_name));

        let idiom = idiom_override.unwrap_or_else(|| properties.idiom(&self.rules));
        record.insert("idiom".to_string(), Value::from(idiom));
        record.insert(
            "scale".to_string(),
            Value::from(properties.scale_string(&self.rules)),
        );

        if let Some(size) = properties.size_class.size_string() {
            record.insert("size".to_string(), Value::from(size));
        }

        if let Some(screen_width) = properties.size_class.screen_width() {
            record.insert("screen-width".to_string(), Value::from(screen_width));
        }

        if let Some(prerendered) = properties.prerendered {
            record.insert("pre-rendered".to_string(), Value::from(prerendered));
        }

        record
    }
}

fn write_manifest(folder: &Path, contents: &Map<String, Value>) -> Result<(), PackError> {
    let path = folder.join(MANIFEST_FILE_NAME);
    let json = serde_json::to_vec_pretty(contents).map_err(|err| {
        PackError::io(format!("failed to serialize {}", path.display()), err.into())
    })?;

    fs::write(&path, json)
        .map_err(|err| PackError::io(format!("failed to write {}", path.display()), err))
}

fn copy_image(source: &Path, destination: &Path) -> Result<(), PackError> {
    if destination.exists()
        && is_same_file(source, destination).map_err(|err| {
            PackError::io(
                format!(
                    "failed to compare {} with {}",
                    source.display(),
                    destination.display()
                ),
                err,
            )
        })?
    {
        return Ok(());
    }

    fs::copy(source, destination).map(|_| ()).map_err(|err| {
        PackError::io(
            format!(
                "failed to copy {} to {}",
                source.display(),
                destination.display()
            ),
            err,
        )
    })
}

fn remove_existing(path: &Path) -> Result<(), PackError> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|err| PackError::io(format!("failed to remove existing {}", path.display()), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleSet;
    use crate::swift::SwiftTarget;
    use std::fs;
    use tempfile::tempdir;

    fn rules(json: &str) -> RuleSet {
        serde_json::from_str(json).unwrap()
    }

    fn dry_catalog(rules: RuleSet) -> AssetCatalog {
        AssetCatalog::new(
            PathBuf::from("/out/Assets.xcassets"),
            None,
            SwiftTarget::Ios,
            false,
            rules,
        )
    }

    fn group_manifest<'a>(log: &'a CatalogLog, path: &str) -> &'a Map<String, Value> {
        log.manifests
            .get(Path::new(path))
            .unwrap_or_else(|| panic!("missing manifest for {path}"))
    }

    #[test]
    fn notification_images_duplicate_without_a_base_idiom() {
        let mut catalog = dry_catalog(RuleSet::default());
        catalog.add_image_asset(Path::new("/images/Alert-20@2x.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Detailed, true).unwrap();

        assert_eq!(log.image_count, 2);
        let manifest = group_manifest(&log, "Alert.imageset");
        let images = manifest["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0]["idiom"], "iphone");
        assert_eq!(images[1]["idiom"], "ipad");
        assert_eq!(images[0]["size"], "20x20");
        assert_eq!(images[0]["filename"], "Alert-20@2x.png");
    }

    #[test]
    fn notification_images_use_the_configured_base_idiom() {
        let mut catalog = dry_catalog(rules(r#"{ "base": { "idiom": "ipad" } }"#));
        catalog.add_image_asset(Path::new("/images/Alert-20@2x.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Detailed, true).unwrap();

        assert_eq!(log.image_count, 1);
        let manifest = group_manifest(&log, "Alert.imageset");
        let images = manifest["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0]["idiom"], "ipad");
    }

    #[test]
    fn watch_records_carry_screen_width_and_forced_scale() {
        let mut catalog = dry_catalog(RuleSet::default());
        catalog.add_image_asset(Path::new("/images/dial-38@2x.png"), Path::new("/images"));
        catalog.add_image_asset(Path::new("/images/dial-42@2x.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Detailed, true).unwrap();

        let manifest = group_manifest(&log, "dial.imageset");
        let images = manifest["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0]["screen-width"], "<=145");
        assert_eq!(images[1]["screen-width"], ">145");
        assert_eq!(images[0]["scale"], "2x");
        assert_eq!(images[0]["idiom"], "watch");
    }

    #[test]
    fn app_icon_records_carry_the_prerendered_flag() {
        let mut catalog = dry_catalog(RuleSet::default());
        catalog.add_image_asset(Path::new("/images/AppIcon-60@2x.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Detailed, true).unwrap();

        let manifest = group_manifest(&log, "AppIcon.appiconset");
        let images = manifest["images"].as_array().unwrap();
        assert_eq!(images[0]["pre-rendered"], true);
        assert_eq!(images[0]["idiom"], "iphone");
        assert_eq!(images[0]["size"], "60x60");
        assert_eq!(images[0]["scale"], "2x");
    }

    #[test]
    fn every_directory_gets_a_manifest_and_counts_aggregate() {
        let mut catalog = dry_catalog(RuleSet::default());
        catalog.add_image_asset(Path::new("/images/Icons/A/star.png"), Path::new("/images"));
        catalog.add_image_asset(Path::new("/images/Icons/A/star@2x.png"), Path::new("/images"));
        catalog.add_image_asset(Path::new("/images/moon.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Fast, true).unwrap();

        assert_eq!(log.image_count, 3);
        assert!(log.manifests.contains_key(Path::new("")));
        assert!(log.manifests.contains_key(Path::new("Icons")));
        assert!(log.manifests.contains_key(Path::new("Icons/star.imageset")));
        assert!(log.manifests.contains_key(Path::new("moon.imageset")));

        // The plain directory has no images array of its own.
        assert!(!group_manifest(&log, "Icons").contains_key("images"));
    }

    #[test]
    fn fast_level_skips_per_image_records() {
        let mut catalog = dry_catalog(RuleSet::default());
        catalog.add_image_asset(Path::new("/images/star.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Fast, true).unwrap();

        assert_eq!(log.image_count, 1);
        assert!(log.images.is_empty());
    }

    #[test]
    fn copy_plan_targets_the_group_directory() {
        let mut catalog = dry_catalog(RuleSet::default());
        catalog.add_image_asset(Path::new("/images/B/icon.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Fast, true).unwrap();

        assert_eq!(log.copy_plan.len(), 1);
        let (source, destination) = &log.copy_plan[0];
        assert_eq!(source, Path::new("/images/B/icon.png"));
        assert_eq!(
            destination,
            Path::new("/out/Assets.xcassets/icon.imageset/icon.png")
        );
    }

    #[test]
    fn resolved_properties_reach_the_group_manifest() {
        let mut catalog = dry_catalog(rules(
            r#"{
                "devices": [
                    { "device-type": "watch", "properties": { "template-rendering-intent": "template" } }
                ],
                "custom": [
                    { "patterns": ["dial"], "properties": { "auto-scaling": "auto" } }
                ]
            }"#,
        ));
        catalog.add_image_asset(Path::new("/images/dial-42.png"), Path::new("/images"));

        let log = catalog.apply_changes(LogLevel::Fast, true).unwrap();

        let manifest = group_manifest(&log, "dial.imageset");
        assert_eq!(manifest["properties"]["template-rendering-intent"], "template");
        assert_eq!(manifest["properties"]["auto-scaling"], "auto");
    }

    #[test]
    fn dry_runs_match_real_runs_without_touching_disk() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("images");
        fs::create_dir_all(source.join("Icons")).unwrap();
        fs::write(source.join("Icons/star.png"), "png-bytes").unwrap();
        fs::write(source.join("Icons/star@2x.png"), "png-bytes-2x").unwrap();

        let destination = temp.path().join("Assets.xcassets");
        let build = |overwrite: bool| {
            let mut catalog = AssetCatalog::new(
                destination.clone(),
                None,
                SwiftTarget::Ios,
                overwrite,
                RuleSet::default(),
            );
            catalog.add_image_asset(&source.join("Icons/star.png"), &source);
            catalog.add_image_asset(&source.join("Icons/star@2x.png"), &source);
            catalog
        };

        let dry = build(false).apply_changes(LogLevel::Detailed, true).unwrap();
        assert!(!destination.exists());

        let real = build(false).apply_changes(LogLevel::Detailed, false).unwrap();
        assert_eq!(dry.image_count, real.image_count);
        assert_eq!(dry.manifests, real.manifests);
        assert_eq!(dry.images, real.images);

        assert!(destination.join("Contents.json").is_file());
        assert!(destination.join("star.imageset/Contents.json").is_file());
        assert!(destination.join("star.imageset/star.png").is_file());
        assert!(destination.join("star.imageset/star@2x.png").is_file());

        let written: Value = serde_json::from_str(
            &fs::read_to_string(destination.join("star.imageset/Contents.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written["images"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn existing_destinations_require_the_overwrite_flag() {
        let temp = tempdir().unwrap();
        let destination = temp.path().join("Assets.xcassets");
        fs::create_dir_all(&destination).unwrap();

        let catalog = AssetCatalog::new(
            destination.clone(),
            None,
            SwiftTarget::Ios,
            false,
            RuleSet::default(),
        );
        let error = catalog.apply_changes(LogLevel::Fast, false).unwrap_err();
        assert!(matches!(error, PackError::Io { .. }));
        assert!(error.to_string().contains("already exists"));
    }

    #[test]
    fn overwrite_replaces_an_existing_catalog() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("images");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("star.png"), "png").unwrap();

        let destination = temp.path().join("Assets.xcassets");
        fs::create_dir_all(destination.join("stale.imageset")).unwrap();

        let mut catalog = AssetCatalog::new(
            destination.clone(),
            None,
            SwiftTarget::Ios,
            true,
            RuleSet::default(),
        );
        catalog.add_image_asset(&source.join("star.png"), &source);
        catalog.apply_changes(LogLevel::Fast, false).unwrap();

        assert!(!destination.join("stale.imageset").exists());
        assert!(destination.join("star.imageset/star.png").is_file());
    }

    #[test]
    fn swift_output_is_written_alongside_the_catalog() {
        let temp = tempdir().unwrap();
        let source = temp.path().join("images");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("star.png"), "png").unwrap();

        let destination = temp.path().join("Assets.xcassets");
        let swift_path = temp.path().join("Images.swift");

        let mut catalog = AssetCatalog::new(
            destination,
            Some(swift_path.clone()),
            SwiftTarget::Ios,
            false,
            RuleSet::default(),
        );
        catalog.add_image_asset(&source.join("star.png"), &source);

        let log = catalog.apply_changes(LogLevel::Fast, false).unwrap();

        let written = fs::read_to_string(&swift_path).unwrap();
        assert_eq!(Some(written), log.code);
        assert!(log.code.unwrap().contains("var star: UIImage"));
    }

    #[test]
    fn existing_swift_files_require_the_overwrite_flag() {
        let temp = tempdir().unwrap();
        let swift_path = temp.path().join("Images.swift");
        fs::write(&swift_path, "// stale").unwrap();

        let catalog = AssetCatalog::new(
            temp.path().join("Assets.xcassets"),
            Some(swift_path),
            SwiftTarget::Ios,
            false,
            RuleSet::default(),
        );

        let error = catalog.apply_changes(LogLevel::Fast, true).unwrap_err();
        assert!(error.to_string().contains("Swift file already exists"));
    }
}
