//! Incremental construction of the grouping tree from discovered files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::catalog::tree::{CatalogTree, GroupKind};
use crate::config::RuleSet;
use crate::error::PackError;
use crate::image::{DeviceIdiom, ImageProperties};
use crate::pattern::Matches;
use crate::swift::SwiftTarget;

/// Extension of the generated catalog package.
const CATALOG_EXTENSION: &str = "xcassets";

/// Extension of generated image set groups.
const IMAGE_SET_EXTENSION: &str = "imageset";

/// Extension of generated app icon groups.
const APP_ICON_EXTENSION: &str = "appiconset";

/// Builder and owner of the grouping tree for one catalog run.
///
/// The tree is built by a single sequential pass over the discovered files
/// and then consumed by two independent read-only passes: manifest/copy
/// generation and Swift accessor generation.
#[derive(Debug)]
pub struct AssetCatalog {
    pub(super) destination: PathBuf,
    pub(super) swift_output: Option<PathBuf>,
    pub(super) target: SwiftTarget,
    pub(super) overwrite: bool,
    pub(super) rules: RuleSet,
    pub(super) base_idiom: Option<DeviceIdiom>,
    tree: CatalogTree,
}

impl AssetCatalog {
    /// Create an empty catalog rooted at the destination package.
    pub fn new(
        destination: PathBuf,
        swift_output: Option<PathBuf>,
        target: SwiftTarget,
        overwrite: bool,
        rules: RuleSet,
    ) -> Self {
        let root_name = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("Assets.{CATALOG_EXTENSION}"));
        let base_idiom = rules.base_idiom();

        Self {
            destination,
            swift_output,
            target,
            overwrite,
            rules,
            base_idiom,
            tree: CatalogTree::new(&root_name),
        }
    }

    /// Enumerate images under a source directory and build the full tree.
    ///
    /// Files are limited to the configured image extensions, existing
    /// `.xcassets` packages are not searched, and an output directory without
    /// the catalog extension receives a generated `Assets.xcassets` child.
    pub fn from_directory(
        source_directory: &Path,
        destination: &Path,
        swift_output: Option<&Path>,
        target: SwiftTarget,
        overwrite: bool,
        rules: RuleSet,
    ) -> Result<Self, PackError> {
        if !source_directory.is_dir() {
            return Err(PackError::precondition(format!(
                "can't enumerate images under {}",
                source_directory.display()
            )));
        }

        let destination = resolve_catalog_destination(destination);
        let swift_output = swift_output.map(resolve_swift_destination);
        let mut catalog = Self::new(destination, swift_output, target, overwrite, rules);

        let extensions = catalog.rules.image_extensions();
        let walker = WalkDir::new(source_directory)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_existing_catalog(entry.path()));

        for entry in walker {
            let Ok(entry) = entry else { continue };
            if !entry.file_type().is_file() {
                continue;
            }

            let extension = entry
                .path()
                .extension()
                .map(|extension| extension.to_string_lossy().to_lowercase());
            if extension
                .as_deref()
                .is_some_and(|extension| extensions.iter().any(|valid| valid == extension))
            {
                catalog.add_image_asset(entry.path(), source_directory);
            }
        }

        Ok(catalog)
    }

    /// Insert one image file into the grouping tree.
    ///
    /// The file's containing folder is replaced by a generated group named
    /// after the canonical image name, so all scale and device variants of
    /// one image land in the same `.imageset` group. Folders above the
    /// containing folder are preserved as plain directories.
    pub fn add_image_asset(&mut self, source: &Path, base_directory: &Path) {
        let Some(file_name) = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
        else {
            return;
        };

        if let Some(include) = self.rules.include_patterns()
            && !include.matches(&file_name)
        {
            return;
        }

        if let Some(skip) = self.rules.skip_patterns()
            && skip.matches(&file_name)
        {
            return;
        }

        let is_app_icon = self.rules.app_icon_pattern().matches(&file_name);
        let properties = ImageProperties::infer(&file_name, is_app_icon, &self.rules);

        let group_extension = if is_app_icon {
            APP_ICON_EXTENSION
        } else {
            IMAGE_SET_EXTENSION
        };
        let group_name = format!("{}.{}", properties.canonical_name, group_extension);

        let relative = source.strip_prefix(base_directory).unwrap_or(source);
        let mut folders: Vec<String> = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        // The containing folder gives way to the generated group.
        folders.pop();

        let mut current = self.tree.root();
        for folder in &folders {
            current = self.tree.child_named(current, folder);
        }

        let group = self.tree.child_named(current, &group_name);
        self.tree.node_mut(group).kind = if is_app_icon {
            GroupKind::AppIcon
        } else {
            GroupKind::ImageSet
        };

        let leaf = self.tree.child_named(group, &file_name);
        let leaf_node = self.tree.node_mut(leaf);
        leaf_node.properties = Some(properties);
        leaf_node.source_path = Some(source.to_path_buf());
    }

    /// The grouping tree built so far.
    pub fn tree(&self) -> &CatalogTree {
        &self.tree
    }

    /// Resolved destination of the catalog package.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Generate Swift accessors for every image set in the tree.
    pub fn swift_code(&self, target: SwiftTarget) -> Result<String, PackError> {
        crate::swift::generate_swift_code(&self.tree, target)
    }
}

fn is_existing_catalog(path: &Path) -> bool {
    path.is_dir()
        && path
            .extension()
            .is_some_and(|extension| extension == CATALOG_EXTENSION)
}

/// An existing destination directory that is not itself a catalog package
/// receives a generated `Assets.xcassets` child.
fn resolve_catalog_destination(destination: &Path) -> PathBuf {
    let extension = destination.extension().map(|e| e.to_string_lossy());
    if destination.is_dir() && extension.as_deref() != Some(CATALOG_EXTENSION) {
        destination.join(format!("Assets.{CATALOG_EXTENSION}"))
    } else {
        destination.to_path_buf()
    }
}

/// An existing Swift output directory receives a generated `Images.swift`
/// child.
fn resolve_swift_destination(destination: &Path) -> PathBuf {
    let extension = destination.extension().map(|e| e.to_string_lossy());
    if destination.is_dir() && extension.as_deref() != Some("swift") {
        destination.join("Images.swift")
    } else {
        destination.to_path_buf()
    }
}
