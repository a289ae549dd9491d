//! Emission of Swift accessor declarations from the grouping tree.

use chrono::Local;

use crate::catalog::{CatalogTree, GroupKind, NodeId};
use crate::error::PackError;
use crate::swift::naming::{camel_case, natural_cmp, property_name};
use crate::swift::target::SwiftTarget;

/// Generate the Swift accessor file for every image set in the tree.
///
/// App icon groups never receive accessors, and nested container structs are
/// only emitted for directories with at least one image set somewhere below
/// them. Two sibling image sets deriving the same property name fail the
/// whole generation rather than producing code that would not compile.
pub fn generate_swift_code(tree: &CatalogTree, target: SwiftTarget) -> Result<String, PackError> {
    let root = generate_node(tree, tree.root(), target, 0)?;
    Ok(format!("{}{}", header(target), root.code))
}

struct GeneratedGroup {
    code: String,
    property_names: Vec<String>,
}

fn generate_node(
    tree: &CatalogTree,
    id: NodeId,
    target: SwiftTarget,
    depth: usize,
) -> Result<GeneratedGroup, PackError> {
    let indent = "    ".repeat(depth);
    let first_indent = "    ".repeat(depth + 1);
    let second_indent = "    ".repeat(depth + 2);

    let node = tree.node(id);
    let image_class = target.image_class_name();

    let (struct_name, group_property) = if depth == 0 {
        ("ImageAssetCatalog".to_string(), None)
    } else {
        (
            format!("ImageAssetCatalog{}", node.name),
            Some(camel_case(&node.name)),
        )
    };

    let mut code = String::new();
    let mut property_names: Vec<String> = Vec::new();

    if let Some(group_property) = &group_property {
        code.push_str(&format!("{indent}var {group_property} = {struct_name}()\n"));
    }

    code.push_str(&format!("{indent}struct {struct_name} {{\n"));

    if depth == 0 {
        code.push_str(&format!(
            "{first_indent}private func image(named name: String) -> {image_class} {{\n\
             {second_indent}// Force unwrapping here as it seems reasonable to assume the image exists\n\
             {second_indent}// since the asset catalog was generated in tandem with this code\n\
             {second_indent}return {image_class}(named: name)!\n\
             {first_indent}}}\n\n"
        ));
    }

    // Sort with numeric awareness so numbered image sets appear in a logical
    // order.
    let group_context = group_property.as_deref();
    let mut image_sets: Vec<(String, &str)> = tree
        .children(id)
        .iter()
        .map(|child_id| tree.node(*child_id))
        .filter(|child| child.is_directory() && child.kind == GroupKind::ImageSet)
        .map(|child| {
            (
                property_name(catalog_name(&child.name), group_context),
                child.name.as_str(),
            )
        })
        .collect();
    image_sets.sort_by(|(left, _), (right, _)| natural_cmp(left, right));

    for (property, source_name) in image_sets {
        if property_names.contains(&property) {
            return Err(PackError::DuplicateIdentifier {
                name: property,
                source_name: source_name.to_string(),
            });
        }

        code.push_str(&format!(
            "{first_indent}var {property}: {image_class} {{ return image(named: \"{}\") }}\n",
            catalog_name(source_name)
        ));
        property_names.push(property);
    }

    for child_id in tree.children(id) {
        let child = tree.node(*child_id);
        if !child.is_directory() || child.kind != GroupKind::Directory {
            continue;
        }
        if !contains_image_sets(tree, *child_id) {
            continue;
        }

        let nested = generate_node(tree, *child_id, target, depth + 1)?;
        code.push_str(&nested.code);
        property_names.extend(nested.property_names);
    }

    code.push_str(&format!("{indent}}}\n\n"));

    Ok(GeneratedGroup {
        code,
        property_names,
    })
}

fn contains_image_sets(tree: &CatalogTree, id: NodeId) -> bool {
    tree.children(id).iter().any(|child_id| {
        let child = tree.node(*child_id);
        if !child.is_directory() {
            return false;
        }

        match child.kind {
            GroupKind::ImageSet => true,
            GroupKind::Directory => contains_image_sets(tree, *child_id),
            GroupKind::AppIcon => false,
        }
    })
}

/// Catalog lookup name: the group name with its extension removed.
fn catalog_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

fn header(target: SwiftTarget) -> String {
    let date = Local::now().format("%Y-%m-%d");

    format!(
        "//  *********************************************************\n\
         //  *********************************************************\n\
         //  ***\n\
         //  ***  DO NOT EDIT\n\
         //  ***  This file is machine-generated by asset_catalog_packer\n\
         //  ***  and is intended to be overwritten regularly\n\
         //  ***\n\
         //  ***  Last updated: {date}\n\
         //  ***\n\
         //  *********************************************************\n\
         //  *********************************************************\n\n\
         import {library}\n\n\
         extension {image_class} {{\n\
         \x20   static let assets = ImageAssetCatalog()\n\
         \x20   static let r = ImageAssetCatalog()\n\
         }}\n\n",
        library = target.library_name(),
        image_class = target.image_class_name(),
    )
}
