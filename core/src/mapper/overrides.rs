//! # Attribute Overrides
//!
//! Applies config-driven description and sensitivity overrides to a finished
//! attribute tree. Keys are dotted paths through nested attributes, so
//! `owner.name` targets the `name` child of the `owner` attribute.

use crate::config::AttributeOverride;
use crate::ir::Attribute;
use std::collections::BTreeMap;
use tracing::warn;

/// Applies every override in `overrides` to `attributes`.
///
/// Paths that match no attribute are logged and ignored.
pub fn apply_overrides(
    attributes: &mut [Attribute],
    overrides: &BTreeMap<String, AttributeOverride>,
    entity: &str,
) {
    for (path, attribute_override) in overrides {
        let segments: Vec<&str> = path.split('.').collect();
        match find_attribute_mut(attributes, &segments) {
            Some(attribute) => {
                if let Some(description) = &attribute_override.description {
                    attribute.description = Some(description.clone());
                }
                if let Some(sensitive) = attribute_override.sensitive {
                    attribute.sensitive = sensitive;
                }
            }
            None => warn!(entity, path = %path, "override does not match any attribute"),
        }
    }
}

fn find_attribute_mut<'x>(
    attributes: &'x mut [Attribute],
    path: &[&str],
) -> Option<&'x mut Attribute> {
    let (first, rest) = path.split_first()?;
    let attribute = attributes.iter_mut().find(|a| a.name == *first)?;
    if rest.is_empty() {
        return Some(attribute);
    }
    find_attribute_mut(attribute.nested_attributes_mut()?, rest)
}
