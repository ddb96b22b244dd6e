#![deny(missing_docs)]

//! # Attribute IR
//!
//! Definition of the Intermediate Representation (IR) handed to provider code
//! generators: entities (resources and data sources) carrying ordered
//! attribute trees.
//!
//! - **merge**: structural, order-preserving merge of attribute lists.

pub mod merge;

use serde::{Deserialize, Serialize};

pub use merge::merge_attributes;

/// How an attribute participates in plan/apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Computability {
    /// Must be set by the practitioner.
    Required,
    /// May be set by the practitioner, never set by the provider.
    Optional,
    /// Only ever set by the provider.
    Computed,
    /// May be set by the practitioner, filled by the provider otherwise.
    ComputedOptional,
}

/// A single named attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name, unique within its sibling list.
    pub name: String,
    /// Shape of the attribute's value.
    #[serde(flatten)]
    pub kind: AttributeKind,
    /// Required / Optional / Computed / ComputedOptional.
    pub computability: Computability,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the value must be hidden from plan output.
    #[serde(default)]
    pub sensitive: bool,
}

impl Attribute {
    /// Creates an attribute with no description that is not sensitive.
    pub fn new(name: impl Into<String>, kind: AttributeKind, computability: Computability) -> Self {
        Self {
            name: name.into(),
            kind,
            computability,
            description: None,
            sensitive: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Child attributes of `SingleNested` and `ListNested` attributes.
    pub fn nested_attributes(&self) -> Option<&[Attribute]> {
        match &self.kind {
            AttributeKind::SingleNested { attributes }
            | AttributeKind::ListNested { attributes } => Some(attributes),
            _ => None,
        }
    }

    pub(crate) fn nested_attributes_mut(&mut self) -> Option<&mut Vec<Attribute>> {
        match &mut self.kind {
            AttributeKind::SingleNested { attributes }
            | AttributeKind::ListNested { attributes } => Some(attributes),
            _ => None,
        }
    }
}

/// The closed set of attribute shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// An array of primitives (or nested arrays).
    List {
        /// Shape of each element.
        element_type: ElementType,
    },
    /// An array of objects.
    ListNested {
        /// Attributes of each element object, sorted by name.
        attributes: Vec<Attribute>,
    },
    /// An object.
    SingleNested {
        /// Attributes of the object, sorted by name.
        attributes: Vec<Attribute>,
    },
}

/// Shape of the elements of a `List` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementType {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// A nested list.
    List {
        /// Shape of the inner elements.
        element_type: Box<ElementType>,
    },
    /// An object without computability metadata.
    Object {
        /// Object fields, sorted by name.
        attribute_types: Vec<ObjectAttributeType>,
    },
}

/// A named field inside an `ElementType::Object`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttributeType {
    /// Field name.
    pub name: String,
    /// Field shape.
    pub element_type: ElementType,
}

/// Distinguishes resources from data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A managed resource (create/read).
    Resource,
    /// A read-only data source.
    DataSource,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Resource => write!(f, "resource"),
            EntityKind::DataSource => write!(f, "data source"),
        }
    }
}

/// A named resource or data source with its attribute tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name, unique within its collection.
    pub name: String,
    /// Resource or data source.
    pub kind: EntityKind,
    /// Top-level attributes.
    pub attributes: Vec<Attribute>,
}

/// Everything produced by one generation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderIr {
    /// Provider name from the generator config.
    pub provider: String,
    /// Resources in lexicographic name order.
    pub resources: Vec<Entity>,
    /// Data sources in lexicographic name order.
    pub data_sources: Vec<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_serializes_with_type_tag() {
        let attr = Attribute::new(
            "tags",
            AttributeKind::List {
                element_type: ElementType::String,
            },
            Computability::ComputedOptional,
        )
        .with_description(Some("Tags".into()));

        let value = serde_json::to_value(&attr).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "tags",
                "type": "list",
                "element_type": { "type": "string" },
                "computability": "computed_optional",
                "description": "Tags",
                "sensitive": false
            })
        );
    }

    #[test]
    fn test_nested_attributes_accessor() {
        let child = Attribute::new("id", AttributeKind::Integer, Computability::Required);
        let parent = Attribute::new(
            "owner",
            AttributeKind::SingleNested {
                attributes: vec![child.clone()],
            },
            Computability::Computed,
        );

        assert_eq!(parent.nested_attributes(), Some(&[child][..]));
        assert!(Attribute::new("x", AttributeKind::Boolean, Computability::Optional)
            .nested_attributes()
            .is_none());
    }
}
