//! # Attribute Merging
//!
//! Combines attribute lists produced from independent sources (parameters,
//! request bodies, response bodies) into one list.
//!
//! The first list takes priority: its entries are never reordered, removed or
//! replaced. Entries from later lists are appended when their name is new, and
//! deep-merged when both sides are nested shapes of the same kind.

use crate::ir::{Attribute, AttributeKind, ElementType, ObjectAttributeType};

/// Merges `others`, in order, into a copy of `main`.
///
/// - A name not yet present is appended, in first-seen order.
/// - `SingleNested` + `SingleNested` and `ListNested` + `ListNested` merge their
///   children recursively.
/// - `List` + `List` merge their element types.
/// - Any other pairing keeps the existing entry untouched.
pub fn merge_attributes<'b, I>(main: &[Attribute], others: I) -> Vec<Attribute>
where
    I: IntoIterator<Item = &'b [Attribute]>,
{
    let mut merged = main.to_vec();
    for other in others {
        for attribute in other {
            merge_one(&mut merged, attribute);
        }
    }
    merged
}

fn merge_one(merged: &mut Vec<Attribute>, incoming: &Attribute) {
    let Some(index) = merged.iter().position(|a| a.name == incoming.name) else {
        merged.push(incoming.clone());
        return;
    };
    let existing = &mut merged[index];

    match (&mut existing.kind, &incoming.kind) {
        (
            AttributeKind::SingleNested { attributes },
            AttributeKind::SingleNested { attributes: theirs },
        )
        | (
            AttributeKind::ListNested { attributes },
            AttributeKind::ListNested { attributes: theirs },
        ) => {
            let combined = merge_attributes(attributes.as_slice(), [theirs.as_slice()]);
            *attributes = combined;
        }
        (
            AttributeKind::List { element_type },
            AttributeKind::List {
                element_type: theirs,
            },
        ) => {
            let combined = merge_element_type(element_type, theirs);
            *element_type = combined;
        }
        // Mismatched or primitive shapes: first writer wins.
        _ => {}
    }
}

/// Merges two element types; `main` wins unless both sides are nested.
///
/// Two primitive element types of different kinds are not reported; `main`
/// is kept as is.
pub fn merge_element_type(main: &ElementType, other: &ElementType) -> ElementType {
    match (main, other) {
        (
            ElementType::Object { attribute_types },
            ElementType::Object {
                attribute_types: theirs,
            },
        ) => ElementType::Object {
            attribute_types: merge_object_attribute_types(attribute_types, theirs),
        },
        (ElementType::List { element_type }, ElementType::List { element_type: theirs }) => {
            ElementType::List {
                element_type: Box::new(merge_element_type(element_type, theirs)),
            }
        }
        _ => main.clone(),
    }
}

fn merge_object_attribute_types(
    main: &[ObjectAttributeType],
    other: &[ObjectAttributeType],
) -> Vec<ObjectAttributeType> {
    let mut merged = main.to_vec();
    for incoming in other {
        match merged.iter_mut().find(|a| a.name == incoming.name) {
            Some(existing) => {
                existing.element_type =
                    merge_element_type(&existing.element_type, &incoming.element_type);
            }
            None => merged.push(incoming.clone()),
        }
    }
    merged
}
