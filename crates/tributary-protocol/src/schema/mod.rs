//! JSON-Schema-like property model.
//!
//! [`Properties`] maps field names to [`PropertySpec`] descriptions. The same
//! tree describes a connector's configuration form (inside a
//! [`ConnectionSpecification`](crate::spec::ConnectionSpecification)) and the
//! shape of each discovered [`Stream`](crate::catalog::Stream). The model is a
//! carrier type: it round-trips through JSON without validating that the
//! schema itself is coherent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name to specification map.
///
/// A sorted map keeps names unique and makes serialised output stable. The
/// protocol attaches no meaning to the order.
pub type PropertyMap = BTreeMap<String, PropertySpec>;

/// A set of named properties, serialised as `{"properties": {...}}`.
///
/// # Example
///
/// ```
/// use tributary_protocol::{Properties, PropertySpec, PropType};
///
/// let properties = Properties::new()
///     .with_property("id", PropertySpec::new(PropType::Integer))
///     .with_property("name", PropertySpec::new(PropType::String));
/// assert_eq!(properties.len(), 2);
/// assert!(properties.get("id").is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Properties {
    #[serde(default)]
    properties: PropertyMap,
}

impl Properties {
    /// Creates an empty property set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    /// Adds a property, replacing any previous entry with the same name.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Inserts a property and returns the specification it replaced.
    pub fn insert(&mut self, name: impl Into<String>, spec: PropertySpec) -> Option<PropertySpec> {
        self.properties.insert(name.into(), spec)
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.get(name)
    }

    /// Iterates over properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertySpec)> {
        self.properties
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true when no properties are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the underlying map.
    #[must_use]
    pub const fn as_map(&self) -> &PropertyMap {
        &self.properties
    }
}

impl From<PropertyMap> for Properties {
    fn from(properties: PropertyMap) -> Self {
        Self { properties }
    }
}

impl<K: Into<String>> FromIterator<(K, PropertySpec)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, PropertySpec)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(name, spec)| (name.into(), spec))
                .collect(),
        }
    }
}

/// Primitive JSON Schema type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    /// A JSON string.
    String,
    /// A JSON boolean.
    Boolean,
    /// Any JSON number.
    Number,
    /// A JSON number without a fractional part.
    Integer,
    /// A nested object described by `properties`.
    Object,
    /// A list described by `items`.
    Array,
    /// The JSON `null` value.
    Null,
}

/// Protocol-specific refinement of a primitive type.
///
/// Destinations use it to choose a column type that JSON Schema alone cannot
/// express, such as a timestamp with a zone or an integer wider than 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtendedType {
    /// Timestamp carrying a zone offset.
    TimestampWithTimezone,
    /// Timestamp without a zone offset.
    TimestampWithoutTimezone,
    /// Time of day carrying a zone offset.
    TimeWithTimezone,
    /// Time of day without a zone offset.
    TimeWithoutTimezone,
    /// Integer that fits in 64 bits.
    Integer,
    /// Integer of arbitrary width.
    BigInteger,
    /// Decimal of arbitrary precision.
    BigNumber,
}

/// String format hint for temporal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatType {
    /// A calendar date (`2024-01-31`).
    #[serde(rename = "date")]
    Date,
    /// A date and time (`2024-01-31T12:00:00Z`).
    #[serde(rename = "date-time")]
    DateTime,
    /// A time of day (`12:00:00`).
    #[serde(rename = "time")]
    Time,
}

/// The type triple flattened into every [`PropertySpec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
    /// Primitive type, serialised as `type`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropType>,
    /// Refinement type, serialised as `airbyte_type`.
    #[serde(rename = "airbyte_type", default, skip_serializing_if = "Option::is_none")]
    pub extended: Option<ExtendedType>,
    /// String format hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatType>,
}

/// Description of one property.
///
/// Empty strings, empty collections and a `false` secret flag are omitted
/// from the wire and restored as defaults on the way back in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Longer explanation shown next to the field.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Primitive type, refinement and format.
    #[serde(flatten)]
    pub property_type: PropertyType,
    /// Example values shown to operators.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Item schema for array properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertySpec>>,
    /// Nested properties for object properties.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: PropertyMap,
    /// Marks credentials that must be masked by the orchestrator.
    #[serde(rename = "airbyte_secret", default, skip_serializing_if = "is_false")]
    pub secret: bool,
}

impl PropertySpec {
    /// Creates a specification of the given primitive type.
    #[must_use]
    pub fn new(kind: PropType) -> Self {
        Self {
            property_type: PropertyType {
                kind: Some(kind),
                ..PropertyType::default()
            },
            ..Self::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the refinement type.
    #[must_use]
    pub const fn with_extended_type(mut self, extended: ExtendedType) -> Self {
        self.property_type.extended = Some(extended);
        self
    }

    /// Sets the string format.
    #[must_use]
    pub const fn with_format(mut self, format: FormatType) -> Self {
        self.property_type.format = Some(format);
        self
    }

    /// Appends an example value.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Sets the array item schema.
    #[must_use]
    pub fn with_items(mut self, items: Self) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Adds a nested property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, spec: Self) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }

    /// Marks the property as a secret.
    #[must_use]
    pub const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Returns the primitive type, if declared.
    #[must_use]
    pub const fn kind(&self) -> Option<PropType> {
        self.property_type.kind
    }
}

// serde hands `skip_serializing_if` predicates a reference.
const fn is_false(value: &bool) -> bool {
    !*value
}
