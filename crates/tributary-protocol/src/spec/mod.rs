//! Connector-wide static metadata returned by the `spec` verb.

use serde::{Deserialize, Serialize};

use crate::catalog::DestinationSyncMode;
use crate::schema::{PropType, Properties, PropertySpec};

/// Static description of a connector and its configuration form.
///
/// # Example
///
/// ```
/// use tributary_protocol::{ConnectionSpecification, ConnectorSpecification, PropertySpec, PropType};
///
/// let spec = ConnectorSpecification::new(
///     ConnectionSpecification::new("Example", "An example source")
///         .with_required("api_key", PropertySpec::new(PropType::String).secret()),
/// )
/// .with_documentation_url("https://example.com/docs");
/// assert_eq!(spec.connection_specification.required, ["api_key"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSpecification {
    /// Link to the connector documentation.
    #[serde(
        rename = "documentationUrl",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub documentation_url: String,
    /// Link to the connector changelog.
    #[serde(rename = "changeLogUrl", default)]
    pub changelog_url: String,
    /// Whether the source can sync incrementally.
    #[serde(rename = "supportsIncremental", default)]
    pub supports_incremental: bool,
    /// Whether the destination supports normalisation.
    #[serde(rename = "supportsNormalization", default)]
    pub supports_normalization: bool,
    /// Whether the destination supports dbt transformations.
    #[serde(rename = "supportsDBT", default)]
    pub supports_transformation: bool,
    /// Destination sync modes the connector can honour.
    #[serde(default)]
    pub supported_destination_sync_modes: Vec<DestinationSyncMode>,
    /// Per-instance configuration form.
    #[serde(rename = "connectionSpecification")]
    pub connection_specification: ConnectionSpecification,
}

impl ConnectorSpecification {
    /// Creates a specification around a configuration form.
    #[must_use]
    pub fn new(connection_specification: ConnectionSpecification) -> Self {
        Self {
            connection_specification,
            ..Self::default()
        }
    }

    /// Sets the documentation link.
    #[must_use]
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = url.into();
        self
    }

    /// Sets the changelog link.
    #[must_use]
    pub fn with_changelog_url(mut self, url: impl Into<String>) -> Self {
        self.changelog_url = url.into();
        self
    }

    /// Declares incremental sync support.
    #[must_use]
    pub const fn with_incremental(mut self) -> Self {
        self.supports_incremental = true;
        self
    }

    /// Sets the supported destination sync modes.
    #[must_use]
    pub fn with_destination_sync_modes(
        mut self,
        modes: impl IntoIterator<Item = DestinationSyncMode>,
    ) -> Self {
        self.supported_destination_sync_modes = modes.into_iter().collect();
        self
    }
}

/// Configuration form filled in per connector instance.
///
/// Serialised as a JSON Schema object: the property map is flattened next to
/// `title`, `description`, `type` and `required`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpecification {
    /// Form title.
    #[serde(default)]
    pub title: String,
    /// Form description.
    #[serde(default)]
    pub description: String,
    /// Configurable fields.
    #[serde(flatten)]
    pub properties: Properties,
    /// Schema type of the form; always `object`.
    #[serde(rename = "type", default = "object_type")]
    pub kind: PropType,
    /// Names of fields the operator must fill in.
    #[serde(default)]
    pub required: Vec<String>,
}

impl ConnectionSpecification {
    /// Creates an empty form.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Adds a required field.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        let field = name.into();
        self.required.push(field.clone());
        self.properties.insert(field, spec);
        self
    }

    /// Adds an optional field.
    #[must_use]
    pub fn with_optional(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties.insert(name, spec);
        self
    }
}

impl Default for ConnectionSpecification {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            properties: Properties::new(),
            kind: PropType::Object,
            required: Vec::new(),
        }
    }
}

const fn object_type() -> PropType {
    PropType::Object
}
