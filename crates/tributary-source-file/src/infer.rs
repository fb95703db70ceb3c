//! Schema inference from sample JSON values.

use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tributary_protocol::{ExtendedType, FormatType, Properties, PropertySpec, PropType};

/// Describes every key of `sample` by the kind of its value.
///
/// Nested objects are described recursively. Strings holding an RFC 3339
/// timestamp or a calendar date carry the matching format hint. Arrays take their item schema
/// from their first element; an empty array has no item schema.
#[must_use]
pub fn infer_properties(sample: &Map<String, Value>) -> Properties {
    sample
        .iter()
        .map(|(name, value)| (name.as_str(), infer_value(value)))
        .collect()
}

/// Describes a single JSON value.
#[must_use]
pub fn infer_value(value: &Value) -> PropertySpec {
    match value {
        Value::Null => PropertySpec::new(PropType::Null),
        Value::Bool(_) => PropertySpec::new(PropType::Boolean),
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            PropertySpec::new(PropType::Integer)
        }
        Value::Number(_) => PropertySpec::new(PropType::Number),
        Value::String(text) => infer_string(text),
        Value::Array(items) => {
            let spec = PropertySpec::new(PropType::Array);
            match items.first() {
                Some(first) => spec.with_items(infer_value(first)),
                None => spec,
            }
        }
        Value::Object(fields) => fields
            .iter()
            .fold(PropertySpec::new(PropType::Object), |spec, (name, field)| {
                spec.with_property(name.as_str(), infer_value(field))
            }),
    }
}

fn infer_string(text: &str) -> PropertySpec {
    let spec = PropertySpec::new(PropType::String);
    if OffsetDateTime::parse(text, &Rfc3339).is_ok() {
        spec.with_format(FormatType::DateTime)
            .with_extended_type(ExtendedType::TimestampWithTimezone)
    } else if Date::parse(text, format_description!("[year]-[month]-[day]")).is_ok() {
        spec.with_format(FormatType::Date)
    } else {
        spec
    }
}
