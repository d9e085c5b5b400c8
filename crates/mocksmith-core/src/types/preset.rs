//! Request matching preset types.

use crate::expression::{expression_body, wrap_expression};
use crate::types::variant::Variant;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Name/value matching condition - either a map or an expression string.
///
/// Expressions are written in the definition files as `"${...}"`; the body
/// is stored without its markers and re-wrapped on serialization, so a
/// definition round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapOrExpression {
    Map(HashMap<String, String>),
    Expression(String),
}

impl Serialize for MapOrExpression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MapOrExpression::Map(map) => map.serialize(serializer),
            MapOrExpression::Expression(expr) => wrap_expression(expr).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MapOrExpression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => match expression_body(&s) {
                Some(expr) => Ok(MapOrExpression::Expression(expr.to_string())),
                None => Err(serde::de::Error::custom(
                    "condition must be either an object or a ${...} expression string",
                )),
            },
            Value::Object(map) => {
                let mut result = HashMap::with_capacity(map.len());
                for (k, v) in map {
                    // Scalar values are kept as their textual form; nested
                    // structures have no meaning in a name/value condition.
                    let v = match v {
                        Value::String(s) => s,
                        Value::Number(n) => n.to_string(),
                        Value::Bool(b) => b.to_string(),
                        _ => {
                            return Err(serde::de::Error::custom(format!(
                                "condition value for '{k}' must be a scalar"
                            )));
                        }
                    };
                    result.insert(k, v);
                }
                Ok(MapOrExpression::Map(result))
            }
            _ => Err(serde::de::Error::custom(
                "condition must be either an object or a ${...} expression string",
            )),
        }
    }
}

/// Payload matching condition - either a JSON value or an expression string.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueOrExpression {
    Value(Value),
    Expression(String),
}

impl Serialize for ValueOrExpression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ValueOrExpression::Value(v) => v.serialize(serializer),
            ValueOrExpression::Expression(expr) => wrap_expression(expr).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ValueOrExpression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(s) => match expression_body(&s) {
                Some(expr) => Ok(ValueOrExpression::Expression(expr.to_string())),
                None => Ok(ValueOrExpression::Value(Value::String(s))),
            },
            other => Ok(ValueOrExpression::Value(other)),
        }
    }
}

/// Request matching preset with response variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Unique identifier for this preset within the route
    pub id: String,
    /// URL path parameters to match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<MapOrExpression>,
    /// Query parameters to match (map or expression like "${query.page == '1'}")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<MapOrExpression>,
    /// Request headers to match (map or expression like "${headers.myheader == 1}")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<MapOrExpression>,
    /// Request body to match (any JSON value or expression like "${payload.items[0].id == 5}")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ValueOrExpression>,
    /// Response variants
    pub variants: Vec<Variant>,
}
