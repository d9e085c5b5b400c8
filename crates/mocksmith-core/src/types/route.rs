//! Core route types.

use crate::types::preset::Preset;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Transport a route is served over
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transport {
    Http,
    WebSocket,
}

impl Transport {
    /// Controller operation that activates routes of this transport.
    pub(crate) fn activation_op(self) -> &'static str {
        match self {
            Transport::Http => "use_routes",
            Transport::WebSocket => "use_socket",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Http => f.write_str("HTTP"),
            Transport::WebSocket => f.write_str("WEBSOCKET"),
        }
    }
}

/// HTTP method for HTTP routes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

/// Transport binding of a route.
///
/// HTTP routes always carry a method and WebSocket routes never do. The
/// definition files keep the flat `transport`/`method` pair; the pairing
/// rule is enforced while deserializing, so a constructed [`Route`] cannot
/// be in a half-configured state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    Http { method: HttpMethod },
    WebSocket,
}

/// Mock route definition
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Unique identifier for this route
    pub id: String,
    /// URL pattern (supports {param} placeholders)
    pub url: String,
    /// Transport binding
    pub kind: RouteKind,
    /// Request matching presets
    pub presets: Vec<Preset>,
}

impl Route {
    /// Transport this route is served over.
    pub fn transport(&self) -> Transport {
        match self.kind {
            RouteKind::Http { .. } => Transport::Http,
            RouteKind::WebSocket => Transport::WebSocket,
        }
    }

    /// HTTP method, `None` for WebSocket routes.
    pub fn method(&self) -> Option<HttpMethod> {
        match self.kind {
            RouteKind::Http { method } => Some(method),
            RouteKind::WebSocket => None,
        }
    }
}

#[derive(Deserialize)]
struct RawRoute {
    id: String,
    url: String,
    transport: Transport,
    method: Option<HttpMethod>,
    presets: Vec<Preset>,
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawRoute::deserialize(deserializer)?;
        let kind = match (raw.transport, raw.method) {
            (Transport::Http, Some(method)) => RouteKind::Http { method },
            (Transport::Http, None) => {
                return Err(serde::de::Error::custom(format!(
                    "route '{}': HTTP routes require a method",
                    raw.id
                )));
            }
            (Transport::WebSocket, None) => RouteKind::WebSocket,
            (Transport::WebSocket, Some(_)) => {
                return Err(serde::de::Error::custom(format!(
                    "route '{}': WebSocket routes do not take a method",
                    raw.id
                )));
            }
        };
        Ok(Route {
            id: raw.id,
            url: raw.url,
            kind,
            presets: raw.presets,
        })
    }
}

#[derive(Serialize)]
struct RawRouteView<'a> {
    id: &'a str,
    url: &'a str,
    transport: Transport,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<HttpMethod>,
    presets: &'a [Preset],
}

impl Serialize for Route {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawRouteView {
            id: &self.id,
            url: &self.url,
            transport: self.transport(),
            method: self.method(),
            presets: &self.presets,
        }
        .serialize(serializer)
    }
}

/// Pointer to a preset/variant pair, the value side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRef {
    pub preset_id: String,
    pub variant_id: String,
}

/// Parsed route reference in format `route_id:preset_id:variant_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteReference {
    pub route_id: String,
    pub preset_id: String,
    pub variant_id: String,
}

impl RouteReference {
    /// Parse a reference string.
    ///
    /// Exactly three non-empty colon-separated segments; anything else is
    /// `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(':');
        let route_id = parts.next()?;
        let preset_id = parts.next()?;
        let variant_id = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        if route_id.is_empty() || preset_id.is_empty() || variant_id.is_empty() {
            return None;
        }

        Some(Self {
            route_id: route_id.to_owned(),
            preset_id: preset_id.to_owned(),
            variant_id: variant_id.to_owned(),
        })
    }

    /// Split into the assignment key (route id) and value (variant pointer).
    pub fn into_assignment(self) -> (String, VariantRef) {
        (
            self.route_id,
            VariantRef {
                preset_id: self.preset_id,
                variant_id: self.variant_id,
            },
        )
    }
}
