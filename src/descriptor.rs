//! Thing description parsing and property endpoint resolution.
//!
//! The gateway hands over a thing description with per-property relative
//! hrefs. Endpoints are resolved exactly once at construction: the thing
//! href joins against the gateway base, each property href joins against
//! the thing URL. After that the URLs are immutable.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use url::Url;

/// The two remotely addressable properties of the bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    On,
    Color,
}

impl Property {
    /// Wire name of the property, as used in URLs and JSON bodies.
    pub fn name(&self) -> &'static str {
        match self {
            Property::On => "on",
            Property::Color => "color",
        }
    }
}

/// Description of a single property as published by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDescription {
    /// Href relative to the thing URL (absolute hrefs are honored too).
    pub href: String,
}

/// Property map of a color light thing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDescriptions {
    pub on: PropertyDescription,
    pub color: PropertyDescription,
}

/// Thing description as published by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThingDescription {
    #[serde(default)]
    pub name: String,
    /// Thing href relative to the gateway base.
    pub href: String,
    pub properties: PropertyDescriptions,
}

impl ThingDescription {
    /// Description with the gateway's conventional property paths.
    pub fn with_default_paths(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            properties: PropertyDescriptions {
                on: PropertyDescription {
                    href: "properties/on".to_string(),
                },
                color: PropertyDescription {
                    href: "properties/color".to_string(),
                },
            },
        }
    }
}

/// A property with its fully resolved endpoint URL.
#[derive(Debug, Clone)]
pub struct PropertyEndpoint {
    property: Property,
    url: Url,
}

impl PropertyEndpoint {
    pub fn property(&self) -> Property {
        self.property
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Resolved endpoints for both bulb properties.
#[derive(Debug, Clone)]
pub struct BulbEndpoints {
    on: PropertyEndpoint,
    color: PropertyEndpoint,
}

impl BulbEndpoints {
    /// Resolve both property URLs from the gateway base and the thing
    /// description.
    pub fn resolve(base: &Url, description: &ThingDescription) -> Result<Self> {
        let thing_url = base.join(&description.href)?;
        Ok(Self {
            on: PropertyEndpoint {
                property: Property::On,
                url: thing_url.join(&description.properties.on.href)?,
            },
            color: PropertyEndpoint {
                property: Property::Color,
                url: thing_url.join(&description.properties.color.href)?,
            },
        })
    }

    pub fn endpoint(&self, property: Property) -> &PropertyEndpoint {
        match property {
            Property::On => &self.on,
            Property::Color => &self.color,
        }
    }
}
