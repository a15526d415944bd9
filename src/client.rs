//! HTTP access to the bulb's property endpoints.
//!
//! One GET per property read, one PUT per property write, bearer token
//! attached per request. Write success is signaled by the HTTP status
//! alone; the caller checks it explicitly instead of relying on a
//! rejection, so only network and decode failures surface as errors.

use crate::descriptor::{BulbEndpoints, Property};
use crate::error::Result;
use crate::store::StateDelta;
use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use serde_json::json;
use std::sync::Arc;

/// Supplies the bearer token for each request.
///
/// Token lifecycle (refresh, rotation) belongs to the surrounding
/// application; the client just asks again on every request.
pub trait Credentials: Send + Sync {
    fn bearer_token(&self) -> String;
}

/// Fixed token credentials, e.g. from configuration.
pub struct StaticToken(pub String);

impl Credentials for StaticToken {
    fn bearer_token(&self) -> String {
        self.0.clone()
    }
}

/// A value destined for one specific property endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    On(bool),
    Color(String),
}

impl PropertyValue {
    /// The property this value writes to.
    pub fn property(&self) -> Property {
        match self {
            PropertyValue::On(_) => Property::On,
            PropertyValue::Color(_) => Property::Color,
        }
    }

    /// PUT body, `{"<property>": <value>}`.
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            PropertyValue::On(on) => json!({ "on": on }),
            PropertyValue::Color(color) => json!({ "color": color }),
        }
    }

    /// The delta to merge into the store once the device confirms.
    pub fn into_delta(self) -> StateDelta {
        match self {
            PropertyValue::On(on) => StateDelta::on(on),
            PropertyValue::Color(color) => StateDelta::color(color),
        }
    }
}

/// Transport seam between the sync protocol and the actual device.
///
/// `read` resolves to whatever partial state the device reported;
/// `write` resolves to the raw HTTP status so the caller can decide
/// what counts as acceptance.
#[async_trait]
pub trait PropertyTransport: Send + Sync {
    async fn read(&self, property: Property) -> Result<StateDelta>;
    async fn write(&self, value: &PropertyValue) -> Result<u16>;
}

/// Property transport over authenticated HTTP.
pub struct HttpPropertyClient {
    http: reqwest::Client,
    endpoints: BulbEndpoints,
    credentials: Arc<dyn Credentials>,
}

impl HttpPropertyClient {
    pub fn new(endpoints: BulbEndpoints, credentials: Arc<dyn Credentials>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
            credentials,
        }
    }
}

#[async_trait]
impl PropertyTransport for HttpPropertyClient {
    async fn read(&self, property: Property) -> Result<StateDelta> {
        let url = self.endpoints.endpoint(property).url().clone();
        debug!("[HTTP] GET {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(self.credentials.bearer_token())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let delta = response.json::<StateDelta>().await?;
        Ok(delta)
    }

    async fn write(&self, value: &PropertyValue) -> Result<u16> {
        let url = self.endpoints.endpoint(value.property()).url().clone();
        debug!("[HTTP] PUT {} {}", url, value.to_body());

        let response = self
            .http
            .put(url)
            .bearer_auth(self.credentials.bearer_token())
            .json(&value.to_body())
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_body_shapes() {
        assert_eq!(
            PropertyValue::On(true).to_body(),
            json!({ "on": true })
        );
        assert_eq!(
            PropertyValue::Color("#ff0000".to_string()).to_body(),
            json!({ "color": "#ff0000" })
        );
    }

    #[test]
    fn test_value_targets_its_property() {
        assert_eq!(PropertyValue::On(false).property(), Property::On);
        assert_eq!(
            PropertyValue::Color("#000000".to_string()).property(),
            Property::Color
        );
    }

    #[test]
    fn test_value_becomes_confirmation_delta() {
        assert_eq!(PropertyValue::On(true).into_delta(), StateDelta::on(true));
        assert_eq!(
            PropertyValue::Color("#abcdef".to_string()).into_delta(),
            StateDelta::color("#abcdef")
        );
    }

    #[test]
    fn test_static_token() {
        let credentials = StaticToken("secret".to_string());
        assert_eq!(credentials.bearer_token(), "secret");
    }
}
