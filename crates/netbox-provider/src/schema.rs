use netbox_config::DEFAULT_REQUEST_TIMEOUT_SECS;
use netbox_config::env::{
    ENV_ALLOW_INSECURE_HTTPS, ENV_API_TOKEN, ENV_REQUEST_TIMEOUT, ENV_SERVER_URL,
    ENV_STRIP_TRAILING_SLASHES_FROM_URL,
};
use netbox_config::raw::keys;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Bool,
    Number,
    Map,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub optional: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_var: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    pub description: &'static str,
}

/// Description of the provider's configuration block.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSchema {
    pub type_name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ProviderSchema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

pub(crate) fn provider_schema(type_name: &'static str) -> ProviderSchema {
    ProviderSchema {
        type_name,
        description: "Manage records in a NetBox instance through its REST API.",
        attributes: vec![
            AttributeSchema {
                name: keys::SERVER_URL,
                kind: AttributeType::String,
                optional: true,
                sensitive: false,
                env_var: Some(ENV_SERVER_URL),
                default: None,
                description: "Location of the NetBox server including scheme and optional port, e.g. https://netbox.example.com:8443.",
            },
            AttributeSchema {
                name: keys::API_TOKEN,
                kind: AttributeType::String,
                optional: true,
                sensitive: true,
                env_var: Some(ENV_API_TOKEN),
                default: None,
                description: "NetBox API authentication token.",
            },
            AttributeSchema {
                name: keys::STRIP_TRAILING_SLASHES_FROM_URL,
                kind: AttributeType::Bool,
                optional: true,
                sensitive: false,
                env_var: Some(ENV_STRIP_TRAILING_SLASHES_FROM_URL),
                default: Some(serde_json::Value::Bool(true)),
                description: "Strip trailing slashes from server_url before use.",
            },
            AttributeSchema {
                name: keys::ALLOW_INSECURE_HTTPS,
                kind: AttributeType::Bool,
                optional: true,
                sensitive: false,
                env_var: Some(ENV_ALLOW_INSECURE_HTTPS),
                default: Some(serde_json::Value::Bool(false)),
                description: "Accept any TLS certificate presented by the server.",
            },
            AttributeSchema {
                name: keys::REQUEST_TIMEOUT,
                kind: AttributeType::Number,
                optional: true,
                sensitive: false,
                env_var: Some(ENV_REQUEST_TIMEOUT),
                default: Some(serde_json::Value::from(DEFAULT_REQUEST_TIMEOUT_SECS)),
                description: "Per-request timeout in seconds.",
            },
            AttributeSchema {
                name: keys::HEADERS,
                kind: AttributeType::Map,
                optional: true,
                sensitive: false,
                env_var: None,
                default: None,
                description: "Additional headers sent with every request to NetBox.",
            },
        ],
    }
}
