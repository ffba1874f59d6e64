use crate::config::PatchConfig;
use serde_json::{json, Map, Value};

const COMPONENTS: &str = "components";
const SECURITY_SCHEMES: &str = "securitySchemes";
const SERVERS: &str = "servers";

#[derive(Clone, Debug, PartialEq)]
pub struct SecurityScheme {
    pub scheme_type: String,
    pub in_type: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Server {
    pub url: String,
}

impl SecurityScheme {
    pub fn api_key_header(header: &str) -> Self {
        Self {
            scheme_type: "apiKey".to_string(),
            in_type: "header".to_string(),
            name: header.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "type": self.scheme_type,
            "in": self.in_type,
            "name": self.name,
        })
    }
}

impl Server {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string() }
    }

    fn to_json(&self) -> Value {
        json!({ "url": self.url })
    }
}

/// Replacement values for `components.securitySchemes` and `servers`.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch {
    pub scheme_name: String,
    pub scheme: SecurityScheme,
    pub servers: Vec<Server>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DocumentError {
    #[error("document has no `{0}` key")]
    MissingKey(&'static str),
    #[error("`{0}` is not a JSON object")]
    NotAnObject(&'static str),
}

impl From<&PatchConfig> for Patch {
    fn from(config: &PatchConfig) -> Self {
        Self {
            scheme_name: config.scheme_name.clone(),
            scheme: SecurityScheme::api_key_header(&config.header),
            servers: vec![Server::new(&config.server_url)],
        }
    }
}

impl Patch {
    /// Rewrites the document in place. On error the document is untouched.
    ///
    /// `components` must already exist; it is never created here.
    pub fn apply(&self, document: &mut Value) -> Result<(), DocumentError> {
        let root = document
            .as_object_mut()
            .ok_or(DocumentError::NotAnObject("document"))?;

        let components = root
            .get_mut(COMPONENTS)
            .ok_or(DocumentError::MissingKey(COMPONENTS))?
            .as_object_mut()
            .ok_or(DocumentError::NotAnObject(COMPONENTS))?;

        components.insert(SECURITY_SCHEMES.to_string(), self.security_schemes());
        root.insert(SERVERS.to_string(), self.servers());

        Ok(())
    }

    fn security_schemes(&self) -> Value {
        let mut schemes = Map::new();
        schemes.insert(self.scheme_name.clone(), self.scheme.to_json());

        Value::Object(schemes)
    }

    fn servers(&self) -> Value {
        Value::Array(self.servers.iter().map(Server::to_json).collect())
    }
}
