use serde::Serialize;
use serde_json::{Map, Value};

/// Organization record accumulated from JSON-LD blocks. Known schema.org keys
/// get typed fields; everything else lands in the `extra` bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrganizationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<OrgAddress>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrgAddress {
    Literal(String),
    Postal {
        #[serde(rename = "streetAddress", skip_serializing_if = "Option::is_none")]
        street_address: Option<String>,
        #[serde(rename = "addressLocality", skip_serializing_if = "Option::is_none")]
        address_locality: Option<String>,
    },
}

impl OrganizationRecord {
    pub fn is_empty(&self) -> bool {
        self == &OrganizationRecord::default()
    }

    /// Shallow-merge a JSON-LD object's keys into the record. Keys seen later
    /// overwrite keys seen earlier, so the last script in document order wins
    /// on conflicts.
    pub fn merge_object(&mut self, object: &Map<String, Value>) {
        for (key, value) in object {
            match key.as_str() {
                "name" => self.name = text_value(value).or(self.name.take()),
                "logo" => self.logo = url_value(value).or(self.logo.take()),
                "email" => self.email = text_value(value).or(self.email.take()),
                "telephone" => self.telephone = text_value(value).or(self.telephone.take()),
                "url" => self.url = text_value(value).or(self.url.take()),
                "address" => self.address = address_value(value).or(self.address.take()),
                key if key.starts_with('@') => {}
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

fn text_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// Logos come either as a plain URL string or as a schema.org ImageObject.
fn url_value(value: &Value) -> Option<String> {
    match value {
        Value::String(_) => text_value(value),
        Value::Object(object) => object.get("url").and_then(text_value),
        _ => None,
    }
}

fn address_value(value: &Value) -> Option<OrgAddress> {
    match value {
        Value::String(_) => text_value(value).map(OrgAddress::Literal),
        Value::Object(object) => {
            let street_address = object.get("streetAddress").and_then(text_value);
            let address_locality = object.get("addressLocality").and_then(text_value);
            match (&street_address, &address_locality) {
                (None, None) => None,
                _ => Some(OrgAddress::Postal {
                    street_address,
                    address_locality,
                }),
            }
        }
        _ => None,
    }
}
