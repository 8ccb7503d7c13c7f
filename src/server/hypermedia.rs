//! Hypermedia envelope for JSON responses.
//!
//! Every JSON body is an [`Item`]: a name, the payload under `Properties`,
//! and the links a client can follow from there.

use serde::Serialize;
use serde_json::{json, Value};

use crate::render::{RenderPhase, RenderVariant};

/// A followable link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(rename = "Rel")]
    pub rel: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Method")]
    pub method: &'static str,
    /// Shape of the body the link expects.
    #[serde(rename = "JSONSchema", skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<Value>,
}

impl Link {
    pub fn get(rel: &str, url: String) -> Self {
        Link {
            rel: rel.to_string(),
            url,
            method: "GET",
            json_schema: None,
        }
    }

    pub fn post(rel: &str, url: String, json_schema: Value) -> Self {
        Link {
            rel: rel.to_string(),
            url,
            method: "POST",
            json_schema: Some(json_schema),
        }
    }
}

/// A named payload with links.
#[derive(Debug, Clone, Serialize)]
pub struct Item<T> {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Properties")]
    pub properties: T,
    #[serde(rename = "Links")]
    pub links: Vec<Link>,
    #[serde(rename = "Desc", skip_serializing_if = "Vec::is_empty")]
    pub desc: Vec<Vec<String>>,
}

impl<T> Item<T> {
    pub fn new(name: impl Into<String>, properties: T) -> Self {
        Item {
            name: name.into(),
            properties,
            links: Vec::new(),
            desc: Vec::new(),
        }
    }

    pub fn link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn desc(mut self, paragraphs: &[&[&str]]) -> Self {
        self.desc = paragraphs
            .iter()
            .map(|lines| lines.iter().map(|line| line.to_string()).collect())
            .collect();
        self
    }
}

/// Path of a per-variant route, with the name percent-encoded.
pub fn variant_url(name: &str, route: &str) -> String {
    format!("/Variant/{}/{}", urlencoding::encode(name), route)
}

/// Schema hint for the resolve body.
pub fn resolve_schema() -> Value {
    json!({
        "type": "object",
        "required": ["Year", "Season", "Type"],
        "properties": {
            "Year": {"type": "integer"},
            "Season": {"enum": ["Spring", "Fall"]},
            "Type": {"enum": ["Movement", "Retreat", "Adjustment"]},
            "SCs": {"type": "object", "additionalProperties": {"type": "string"}},
            "Units": {"type": "object", "additionalProperties": {"$ref": "#/definitions/Unit"}},
            "Dislodgeds": {"type": "object", "additionalProperties": {"$ref": "#/definitions/Unit"}},
            "Dislodgers": {"type": "object", "additionalProperties": {"type": "string"}},
            "Orders": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "additionalProperties": {"type": "array", "items": {"type": "string"}}
                }
            }
        },
        "definitions": {
            "Unit": {
                "type": "object",
                "properties": {
                    "Type": {"enum": ["Army", "Fleet"]},
                    "Nation": {"type": "string"}
                }
            }
        }
    })
}

fn variant_links<T>(item: Item<T>, name: &str) -> Item<T> {
    item.link(Link::get("start-state", variant_url(name, "Start")))
        .link(Link::post("resolve-state", variant_url(name, "Resolve"), resolve_schema()))
        .link(Link::get("map", variant_url(name, "Map.svg")))
}

/// One variant with its start-state, resolve-state and map links.
pub fn variant_item(variant: RenderVariant) -> Item<RenderVariant> {
    let name = variant.variant.name().to_string();
    variant_links(Item::new(name.clone(), variant), &name)
}

/// The variant listing.
pub fn variants_item(variants: Vec<RenderVariant>) -> Item<Vec<Item<RenderVariant>>> {
    let items = variants.into_iter().map(variant_item).collect();
    Item::new("variants", items)
        .link(Link::get("self", "/Variants".to_string()))
        .desc(&[
            &[
                "Variants",
                "This lists the variants supported by the server. Graph describes the map topology; the remaining fields describe the rules.",
            ],
            &[
                "Variant services",
                "Each variant provides its start state at the `start-state` link, inside the `Properties` field.",
                "To resolve a phase, `POST` the state to the `resolve-state` link with the orders added as `Orders`: `{ NATION: { PROVINCE: [WORD] } }`, e.g. `{ \"England\": { \"lon\": [\"Move\", \"nth\"] } }`.",
            ],
            &[
                "Phase types",
                "Phases served here are standalone snapshots for developers of independent services. They carry no game history.",
            ],
        ])
}

/// A resolved phase of variant `name`.
pub fn phase_item(name: &str, phase: RenderPhase) -> Item<RenderPhase> {
    Item::new(name, phase)
        .link(Link::post("resolve-state", variant_url(name, "Resolve"), resolve_schema()))
        .link(Link::get("map", variant_url(name, "Map.svg")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_encode_names() {
        assert_eq!(variant_url("Fleet Rome", "Start"), "/Variant/Fleet%20Rome/Start");
        assert_eq!(variant_url("Classical", "Map.svg"), "/Variant/Classical/Map.svg");
    }

    #[test]
    fn item_wire_shape() {
        let item = Item::new("thing", 3).link(Link::get("self", "/thing".into()));
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "Name": "thing",
                "Properties": 3,
                "Links": [{"Rel": "self", "URL": "/thing", "Method": "GET"}]
            })
        );
    }

    #[test]
    fn post_links_carry_schema() {
        let link = Link::post("resolve-state", variant_url("Pure", "Resolve"), resolve_schema());
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["Method"], "POST");
        assert_eq!(value["JSONSchema"]["required"], json!(["Year", "Season", "Type"]));
    }

    #[test]
    fn desc_is_paragraphs() {
        let item = Item::new("x", ()).desc(&[&["Title", "Body"]]);
        assert_eq!(item.desc, vec![vec!["Title".to_string(), "Body".to_string()]]);
    }
}
