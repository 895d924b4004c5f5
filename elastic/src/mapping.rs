//! Field mappings, document types and dynamic templates

use std::fmt;

use serde_json::Value;

use crate::client::Elasticsearch;
use crate::dict::{self, Dict};
use crate::parser::{Decoded, IndexResultParser, RawParser};
use crate::transport::Method;
use crate::Result;

pub const MAPPING: &str = "mapping";
pub const MAPPINGS: &str = "mappings";
pub const PROPERTIES: &str = "properties";
pub const TYPE: &str = "type";
pub const INDEX: &str = "index";
pub const ANALYZER: &str = "analyzer";
pub const MATCH: &str = "match";
pub const MATCH_MAPPING_TYPE: &str = "match_mapping_type";
pub const DYNAMIC_TEMPLATES: &str = "dynamic_templates";
/// Type holding index-wide defaults
pub const DEFAULT: &str = "_default_";
/// The catch-all field
pub const ALL: &str = "_all";

/// A mapping request: GET|PUT /:index/:type/_mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    url: String,
    query: Dict,
}

impl Mapping {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Dict::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set `properties.<field>.<name>` to `value`
    ///
    /// Calls for the same field accumulate:
    /// `add_property("tag", "type", "string").add_property("tag", "index", "not_analyzed")`
    /// gives `{"properties":{"tag":{"index":"not_analyzed","type":"string"}}}`.
    pub fn add_property(mut self, field: &str, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let properties = dict::object_entry(&mut self.query, PROPERTIES);
        dict::object_entry(properties, field).insert(name.into(), value.into());
        self
    }

    /// Replace the whole definition of `properties.<field>`
    pub fn add_field(mut self, field: impl Into<String>, definition: Dict) -> Self {
        dict::object_entry(&mut self.query, PROPERTIES).insert(field.into(), Value::Object(definition));
        self
    }

    /// Nest a document type under `mappings.<name>`
    pub fn add_document_type(mut self, doc_type: DocType) -> Self {
        dict::object_entry(&mut self.query, MAPPINGS)
            .insert(doc_type.name, Value::Object(doc_type.dict));
        self
    }

    pub fn body(&self) -> &Dict {
        &self.query
    }

    /// GET /:index/:type/_mapping
    pub async fn get(&self, client: &Elasticsearch) -> Result<Decoded> {
        client.execute(Method::GET, &self.url, None, &RawParser).await
    }

    /// PUT /:index/:type/_mapping
    pub async fn put(&self, client: &Elasticsearch) -> Result<Decoded> {
        client
            .execute(Method::PUT, &self.url, Some(self.to_string()), &IndexResultParser)
            .await
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&dict::to_string(&self.query))
    }
}

/// A document type inside `mappings`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocType {
    name: String,
    dict: Dict,
}

impl DocType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dict: Dict::new(),
        }
    }

    /// The `_default_` type, whose settings apply to every type of the index
    pub fn default_type() -> Self {
        Self::new(DEFAULT)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a type-level property, e.g. `date_detection`
    pub fn add_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.dict.insert(name.into(), value.into());
        self
    }

    /// Set a named template, e.g. the `_all` field settings
    pub fn add_template(mut self, template: Template) -> Self {
        self.dict.insert(template.name, Value::Object(template.dict));
        self
    }

    /// Append to `dynamic_templates`
    pub fn add_dynamic_template(mut self, template: Template) -> Self {
        let entry = dict::single(&template.name, Value::Object(template.dict));
        dict::array_entry(&mut self.dict, DYNAMIC_TEMPLATES).push(Value::Object(entry));
        self
    }

    pub fn body(&self) -> &Dict {
        &self.dict
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dict = dict::single(&self.name, Value::Object(self.dict.clone()));
        f.write_str(&dict::to_string(&dict))
    }
}

/// A mapping template, either a named field block or a dynamic template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    name: String,
    dict: Dict,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dict: Dict::new(),
        }
    }

    /// Template for the `_all` field
    pub fn all() -> Self {
        Self::new(ALL)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field name pattern the template applies to, e.g. `*` or `*_es`
    pub fn add_match(mut self, pattern: impl Into<String>) -> Self {
        self.dict.insert(MATCH.to_string(), Value::String(pattern.into()));
        self
    }

    pub fn add_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.dict.insert(name.into(), value.into());
        self
    }

    /// Set `mapping.<name>`, the mapping given to matching fields
    pub fn add_mapping_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        dict::object_entry(&mut self.dict, MAPPING).insert(name.into(), value.into());
        self
    }

    pub fn body(&self) -> &Dict {
        &self.dict
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dict = dict::single(&self.name, Value::Object(self.dict.clone()));
        f.write_str(&dict::to_string(&dict))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spanish_template() -> Template {
        Template::new("es")
            .add_match("_es")
            .add_property(MATCH_MAPPING_TYPE, "string")
            .add_mapping_property("type", "string")
            .add_mapping_property("analyzer", "spanish")
    }

    #[test]
    fn test_mappings() {
        assert_eq!(
            Mapping::default()
                .add_property("tag", TYPE, "string")
                .add_property("tag", INDEX, "not_analyzed")
                .to_string(),
            r#"{"properties":{"tag":{"index":"not_analyzed","type":"string"}}}"#
        );
        assert_eq!(
            Mapping::default()
                .add_document_type(
                    DocType::default_type().add_template(Template::all().add_property("enabled", false))
                )
                .to_string(),
            r#"{"mappings":{"_default_":{"_all":{"enabled":false}}}}"#
        );
        assert_eq!(
            Mapping::default()
                .add_document_type(DocType::new("my_type").add_dynamic_template(spanish_template()))
                .to_string(),
            r#"{"mappings":{"my_type":{"dynamic_templates":[{"es":{"mapping":{"analyzer":"spanish","type":"string"},"match":"_es","match_mapping_type":"string"}}]}}}"#
        );
    }

    #[test]
    fn test_properties_of_different_fields_are_independent() {
        let m = Mapping::default()
            .add_property("title", TYPE, "string")
            .add_property("title", ANALYZER, "english")
            .add_property("created", TYPE, "date");
        assert_eq!(
            m.body().get(PROPERTIES),
            Some(&json!({
                "title": {"type": "string", "analyzer": "english"},
                "created": {"type": "date"}
            }))
        );
    }

    #[test]
    fn test_add_field_replaces_definition() {
        let mut definition = Dict::new();
        definition.insert(TYPE.into(), json!("long"));
        let m = Mapping::default()
            .add_property("count", TYPE, "string")
            .add_property("count", INDEX, "no")
            .add_field("count", definition);
        assert_eq!(m.to_string(), r#"{"properties":{"count":{"type":"long"}}}"#);
    }

    #[test]
    fn test_doc_type() {
        assert_eq!(
            DocType::default_type()
                .add_template(Template::all().add_property("enabled", false))
                .to_string(),
            r#"{"_default_":{"_all":{"enabled":false}}}"#
        );
        assert_eq!(
            DocType::new("my_type").add_dynamic_template(spanish_template()).to_string(),
            r#"{"my_type":{"dynamic_templates":[{"es":{"mapping":{"analyzer":"spanish","type":"string"},"match":"_es","match_mapping_type":"string"}}]}}"#
        );
        assert_eq!(
            DocType::new("my_type").add_property("date_detection", false).to_string(),
            r#"{"my_type":{"date_detection":false}}"#
        );
    }

    #[test]
    fn test_dynamic_templates_keep_order() {
        let d = DocType::new("t")
            .add_dynamic_template(Template::new("first").add_match("a_*"))
            .add_dynamic_template(Template::new("second").add_match("b_*"));
        assert_eq!(
            d.body().get(DYNAMIC_TEMPLATES),
            Some(&json!([{"first": {"match": "a_*"}}, {"second": {"match": "b_*"}}]))
        );
    }

    #[test]
    fn test_templates() {
        assert_eq!(
            Template::all().add_property("enabled", false).to_string(),
            r#"{"_all":{"enabled":false}}"#
        );
        assert_eq!(
            spanish_template().to_string(),
            r#"{"es":{"mapping":{"analyzer":"spanish","type":"string"},"match":"_es","match_mapping_type":"string"}}"#
        );
    }
}
