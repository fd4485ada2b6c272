//! Request handler context consumed by the prompt executor

use std::collections::HashMap;

/// Caller parameters forwarded to the LLM call
pub type QueryParams = HashMap<String, String>;

/// Read-only view of the request handler a prompt runs for.
///
/// The executor only ever borrows a handler, so implementations can expose
/// references into their own state.
pub trait Handler: Send + Sync {
    /// Identifier of the content source (tenant) the request targets
    fn site(&self) -> &str;

    /// Content category of the request
    fn item_type(&self) -> &str;

    /// Arbitrary caller parameters
    fn query_params(&self) -> &QueryParams;

    /// Value substituted for a template variable.
    ///
    /// `site` and `item_type` resolve to the handler keys, anything else is
    /// looked up in the query parameters.
    fn field(&self, name: &str) -> Option<String> {
        match name {
            "site" => Some(self.site().to_string()),
            "item_type" | "item-type" => Some(self.item_type().to_string()),
            _ => self.query_params().get(name).cloned(),
        }
    }
}

/// Plain handler value for hosts that don't carry their own context type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHandler {
    site: String,
    item_type: String,
    query_params: QueryParams,
    fields: HashMap<String, String>,
}

impl RequestHandler {
    pub fn new(site: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            item_type: item_type.into(),
            query_params: QueryParams::new(),
            fields: HashMap::new(),
        }
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(name.into(), value.into());
        self
    }

    pub fn with_query_params(mut self, params: QueryParams) -> Self {
        self.query_params = params;
        self
    }

    /// Add a template field that is not forwarded to the LLM as a parameter
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl Handler for RequestHandler {
    fn site(&self) -> &str {
        &self.site
    }

    fn item_type(&self) -> &str {
        &self.item_type
    }

    fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "site" => Some(self.site.clone()),
            "item_type" | "item-type" => Some(self.item_type.clone()),
            _ => self
                .fields
                .get(name)
                .or_else(|| self.query_params.get(name))
                .cloned(),
        }
    }
}
