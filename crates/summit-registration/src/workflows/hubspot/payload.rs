use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the CRM visitor-tracking token.
pub const VISITOR_TOKEN_COOKIE: &str = "hubspotutk";

/// One `{name, value}` pair of a forms-ingestion submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Page and visitor context sent alongside the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hutk: Option<String>,
    pub page_uri: String,
    pub page_name: String,
}

impl SubmissionContext {
    /// A blank token is treated as absent so it is never sent.
    pub fn new(visitor_token: Option<&str>, page_uri: Option<&str>, page_name: &str) -> Self {
        Self {
            hutk: visitor_token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string),
            page_uri: page_uri.unwrap_or_default().to_string(),
            page_name: page_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub fields: Vec<FormField>,
    pub context: SubmissionContext,
}

impl FormSubmission {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}

/// Pull the visitor token out of a raw `Cookie` header value.
pub fn visitor_token_from_cookies(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == VISITOR_TOKEN_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
