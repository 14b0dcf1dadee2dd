//! Get_Workers request envelope
//!
//! The request body is a fixed SOAP 1.1 template with WS-Security
//! `UsernameToken` credentials. Only the credentials, the page number, the
//! page size and the service version vary between requests.

use crate::config::{TapConfig, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::template::{self, TemplateContext};
use serde_json::{json, Value};

/// Placeholder written in place of the password in logged envelopes
pub const MASKED_PASSWORD: &str = "********";

/// SOAP envelope for `Get_Workers_Request`
///
/// Active employees and contingent workers, with personal, employment and
/// user account data.
pub const GET_WORKERS_TEMPLATE: &str = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:bsvc="urn:com.workday/bsvc">
    <soapenv:Header>
        <bsvc:Workday_Common_Header>
            <bsvc:Include_Reference_Descriptors_In_Response>true</bsvc:Include_Reference_Descriptors_In_Response>
        </bsvc:Workday_Common_Header>
        <wsse:Security soapenv:mustUnderstand="1" xmlns:wsse="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd">
            <wsse:UsernameToken>
                <wsse:Username>{{ config.username }}</wsse:Username>
                <wsse:Password Type="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText">{{ config.password }}</wsse:Password>
            </wsse:UsernameToken>
        </wsse:Security>
    </soapenv:Header>
    <soapenv:Body>
        <bsvc:Get_Workers_Request bsvc:version="{{ config.api_version }}">
            <bsvc:Request_Criteria>
                <bsvc:Exclude_Inactive_Workers>true</bsvc:Exclude_Inactive_Workers>
                <bsvc:Exclude_Employees>false</bsvc:Exclude_Employees>
                <bsvc:Exclude_Contingent_Workers>false</bsvc:Exclude_Contingent_Workers>
            </bsvc:Request_Criteria>
            <bsvc:Response_Filter>
                <bsvc:Page>{{ vars.page }}</bsvc:Page>
                <bsvc:Count>{{ vars.count }}</bsvc:Count>
            </bsvc:Response_Filter>
            <bsvc:Response_Group>
                <bsvc:Include_Personal_Information>true</bsvc:Include_Personal_Information>
                <bsvc:Include_Employment_Information>true</bsvc:Include_Employment_Information>
                <bsvc:Include_User_Account>true</bsvc:Include_User_Account>
            </bsvc:Response_Group>
        </bsvc:Get_Workers_Request>
    </soapenv:Body>
</soapenv:Envelope>
"#;

/// Builds `Get_Workers_Request` envelopes for successive pages
#[derive(Clone)]
pub struct EnvelopeBuilder {
    username: String,
    password: String,
    api_version: String,
    page_size: u32,
}

impl EnvelopeBuilder {
    /// Create a builder; absent credentials render as empty elements
    pub fn new(username: Option<&str>, password: Option<&str>) -> Self {
        Self {
            username: username.unwrap_or_default().to_string(),
            password: password.unwrap_or_default().to_string(),
            api_version: TapConfig::default().api_version,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a builder from the tap configuration
    pub fn from_config(config: &TapConfig) -> Self {
        Self::new(config.username.as_deref(), config.password.as_deref())
            .with_api_version(config.api_version.clone())
            .with_page_size(config.page_size)
    }

    /// Set the `bsvc:version` attribute
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set the number of records per page
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    /// Records per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Render the envelope for `page`
    pub fn build(&self, page: u32) -> Result<String> {
        self.render(page, &self.password)
    }

    /// Render the envelope for `page` with the password masked, for logging
    pub fn build_masked(&self, page: u32) -> Result<String> {
        self.render(page, MASKED_PASSWORD)
    }

    fn render(&self, page: u32, password: &str) -> Result<String> {
        let mut ctx = TemplateContext::with_config(json!({
            "username": self.username,
            "password": password,
            "api_version": self.api_version,
        }));
        ctx.set_vars(page_vars(page, self.page_size));
        template::render_xml(GET_WORKERS_TEMPLATE, &ctx)
    }
}

impl std::fmt::Debug for EnvelopeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeBuilder")
            .field("username", &self.username)
            .field("api_version", &self.api_version)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

fn page_vars(page: u32, count: u32) -> Value {
    json!({ "page": page, "count": count })
}

/// Build the request body for one page with the default page size
pub fn build_workers_request(
    username: Option<&str>,
    password: Option<&str>,
    page: u32,
) -> Result<String> {
    EnvelopeBuilder::new(username, password).build(page)
}
