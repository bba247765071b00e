//! Stalker-portal client for VOD categories
//!
//! Replays the captured set-top-box identity: a handshake yields a token,
//! `get_profile` confirms the session and `get_categories` lists VOD
//! categories. Every request carries the same identity query parameters.

use std::sync::Arc;

use regex::Regex;
use reqwest::cookie::Jar;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use crate::client::{ClientConfig, JsonClient, header_value};
use crate::error::{Result, ToolError};
use crate::types::Category;
use crate::url::{PORTAL_LOAD_URL, build_portal_url};

/// Colon-separated MAC address, six hex octets
const MAC_PATTERN: &str = r"^[0-9A-Fa-f]{2}(:[0-9A-Fa-f]{2}){5}$";

/// Portal request timeout in seconds
const PORTAL_TIMEOUT_SECS: u64 = 30;

/// Device identity presented to the portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalIdentity {
    pub mac: String,
    pub stb_type: String,
    pub serial_number: String,
    pub device_id: String,
    pub device_id2: String,
    pub signature: String,
    pub user_agent: String,
    pub x_user_agent: String,
    pub referer: String,
    pub timezone: String,
}

impl Default for PortalIdentity {
    fn default() -> Self {
        Self {
            mac: "00:1A:79:7D:7B:F4".to_string(),
            stb_type: "MAG322".to_string(),
            serial_number: "686F73JAE8F30".to_string(),
            device_id: "2734F8111495CB904C3045D58C6EF37BD0F19084F7528F3DAE455287E1688031".to_string(),
            device_id2: "BF73E1F44C0DB1F39A183B9CCB6340ED5897A73EF78606D5DF2180CC4888562D".to_string(),
            signature: "63A32EB6C1F804FD0621B840341C12CEDC5F6AFCFC98F0F4C1576BB0A3C8115A".to_string(),
            user_agent: "Mozilla/5.0 (Unknown; Linux) AppleWebKit/538.1 (KHTML, like Gecko) MAG200 stbapp ver: 4 rev: 734 Mobile Safari/538.1".to_string(),
            x_user_agent: "Model: MAG322; Link: Ethernet".to_string(),
            referer: "https://ipro4k.rocd.cc/stalker_portal/c/index.html".to_string(),
            timezone: "America/Toronto".to_string(),
        }
    }
}

impl PortalIdentity {
    /// Check that the MAC address is six colon-separated hex pairs
    pub fn validate(&self) -> Result<()> {
        let Ok(re) = Regex::new(MAC_PATTERN) else {
            return Err(ToolError::InvalidArgument("invalid MAC pattern".to_string()));
        };
        if !re.is_match(&self.mac) {
            return Err(ToolError::InvalidArgument(format!(
                "malformed MAC address: {}",
                self.mac
            )));
        }
        Ok(())
    }

    /// Query parameters sent with every portal action
    fn params<'a>(&'a self, kind: &'a str, action: &'a str, token: &'a str) -> [(&'a str, &'a str); 9] {
        [
            ("type", kind),
            ("action", action),
            ("mac", self.mac.as_str()),
            ("token", token),
            ("stb_type", self.stb_type.as_str()),
            ("sn", self.serial_number.as_str()),
            ("device_id", self.device_id.as_str()),
            ("device_id2", self.device_id2.as_str()),
            ("signature", self.signature.as_str()),
        ]
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, header_value("User-Agent", &self.user_agent)?);
        headers.insert(
            HeaderName::from_static("x-user-agent"),
            header_value("X-User-Agent", &self.x_user_agent)?,
        );
        headers.insert(header::REFERER, header_value("Referer", &self.referer)?);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        Ok(headers)
    }

    /// Cookies the portal expects from a set-top box
    fn cookies(&self) -> [String; 3] {
        [
            format!("mac={}", self.mac.to_lowercase()),
            "stb_lang=en".to_string(),
            format!("timezone={}", self.timezone),
        ]
    }
}

/// Envelope of every portal response
#[derive(Debug, Deserialize)]
struct PortalResponse {
    #[serde(default)]
    js: Option<Value>,
}

/// Client for a stalker-portal `load.php` endpoint
pub struct PortalClient {
    client: JsonClient,
    load_url: String,
    identity: PortalIdentity,
}

impl PortalClient {
    /// Create a client for the default portal and identity
    pub fn new() -> Result<Self> {
        Self::with_identity(PORTAL_LOAD_URL, PortalIdentity::default())
    }

    /// Create a client for `load_url` presenting `identity`
    ///
    /// # Errors
    /// `InvalidArgument` for a malformed MAC, URL or header value
    pub fn with_identity(load_url: impl Into<String>, identity: PortalIdentity) -> Result<Self> {
        identity.validate()?;
        let load_url = load_url.into();

        let cookie_url: reqwest::Url = load_url
            .parse()
            .map_err(|_| ToolError::InvalidArgument(format!("invalid portal URL: {}", load_url)))?;
        let jar = Arc::new(Jar::default());
        for cookie in identity.cookies() {
            jar.add_cookie_str(&cookie, &cookie_url);
        }

        let client = JsonClient::with_config(
            ClientConfig::unthrottled(PORTAL_TIMEOUT_SECS),
            identity.default_headers()?,
            Some(jar),
        )?;

        Ok(Self {
            client,
            load_url,
            identity,
        })
    }

    /// Perform the handshake and return the session token
    ///
    /// # Errors
    /// - `Handshake` if the response carries no `js.token`
    /// - `HttpError` / `Status` for transport failures
    pub async fn handshake(&self) -> Result<String> {
        let response = self.call("stb", "handshake", "").await?;

        response
            .js
            .as_ref()
            .and_then(|js| js.get("token"))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ToolError::Handshake("token not found in response".to_string()))
    }

    /// Fetch the profile to confirm the token is accepted
    pub async fn get_profile(&self, token: &str) -> Result<()> {
        self.call("stb", "get_profile", token).await?;
        Ok(())
    }

    /// Fetch the VOD category list
    ///
    /// # Errors
    /// `MissingField` if the response has no `js` array
    pub async fn get_categories(&self, token: &str) -> Result<Vec<Category>> {
        let response = self.call("vod", "get_categories", token).await?;

        match response.js {
            Some(js @ Value::Array(_)) => Ok(serde_json::from_value(js)?),
            _ => Err(ToolError::MissingField("js".to_string())),
        }
    }

    async fn call(&self, kind: &str, action: &str, token: &str) -> Result<PortalResponse> {
        let url = build_portal_url(&self.load_url, &self.identity.params(kind, action, token));

        let auth = if token.is_empty() {
            Vec::new()
        } else {
            vec![(
                header::AUTHORIZATION,
                header_value("Authorization", &format!("Bearer {}", token))?,
            )]
        };

        tracing::debug!(kind, action, "portal request");
        self.client.get_json(&url, &auth).await
    }
}

/// Render categories as a fixed-width table sorted by numeric id
///
/// Missing ids sort as 0 and non-numeric ids as -1. The sort is stable.
pub fn format_category_table(categories: &[Category]) -> String {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| category_sort_key(c));

    let mut table = format!("{:<6} {:<40} {}\n", "ID", "Title", "Alias");
    table.push_str(&"-".repeat(60));
    table.push('\n');

    for category in sorted {
        table.push_str(&format!(
            "{:<6} {:<40} {}\n",
            category.id.as_deref().unwrap_or("?"),
            category.title.as_deref().unwrap_or("Unknown"),
            category.alias.as_deref().unwrap_or(""),
        ));
    }

    table
}

fn category_sort_key(category: &Category) -> i64 {
    match category.id.as_deref() {
        None => 0,
        Some(id) => id.trim().parse::<i64>().unwrap_or(-1),
    }
}
