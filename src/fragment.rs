use regex::Regex;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::config::FragmentConfig;
use crate::error::{Error, Result};
use crate::search::find_price;

const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Where a price was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSource {
    /// The `/_next/data/<buildId>/stars/buy.json` route.
    DataRoute,
    /// The `__NEXT_DATA__` script embedded in the page.
    NextData,
}

impl From<PriceSource> for &'static str {
    fn from(value: PriceSource) -> Self {
        match value {
            PriceSource::DataRoute => "data_route",
            PriceSource::NextData => "next_data",
        }
    }
}

pub struct Client {
    req_client: reqwest::Client,
    page_url: String,
    referer: String,
    data_url_prefix: String,
    build_id: Regex,
    next_data: Regex,
}

impl Client {
    pub fn new(config: &FragmentConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_str(&config.user_agent)?);
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)?,
        );
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));

        let req_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base = config.base_url.trim_end_matches('/');

        Ok(Self {
            req_client,
            page_url: format!("{base}/stars/buy"),
            referer: format!("{base}/"),
            data_url_prefix: format!("{base}/_next/data"),
            build_id: Regex::new(r#""buildId":"([A-Za-z0-9_-]+)""#)?,
            next_data: Regex::new(
                r#"(?i)<script id="__NEXT_DATA__" type="application/json">([\s\S]*?)</script>"#,
            )?,
        })
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn data_url(&self, build_id: &str) -> String {
        format!("{}/{}/stars/buy.json", self.data_url_prefix, build_id)
    }

    /// Runs the whole lookup: the data route first, then the inline page state.
    pub async fn load_price(&self) -> Result<(f64, PriceSource)> {
        let html = self.load_page().await?;

        match self.extract_build_id(&html) {
            Some(build_id) => match self.load_data_route(build_id).await {
                Ok(data) => match find_price(&data) {
                    Some(price) => return Ok((price, PriceSource::DataRoute)),
                    None => tracing::debug!("No price in data route for build {}", build_id),
                },
                Err(e) => {
                    tracing::warn!("Loading data route for build {}: {}", build_id, e);
                }
            },
            None => tracing::debug!("No buildId in page"),
        }

        match self.extract_next_data(&html) {
            Ok(data) => match find_price(&data) {
                Some(price) => return Ok((price, PriceSource::NextData)),
                None => tracing::debug!("No price in __NEXT_DATA__"),
            },
            Err(e) => {
                tracing::warn!("Extracting __NEXT_DATA__: {}", e);
            }
        }

        Err(Error::PriceNotFound)
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_page(&self) -> Result<String> {
        let resp = self
            .req_client
            .get(&self.page_url)
            .header(header::ACCEPT, PAGE_ACCEPT)
            .header(header::REFERER, &self.referer)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!("Non Success Response: {:?}", status);
            return Err(Error::UpstreamUnavailable(status));
        }

        Ok(resp.text().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_data_route(&self, build_id: &str) -> Result<Value> {
        let resp = self
            .req_client
            .get(self.data_url(build_id))
            .header(header::ACCEPT, "application/json")
            .header(header::REFERER, &self.page_url)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::DataRouteStatus(status));
        }

        let raw_content = resp.bytes().await?;
        Ok(serde_json::from_slice(&raw_content)?)
    }

    pub fn extract_build_id<'h>(&self, html: &'h str) -> Option<&'h str> {
        self.build_id
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    pub fn extract_next_data(&self, html: &str) -> Result<Value> {
        let raw = self
            .next_data
            .captures(html)
            .and_then(|c| c.get(1))
            .ok_or_else(|| Error::Parse("NEXT_DATA not found".to_string()))?;

        Ok(serde_json::from_str(raw.as_str())?)
    }
}
