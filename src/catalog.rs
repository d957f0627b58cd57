use std::collections::HashSet;
use std::fmt;

use gloo_net::http::Request;
use log::warn;
use serde::{Deserialize, Serialize};

const CATALOG_URL: &str = "assets/products.json";

/// One product as served by the catalog file. Prices are integer minor
/// units (paise), formatted for display by [`format_price`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub image_url: String,
    pub price: i64,
    pub original_price: i64,
    #[serde(default)]
    pub discount_percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound(String),
    Network(String),
    Parse(String),
}

impl CatalogError {
    fn network(err: impl fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    fn parse(err: impl fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(url) => write!(f, "catalog not found at {}", url),
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Parse(msg) => write!(f, "invalid catalog data: {}", msg),
        }
    }
}

/// Loads the product catalog. An empty catalog is valid and yields an
/// empty vec, only transport and parse failures are errors.
pub async fn fetch_catalog() -> Result<Vec<Product>, CatalogError> {
    let response = Request::get(CATALOG_URL)
        .send()
        .await
        .map_err(CatalogError::network)?;
    if response.status() == 404 {
        return Err(CatalogError::NotFound(CATALOG_URL.to_owned()));
    }
    if !response.ok() {
        return Err(CatalogError::Network(format!(
            "HTTP {} while fetching {}",
            response.status(),
            CATALOG_URL
        )));
    }
    let body = response.text().await.map_err(CatalogError::network)?;
    parse_catalog(&body)
}

pub fn parse_catalog(body: &str) -> Result<Vec<Product>, CatalogError> {
    let mut products: Vec<Product> =
        serde_json::from_str(body).map_err(CatalogError::parse)?;
    dedupe_ids(&mut products);
    Ok(products)
}

/// Every queue operation keys on the product id, so duplicates in the
/// served file get a numeric suffix instead of shadowing each other.
fn dedupe_ids(products: &mut [Product]) {
    let mut seen: HashSet<String> = HashSet::new();
    for product in products.iter_mut() {
        if seen.insert(product.id.clone()) {
            continue;
        }
        let mut counter = 2;
        let unique = loop {
            let candidate = format!("{}-{}", product.id, counter);
            if seen.insert(candidate.clone()) {
                break candidate;
            }
            counter += 1;
        };
        warn!("Duplicate product id '{}' renamed to '{}'", product.id, unique);
        product.id = unique;
    }
}

/// Renders minor units as rupees, e.g. `299900` becomes `₹2999.00`.
pub fn format_price(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    format!(
        "{}₹{}.{:02}",
        sign,
        (minor_units / 100).abs(),
        (minor_units % 100).abs()
    )
}

pub fn format_discount(percentage: u8) -> String {
    format!("{}% OFF", percentage)
}
