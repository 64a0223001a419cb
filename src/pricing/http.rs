// src/pricing/http.rs

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::{
    ApiResponse, BulkOrderRequest, CalculationResult, OrderAck, ProfitCalcRequest,
    SmartPlOrderRequest, VolumeCalcRequest,
};
use super::{OrderGateway, PricingCalculator};
use crate::config::Config;

/// HTTP client for the back-office pricing service.
#[derive(Debug, Clone)]
pub struct HttpPricingClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpPricingClient {
    /// `base_url` without a trailing `/`.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow!("Invalid pricing service URL `{}`: {}", base_url, e))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("HTTP client build error: {}", e))?;

        Ok(Self { client, base_url, api_key })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            &cfg.pricing_base_url,
            cfg.pricing_api_key.clone(),
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    async fn call_api<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.base_url.join(endpoint)?;
        debug!("{} {}", method, url);

        let mut req = self.client.request(method, url);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("Pricing service HTTP {}: {}", status, endpoint));
        }

        let bytes = resp.bytes().await?;
        let mut de = serde_json::Deserializer::from_slice(&bytes);
        let api: ApiResponse<T> = serde_path_to_error::deserialize(&mut de)
            .map_err(|e| anyhow!("Failed to decode `{}` response at {}: {}", endpoint, e.path(), e))?;

        if api.code != 0 {
            return Err(anyhow!("Pricing service error {}: {}", api.code, api.message));
        }
        api.data
            .ok_or_else(|| anyhow!("Pricing service returned empty payload for `{}`", endpoint))
    }

    /// GET /api/v1/health
    pub async fn check_connection(&self) -> Result<()> {
        let _: serde_json::Value = self
            .call_api(Method::GET, "api/v1/health", None::<&()>)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PricingCalculator for HttpPricingClient {
    /// POST /api/v1/calculator/from-profit
    async fn calculate_from_profit(&self, req: &ProfitCalcRequest) -> Result<CalculationResult> {
        self.call_api(Method::POST, "api/v1/calculator/from-profit", Some(req))
            .await
    }

    /// POST /api/v1/calculator/from-volume
    async fn calculate_from_volume(&self, req: &VolumeCalcRequest) -> Result<CalculationResult> {
        self.call_api(Method::POST, "api/v1/calculator/from-volume", Some(req))
            .await
    }
}

#[async_trait]
impl OrderGateway for HttpPricingClient {
    /// POST /api/v1/orders/bulk
    async fn create_bulk_order(&self, req: &BulkOrderRequest) -> Result<OrderAck> {
        self.call_api(Method::POST, "api/v1/orders/bulk", Some(req))
            .await
    }

    /// POST /api/v1/orders/smart-pl
    async fn create_order_with_smart_pl(&self, req: &SmartPlOrderRequest) -> Result<OrderAck> {
        self.call_api(Method::POST, "api/v1/orders/smart-pl", Some(req))
            .await
    }
}
