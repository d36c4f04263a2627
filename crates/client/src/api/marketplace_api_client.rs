use anyhow::Result;
use serde_json::{json, Value};

use crate::shared::config::MarketplaceConfig;

/// HTTP-клиент для работы с Cdiscount Marketplace API.
///
/// Каждая операция API обёрнута одним методом: собрать служебный заголовок,
/// вызвать удалённую операцию, вернуть развёрнутый ответ. При устаревшем
/// токене запрос повторяется один раз с новым токеном; других повторов нет.
pub struct MarketplaceApiClient {
    client: reqwest::Client,
    config: MarketplaceConfig,
    token: String,
}

impl MarketplaceApiClient {
    /// Подключиться к площадке: проверка учётных данных и выпуск токена
    pub async fn connect(config: MarketplaceConfig) -> Result<Self> {
        if config.login.trim().is_empty() || config.password.trim().is_empty() {
            anyhow::bail!("Please provide valid login and password");
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        let token = fetch_token(&client, &config).await?;
        tracing::info!("Connected to {}", config.domain());

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Служебный заголовок, общий для всех операций
    fn header_message(&self) -> Value {
        json!({
            "Context": {
                "SiteID": 100,
                "CatalogID": 1,
            },
            "Localization": {
                "Country": "Fr",
            },
            "Security": {
                "IssuerID": null,
                "SessionID": null,
                "TokenId": self.token,
                "UserName": "",
            },
            "Version": 1.0,
        })
    }

    /// Вызвать удалённую операцию.
    ///
    /// При ответе 401/403 токен выпускается заново и запрос отправляется
    /// повторно, один раз.
    async fn call(&mut self, operation: &str, arguments: Value) -> Result<Value> {
        let response = self.send(operation, &arguments).await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            tracing::info!("Refreshing token...");
            self.token = fetch_token(&self.client, &self.config).await?;
            tracing::info!("Resending request...");
            let response = self.send(operation, &arguments).await?;
            return unwrap_response(operation, response).await;
        }

        unwrap_response(operation, response).await
    }

    async fn send(&self, operation: &str, arguments: &Value) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.config.service_url(), operation);

        let mut payload = json!({ "headerMessage": self.header_message() });
        if let (Some(body), Some(extra)) = (payload.as_object_mut(), arguments.as_object()) {
            for (key, value) in extra {
                body.insert(key.clone(), value.clone());
            }
        }

        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(&payload).send().await?;
        Ok(response)
    }

    /// Информация о продавце
    pub async fn get_seller_info(&mut self) -> Result<Value> {
        self.call("GetSellerInformation", json!({})).await
    }

    /// Показатели эффективности продавца
    pub async fn get_seller_indicators(&mut self) -> Result<Value> {
        self.call("GetSellerIndicators", json!({})).await
    }

    /// Поиск офферов по фильтру (OfferPoolId, SKU и т.п.)
    pub async fn get_offer_list(&mut self, offer_filter: Value) -> Result<Value> {
        self.call("GetOfferList", json!({ "offerFilter": offer_filter }))
            .await
    }

    /// Товары категории
    pub async fn get_product_list(&mut self, category_code: &str) -> Result<Value> {
        self.call(
            "GetProductList",
            json!({ "productFilter": { "CategoryCode": category_code } }),
        )
        .await
    }

    /// Импорт офферов: площадке передаётся URL уже размещённого zip-пакета
    pub async fn submit_offer_package(&mut self, package_url: &str) -> Result<Value> {
        self.call(
            "SubmitOfferPackage",
            json!({ "offerPackageRequest": { "ZipFileFullPath": package_url } }),
        )
        .await
    }

    /// Импорт товаров: площадке передаётся URL уже размещённого zip-пакета
    pub async fn submit_product_package(&mut self, package_url: &str) -> Result<Value> {
        self.call(
            "SubmitProductPackage",
            json!({ "productPackageRequest": { "ZipFileFullPath": package_url } }),
        )
        .await
    }

    /// Ход обработки пакета офферов
    pub async fn get_offer_package_submission_result(
        &mut self,
        package_id: i64,
    ) -> Result<Value> {
        self.call(
            "GetOfferPackageSubmissionResult",
            json!({ "offerPackageFilter": { "PackageID": package_id } }),
        )
        .await
    }

    /// Ход обработки пакета товаров
    pub async fn get_product_package_submission_result(
        &mut self,
        package_id: i64,
    ) -> Result<Value> {
        self.call(
            "GetProductPackageSubmissionResult",
            json!({ "productPackageFilter": { "PackageID": package_id } }),
        )
        .await
    }
}

/// Выпустить токен доступа: basic auth, тело ответа — XML с текстом токена
async fn fetch_token(client: &reqwest::Client, config: &MarketplaceConfig) -> Result<String> {
    let response = client
        .get(config.auth_url())
        .basic_auth(&config.login, Some(&config.password))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Token request failed: {}", body);
        anyhow::bail!("Token request failed with status {}: {}", status, body);
    }

    let body = response.text().await?;
    extract_token_text(&body)
        .ok_or_else(|| anyhow::anyhow!("No token in authentication response"))
}

/// Текст единственного узла в XML-ответе сервиса токенов
fn extract_token_text(body: &str) -> Option<String> {
    let start = body.find('>')? + 1;
    let end = body.rfind('<')?;
    if end <= start {
        return None;
    }
    let token = body[start..end].trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

async fn unwrap_response(operation: &str, response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("{} failed: {}", operation, body);
        anyhow::bail!("{} failed with status {}: {}", operation, status, body);
    }

    let body = response.text().await?;

    let preview: String = body.chars().take(500).collect();
    let preview = if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    };
    tracing::debug!("{} response preview: {}", operation, preview);

    Ok(serde_json::from_str(&body)?)
}
