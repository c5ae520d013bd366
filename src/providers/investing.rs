use crate::country::Country;
use crate::error::{Error, Result};
use crate::market_data::{MarketDataProvider, OhlcRecord, OverviewRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Textual date format the remote source requires for range queries.
const SOURCE_DATE_FORMAT: &str = "%d/%m/%Y";

// InvestingProvider implementation for MarketDataProvider
pub struct InvestingProvider {
    base_url: String,
}

impl InvestingProvider {
    pub fn new(base_url: &str) -> Self {
        InvestingProvider {
            base_url: base_url.to_string(),
        }
    }

    fn client(&self) -> Result<reqwest::Client> {
        Ok(reqwest::Client::builder().user_agent("idx/1.0").build()?)
    }
}

#[derive(Deserialize, Debug)]
struct IndicesResponse {
    indices: Vec<IndexItem>,
}

#[derive(Deserialize, Debug)]
struct IndexItem {
    name: String,
}

#[derive(Deserialize, Debug)]
struct HistoryResponse {
    data: Vec<OhlcRecord>,
}

#[derive(Deserialize, Debug)]
struct OverviewResponse {
    overview: Vec<OverviewRecord>,
}

#[async_trait]
impl MarketDataProvider for InvestingProvider {
    #[instrument(name = "ListIndices", skip(self), fields(country = %country))]
    async fn list_indices(&self, country: Country) -> Result<Vec<String>> {
        let url = format!("{}/indices", self.base_url);
        debug!("Requesting index list from {}", url);

        let response = self
            .client()?
            .get(&url)
            .query(&[("country", country.source_name())])
            .send()
            .await
            .map_err(|e| Error::Remote(format!("Request error: {e} for country: {country}")))?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "HTTP error: {} for country: {}",
                response.status(),
                country
            )));
        }

        let text = response.text().await?;
        let data: IndicesResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Remote(format!("Failed to parse index list for {country}: {e}")))?;

        Ok(data.indices.into_iter().map(|item| item.name).collect())
    }

    #[instrument(
        name = "FetchHistory",
        skip(self),
        fields(index = %index, country = %country)
    )]
    async fn fetch_history(
        &self,
        index: &str,
        country: Country,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OhlcRecord>> {
        let url = format!("{}/indices/history", self.base_url);
        let from_str = from.format(SOURCE_DATE_FORMAT).to_string();
        let to_str = to.format(SOURCE_DATE_FORMAT).to_string();
        debug!("Requesting historical data from {}", url);

        let response = self
            .client()?
            .get(&url)
            .query(&[
                ("index", index),
                ("country", country.source_name()),
                ("from", &from_str),
                ("to", &to_str),
            ])
            .send()
            .await
            .map_err(|e| Error::Remote(format!("Request error: {e} for index: {index}")))?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "HTTP error: {} for index: {}",
                response.status(),
                index
            )));
        }

        let text = response.text().await?;
        let data: HistoryResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Remote(format!("Failed to parse history for {index}: {e}")))?;

        Ok(data.data)
    }

    #[instrument(name = "FetchOverview", skip(self), fields(country = %country))]
    async fn fetch_overview(&self, country: Country) -> Result<Vec<OverviewRecord>> {
        let url = format!("{}/stocks/overview", self.base_url);
        debug!("Requesting stocks overview from {}", url);

        let response = self
            .client()?
            .get(&url)
            .query(&[("country", country.source_name())])
            .send()
            .await
            .map_err(|e| Error::Remote(format!("Request error: {e} for country: {country}")))?;

        if !response.status().is_success() {
            return Err(Error::Remote(format!(
                "HTTP error: {} for country: {}",
                response.status(),
                country
            )));
        }

        let text = response.text().await?;
        let data: OverviewResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Remote(format!("Failed to parse overview for {country}: {e}")))?;

        Ok(data.overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_indices_preserves_source_order() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "indices": [
                {"name": "AEX"},
                {"name": "AMX"},
                {"name": "AScX"}
            ]
        }"#;

        Mock::given(method("GET"))
            .and(path("/indices"))
            .and(query_param("country", "netherlands"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = InvestingProvider::new(&mock_server.uri());
        let names = provider.list_indices(Country::Netherlands).await.unwrap();
        assert_eq!(names, vec!["AEX", "AMX", "AScX"]);
    }

    #[tokio::test]
    async fn test_fetch_history_submits_source_date_format() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "data": [
                {"date": "2021-08-02", "open": 760.1, "high": 765.2, "low": 758.0, "close": 764.3},
                {"date": "2021-08-03", "open": 764.5, "high": 770.0, "low": 763.1, "close": 768.9}
            ]
        }"#;

        Mock::given(method("GET"))
            .and(path("/indices/history"))
            .and(query_param("index", "AEX"))
            .and(query_param("country", "netherlands"))
            .and(query_param("from", "01/08/2021"))
            .and(query_param("to", "31/08/2021"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = InvestingProvider::new(&mock_server.uri());
        let bars = provider
            .fetch_history(
                "AEX",
                Country::Netherlands,
                NaiveDate::from_ymd_opt(2021, 8, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 8, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2021, 8, 2).unwrap());
        assert_eq!(bars[0].open, 760.1);
        assert_eq!(bars[1].close, 768.9);
    }

    #[tokio::test]
    async fn test_fetch_overview_parses_records() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "overview": [
                {"symbol": "asml", "name": "ASML Holding", "last": 645.2,
                 "change": "+4.10", "change_percentage": "+0.64%"},
                {"symbol": "PHIA", "name": "Philips", "last": 40.1,
                 "change": "-0.32", "change_percentage": "-0.79%"}
            ]
        }"#;

        Mock::given(method("GET"))
            .and(path("/stocks/overview"))
            .and(query_param("country", "netherlands"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = InvestingProvider::new(&mock_server.uri());
        let overview = provider.fetch_overview(Country::Netherlands).await.unwrap();
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].symbol, "asml");
        assert_eq!(overview[1].change, "-0.32");
    }

    #[tokio::test]
    async fn test_remote_http_error_propagates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/indices"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = InvestingProvider::new(&mock_server.uri());
        let result = provider.list_indices(Country::Germany).await;
        assert!(matches!(result, Err(Error::Remote(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Remote source error: HTTP error: 500 Internal Server Error for country: germany"
        );
    }

    #[tokio::test]
    async fn test_malformed_response_is_a_remote_error() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{"indexes": []}"#; // "indexes" instead of "indices"

        Mock::given(method("GET"))
            .and(path("/indices"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let provider = InvestingProvider::new(&mock_server.uri());
        let result = provider.list_indices(Country::Netherlands).await;
        assert!(matches!(result, Err(Error::Remote(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse index list for netherlands")
        );
    }
}
