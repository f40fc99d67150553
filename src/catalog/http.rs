//! # HTTP catalogue
//!
//! Fetches a JSON array of [`ObjectRecord`]s with a shared [`reqwest::Client`]:
//!
//! ```json
//! [
//!   {"id": "sirius", "name": "Sirius", "type": "star", "magnitude": -1.46,
//!    "ra": 101.287, "dec": -16.716, "tag": "A"}
//! ]
//! ```
//!
//! The client is built once with a 10 s connect timeout and a 30 s overall request
//! timeout, and can be cloned cheaply between catalogues.
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::catalog::{records_into_objects, CatalogProvider, ObjectRecord};
use crate::celestial::CelestialObject;
use crate::skymap_errors::SkyMapError;

/// Connection establishment timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Whole request timeout, body included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse a JSON catalogue document.
pub fn parse_objects_json(body: &str) -> Result<Vec<CelestialObject>, SkyMapError> {
    let records: Vec<ObjectRecord> = serde_json::from_str(body)?;
    records_into_objects(records)
}

/// Catalogue served as JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    /// Build a catalogue with its own client.
    pub fn new(url: impl Into<String>) -> Result<Self, SkyMapError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, url))
    }

    /// Build a catalogue sharing an existing client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        HttpCatalog {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get_body(&self) -> Result<String, SkyMapError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SkyMapError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        Ok(response.text().await?)
    }
}

impl CatalogProvider for HttpCatalog {
    async fn load_objects(&self) -> Result<Vec<CelestialObject>, SkyMapError> {
        let body = self.get_body().await?;
        debug!(url = %self.url, bytes = body.len(), "fetched catalogue");
        parse_objects_json(&body)
    }
}

#[cfg(test)]
mod http_test {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const BODY: &str = r#"[
        {"id": "sirius", "name": "Sirius", "type": "star", "magnitude": -1.46,
         "ra": 101.287, "dec": -16.716, "tag": "A"},
        {"id": "jupiter", "name": "Jupiter", "type": "planet", "magnitude": -2.2,
         "ra": 230.0, "dec": -5.0, "diameter_km": 139820.0}
    ]"#;

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}/catalog.json")
    }

    #[test]
    fn test_parse_objects_json() {
        let objects = parse_objects_json(BODY).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1].name(), "Jupiter");
        assert!(objects[1].is_solar_system_body());

        assert!(matches!(
            parse_objects_json("{\"id\": 1}"),
            Err(SkyMapError::JsonError(_))
        ));
    }

    #[tokio::test]
    async fn test_http_catalog_fetch() {
        let url = serve_once("HTTP/1.1 200 OK", BODY).await;
        let catalog = HttpCatalog::new(url).unwrap();
        let objects = catalog.load_objects().await.unwrap();
        assert_eq!(objects[0].id(), "sirius");
    }

    #[tokio::test]
    async fn test_http_catalog_status_error() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "").await;
        let catalog = HttpCatalog::new(url.clone()).unwrap();
        assert_eq!(
            catalog.load_objects().await.unwrap_err(),
            SkyMapError::HttpStatus { status: 503, url }
        );
    }
}
