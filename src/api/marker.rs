use std::collections::HashSet;
use std::num::NonZeroU32;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{require_id, ApiClient};
use crate::error::{ClientError, ErrorCode};
use crate::models::{Marker, Page};

/// Query parameters scoping a listing, e.g. `item_id` and `fields`.
pub type RequestData = Vec<(&'static str, String)>;

/// Listing response of a marker-based endpoint.
#[derive(Debug, Deserialize)]
struct MarkerResponse<T> {
    #[serde(default = "Vec::new")]
    entries: Vec<T>,
    #[serde(default)]
    next_marker: Option<String>,
    #[serde(default)]
    total_count: Option<u64>,
}

/// Pages through a listing by echoing back the server's `next_marker`.
#[derive(Debug, Clone)]
pub struct MarkerBasedApi {
    client: ApiClient,
}

impl MarkerBasedApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Fetch one page.
    ///
    /// `resource_id` names the object the listing belongs to and must not be
    /// empty. An unset `limit` leaves the page size to the server.
    pub async fn marker_get<T: DeserializeOwned>(
        &self,
        code: ErrorCode,
        url: &str,
        resource_id: &str,
        request_data: &RequestData,
        limit: Option<NonZeroU32>,
        marker: Option<&Marker>,
    ) -> Result<Page<T>, ClientError> {
        require_id(resource_id, "resource")?;

        let mut req = self.client.request(Method::GET, url).query(request_data);
        if let Some(limit) = limit {
            req = req.query(&[("limit", limit.get())]);
        }
        if let Some(marker) = marker {
            req = req.query(&[("marker", marker.as_str())]);
        }

        let response: MarkerResponse<T> = self.client.send_json(code, req).await?;
        let total_count = response
            .total_count
            .map(|n| n as usize)
            .unwrap_or(response.entries.len());
        Ok(Page {
            total_count,
            server_total_count: response.total_count,
            marker: Marker::from_wire(response.next_marker),
            entries: response.entries,
        })
    }

    /// Fetch every page and concatenate the entries in server order.
    pub async fn marker_get_all<T: DeserializeOwned>(
        &self,
        code: ErrorCode,
        url: &str,
        resource_id: &str,
        request_data: &RequestData,
        limit: Option<NonZeroU32>,
    ) -> Result<Page<T>, ClientError> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        let mut marker: Option<Marker> = None;
        let mut server_total_count = None;

        loop {
            let page: Page<T> = self
                .marker_get(code, url, resource_id, request_data, limit, marker.as_ref())
                .await?;
            server_total_count = page.server_total_count.or(server_total_count);
            entries.extend(page.entries);

            match page.marker {
                Some(next) => {
                    if !seen.insert(next.clone()) {
                        return Err(ClientError::RepeatedMarker { code });
                    }
                    tracing::trace!(fetched = entries.len(), "Following next marker");
                    marker = Some(next);
                }
                None => break,
            }
        }

        Ok(Page {
            total_count: entries.len(),
            server_total_count,
            marker: None,
            entries,
        })
    }
}
