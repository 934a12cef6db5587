use std::num::NonZeroU32;

use reqwest::Method;

use super::{require_id, ApiClient, MarkerBasedApi, RequestData};
use crate::error::{ClientError, ErrorCode};
use crate::models::{map_app_activity_item, AppActivityItem, Marker, Page, RawAppActivity};

/// Fields requested for each app activity entry.
pub const APP_ACTIVITY_FIELDS_TO_FETCH: [&str; 5] = [
    "activity_template",
    "app",
    "created_by",
    "occurred_at",
    "rendered_text",
];

/// Client for the App Activity API.
#[derive(Debug, Clone)]
pub struct AppActivityApi {
    api: MarkerBasedApi,
}

impl AppActivityApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            api: MarkerBasedApi::new(client),
        }
    }

    pub fn client(&self) -> &ApiClient {
        self.api.client()
    }

    /// URL for all app activity.
    pub fn url(&self) -> String {
        format!("{}/app_activities", self.client().base_api_url())
    }

    /// URL for deleting one app activity item.
    pub fn delete_url(&self, id: &str) -> Result<String, ClientError> {
        let id = require_id(id, "app activity")?;
        Ok(format!("{}/{}", self.url(), id))
    }

    /// Query scoping the listing to one file.
    pub fn request_data(file_id: &str) -> RequestData {
        vec![
            ("item_id", file_id.to_string()),
            ("item_type", "file".to_string()),
            ("fields", APP_ACTIVITY_FIELDS_TO_FETCH.join(",")),
        ]
    }

    /// Fetch one page of app activity on a file.
    ///
    /// The returned `total_count` is the number of entries in this page. The
    /// server's own figure, if any, is left in `server_total_count`.
    pub async fn get_app_activity(
        &self,
        file_id: &str,
        limit: Option<NonZeroU32>,
        marker: Option<&Marker>,
    ) -> Result<Page<AppActivityItem>, ClientError> {
        let page: Page<RawAppActivity> = self
            .api
            .marker_get(
                ErrorCode::FetchAppActivity,
                &self.url(),
                file_id,
                &Self::request_data(file_id),
                limit,
                marker,
            )
            .await?;
        Ok(map_page(page))
    }

    /// Fetch app activity on a file across all pages.
    pub async fn get_all_app_activity(
        &self,
        file_id: &str,
        limit: Option<NonZeroU32>,
    ) -> Result<Page<AppActivityItem>, ClientError> {
        let page: Page<RawAppActivity> = self
            .api
            .marker_get_all(
                ErrorCode::FetchAppActivity,
                &self.url(),
                file_id,
                &Self::request_data(file_id),
                limit,
            )
            .await?;
        Ok(map_page(page))
    }

    /// Delete one app activity item from a file.
    pub async fn delete_app_activity(
        &self,
        file_id: &str,
        item_id: &str,
    ) -> Result<(), ClientError> {
        require_id(file_id, "file")?;
        let url = self.delete_url(item_id)?;

        tracing::debug!(file_id, item_id, "Deleting app activity");
        let req = self.client().request(Method::DELETE, &url);
        self.client()
            .send_empty(ErrorCode::DeleteAppActivity, req)
            .await
    }
}

fn map_page(page: Page<RawAppActivity>) -> Page<AppActivityItem> {
    let mut page = page.map(map_app_activity_item);
    page.total_count = page.entries.len();
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn api() -> AppActivityApi {
        AppActivityApi::new(ApiClient::new(ClientConfig::default()))
    }

    #[test]
    fn test_url() {
        assert_eq!(api().url(), "https://api.box.com/2.0/app_activities");
    }

    #[test]
    fn test_delete_url_requires_id() {
        let err = api().delete_url("").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_delete_url() {
        assert_eq!(
            api().delete_url("ACTIVITY_ID").unwrap(),
            "https://api.box.com/2.0/app_activities/ACTIVITY_ID"
        );
    }

    #[test]
    fn test_request_data() {
        let data = AppActivityApi::request_data("987654321");
        assert_eq!(
            data,
            vec![
                ("item_id", "987654321".to_string()),
                ("item_type", "file".to_string()),
                (
                    "fields",
                    "activity_template,app,created_by,occurred_at,rendered_text".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_page_total_count_is_page_size() {
        let raw = Page {
            entries: Vec::<RawAppActivity>::new(),
            marker: None,
            total_count: 40,
            server_total_count: Some(40),
        };
        let page = map_page(raw);
        assert_eq!(page.total_count, 0);
        assert_eq!(page.server_total_count, Some(40));
    }
}
