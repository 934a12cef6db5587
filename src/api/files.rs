//! File-scoped listings that arrive in a single response.

use reqwest::Method;

use super::{require_id, ApiClient};
use crate::error::{ClientError, ErrorCode};
use crate::models::{Collection, Comment, Task, VersionEvent};

pub const COMMENTS_FIELDS_TO_FETCH: [&str; 7] = [
    "tagged_message",
    "message",
    "created_at",
    "created_by",
    "modified_at",
    "permissions",
    "is_reply_comment",
];

pub const TASKS_FIELDS_TO_FETCH: [&str; 5] = [
    "message",
    "created_at",
    "created_by",
    "due_at",
    "task_assignment_collection",
];

pub const VERSIONS_FIELDS_TO_FETCH: [&str; 5] = [
    "version_number",
    "created_at",
    "modified_by",
    "trashed_at",
    "action",
];

async fn get_file_collection<T: serde::de::DeserializeOwned>(
    client: &ApiClient,
    code: ErrorCode,
    file_id: &str,
    resource: &str,
    fields: &[&str],
) -> Result<Collection<T>, ClientError> {
    let file_id = require_id(file_id, "file")?;
    let url = format!("{}/files/{}/{}", client.base_api_url(), file_id, resource);
    let req = client
        .request(Method::GET, &url)
        .query(&[("fields", fields.join(","))]);
    client.send_json(code, req).await
}

async fn delete_by_id(
    client: &ApiClient,
    code: ErrorCode,
    file_id: &str,
    resource: &str,
    id: &str,
) -> Result<(), ClientError> {
    require_id(file_id, "file")?;
    let id = require_id(id, resource.trim_end_matches('s'))?;
    let url = format!("{}/{}/{}", client.base_api_url(), resource, id);
    tracing::debug!(file_id, id, resource, "Deleting feed item");
    client
        .send_empty(code, client.request(Method::DELETE, &url))
        .await
}

#[derive(Debug, Clone)]
pub struct CommentsApi {
    client: ApiClient,
}

impl CommentsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_comments(&self, file_id: &str) -> Result<Collection<Comment>, ClientError> {
        get_file_collection(
            &self.client,
            ErrorCode::FetchComments,
            file_id,
            "comments",
            &COMMENTS_FIELDS_TO_FETCH,
        )
        .await
    }

    pub async fn delete_comment(&self, file_id: &str, comment_id: &str) -> Result<(), ClientError> {
        delete_by_id(
            &self.client,
            ErrorCode::DeleteComment,
            file_id,
            "comments",
            comment_id,
        )
        .await
    }
}

#[derive(Debug, Clone)]
pub struct TasksApi {
    client: ApiClient,
}

impl TasksApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_tasks(&self, file_id: &str) -> Result<Collection<Task>, ClientError> {
        get_file_collection(
            &self.client,
            ErrorCode::FetchTasks,
            file_id,
            "tasks",
            &TASKS_FIELDS_TO_FETCH,
        )
        .await
    }

    pub async fn delete_task(&self, file_id: &str, task_id: &str) -> Result<(), ClientError> {
        delete_by_id(&self.client, ErrorCode::DeleteTask, file_id, "tasks", task_id).await
    }
}

#[derive(Debug, Clone)]
pub struct VersionsApi {
    client: ApiClient,
}

impl VersionsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_versions(
        &self,
        file_id: &str,
    ) -> Result<Collection<VersionEvent>, ClientError> {
        get_file_collection(
            &self.client,
            ErrorCode::FetchVersions,
            file_id,
            "versions",
            &VERSIONS_FIELDS_TO_FETCH,
        )
        .await
    }
}
