//! Batch resource-provider operations: tasks under a workitem's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ListResult, MgmtClient, MgmtResponse};
use crate::error::Result;

/// A batch task, as the service returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CloudTask {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub command_line: Option<String>,
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub environment_settings: Vec<EnvironmentSetting>,
}

/// One name/value pair in a task's environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentSetting {
    pub name: String,
    pub value: String,
}

/// Body of a task creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateRequest {
    pub name: String,
    pub command_line: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment_settings: Vec<EnvironmentSetting>,
}

/// Optional selectors for a task listing.
#[derive(Debug, Clone, Default)]
pub struct TaskListOptions {
    /// Free-form `$filter` expression, passed through uninterpreted.
    pub filter: Option<String>,
    pub max_count: Option<u32>,
}

/// Handler for batch task calls.
pub struct TaskHandler {
    client: MgmtClient,
}

impl TaskHandler {
    pub fn new(client: MgmtClient) -> Self {
        Self { client }
    }

    fn tasks_path(account: &str, workitem: &str, job: &str) -> String {
        format!("batch/accounts/{account}/workitems/{workitem}/jobs/{job}/tasks")
    }

    pub async fn list(
        &self,
        account: &str,
        workitem: &str,
        job: &str,
        options: &TaskListOptions,
    ) -> Result<MgmtResponse<Vec<CloudTask>>> {
        let path = Self::tasks_path(account, workitem, job);
        let mut query = Vec::new();
        if let Some(ref filter) = options.filter {
            query.push(("$filter", filter.clone()));
        }
        if let Some(max_count) = options.max_count {
            query.push(("maxresults", max_count.to_string()));
        }
        let response: MgmtResponse<ListResult<CloudTask>> =
            self.client.get_json(&path, &query).await?;
        Ok(MgmtResponse {
            body: response.body.value,
            status: response.status,
            request_id: response.request_id,
        })
    }

    pub async fn get(
        &self,
        account: &str,
        workitem: &str,
        job: &str,
        name: &str,
    ) -> Result<MgmtResponse<CloudTask>> {
        let path = format!("{}/{}", Self::tasks_path(account, workitem, job), name);
        self.client.get_json(&path, &[]).await
    }

    pub async fn create(
        &self,
        account: &str,
        workitem: &str,
        job: &str,
        request: &TaskCreateRequest,
    ) -> Result<MgmtResponse<CloudTask>> {
        let path = Self::tasks_path(account, workitem, job);
        self.client.post_json(&path, request).await
    }

    pub async fn delete(
        &self,
        account: &str,
        workitem: &str,
        job: &str,
        name: &str,
    ) -> Result<MgmtResponse<()>> {
        let path = format!("{}/{}", Self::tasks_path(account, workitem, job), name);
        self.client.delete(&path).await
    }
}
