//! Task Endpoints
//!
//! CRUD, search and bulk operations on `/tasks`.

use reqwest::Method;

use super::{page_query, ApiClient, ApiError, Result};
use crate::models::{
    BulkDeleteRequest, BulkDeleteResponse, Task, TaskCreate, TaskListResponse, TaskSearchParams,
    TaskUpdate, DESCRIPTION_MAX_LEN, TITLE_MAX_LEN,
};

// ========================
// Validation
// ========================

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "Title must be {} characters or less",
            TITLE_MAX_LEN
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(ApiError::Validation(format!(
            "Description must be {} characters or less",
            DESCRIPTION_MAX_LEN
        )));
    }
    Ok(())
}

pub fn validate_create(fields: &TaskCreate) -> Result<()> {
    validate_title(&fields.title)?;
    if let Some(description) = &fields.description {
        validate_description(description)?;
    }
    Ok(())
}

/// Only the fields present in the update are checked.
pub fn validate_update(fields: &TaskUpdate) -> Result<()> {
    if let Some(title) = &fields.title {
        validate_title(title)?;
    }
    if let Some(description) = &fields.description {
        validate_description(description)?;
    }
    Ok(())
}

// ========================
// Endpoints
// ========================

impl ApiClient {
    /// `GET /tasks/?skip=&limit=`
    pub async fn list_tasks(&self, skip: u32, limit: u32) -> Result<TaskListResponse> {
        self.get("/tasks/", page_query(skip, limit)).await
    }

    pub async fn get_task(&self, id: u32) -> Result<Task> {
        self.get(&format!("/tasks/{}", id), Vec::new()).await
    }

    pub async fn create_task(&self, fields: &TaskCreate) -> Result<Task> {
        validate_create(fields)?;
        self.send_json(Method::POST, "/tasks", Some(fields)).await
    }

    pub async fn update_task(&self, id: u32, fields: &TaskUpdate) -> Result<Task> {
        validate_update(fields)?;
        self.send_json(Method::PUT, &format!("/tasks/{}", id), Some(fields))
            .await
    }

    /// Soft delete. Deleting an already deleted id fails with `NotFound`.
    pub async fn delete_task(&self, id: u32) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/tasks/{}", id)).await
    }

    pub async fn bulk_delete_tasks(&self, ids: &[u32]) -> Result<BulkDeleteResponse> {
        if ids.is_empty() {
            return Err(ApiError::Validation("No tasks selected".into()));
        }
        let request = BulkDeleteRequest { task_ids: ids.to_vec() };
        self.send_json(Method::DELETE, "/tasks/bulk", Some(&request))
            .await
    }

    /// `GET /tasks/search?title=&is_completed=&page=&size=`
    pub async fn search_tasks(&self, params: &TaskSearchParams) -> Result<TaskListResponse> {
        self.get("/tasks/search", params.to_query()).await
    }

    pub async fn get_completed_tasks(&self, skip: u32, limit: u32) -> Result<Vec<Task>> {
        self.get("/tasks/completed/list", page_query(skip, limit)).await
    }

    pub async fn get_pending_tasks(&self, skip: u32, limit: u32) -> Result<Vec<Task>> {
        self.get("/tasks/pending/list", page_query(skip, limit)).await
    }

    /// Undo a soft delete.
    pub async fn restore_task(&self, id: u32) -> Result<Task> {
        self.send_json::<(), _>(Method::POST, &format!("/tasks/{}/restore", id), None)
            .await
    }

    pub async fn toggle_task_completion(&self, id: u32, is_completed: bool) -> Result<Task> {
        self.update_task(id, &TaskUpdate::completion(is_completed)).await
    }

    pub async fn update_task_title(&self, id: u32, title: &str) -> Result<Task> {
        self.update_task(id, &TaskUpdate::title(title)).await
    }

    pub async fn update_task_description(&self, id: u32, description: &str) -> Result<Task> {
        self.update_task(id, &TaskUpdate::description(description)).await
    }
}
