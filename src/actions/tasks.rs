//! Task Actions

use super::Dispatcher;
use crate::api::{ApiError, Result};
use crate::models::{BulkDeleteResponse, Task, TaskCreate, TaskListResponse, TaskSearchParams, TaskUpdate};
use crate::state::{MetricsAdjustment, MetricsState, StateCell, TasksState};

impl<T, M> Dispatcher<T, M>
where
    T: StateCell<TasksState>,
    M: StateCell<MetricsState>,
{
    pub async fn load_tasks(&self, skip: u32, limit: u32) -> Result<TaskListResponse> {
        let api = self.api.clone();
        self.settle_tasks(async move { api.list_tasks(skip, limit).await }, |state, page| {
            state.apply_page(page.clone())
        })
        .await
    }

    /// Newest tasks for a read-only preview. The store is not touched.
    pub async fn recent_tasks(&self, limit: u32) -> Result<Vec<Task>> {
        Ok(self.api.list_tasks(0, limit).await?.tasks)
    }

    /// Record the page choice, then load that page.
    pub async fn load_page(&self, page: u32, size: u32) -> Result<TaskListResponse> {
        self.tasks.apply(|state| state.set_pagination(page, size));
        let (page, size) = self.tasks.peek(TasksState::pagination);
        self.load_tasks((page - 1).saturating_mul(size), size).await
    }

    pub async fn load_task(&self, id: u32) -> Result<Task> {
        let api = self.api.clone();
        self.settle_tasks(async move { api.get_task(id).await }, |state, task| {
            state.apply_fetched(task.clone())
        })
        .await
    }

    pub async fn search_tasks(&self, params: TaskSearchParams) -> Result<TaskListResponse> {
        let api = self.api.clone();
        self.settle_tasks(async move { api.search_tasks(&params).await }, |state, page| {
            state.apply_page(page.clone())
        })
        .await
    }

    /// Search with the filter currently held in the store.
    pub async fn search_current(&self) -> Result<TaskListResponse> {
        let params = self.tasks.peek(|state| state.search_params.clone());
        self.search_tasks(params).await
    }

    /// Move the filtered view to another page and fetch it.
    pub async fn go_to_page(&self, page: u32, size: u32) -> Result<TaskListResponse> {
        self.tasks.apply(|state| {
            state.set_pagination(page, size);
            let (page, size) = state.pagination();
            state.set_search_params(TaskSearchParams {
                title: None,
                is_completed: None,
                page: Some(page),
                size: Some(size),
            });
        });
        self.search_current().await
    }

    /// Replace the whole filter, go back to page one and fetch. Unset fields
    /// are cleared rather than kept.
    pub async fn apply_filter(
        &self,
        title: Option<String>,
        is_completed: Option<bool>,
    ) -> Result<TaskListResponse> {
        self.tasks.apply(|state| {
            let size = state.page_size;
            state.clear_search();
            state.set_search_params(TaskSearchParams {
                title,
                is_completed,
                page: Some(1),
                size: Some(size),
            });
            state.set_pagination(1, size);
        });
        self.search_current().await
    }

    pub async fn create_task(&self, fields: TaskCreate) -> Result<Task> {
        let api = self.api.clone();
        let created = self
            .settle_tasks(async move { api.create_task(&fields).await }, |state, task| {
                state.apply_created(task.clone())
            })
            .await?;
        self.follow_up(MetricsAdjustment::TaskCreated);
        Ok(created)
    }

    pub async fn update_task(&self, id: u32, changes: TaskUpdate) -> Result<Task> {
        let was_completed = self
            .tasks
            .peek(|state| state.find(id).map(|t| t.is_completed));
        let api = self.api.clone();
        let updated = self
            .settle_tasks(async move { api.update_task(id, &changes).await }, |state, task| {
                state.apply_updated(task.clone())
            })
            .await?;
        self.follow_up(completion_adjustment(was_completed, updated.is_completed));
        Ok(updated)
    }

    /// Flip completion locally first, then reconcile with the server's copy.
    ///
    /// The local flip is not rolled back when the request fails.
    pub async fn toggle_task(&self, id: u32) -> Result<Task> {
        let Some(was_completed) = self
            .tasks
            .peek(|state| state.find(id).map(|t| t.is_completed))
        else {
            let err = ApiError::NotFound(format!("Task {} is not loaded", id));
            self.tasks.apply(|state| state.fail(err.to_string()));
            return Err(err);
        };

        let changes = TaskUpdate::completion(!was_completed);
        self.tasks.apply(|state| state.update_in_list(id, &changes));

        let api = self.api.clone();
        let updated = self
            .settle_tasks(async move { api.update_task(id, &changes).await }, |state, task| {
                state.apply_updated(task.clone())
            })
            .await?;
        self.follow_up(completion_adjustment(Some(was_completed), updated.is_completed));
        Ok(updated)
    }

    pub async fn delete_task(&self, id: u32) -> Result<()> {
        let api = self.api.clone();
        self.settle_tasks(async move { api.delete_task(id).await }, |state, _| {
            state.apply_deleted(id)
        })
        .await?;
        self.follow_up(MetricsAdjustment::TaskDeleted);
        Ok(())
    }

    pub async fn bulk_delete_tasks(&self, ids: Vec<u32>) -> Result<BulkDeleteResponse> {
        let api = self.api.clone();
        let request_ids = ids.clone();
        let response = self
            .settle_tasks(async move { api.bulk_delete_tasks(&request_ids).await }, |state, response| {
                state.apply_bulk_deleted(&ids, response.deleted_count)
            })
            .await?;
        for _ in 0..response.deleted_count {
            self.follow_up(MetricsAdjustment::TaskDeleted);
        }
        Ok(response)
    }

    pub async fn bulk_delete_selected(&self) -> Result<BulkDeleteResponse> {
        let ids = self.tasks.peek(|state| state.selected_tasks.clone());
        self.bulk_delete_tasks(ids).await
    }

    pub async fn restore_task(&self, id: u32) -> Result<Task> {
        let api = self.api.clone();
        self.settle_tasks(async move { api.restore_task(id).await }, |state, task| {
            state.apply_restored(task.clone())
        })
        .await
    }

    // ========================
    // Synchronous store edits
    // ========================

    pub fn toggle_selection(&self, id: u32) {
        self.tasks.apply(|state| state.toggle_selection(id));
    }

    pub fn select_all(&self) {
        self.tasks.apply(TasksState::select_all);
    }

    pub fn clear_selection(&self) {
        self.tasks.apply(TasksState::clear_selection);
    }

    pub fn set_search_params(&self, params: TaskSearchParams) {
        self.tasks.apply(|state| state.set_search_params(params));
    }

    pub fn clear_search(&self) {
        self.tasks.apply(TasksState::clear_search);
    }

    pub fn set_pagination(&self, page: u32, size: u32) {
        self.tasks.apply(|state| state.set_pagination(page, size));
    }

    pub fn clear_tasks_error(&self) {
        self.tasks.apply(TasksState::clear_error);
    }
}

fn completion_adjustment(was_completed: Option<bool>, now_completed: bool) -> MetricsAdjustment {
    if now_completed && was_completed != Some(true) {
        MetricsAdjustment::TaskCompleted
    } else {
        MetricsAdjustment::TaskModified
    }
}
