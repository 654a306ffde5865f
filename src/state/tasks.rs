//! Task Store State
//!
//! Current page of tasks, selection set, pagination and search filter.
//! Every reducer leaves the task list untouched on failure.

use reactive_stores::Store;

use crate::models::{Task, TaskListResponse, TaskSearchParams, TaskUpdate};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Clone, Debug, PartialEq, Store)]
pub struct TasksState {
    /// Current page, server order (newest first)
    pub tasks: Vec<Task>,
    /// Selected ids, insertion ordered, no duplicates
    pub selected_tasks: Vec<u32>,
    /// Server-side total across all pages
    pub total: u32,
    pub current_page: u32,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub search_params: TaskSearchParams,
}

impl Default for TasksState {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            selected_tasks: Vec::new(),
            total: 0,
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            loading: false,
            error: None,
            search_params: TaskSearchParams::default(),
        }
    }
}

impl TasksState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Request lifecycle
    // ========================

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Request settled after its view was torn down.
    pub fn abandon(&mut self) {
        self.loading = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // ========================
    // Fulfilled reducers
    // ========================

    /// list / search: replace everything.
    pub fn apply_page(&mut self, page: TaskListResponse) {
        self.loading = false;
        self.tasks = page.tasks;
        self.total = page.total;
        self.current_page = page.page;
        self.page_size = page.size;
    }

    /// Single fetch: replace in place, or append when not on this page.
    pub fn apply_fetched(&mut self, task: Task) {
        self.loading = false;
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    pub fn apply_created(&mut self, task: Task) {
        self.loading = false;
        self.add_to_list(task);
    }

    /// Replace by id. An id not on the current page is ignored.
    pub fn apply_updated(&mut self, task: Task) {
        self.loading = false;
        if let Some(existing) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        }
    }

    pub fn apply_deleted(&mut self, id: u32) {
        self.loading = false;
        self.remove_from_list(id);
        self.selected_tasks.retain(|selected| *selected != id);
    }

    /// Drops every listed id and clears the whole selection.
    pub fn apply_bulk_deleted(&mut self, ids: &[u32], deleted_count: u32) {
        self.loading = false;
        self.tasks.retain(|t| !ids.contains(&t.id));
        self.total = self.total.saturating_sub(deleted_count);
        self.selected_tasks.clear();
    }

    pub fn apply_restored(&mut self, task: Task) {
        self.loading = false;
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => self.add_to_list(task),
        }
    }

    // ========================
    // Local list edits
    // ========================

    /// Prepend; an id already present is replaced rather than duplicated.
    pub fn add_to_list(&mut self, task: Task) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != task.id);
        if self.tasks.len() == before {
            self.total += 1;
        }
        self.tasks.insert(0, task);
    }

    pub fn remove_from_list(&mut self, id: u32) {
        self.tasks.retain(|t| t.id != id);
        self.total = self.total.saturating_sub(1);
    }

    /// Merge fields without touching the modification badge.
    pub fn optimistic_update(&mut self, id: u32, changes: &TaskUpdate) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.apply(changes);
        }
    }

    /// Merge fields and bump `modification_count` ahead of the server.
    pub fn update_in_list(&mut self, id: u32, changes: &TaskUpdate) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.apply(changes);
            task.modification_count += 1;
        }
    }

    // ========================
    // Filter / pagination
    // ========================

    /// Only the fields set in `params` change. Does not fetch.
    pub fn set_search_params(&mut self, params: TaskSearchParams) {
        self.search_params.merge(params);
    }

    pub fn clear_search(&mut self) {
        self.search_params = TaskSearchParams::default();
    }

    /// Does not fetch.
    pub fn set_pagination(&mut self, page: u32, size: u32) {
        self.current_page = page.max(1);
        self.page_size = size.max(1);
    }

    // ========================
    // Selection
    // ========================

    pub fn toggle_selection(&mut self, id: u32) {
        match self.selected_tasks.iter().position(|selected| *selected == id) {
            Some(index) => {
                self.selected_tasks.remove(index);
            }
            None => self.selected_tasks.push(id),
        }
    }

    /// Selects the loaded page only, not the full server-side result set.
    pub fn select_all(&mut self) {
        self.selected_tasks = self.tasks.iter().map(|t| t.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_tasks.clear();
    }

    // ========================
    // Selectors
    // ========================

    pub fn is_selected(&self, id: u32) -> bool {
        self.selected_tasks.contains(&id)
    }

    pub fn is_all_selected(&self) -> bool {
        !self.tasks.is_empty() && self.selected_tasks.len() == self.tasks.len()
    }

    pub fn is_partially_selected(&self) -> bool {
        !self.selected_tasks.is_empty() && self.selected_tasks.len() < self.tasks.len()
    }

    /// (page, size)
    pub fn pagination(&self) -> (u32, u32) {
        (self.current_page, self.page_size)
    }

    pub fn page_count(&self) -> u32 {
        self.total.div_ceil(self.page_size.max(1)).max(1)
    }

    pub fn completed_on_page(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    pub fn pending_on_page(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_completed).count()
    }

    pub fn find(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::make_task;
    use proptest::prelude::*;

    fn state_with(ids: &[u32]) -> TasksState {
        let mut state = TasksState::new();
        state.tasks = ids.iter().map(|id| make_task(*id, &format!("Task {}", id), false)).collect();
        state.total = ids.len() as u32;
        state
    }

    fn ids(state: &TasksState) -> Vec<u32> {
        state.tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_page_replaces_everything() {
        let mut state = state_with(&[1, 2, 3]);
        state.begin();
        state.apply_page(TaskListResponse {
            tasks: vec![make_task(9, "milk", false)],
            total: 31,
            page: 4,
            size: 10,
        });
        assert!(!state.loading);
        assert_eq!(ids(&state), vec![9]);
        assert_eq!(state.total, 31);
        assert_eq!(state.pagination(), (4, 10));
        assert_eq!(state.page_count(), 4);
    }

    #[test]
    fn test_created_is_prepended() {
        let mut state = state_with(&[1, 2]);
        state.apply_created(make_task(3, "Buy milk", false));
        assert_eq!(ids(&state), vec![3, 1, 2]);
        assert_eq!(state.total, 3);
    }

    #[test]
    fn test_created_with_existing_id_does_not_duplicate() {
        let mut state = state_with(&[1, 2]);
        state.apply_created(make_task(2, "again", false));
        assert_eq!(ids(&state), vec![2, 1]);
        assert_eq!(state.total, 2);
    }

    #[test]
    fn test_update_replaces_in_place_or_ignores() {
        let mut state = state_with(&[1, 2, 3]);
        state.apply_updated(make_task(2, "renamed", true));
        assert_eq!(state.tasks[1].title, "renamed");
        assert_eq!(ids(&state), vec![1, 2, 3]);

        let before = state.clone();
        state.apply_updated(make_task(99, "ghost", false));
        assert_eq!(state.tasks, before.tasks);
    }

    #[test]
    fn test_fetched_appends_when_absent() {
        let mut state = state_with(&[1]);
        state.apply_fetched(make_task(5, "five", false));
        assert_eq!(ids(&state), vec![1, 5]);
        state.apply_fetched(make_task(1, "one", true));
        assert!(state.tasks[0].is_completed);
    }

    #[test]
    fn test_delete_floors_total_at_zero() {
        let mut state = state_with(&[]);
        state.apply_deleted(4);
        assert_eq!(state.total, 0);
    }

    #[test]
    fn test_bulk_delete_uses_server_count() {
        let mut state = state_with(&[1, 2, 3, 4]);
        state.total = 40;
        state.selected_tasks = vec![1, 3, 4];
        state.apply_bulk_deleted(&[1, 3], 2);
        assert_eq!(ids(&state), vec![2, 4]);
        assert_eq!(state.total, 38);
        assert!(state.selected_tasks.is_empty());
    }

    #[test]
    fn test_failure_leaves_tasks_untouched() {
        let mut state = state_with(&[1, 2]);
        let before = state.tasks.clone();
        state.begin();
        state.fail("Network error: connection refused");
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network error: connection refused"));
        assert_eq!(state.tasks, before);
    }

    #[test]
    fn test_update_in_list_bumps_badge() {
        let mut state = state_with(&[1]);
        state.update_in_list(1, &TaskUpdate::completion(true));
        assert!(state.tasks[0].is_completed);
        assert_eq!(state.tasks[0].modification_count, 1);

        state.optimistic_update(1, &TaskUpdate::title("quiet"));
        assert_eq!(state.tasks[0].title, "quiet");
        assert_eq!(state.tasks[0].modification_count, 1);
    }

    #[test]
    fn test_restore_prepends_missing_task() {
        let mut state = state_with(&[1]);
        state.apply_restored(make_task(7, "back", false));
        assert_eq!(ids(&state), vec![7, 1]);
        assert_eq!(state.total, 2);
    }

    #[test]
    fn test_select_all_is_page_scoped() {
        let mut state = state_with(&[1, 2, 3]);
        state.total = 50;
        state.select_all();
        assert_eq!(state.selected_tasks, vec![1, 2, 3]);
        assert!(state.is_all_selected());
        assert!(!state.is_partially_selected());

        state.clear_selection();
        assert!(state.selected_tasks.is_empty());
    }

    #[test]
    fn test_selection_flags_on_empty_page() {
        let state = state_with(&[]);
        assert!(!state.is_all_selected());
        assert!(!state.is_partially_selected());
    }

    #[test]
    fn test_search_params_and_pagination_do_not_fetch() {
        let mut state = state_with(&[1]);
        state.set_search_params(TaskSearchParams {
            title: Some("milk".into()),
            is_completed: Some(false),
            page: None,
            size: None,
        });
        state.set_pagination(3, 25);
        assert_eq!(state.search_params.title.as_deref(), Some("milk"));
        assert_eq!(state.search_params.size, Some(10));
        assert_eq!(state.pagination(), (3, 25));
        assert!(!state.loading);

        state.clear_search();
        assert_eq!(state.search_params, TaskSearchParams::default());
    }

    #[test]
    fn test_page_counters() {
        let mut state = state_with(&[1, 2, 3]);
        state.tasks[0].is_completed = true;
        assert_eq!(state.completed_on_page(), 1);
        assert_eq!(state.pending_on_page(), 2);
    }

    fn unique_ids() -> impl Strategy<Value = Vec<u32>> {
        proptest::collection::btree_set(1u32..200, 0..30).prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_delete_removes_id_and_decrements(list in unique_ids(), target in 1u32..200, extra in 0u32..5) {
            let mut state = state_with(&list);
            state.total += extra;
            state.selected_tasks = list.clone();
            let total_before = state.total;

            state.apply_deleted(target);

            prop_assert!(state.tasks.iter().all(|t| t.id != target));
            prop_assert_eq!(state.total, total_before.saturating_sub(1));
            prop_assert!(!state.is_selected(target));
        }

        #[test]
        fn prop_bulk_delete_keeps_exactly_the_rest(list in unique_ids(), doomed in proptest::collection::vec(1u32..200, 1..10)) {
            let mut state = state_with(&list);
            state.selected_tasks = doomed.clone();

            state.apply_bulk_deleted(&doomed, doomed.len() as u32);

            let expected: Vec<u32> = list.iter().copied().filter(|id| !doomed.contains(id)).collect();
            prop_assert_eq!(ids(&state), expected);
            prop_assert!(state.selected_tasks.is_empty());
        }

        #[test]
        fn prop_toggle_twice_is_identity(list in unique_ids(), selected in proptest::collection::btree_set(1u32..200, 0..10), id in 1u32..200) {
            let mut state = state_with(&list);
            state.selected_tasks = selected.into_iter().collect();
            let mut before = state.selected_tasks.clone();

            state.toggle_selection(id);
            state.toggle_selection(id);

            let mut after = state.selected_tasks.clone();
            before.sort_unstable();
            after.sort_unstable();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_selection_flags(list in unique_ids(), take in 0usize..30) {
            let mut state = state_with(&list);
            state.selected_tasks = list.iter().copied().take(take).collect();
            let selected = state.selected_tasks.len();

            prop_assert_eq!(state.is_all_selected(), selected == list.len() && !list.is_empty());
            prop_assert_eq!(state.is_partially_selected(), selected > 0 && selected < list.len());
        }
    }
}
