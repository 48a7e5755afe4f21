/// Client task store
///
/// A process-local cache of the authenticated user's task collection.
/// Multiple UI surfaces read the same store instead of each fetching the
/// list themselves, and request-scoped loading/error state lives here
/// rather than in every view.
///
/// # Ownership
///
/// The store is an explicit, dependency-injected state container: create
/// one per active session and hand it to the UI layer by `Arc`. Nothing
/// here is global.
///
/// # Error boundary
///
/// No backend error escapes a store method. Every failure is caught and
/// downgraded to the human-readable `error` string in the snapshot; a
/// missing user surfaces exactly as "User not found".
///
/// # Races
///
/// Operations are not serialized: a second `fetch_tasks` or `add_task` may
/// start while one is in flight. Each operation takes a monotonically
/// increasing sequence number when it starts, and a completion is applied
/// only if no newer operation has started since; superseded results are
/// discarded wholesale. The operation holding the newest sequence always
/// settles the state, so `is_loading` can never be left stuck even when
/// calls race or fail.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasknest_client::{mock::MockBackend, TaskStore};
///
/// # async fn example() {
/// let backend = Arc::new(MockBackend::new().with_user(1, "Ann", "ann@x.com"));
/// let store = TaskStore::new(backend);
///
/// store.fetch_tasks("ann@x.com").await;
/// let snapshot = store.snapshot();
/// assert!(!snapshot.is_loading);
/// # }
/// ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tasknest_shared::models::task::Task;
use tasknest_shared::repo::tasks::CreateTaskInput;

use crate::backend::TaskBackend;
use crate::error::{ClientError, ClientResult};

/// Mutable store state behind the lock
#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<Task>,
    user_id: Option<i32>,
    is_loading: bool,
    error: Option<String>,
}

/// Point-in-time view of the store for UI consumption
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// Cached task collection
    pub tasks: Vec<Task>,

    /// Currently selected user, if any
    pub user_id: Option<i32>,

    /// Whether an operation is in flight
    pub is_loading: bool,

    /// Last operation's user-visible failure, if any
    pub error: Option<String>,
}

/// What a settled operation writes back into the state
enum Outcome {
    /// Replace the cached collection wholesale
    Tasks(Vec<Task>),

    /// Record a user-visible failure
    Failure(String),
}

/// Client-side cache of one user's tasks
pub struct TaskStore {
    backend: Arc<dyn TaskBackend>,
    state: Mutex<StoreState>,
    op_seq: AtomicU64,
}

impl TaskStore {
    /// Creates a store over the given backend
    pub fn new(backend: Arc<dyn TaskBackend>) -> Self {
        TaskStore {
            backend,
            state: Mutex::new(StoreState::default()),
            op_seq: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("store state lock poisoned")
    }

    /// Sets the active user id
    ///
    /// Pure state update, no I/O.
    pub fn set_user_id(&self, id: i32) {
        self.state().user_id = Some(id);
    }

    /// Returns a point-in-time copy of the full state
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state();
        StoreSnapshot {
            tasks: state.tasks.clone(),
            user_id: state.user_id,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    /// Returns a copy of the cached task collection
    pub fn tasks(&self) -> Vec<Task> {
        self.state().tasks.clone()
    }

    /// Whether an operation is in flight
    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Last failure message, if any
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Marks the start of an operation and returns its sequence number
    fn begin(&self) -> u64 {
        let seq = self.op_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let mut state = self.state();
        state.is_loading = true;
        state.error = None;
        seq
    }

    /// Applies an operation's outcome unless it has been superseded
    fn settle(&self, seq: u64, outcome: Outcome) {
        if seq != self.op_seq.load(Ordering::SeqCst) {
            tracing::debug!(seq, "Discarding result of superseded store operation");
            return;
        }

        let mut state = self.state();
        match outcome {
            Outcome::Tasks(tasks) => state.tasks = tasks,
            Outcome::Failure(message) => state.error = Some(message),
        }
        state.is_loading = false;
    }

    /// Fetches the task list for the user identified by `email` and
    /// replaces the cached collection wholesale
    ///
    /// An unknown email surfaces as the error string "User not found".
    pub async fn fetch_tasks(&self, email: &str) {
        let seq = self.begin();

        let outcome = match self.backend.list_tasks(email).await {
            Ok(tasks) => Outcome::Tasks(tasks),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch tasks");
                Outcome::Failure(e.to_string())
            }
        };

        self.settle(seq, outcome);
    }

    /// Creates a task and re-fetches the owner's full list
    ///
    /// The fresh list, not a local append, becomes the cache: the created
    /// record carries server-assigned fields (id, defaults) the client
    /// cannot reproduce, and re-reading keeps the cache aligned with
    /// backend state.
    pub async fn add_task(
        &self,
        title: &str,
        description: &str,
        user_id: i32,
        project_id: Option<i32>,
        category_id: Option<i32>,
    ) {
        let seq = self.begin();

        let outcome = match self
            .add_task_inner(title, description, user_id, project_id, category_id)
            .await
        {
            Ok(tasks) => Outcome::Tasks(tasks),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to add task");
                Outcome::Failure(e.to_string())
            }
        };

        self.settle(seq, outcome);
    }

    async fn add_task_inner(
        &self,
        title: &str,
        description: &str,
        user_id: i32,
        project_id: Option<i32>,
        category_id: Option<i32>,
    ) -> ClientResult<Vec<Task>> {
        // Verify the user exists before creating work for them.
        if self.backend.get_user(user_id).await?.is_none() {
            return Err(ClientError::NotFound("User not found".to_string()));
        }

        self.backend
            .create_task(CreateTaskInput {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
                user_id,
                project_id,
                category_id,
                status: Some("pending".to_string()),
                due_date: None,
                priority: None,
            })
            .await?;

        self.backend.list_tasks_for_user(user_id).await
    }
}
