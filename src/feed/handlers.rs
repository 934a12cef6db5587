use crate::error::FeedError;
use crate::models::{ResolutionState, Timestamp, UserRef};

use super::FeedState;

/// Callback supplied by the embedding application.
pub type Handler<A> = Box<dyn Fn(A) + Send + Sync>;

/// Contact lookup: query string in, matching users out.
pub type ContactQuery = Box<dyn Fn(&str) -> Vec<UserRef> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCommentArgs {
    pub text: String,
    pub has_mention: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskArgs {
    pub text: String,
    pub assignees: Vec<UserRef>,
    pub due_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditTaskArgs {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VersionInfoArgs {
    pub id: String,
    pub version_number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskAssignmentUpdate {
    pub task_id: String,
    pub assignment_id: String,
    pub status: ResolutionState,
}

#[derive(Default)]
pub struct CommentHandlers {
    pub create: Option<Handler<CreateCommentArgs>>,
    pub delete: Option<Handler<DeleteArgs>>,
}

#[derive(Default)]
pub struct TaskHandlers {
    pub create: Option<Handler<CreateTaskArgs>>,
    pub edit: Option<Handler<EditTaskArgs>>,
    pub delete: Option<Handler<DeleteArgs>>,
    pub on_task_assignment_update: Option<Handler<TaskAssignmentUpdate>>,
}

#[derive(Default)]
pub struct VersionHandlers {
    pub info: Option<Handler<VersionInfoArgs>>,
}

#[derive(Default)]
pub struct ContactHandlers {
    pub get_approver_with_query: Option<ContactQuery>,
    pub get_mention_with_query: Option<ContactQuery>,
}

/// Everything the feed delegates to. Any handler may be absent, in which
/// case its action does nothing.
#[derive(Default)]
pub struct FeedHandlers {
    pub comments: Option<CommentHandlers>,
    pub tasks: Option<TaskHandlers>,
    pub versions: Option<VersionHandlers>,
    pub contacts: Option<ContactHandlers>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedPermissions {
    pub comments: bool,
    pub tasks: bool,
}

/// Map an approval UI status onto the code stored on the assignment.
///
/// `approved` is stored as `complete` and `rejected` as `done`. Anything else
/// is refused.
pub fn resolution_for_status(status: &str) -> Result<ResolutionState, FeedError> {
    match status {
        "approved" => Ok(ResolutionState::Complete),
        "rejected" => Ok(ResolutionState::Done),
        other => Err(FeedError::UnknownResolution(other.to_string())),
    }
}

/// Feed controller: owns the feed state and forwards user actions.
///
/// It never calls the API or patches collections itself; the application
/// refetches or edits sources through [`ActivityFeed::state_mut`].
pub struct ActivityFeed {
    state: FeedState,
    handlers: FeedHandlers,
    permissions: FeedPermissions,
    current_user: Option<UserRef>,
    input_open: bool,
    approver_contacts: Vec<UserRef>,
    mention_contacts: Vec<UserRef>,
}

impl ActivityFeed {
    pub fn new(state: FeedState, handlers: FeedHandlers, permissions: FeedPermissions) -> Self {
        Self {
            state,
            handlers,
            permissions,
            current_user: None,
            input_open: false,
            approver_contacts: Vec::new(),
            mention_contacts: Vec::new(),
        }
    }

    pub fn with_current_user(mut self, user: UserRef) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FeedState {
        &mut self.state
    }

    /// The comment box is offered only to a known user with a create handler.
    pub fn can_comment(&self) -> bool {
        self.current_user.is_some()
            && self
                .handlers
                .comments
                .as_ref()
                .is_some_and(|h| h.create.is_some())
    }

    pub fn is_input_open(&self) -> bool {
        self.input_open
    }

    pub fn focus_input(&mut self) {
        self.input_open = true;
    }

    pub fn cancel_input(&mut self) {
        self.input_open = false;
    }

    pub fn approver_contacts(&self) -> &[UserRef] {
        &self.approver_contacts
    }

    pub fn mention_contacts(&self) -> &[UserRef] {
        &self.mention_contacts
    }

    // ============================================================
    // Comments
    // ============================================================

    pub fn create_comment(&mut self, args: CreateCommentArgs) {
        if self.permissions.comments {
            if let Some(create) = self.handlers.comments.as_ref().and_then(|h| h.create.as_ref()) {
                create(args);
            }
        }
        self.input_open = false;
    }

    pub fn delete_comment(&self, args: DeleteArgs) {
        if !self.permissions.comments {
            return;
        }
        if let Some(delete) = self.handlers.comments.as_ref().and_then(|h| h.delete.as_ref()) {
            delete(args);
        }
    }

    // ============================================================
    // Tasks
    // ============================================================

    fn task_handlers(&self) -> Option<&TaskHandlers> {
        self.handlers.tasks.as_ref()
    }

    pub fn create_task(&mut self, args: CreateTaskArgs) {
        if self.permissions.tasks {
            if let Some(create) = self.task_handlers().and_then(|h| h.create.as_ref()) {
                create(args);
            }
        }
        self.input_open = false;
    }

    pub fn update_task(&self, args: EditTaskArgs) {
        if !self.permissions.tasks {
            return;
        }
        if let Some(edit) = self.task_handlers().and_then(|h| h.edit.as_ref()) {
            edit(args);
        }
    }

    pub fn delete_task(&self, args: DeleteArgs) {
        if !self.permissions.tasks {
            return;
        }
        if let Some(delete) = self.task_handlers().and_then(|h| h.delete.as_ref()) {
            delete(args);
        }
    }

    /// Approve or reject an assignment. The status is mapped before the
    /// handler sees it; unknown statuses never reach the handler.
    pub fn update_task_assignment(
        &self,
        task_id: &str,
        assignment_id: &str,
        status: &str,
    ) -> Result<(), FeedError> {
        let status = resolution_for_status(status)?;
        if let Some(update) = self
            .task_handlers()
            .and_then(|h| h.on_task_assignment_update.as_ref())
        {
            update(TaskAssignmentUpdate {
                task_id: task_id.to_string(),
                assignment_id: assignment_id.to_string(),
                status,
            });
        }
        Ok(())
    }

    // ============================================================
    // Versions and contacts
    // ============================================================

    pub fn open_version_info(&self, args: VersionInfoArgs) {
        if let Some(info) = self.handlers.versions.as_ref().and_then(|h| h.info.as_ref()) {
            info(args);
        }
    }

    pub fn get_approver_contacts(&mut self, query: &str) -> &[UserRef] {
        self.approver_contacts = self
            .handlers
            .contacts
            .as_ref()
            .and_then(|h| h.get_approver_with_query.as_ref())
            .map(|lookup| lookup(query))
            .unwrap_or_default();
        &self.approver_contacts
    }

    pub fn get_mention_contacts(&mut self, query: &str) -> &[UserRef] {
        self.mention_contacts = self
            .handlers
            .contacts
            .as_ref()
            .and_then(|h| h.get_mention_with_query.as_ref())
            .map(|lookup| lookup(query))
            .unwrap_or_default();
        &self.mention_contacts
    }
}
