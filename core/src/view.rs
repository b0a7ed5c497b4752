//! Board view: form, post list and the state transitions between them.
//!
//! # Design
//! The view never performs I/O. Every action that needs the network returns a
//! [`Pending`] holding a [`Command`] and a [`Ticket`]; the host runs the
//! command and hands the outcome back through [`BoardView::resolve`]. Only the
//! ticket of the request currently in flight may commit to state, so a
//! superseded list fetch that resolves late is dropped instead of overwriting
//! newer data.
//!
//! Activity and error live in one tagged status, which rules out combinations
//! such as loading and saving at the same time.

use tracing::{debug, warn};

use crate::api::{Command, Reply};
use crate::error::ApiError;
use crate::types::{Post, PostFields, PostId};

pub const VALIDATION_MESSAGE: &str = "Both title and description are required.";
pub const LOAD_FAILED: &str = "Failed to load posts.";
pub const SAVE_FAILED: &str = "Failed to save the post.";
pub const DELETE_FAILED: &str = "Failed to delete the post.";

/// Request-generation token. Strictly increasing per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// A command the host must execute, tagged with the ticket to resolve it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    pub command: Command,
}

/// What the view is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    Idle,
    Loading,
    Saving,
    Deleting,
    Failed(&'a str),
}

/// Outcome of feeding a result back into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The result committed to the list and form.
    Applied,
    /// The request failed; the error banner is set.
    Failed,
    /// The ticket was superseded or never issued; nothing changed.
    Stale,
}

/// What the list section should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState<'a> {
    LoadingFirstPage,
    Empty,
    Posts(&'a [Post]),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("{}", VALIDATION_MESSAGE)]
    Incomplete,
    #[error("another request is still in flight")]
    Busy,
    #[error("post {0} is not in the list")]
    UnknownPost(PostId),
}

/// Yes/no prompt shown before a delete.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Load,
    Create,
    Update(PostId),
    Delete(PostId),
}

impl Op {
    fn fallback_message(self) -> &'static str {
        match self {
            Op::Load => LOAD_FAILED,
            Op::Create | Op::Update(_) => SAVE_FAILED,
            Op::Delete(_) => DELETE_FAILED,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Status {
    #[default]
    Idle,
    InFlight { ticket: Ticket, op: Op },
    Failed(String),
}

#[derive(Debug, Default)]
pub struct BoardView {
    posts: Vec<Post>,
    form: PostFields,
    selected: Option<PostId>,
    status: Status,
    next_ticket: u64,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// First list fetch when the view is shown.
    pub fn mount(&mut self) -> Result<Pending, ViewError> {
        self.refresh()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn form(&self) -> &PostFields {
        &self.form
    }

    pub fn selected(&self) -> Option<PostId> {
        self.selected
    }

    pub fn is_editing(&self) -> bool {
        self.selected.is_some()
    }

    pub fn phase(&self) -> Phase<'_> {
        match &self.status {
            Status::Idle => Phase::Idle,
            Status::InFlight { op: Op::Load, .. } => Phase::Loading,
            Status::InFlight { op: Op::Create | Op::Update(_), .. } => Phase::Saving,
            Status::InFlight { op: Op::Delete(_), .. } => Phase::Deleting,
            Status::Failed(message) => Phase::Failed(message.as_str()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    pub fn is_saving(&self) -> bool {
        self.phase() == Phase::Saving
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// Re-fetch the whole list. A fetch already in flight is superseded.
    pub fn refresh(&mut self) -> Result<Pending, ViewError> {
        if let Status::InFlight { op, .. } = self.status {
            if op != Op::Load {
                return Err(ViewError::Busy);
            }
        }
        Ok(self.start(Op::Load, Command::List))
    }

    /// Create a post, or update the selected one, from the form fields.
    pub fn submit(&mut self) -> Result<Pending, ViewError> {
        self.ensure_idle()?;
        if !self.form.is_complete() {
            self.status = Status::Failed(VALIDATION_MESSAGE.to_string());
            return Err(ViewError::Incomplete);
        }
        let fields = self.form.clone();
        Ok(match self.selected {
            Some(id) => self.start(Op::Update(id), Command::Update(id, fields)),
            None => self.start(Op::Create, Command::Create(fields)),
        })
    }

    /// Load a post into the form and select it for editing.
    pub fn edit(&mut self, id: PostId) -> Result<(), ViewError> {
        let post = self.find(id)?;
        self.form = PostFields::from(post);
        self.selected = Some(id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Ask for confirmation, then delete. Declining returns `Ok(None)`.
    pub fn delete(&mut self, id: PostId, confirm: &mut impl Confirm) -> Result<Option<Pending>, ViewError> {
        self.ensure_idle()?;
        let prompt = delete_prompt(self.find(id)?);
        if !confirm.confirm(&prompt) {
            debug!(id, "delete declined");
            return Ok(None);
        }
        Ok(Some(self.start(Op::Delete(id), Command::Delete(id))))
    }

    /// Commit the outcome of a previously issued command.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<Reply, ApiError>) -> Resolution {
        let op = match self.status {
            Status::InFlight { ticket: current, op } if current == ticket => op,
            _ => {
                warn!(?ticket, "dropping result for a superseded request");
                return Resolution::Stale;
            }
        };

        let reply = match result {
            Ok(reply) => reply,
            Err(err) => {
                debug!(?op, error = %err, "request failed");
                let message = err.message().unwrap_or(op.fallback_message());
                self.status = Status::Failed(message.to_string());
                return Resolution::Failed;
            }
        };

        match (op, reply) {
            (Op::Load, Reply::Posts(posts)) => self.posts = posts,
            (Op::Create, Reply::Post(post)) => {
                self.posts.insert(0, post);
                self.reset_form();
            }
            (Op::Update(_), Reply::Post(post)) => {
                if let Some(slot) = self.posts.iter_mut().find(|p| p.id == post.id) {
                    *slot = post;
                }
                self.reset_form();
            }
            (Op::Delete(id), Reply::Deleted(_)) => {
                self.posts.retain(|p| p.id != id);
                if self.selected == Some(id) {
                    self.reset_form();
                }
            }
            (op, reply) => {
                warn!(?op, ?reply, "reply does not match the issued command");
                self.status = Status::Failed(op.fallback_message().to_string());
                return Resolution::Failed;
            }
        }
        self.status = Status::Idle;
        Resolution::Applied
    }

    pub fn list_state(&self) -> ListState<'_> {
        if self.posts.is_empty() {
            if self.is_loading() {
                ListState::LoadingFirstPage
            } else {
                ListState::Empty
            }
        } else {
            ListState::Posts(self.posts.as_slice())
        }
    }

    pub fn form_heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit post"
        } else {
            "New post"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_saving() {
            "Saving..."
        } else if self.is_editing() {
            "Save changes"
        } else {
            "Create post"
        }
    }

    fn ensure_idle(&self) -> Result<(), ViewError> {
        match self.status {
            Status::InFlight { .. } => Err(ViewError::Busy),
            _ => Ok(()),
        }
    }

    fn find(&self, id: PostId) -> Result<&Post, ViewError> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or(ViewError::UnknownPost(id))
    }

    /// Starting any request clears the previous error.
    fn start(&mut self, op: Op, command: Command) -> Pending {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.status = Status::InFlight { ticket, op };
        debug!(?ticket, ?op, "request issued");
        Pending { ticket, command }
    }

    fn reset_form(&mut self) {
        self.form = PostFields::default();
        self.selected = None;
    }
}

pub fn delete_prompt(post: &Post) -> String {
    format!("Delete the post \"{}\"?", post.title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ResponseBody;

    fn post(id: PostId, title: &str, description: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            description: description.to_string(),
            created_at: None,
        }
    }

    fn loaded(posts: Vec<Post>) -> BoardView {
        let mut view = BoardView::new();
        let pending = view.mount().unwrap();
        assert_eq!(view.resolve(pending.ticket, Ok(Reply::Posts(posts))), Resolution::Applied);
        view
    }

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    fn not_found(message: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            body: ResponseBody::Json(serde_json::json!({ "message": message })),
        }
    }

    #[test]
    fn mount_loads_then_idles() {
        let mut view = BoardView::new();
        let pending = view.mount().unwrap();
        assert_eq!(pending.command, Command::List);
        assert_eq!(view.phase(), Phase::Loading);
        assert_eq!(view.list_state(), ListState::LoadingFirstPage);

        view.resolve(pending.ticket, Ok(Reply::Posts(vec![post(1, "A", "a")])));
        assert_eq!(view.phase(), Phase::Idle);
        assert_eq!(view.posts(), &[post(1, "A", "a")]);
    }

    #[test]
    fn load_failure_uses_fallback_message() {
        let mut view = BoardView::new();
        let pending = view.mount().unwrap();
        let outcome = view.resolve(pending.ticket, Err(ApiError::Transport("refused".to_string())));
        assert_eq!(outcome, Resolution::Failed);
        assert_eq!(view.error(), Some(LOAD_FAILED));
        assert_eq!(view.list_state(), ListState::Empty);
    }

    #[test]
    fn create_prepends_and_clears_form() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        view.set_title("B");
        view.set_description("b");
        let pending = view.submit().unwrap();
        assert_eq!(pending.command, Command::Create(PostFields::new("B", "b")));
        assert_eq!(view.phase(), Phase::Saving);
        assert_eq!(view.submit_label(), "Saving...");

        view.resolve(pending.ticket, Ok(Reply::Post(post(2, "B", "b"))));
        assert_eq!(view.posts(), &[post(2, "B", "b"), post(1, "A", "a")]);
        assert_eq!(view.form(), &PostFields::default());
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[test]
    fn create_failure_keeps_form_and_surfaces_server_message() {
        let mut view = loaded(vec![]);
        view.set_title("B");
        view.set_description("b");
        let pending = view.submit().unwrap();
        let err = ApiError::Status {
            status: 400,
            body: ResponseBody::parse(r#"{"message":"title too long"}"#),
        };
        assert_eq!(view.resolve(pending.ticket, Err(err)), Resolution::Failed);
        assert_eq!(view.error(), Some("title too long"));
        assert_eq!(view.form(), &PostFields::new("B", "b"));
        assert!(view.posts().is_empty());
    }

    #[test]
    fn save_failure_without_message_uses_fallback() {
        let mut view = loaded(vec![]);
        view.set_title("B");
        view.set_description("b");
        let pending = view.submit().unwrap();
        let err = ApiError::Status {
            status: 502,
            body: ResponseBody::Text("Bad Gateway".to_string()),
        };
        view.resolve(pending.ticket, Err(err));
        assert_eq!(view.phase(), Phase::Failed(SAVE_FAILED));
    }

    #[test]
    fn blank_fields_never_issue_a_command() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        view.edit(1).unwrap();
        view.set_title("   ");
        assert_eq!(view.submit(), Err(ViewError::Incomplete));
        assert_eq!(view.error(), Some(VALIDATION_MESSAGE));
        assert_eq!(view.selected(), Some(1));
        assert_eq!(view.posts(), &[post(1, "A", "a")]);

        view.cancel_edit();
        view.set_title("x");
        view.set_description("\t");
        assert_eq!(view.submit(), Err(ViewError::Incomplete));
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut view = loaded(vec![post(3, "C", "c"), post(1, "A", "a"), post(0, "Z", "z")]);
        view.edit(1).unwrap();
        assert!(view.is_editing());
        assert_eq!(view.form_heading(), "Edit post");
        assert_eq!(view.submit_label(), "Save changes");
        assert_eq!(view.form(), &PostFields::new("A", "a"));

        view.set_title("A2");
        let pending = view.submit().unwrap();
        assert_eq!(pending.command, Command::Update(1, PostFields::new("A2", "a")));

        view.resolve(pending.ticket, Ok(Reply::Post(post(1, "A2", "a"))));
        assert_eq!(view.posts(), &[post(3, "C", "c"), post(1, "A2", "a"), post(0, "Z", "z")]);
        assert!(!view.is_editing());
        assert_eq!(view.form(), &PostFields::default());
    }

    #[test]
    fn update_failure_keeps_edit_state() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        view.edit(1).unwrap();
        view.set_description("changed");
        let pending = view.submit().unwrap();
        view.resolve(pending.ticket, Err(not_found("Board with id 1 not found")));
        assert_eq!(view.error(), Some("Board with id 1 not found"));
        assert_eq!(view.selected(), Some(1));
        assert_eq!(view.form(), &PostFields::new("A", "changed"));
        assert_eq!(view.posts(), &[post(1, "A", "a")]);
    }

    #[test]
    fn edit_unknown_post_is_rejected() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        assert_eq!(view.edit(9), Err(ViewError::UnknownPost(9)));
        assert!(!view.is_editing());
    }

    #[test]
    fn cancel_edit_clears_without_request() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        view.edit(1).unwrap();
        view.cancel_edit();
        assert!(!view.is_editing());
        assert_eq!(view.form(), &PostFields::default());
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[test]
    fn declined_delete_does_nothing() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        let mut prompts = Vec::new();
        let mut record = |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        };
        assert_eq!(view.delete(1, &mut record), Ok(None));
        assert_eq!(prompts, vec!["Delete the post \"A\"?".to_string()]);
        assert_eq!(view.delete(1, &mut no), Ok(None));
        assert_eq!(view.posts().len(), 1);
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[test]
    fn delete_removes_exactly_one_and_clears_selected_form() {
        let mut view = loaded(vec![post(2, "B", "b"), post(1, "A", "a")]);
        view.edit(2).unwrap();
        let pending = view.delete(2, &mut yes).unwrap().unwrap();
        assert_eq!(pending.command, Command::Delete(2));
        assert_eq!(view.phase(), Phase::Deleting);

        view.resolve(pending.ticket, Ok(Reply::Deleted(ResponseBody::Empty)));
        assert_eq!(view.posts(), &[post(1, "A", "a")]);
        assert!(!view.is_editing());
        assert_eq!(view.form(), &PostFields::default());
    }

    #[test]
    fn deleting_another_post_keeps_the_form() {
        let mut view = loaded(vec![post(2, "B", "b"), post(1, "A", "a")]);
        view.edit(1).unwrap();
        let pending = view.delete(2, &mut yes).unwrap().unwrap();
        view.resolve(pending.ticket, Ok(Reply::Deleted(ResponseBody::Empty)));
        assert_eq!(view.selected(), Some(1));
        assert_eq!(view.form(), &PostFields::new("A", "a"));
    }

    #[test]
    fn delete_failure_keeps_post() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        let pending = view.delete(1, &mut yes).unwrap().unwrap();
        view.resolve(pending.ticket, Err(ApiError::Transport("reset".to_string())));
        assert_eq!(view.error(), Some(DELETE_FAILED));
        assert_eq!(view.posts().len(), 1);
    }

    #[test]
    fn refresh_replaces_entire_list() {
        let mut view = loaded(vec![post(2, "B", "b"), post(1, "A", "a")]);
        let pending = view.refresh().unwrap();
        view.resolve(pending.ticket, Ok(Reply::Posts(vec![post(7, "G", "g")])));
        assert_eq!(view.posts(), &[post(7, "G", "g")]);
    }

    #[test]
    fn superseded_refresh_is_stale() {
        let mut view = loaded(vec![]);
        let first = view.refresh().unwrap();
        let second = view.refresh().unwrap();
        assert!(second.ticket > first.ticket);

        assert_eq!(
            view.resolve(second.ticket, Ok(Reply::Posts(vec![post(2, "new", "n")]))),
            Resolution::Applied
        );
        assert_eq!(
            view.resolve(first.ticket, Ok(Reply::Posts(vec![post(1, "old", "o")]))),
            Resolution::Stale
        );
        assert_eq!(view.posts(), &[post(2, "new", "n")]);
    }

    #[test]
    fn stale_failure_does_not_set_error() {
        let mut view = loaded(vec![]);
        let first = view.refresh().unwrap();
        let _second = view.refresh().unwrap();
        assert_eq!(
            view.resolve(first.ticket, Err(ApiError::Transport("x".to_string()))),
            Resolution::Stale
        );
        assert_eq!(view.error(), None);
        assert_eq!(view.phase(), Phase::Loading);
    }

    #[test]
    fn busy_while_saving() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        view.set_title("B");
        view.set_description("b");
        let _pending = view.submit().unwrap();
        assert_eq!(view.submit(), Err(ViewError::Busy));
        assert_eq!(view.refresh(), Err(ViewError::Busy));
        assert_eq!(view.delete(1, &mut yes), Err(ViewError::Busy));
    }

    #[test]
    fn error_is_cleared_by_next_attempt() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        assert_eq!(view.submit(), Err(ViewError::Incomplete));
        assert!(view.error().is_some());

        let pending = view.refresh().unwrap();
        assert_eq!(view.error(), None);
        view.resolve(pending.ticket, Ok(Reply::Posts(vec![post(1, "A", "a")])));
        assert_eq!(view.phase(), Phase::Idle);

        // A confirmed delete clears the banner as soon as it starts.
        assert_eq!(view.submit(), Err(ViewError::Incomplete));
        let pending = view.delete(1, &mut yes).unwrap().unwrap();
        assert_eq!(view.error(), None);
        assert_eq!(view.phase(), Phase::Deleting);
        view.resolve(pending.ticket, Err(ApiError::Transport("reset".to_string())));
        assert_eq!(view.error(), Some(DELETE_FAILED));

        // So does a valid submit.
        view.set_title("B");
        view.set_description("b");
        let pending = view.submit().unwrap();
        assert_eq!(view.error(), None);
        assert_eq!(view.phase(), Phase::Saving);
        view.resolve(pending.ticket, Ok(Reply::Post(post(2, "B", "b"))));
        assert_eq!(view.phase(), Phase::Idle);
    }

    #[test]
    fn declined_delete_keeps_the_error() {
        let mut view = loaded(vec![post(1, "A", "a")]);
        assert_eq!(view.submit(), Err(ViewError::Incomplete));
        assert_eq!(view.delete(1, &mut no), Ok(None));
        assert_eq!(view.error(), Some(VALIDATION_MESSAGE));
    }

    #[test]
    fn mismatched_reply_is_a_failure() {
        let mut view = loaded(vec![]);
        let pending = view.refresh().unwrap();
        let outcome = view.resolve(pending.ticket, Ok(Reply::Post(post(1, "A", "a"))));
        assert_eq!(outcome, Resolution::Failed);
        assert_eq!(view.error(), Some(LOAD_FAILED));
        assert!(view.posts().is_empty());
    }

    #[test]
    fn full_scenario() {
        let mut view = loaded(vec![post(1, "A", "a")]);

        view.set_title("B");
        view.set_description("b");
        let pending = view.submit().unwrap();
        view.resolve(pending.ticket, Ok(Reply::Post(post(2, "B", "b"))));
        assert_eq!(view.posts(), &[post(2, "B", "b"), post(1, "A", "a")]);

        view.edit(1).unwrap();
        view.set_title("A2");
        let pending = view.submit().unwrap();
        view.resolve(pending.ticket, Ok(Reply::Post(post(1, "A2", "a"))));
        assert_eq!(view.posts(), &[post(2, "B", "b"), post(1, "A2", "a")]);

        let pending = view.delete(2, &mut yes).unwrap().unwrap();
        view.resolve(pending.ticket, Ok(Reply::Deleted(ResponseBody::Empty)));
        assert_eq!(view.posts(), &[post(1, "A2", "a")]);
    }
}
