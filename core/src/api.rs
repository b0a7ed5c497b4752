//! The `request` layer: build, execute through a [`Transport`], parse.

use tracing::debug;

use crate::client::BoardClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, ResponseBody, Transport};
use crate::types::{Post, PostFields, PostId};

/// One CRUD intent issued by the board view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Create(PostFields),
    Update(PostId, PostFields),
    Delete(PostId),
}

/// The successful outcome of a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Posts(Vec<Post>),
    Post(Post),
    Deleted(ResponseBody),
}

/// A `BoardClient` paired with the transport that performs its I/O.
///
/// Calls are blocking and sequential. Failures propagate immediately: there
/// are no retries, timeouts or cancellation at this layer.
pub struct BoardApi<T> {
    client: BoardClient,
    transport: T,
}

impl<T: Transport> BoardApi<T> {
    pub fn new(client: BoardClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &BoardClient {
        &self.client
    }

    pub fn list(&mut self) -> Result<Vec<Post>, ApiError> {
        let response = self.send(self.client.build_list_posts())?;
        self.client.parse_list_posts(response)
    }

    pub fn get(&mut self, id: PostId) -> Result<Post, ApiError> {
        let response = self.send(self.client.build_get_post(id))?;
        self.client.parse_get_post(response)
    }

    pub fn create(&mut self, fields: &PostFields) -> Result<Post, ApiError> {
        let request = self.client.build_create_post(fields)?;
        let response = self.send(request)?;
        self.client.parse_create_post(response)
    }

    pub fn update(&mut self, id: PostId, fields: &PostFields) -> Result<Post, ApiError> {
        let request = self.client.build_update_post(id, fields)?;
        let response = self.send(request)?;
        self.client.parse_update_post(response)
    }

    pub fn delete(&mut self, id: PostId) -> Result<ResponseBody, ApiError> {
        let response = self.send(self.client.build_delete_post(id))?;
        self.client.parse_delete_post(response)
    }

    /// Run a view command and wrap its outcome as a [`Reply`].
    pub fn dispatch(&mut self, command: &Command) -> Result<Reply, ApiError> {
        match command {
            Command::List => self.list().map(Reply::Posts),
            Command::Create(fields) => self.create(fields).map(Reply::Post),
            Command::Update(id, fields) => self.update(*id, fields).map(Reply::Post),
            Command::Delete(id) => self.delete(*id).map(Reply::Deleted),
        }
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
