//! Sans-IO client core for the board posts service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). On top of the client sits a
//! board view state machine and a small app shell; the host drives both by
//! executing the commands they hand out and feeding the results back.
//!
//! # Design
//! - `BoardClient` is stateless: it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `BoardApi` joins them through a `Transport`.
//! - `BoardView` issues ticketed commands; only the newest ticket commits.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod shell;
pub mod types;
pub mod view;

pub use api::{BoardApi, Command, Reply};
pub use client::BoardClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseBody, Transport};
pub use shell::{AppShell, Tab};
pub use types::{Post, PostFields, PostId};
pub use view::{BoardView, Confirm, ListState, Pending, Phase, Resolution, Ticket, ViewError};
