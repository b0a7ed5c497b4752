//! Single API calls for scripting: `board posts <op>`.

use std::io::Write;

use board_core::{BoardApi, PostFields, ResponseBody, Transport, ViewError};

use crate::args::PostsSubcommand;
use crate::error::CliError;

pub fn run_posts<T: Transport>(
    api: &mut BoardApi<T>,
    command: PostsSubcommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        PostsSubcommand::List => {
            let posts = api.list()?;
            writeln!(out, "{}", serde_json::to_string_pretty(&posts)?)?;
        }
        PostsSubcommand::Get { id } => {
            let post = api.get(id)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&post)?)?;
        }
        PostsSubcommand::Create { title, description } => {
            let fields = complete(title, description)?;
            let post = api.create(&fields)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&post)?)?;
        }
        PostsSubcommand::Update { id, title, description } => {
            let fields = complete(title, description)?;
            let post = api.update(id, &fields)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&post)?)?;
        }
        PostsSubcommand::Delete { id } => match api.delete(id)? {
            ResponseBody::Empty => writeln!(out, "deleted post {id}")?,
            ResponseBody::Json(value) => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
            ResponseBody::Text(text) => writeln!(out, "{text}")?,
        },
    }
    Ok(())
}

fn complete(title: String, description: String) -> Result<PostFields, CliError> {
    let fields = PostFields::new(title, description);
    if !fields.is_complete() {
        return Err(ViewError::Incomplete.into());
    }
    Ok(fields)
}
