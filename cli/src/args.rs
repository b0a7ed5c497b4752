use board_core::PostId;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "board", about = "Board posts client")]
pub struct Cli {
    #[arg(long, env = "BOARD_BASE_URL", default_value = "http://127.0.0.1:3000")]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive board with a form, a post list and tabs (the default).
    Run,
    /// Call a single API operation and print the result as JSON.
    Posts(PostsCommand),
}

#[derive(Args, Debug)]
pub struct PostsCommand {
    #[command(subcommand)]
    pub command: PostsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PostsSubcommand {
    List,
    Get {
        id: PostId,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    Update {
        id: PostId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    Delete {
        id: PostId,
    },
}
