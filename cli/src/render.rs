//! Plain-text rendering of the app shell.

use std::fmt::{self, Display};

use board_core::{AppShell, BoardView, ListState, Post, Tab};
use chrono::{DateTime, Local, TimeZone, Utc};

pub const EMPTY_LIST: &str = "No posts yet. Write the first one!";
pub const LOADING_LIST: &str = "Loading posts...";
pub const STATISTICS_PLACEHOLDER: &str = "Statistics are not available in this client.";

pub fn render_shell(shell: &AppShell) -> String {
    let mut out = render_tabs(shell.active());
    out.push('\n');
    match shell.active() {
        Tab::Board => out.push_str(&render_board(shell.board(), &Local)),
        Tab::Statistics => {
            out.push_str(STATISTICS_PLACEHOLDER);
            out.push('\n');
        }
    }
    out
}

fn render_tabs(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the board view, formatting timestamps in `tz`.
pub fn render_board<Tz>(view: &BoardView, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    BoardScreen { view, tz }.to_string()
}

struct BoardScreen<'a, Tz> {
    view: &'a BoardView,
    tz: &'a Tz,
}

impl<Tz> Display for BoardScreen<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.view;
        if let Some(error) = view.error() {
            writeln!(f, "! {error}")?;
        }

        let form = view.form();
        writeln!(f, "-- {} --", view.form_heading())?;
        writeln!(f, "title:       {}", form.title)?;
        writeln!(f, "description: {}", form.description)?;
        if view.is_editing() {
            writeln!(f, "[{}] [cancel]", view.submit_label())?;
        } else {
            writeln!(f, "[{}]", view.submit_label())?;
        }

        let refresh = if view.is_loading() { "Loading..." } else { "refresh" };
        writeln!(f, "-- Posts -- [{refresh}]")?;
        match view.list_state() {
            ListState::LoadingFirstPage => writeln!(f, "{LOADING_LIST}"),
            ListState::Empty => writeln!(f, "{EMPTY_LIST}"),
            ListState::Posts(posts) => posts
                .iter()
                .try_for_each(|post| self.fmt_post(f, post, view.selected() == Some(post.id))),
        }
    }
}

impl<Tz> BoardScreen<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn fmt_post(&self, f: &mut fmt::Formatter<'_>, post: &Post, selected: bool) -> fmt::Result {
        let marker = if selected { '*' } else { ' ' };
        writeln!(f, "{marker}#{} {}", post.id, post.title)?;
        writeln!(f, "    {}", post.description)?;
        if let Some(created_at) = post.created_at {
            writeln!(f, "    {}", format_created_at(created_at, self.tz))?;
        }
        Ok(())
    }
}

pub fn format_created_at<Tz>(created_at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string()
}
