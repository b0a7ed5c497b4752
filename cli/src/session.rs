//! Interactive session: reads actions line by line and drives the app shell.

use std::io::{BufRead, Write};

use board_core::{AppShell, BoardApi, Confirm, Pending, PostId, Resolution, Tab, Transport, ViewError};
use tracing::{debug, info};

use crate::error::CliError;
use crate::render::render_shell;

pub const HELP: &str = "\
commands:
  title <text>     set the form title
  desc <text>      set the form description
  submit           create a post, or save the one being edited
  edit <id>        load a post into the form
  cancel           stop editing and clear the form
  delete <id>      delete a post (asks first)
  refresh          reload the list
  show <id>        fetch one post from the server
  tab board|stats  switch tabs
  help             show this text
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Title(String),
    Description(String),
    Submit,
    Edit(PostId),
    Cancel,
    Delete(PostId),
    Refresh,
    Show(PostId),
    Tab(Tab),
    Help,
    Quit,
}

impl Action {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Action>, CliError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let action = match word {
            "title" => Action::Title(rest.to_string()),
            "desc" | "description" => Action::Description(rest.to_string()),
            "submit" | "save" => Action::Submit,
            "edit" => Action::Edit(parse_id("edit", rest)?),
            "cancel" => Action::Cancel,
            "delete" | "rm" => Action::Delete(parse_id("delete", rest)?),
            "refresh" | "r" => Action::Refresh,
            "show" => Action::Show(parse_id("show", rest)?),
            "tab" => Action::Tab(match rest {
                "board" => Tab::Board,
                "stats" | "statistics" => Tab::Statistics,
                _ => {
                    return Err(CliError::MissingArgument {
                        command: "tab",
                        expected: "`board` or `stats`",
                    })
                }
            }),
            "help" | "?" => Action::Help,
            "quit" | "exit" | "q" => Action::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(Some(action))
    }
}

fn parse_id(command: &'static str, rest: &str) -> Result<PostId, CliError> {
    if rest.is_empty() {
        return Err(CliError::MissingArgument {
            command,
            expected: "a post id",
        });
    }
    rest.parse().map_err(|_| CliError::InvalidId(rest.to_string()))
}

/// Asks on the session's own input and output.
struct Prompt<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> Confirm for Prompt<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.out, "{prompt} [y/N] ").and_then(|()| self.out.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

pub struct Session<T, R, W> {
    shell: AppShell,
    api: BoardApi<T>,
    input: R,
    out: W,
}

impl<T: Transport, R: BufRead, W: Write> Session<T, R, W> {
    pub fn new(api: BoardApi<T>, input: R, out: W) -> Self {
        Self {
            shell: AppShell::new(),
            api,
            input,
            out,
        }
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    /// Mount the board, then process actions until `quit` or end of input.
    pub fn run(&mut self) -> Result<(), CliError> {
        info!(base_url = self.api.client().base_url(), "starting board session");
        let pending = self.shell.board_mut().mount()?;
        self.execute(pending);
        self.render()?;

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match Action::parse(&line) {
                Ok(None) => continue,
                Ok(Some(Action::Quit)) => return Ok(()),
                Ok(Some(action)) => self.apply(action)?,
                Err(err) => writeln!(self.out, "{err}")?,
            }
        }
    }

    fn apply(&mut self, action: Action) -> Result<(), CliError> {
        debug!(?action, "applying action");
        let outcome = match action {
            Action::Title(title) => {
                self.shell.board_mut().set_title(title);
                Ok(None)
            }
            Action::Description(description) => {
                self.shell.board_mut().set_description(description);
                Ok(None)
            }
            Action::Edit(id) => self.shell.board_mut().edit(id).map(|()| None),
            Action::Cancel => {
                self.shell.board_mut().cancel_edit();
                Ok(None)
            }
            Action::Submit => self.shell.board_mut().submit().map(Some),
            Action::Refresh => self.shell.board_mut().refresh().map(Some),
            Action::Delete(id) => {
                let mut prompt = Prompt {
                    input: &mut self.input,
                    out: &mut self.out,
                };
                self.shell.board_mut().delete(id, &mut prompt)
            }
            Action::Tab(tab) => {
                self.shell.select(tab);
                Ok(None)
            }
            Action::Show(id) => {
                match self.api.get(id) {
                    Ok(post) => writeln!(self.out, "{}", serde_json::to_string_pretty(&post)?)?,
                    Err(err) => writeln!(self.out, "{err}")?,
                }
                return Ok(());
            }
            Action::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(());
            }
            Action::Quit => return Ok(()),
        };

        match outcome {
            Ok(Some(pending)) => {
                self.execute(pending);
            }
            Ok(None) => {}
            // Already shown in the error banner.
            Err(ViewError::Incomplete) => {}
            Err(err) => writeln!(self.out, "{err}")?,
        }
        self.render()
    }

    /// Run a command to completion and commit its result.
    fn execute(&mut self, pending: Pending) -> Resolution {
        let result = self.api.dispatch(&pending.command);
        self.shell.board_mut().resolve(pending.ticket, result)
    }

    fn render(&mut self) -> Result<(), CliError> {
        write!(self.out, "{}", render_shell(&self.shell))?;
        Ok(())
    }
}
