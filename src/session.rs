//! Interactive navigation over a [`Menu`].
//!
//! The session owns the current path and turns user tokens into
//! [`Menu::navigate_to`] calls. Reading input and clearing the screen are the
//! caller's business; [`Session::run`] wires both up for a line-based console.

use std::{
    fmt,
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::menu::{path_string, Menu, PathIndex, TextWrapper, WrapSink};
use crate::platform::Screen;

pub const PROMPT: &str = "Select a valid option (or enter 'b' to go back a level; 'q' to quit):";
pub const INVALID_OPTION: &str = "The option provided was invalid.";
pub const AT_TOP_LEVEL: &str = "This is the top level menu. Cannot go back.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Descend into the child with this zero-based index.
    Select(PathIndex),
    Back,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a menu option")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    /// Accepts `b`, `q`, or a 1-based entry number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "b" => return Ok(Action::Back),
            "q" => return Ok(Action::Quit),
            _ => {}
        }

        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseActionError(token.to_string()));
        }
        match token.parse::<PathIndex>() {
            Ok(n) if n > 0 && n < PathIndex::MAX => Ok(Action::Select(n - 1)),
            _ => Err(ParseActionError(token.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The menu moved and was written to the sink.
    Rendered,
    /// The selected entry does not exist under the current one.
    Invalid,
    AtTopLevel,
    Quit,
}

#[derive(Debug)]
pub struct Session {
    menu: Menu,
    path: Vec<PathIndex>,
    title: Option<String>,
}

impl Session {
    /// Wraps `menu`, starting at its root. Target expansion is switched on so
    /// the entries under the current one are always listed.
    pub fn new(mut menu: Menu) -> Self {
        menu.set_expand_target(true);
        Self {
            menu,
            path: Vec::new(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn current_path(&self) -> &[PathIndex] {
        &self.path
    }

    /// Full render of the current position.
    pub fn render(&mut self, sink: &mut dyn WrapSink) -> fmt::Result {
        self.write_title(sink)?;
        self.menu.render_path(sink, &self.path)
    }

    pub fn apply(&mut self, action: Action, sink: &mut dyn WrapSink) -> Result<Outcome, fmt::Error> {
        let next = match action {
            Action::Quit => return Ok(Outcome::Quit),
            Action::Back => {
                let Some((_, parent)) = self.path.split_last() else {
                    return Ok(Outcome::AtTopLevel);
                };
                parent.to_vec()
            }
            Action::Select(index) => {
                let children = self
                    .menu
                    .node_at(&self.path)
                    .map_or(0, |node| node.child_count());
                if usize::from(index) >= children {
                    return Ok(Outcome::Invalid);
                }
                let mut next = self.path.clone();
                next.push(index);
                next
            }
        };

        self.write_title(sink)?;
        self.menu.navigate_to(sink, &self.path, &next)?;
        debug!(from = %path_string(&self.path), to = %path_string(&next), "moved");
        self.path = next;
        Ok(Outcome::Rendered)
    }

    /// Prompts for and applies actions until the user quits or input ends.
    #[instrument(skip_all)]
    pub fn run<R, W>(&mut self, mut input: R, mut output: W, screen: &mut dyn Screen) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let mut frame = TextWrapper::string();
        self.render(&mut frame).context("render menu")?;
        screen.clear()?;
        output.write_all(frame.into_inner().as_bytes())?;

        loop {
            write!(output, "\n{PROMPT} ")?;
            output.flush()?;

            let mut buf = Vec::new();
            if input.read_until(b'\n', &mut buf).context("read option")? == 0 {
                debug!("input closed");
                return Ok(());
            }

            let action = match String::from_utf8_lossy(&buf).parse::<Action>() {
                Ok(action) => action,
                Err(e) => {
                    debug!("{e}");
                    writeln!(output, "{INVALID_OPTION}")?;
                    continue;
                }
            };

            let mut frame = TextWrapper::string();
            match self.apply(action, &mut frame).context("render menu")? {
                Outcome::Rendered => {
                    screen.clear()?;
                    output.write_all(frame.into_inner().as_bytes())?;
                }
                Outcome::Invalid => writeln!(output, "{INVALID_OPTION}")?,
                Outcome::AtTopLevel => writeln!(output, "{AT_TOP_LEVEL}")?,
                Outcome::Quit => return Ok(()),
            }
        }
    }

    fn write_title(&self, sink: &mut dyn WrapSink) -> fmt::Result {
        let Some(title) = self.title.as_deref() else {
            return Ok(());
        };
        sink.write_str(title)?;
        sink.end_line()?;
        sink.end_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{MenuContents, MenuSettings};
    use test_case::test_case;

    #[test_case("b", Action::Back; "back")]
    #[test_case("q", Action::Quit; "quit")]
    #[test_case("1", Action::Select(0); "first entry")]
    #[test_case(" 12\n", Action::Select(11); "trims whitespace")]
    #[test_case("65534", Action::Select(65533); "largest entry")]
    fn parses_valid_tokens(token: &str, expected: Action) {
        assert_eq!(token.parse::<Action>(), Ok(expected));
    }

    #[test_case(""; "empty")]
    #[test_case("0"; "zero")]
    #[test_case("-1"; "negative")]
    #[test_case("+1"; "explicit sign")]
    #[test_case("65535"; "index type maximum")]
    #[test_case("65536"; "overflow")]
    #[test_case("bq"; "two letters")]
    #[test_case("x"; "unknown letter")]
    fn rejects_invalid_tokens(token: &str) {
        assert!(token.parse::<Action>().is_err());
    }

    fn sample() -> Session {
        let mut menu = Menu::new();
        for (parent, brief) in [(&[][..], "A"), (&[][..], "B"), (&[0][..], "A1"), (&[0][..], "A2")] {
            menu.insert_child(parent, MenuContents::brief(brief), MenuSettings::default())
                .unwrap();
        }
        Session::new(menu)
    }

    fn apply(session: &mut Session, action: Action) -> (Outcome, String) {
        let mut sink = TextWrapper::string();
        let outcome = session.apply(action, &mut sink).unwrap();
        (outcome, sink.into_inner())
    }

    #[test]
    fn select_descends_and_renders() {
        let mut session = sample();
        let (outcome, out) = apply(&mut session, Action::Select(0));
        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(out, "1. A\n1. A1\n2. A2\n2. B\n");
        assert_eq!(session.current_path(), &[0]);
    }

    #[test]
    fn select_missing_entry_is_invalid() {
        let mut session = sample();
        assert_eq!(apply(&mut session, Action::Select(2)), (Outcome::Invalid, String::new()));
        apply(&mut session, Action::Select(1));
        assert_eq!(session.current_path(), &[1]);
        // B has no entries to pick from
        assert_eq!(apply(&mut session, Action::Select(0)).0, Outcome::Invalid);
        assert_eq!(session.current_path(), &[1]);
    }

    #[test]
    fn back_at_root_is_reported() {
        let mut session = sample();
        assert_eq!(apply(&mut session, Action::Back), (Outcome::AtTopLevel, String::new()));
    }

    #[test]
    fn back_returns_to_parent() {
        let mut session = sample();
        apply(&mut session, Action::Select(0));
        apply(&mut session, Action::Select(1));
        let (outcome, out) = apply(&mut session, Action::Back);
        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(out, "1. A\n1. A1\n2. A2\n2. B\n");
        assert_eq!(session.current_path(), &[0]);
    }

    #[test]
    fn title_precedes_listing() {
        let mut session = sample().with_title(Some("Main".to_string()));
        let mut sink = TextWrapper::string();
        session.render(&mut sink).unwrap();
        assert_eq!(sink.into_inner(), "Main\n\n1. A\n2. B\n");
    }
}
