use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// A `/`-command and its argument synopsis.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub about: &'static str,
}

/// rustyline helper: completes command names, hints their arguments and
/// highlights command lines.
#[derive(Clone)]
pub struct CliHelper {
    commands: &'static [CommandSpec],
}

impl CliHelper {
    pub fn new(commands: &'static [CommandSpec]) -> Self {
        Self { commands }
    }

    fn matching<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a CommandSpec> + 'a {
        self.commands
            .iter()
            .filter(move |spec| spec.name.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .matching(line)
            .map(|spec| Pair {
                display: format!("{} {}", spec.name, spec.usage).trim_end().to_string(),
                replacement: spec.name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((command, rest)) if line.starts_with('/') => {
                Owned(format!("{} {}", command.bright_cyan(), rest))
            }
            None if line.starts_with('/') => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    /// Completes a unique command prefix, then shows the argument synopsis.
    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }

        let mut matches = self.matching(line);
        let spec = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        let rest = &spec.name[line.len()..];
        if spec.usage.is_empty() {
            (!rest.is_empty()).then(|| rest.to_string())
        } else {
            Some(format!("{} {}", rest, spec.usage))
        }
    }
}

impl Validator for CliHelper {}
