use crate::session::COMMANDS;
use crate::session::PREFIX_SIGIL;
use colored::Colorize;
use dicemark_lib::scanner;
use rustyline::completion::Completer;
use rustyline::completion::Pair;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::hint::HistoryHinter;
use rustyline::validate::ValidationContext;
use rustyline::validate::ValidationResult;
use rustyline::validate::Validator;
use rustyline::Context;
use rustyline::Result;
use rustyline_derive::Helper;
use std::borrow::Cow;
use std::borrow::Cow::Borrowed;
use std::borrow::Cow::Owned;

#[derive(Helper)]
pub(crate) struct ReplHelper {
    pub(crate) hinter: HistoryHinter,
    pub(crate) colored: String,
}

/// Commands starting with the typed word, while the command name is typed
fn complete_command(typed: &str) -> Vec<Pair> {
    if !typed.starts_with(PREFIX_SIGIL) || typed.contains(char::is_whitespace) {
        return Vec::new();
    }
    COMMANDS
        .iter()
        .filter(|command| command.starts_with(typed))
        .map(|command| Pair {
            display: command.to_string(),
            replacement: format!("{command} "),
        })
        .collect()
}

/// Colour every rollable token of the line
fn highlight_tokens(line: &str) -> Cow<str> {
    let tokens = scanner::scan(line);
    if tokens.is_empty() {
        return Borrowed(line);
    }
    let mut highlighted = String::with_capacity(line.len());
    let mut cursor = 0;
    for token in tokens {
        highlighted.push_str(&line[cursor..token.span.start]);
        highlighted.push_str(&token.matched.cyan().to_string());
        cursor = token.span.end;
    }
    highlighted.push_str(&line[cursor..]);
    Owned(highlighted)
}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Self::Candidate>)> {
        Ok((0, complete_command(&line[..pos])))
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        highlight_tokens(line)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.dimmed().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize) -> bool {
        !line.is_empty()
    }
}

impl Validator for ReplHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }

    fn validate_while_typing(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_command_names() {
        let candidates = complete_command("!a");
        let names: Vec<_> = candidates.iter().map(|c| c.display.as_str()).collect();
        assert_eq!(vec!["!adv", "!annotate"], names);
        assert_eq!("!adv ", candidates[0].replacement);
        assert!(complete_command("2d6").is_empty());
        assert!(complete_command("!scan 1d").is_empty());
    }

    #[test]
    fn highlights_only_tokens() {
        colored::control::set_override(false);
        assert_eq!("roll 2d6 now", highlight_tokens("roll 2d6 now"));
        assert!(matches!(highlight_tokens("nothing here"), Borrowed(_)));
    }
}
