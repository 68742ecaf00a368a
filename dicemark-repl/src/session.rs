use dicemark_lib::error::Error;
use dicemark_lib::roll;
use dicemark_lib::roll::history::History;
use dicemark_lib::scanner;
use dicemark_lib::scanner::token::Kind;
use dicemark_lib::scanner::token::Token;
use dicemark_lib::solver::RandomSource;
use dicemark_lib::solver::Solver;
use rand::rngs::StdRng;
use tracing::debug;
use tracing::warn;

pub(crate) const PREFIX_SIGIL: char = '!';

pub(crate) const COMMANDS: [&str; 8] = [
    "!adv",
    "!dis",
    "!scan",
    "!annotate",
    "!pick",
    "!history",
    "!clear",
    "!help",
];

const HELP: &str = "**dicemark**
`2d6+3` `d20` `4d6kh3` `2d20kl1-1` `+5` *roll a notation*
`!adv [mod]` `!dis [mod]` *roll with advantage or disadvantage*
`!scan <text>` *list the rollable tokens of a text*
`!annotate <text>` *mark the rollable tokens of a text*
`!pick <n>` *roll the n-th token of the last scanned text*
`!history` `!clear` *show or forget the session rolls*";

/// A line typed in the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Roll(String),
    Advantage(i64),
    Disadvantage(i64),
    Scan(String),
    Annotate(String),
    Pick(usize),
    History,
    Clear,
    Help,
}

fn parse_modifier(arg: &str) -> Result<i64, String> {
    if arg.is_empty() {
        return Ok(0);
    }
    arg.replace(' ', "")
        .parse::<i64>()
        .map_err(|e| format!("`{}` is not a modifier: {}", arg, e))
}

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if !line.starts_with(PREFIX_SIGIL) {
            return Ok(Command::Roll(line.to_owned()));
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        match name {
            "!adv" | "!advantage" => Ok(Command::Advantage(parse_modifier(rest)?)),
            "!dis" | "!disadvantage" => Ok(Command::Disadvantage(parse_modifier(rest)?)),
            "!scan" | "!s" => Ok(Command::Scan(rest.to_owned())),
            "!annotate" | "!a" => Ok(Command::Annotate(rest.to_owned())),
            "!pick" | "!p" => rest
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .map(Command::Pick)
                .ok_or_else(|| format!("`{}` is not a token number", rest)),
            "!history" | "!h" => Ok(Command::History),
            "!clear" => Ok(Command::Clear),
            "!help" | "!?" => Ok(Command::Help),
            _ => Err(format!("unknown command `{}`, try `!help`", name)),
        }
    }
}

/// What to print back
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Reply {
    /// Markdown rendered through the skin
    Markdown(String),
    /// Printed as is
    Plain(String),
}

fn format_error(error: Error) -> String {
    match error {
        Error::Pest(_) => format!("error\n{}", error),
        _ => format!("error: {}", error),
    }
}

fn format_tokens(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "**tokens** *none*".to_owned();
    }
    tokens
        .iter()
        .enumerate()
        .fold("**tokens**".to_owned(), |mut acc, (index, token)| {
            acc.push_str(&format!("\n{}. {}", index + 1, token));
            acc
        })
}

/// REPL state: the dice, the roll history and the last scanned tokens
pub(crate) struct Session {
    rng: StdRng,
    history: History,
    tokens: Vec<Token>,
}

impl Session {
    pub(crate) fn new(rng: StdRng, capacity: usize) -> Self {
        Self {
            rng,
            history: History::with_capacity(capacity),
            tokens: Vec::new(),
        }
    }

    pub(crate) fn history(&self) -> &History {
        &self.history
    }

    fn roll(&mut self, solver: &Solver) -> Result<roll::Result, String> {
        solver
            .solve_recorded(
                &mut RandomSource {
                    generator: &mut self.rng,
                },
                &mut self.history,
            )
            .map_err(format_error)
    }

    fn pick(&mut self, number: usize) -> Result<Reply, String> {
        let token = self
            .tokens
            .get(number - 1)
            .cloned()
            .ok_or_else(|| format!("no token `{}` in the last scanned text", number))?;
        let target = match &token.kind {
            Kind::Save { dc, .. } => Some(
                i64::try_from(*dc).map_err(|_| format!("DC `{}` is out of range", dc))?,
            ),
            Kind::Dice | Kind::Attack => None,
        };
        let solver = token.solver().map_err(format_error)?;
        let result = self.roll(&solver)?;
        let verdict = match (&token.kind, target) {
            (Kind::Save { dc, ability }, Some(target)) => {
                let outcome = if result.get_total() >= target {
                    "success"
                } else {
                    "failure"
                };
                format!(" *{} save vs DC {}* **{}**", ability, dc, outcome)
            }
            _ => String::new(),
        };
        Ok(Reply::Markdown(format!(
            "**rolling** *{}*\n{}{}",
            token.kind, result, verdict
        )))
    }

    /// Run one line, the error is a diagnostic to show and forget
    pub(crate) fn run(&mut self, line: &str) -> Result<Reply, String> {
        let command = Command::parse(line)?;
        debug!(?command, "running");
        let reply = match command {
            Command::Roll(query) => {
                let solver = Solver::new(&query).map_err(|error| {
                    warn!(query = query.as_str(), "rejected notation");
                    format_error(error)
                })?;
                let result = self.roll(&solver)?;
                Reply::Markdown(format!("**rolling**\n{}", result))
            }
            Command::Advantage(modifier) => {
                let result = self.roll(&Solver::advantage(modifier))?;
                Reply::Markdown(format!("**advantage**\n{}", result))
            }
            Command::Disadvantage(modifier) => {
                let result = self.roll(&Solver::disadvantage(modifier))?;
                Reply::Markdown(format!("**disadvantage**\n{}", result))
            }
            Command::Scan(text) => {
                self.tokens = scanner::scan(&text);
                Reply::Markdown(format_tokens(&self.tokens))
            }
            Command::Annotate(text) => {
                self.tokens = scanner::scan(&text);
                Reply::Plain(scanner::annotate(&text))
            }
            Command::Pick(number) => self.pick(number)?,
            Command::History => {
                if self.history.is_empty() {
                    Reply::Markdown("**history** *empty*".to_owned())
                } else {
                    Reply::Markdown(self.history.list().enumerate().fold(
                        format!(
                            "**history** {}/{}",
                            self.history.len(),
                            self.history.capacity()
                        ),
                        |mut acc, (index, result)| {
                            acc.push_str(&format!(
                                "\n{}. *{}* {}",
                                index + 1,
                                result.get_timestamp().format("%H:%M:%S"),
                                result
                            ));
                            acc
                        },
                    ))
                }
            }
            Command::Clear => {
                self.history.clear();
                Reply::Markdown("**history** *cleared*".to_owned())
            }
            Command::Help => Reply::Markdown(HELP.to_owned()),
        };
        Ok(reply)
    }
}
