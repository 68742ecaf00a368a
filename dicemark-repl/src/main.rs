mod cli;
mod helper;
mod session;

use cli::Parser;
use colored::Colorize;
use helper::ReplHelper;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::CompletionType;
use rustyline::Config;
use rustyline::EditMode;
use rustyline::Editor;
use rustyline::Result;
use session::Reply;
use session::Session;
use termimad::crossterm::style::Color;
use termimad::MadSkin;
use tracing::debug;
use tracing::info;
use tracing::warn;
use tracing::Level;
use tracing_unwrap::OptionExt;

fn main() -> Result<()> {
    let dotenv = dotenv::dotenv();
    let args = cli::Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    if let Err(error) = dotenv {
        debug!("No `.env` file: {}", error);
    }

    let rng = match args.seed {
        Some(seed) => {
            info!(seed, "Seeded dice");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(rng, args.capacity);

    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();
    let helper = ReplHelper {
        hinter: HistoryHinter {},
        colored: "".to_owned(),
    };
    let mut skin = MadSkin::default();
    skin.bold.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Magenta);
    let mut rline = Editor::<ReplHelper, DefaultHistory>::with_config(config)?;
    rline.set_helper(Some(helper));
    if rline.load_history(&args.history_file).is_err() {
        warn!("No previous history in `{}`", args.history_file);
    }
    let mut count = 1u64;
    loop {
        let prompt = format!("dicemark: {}> ", count);
        rline.helper_mut().expect_or_log("No helper").colored = prompt.bold().green().to_string();
        let readline = rline.readline(&prompt);
        match readline {
            Ok(line) => {
                rline.add_history_entry(line.as_str())?;
                if !line.trim().is_empty() {
                    match session.run(&line) {
                        Ok(Reply::Markdown(reply)) => reply
                            .lines()
                            .for_each(|reply| println!("{}", skin.inline(reply))),
                        Ok(Reply::Plain(reply)) => println!("{}", reply.magenta()),
                        Err(error) => eprintln!("{}", error.bold().red()),
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("{}", "dicemark: signal: CTRL-C".bold().yellow());
                break;
            }
            Err(ReadlineError::Eof) => {
                eprintln!("{}", "dicemark: signal: CTRL-D".bold().yellow());
                break;
            }
            Err(error) => {
                eprintln!("{}", format!("dicemark: error: `{:?}`", error).bold().red());
                break;
            }
        }
        count += 1;
    }
    info!(
        rolls = session.history().len(),
        capacity = session.history().capacity(),
        "Session over"
    );
    rline.append_history(&args.history_file)
}
