use clap::crate_authors;
use clap::crate_description;
use clap::crate_version;
pub use clap::Parser;
use dicemark_lib::roll::history::DEFAULT_CAPACITY;

const DICEMARK_AUTHOR: &str = crate_authors!();
const DICEMARK_VERSION: &str = crate_version!();
const DICEMARK_ABOUT: &str = crate_description!();
const DICEMARK_FLAG_D_SHORT: char = 'd';
const DICEMARK_FLAG_D_HELP: &str = "Enable Debug logging";
const DICEMARK_FLAG_C_SHORT: char = 'c';
const DICEMARK_FLAG_C_HELP: &str = "Amount of rolls kept in the session history";
const DICEMARK_FLAG_S_SHORT: char = 's';
const DICEMARK_FLAG_S_HELP: &str = "Seed the dice for reproducible sessions";
const DICEMARK_FLAG_H_HELP: &str = "File keeping the line editor history";
const HISTORY_FILE: &str = ".dicemark_history";

#[derive(Parser, Debug)]
#[command(author = DICEMARK_AUTHOR, version = DICEMARK_VERSION, about = DICEMARK_ABOUT)]
pub struct Args {
    #[arg(short = DICEMARK_FLAG_D_SHORT, long, help = DICEMARK_FLAG_D_HELP, action)]
    pub debug: bool,

    #[arg(
        short = DICEMARK_FLAG_C_SHORT,
        long,
        env = "DICEMARK_HISTORY_CAPACITY",
        default_value_t = DEFAULT_CAPACITY,
        help = DICEMARK_FLAG_C_HELP
    )]
    pub capacity: usize,

    #[arg(short = DICEMARK_FLAG_S_SHORT, long, env = "DICEMARK_SEED", help = DICEMARK_FLAG_S_HELP)]
    pub seed: Option<u64>,

    #[arg(long, env = "DICEMARK_HISTORY_FILE", default_value = HISTORY_FILE, help = DICEMARK_FLAG_H_HELP)]
    pub history_file: String,
}
