use std::path::PathBuf;

use clap::Parser;

use crate::{codec::Separator, Mode};

#[derive(Parser, Debug)]
#[command(name = "quizr", version = env!("CARGO_PKG_VERSION"))]
pub struct QuizrCli {
    #[arg(short = 'm', long = "mode", default_value_t = Mode::Study, value_name = "MODE", help = "Program mode", long_help = MODE_HELP)]
    pub mode: Mode,
    #[arg(
        short = 's',
        long = "separator",
        default_value_t = Separator::Comma,
        value_name = "SEPARATOR",
        help = "Field separator used in deck files.",
        long_help = SEPARATOR_HELP
    )]
    pub separator: Separator,
    #[arg(long = "root", value_name = "DIR", help = "Data directory.", long_help = ROOT_HELP)]
    pub root: Option<PathBuf>,
    #[arg(short = 'c', long = "count", value_name = "CARD_COUNT", help = "Number of cards to review.", long_help = COUNT_HELP)]
    pub count: Option<usize>,
    #[arg(long = "watch", help = "Keep printing questions on an interval.", long_help = WATCH_HELP, default_value_t = false)]
    pub watch: bool,
    #[arg(help = "Deck title", long_help = TITLE_HELP)]
    pub title: Option<String>,
}

const MODE_HELP: &str = r#"Program mode. Possible values:
    study   - Review a deck, questions weighted toward the hard ones
    list    - Print the available deck titles
    new     - Create a deck file and its training file
    open    - Open a deck file in $EDITOR, or print its path
    delete  - Delete a deck file and its training file
    reset   - Reset a deck's training levels
    peek    - Print a random question, for status bars and the like"#;
const SEPARATOR_HELP: &str = r#"Field separator used in deck files. Possible values:
    space, comma, double-hash (##)
Answers may contain the separator; questions may not."#;
const ROOT_HELP: &str = r#"Data directory holding the decks/ and training_data/ roots. Defaults to ~/.config/quizr."#;
const COUNT_HELP: &str = r#"Number of cards to review. If omitted, will continue until quit."#;
const WATCH_HELP: &str = r#"With the peek mode, keep printing a random question every 15 seconds."#;
const TITLE_HELP: &str = r#"Deck title to act on. Modes that need one will prompt for it when omitted."#;
