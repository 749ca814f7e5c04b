use quizr::{deck::DeckError, QuizrError};

fn main() {
    match quizr::run() {
        Ok(Some(summary)) => {
            println!(
                "Reviewed {} card(s): {} hard, {} good, {} easy",
                summary.reviewed, summary.hard, summary.good, summary.easy
            );
        }
        Ok(None) => {}
        Err(err) => match err {
            QuizrError::Deck(err) => match err {
                DeckError::NotFound(title) => {
                    eprintln!("Deck \"{title}\" doesn't exist")
                }
                DeckError::AlreadyExists(title) => {
                    eprintln!("Deck \"{title}\" already exists")
                }
                DeckError::Empty(title) => {
                    eprintln!("Deck \"{title}\" doesn't have any valid cards")
                }
                err => eprintln!("Deck: {err}"),
            },
            QuizrError::Training(err) => eprintln!("Training: {err}"),
            QuizrError::Ui(err) => eprintln!("Ui: {err}"),
            QuizrError::Arg(err) => eprintln!("Arg: {err}"),
            QuizrError::Panic(err) => eprintln!("Panicked: {err}"),
        },
    }
}
