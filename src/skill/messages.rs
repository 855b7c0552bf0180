//! Scripted speech

pub const WELCOME: &str = "Welcome to Audio Bookshelf. You can ask me to play an audiobook or continue where you left off. What would you like to do?";
pub const HELP: &str = "You can say things like: play a book, continue my book, or search for books. What would you like to do?";
pub const GOODBYE: &str = "Goodbye!";
pub const FALLBACK: &str = "Sorry, I didn't understand that. You can say play a book, continue my book, or ask for help.";
pub const ERROR: &str = "Sorry, something went wrong. Please try again.";
pub const NO_ITEMS_IN_PROGRESS: &str = "You don't have any books in progress. You can ask me to search for a book to play.";
pub const NOT_CONFIGURED: &str = "Your AudioBookshelf account isn't linked yet. Please use the Alexa app to link your account.";

pub const OFFER_SEARCH: &str = "Would you like to search for a book?";
pub const ASK_BOOK_NAME: &str = "What book would you like to play?";
pub const ASK_BOOK_NAME_REPROMPT: &str = "Please tell me the name of a book.";
pub const NO_LIBRARIES: &str = "I couldn't find any libraries in your AudioBookshelf account.";
pub const WHAT_NEXT: &str = "What would you like to do?";
pub const NOTHING_TO_RESUME: &str = "There's nothing to resume. You can ask me to play a book or continue your current book.";
pub const RESUMING: &str = "Resuming";

pub fn no_book_match(book_name: &str) -> String {
    format!(
        "I couldn't find any books matching {}. Try searching for something else.",
        book_name
    )
}

pub fn continuing(title: &str, percent: u32) -> String {
    format!("Continuing {}. You're {}% through.", title, percent)
}

pub fn playing(title: &str, author: &str) -> String {
    format!("Playing {} by {}.", title, author)
}

pub fn intent_reflection(intent_name: &str) -> String {
    format!("You just triggered {}", intent_name)
}
