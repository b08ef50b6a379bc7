mod book;
mod library;

pub use self::book::{BookKey, BookRecord};
pub use self::library::LibraryDescriptor;
