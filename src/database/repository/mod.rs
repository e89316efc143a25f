//! Repository module - MongoDB implementations of the store traits.

mod bible_study_repository;
mod event_repository;
mod table;
mod user_repository;
mod verse_repository;

pub use bible_study_repository::BibleStudyRepository;
pub use event_repository::EventRepository;
pub use user_repository::UserRepository;
pub use verse_repository::VerseRepository;
