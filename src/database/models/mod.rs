//! Database model exports.

pub mod bible_study;
pub mod event;
pub mod user;
pub mod verse;

pub use bible_study::{BibleStudy, BibleStudyInput};
pub use event::{EventDocument, EventInput, EventRecord};
pub use user::{CreatedUser, Role, UserInput, UserRecord, UserView};
pub use verse::{VerseInput, VerseRecord};
