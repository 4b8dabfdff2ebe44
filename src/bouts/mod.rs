//! Phrase grouping into bouts and bout encoding.

mod builder;
mod days;
mod phrase;
mod record;
mod segmenter;

pub use builder::BoutBuilder;
pub use days::assign_day_indices;
pub use phrase::{Phrase, PhraseFinder, RunLengthPhrases, validate_phrases};
pub use record::{Bout, FileFeatures, SourceFile};
pub use segmenter::{BoutSegmenter, FileBouts};
