//! Extractive answer composition

mod composer;
mod sections;

pub use composer::AnswerComposer;
pub use sections::{cues, topic_keywords};
