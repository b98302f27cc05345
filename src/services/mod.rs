pub mod answer_reader;
pub mod results_table;
pub mod scorer;

pub use answer_reader::{AnswerReader, AnswerWindow, LineRead, TimedLine};
pub use scorer::{report, Summary};
