pub mod loaders;
pub mod outcome;
pub mod question;
pub mod question_set;

pub use loaders::load_question_set;
pub use outcome::SessionOutcome;
pub use question::{grade_answer, normalize_answer, Grade, Question};
pub use question_set::QuestionSet;
