pub mod proctor;
pub mod question_ctx;

pub use proctor::{Proctor, ProctorDone, QuestionOrder};
pub use question_ctx::QuestionCtx;
