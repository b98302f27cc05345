pub mod timer;

pub use timer::{Expired, Timer};
