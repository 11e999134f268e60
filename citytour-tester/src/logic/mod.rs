pub mod driver;
pub mod reports;
pub mod tester;

pub use driver::{TourDriver, TransitionEnd};
pub use tester::*;
