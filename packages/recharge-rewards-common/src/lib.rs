pub mod eligibility;
pub mod prizes;
pub mod shuffle;
pub mod types;
pub mod validate;

pub use shuffle::DrawRng;
pub use types::{DrawCategory, DrawStatus, Subscriber, Validity, Weekday};
