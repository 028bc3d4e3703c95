//! Review handlers.

mod submit_review;

pub use submit_review::{SubmitReviewCommand, SubmitReviewHandler, SubmitReviewResult};
