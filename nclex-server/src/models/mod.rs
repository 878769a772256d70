//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod review;
pub mod comment;
pub mod filter;
pub mod pagination;

pub use validation::ValidationError;
pub use review::{EnglishLevel, NewReview, PassStatus, ResourceList, ReviewSubmission};
pub use comment::{CommentSubmission, NewComment};
pub use filter::{FilterClause, ReviewFilter, ReviewListParams};
pub use pagination::{Paginated, Pagination, DEFAULT_PER_PAGE, MAX_PER_PAGE};
