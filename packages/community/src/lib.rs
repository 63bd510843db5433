pub mod aggregation;
pub mod entity;
pub mod error;
pub mod forms;
pub mod identity;
pub mod schema;
pub mod service;
pub mod time;
pub mod view;

pub use aggregation::{AggregationEngine, PostAggregates, ProfileAggregates};
pub use error::FeedError;
pub use forms::{CommentForm, PostForm, PostUpdateForm};
pub use identity::{DbIdentityProvider, IdentityProvider};
pub use service::FeedService;
pub use view::{AuthorProfile, CommentView, PostPage, PostView, UserProfileView};
