pub mod community;
pub mod shared;
