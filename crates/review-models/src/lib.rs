pub mod review;
pub mod tags;

pub use review::Review;
pub use tags::Tags;
