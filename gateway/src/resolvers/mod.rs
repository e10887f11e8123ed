mod mutation;
mod query;
mod subscription;

pub use mutation::Mutation;
pub use query::Query;
pub use subscription::{Subscription, NOT_IMPLEMENTED};
