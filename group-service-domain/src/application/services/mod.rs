pub mod authentication;
pub mod authorization_helper;
pub mod group_management;
pub mod member_count;

pub use authentication::*;
pub use authorization_helper::*;
pub use group_management::*;
pub use member_count::*;
