pub mod capability;
pub mod claims;
pub mod group;
pub mod provider_group;
pub mod realm;

pub use capability::*;
pub use claims::*;
pub use group::*;
pub use provider_group::*;
pub use realm::*;
