//! User domain entities.

pub mod model;
pub mod profile_type;

pub use model::{ListIndex, NewUser, User, UserProfilePatch};
pub use profile_type::ProfileType;
