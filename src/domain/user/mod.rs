mod new_user;
mod types;

pub use new_user::{NewUser, StoredUser};
pub use types::*;
