mod health_check;
mod spaces;
mod users;

pub use health_check::*;
pub use spaces::*;
pub use users::*;

pub const SIGN_UP_FORM_ROUTE: &str = "/Users/New";
pub const USERS_ROUTE: &str = "/Users";
pub const SPACES_ROUTE: &str = "/Spaces";
