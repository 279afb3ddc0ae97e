mod routes;
mod sign_up;

pub use routes::*;
pub use sign_up::*;
