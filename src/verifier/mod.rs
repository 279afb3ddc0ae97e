//! End-to-end check of a deployed sign up flow, driven through rendered pages.

pub mod document;
mod error;
mod page;
mod sign_up;

pub use document::{Document, Role};
pub use error::VerificationError;
pub use page::{Locator, Page};
pub use sign_up::*;
