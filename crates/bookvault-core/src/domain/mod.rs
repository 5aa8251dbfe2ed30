mod session;
mod user;

pub use session::RefreshSession;
pub use user::{SignInInput, SignUpInput, User};
