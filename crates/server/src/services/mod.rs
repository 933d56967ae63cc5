// Services layer for business logic
// Services own business logic and validation, calling storage directly

pub mod post;
pub mod user;

pub use post::{PostError, PostService};
pub use user::{RegistrationError, UserService};
