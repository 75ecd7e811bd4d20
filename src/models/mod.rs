pub mod user;

pub use user::{NewUser, User, UserRequest, UserResponse, UserUpdate};
