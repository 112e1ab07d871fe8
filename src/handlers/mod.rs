//! Use-case handlers
//!
//! Workflows that sit between the HTTP layer and storage. Each handler calls
//! the repository or finder and, after a successful mutation, dispatches
//! exactly one domain event to the registered hooks.

mod create_user_handler;
mod delete_user_handler;
mod error;
mod find_user_handler;
mod update_user_handler;


pub use create_user_handler::CreateUserHandler;
pub use delete_user_handler::DeleteUserHandler;
pub use error::UseCaseError;
pub use find_user_handler::{
    by_country, by_email, by_id, by_name, by_nickname, FindUserHandler, FindUsersHandler,
    UserFindOption,
};
pub use update_user_handler::UpdateUserHandler;
