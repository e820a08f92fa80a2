pub mod auth_handlers;
pub mod match_handlers;
pub mod profile_handlers;
pub mod system_handlers;

pub use auth_handlers::*;
pub use match_handlers::*;
pub use profile_handlers::*;
pub use system_handlers::*;
