pub mod file_system;
pub mod http_handler;
pub mod middleware;

/// Re-export commonly used types from adapters
pub use file_system::FileSystemAdapter;
pub use http_handler::RedirectHandler;
pub use middleware::*;
