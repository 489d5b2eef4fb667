pub mod upload_handlers;

pub use upload_handlers::*;
