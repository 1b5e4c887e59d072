mod options;
mod service;

pub use crate::readonly::RouterReadOnly;
pub use options::{DEFAULT_REGEX_TIMEOUT, RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use service::Router;
