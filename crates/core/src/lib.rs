mod error;
mod fs;
mod plan;
mod route;
mod source;

pub use error::*;
pub use fs::*;
pub use plan::*;
pub use route::*;
pub use source::*;
