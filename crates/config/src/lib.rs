mod error;
mod feed;
mod key;
mod layer;
mod pagination;
mod pattern;
mod resolver;
mod site;
mod validate;
mod value;

pub mod path;

pub use self::error::*;
pub use self::feed::*;
pub use self::key::*;
pub use self::layer::*;
pub use self::pagination::*;
pub use self::pattern::*;
pub use self::resolver::*;
pub use self::site::*;
pub use self::validate::*;
pub use self::value::*;
