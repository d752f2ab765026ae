pub mod env;
pub mod error;
pub mod expression;
pub mod selector;
pub mod sql;
pub mod value;

pub use env::Env;
pub use error::{ErrorKind, ParseError, ParseResult};
pub use selector::{compile, Selector};
pub use value::{BoolOrNone, Value};
