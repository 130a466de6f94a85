//! Built-in resolvers and validators that query files can reference.

mod resolvers;
mod validators;

pub use resolvers::{AllParamsResolver, EnvResolver, ParamResolver};
pub use validators::{NonEmptyValidator, ParamCountValidator, PatternValidator, RequiredValidator};
