pub mod abstract_operations;
pub mod accessor;
pub mod builtin_function;
mod context;
pub mod error;
pub mod eval_result;
mod gc;
mod interned_strings;
pub mod object_value;
pub mod ordinary_object;
pub mod property;
pub mod property_descriptor;
pub mod property_key;
pub mod shape;
pub mod type_utilities;
pub mod value;

pub use context::Context;
pub use eval_result::{EvalError, EvalResult};
pub use gc::Handle;
pub use value::Value;
