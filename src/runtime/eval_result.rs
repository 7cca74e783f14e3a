use super::value::Value;

/// Any value can be thrown as an evaluation error.
///
/// Wrap in a newtype so that thrown values cannot be confused with ordinary
/// result values.
#[derive(Clone)]
pub struct EvalError(Value);

impl EvalError {
    #[inline]
    pub fn new(value: Value) -> EvalError {
        EvalError(value)
    }

    #[inline]
    pub fn value(self) -> Value {
        self.0
    }
}

impl AsRef<Value> for EvalError {
    #[inline]
    fn as_ref(&self) -> &Value {
        &self.0
    }
}

/// EvalResult is for functions which are either successful or throw a value.
pub type EvalResult<T> = Result<T, EvalError>;

/// Unwrap an EvalResult that must never throw
#[macro_export]
macro_rules! must {
    ($a:expr) => {{
        let result = $a;
        match result {
            Ok(value) => value,
            Err(_) => panic!("Unexpected abnormal completion"),
        }
    }};
}

/// Create a new EvalError from a thrown value
#[macro_export]
macro_rules! eval_err {
    ($value:expr) => {
        Err($crate::runtime::eval_result::EvalError::new($value))
    };
}
