/// Unwraps a `Result<Option<T>, E>` inside `Iterator::next`, turning an
/// error into `Some(Err(_))`.
#[macro_export]
macro_rules! try_some {
    ($expr:expr) => {
        match $expr {
            Ok(Some(v)) => Some(v),
            Ok(None) => None,
            Err(e) => return Some(Err(From::from(e))),
        }
    };
}
