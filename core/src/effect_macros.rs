//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` values.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```
/// use remote_data_core::{async_effect, effect::Effect};
///
/// #[derive(Debug)]
/// enum FetchAction {
///     Fetched { body: String },
/// }
///
/// let effect: Effect<FetchAction> = async_effect! {
///     Some(FetchAction::Fetched { body: "{}".to_string() })
/// };
/// assert!(matches!(effect, Effect::Future(_)));
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
