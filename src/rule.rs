// Rule contract and target resolution

use crate::ResolutionError;

/// The value a rule is checked against.
///
/// A target is either a plain value or a deferred zero-argument accessor.
/// The deferred form exists so that fetching the value (a map lookup, a
/// field access behind an `Option`, an index into a list) can itself fail
/// at check time without crashing rule construction; the failure surfaces
/// as a [`ResolutionError`] which the validator records instead of
/// propagating.
///
/// Plain values convert implicitly:
///
/// ```
/// use rulekit::Target;
///
/// let target: Target<i32> = 42.into();
/// assert_eq!(target.with(|n| *n), Ok(42));
/// ```
pub enum Target<'a, T> {
    Value(T),
    Deferred(Box<dyn Fn() -> Result<T, ResolutionError> + 'a>),
}

impl<'a, T> Target<'a, T> {
    /// Wrap an already-resolved value.
    pub fn value(value: T) -> Self {
        Target::Value(value)
    }

    /// Wrap a fallible accessor, invoked each time the target is resolved.
    ///
    /// ```
    /// use rulekit::{ResolutionError, Target};
    /// use std::collections::HashMap;
    ///
    /// let data: HashMap<&str, i32> = HashMap::new();
    /// let target = Target::deferred(|| {
    ///     data.get("age")
    ///         .copied()
    ///         .ok_or_else(|| ResolutionError::MissingKey("age".to_string()))
    /// });
    /// assert!(target.with(|n| *n > 18).is_err());
    /// ```
    pub fn deferred(resolve: impl Fn() -> Result<T, ResolutionError> + 'a) -> Self {
        Target::Deferred(Box::new(resolve))
    }

    /// Resolve the target and run `inspect` on the value.
    pub fn with<R>(&self, inspect: impl FnOnce(&T) -> R) -> Result<R, ResolutionError> {
        match self {
            Target::Value(value) => Ok(inspect(value)),
            Target::Deferred(resolve) => Ok(inspect(&resolve()?)),
        }
    }
}

impl<'a, T> From<T> for Target<'a, T> {
    fn from(value: T) -> Self {
        Target::Value(value)
    }
}

/// A single unit of validation logic.
///
/// A rule binds one predicate to one target, a label used as the
/// aggregation key in the [`ValidationResult`](crate::ValidationResult),
/// a failure message, and a stop flag. Rules are built fresh on every
/// [`Validator::validate`](crate::Validator::validate) call and discarded
/// after use.
pub trait ValidationRule {
    /// Label identifying the field or entity this rule checks.
    fn label(&self) -> &str;

    /// Message recorded when the rule fails.
    ///
    /// The custom message if one was configured, the rule's default
    /// otherwise.
    fn error_message(&self) -> String;

    /// If true, a failure of this rule halts further rule execution.
    fn stop_if_invalid(&self) -> bool;

    /// Evaluate the predicate against the resolved target.
    ///
    /// `Ok(false)` means the predicate was violated; `Err` means the
    /// target could not be resolved. Must be deterministic given the same
    /// target and must not mutate anything.
    fn apply(&self) -> Result<bool, ResolutionError>;
}
