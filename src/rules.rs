// Built-in rules

use crate::{ResolutionError, Target, ValidationRule};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::any::Any;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Range, RangeInclusive};

// Optional-message and stop-flag builders shared by every rule.
macro_rules! rule_options {
    () => {
        /// Replace the rule's default error message.
        pub fn with_message(mut self, message: impl Into<String>) -> Self {
            self.message = Some(message.into());
            self
        }

        /// Halt the validator if this rule fails.
        pub fn with_stop(mut self) -> Self {
            self.stop_if_invalid = true;
            self
        }
    };
}

// label/message/stop plumbing of the ValidationRule impl.
macro_rules! rule_verdict {
    () => {
        fn label(&self) -> &str {
            &self.label
        }

        fn error_message(&self) -> String {
            self.message
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_ERROR_MESSAGE.to_string())
        }

        fn stop_if_invalid(&self) -> bool {
            self.stop_if_invalid
        }
    };
}

/// Anything with a measurable number of elements.
///
/// Implemented for strings, slices, vectors and the std map/set types so
/// the length rules can bound any sized container.
pub trait Length {
    fn length(&self) -> usize;
}

impl Length for str {
    fn length(&self) -> usize {
        self.len()
    }
}

impl Length for String {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> Length for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> Length for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> Length for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> Length for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<L: Length + ?Sized> Length for &L {
    fn length(&self) -> usize {
        (**self).length()
    }
}

/// Duplicate detection for [`UniqueItemsRule`].
///
/// For mapping types uniqueness is checked over the *values*, not the
/// keys (keys are unique by construction).
pub trait UniqueItems {
    fn has_unique_items(&self) -> bool;
}

impl<T: Eq + Hash> UniqueItems for [T] {
    fn has_unique_items(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.len());
        self.iter().all(|item| seen.insert(item))
    }
}

impl<T: Eq + Hash> UniqueItems for Vec<T> {
    fn has_unique_items(&self) -> bool {
        self.as_slice().has_unique_items()
    }
}

impl<K, V: Eq + Hash, S> UniqueItems for HashMap<K, V, S> {
    fn has_unique_items(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.len());
        self.values().all(|value| seen.insert(value))
    }
}

impl<K, V: Eq + Hash> UniqueItems for BTreeMap<K, V> {
    fn has_unique_items(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.len());
        self.values().all(|value| seen.insert(value))
    }
}

impl<U: UniqueItems + ?Sized> UniqueItems for &U {
    fn has_unique_items(&self) -> bool {
        (**self).has_unique_items()
    }
}

/// Checks that the target is a value of the expected type.
///
/// The target is taken as `&dyn Any`, so this rule is for payloads whose
/// concrete type is erased (e.g. heterogeneous configuration values).
///
/// ```
/// use rulekit::{TypeRule, ValidationRule};
/// use std::any::Any;
///
/// let value = 42;
/// let rule = TypeRule::<String>::new(&value as &dyn Any, "my_object");
/// assert_eq!(rule.apply(), Ok(false));
/// ```
pub struct TypeRule<'a, E: Any> {
    target: Target<'a, &'a dyn Any>,
    label: String,
    message: Option<String>,
    stop_if_invalid: bool,
    expected: PhantomData<E>,
}

impl<'a, E: Any> TypeRule<'a, E> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str =
        "Object is not an instance of the expected type.";

    pub fn new(target: impl Into<Target<'a, &'a dyn Any>>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            message: None,
            stop_if_invalid: false,
            expected: PhantomData,
        }
    }

    rule_options!();
}

impl<'a, E: Any> ValidationRule for TypeRule<'a, E> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| (**value).is::<E>())
    }
}

/// Checks that the target string is non-empty after trimming whitespace.
pub struct FullStringRule<'a> {
    target: Target<'a, &'a str>,
    label: String,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a> FullStringRule<'a> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Invalid or empty string.";

    pub fn new(target: impl Into<Target<'a, &'a str>>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a> ValidationRule for FullStringRule<'a> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| !value.trim().is_empty())
    }
}

/// Checks that the target is one of a finite set of options.
pub struct ChoiceRule<'a, T: PartialEq> {
    target: Target<'a, T>,
    label: String,
    choices: Vec<T>,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: PartialEq> ChoiceRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Value not found in available choices.";

    pub fn new(
        target: impl Into<Target<'a, T>>,
        label: impl Into<String>,
        choices: impl Into<Vec<T>>,
    ) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            choices: choices.into(),
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: PartialEq> ValidationRule for ChoiceRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| self.choices.contains(value))
    }
}

/// Checks that the target is greater than or equal to a reference value.
pub struct MinValueRule<'a, T: PartialOrd> {
    target: Target<'a, T>,
    label: String,
    min_value: T,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: PartialOrd> MinValueRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Value is smaller than expected one.";

    pub fn new(target: impl Into<Target<'a, T>>, label: impl Into<String>, min_value: T) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            min_value,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: PartialOrd> ValidationRule for MinValueRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| value >= &self.min_value)
    }
}

/// Checks that the target is less than or equal to a reference value.
pub struct MaxValueRule<'a, T: PartialOrd> {
    target: Target<'a, T>,
    label: String,
    max_value: T,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: PartialOrd> MaxValueRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Value is greater than expected one.";

    pub fn new(target: impl Into<Target<'a, T>>, label: impl Into<String>, max_value: T) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            max_value,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: PartialOrd> ValidationRule for MaxValueRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| value <= &self.max_value)
    }
}

/// Checks that the target's length is at least a reference value.
pub struct MinLengthRule<'a, T: Length> {
    target: Target<'a, T>,
    label: String,
    min_length: usize,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: Length> MinLengthRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Length is smaller than expected one.";

    pub fn new(target: impl Into<Target<'a, T>>, label: impl Into<String>, min_length: usize) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            min_length,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: Length> ValidationRule for MinLengthRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| value.length() >= self.min_length)
    }
}

/// Checks that the target's length is at most a reference value.
pub struct MaxLengthRule<'a, T: Length> {
    target: Target<'a, T>,
    label: String,
    max_length: usize,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: Length> MaxLengthRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Length is greater than expected one.";

    pub fn new(target: impl Into<Target<'a, T>>, label: impl Into<String>, max_length: usize) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            max_length,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: Length> ValidationRule for MaxLengthRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| value.length() <= self.max_length)
    }
}

/// Checks that the target falls within a half-open range (`start <= x < end`).
pub struct RangeRule<'a, T: PartialOrd> {
    target: Target<'a, T>,
    label: String,
    valid_range: Range<T>,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: PartialOrd> RangeRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Value is out of range.";

    pub fn new(
        target: impl Into<Target<'a, T>>,
        label: impl Into<String>,
        valid_range: Range<T>,
    ) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            valid_range,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: PartialOrd> ValidationRule for RangeRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| self.valid_range.contains(value))
    }
}

/// Checks that the target falls within a closed interval (`min <= x <= max`).
pub struct IntervalRule<'a, T: PartialOrd> {
    target: Target<'a, T>,
    label: String,
    interval: RangeInclusive<T>,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: PartialOrd> IntervalRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Value is not in the expected interval.";

    pub fn new(
        target: impl Into<Target<'a, T>>,
        label: impl Into<String>,
        interval: RangeInclusive<T>,
    ) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            interval,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: PartialOrd> ValidationRule for IntervalRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| self.interval.contains(value))
    }
}

/// Checks that the target string matches a regular expression.
///
/// Shared patterns are best compiled once with `once_cell::sync::Lazy`
/// and passed through [`PatternRule::from_regex`]:
///
/// ```
/// use once_cell::sync::Lazy;
/// use regex::Regex;
/// use rulekit::{PatternRule, ValidationRule};
///
/// static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}-\d{4}$").expect("valid pattern"));
///
/// let rule = PatternRule::from_regex("ABC-1234", "code", CODE.clone());
/// assert_eq!(rule.apply(), Ok(true));
/// ```
pub struct PatternRule<'a> {
    target: Target<'a, &'a str>,
    label: String,
    pattern: Regex,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a> PatternRule<'a> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Value does not match expected pattern.";

    /// Compile `pattern` and build the rule; fails on an invalid pattern.
    pub fn new(
        target: impl Into<Target<'a, &'a str>>,
        label: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(target, label, Regex::new(pattern)?))
    }

    /// Build the rule from an already-compiled regex.
    pub fn from_regex(
        target: impl Into<Target<'a, &'a str>>,
        label: impl Into<String>,
        pattern: Regex,
    ) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            pattern,
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a> ValidationRule for PatternRule<'a> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| self.pattern.is_match(value))
    }
}

/// Checks that the target date is strictly before now.
pub struct PastDateRule<'a> {
    target: Target<'a, DateTime<Utc>>,
    label: String,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a> PastDateRule<'a> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Not a past date.";

    pub fn new(target: impl Into<Target<'a, DateTime<Utc>>>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a> ValidationRule for PastDateRule<'a> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| *value < Utc::now())
    }
}

/// Checks that the target date is strictly after now.
pub struct FutureDateRule<'a> {
    target: Target<'a, DateTime<Utc>>,
    label: String,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a> FutureDateRule<'a> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "Not a future date.";

    pub fn new(target: impl Into<Target<'a, DateTime<Utc>>>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a> ValidationRule for FutureDateRule<'a> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| *value > Utc::now())
    }
}

/// Checks that the target collection contains no duplicate items.
pub struct UniqueItemsRule<'a, T: UniqueItems> {
    target: Target<'a, T>,
    label: String,
    message: Option<String>,
    stop_if_invalid: bool,
}

impl<'a, T: UniqueItems> UniqueItemsRule<'a, T> {
    pub const DEFAULT_ERROR_MESSAGE: &'static str = "List contains duplicated items.";

    pub fn new(target: impl Into<Target<'a, T>>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
            message: None,
            stop_if_invalid: false,
        }
    }

    rule_options!();
}

impl<'a, T: UniqueItems> ValidationRule for UniqueItemsRule<'a, T> {
    rule_verdict!();

    fn apply(&self) -> Result<bool, ResolutionError> {
        self.target.with(|value| value.has_unique_items())
    }
}
