// Validator orchestration

use crate::{ResolutionError, ValidationError, ValidationResult, ValidationRule};

/// Orchestrates an ordered rule sequence against a subject.
///
/// Implementors hold their own subject (a model instance, a map, a
/// scalar) and build the rule list from it in [`get_rules`]. The list is
/// recomputed on every [`validate`] call so rules always capture the
/// subject's current state; the validator never mutates the subject.
///
/// ```
/// use rulekit::{FullStringRule, MinValueRule, ResolutionError, ValidationRule, Validator};
///
/// struct User {
///     name: String,
///     age: u8,
/// }
///
/// struct UserValidator {
///     data: User,
/// }
///
/// impl Validator for UserValidator {
///     fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
///         Ok(vec![
///             Box::new(FullStringRule::new(self.data.name.as_str(), "name")),
///             Box::new(MinValueRule::new(self.data.age, "age", 18)),
///         ])
///     }
/// }
///
/// let validator = UserValidator {
///     data: User { name: "Alice".to_string(), age: 30 },
/// };
/// assert!(validator.validate().is_successful());
/// ```
///
/// [`get_rules`]: Validator::get_rules
/// [`validate`]: Validator::validate
pub trait Validator {
    /// Build the ordered rule list for the current subject state.
    ///
    /// An `Err` here (a lookup failing while the list is assembled) is
    /// caught by [`validate`](Validator::validate) and recorded as a
    /// single error under the validator's [`name`](Validator::name).
    fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError>;

    /// Fallback label for errors not attributable to a single rule.
    ///
    /// Defaults to the implementor's type name.
    fn name(&self) -> String
    where
        Self: Sized,
    {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base).to_string()
    }

    /// Run every rule in order and aggregate the outcome.
    ///
    /// A rule whose predicate fails has its message recorded under its
    /// label; a rule whose target cannot be resolved has the resolution
    /// error recorded the same way. Neither stops the pass unless the
    /// rule is marked stop-if-invalid, in which case no further rules
    /// run. This method never panics on bad input; callers always get a
    /// complete report.
    fn validate(&self) -> ValidationResult
    where
        Self: Sized,
    {
        let mut result = ValidationResult::new();

        let rules = match self.get_rules() {
            Ok(rules) => rules,
            Err(error) => {
                tracing::warn!(validator = %self.name(), %error, "failed to build rule list");
                result.append_error(self.name(), error.to_string());
                return result;
            }
        };

        for rule in &rules {
            let failed = match rule.apply() {
                Ok(true) => false,
                Ok(false) => {
                    tracing::debug!(label = rule.label(), "rule failed");
                    result.append_error(rule.label(), rule.error_message());
                    true
                }
                Err(error) => {
                    tracing::debug!(label = rule.label(), %error, "target resolution failed");
                    result.append_error(rule.label(), error.to_string());
                    true
                }
            };
            if failed && rule.stop_if_invalid() {
                tracing::debug!(label = rule.label(), "stopping rule processing early");
                break;
            }
        }

        result
    }

    /// Validate and convert an unsuccessful outcome into an error.
    fn check(&self) -> Result<(), ValidationError>
    where
        Self: Sized,
    {
        let result = self.validate();
        if result.is_successful() {
            Ok(())
        } else {
            Err(ValidationError::new(result))
        }
    }
}

/// Run `scope` only if `validator` accepts its subject.
///
/// The scoped counterpart of [`Validator::check`]: on success the
/// closure runs and its output is returned; on failure the closure never
/// runs and the [`ValidationError`] carries the full report.
///
/// ```
/// use rulekit::{guarded, FullStringRule, ResolutionError, ValidationRule, Validator};
///
/// struct NameValidator {
///     data: String,
/// }
///
/// impl Validator for NameValidator {
///     fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
///         Ok(vec![Box::new(FullStringRule::new(self.data.as_str(), "name"))])
///     }
/// }
///
/// let validator = NameValidator { data: "Alice".to_string() };
/// let greeting = guarded(&validator, || format!("hello {}", validator.data));
/// assert_eq!(greeting.unwrap(), "hello Alice");
///
/// let validator = NameValidator { data: "  ".to_string() };
/// let error = guarded(&validator, || ()).unwrap_err();
/// assert!(!error.result().is_successful());
/// ```
pub fn guarded<V, F, R>(validator: &V, scope: F) -> Result<R, ValidationError>
where
    V: Validator,
    F: FnOnce() -> R,
{
    validator.check()?;
    Ok(scope())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FullStringRule, MaxValueRule, MinValueRule, Target};
    use std::collections::HashMap;

    struct EmptyValidator;

    impl Validator for EmptyValidator {
        fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
            Ok(Vec::new())
        }
    }

    struct NumberValidator {
        data: i64,
    }

    impl Validator for NumberValidator {
        fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
            Ok(vec![
                Box::new(MinValueRule::new(self.data, "Field A", 200).with_message("GtRuleFail")),
                Box::new(MaxValueRule::new(self.data, "Field A", 0).with_message("LtRuleFail")),
            ])
        }
    }

    struct BrokenListValidator;

    impl Validator for BrokenListValidator {
        fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
            Err(ResolutionError::MissingAttribute("address".to_string()))
        }
    }

    #[test]
    fn test_validate_succeeds_with_no_rules() {
        let result = EmptyValidator.validate();
        assert!(result.is_successful());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_validate_succeeds_when_all_rules_pass() {
        struct PassingValidator {
            data: i64,
        }

        impl Validator for PassingValidator {
            fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
                Ok(vec![
                    Box::new(MinValueRule::new(self.data, "Field A", 5)),
                    Box::new(MaxValueRule::new(self.data, "Field A", 100)),
                ])
            }
        }

        let result = PassingValidator { data: 20 }.validate();
        assert!(result.is_successful());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_multiple_failures_on_same_label_accumulate_in_order() {
        let result = NumberValidator { data: 100 }.validate();
        assert!(!result.is_successful());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(
            result.errors().get("Field A"),
            Some(&vec!["GtRuleFail".to_string(), "LtRuleFail".to_string()])
        );
    }

    #[test]
    fn test_failures_on_distinct_labels_use_distinct_keys() {
        struct TwoFieldValidator {
            a: i64,
            b: i64,
        }

        impl Validator for TwoFieldValidator {
            fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
                Ok(vec![
                    Box::new(MinValueRule::new(self.a, "Field A", 200)),
                    Box::new(MaxValueRule::new(self.b, "Field B", 0)),
                ])
            }
        }

        let result = TwoFieldValidator { a: 20, b: 1 }.validate();
        assert!(!result.is_successful());
        assert_eq!(result.errors().len(), 2);
        assert_eq!(
            result.errors().get("Field A"),
            Some(&vec![MinValueRule::<i64>::DEFAULT_ERROR_MESSAGE.to_string()])
        );
        assert_eq!(
            result.errors().get("Field B"),
            Some(&vec![MaxValueRule::<i64>::DEFAULT_ERROR_MESSAGE.to_string()])
        );
    }

    #[test]
    fn test_stop_if_invalid_halts_rule_processing() {
        struct StoppingValidator {
            data: i64,
        }

        impl Validator for StoppingValidator {
            fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
                Ok(vec![
                    Box::new(
                        MinValueRule::new(self.data, "Field A", 200)
                            .with_message("GtRuleFail")
                            .with_stop(),
                    ),
                    Box::new(MaxValueRule::new(self.data, "Field A", 0).with_message("LtRuleFail")),
                ])
            }
        }

        let result = StoppingValidator { data: 100 }.validate();
        assert!(!result.is_successful());
        assert_eq!(
            result.errors().get("Field A"),
            Some(&vec!["GtRuleFail".to_string()])
        );
    }

    #[test]
    fn test_rule_list_construction_failure_is_recorded_not_propagated() {
        let result = BrokenListValidator.validate();
        assert!(!result.is_successful());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(
            result.errors().get("BrokenListValidator"),
            Some(&vec!["Missing attribute: address.".to_string()])
        );
    }

    #[test]
    fn test_target_resolution_failure_is_recorded_under_rule_label() {
        struct PayloadValidator {
            data: HashMap<&'static str, String>,
        }

        impl Validator for PayloadValidator {
            fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
                Ok(vec![Box::new(FullStringRule::new(
                    Target::deferred(|| {
                        self.data
                            .get("name")
                            .map(String::as_str)
                            .ok_or_else(|| ResolutionError::MissingKey("name".to_string()))
                    }),
                    "name",
                ))])
            }
        }

        let result = PayloadValidator { data: HashMap::new() }.validate();
        assert!(!result.is_successful());
        assert_eq!(
            result.errors().get("name"),
            Some(&vec!["Missing key: name.".to_string()])
        );
    }

    #[test]
    fn test_rule_list_is_rebuilt_on_every_call() {
        use std::cell::Cell;

        struct CountingValidator {
            calls: Cell<u32>,
        }

        impl Validator for CountingValidator {
            fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
                self.calls.set(self.calls.get() + 1);
                Ok(Vec::new())
            }
        }

        let validator = CountingValidator { calls: Cell::new(0) };
        validator.validate();
        validator.validate();
        assert_eq!(validator.calls.get(), 2);
    }

    #[test]
    fn test_check_raises_on_failure() {
        assert!(NumberValidator { data: 500 }.check().is_err());

        let error = NumberValidator { data: 100 }.check().unwrap_err();
        assert_eq!(error.to_string(), "Data did not validate.");
        assert_eq!(
            error.result().errors().get("Field A"),
            Some(&vec!["GtRuleFail".to_string(), "LtRuleFail".to_string()])
        );
    }

    #[test]
    fn test_check_passes_on_success() {
        assert!(EmptyValidator.check().is_ok());
    }

    #[test]
    fn test_guarded_runs_scope_only_on_success() {
        let outcome = guarded(&EmptyValidator, || 7);
        assert_eq!(outcome.unwrap(), 7);

        let outcome = guarded(&NumberValidator { data: 100 }, || 7);
        let error = outcome.unwrap_err();
        assert!(!error.result().is_successful());
    }
}
