//! Rule-based data validation
//!
//! Runs an ordered collection of independent validation rules against an
//! in-memory subject and aggregates the outcome into a single report.
//! A [`ValidationRule`] binds one boolean predicate to a target value, a
//! label and a failure message; a [`Validator`] executes a rule sequence
//! with short-circuit and error-isolation semantics; a
//! [`ValidationResult`] collects failure messages per label and exposes
//! the overall verdict.
//!
//! # Examples
//!
//! ## Validating a model
//!
//! ```
//! use rulekit::{
//!     ChoiceRule, FullStringRule, MinValueRule, ResolutionError, ValidationRule, Validator,
//! };
//!
//! struct User {
//!     name: String,
//!     gender: String,
//!     age: u8,
//! }
//!
//! struct UserValidator {
//!     data: User,
//! }
//!
//! impl Validator for UserValidator {
//!     fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
//!         Ok(vec![
//!             Box::new(FullStringRule::new(self.data.name.as_str(), "name")),
//!             Box::new(ChoiceRule::new(self.data.gender.as_str(), "gender", ["M", "F"])),
//!             Box::new(MinValueRule::new(self.data.age, "age", 18)),
//!         ])
//!     }
//! }
//!
//! let validator = UserValidator {
//!     data: User { name: "  ".to_string(), gender: "X".to_string(), age: 30 },
//! };
//! let result = validator.validate();
//! assert!(!result.is_successful());
//! assert_eq!(result.errors().len(), 2);
//! ```
//!
//! ## Deferred targets
//!
//! Targets may be resolved lazily so that a failing lookup is recorded as
//! a validation error instead of crashing the pass:
//!
//! ```
//! use rulekit::{FullStringRule, ResolutionError, Target, ValidationRule, Validator};
//! use std::collections::HashMap;
//!
//! struct PayloadValidator {
//!     data: HashMap<String, String>,
//! }
//!
//! impl Validator for PayloadValidator {
//!     fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
//!         Ok(vec![Box::new(FullStringRule::new(
//!             Target::deferred(|| {
//!                 self.data
//!                     .get("name")
//!                     .map(String::as_str)
//!                     .ok_or_else(|| ResolutionError::MissingKey("name".to_string()))
//!             }),
//!             "name",
//!         ))])
//!     }
//! }
//!
//! let validator = PayloadValidator { data: HashMap::new() };
//! let result = validator.validate();
//! assert_eq!(
//!     result.errors().get("name"),
//!     Some(&vec!["Missing key: name.".to_string()])
//! );
//! ```
//!
//! ## Validate or raise
//!
//! ```
//! use rulekit::{guarded, MinValueRule, ResolutionError, ValidationRule, Validator};
//!
//! struct AgeValidator {
//!     data: u8,
//! }
//!
//! impl Validator for AgeValidator {
//!     fn get_rules(&self) -> Result<Vec<Box<dyn ValidationRule + '_>>, ResolutionError> {
//!         Ok(vec![Box::new(MinValueRule::new(self.data, "age", 18))])
//!     }
//! }
//!
//! let validator = AgeValidator { data: 16 };
//! let error = guarded(&validator, || "admitted").unwrap_err();
//! assert_eq!(error.to_string(), "Data did not validate.");
//! assert!(error.result().errors().contains_key("age"));
//! ```

mod errors;
mod result;
mod rule;
mod rules;
mod validator;

pub use errors::*;
pub use result::*;
pub use rule::*;
pub use rules::*;
pub use validator::*;
