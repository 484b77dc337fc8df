//! Phone number validation against per-region pattern tables.
//!
//! Each region defines up to seven categories (general, fixed, mobile,
//! tollfree, premium, personal, emergency) as a pair of regexes: a loose
//! *possible* pattern that cheaply rejects implausible input, and a *shape*
//! pattern that decides validity. Tables are compiled and checked once, then
//! shared read-only.
//!
//! ```
//! use regex_phone_validator::{Category, RegionTable, ValidationResult};
//!
//! let table = RegionTable::embedded().unwrap();
//! assert_eq!(table.validate("1-767", "emergency", "911"), ValidationResult::Valid(Category::Emergency));
//! assert_eq!(table.validate("1-767", "any", "9111"), ValidationResult::Invalid);
//! assert_eq!(table.validate("9-999", "any", "911"), ValidationResult::UnknownRegion);
//! ```

pub mod category;
pub mod error;
pub mod patterns;
pub mod region;
pub mod table;
pub mod validator;

pub use category::{Category, CategorySelector, UnknownCategoryName};
pub use error::{PatternKind, TableError};
pub use patterns::{Pattern, PatternMatcher};
pub use region::{CategoryRule, RegionPatternSet, RegionSource, RuleSource};
pub use table::{RegionTable, RegionTableBuilder};
pub use validator::{normalize, PhoneNumberValidator, ValidationOptions, ValidationResult};

/// Validates against the embedded table. Fails only if the embedded data itself is defective.
pub fn validate(region: &str, category: &str, candidate: &str) -> Result<ValidationResult, &'static TableError> {
    Ok(RegionTable::embedded()?.validate(region, category, candidate))
}
