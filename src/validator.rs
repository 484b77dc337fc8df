use crate::category::{Category, CategorySelector};
use crate::patterns::PatternMatcher;
use crate::region::RegionPatternSet;
use crate::table::RegionTable;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::trace;

/// Outcome of checking one candidate.
///
/// Unknown regions and category names are reported here rather than as errors
/// and are never folded into `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "category", rename_all = "snake_case")]
pub enum ValidationResult {
    /// Carries the category that matched (the first one when several were tried).
    Valid(Category),
    Invalid,
    UnknownRegion,
    UnknownCategory,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            ValidationResult::Valid(category) => Some(*category),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationResult::Valid(_) => "valid",
            ValidationResult::Invalid => "invalid",
            ValidationResult::UnknownRegion => "unknown_region",
            ValidationResult::UnknownCategory => "unknown_category",
        }
    }
}

/// Candidate rewriting applied before matching. Everything is off by default:
/// without options a candidate must already be a bare national digit string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Drop whitespace, `-`, `(`, `)` and `.`.
    pub strip_formatting: bool,
    /// Reduce `+<calling code><number>` and `00<calling code><number>` to `<number>`.
    pub accept_international: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Possible,
    Full,
}

impl RegionTable {
    /// Validates `candidate` as a `category` number of `region`.
    ///
    /// `category` is a category name, `any`, or a comma-separated list of names.
    pub fn validate(&self, region: &str, category: &str, candidate: &str) -> ValidationResult {
        self.validate_with(region, category, candidate, &ValidationOptions::default())
    }

    pub fn validate_with(
        &self,
        region: &str,
        category: &str,
        candidate: &str,
        options: &ValidationOptions,
    ) -> ValidationResult {
        self.evaluate(region, category, candidate, options, Stage::Full)
    }

    /// Runs only the possible-pattern screen. A `Valid` here means plausible,
    /// not valid.
    pub fn is_possible(
        &self,
        region: &str,
        category: &str,
        candidate: &str,
        options: &ValidationOptions,
    ) -> ValidationResult {
        self.evaluate(region, category, candidate, options, Stage::Possible)
    }

    /// Every category of `region` the candidate is valid for, in evaluation
    /// order. `None` for an unknown region.
    pub fn classify(&self, region: &str, candidate: &str, options: &ValidationOptions) -> Option<Vec<Category>> {
        let region = self.region(region)?;
        let number = normalize(candidate, region.calling_code(), options);

        Some(
            region
                .categories()
                .filter(|(_, rule)| rule.is_valid(&number))
                .map(|(category, _)| category)
                .collect(),
        )
    }

    /// A reusable validator bound to one region, or `None` if it is unknown.
    pub fn validator(&self, region: &str) -> Option<PhoneNumberValidator<'_>> {
        self.region(region).map(PhoneNumberValidator::new)
    }

    fn evaluate(
        &self,
        region: &str,
        category: &str,
        candidate: &str,
        options: &ValidationOptions,
        stage: Stage,
    ) -> ValidationResult {
        let Some(patterns) = self.region(region) else {
            trace!(region, "unknown region");
            return ValidationResult::UnknownRegion;
        };
        let Ok(selector) = category.parse::<CategorySelector>() else {
            trace!(region, category, "unknown category");
            return ValidationResult::UnknownCategory;
        };
        evaluate(patterns, &selector, candidate, options, stage)
    }
}

/// Checks candidates against one region with a fixed selector and options.
#[derive(Debug, Clone)]
pub struct PhoneNumberValidator<'t> {
    region: &'t RegionPatternSet,
    selector: CategorySelector,
    options: ValidationOptions,
}

impl<'t> PhoneNumberValidator<'t> {
    /// Defaults to any category and no candidate rewriting.
    pub fn new(region: &'t RegionPatternSet) -> Self {
        PhoneNumberValidator {
            region,
            selector: CategorySelector::Any,
            options: ValidationOptions::default(),
        }
    }

    pub fn with_selector(mut self, selector: impl Into<CategorySelector>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn region(&self) -> &'t RegionPatternSet {
        self.region
    }

    pub fn validate(&self, candidate: &str) -> ValidationResult {
        evaluate(self.region, &self.selector, candidate, &self.options, Stage::Full)
    }

    pub fn is_possible(&self, candidate: &str) -> ValidationResult {
        evaluate(self.region, &self.selector, candidate, &self.options, Stage::Possible)
    }
}

impl PatternMatcher for PhoneNumberValidator<'_> {
    fn matches(&self, value: &str) -> bool {
        self.validate(value).is_valid()
    }
}

fn evaluate(
    region: &RegionPatternSet,
    selector: &CategorySelector,
    candidate: &str,
    options: &ValidationOptions,
    stage: Stage,
) -> ValidationResult {
    let number = normalize(candidate, region.calling_code(), options);

    // categories the region does not define simply never match
    let matched = selector.categories().into_iter().find(|&category| {
        region.rule(category).is_some_and(|rule| match stage {
            Stage::Possible => rule.is_possible(&number),
            Stage::Full => rule.is_valid(&number),
        })
    });

    let result = match matched {
        Some(category) => ValidationResult::Valid(category),
        None => ValidationResult::Invalid,
    };
    trace!(region = region.code(), ?selector, ?stage, outcome = result.as_str(), "validated candidate");
    result
}

/// Applies `options` to a raw candidate.
pub fn normalize<'a>(candidate: &'a str, calling_code: Option<&str>, options: &ValidationOptions) -> Cow<'a, str> {
    let mut number = Cow::Borrowed(candidate);

    if options.strip_formatting && number.contains(is_formatting) {
        number = Cow::Owned(number.chars().filter(|&c| !is_formatting(c)).collect());
    }

    if options.accept_international {
        let national = calling_code.and_then(|code| strip_international(&number, code).map(str::to_string));
        if let Some(national) = national {
            number = Cow::Owned(national);
        }
    }

    number
}

fn is_formatting(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '(' | ')' | '.')
}

fn strip_international<'a>(number: &'a str, calling_code: &str) -> Option<&'a str> {
    let rest = number.strip_prefix('+').or_else(|| number.strip_prefix("00"))?;
    rest.strip_prefix(calling_code.trim())
}
