use crate::category::Category;
use crate::error::{PatternKind, TableError};
use crate::patterns::{inclusion, Pattern, PatternMatcher};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One region as written in a table source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calling_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub categories: BTreeMap<String, RuleSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSource {
    pub shape: String,
    /// Falls back to the region's general possible pattern when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// The compiled pair of patterns for one category of one region.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    shape: Pattern,
    possible: Pattern,
    examples: Vec<String>,
}

impl CategoryRule {
    pub fn shape(&self) -> &Pattern {
        &self.shape
    }

    pub fn possible(&self) -> &Pattern {
        &self.possible
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }

    /// Cheap plausibility screen (length and leading digits).
    pub fn is_possible(&self, number: &str) -> bool {
        self.possible.is_match(number)
    }

    /// Both stages: the possible pattern rejects first, the shape pattern decides.
    pub fn is_valid(&self, number: &str) -> bool {
        self.is_possible(number) && self.shape.is_match(number)
    }
}

impl PatternMatcher for CategoryRule {
    fn matches(&self, value: &str) -> bool {
        self.is_valid(value)
    }
}

#[derive(Debug, Clone)]
pub struct RegionPatternSet {
    code: String,
    calling_code: Option<String>,
    country: Option<String>,
    categories: BTreeMap<Category, CategoryRule>,
}

impl RegionPatternSet {
    /// Compiles and checks a region. Fails on the first data defect.
    pub fn compile(code: &str, source: &RegionSource) -> Result<RegionPatternSet, TableError> {
        if code.is_empty() {
            return Err(TableError::EmptyRegionCode);
        }

        let mut rules: BTreeMap<Category, &RuleSource> = BTreeMap::new();
        for (name, rule) in &source.categories {
            let category = name.parse::<Category>().map_err(|_| TableError::UnknownCategory {
                region: code.to_string(),
                name: name.clone(),
            })?;
            if rules.insert(category, rule).is_some() {
                return Err(TableError::DuplicateCategory {
                    region: code.to_string(),
                    category,
                });
            }
        }

        let general = rules.get(&Category::General).ok_or_else(|| TableError::MissingGeneral {
            region: code.to_string(),
        })?;
        let general_possible = general.possible.clone();

        let mut categories = BTreeMap::new();
        for (category, rule) in rules {
            let possible = rule
                .possible
                .as_deref()
                .or(general_possible.as_deref())
                .ok_or_else(|| TableError::MissingPossible {
                    region: code.to_string(),
                    category,
                })?;

            let compiled = CategoryRule {
                shape: compile_pattern(code, category, PatternKind::Shape, &rule.shape)?,
                possible: compile_pattern(code, category, PatternKind::Possible, possible)?,
                examples: rule.examples.clone(),
            };
            check_superset(code, category, &compiled)?;
            check_examples(code, category, &compiled)?;
            categories.insert(category, compiled);
        }

        debug!(region = code, categories = categories.len(), "compiled region patterns");

        Ok(RegionPatternSet {
            code: code.to_string(),
            calling_code: source.calling_code.clone(),
            country: source.country.clone(),
            categories,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn calling_code(&self) -> Option<&str> {
        self.calling_code.as_deref()
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn rule(&self, category: Category) -> Option<&CategoryRule> {
        self.categories.get(&category)
    }

    /// Defined categories in evaluation order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &CategoryRule)> {
        self.categories.iter().map(|(category, rule)| (*category, rule))
    }
}

fn compile_pattern(
    region: &str,
    category: Category,
    kind: PatternKind,
    source: &str,
) -> Result<Pattern, TableError> {
    Pattern::compile(source).map_err(|source| TableError::Pattern {
        region: region.to_string(),
        category,
        kind,
        source,
    })
}

/// Fails unless every string the shape pattern accepts is accepted by the
/// possible pattern too.
fn check_superset(region: &str, category: Category, rule: &CategoryRule) -> Result<(), TableError> {
    let gap = inclusion::counterexample(&rule.shape, &rule.possible).map_err(|source| TableError::Inclusion {
        region: region.to_string(),
        category,
        source,
    })?;

    match gap {
        Some(witness) => Err(TableError::NotSuperset {
            region: region.to_string(),
            category,
            witness: String::from_utf8_lossy(&witness).into_owned(),
        }),
        None => {
            debug!(region, %category, "possible pattern covers shape pattern");
            Ok(())
        }
    }
}

fn check_examples(region: &str, category: Category, rule: &CategoryRule) -> Result<(), TableError> {
    for example in &rule.examples {
        let failed = if !rule.shape.is_match(example) {
            Some(PatternKind::Shape)
        } else if !rule.possible.is_match(example) {
            Some(PatternKind::Possible)
        } else {
            None
        };

        if let Some(kind) = failed {
            return Err(TableError::Example {
                region: region.to_string(),
                category,
                kind,
                example: example.clone(),
            });
        }
    }
    Ok(())
}
