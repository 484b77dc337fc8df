use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phone number usage classes a region can define patterns for.
///
/// The declaration order is the evaluation order used whenever more than one
/// category is tried, so `Ord` and `Category::ALL` agree with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Fixed,
    Mobile,
    Tollfree,
    Premium,
    Personal,
    Emergency,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Fixed,
        Category::Mobile,
        Category::Tollfree,
        Category::Premium,
        Category::Personal,
        Category::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Fixed => "fixed",
            Category::Mobile => "mobile",
            Category::Tollfree => "tollfree",
            Category::Premium => "premium",
            Category::Personal => "personal",
            Category::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name is not one of the fixed category names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategoryName(pub String);

impl fmt::Display for UnknownCategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown phone number category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategoryName {}

impl FromStr for Category {
    type Err = UnknownCategoryName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategoryName(name.to_string()))
    }
}

/// Which categories a candidate is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelector {
    /// Every category the region defines.
    Any,
    One(Category),
    /// A subset, still walked in `Category::ALL` order.
    AnyOf(Vec<Category>),
}

impl CategorySelector {
    /// Categories to try, in evaluation order, without duplicates.
    pub fn categories(&self) -> Vec<Category> {
        match self {
            CategorySelector::Any => Category::ALL.to_vec(),
            CategorySelector::One(c) => vec![*c],
            CategorySelector::AnyOf(set) => Category::ALL
                .iter()
                .copied()
                .filter(|c| set.contains(c))
                .collect(),
        }
    }
}

impl From<Category> for CategorySelector {
    fn from(category: Category) -> Self {
        CategorySelector::One(category)
    }
}

impl FromStr for CategorySelector {
    type Err = UnknownCategoryName;

    /// Accepts `any`, a single category name, or a comma-separated list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(CategorySelector::Any);
        }
        if !s.contains(',') {
            return s.parse::<Category>().map(CategorySelector::One);
        }

        let mut set = Vec::new();
        for name in s.split(',') {
            let category = name.parse::<Category>()?;
            if !set.contains(&category) {
                set.push(category);
            }
        }
        Ok(CategorySelector::AnyOf(set))
    }
}
