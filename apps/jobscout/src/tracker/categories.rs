//! Maps free-text tracker roles onto the report's role categories.

use serde::{Deserialize, Serialize};

pub const SENIOR_JAVA: &str = "Software Developer (Java) - SENIOR/EXPERT";
pub const BACKEND_JAVA: &str = "Backend Java Developer - SENIOR";
pub const PRODUCT_OWNER: &str = "Product Owner";

/// Matches when any `any_of` keyword is in the role and, if `also_any_of` is
/// non-empty, one of those is too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: String,
    pub any_of: Vec<String>,
    #[serde(default)]
    pub also_any_of: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: &str, any_of: &[&str], also_any_of: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
            also_any_of: also_any_of.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(&self, role: &str) -> bool {
        let hit = |keywords: &[String]| {
            keywords
                .iter()
                .any(|k| !k.is_empty() && role.contains(k.to_lowercase().as_str()))
        };
        hit(&self.any_of) && (self.also_any_of.is_empty() || hit(&self.also_any_of))
    }
}

/// First matching rule wins. `None` leaves the company out of the tables.
pub fn categorize<'r>(role: &str, rules: &'r [CategoryRule]) -> Option<&'r str> {
    let role = role.trim().to_lowercase();
    if role.is_empty() {
        return None;
    }
    rules
        .iter()
        .find(|rule| rule.matches(&role))
        .map(|rule| rule.category.as_str())
}

pub fn default_rules() -> Vec<CategoryRule> {
    const JAVA_FAMILY: &[&str] = &["java", "software engineer", "full software", "lead software"];
    vec![
        CategoryRule::new(SENIOR_JAVA, &["not available"], &[]),
        CategoryRule::new(BACKEND_JAVA, &["backend"], &[]),
        CategoryRule::new(BACKEND_JAVA, &["specialist"], JAVA_FAMILY),
        CategoryRule::new(SENIOR_JAVA, JAVA_FAMILY, &[]),
        CategoryRule::new(PRODUCT_OWNER, &["product", "project", "program"], &[]),
        CategoryRule::new(SENIOR_JAVA, &["manager"], &[]),
    ]
}
