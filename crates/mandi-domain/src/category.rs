//! Category module - the fixed set of goods a post can be about

use std::fmt;

/// Category of goods a post or supplier deals in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Fresh produce
    Vegetables,

    /// Whole and ground spices
    Spices,

    /// Cooking oils
    Oil,

    /// Bags, wraps and containers
    Packaging,

    /// Milk, cheese, yogurt
    Dairy,

    /// Meat and poultry
    Meat,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 6] = [
        Category::Vegetables,
        Category::Spices,
        Category::Oil,
        Category::Packaging,
        Category::Dairy,
        Category::Meat,
    ];

    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Spices => "spices",
            Category::Oil => "oil",
            Category::Packaging => "packaging",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
        }
    }

    /// Parse a category from a string (case-insensitive)
    ///
    /// Unknown names yield `None`; callers treat that as "no category".
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vegetables" => Some(Category::Vegetables),
            "spices" => Some(Category::Spices),
            "oil" => Some(Category::Oil),
            "packaging" => Some(Category::Packaging),
            "dairy" => Some(Category::Dairy),
            "meat" => Some(Category::Meat),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Dairy"), Some(Category::Dairy));
        assert_eq!(Category::parse("  SPICES "), Some(Category::Spices));
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(Category::parse("electronics"), None);
        assert!("electronics".parse::<Category>().is_err());
    }
}
