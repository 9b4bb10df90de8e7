use serde::{Deserialize, Serialize};

/// The fixed set of categories an expense can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Entertainment,
    Travel,
    Shopping,
    Grocery,
    Others,
}

impl Category {
    /// All categories, in the order they are offered to the user.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Entertainment,
        Category::Travel,
        Category::Shopping,
        Category::Grocery,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Shopping => "Shopping",
            Category::Grocery => "Grocery",
            Category::Others => "Others",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Category::Food),
            "entertainment" => Some(Category::Entertainment),
            "travel" => Some(Category::Travel),
            "shopping" => Some(Category::Shopping),
            "grocery" => Some(Category::Grocery),
            "others" => Some(Category::Others),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            let parsed = Category::from_str(category.as_str()).unwrap();
            assert_eq!(category, parsed);
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::from_str("food"), Some(Category::Food));
        assert_eq!(Category::from_str(" TRAVEL "), Some(Category::Travel));
        assert_eq!(Category::from_str("Rent"), None);
        assert_eq!(Category::from_str(""), None);
    }

    #[test]
    fn test_category_serializes_by_name() {
        let json = serde_json::to_string(&Category::Grocery).unwrap();
        assert_eq!(json, "\"Grocery\"");
    }
}
