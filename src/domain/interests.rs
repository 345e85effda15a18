use std::collections::BTreeMap;

/// Interest categories of a list, keyed by category id.
pub type InterestCatalogue = BTreeMap<String, InterestCategory>;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct InterestCategory {
    pub title: String,
    /// Interest id -> interest name.
    pub children: BTreeMap<String, String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct InterestCategoriesResponse {
    #[serde(default)]
    pub categories: Vec<InterestCategoryItem>,
}

#[derive(Debug, serde::Deserialize)]
pub struct InterestCategoryItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct InterestsResponse {
    #[serde(default)]
    pub interests: Vec<InterestItem>,
}

#[derive(Debug, serde::Deserialize)]
pub struct InterestItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl InterestCategory {
    pub fn new(title: String, interests: InterestsResponse) -> InterestCategory {
        let children = interests
            .interests
            .into_iter()
            .map(|interest| (interest.id, interest.name))
            .collect();

        InterestCategory { title, children }
    }
}
