use serde::{Deserialize, Serialize};

/// The content backend refuses pages larger than this.
pub const MAX_POSTS_PER_PAGE: u32 = 100;

/// Filters for the blog listing. Unset or empty filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogQuery {
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub categories: Vec<u32>,
}

impl BlogQuery {
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: u32) -> Self {
        self.categories.push(category);
        self
    }

    /// Query pairs in wire order; embedded resources are always requested.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);

        if let Some(per_page) = self.per_page.filter(|n| *n > 0) {
            pairs.push(("per_page", per_page.min(MAX_POSTS_PER_PAGE).to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if !self.categories.is_empty() {
            let categories = self
                .categories
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("categories", categories));
        }
        pairs.push(("_embed", "true".to_string()));

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_only_requests_embeds() {
        assert_eq!(
            BlogQuery::default().to_pairs(),
            vec![("_embed", "true".to_string())]
        );
    }

    #[test]
    fn filters_are_sent_in_order() {
        let query = BlogQuery::default()
            .per_page(5)
            .search("e-waste")
            .category(3)
            .category(7);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("per_page", "5".to_string()),
                ("search", "e-waste".to_string()),
                ("categories", "3,7".to_string()),
                ("_embed", "true".to_string()),
            ]
        );
    }

    #[test]
    fn page_size_is_capped_and_zero_is_dropped() {
        assert_eq!(
            BlogQuery::default().per_page(500).to_pairs()[0],
            ("per_page", "100".to_string())
        );
        assert_eq!(BlogQuery::default().per_page(0).to_pairs().len(), 1);
        assert_eq!(BlogQuery::default().search("").to_pairs().len(), 1);
    }
}
