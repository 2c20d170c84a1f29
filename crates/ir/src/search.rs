//! Product search and tag filtering for the store map

use crate::product::Product;

/// Maximum number of search suggestions
pub const SEARCH_RESULT_LIMIT: usize = 5;

/// Case-insensitive substring search on product names.
///
/// An empty (or blank) query matches nothing. At most `limit` products are
/// returned, in list order.
pub fn search_products<'a>(products: &'a [Product], query: &str, limit: usize) -> Vec<&'a Product> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| p.matches(query))
        .take(limit)
        .collect()
}

// ============================================================================
// Tag filters
// ============================================================================

/// Distinct non-empty product tags, in order of first appearance
pub fn available_tags(products: &[Product]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for product in products {
        let tag = product.tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Products whose tag is one of `selected`; an empty selection keeps all
pub fn filter_by_tags<'a>(products: &'a [Product], selected: &[String]) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| selected.is_empty() || selected.iter().any(|t| t == p.tag.trim()))
        .collect()
}

/// Add `tag` to the selection, or remove it when already selected
pub fn toggle_tag(selected: &mut Vec<String>, tag: &str) {
    match selected.iter().position(|t| t == tag) {
        Some(index) => {
            selected.remove(index);
        }
        None => selected.push(tag.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_search_ignores_case() {
        let products = vec![
            Product::new("Green Tea"),
            Product::new("Teapot"),
            Product::new("Coffee"),
        ];
        let results = search_products(&products, "TEA", SEARCH_RESULT_LIMIT);
        assert_eq!(names(&results), vec!["Green Tea", "Teapot"]);
    }

    #[test]
    fn test_search_limit() {
        let products: Vec<_> = (0..8).map(|i| Product::new(format!("Item {}", i))).collect();
        assert_eq!(search_products(&products, "item", SEARCH_RESULT_LIMIT).len(), 5);
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("Milk").with_tag("grocery"),
            Product::new("Radio").with_tag("electronics"),
            Product::new("Bread").with_tag("grocery"),
            Product::new("Scarf").with_tag("clothing"),
            Product::new("Mystery").with_tag(" "),
        ]
    }

    #[test]
    fn test_available_tags() {
        assert_eq!(
            available_tags(&catalog()),
            vec!["grocery", "electronics", "clothing"]
        );
        assert!(available_tags(&[]).is_empty());
    }

    #[test]
    fn test_no_selected_tags_keeps_all() {
        let products = catalog();
        assert_eq!(filter_by_tags(&products, &[]).len(), products.len());
    }

    #[test]
    fn test_filter_matches_any_selected_tag() {
        let products = catalog();
        let selected = vec!["grocery".to_string(), "clothing".to_string()];
        let results = filter_by_tags(&products, &selected);
        assert_eq!(names(&results), vec!["Milk", "Bread", "Scarf"]);

        let none = filter_by_tags(&products, &["toys".to_string()]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_toggle_and_clear_tags() {
        let products = catalog();
        let mut selected = Vec::new();

        toggle_tag(&mut selected, "electronics");
        toggle_tag(&mut selected, "grocery");
        assert_eq!(names(&filter_by_tags(&products, &selected)), vec!["Milk", "Radio", "Bread"]);

        toggle_tag(&mut selected, "electronics");
        assert_eq!(selected, vec!["grocery"]);

        selected.clear();
        assert_eq!(filter_by_tags(&products, &selected).len(), products.len());
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let products = vec![Product::new("Milk")];
        assert!(search_products(&products, "  ", SEARCH_RESULT_LIMIT).is_empty());
    }
}
