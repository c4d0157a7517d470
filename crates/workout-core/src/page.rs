use serde::{Deserialize, Serialize};

/// Page size used when the client sends no limit.
pub const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on a single page, whatever the client asks for.
pub const MAX_LIMIT: i64 = 100;

/// A bounded slice of a result set plus count metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    /// A page with no items, as a scan over an empty store returns.
    pub fn empty(limit: i64, offset: i64) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit,
            offset,
        }
    }
}

/// Limit/offset pagination parameters as sent by clients. Raw values are
/// kept private; reads go through the clamped accessors.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

impl PageParams {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// Effective limit: defaulted, then clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_are_absent() {
        let params = PageParams::default();
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn limit_is_clamped_to_bounds() {
        assert_eq!(PageParams::new(Some(0), None).limit(), 1);
        assert_eq!(PageParams::new(Some(-3), None).limit(), 1);
        assert_eq!(PageParams::new(Some(1000), None).limit(), MAX_LIMIT);
        assert_eq!(PageParams::new(Some(25), None).limit(), 25);
    }

    #[test]
    fn negative_offset_is_floored() {
        assert_eq!(PageParams::new(None, Some(-10)).offset(), 0);
        assert_eq!(PageParams::new(None, Some(30)).offset(), 30);
    }

    #[test]
    fn deserializes_from_query_shape() {
        let params: PageParams = serde_json::from_str(r#"{"limit": 10, "offset": 5}"#).unwrap();
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 5);
    }

    #[test]
    fn empty_page_has_zero_total() {
        let page: Page<String> = Page::empty(50, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
