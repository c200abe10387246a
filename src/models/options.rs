//! 浏览与检索参数

use serde::{Deserialize, Serialize};

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// 排序参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOptions {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }

    /// 解析 `field,ASC` 形式；方向缺省为升序
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, ',');
        let field = parts.next()?.trim();
        if field.is_empty() {
            return None;
        }
        let direction = match parts.next().map(|d| d.trim().to_ascii_uppercase()) {
            Some(d) if d == "DESC" => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Some(Self::new(field, direction))
    }

    fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// 分页参数（页码从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
        }
    }
}

impl PaginationOptions {
    pub fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// REST 接口的页码从 0 开始
    fn push_params(&self, params: &mut Vec<(String, String)>) {
        params.push((
            "page".into(),
            self.current_page.saturating_sub(1).to_string(),
        ));
        params.push(("size".into(), self.page_size.to_string()));
    }
}

/// 浏览条目参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BrowseEntrySearchOptions {
    /// 浏览索引名，例如 `author`
    pub metadata_definition: String,
    pub pagination: PaginationOptions,
    pub sort: Option<SortOptions>,
    pub starts_with: Option<String>,
    pub scope: Option<String>,
}

impl BrowseEntrySearchOptions {
    pub fn new(metadata_definition: &str, pagination: PaginationOptions) -> Self {
        Self {
            metadata_definition: metadata_definition.to_string(),
            pagination,
            ..Default::default()
        }
    }

    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        self.pagination.push_params(&mut params);
        if let Some(sort) = &self.sort {
            params.push(("sort".into(), sort.to_param()));
        }
        if let Some(starts_with) = &self.starts_with {
            params.push(("startsWith".into(), starts_with.clone()));
        }
        if let Some(scope) = &self.scope {
            params.push(("scope".into(), scope.clone()));
        }
        params
    }
}

/// 检索过滤条件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub key: String,
    pub values: Vec<String>,
    /// 例如 `equals`、`contains`、`authority`
    pub operator: String,
}

/// 分页检索参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PaginatedSearchOptions {
    pub configuration: Option<String>,
    pub scope: Option<String>,
    pub query: Option<String>,
    pub dso_types: Vec<String>,
    pub filters: Vec<SearchFilter>,
    pub pagination: PaginationOptions,
    pub sort: Option<SortOptions>,
}

impl PaginatedSearchOptions {
    pub fn to_query_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(configuration) = &self.configuration {
            params.push(("configuration".into(), configuration.clone()));
        }
        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            params.push(("query".into(), query.clone()));
        }
        if let Some(scope) = &self.scope {
            params.push(("scope".into(), scope.clone()));
        }
        for dso_type in &self.dso_types {
            params.push(("dsoType".into(), dso_type.clone()));
        }
        for filter in &self.filters {
            for value in &filter.values {
                params.push((
                    format!("f.{}", filter.key),
                    format!("{},{}", value, filter.operator),
                ));
            }
        }
        self.pagination.push_params(&mut params);
        if let Some(sort) = &self.sort {
            params.push(("sort".into(), sort.to_param()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dc.title,DESC", Some(SortOptions::new("dc.title", SortDirection::Desc)))]
    #[case("dc.date.issued", Some(SortOptions::new("dc.date.issued", SortDirection::Asc)))]
    #[case("score,asc", Some(SortOptions::new("score", SortDirection::Asc)))]
    #[case(",DESC", None)]
    fn test_sort_parse(#[case] raw: &str, #[case] expected: Option<SortOptions>) {
        assert_eq!(SortOptions::parse(raw), expected);
    }

    #[test]
    fn test_browse_params_are_zero_based() {
        let mut options = BrowseEntrySearchOptions::new("author", PaginationOptions::new(3, 20));
        options.sort = Some(SortOptions::new("default", SortDirection::Desc));
        let params = options.to_query_params();
        assert!(params.contains(&("page".into(), "2".into())));
        assert!(params.contains(&("size".into(), "20".into())));
        assert!(params.contains(&("sort".into(), "default,DESC".into())));
    }

    #[test]
    fn test_search_filter_params() {
        let options = PaginatedSearchOptions {
            query: Some("rust".into()),
            filters: vec![SearchFilter {
                key: "author".into(),
                values: vec!["Smith".into(), "Doe".into()],
                operator: "equals".into(),
            }],
            ..Default::default()
        };
        let params = options.to_query_params();
        assert!(params.contains(&("query".into(), "rust".into())));
        assert!(params.contains(&("f.author".into(), "Smith,equals".into())));
        assert!(params.contains(&("f.author".into(), "Doe,equals".into())));
        assert!(params.contains(&("page".into(), "0".into())));
    }
}
