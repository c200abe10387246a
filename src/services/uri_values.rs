//! URI 元数据链接

use serde::Serialize;

use crate::models::Item;

/// 一个链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UriLink {
    pub href: String,
    pub text: String,
}

/// 以链接形式展示的元数据字段
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataUriValues {
    /// 字段标签（消息 key）
    pub label: Option<String>,
    /// 链接之间的分隔符
    pub separator: String,
    /// 固定链接文字；为空时使用值本身
    pub linktext: Option<String>,
    pub values: Vec<String>,
}

impl MetadataUriValues {
    /// 从条目的字段（支持 `*` 通配）收集值
    pub fn from_item(
        item: &Item,
        field: &str,
        label: Option<String>,
        separator: &str,
        linktext: Option<String>,
    ) -> Self {
        Self {
            label,
            separator: separator.to_string(),
            linktext: linktext.filter(|t| !t.is_empty()),
            values: item
                .all_metadata(&[field])
                .into_iter()
                .map(|v| v.value.clone())
                .collect(),
        }
    }

    pub fn links(&self) -> Vec<UriLink> {
        self.values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|href| UriLink {
                href: href.to_string(),
                text: self.linktext.clone().unwrap_or_else(|| href.to_string()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadataValue;

    fn item() -> Item {
        Item::new("u1", "Dataset")
            .with_metadata("dc.identifier.uri", MetadataValue::new("https://hdl.handle.net/1/2"))
            .with_metadata("dc.identifier.doi", MetadataValue::new("https://doi.org/10.1/x"))
            .with_metadata("dc.identifier.uri", MetadataValue::new("  "))
    }

    #[test]
    fn test_links_use_value_as_text() {
        let values = MetadataUriValues::from_item(&item(), "dc.identifier.uri", None, ", ", None);
        assert_eq!(
            values.links(),
            vec![UriLink {
                href: "https://hdl.handle.net/1/2".into(),
                text: "https://hdl.handle.net/1/2".into(),
            }]
        );
        assert_eq!(values.separator, ", ");
    }

    #[test]
    fn test_linktext_and_wildcard() {
        let values = MetadataUriValues::from_item(
            &item(),
            "dc.identifier.*",
            Some("item.page.uri".into()),
            "<br/>",
            Some("Open".into()),
        );
        let links = values.links();
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.text == "Open"));
    }

    #[test]
    fn test_empty_linktext_falls_back_to_value() {
        let values =
            MetadataUriValues::from_item(&item(), "dc.identifier.doi", None, "", Some(String::new()));
        assert_eq!(values.links()[0].text, "https://doi.org/10.1/x");
    }
}
