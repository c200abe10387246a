//! 条目页面路由

use crate::models::Item;

/// 条目页面路径：有实体类型时为 `/entities/{type}/{uuid}`，否则 `/items/{uuid}`
pub fn item_page_route(item: &Item) -> String {
    match item.entity_type() {
        Some(entity_type) => format!(
            "/entities/{}/{}",
            urlencoding::encode(&entity_type.to_lowercase()),
            item.uuid
        ),
        None => format!("/items/{}", item.uuid),
    }
}

/// 条目编辑页面路径
pub fn item_edit_route(item: &Item) -> String {
    format!("{}/edit", item_page_route(item))
}
