//! Query String Helpers
//!
//! axum 的 `Query` 提取器不支持同名参数重复出现
//! （如 `?hashtags=1&hashtags=2`），这里基于原始查询串解析

/// 返回查询串中指定 key 的全部值（保持出现顺序）
pub fn query_values(query: &str, key: &str) -> Vec<String> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_repeated_values_in_order() {
        let values = query_values("hashtags=1&hashtags=2&other=x", "hashtags");
        assert_eq!(values, ["1", "2"]);
    }

    #[test]
    fn test_missing_key_yields_empty() {
        assert!(query_values("other=x", "hashtags").is_empty());
        assert!(query_values("", "hashtags").is_empty());
    }

    #[test]
    fn test_percent_decoding() {
        let values = query_values("hashtags=%61%62%63", "hashtags");
        assert_eq!(values, ["abc"]);
    }

    #[test]
    fn test_value_may_be_empty() {
        let values = query_values("hashtags=", "hashtags");
        assert_eq!(values, [""]);
    }
}
