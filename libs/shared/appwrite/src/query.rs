use serde_json::json;

/// Server-side query operators for `listDocuments` / `listUsers`, encoded in
/// the JSON form the hosted API expects in `queries[]` parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, value: String },
    OrderDesc { attribute: String },
    Offset { value: u64 },
}

impl Query {
    pub fn equal(attribute: &str, value: &str) -> Self {
        Query::Equal {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub fn order_desc(attribute: &str) -> Self {
        Query::OrderDesc {
            attribute: attribute.to_string(),
        }
    }

    pub fn offset(value: u64) -> Self {
        Query::Offset { value }
    }

    pub fn to_json(&self) -> String {
        match self {
            Query::Equal { attribute, value } => {
                json!({ "method": "equal", "attribute": attribute, "values": [value] })
            }
            Query::OrderDesc { attribute } => {
                json!({ "method": "orderDesc", "attribute": attribute })
            }
            Query::Offset { value } => {
                json!({ "method": "offset", "values": [value] })
            }
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_encodes_values_as_list() {
        let q = Query::equal("userId", "abc-123");
        assert_eq!(
            q.to_json(),
            r#"{"attribute":"userId","method":"equal","values":["abc-123"]}"#
        );
    }

    #[test]
    fn order_desc_carries_attribute_only() {
        let q = Query::order_desc("$createdAt");
        assert_eq!(q.to_json(), r#"{"attribute":"$createdAt","method":"orderDesc"}"#);
    }
}
