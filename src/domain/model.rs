use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute map of a DynamoDB item as it appears in a stream image.
pub type Item = HashMap<String, AttributeValue>;

/// A DynamoDB tagged value: `{"S": "..."}`, `{"N": "12"}` and so on.
/// Numbers and binaries stay in their wire (text) form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributeValue {
    S(String),
    N(String),
    B(String),
    Bool(bool),
    Null(bool),
    Ss(Vec<String>),
    Ns(Vec<String>),
    Bs(Vec<String>),
    L(Vec<AttributeValue>),
    M(HashMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn type_tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::L(_) => "L",
            AttributeValue::M(_) => "M",
        }
    }
}

/// Invocation payload delivered by a DynamoDB stream event source mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<StreamRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamRecord {
    #[serde(rename = "eventID", default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamodb: Option<StreamChange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_image: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
}

/// One flattened audit line. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAuditEntry {
    pub order_id: String,
    pub state: String,
    pub last_updated_date: String,
}

/// Flattened entries of one invocation plus the newline-terminated payload built from them.
#[derive(Debug, Clone, Default)]
pub struct AuditBatch {
    pub entries: Vec<OrderAuditEntry>,
    pub payload: String,
}

impl AuditBatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What the ingestion endpoint handed back for one accepted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub record_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardSummary {
    pub records: usize,
    pub bytes: usize,
    pub record_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_stream_event() {
        let raw = serde_json::json!({
            "Records": [{
                "eventID": "c4ca4238a0b923820dcc509a6f75849b",
                "eventName": "MODIFY",
                "eventSource": "aws:dynamodb",
                "dynamodb": {
                    "Keys": {"orderId": {"S": "O1"}},
                    "NewImage": {
                        "orderId": {"S": "O1"},
                        "state": {"S": "SHIPPED"},
                        "lastUpdatedDate": {"N": "20240101"},
                        "items": {"L": [{"M": {"sku": {"S": "A-1"}, "qty": {"N": "2"}}}]},
                        "gift": {"BOOL": false}
                    },
                    "SequenceNumber": "111",
                    "StreamViewType": "NEW_AND_OLD_IMAGES"
                }
            }]
        });

        let event: StreamEvent = serde_json::from_value(raw).unwrap();

        assert_eq!(event.records.len(), 1);
        let record = &event.records[0];
        assert_eq!(record.event_name.as_deref(), Some("MODIFY"));

        let image = record.dynamodb.as_ref().unwrap().new_image.as_ref().unwrap();
        assert_eq!(image["lastUpdatedDate"], AttributeValue::N("20240101".to_string()));
        assert_eq!(image["gift"].type_tag(), "BOOL");
        assert_eq!(image["items"].type_tag(), "L");
    }

    #[test]
    fn test_remove_event_has_no_new_image() {
        let raw = serde_json::json!({
            "Records": [{
                "eventName": "REMOVE",
                "dynamodb": {"Keys": {"orderId": {"S": "O1"}}}
            }]
        });

        let event: StreamEvent = serde_json::from_value(raw).unwrap();
        assert!(event.records[0].dynamodb.as_ref().unwrap().new_image.is_none());
    }

    #[test]
    fn test_audit_entry_key_order() {
        let entry = OrderAuditEntry {
            order_id: "O1".to_string(),
            state: "SHIPPED".to_string(),
            last_updated_date: "20240101".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"orderId":"O1","state":"SHIPPED","lastUpdatedDate":"20240101"}"#
        );
    }
}
