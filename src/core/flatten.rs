use crate::domain::model::{AttributeValue, Item, OrderAuditEntry, StreamRecord};
use crate::utils::error::FlattenError;

pub const ORDER_ID: &str = "orderId";
pub const STATE: &str = "state";
pub const LAST_UPDATED_DATE: &str = "lastUpdatedDate";

/// Pulls `orderId`, `state` and `lastUpdatedDate` out of the record's NewImage.
/// Values are copied verbatim; nothing is trimmed or coerced.
pub fn flatten_record(record: &StreamRecord) -> Result<OrderAuditEntry, FlattenError> {
    let image = record
        .dynamodb
        .as_ref()
        .ok_or(FlattenError::MissingChange)?
        .new_image
        .as_ref()
        .ok_or(FlattenError::MissingNewImage)?;

    Ok(OrderAuditEntry {
        order_id: string_attribute(image, ORDER_ID)?.to_string(),
        state: string_attribute(image, STATE)?.to_string(),
        last_updated_date: number_attribute(image, LAST_UPDATED_DATE)?.to_string(),
    })
}

fn attribute<'a>(image: &'a Item, name: &str) -> Result<&'a AttributeValue, FlattenError> {
    image.get(name).ok_or_else(|| FlattenError::MissingAttribute {
        attribute: name.to_string(),
    })
}

fn string_attribute<'a>(image: &'a Item, name: &str) -> Result<&'a str, FlattenError> {
    match attribute(image, name)? {
        AttributeValue::S(value) => Ok(value),
        other => Err(unexpected(name, "S", other)),
    }
}

fn number_attribute<'a>(image: &'a Item, name: &str) -> Result<&'a str, FlattenError> {
    match attribute(image, name)? {
        AttributeValue::N(value) => Ok(value),
        other => Err(unexpected(name, "N", other)),
    }
}

fn unexpected(name: &str, expected: &'static str, found: &AttributeValue) -> FlattenError {
    FlattenError::UnexpectedType {
        attribute: name.to_string(),
        expected,
        found: found.type_tag(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StreamChange;

    fn record_with_image(image: Item) -> StreamRecord {
        StreamRecord {
            dynamodb: Some(StreamChange {
                new_image: Some(image),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn order_image(order_id: &str, state: &str, last_updated: &str) -> Item {
        let mut image = Item::new();
        image.insert(ORDER_ID.to_string(), AttributeValue::S(order_id.to_string()));
        image.insert(STATE.to_string(), AttributeValue::S(state.to_string()));
        image.insert(
            LAST_UPDATED_DATE.to_string(),
            AttributeValue::N(last_updated.to_string()),
        );
        image
    }

    #[test]
    fn test_flatten_valid_record() {
        let record = record_with_image(order_image("O1", "SHIPPED", "20240101"));

        let entry = flatten_record(&record).unwrap();

        assert_eq!(
            entry,
            OrderAuditEntry {
                order_id: "O1".to_string(),
                state: "SHIPPED".to_string(),
                last_updated_date: "20240101".to_string(),
            }
        );
    }

    #[test]
    fn test_flatten_copies_values_verbatim() {
        let record = record_with_image(order_image("  O-7 ", "shipped\t", "1.50E+3"));

        let entry = flatten_record(&record).unwrap();

        assert_eq!(entry.order_id, "  O-7 ");
        assert_eq!(entry.state, "shipped\t");
        assert_eq!(entry.last_updated_date, "1.50E+3");
    }

    #[test]
    fn test_flatten_ignores_extra_attributes() {
        let mut image = order_image("O1", "NEW", "1");
        image.insert("customer".to_string(), AttributeValue::S("c-9".to_string()));

        assert!(flatten_record(&record_with_image(image)).is_ok());
    }

    #[test]
    fn test_flatten_missing_state() {
        let mut image = order_image("O1", "NEW", "1");
        image.remove(STATE);

        let err = flatten_record(&record_with_image(image)).unwrap_err();

        assert_eq!(
            err,
            FlattenError::MissingAttribute {
                attribute: "state".to_string()
            }
        );
    }

    #[test]
    fn test_flatten_wrong_type_tag() {
        let mut image = order_image("O1", "NEW", "1");
        image.insert(
            LAST_UPDATED_DATE.to_string(),
            AttributeValue::S("2024-01-01".to_string()),
        );

        let err = flatten_record(&record_with_image(image)).unwrap_err();

        assert_eq!(
            err,
            FlattenError::UnexpectedType {
                attribute: "lastUpdatedDate".to_string(),
                expected: "N",
                found: "S",
            }
        );
    }

    #[test]
    fn test_flatten_without_new_image() {
        let record = StreamRecord {
            event_name: Some("REMOVE".to_string()),
            dynamodb: Some(StreamChange::default()),
            ..Default::default()
        };

        assert_eq!(
            flatten_record(&record).unwrap_err(),
            FlattenError::MissingNewImage
        );
    }

    #[test]
    fn test_flatten_without_change_body() {
        assert_eq!(
            flatten_record(&StreamRecord::default()).unwrap_err(),
            FlattenError::MissingChange
        );
    }
}
