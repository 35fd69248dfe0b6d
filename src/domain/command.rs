use super::money::Price;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderCommandType {
    /// Create the order if needed and settle or defer its initial payment.
    Pending,
    /// A billing cycle came due.
    Recurring,
    /// Move the order onto another payment gateway.
    Switch,
}

/// One row of an order batch.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OrderCommand {
    pub r#type: OrderCommandType,
    pub order: u64,
    pub plan_free: Option<bool>,
    pub initial: Option<Price>,
    pub total: Option<Price>,
    pub gateway: Option<String>,
    pub coupon: Option<String>,
    pub student: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_command_deserialization() {
        let csv = "type, order, plan_free, initial, total, gateway, coupon, student\n\
                   pending, 1, false, 0.0, 25.0, manual, SPRING, 9";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let result: OrderCommand = reader
            .deserialize()
            .next()
            .unwrap()
            .expect("Failed to deserialize command");

        assert_eq!(result.r#type, OrderCommandType::Pending);
        assert_eq!(result.order, 1);
        assert_eq!(result.plan_free, Some(false));
        assert_eq!(result.initial, Some(Price::ZERO));
        assert_eq!(result.total, Some(Price::new(dec!(25.0)).unwrap()));
        assert_eq!(result.gateway.as_deref(), Some("manual"));
        assert_eq!(result.coupon.as_deref(), Some("SPRING"));
        assert_eq!(result.student, Some(9));
    }

    #[test]
    fn test_command_with_empty_optional_fields() {
        let csv = "type, order, plan_free, initial, total, gateway, coupon, student\n\
                   recurring, 4, , , , , , ";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let result: OrderCommand = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(result.r#type, OrderCommandType::Recurring);
        assert_eq!(result.order, 4);
        assert_eq!(result.plan_free, None);
        assert_eq!(result.initial, None);
        assert_eq!(result.gateway, None);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let csv = "type, order, plan_free, initial, total, gateway, coupon, student\n\
                   pending, 1, false, -5.0, , , , ";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let result: Result<OrderCommand, csv::Error> = reader.deserialize().next().unwrap();
        assert!(result.is_err());
    }
}
