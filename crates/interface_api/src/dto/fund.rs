//! Fund DTOs

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use core_kernel::Money;

/// Running fund total
///
/// Serialized as a JSON number; amounts are whole-rupee tariff multiples, so
/// the float conversion is exact.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundResponse {
    pub total_fund: f64,
}

impl From<Money> for FundResponse {
    fn from(total: Money) -> Self {
        Self {
            total_fund: total.amount().to_f64().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_serializes_as_a_number() {
        let response = FundResponse::from(Money::new(dec!(450), Currency::INR));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalFund"], 450.0);
    }

    #[test]
    fn test_zero_fund() {
        let response = FundResponse::from(Money::zero(Currency::INR));
        assert_eq!(response.total_fund, 0.0);
    }
}
