//! Fund ledger behavior: monotone credits and the serialized shape.

use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

use domain_fund::error::FundError;
use domain_fund::ledger::FundLedger;

// ============================================================================
// Ledger Tests
// ============================================================================

mod ledger_tests {
    use super::*;

    #[test]
    fn test_empty_starts_at_zero_inr() {
        let ledger = FundLedger::empty();
        assert!(ledger.total.is_zero());
        assert_eq!(ledger.total.currency(), Currency::INR);
    }

    #[test]
    fn test_default_is_empty() {
        let ledger = FundLedger::default();
        assert_eq!(ledger.total, FundLedger::empty().total);
    }

    #[test]
    fn test_with_total_carries_value() {
        let ledger = FundLedger::with_total(Money::new(dec!(450), Currency::INR));
        assert_eq!(ledger.total, Money::new(dec!(450), Currency::INR));
    }

    #[test]
    fn test_credit_sequence_is_additive() {
        let mut ledger = FundLedger::empty();

        ledger.credit(Money::new(dec!(150), Currency::INR)).unwrap();
        ledger.credit(Money::new(dec!(300), Currency::INR)).unwrap();
        ledger.credit(Money::new(dec!(150), Currency::INR)).unwrap();

        assert_eq!(ledger.total, Money::new(dec!(600), Currency::INR));
    }

    #[test]
    fn test_credit_order_does_not_matter() {
        let mut forward = FundLedger::empty();
        forward.credit(Money::new(dec!(150), Currency::INR)).unwrap();
        forward.credit(Money::new(dec!(300), Currency::INR)).unwrap();

        let mut reverse = FundLedger::empty();
        reverse.credit(Money::new(dec!(300), Currency::INR)).unwrap();
        reverse.credit(Money::new(dec!(150), Currency::INR)).unwrap();

        assert_eq!(forward.total, reverse.total);
    }

    #[test]
    fn test_negative_credit_leaves_total_unchanged() {
        let mut ledger = FundLedger::with_total(Money::new(dec!(150), Currency::INR));
        let result = ledger.credit(Money::new(dec!(-150), Currency::INR));

        assert!(matches!(result, Err(FundError::NegativeCredit(_))));
        assert_eq!(ledger.total, Money::new(dec!(150), Currency::INR));
    }

    #[test]
    fn test_credit_updates_timestamp() {
        let mut ledger = FundLedger::empty();
        let before = ledger.updated_at;
        ledger.credit(Money::new(dec!(150), Currency::INR)).unwrap();

        assert!(ledger.updated_at >= before);
    }
}

// ============================================================================
// Serialization Tests
// ============================================================================

mod serialization_tests {
    use super::*;

    #[test]
    fn test_ledger_json_round_trip() {
        let ledger = FundLedger::with_total(Money::new(dec!(450), Currency::INR));
        let json = serde_json::to_string(&ledger).unwrap();
        let back: FundLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, back);
    }
}
