//! Identifier behavior: minting, display, parsing, conversions.

use core_kernel::{BillingId, StudentId};
use uuid::Uuid;

mod minting {
    use super::*;

    #[test]
    fn test_random_ids_never_collide_in_practice() {
        assert_ne!(StudentId::new(), StudentId::new());
        assert_ne!(BillingId::new(), BillingId::new());
    }

    #[test]
    fn test_v7_ids_are_time_ordered() {
        let earlier = BillingId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = BillingId::new_v7();

        assert!(Uuid::from(earlier) < Uuid::from(later));
    }

    #[test]
    fn test_from_uuid_is_lossless() {
        let uuid = Uuid::new_v4();
        assert_eq!(*StudentId::from_uuid(uuid).as_uuid(), uuid);
    }
}

mod display_and_parse {
    use super::*;

    #[test]
    fn test_display_prefixes_distinguish_the_types() {
        assert!(StudentId::new().to_string().starts_with("STU-"));
        assert!(BillingId::new().to_string().starts_with("BIL-"));
        assert_ne!(StudentId::PREFIX, BillingId::PREFIX);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let id = StudentId::new();
        let parsed: StudentId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_bare_uuid_parses_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: BillingId = uuid.to_string().parse().unwrap();
        assert_eq!(*parsed.as_uuid(), uuid);
    }

    #[test]
    fn test_garbage_does_not_parse() {
        assert!("BIL-not-a-uuid".parse::<BillingId>().is_err());
        assert!("".parse::<StudentId>().is_err());
    }
}

mod conversions {
    use super::*;

    #[test]
    fn test_uuid_conversions_are_inverse() {
        let uuid = Uuid::new_v4();
        let id: StudentId = uuid.into();
        let back: Uuid = id.into();
        assert_eq!(back, uuid);
    }

    #[test]
    fn test_types_stay_distinct_even_for_the_same_uuid() {
        let uuid = Uuid::new_v4();
        let student = StudentId::from_uuid(uuid);
        let billing = BillingId::from_uuid(uuid);

        // Same raw value, but the type system keeps them apart; only the
        // inner UUIDs compare equal.
        assert_eq!(*student.as_uuid(), *billing.as_uuid());
        assert_ne!(student.to_string(), billing.to_string());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = StudentId::new();
        let json = serde_json::to_string(&id).unwrap();

        // Serializes as the bare UUID string, not the prefixed display form.
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let back: StudentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

mod edge_cases {
    use super::*;

    #[test]
    fn test_nil_and_max_uuids_are_representable() {
        assert!(StudentId::from_uuid(Uuid::nil()).as_uuid().is_nil());
        assert_eq!(*BillingId::from_uuid(Uuid::max()).as_uuid(), Uuid::max());
    }
}
