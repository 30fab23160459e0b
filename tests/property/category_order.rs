//! Ordering and parsing properties of category values

use arbor::CategoryValue;
use proptest::prelude::*;

fn category_value() -> impl Strategy<Value = CategoryValue> {
    prop_oneof![
        any::<bool>().prop_map(CategoryValue::Bool),
        any::<i64>().prop_map(CategoryValue::Int),
        any::<f64>().prop_map(CategoryValue::Float),
        "[a-z]{0,8}".prop_map(CategoryValue::Str),
    ]
}

proptest! {
    #[test]
    fn test_order_is_total_and_consistent_with_eq(a in category_value(), b in category_value()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_integers_parse_back(n in any::<i64>()) {
        prop_assert_eq!(n.to_string().parse::<CategoryValue>().unwrap(), CategoryValue::Int(n));
    }

    #[test]
    fn test_json_keeps_variant(value in category_value()) {
        // NaN cannot be represented in JSON
        prop_assume!(!matches!(value, CategoryValue::Float(f) if !f.is_finite()));
        let json = serde_json::to_string(&value).unwrap();
        let back: CategoryValue = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, value);
    }
}
