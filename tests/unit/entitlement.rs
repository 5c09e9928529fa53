use super::*;

#[test]
fn free_uses_count_down_and_saturate() {
    let mut q = LocalQuota::new(2);
    assert!(!q.is_entitled());
    assert_eq!(q.remaining_free_uses(), 2);
    q.record_use();
    q.record_use();
    q.record_use();
    assert_eq!(q.remaining_free_uses(), 0);
    assert_eq!(q.used(), 3);
}

#[test]
fn grant_verify_and_revoke() {
    let mut q = LocalQuota::default();
    assert!(!q.verify().unwrap());
    assert_eq!(q.record().last_verified_at, None);

    q.grant("cus_1", "sub_1");
    assert!(q.is_entitled());
    assert!(q.verify().unwrap());
    assert!(q.record().last_verified_at.is_some());
    assert_eq!(q.record().customer_id.as_deref(), Some("cus_1"));

    q.revoke();
    assert!(!q.is_entitled());
    assert_eq!(q.record(), &EntitlementRecord::default());
}

#[test]
fn record_uses_camel_case_json() {
    let r = EntitlementRecord {
        paid: true,
        customer_id: Some("c".into()),
        subscription_id: None,
        last_verified_at: Some(7),
    };
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v, serde_json::json!({ "paid": true, "customerId": "c", "lastVerifiedAt": 7 }));
    let back: EntitlementRecord = serde_json::from_value(v).unwrap();
    assert_eq!(back, r);
}
