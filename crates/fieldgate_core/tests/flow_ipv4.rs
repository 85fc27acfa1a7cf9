use fieldgate_core::{FieldError, Flow};

#[test]
fn well_formed_address_round_trips() {
    let mut flow = Flow::new();

    flow.set_src_ipv4("2.2.2.2").unwrap();
    assert_eq!(flow.src_ipv4().unwrap(), "2.2.2.2");
}

#[test]
fn malformed_address_fails_and_leaves_field_unset() {
    let mut flow = Flow::new();
    flow.set_src_ipv4("2.2.2.2").unwrap();

    let err = flow
        .set_dst_ipv4("5.5.5.")
        .expect_err("truncated address must be rejected");
    match err {
        FieldError::Validation { reason, .. } => {
            assert!(reason.contains("5.5.5. is not a valid ipv4 address"));
        }
        other => panic!("expected validation error, got {other}"),
    }

    assert!(matches!(flow.dst_ipv4(), Err(FieldError::Missing { .. })));
}

#[test]
fn rejected_write_preserves_previous_value() {
    let mut flow = Flow::new();
    flow.set_src_ipv4("10.0.0.1").unwrap();

    let err = flow
        .set_src_ipv4("not-an-address")
        .expect_err("garbage must be rejected");
    assert!(matches!(err, FieldError::Validation { .. }));

    assert_eq!(flow.src_ipv4().unwrap(), "10.0.0.1");
}

#[test]
fn cleared_endpoint_reads_as_missing_until_rewritten() {
    let mut flow = Flow::new();
    flow.set_src_ipv4("192.168.0.1").unwrap();
    flow.clear_src_ipv4().unwrap();

    assert!(matches!(flow.src_ipv4(), Err(FieldError::Missing { .. })));

    flow.set_src_ipv4("192.168.0.2").unwrap();
    assert_eq!(flow.src_ipv4().unwrap(), "192.168.0.2");
}

#[test]
fn relaxed_pattern_accepts_out_of_range_octets() {
    // Known limitation of the shipped rule: 1-3 digit groups, not 0-255.
    let mut flow = Flow::new();
    flow.set_src_ipv4("999.1.1.1").unwrap();
    assert_eq!(flow.src_ipv4().unwrap(), "999.1.1.1");
}
