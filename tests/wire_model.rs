//! Serialization fidelity tests for the wire model.
//!
//! The event fields on a machine encode "has not happened" as absence;
//! these tests pin down that absence survives a round trip instead of
//! degrading into empty strings or nulls.

use sporestack::{Flavor, LaunchRequest, Machine, Payment, QuoteResponse, TopUpRequest};

fn machine_json(extra_fields: &str) -> String {
    format!(
        r#"{{
            "machine_id": "abcd1234abcd1234abcd1234abcd1234",
            "created_at": 1700000000,
            "expiration": 1700604800,
            "token": "secrettokensecrettokensecrettoke",
            "region": "us-east",
            "ipv4": "203.0.113.7",
            "ipv6": "2001:db8::7",
            "deleted_at": 0,
            "provider": "digitalocean",
            "running": true,
            "deny_smtp": false,
            "flavor_slug": "vps-1",
            "operating_system": "debian-12",
            "hostname": "worker-1",
            "autorenew": true,
            "flavor": null{extra_fields}
        }}"#
    )
}

#[test]
fn machine_event_fields_absent_deserialize_as_none() {
    let machine: Machine =
        serde_json::from_str(&machine_json("")).expect("machine should deserialize");

    assert_eq!(machine.deleted_by, None);
    assert_eq!(machine.forgotten_at, None);
    assert_eq!(machine.suspended_at, None);
    assert_eq!(machine.flavor, None);
}

#[test]
fn machine_event_fields_absent_reserialize_as_absent() {
    let machine: Machine =
        serde_json::from_str(&machine_json("")).expect("machine should deserialize");
    let value = serde_json::to_value(&machine).expect("machine should serialize");
    let object = value.as_object().expect("machine serializes to an object");

    assert!(!object.contains_key("deleted_by"));
    assert!(!object.contains_key("forgotten_at"));
    assert!(!object.contains_key("suspended_at"));
}

#[test]
fn machine_event_fields_present_round_trip_literally() {
    let machine: Machine = serde_json::from_str(&machine_json(
        r#",
            "deleted_by": "user-42",
            "forgotten_at": "2024-01-05T00:00:00Z",
            "suspended_at": "2024-02-01T12:30:00Z""#,
    ))
    .expect("machine should deserialize");

    assert_eq!(machine.deleted_by.as_deref(), Some("user-42"));
    assert_eq!(
        machine.forgotten_at.as_deref(),
        Some("2024-01-05T00:00:00Z")
    );
    assert_eq!(
        machine.suspended_at.as_deref(),
        Some("2024-02-01T12:30:00Z")
    );

    let value = serde_json::to_value(&machine).expect("machine should serialize");
    assert_eq!(value.get("deleted_by"), Some(&"user-42".into()));
    assert_eq!(
        value.get("forgotten_at"),
        Some(&"2024-01-05T00:00:00Z".into())
    );
}

#[test]
fn machine_embeds_a_flavor_by_value() {
    let machine: Machine = serde_json::from_str(
        &machine_json("").replace(
            r#""flavor": null"#,
            r#""flavor": {
                "slug": "vps-1",
                "cores": 1,
                "memory": 1024,
                "disk": 25,
                "price": 200,
                "ipv4": "/32",
                "ipv6": "/128",
                "bandwidth": 1000,
                "bandwidth_per_month": 1000.5,
                "provider_slug": "digitalocean",
                "provider": "DigitalOcean"
            }"#,
        ),
    )
    .expect("machine should deserialize");

    let flavor = machine.flavor.expect("flavor should be embedded");
    assert_eq!(flavor.slug, "vps-1");
    assert_eq!(flavor.cores, 1);
    assert_eq!(flavor.price, 200);
    assert!((flavor.bandwidth_per_month - 1000.5).abs() < f64::EPSILON);
}

#[test]
fn flavor_stands_alone_as_reference_data() {
    let flavor: Flavor = serde_json::from_str(
        r#"{
            "slug": "vps-2",
            "cores": 2,
            "memory": 2048,
            "disk": 50,
            "price": 400,
            "ipv4": "/32",
            "ipv6": "/128",
            "bandwidth": 2000,
            "bandwidth_per_month": 2000.0,
            "provider_slug": "vultr",
            "provider": "Vultr"
        }"#,
    )
    .expect("flavor should deserialize");

    assert_eq!(flavor.memory, 2048);
    assert_eq!(flavor.provider_slug, "vultr");
}

#[test]
fn launch_request_builder_serializes_every_field() {
    let request = LaunchRequest::builder()
        .flavor("vps-1")
        .ssh_key("ssh-ed25519 AAAA example")
        .operating_system("debian-12")
        .provider("digitalocean")
        .autorenew(true)
        .days(7)
        .region("us-east")
        .hostname("worker-1")
        .user_data("#cloud-config")
        .build();

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "flavor": "vps-1",
            "ssh_key": "ssh-ed25519 AAAA example",
            "operating_system": "debian-12",
            "provider": "digitalocean",
            "autorenew": true,
            "days": 7,
            "region": "us-east",
            "hostname": "worker-1",
            "user_data": "#cloud-config",
        })
    );
}

#[test]
fn launch_request_builder_defaults_stay_empty() {
    let request = LaunchRequest::builder().flavor("vps-1").days(7).build();

    assert_eq!(request.flavor, "vps-1");
    assert_eq!(request.days, 7);
    assert_eq!(request.ssh_key, "");
    assert!(!request.autorenew);
}

#[test]
fn topup_request_serializes_a_null_token() {
    let request = TopUpRequest {
        days: 30,
        token: None,
    };

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(value, serde_json::json!({ "days": 30, "token": null }));
}

#[test]
fn quote_response_deserializes_cents_and_usd() {
    let quote: QuoteResponse = serde_json::from_str(r#"{"cents": 1400, "usd": "$14.00"}"#)
        .expect("quote should deserialize");

    assert_eq!(quote.cents, 1400);
    assert_eq!(quote.usd, "$14.00");
}

#[test]
fn payment_affiliate_token_handles_null_and_value() {
    let base = r#"{
        "payment_uri": "bitcoin:bc1qexample",
        "cryptocurrency": "BTC",
        "amount": 100000,
        "fiat_per_coin": "43210.55",
        "created": 1700000000,
        "expires": 1700003600,
        "paid": 0,
        "txid": "",
        "affiliate_token": null,
        "id": "inv-0001",
        "expired": false
    }"#;

    let without: Payment = serde_json::from_str(base).expect("payment should deserialize");
    assert_eq!(without.affiliate_token, None);

    let with: Payment = serde_json::from_str(
        &base.replace(r#""affiliate_token": null"#, r#""affiliate_token": "aff-7""#),
    )
    .expect("payment should deserialize");
    assert_eq!(with.affiliate_token.as_deref(), Some("aff-7"));
}
