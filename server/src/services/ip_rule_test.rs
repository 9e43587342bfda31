use super::*;

fn ip(raw: &str) -> IpAddr {
    raw.parse().unwrap()
}

// =============================================================================
// Cidr
// =============================================================================

#[test]
fn cidr_contains_hosts_in_block() {
    let cidr = Cidr::parse("192.168.1.0/24").unwrap();
    assert!(cidr.contains(ip("192.168.1.0")));
    assert!(cidr.contains(ip("192.168.1.255")));
    assert!(!cidr.contains(ip("192.168.2.1")));
}

#[test]
fn cidr_ignores_host_bits() {
    let cidr = Cidr::parse("192.168.1.77/24").unwrap();
    assert!(cidr.contains(ip("192.168.1.3")));
}

#[test]
fn cidr_zero_prefix_matches_everything_in_family() {
    let cidr = Cidr::parse("0.0.0.0/0").unwrap();
    assert!(cidr.contains(ip("8.8.8.8")));
    assert!(!cidr.contains(ip("::1")));
}

#[test]
fn cidr_full_prefix_is_single_host() {
    let cidr = Cidr::parse("10.1.2.3/32").unwrap();
    assert!(cidr.contains(ip("10.1.2.3")));
    assert!(!cidr.contains(ip("10.1.2.4")));
}

#[test]
fn cidr_ipv6() {
    let cidr = Cidr::parse("fd00::/8").unwrap();
    assert!(cidr.contains(ip("fd12:3456::1")));
    assert!(!cidr.contains(ip("fe80::1")));
}

#[test]
fn cidr_rejects_bad_prefix() {
    assert!(Cidr::parse("10.0.0.0/33").is_none());
    assert!(Cidr::parse("10.0.0.0/x").is_none());
    assert!(Cidr::parse("10.0.0/8").is_none());
}

#[test]
fn wildcard_last_octet() {
    let cidr = Cidr::from_wildcard("192.168.1.*").unwrap();
    assert_eq!(cidr, Cidr::parse("192.168.1.0/24").unwrap());
}

#[test]
fn wildcard_multiple_octets() {
    assert_eq!(Cidr::from_wildcard("10.*.*.*").unwrap(), Cidr::parse("10.0.0.0/8").unwrap());
    assert_eq!(Cidr::from_wildcard("10.*").unwrap(), Cidr::parse("10.0.0.0/8").unwrap());
}

#[test]
fn wildcard_must_be_trailing() {
    assert!(Cidr::from_wildcard("192.*.1.1").is_none());
    assert!(Cidr::from_wildcard("*.168.1.1").is_none());
    assert!(Cidr::from_wildcard("192.168.1.1.*").is_none());
    assert!(Cidr::from_wildcard("300.*").is_none());
}

// =============================================================================
// check_ip
// =============================================================================

#[test]
fn exact_entry() {
    assert!(check_ip("203.0.113.7", "203.0.113.7"));
    assert!(!check_ip("203.0.113.8", "203.0.113.7"));
}

#[test]
fn range_entry_is_inclusive() {
    let rule = "192.168.1.1-192.168.1.100";
    assert!(check_ip("192.168.1.1", rule));
    assert!(check_ip("192.168.1.50", rule));
    assert!(check_ip("192.168.1.100", rule));
    assert!(!check_ip("192.168.1.101", rule));
}

#[test]
fn range_entry_never_matches_ipv6_client() {
    assert!(!check_ip("::1", "0.0.0.0-255.255.255.255"));
}

#[test]
fn wildcard_entry() {
    assert!(check_ip("192.168.1.42", "192.168.1.*"));
    assert!(!check_ip("192.168.2.42", "192.168.1.*"));
}

#[test]
fn cidr_entry() {
    assert!(check_ip("10.20.30.40", "10.0.0.0/8"));
    assert!(!check_ip("11.0.0.1", "10.0.0.0/8"));
}

#[test]
fn any_entry_in_list_matches() {
    let rule = "10.0.0.1, 172.16.0.0/12 ,192.168.1.*";
    assert!(check_ip("10.0.0.1", rule));
    assert!(check_ip("172.20.1.1", rule));
    assert!(check_ip("192.168.1.9", rule));
    assert!(!check_ip("8.8.8.8", rule));
}

#[test]
fn malformed_entries_are_skipped() {
    let rule = "not-an-ip, 10.0.0.0/99, 1.2.3.*.*, 8.8.8.8";
    assert!(check_ip("8.8.8.8", rule));
    assert!(!check_ip("10.0.0.1", rule));
}

#[test]
fn invalid_client_ip_never_matches() {
    assert!(!check_ip("unknown", "0.0.0.0/0"));
    assert!(!check_ip("", "*"));
}

#[test]
fn empty_rule_never_matches() {
    assert!(!check_ip("10.0.0.1", ""));
    assert!(!check_ip("10.0.0.1", " , "));
}
