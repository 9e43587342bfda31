//! Client IP rule matching.
//!
//! An IP rule is a comma-separated list of entries, tried in order:
//! - `192.168.1.1-192.168.1.100`: inclusive IPv4 range
//! - `192.168.1.*`: wildcard, trailing `*` octets become a prefix
//! - `10.0.0.0/8`, `fd00::/8`: CIDR block
//! - `203.0.113.7`: exact match
//!
//! Malformed entries are skipped rather than failing the whole rule.

use std::net::{IpAddr, Ipv4Addr};

/// A network prefix such as `10.0.0.0/8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: IpAddr,
    prefix: u8,
}

impl Cidr {
    /// Parse `addr/prefix`. Host bits are allowed and ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (addr, prefix) = raw.trim().split_once('/')?;
        let network: IpAddr = addr.trim().parse().ok()?;
        let prefix: u8 = prefix.trim().parse().ok()?;
        let max = if network.is_ipv4() { 32 } else { 128 };
        (prefix <= max).then_some(Self { network, prefix })
    }

    #[must_use]
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.network, ip) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                let mask = u32::MAX.checked_shl(32 - u32::from(self.prefix)).unwrap_or(0);
                u32::from(net) & mask == u32::from(ip) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                let mask = u128::MAX.checked_shl(128 - u32::from(self.prefix)).unwrap_or(0);
                u128::from(net) & mask == u128::from(ip) & mask
            }
            _ => false,
        }
    }

    /// Convert an IPv4 wildcard such as `192.168.*.*` or `10.*` into a prefix.
    ///
    /// Wildcards must be trailing; missing octets count as wildcards.
    #[must_use]
    pub fn from_wildcard(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.trim().split('.').map(str::trim).collect();
        if parts.len() > 4 || parts.last() != Some(&"*") {
            return None;
        }

        let fixed: Vec<u8> = parts
            .iter()
            .take_while(|part| **part != "*")
            .map(|part| part.parse::<u8>().ok())
            .collect::<Option<_>>()?;
        if parts[fixed.len()..].iter().any(|part| *part != "*") {
            return None;
        }

        let mut octets = [0_u8; 4];
        octets[..fixed.len()].copy_from_slice(&fixed);
        let prefix = u8::try_from(fixed.len() * 8).ok()?;
        Some(Self { network: IpAddr::V4(Ipv4Addr::from(octets)), prefix })
    }
}

/// Whether `client_ip` is allowed by `rule`.
#[must_use]
pub fn check_ip(client_ip: &str, rule: &str) -> bool {
    let raw = client_ip.trim();
    let Ok(client) = raw.parse::<IpAddr>() else {
        return false;
    };

    rule.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .any(|entry| entry_matches(raw, client, entry).unwrap_or(false))
}

fn entry_matches(raw: &str, client: IpAddr, entry: &str) -> Option<bool> {
    if let Some((start, end)) = entry.split_once('-') {
        let start: Ipv4Addr = start.trim().parse().ok()?;
        let end: Ipv4Addr = end.trim().parse().ok()?;
        let IpAddr::V4(client) = client else {
            return Some(false);
        };
        return Some((u32::from(start)..=u32::from(end)).contains(&u32::from(client)));
    }

    if entry.contains('*') {
        return Some(Cidr::from_wildcard(entry)?.contains(client));
    }

    if entry.contains('/') {
        return Some(Cidr::parse(entry)?.contains(client));
    }

    Some(raw == entry)
}

#[cfg(test)]
#[path = "ip_rule_test.rs"]
mod tests;
