//! SSRF protection — classifies addresses against private/internal IP ranges.

use std::net::IpAddr;

/// Check whether an IP address is private, loopback, link-local, or metadata.
pub fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
                || v4.octets() == [169, 254, 169, 254]
        }
        IpAddr::V6(v6) => {
            let segs = v6.segments();
            v6.is_loopback()
                || v6.is_unspecified()
                || (segs[0] & 0xfe00) == 0xfc00 // unique-local fc00::/7
                || (segs[0] & 0xffc0) == 0xfe80 // link-local fe80::/10
                || v6.to_ipv4_mapped().is_some_and(|v4| {
                    v4.is_loopback()
                        || v4.is_private()
                        || v4.is_link_local()
                        || v4.is_unspecified()
                        || v4.is_broadcast()
                        || v4.octets() == [169, 254, 169, 254]
                })
        }
    }
}

/// Check whether a hostname string is a private/internal host without DNS.
///
/// Catches `localhost` and literal IPs up front; names that merely *resolve*
/// to private ranges are caught after resolution by the sender.
pub fn is_private_host(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if bare.eq_ignore_ascii_case("localhost") {
        return true;
    }
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return is_private_ip(&ip);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_loopback_v4() {
        let ip: IpAddr = "127.0.0.1".parse().unwrap();
        assert!(is_private_ip(&ip));
    }

    #[test]
    fn rejects_loopback_v6() {
        let ip: IpAddr = "::1".parse().unwrap();
        assert!(is_private_ip(&ip));
    }

    #[test]
    fn rejects_rfc1918_ranges() {
        for s in ["10.0.0.1", "172.16.0.1", "172.31.255.255", "192.168.1.1"] {
            let ip: IpAddr = s.parse().unwrap();
            assert!(is_private_ip(&ip), "{s} should be private");
        }
    }

    #[test]
    fn rejects_link_local() {
        let ip: IpAddr = "169.254.1.1".parse().unwrap();
        assert!(is_private_ip(&ip));
    }

    #[test]
    fn rejects_cloud_metadata() {
        let ip: IpAddr = "169.254.169.254".parse().unwrap();
        assert!(is_private_ip(&ip));
    }

    #[test]
    fn rejects_unique_local_v6() {
        let ip1: IpAddr = "fc00::1".parse().unwrap();
        let ip2: IpAddr = "fd00::1".parse().unwrap();
        assert!(is_private_ip(&ip1));
        assert!(is_private_ip(&ip2));
    }

    #[test]
    fn rejects_ipv4_mapped_loopback() {
        let ip: IpAddr = "::ffff:127.0.0.1".parse().unwrap();
        assert!(is_private_ip(&ip));
    }

    #[test]
    fn allows_public_ip() {
        let ip1: IpAddr = "8.8.8.8".parse().unwrap();
        let ip2: IpAddr = "2606:4700::1111".parse().unwrap();
        assert!(!is_private_ip(&ip1));
        assert!(!is_private_ip(&ip2));
    }

    #[test]
    fn rejects_localhost_string() {
        assert!(is_private_host("localhost"));
        assert!(is_private_host("LOCALHOST"));
    }

    #[test]
    fn rejects_bracketed_v6_literal() {
        assert!(is_private_host("[::1]"));
    }

    #[test]
    fn allows_hostname() {
        assert!(!is_private_host("example.com"));
    }
}
