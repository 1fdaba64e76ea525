//! Tests for probe list validation.

use crate::network::IpFamily;
use crate::probe::{Extractor, catalog};

use super::*;

mod public_endpoints {
    use super::*;

    #[test]
    fn configured_list_replaces_catalogue() {
        let toml = toml(
            r#"
            [public]
            ipv6 = ["https://v6.example.com/ip"]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(config.settings.public_ipv6.len(), 1);
        assert_eq!(
            config.settings.public_ipv4,
            catalog::public_endpoints(IpFamily::V4)
        );
    }

    #[test]
    fn format_selects_extractor() {
        let toml = toml(
            r#"
            [public]
            ipv4 = [
                "http://a.example.com/",
                { url = "http://b.example.com/", format = "dyndns" },
                { url = "http://c.example.com/", format = "plain" },
            ]
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();
        let extractors: Vec<_> = config
            .settings
            .public_ipv4
            .iter()
            .map(|e| e.extractor)
            .collect();

        assert_eq!(
            extractors,
            [Extractor::PlainText, Extractor::DynDns, Extractor::PlainText]
        );
    }

    #[test]
    fn unknown_format_rejected() {
        let toml = toml(
            r#"
            [public]
            ipv4 = [{ url = "http://a.example.com/", format = "xml" }]
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidFormat { .. })));
    }

    #[test]
    fn malformed_url_rejected() {
        let toml = toml(
            r#"
            [public]
            ipv4 = ["not a url"]
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn non_http_scheme_rejected() {
        let toml = toml(
            r#"
            [public]
            ipv4 = ["ftp://a.example.com/ip"]
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn empty_list_rejected() {
        let toml = toml("[public]\nipv6 = []");

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::EmptyList {
                field: "public.ipv6"
            })
        ));
    }
}

mod local_targets {
    use super::*;

    #[test]
    fn configured_targets_and_port_used() {
        let toml = toml(
            r#"
            [local]
            ipv4 = ["9.9.9.9", " 1.1.1.1 "]
            port = 53
        "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&toml)).unwrap();

        assert_eq!(
            config.settings.local_ipv4,
            ["9.9.9.9".parse::<std::net::IpAddr>().unwrap(), "1.1.1.1".parse().unwrap()]
        );
        assert_eq!(config.settings.local_port, 53);
    }

    #[test]
    fn wrong_family_rejected() {
        let toml = toml(
            r#"
            [local]
            ipv6 = ["8.8.8.8"]
        "#,
        );

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidAddress {
                field: "local.ipv6",
                ..
            })
        ));
    }

    #[test]
    fn unparseable_address_rejected() {
        let toml = toml("[local]\nipv4 = [\"dns.google\"]");

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidAddress { .. })));
    }

    #[test]
    fn loopback_and_unspecified_rejected() {
        for target in ["127.0.0.1", "0.0.0.0"] {
            let toml = toml(&format!("[local]\nipv4 = [\"{target}\"]"));

            let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

            assert!(
                matches!(result, Err(ConfigError::InvalidAddress { .. })),
                "{target} should be rejected"
            );
        }
    }

    #[test]
    fn zero_port_rejected() {
        let toml = toml("[local]\nport = 0");

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPort {
                field: "local.port"
            })
        ));
    }

    #[test]
    fn empty_list_rejected() {
        let toml = toml("[local]\nipv4 = []");

        let result = ValidatedConfig::from_raw(&cli(&[]), Some(&toml));

        assert!(matches!(
            result,
            Err(ConfigError::EmptyList {
                field: "local.ipv4"
            })
        ));
    }
}
