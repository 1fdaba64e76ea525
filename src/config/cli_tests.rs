//! Tests for CLI argument parsing.

use super::cli::{Cli, Command, FamilyArg, ScopeArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_lookup_selection() {
        let cli = Cli::parse_from_iter(["ipkit", "--scope", "local", "--family", "ipv6"]);

        assert_eq!(cli.scope, Some(ScopeArg::Local));
        assert_eq!(cli.family, Some(FamilyArg::V6));
    }

    #[test]
    fn parse_all_families() {
        let v4 = Cli::parse_from_iter(["ipkit", "--family", "ipv4"]);
        assert_eq!(v4.family, Some(FamilyArg::V4));

        let v6 = Cli::parse_from_iter(["ipkit", "--family", "ipv6"]);
        assert_eq!(v6.family, Some(FamilyArg::V6));

        let both = Cli::parse_from_iter(["ipkit", "--family", "both"]);
        assert_eq!(both.family, Some(FamilyArg::Both));
    }

    #[test]
    fn parse_http_options() {
        let cli = Cli::parse_from_iter([
            "ipkit",
            "--timeout",
            "3",
            "--header",
            "X-Api-Key=secret",
            "--header",
            "Accept: text/plain",
        ]);

        assert_eq!(cli.timeout, Some(3));
        assert_eq!(cli.headers.len(), 2);
        assert_eq!(cli.headers[0], "X-Api-Key=secret");
        assert_eq!(cli.headers[1], "Accept: text/plain");
    }

    #[test]
    fn parse_misc_options() {
        let cli = Cli::parse_from_iter([
            "ipkit",
            "--config",
            "/path/to/config.toml",
            "--sequential",
            "--json",
            "--verbose",
        ]);

        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
        assert!(cli.sequential);
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["ipkit"]);

        assert!(cli.scope.is_none());
        assert!(cli.family.is_none());
        assert!(cli.timeout.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.sequential);
        assert!(!cli.json);
        assert!(!cli.verbose);
        assert!(cli.headers.is_empty());
    }

    #[test]
    fn rejects_unknown_scope() {
        use clap::Parser;

        let result = Cli::try_parse_from(["ipkit", "--scope", "remote"]);

        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["ipkit", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("ipkit.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["ipkit", "init", "--output", "/custom/path/config.toml"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/custom/path/config.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn is_init_false_for_lookup_mode() {
        let cli = Cli::parse_from_iter(["ipkit", "--scope", "public"]);

        assert!(!cli.is_init());
    }
}

mod expansion {
    use super::*;
    use crate::network::IpFamily;
    use crate::resolve::Scope;

    #[test]
    fn scope_all_lists_public_first() {
        assert_eq!(ScopeArg::All.scopes(), [Scope::Public, Scope::Local]);
        assert_eq!(ScopeArg::Local.scopes(), [Scope::Local]);
    }

    #[test]
    fn family_both_lists_ipv4_first() {
        assert_eq!(FamilyArg::Both.families(), [IpFamily::V4, IpFamily::V6]);
        assert_eq!(FamilyArg::V6.families(), [IpFamily::V6]);
    }
}
