//! CLI configuration: thin wrapper around `pekanit_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --timeout, --insecure, ...).

use std::path::PathBuf;
use std::time::Duration;

use pekanit_core::{ClientConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use pekanit_config::{
    Config, Defaults, Profile, config_path, default_session_path, load_config_or_default,
    parse_api_url, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Session file for the active profile: flag > profile > platform default.
///
/// Needs no backend URL, so `status` and `logout` work unconfigured.
pub fn session_path(global: &GlobalOpts, config: &Config) -> PathBuf {
    if let Some(ref path) = global.session_file {
        return path.clone();
    }
    let name = active_profile_name(global, config);
    config
        .profiles
        .get(&name)
        .and_then(|p| p.session_file.clone())
        .unwrap_or_else(|| default_session_path(&name))
}

/// Rows per report page: flag > config default.
pub fn page_size(flag: Option<usize>, config: &Config) -> usize {
    flag.unwrap_or(config.defaults.page_size)
}

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
pub fn client_config(global: &GlobalOpts, config: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = config.profiles.get(&profile_name);

    if profile.is_none() && global.profile.is_some() {
        let mut available: Vec<_> = config.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }

    // 1. Backend URL (flag > env > profile)
    let raw_url = global
        .api_url
        .as_deref()
        .or_else(|| profile.map(|p| p.api_url.as_str()))
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let api_url = parse_api_url(raw_url)?;

    // 2. TLS verification
    let tls = if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ca_path) = profile.and_then(|p| p.ca_cert.clone()) {
        TlsVerification::CustomCa(ca_path)
    } else {
        TlsVerification::SystemDefaults
    };

    // 3. Timeout (flag > profile > defaults)
    let timeout = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(config.defaults.timeout);

    Ok(ClientConfig {
        api_url,
        tls,
        timeout: Duration::from_secs(timeout),
        session_path: session_path(global, config),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["pekanit"];
        argv.extend_from_slice(args);
        argv.push("status");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_profile() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                api_url: "https://be.example.id".into(),
                timeout: Some(12),
                session_file: Some(PathBuf::from("/tmp/profile-session.json")),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_profile();
        let g = global(&[
            "--api-url",
            "http://localhost:8000",
            "--timeout",
            "3",
            "--session-file",
            "/tmp/flag.json",
            "-k",
        ]);

        let client = client_config(&g, &cfg).unwrap();
        assert_eq!(client.api_url.as_str(), "http://localhost:8000/");
        assert_eq!(client.timeout, Duration::from_secs(3));
        assert_eq!(client.session_path, PathBuf::from("/tmp/flag.json"));
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let cfg = config_with_profile();
        let client = client_config(&global(&[]), &cfg).unwrap();
        assert_eq!(client.timeout, Duration::from_secs(12));
        assert_eq!(client.session_path, PathBuf::from("/tmp/profile-session.json"));
        assert_eq!(client.tls, TlsVerification::SystemDefaults);
    }

    #[test]
    fn missing_url_is_no_config() {
        let err = client_config(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_explicit_profile_is_reported() {
        let err = client_config(&global(&["-p", "staging"]), &config_with_profile()).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { .. }));
    }
}
