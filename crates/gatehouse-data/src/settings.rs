//! Shared parsing of server connection settings.

use std::borrow::Cow;

use gatehouse_config::Environment;
use gatehouse_config::defaults::{
    DB_DATABASE, DB_HOST, DB_PASSWORD, DB_PORT, DB_SSLMODE, DB_USERNAME, DEFAULT_HOST,
};
use percent_encoding::percent_decode_str;
use url::Url;

use crate::descriptor::{EngineKind, ProvisioningTarget};
use crate::error::{DataError, DataResult};

/// Per-engine constants for server setting resolution.
pub(crate) struct ServerProfile {
    pub(crate) engine: EngineKind,
    /// Scheme written into generated DSNs.
    pub(crate) scheme: &'static str,
    /// Schemes accepted in `DB_URL`.
    pub(crate) accepted_schemes: &'static [&'static str],
    pub(crate) default_port: u16,
    /// `Some` when the engine reads `DB_SSLMODE`.
    pub(crate) default_ssl_mode: Option<&'static str>,
    /// Query parameters naming the SSL mode in `DB_URL`.
    pub(crate) ssl_mode_params: &'static [&'static str],
}

/// Target built from discrete `DB_*` variables.
pub(crate) fn target_from_env(
    env: &Environment,
    profile: &ServerProfile,
) -> DataResult<ProvisioningTarget> {
    let host = env.get_or(DB_HOST, DEFAULT_HOST).to_string();
    let port = parse_port(env.get(DB_PORT), profile.default_port)?;
    let user = required(env, DB_USERNAME)?;
    let password = required(env, DB_PASSWORD)?;
    let database_name = required(env, DB_DATABASE)?;
    let ssl_mode = profile
        .default_ssl_mode
        .map(|default| env.get_or(DB_SSLMODE, default).to_string());

    Ok(ProvisioningTarget {
        engine: profile.engine,
        host,
        port,
        user,
        password,
        database_name,
        ssl_mode,
    })
}

/// Target recovered from a full connection URL.
pub(crate) fn target_from_url(
    raw: &str,
    profile: &ServerProfile,
) -> DataResult<ProvisioningTarget> {
    let url = Url::parse(raw).map_err(|source| DataError::InvalidUrl {
        reason: "not a valid URL",
        source: Some(source),
    })?;
    if !profile.accepted_schemes.contains(&url.scheme()) {
        return Err(DataError::InvalidUrl {
            reason: "scheme does not match DB_DRIVER",
            source: None,
        });
    }

    let host = url
        .host_str()
        .map(|host| host.trim_start_matches('[').trim_end_matches(']'))
        .filter(|host| !host.is_empty())
        .ok_or(DataError::InvalidUrl {
            reason: "missing host",
            source: None,
        })?
        .to_string();
    let user = decode(url.username())?;
    if user.is_empty() {
        return Err(DataError::MissingCredential { name: DB_USERNAME });
    }
    let password = url.password().map(decode).transpose()?.unwrap_or_default();
    let database_name = decode(url.path().trim_start_matches('/'))?;
    if database_name.is_empty() {
        return Err(DataError::MissingCredential { name: DB_DATABASE });
    }
    let ssl_mode = url
        .query_pairs()
        .find(|(key, _)| profile.ssl_mode_params.contains(&&**key))
        .map(|(_, value)| value.into_owned());

    Ok(ProvisioningTarget {
        engine: profile.engine,
        host,
        port: url.port().unwrap_or(profile.default_port),
        user,
        password,
        database_name,
        ssl_mode,
    })
}

/// Render `target` as a percent-encoded connection URL.
pub(crate) fn build_dsn(
    target: &ProvisioningTarget,
    profile: &ServerProfile,
    query: &[(&str, &str)],
) -> DataResult<String> {
    let invalid =
        |name: &'static str, reason: &'static str| DataError::InvalidSetting { name, reason };

    let mut url = Url::parse(&format!("{}://localhost", profile.scheme)).map_err(|source| {
        DataError::InvalidUrl {
            reason: "unsupported scheme",
            source: Some(source),
        }
    })?;
    url.set_host(Some(&target.host))
        .map_err(|_| invalid(DB_HOST, "not a valid host name"))?;
    url.set_port(Some(target.port))
        .map_err(|()| invalid(DB_PORT, "port cannot be set on this URL"))?;
    url.set_username(&target.user)
        .map_err(|()| invalid(DB_USERNAME, "user name cannot be encoded"))?;
    url.set_password(Some(&target.password))
        .map_err(|()| invalid(DB_PASSWORD, "password cannot be encoded"))?;
    url.set_path(&format!("/{}", target.database_name));
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url.into())
}

fn parse_port(raw: Option<&str>, default: u16) -> DataResult<u16> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or(DataError::InvalidSetting {
            name: DB_PORT,
            reason: "expected a port number between 1 and 65535",
        })
}

fn required(env: &Environment, name: &'static str) -> DataResult<String> {
    env.get(name)
        .map(str::to_string)
        .ok_or(DataError::MissingCredential { name })
}

fn decode(component: &str) -> DataResult<String> {
    percent_decode_str(component)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| DataError::InvalidUrl {
            reason: "URL component is not valid UTF-8",
            source: None,
        })
}
