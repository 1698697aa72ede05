// 接続文字列の構築と解析
//
// TargetConfig から接続文字列を生成し、
// コマンドライン引数の接続URLを TargetConfig に変換する。

use crate::core::config::{Dialect, TargetConfig};
use crate::core::error::TargetError;
use url::Url;
use urlencoding::{decode, encode};

/// 接続文字列を生成
///
/// ユーザー名とパスワードはパーセントエンコードされます。
/// これにより、`@`, `:`, `/`, `#`, `?` などの特殊文字を含むパスワードでも
/// 正しく接続文字列が構築されます。
pub fn build_connection_string(target: &TargetConfig) -> String {
    let default_user = match target.dialect {
        Dialect::PostgreSQL => "postgres",
        Dialect::MySQL => "root",
        Dialect::SQLite => return format!("sqlite://{}", target.database),
    };

    let user = target.user.as_deref().unwrap_or(default_user);
    let encoded_user = encode(user);
    let auth = match target.password.as_deref() {
        Some(password) if !password.is_empty() => {
            format!("{}:{}", encoded_user, encode(password))
        }
        _ => encoded_user.to_string(),
    };

    format!(
        "{}://{}@{}:{}/{}",
        target.dialect,
        auth,
        target.host,
        target.resolved_port(),
        target.database
    )
}

/// コマンドライン引数の接続先を解析
///
/// `alias=URL` の形式で別名を付けられます。
/// `//` を含まない場合は `default_dialect` のスキームを補います
/// （例: `root:pw@127.0.0.1:3306/app` → `mysql://root:pw@127.0.0.1:3306/app`）。
pub fn parse_target(arg: &str, default_dialect: Dialect) -> Result<TargetConfig, TargetError> {
    let (alias, raw_url) = split_alias(arg);

    let url = if raw_url.contains("//") {
        raw_url.to_string()
    } else {
        format!("{}://{}", default_dialect, raw_url)
    };

    let (scheme, rest) = url.split_once("://").ok_or_else(|| TargetError::InvalidUrl {
        url: raw_url.to_string(),
        cause: "missing scheme separator".to_string(),
    })?;

    let dialect = Dialect::from_scheme(&scheme.to_ascii_lowercase()).ok_or_else(|| {
        TargetError::UnsupportedScheme {
            scheme: scheme.to_string(),
        }
    })?;

    let mut target = match dialect {
        Dialect::SQLite => parse_sqlite_path(rest, raw_url)?,
        _ => parse_network_url(&url, dialect, raw_url)?,
    };
    target.alias = alias.map(str::to_string);

    Ok(target)
}

/// `alias=URL` を分割する
///
/// `=` より前が単純な名前として読める場合のみ別名とみなします。
fn split_alias(arg: &str) -> (Option<&str>, &str) {
    match arg.split_once('=') {
        Some((alias, url))
            if !alias.is_empty()
                && alias
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ')) =>
        {
            (Some(alias), url)
        }
        _ => (None, arg),
    }
}

fn parse_sqlite_path(rest: &str, raw_url: &str) -> Result<TargetConfig, TargetError> {
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() {
        return Err(TargetError::MissingDatabase {
            url: raw_url.to_string(),
        });
    }

    let mut target = TargetConfig::new(Dialect::SQLite, path);
    target.host = String::new();
    Ok(target)
}

fn parse_network_url(url: &str, dialect: Dialect, raw_url: &str) -> Result<TargetConfig, TargetError> {
    let parsed = Url::parse(url).map_err(|e| TargetError::InvalidUrl {
        url: raw_url.to_string(),
        cause: e.to_string(),
    })?;

    let database = parsed.path().trim_matches('/').to_string();
    if database.is_empty() {
        return Err(TargetError::MissingDatabase {
            url: raw_url.to_string(),
        });
    }

    let mut target = TargetConfig::new(dialect, database);
    if let Some(host) = parsed.host_str() {
        target.host = host.to_string();
    }
    target.port = parsed.port();

    if !parsed.username().is_empty() {
        target.user = Some(decode_component(parsed.username(), raw_url)?);
    }
    if let Some(password) = parsed.password() {
        target.password = Some(decode_component(password, raw_url)?);
    }

    Ok(target)
}

fn decode_component(component: &str, raw_url: &str) -> Result<String, TargetError> {
    decode(component)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| TargetError::InvalidUrl {
            url: raw_url.to_string(),
            cause: e.to_string(),
        })
}
