// SQL識別子クォートユーティリティ
//
// 行数カウントのクエリに埋め込むテーブル名を方言ごとにクォートします。

use crate::core::config::Dialect;

/// 方言に応じて識別子をクォート
///
/// # Examples
/// ```
/// use rowtally::adapters::sql_quote::quote_identifier;
/// use rowtally::core::config::Dialect;
/// assert_eq!(quote_identifier(Dialect::PostgreSQL, "users"), r#""users""#);
/// assert_eq!(quote_identifier(Dialect::MySQL, "users"), "`users`");
/// ```
pub fn quote_identifier(dialect: Dialect, name: &str) -> String {
    match dialect {
        Dialect::MySQL => quote_identifier_mysql(name),
        Dialect::PostgreSQL | Dialect::SQLite => quote_identifier_ansi(name),
    }
}

/// MySQL用識別子クォート（バッククォート）
///
/// 識別子内のバッククォートは二重にエスケープします。
pub fn quote_identifier_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// PostgreSQL/SQLite用識別子クォート（ダブルクォート）
///
/// 識別子内のダブルクォートは二重にエスケープします。
pub fn quote_identifier_ansi(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// テーブルの行数を数えるSQLを生成
pub fn count_rows_sql(dialect: Dialect, table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_identifier(dialect, table))
}
