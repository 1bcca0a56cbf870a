use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the SQLite database and bootstrap the schema.
/// Tables are created when missing; existing data is left alone.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/indiceia.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let check = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        name
    );
    let rows = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(conn: &DatabaseConnection, name: &str, ddl: &str) -> anyhow::Result<()> {
    if !table_exists(conn, name).await? {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            ddl.to_string(),
        ))
        .await?;
    }
    Ok(())
}

async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    // a001_commerce
    ensure_table(
        conn,
        "a001_commerce",
        r#"
        CREATE TABLE a001_commerce (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            owner_user_id TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            whatsapp TEXT NOT NULL DEFAULT '',
            hours TEXT NOT NULL DEFAULT '{}',
            payment_methods TEXT NOT NULL DEFAULT '[]',
            assistant_greeting TEXT NOT NULL DEFAULT '',
            gist_id TEXT,
            gist_raw_url TEXT,
            gist_web_url TEXT,
            exported_at TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .await?;

    // a002_product
    ensure_table(
        conn,
        "a002_product",
        r#"
        CREATE TABLE a002_product (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            commerce_id TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            price REAL NOT NULL DEFAULT 0,
            stock INTEGER,
            detail TEXT NOT NULL DEFAULT '',
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
        "#,
    )
    .await?;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "CREATE INDEX IF NOT EXISTS idx_a002_product_commerce ON a002_product (commerce_id);"
            .to_string(),
    ))
    .await?;

    // sys_users
    ensure_table(
        conn,
        "sys_users",
        r#"
        CREATE TABLE sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    )
    .await?;

    // sys_refresh_tokens
    ensure_table(
        conn,
        "sys_refresh_tokens",
        r#"
        CREATE TABLE sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
    )
    .await?;

    // sys_settings (key/value store: jwt secret lives here)
    ensure_table(
        conn,
        "sys_settings",
        r#"
        CREATE TABLE sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
        "#,
    )
    .await?;

    // system_log
    ensure_table(
        conn,
        "system_log",
        r#"
        CREATE TABLE system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        );
        "#,
    )
    .await?;

    Ok(())
}
