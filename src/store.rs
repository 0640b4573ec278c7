use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Synchronous string-keyed persistent store backing every collection and
/// the session. One `kv` table inside the workspace database.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(workspace: &Path) -> anyhow::Result<Store> {
        std::fs::create_dir_all(workspace)?;
        let db_path = workspace.join("eduadmin.sqlite3");
        let conn = Connection::open(db_path)?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> anyhow::Result<Store> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    pub fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |r| {
                r.get::<_, String>(0)
            })
            .optional()?;
        Ok(v)
    }

    pub fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_roundtrip() {
        let store = Store::open_in_memory().expect("open store");
        assert_eq!(store.get("courses").expect("get"), None);

        store.set("courses", "[1,2,3]").expect("set");
        assert_eq!(
            store.get("courses").expect("get"),
            Some("[1,2,3]".to_string())
        );

        // Overwrite replaces, never appends.
        store.set("courses", "[]").expect("set");
        assert_eq!(store.get("courses").expect("get"), Some("[]".to_string()));

        store.remove("courses").expect("remove");
        assert_eq!(store.get("courses").expect("get"), None);
    }
}
