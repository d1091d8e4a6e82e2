use crate::error::{Result, StoreError};
use phonedb_core::domain::{validate_phone_number, PhoneId, PhoneRecord};
use rusqlite::{params, Connection, OptionalExtension};

pub struct PhonesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> PhonesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, number: &str) -> Result<PhoneId> {
        validate_phone_number(number)?;
        self.conn.execute(
            "INSERT INTO phone_numbers (value) VALUES (?1);",
            [number],
        )?;
        Ok(PhoneId(self.conn.last_insert_rowid()))
    }

    pub fn get(&self, id: PhoneId) -> Result<String> {
        self.conn
            .query_row(
                "SELECT value FROM phone_numbers WHERE id = ?1;",
                [id.as_i64()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| not_found(id))
    }

    /// Looks a record up by its exact stored value. Absence is `Ok(None)`.
    pub fn find_by_number(&self, number: &str) -> Result<Option<PhoneRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, value FROM phone_numbers
             WHERE value = ?1
             ORDER BY id ASC
             LIMIT 1;",
        )?;
        let mut rows = stmt.query([number])?;
        match rows.next()? {
            Some(row) => Ok(Some(phone_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn update(&self, id: PhoneId, number: &str) -> Result<()> {
        validate_phone_number(number)?;
        let updated = self.conn.execute(
            "UPDATE phone_numbers SET value = ?2 WHERE id = ?1;",
            params![id.as_i64(), number],
        )?;
        if updated == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Deleting an id that is not stored reports `NotFound`.
    pub fn delete(&self, id: PhoneId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM phone_numbers WHERE id = ?1;", [id.as_i64()])?;
        if deleted == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<PhoneRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, value FROM phone_numbers ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(phone_from_row(row)?);
        }
        Ok(records)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM phone_numbers;",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn not_found(id: PhoneId) -> StoreError {
    StoreError::NotFound(format!("phone {}", id))
}

fn phone_from_row(row: &rusqlite::Row<'_>) -> Result<PhoneRecord> {
    let id: i64 = row.get(0)?;
    Ok(PhoneRecord {
        id: PhoneId(id),
        number: row.get(1)?,
    })
}
