//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, OptionalExtension, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, session::SessionId};

/// The ID of a transaction, unique across all sessions.
pub type TransactionId = Uuid;

// ============================================================================
// MODELS
// ============================================================================

/// The direction in which money moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was earned or received.
    Credit,
    /// Money was spent.
    Debit,
}

impl TransactionType {
    /// The name of the type as it is stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "credit",
            TransactionType::Debit => "debit",
        }
    }

    /// Apply the sign convention for this type to `magnitude`.
    ///
    /// Credits are stored as given and debits are negated. The sign of
    /// `magnitude` is not checked, so a credit with a negative magnitude
    /// produces a negative amount.
    pub fn signed_amount(&self, magnitude: f64) -> f64 {
        match self {
            TransactionType::Credit => magnitude,
            TransactionType::Debit => magnitude * -1.0,
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other:?}").into(),
            )),
        }
    }
}

/// A credit or debit recorded by an anonymous session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The session that created, and is the only one that can see, the transaction.
    pub session_id: SessionId,
    /// A text description of what the transaction was for.
    pub title: String,
    /// The signed amount of money: positive for credits, negative for debits.
    pub amount: f64,
    /// Whether the transaction was entered as a credit or a debit.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// When the transaction was stored.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A transaction that has not been stored yet.
///
/// Use [NewTransaction::new] so that the amount is signed according to
/// the transaction type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The session creating the transaction.
    pub session_id: SessionId,
    /// A text description of what the transaction was for.
    pub title: String,
    /// The signed amount.
    pub amount: f64,
    /// The type the client gave for the transaction.
    pub kind: TransactionType,
}

impl NewTransaction {
    /// Create a transaction for `session_id` from the unsigned `magnitude` entered by the client.
    pub fn new(session_id: SessionId, title: &str, magnitude: f64, kind: TransactionType) -> Self {
        Self {
            session_id,
            title: title.to_owned(),
            amount: kind.signed_amount(magnitude),
            kind,
        }
    }
}

/// The total of a session's transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of the signed amounts, zero if there are no transactions.
    pub amount: f64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Store a new transaction under a freshly generated ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let id = TransactionId::new_v4();

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (id, session_id, title, amount, kind)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, session_id, title, amount, kind, created_at",
        )?
        .query_row(
            (
                id.to_string(),
                new_transaction.session_id.as_str(),
                new_transaction.title,
                new_transaction.amount,
                new_transaction.kind,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions of `session_id` in the order they were created.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transactions(
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, session_id, title, amount, kind, created_at FROM \"transaction\"
             WHERE session_id = :session_id
             ORDER BY rowid",
        )?
        .query_map(&[(":session_id", session_id.as_str())], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Retrieve the transaction `id` if it belongs to `session_id`.
///
/// A transaction that does not exist, or that belongs to another session,
/// gives `Ok(None)`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transaction(
    id: TransactionId,
    session_id: &SessionId,
    connection: &Connection,
) -> Result<Option<Transaction>, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, session_id, title, amount, kind, created_at FROM \"transaction\"
             WHERE session_id = :session_id AND id = :id",
        )?
        .query_row(
            &[
                (":session_id", session_id.as_str()),
                (":id", id.to_string().as_str()),
            ],
            map_transaction_row,
        )
        .optional()?;

    Ok(transaction)
}

/// Sum the amounts of all transactions of `session_id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_summary(session_id: &SessionId, connection: &Connection) -> Result<Summary, Error> {
    // TOTAL is 0.0 on an empty set, where SUM would be NULL.
    let amount = connection.query_row(
        "SELECT TOTAL(amount) FROM \"transaction\" WHERE session_id = ?1",
        [session_id.as_str()],
        |row| row.get(0),
    )?;

    Ok(Summary { amount })
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('credit', 'debit')),
                created_at INTEGER NOT NULL DEFAULT (CAST(strftime('%s', 'now') AS INTEGER))
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_session_id ON \"transaction\"(session_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(error)))?;

    let raw_session_id: String = row.get(1)?;
    let session_id = SessionId::parse(&raw_session_id).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, "empty session ID".into())
    })?;

    let title = row.get(2)?;
    let amount = row.get(3)?;
    let kind = row.get(4)?;

    let raw_created_at: i64 = row.get(5)?;
    let created_at = OffsetDateTime::from_unix_timestamp(raw_created_at).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Integer, Box::new(error))
    })?;

    Ok(Transaction {
        id,
        session_id,
        title,
        amount,
        kind,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
