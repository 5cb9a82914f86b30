/// MySQL Driver
///
/// Networked MySQL servers through sqlx. The async client is driven by a
/// current-thread tokio runtime owned by each handle, so every call blocks
/// for the duration of the round trip.
///
/// Commands without parameters go over the text protocol, so statements the
/// server refuses to prepare still run. Parameterized commands are prepared.
use crate::core::db::{Handle, Param, Row, ServerBackend, ServerConnection, ServerDetails, Table};
use crate::core::{Cell, DatabaseError, Result};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection as RawConnection, MySqlRow, MySqlValueRef};
use sqlx::{Column, ConnectOptions, Connection, Row as _, TypeInfo, Value, ValueRef};
use time::{OffsetDateTime, PrimitiveDateTime};
use tokio::runtime::{Builder, Runtime};

/// Backend for MySQL and MariaDB servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlBackend;

impl ServerBackend for MysqlBackend {
    type Handle = MysqlHandle;

    fn connection_url(&self, details: &ServerDetails) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            details.username, details.host, details.port, details.database
        )
    }

    fn connect(&self, details: &ServerDetails) -> Result<MysqlHandle> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DatabaseError::Driver(format!("Failed to start MySQL runtime: {}", e)))?;

        let options = MySqlConnectOptions::new()
            .host(&details.host)
            .port(details.port)
            .database(&details.database)
            .username(&details.username)
            .password(&details.password);
        let conn = runtime.block_on(options.connect())?;

        Ok(MysqlHandle { runtime, conn })
    }
}

/// An open MySQL connection with the runtime that drives it.
pub struct MysqlHandle {
    runtime: Runtime,
    conn: RawConnection,
}

impl Handle for MysqlHandle {
    fn execute(&mut self, command: &str, params: &[Param]) -> Result<()> {
        if uses_text_protocol(params) {
            self.runtime
                .block_on(sqlx::raw_sql(command).execute(&mut self.conn))?;
        } else {
            let query = params
                .iter()
                .fold(sqlx::query(command), |query, param| query.bind(param.as_str()));
            self.runtime.block_on(query.execute(&mut self.conn))?;
        }
        Ok(())
    }

    fn query(&mut self, command: &str, params: &[Param]) -> Result<Table> {
        let rows: Vec<MySqlRow> = if uses_text_protocol(params) {
            self.runtime
                .block_on(sqlx::raw_sql(command).fetch_all(&mut self.conn))?
        } else {
            let query = params
                .iter()
                .fold(sqlx::query(command), |query, param| query.bind(param.as_str()));
            self.runtime.block_on(query.fetch_all(&mut self.conn))?
        };

        let mut table = Table::with_capacity(rows.len());
        for row in &rows {
            let mut record = Row::with_capacity(row.columns().len());
            for column in row.columns() {
                let value = row.try_get_raw(column.ordinal())?;
                record.insert(column.name().to_string(), cell_from_value(value));
            }
            table.push(record);
        }
        Ok(table)
    }

    fn close(self) -> Result<()> {
        let MysqlHandle { runtime, conn } = self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}

/// Unparameterized commands skip server-side preparation.
fn uses_text_protocol(params: &[Param]) -> bool {
    params.is_empty()
}

/// Renders a MySQL value as text based on its column type.
fn cell_from_value(value: MySqlValueRef<'_>) -> Cell {
    if value.is_null() {
        return Cell::null();
    }

    let type_name = value.type_info().name().to_string();
    let value = ValueRef::to_owned(&value);

    let text = match type_name.as_str() {
        "BOOLEAN" => value.try_decode::<bool>().map(|v| v.to_string()),
        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => value
            .try_decode::<i64>()
            .map(|v| v.to_string())
            .or_else(|_| value.try_decode::<u64>().map(|v| v.to_string())),
        name if name.ends_with("UNSIGNED") => value.try_decode::<u64>().map(|v| v.to_string()),
        "FLOAT" => value.try_decode::<f32>().map(|v| v.to_string()),
        "DOUBLE" => value.try_decode::<f64>().map(|v| v.to_string()),
        "DATE" => value.try_decode::<time::Date>().map(|v| v.to_string()),
        "TIME" => value.try_decode::<time::Time>().map(format_time),
        "DATETIME" => value
            .try_decode::<PrimitiveDateTime>()
            .map(|v| format!("{} {}", v.date(), format_time(v.time()))),
        "TIMESTAMP" => value
            .try_decode::<OffsetDateTime>()
            .map(|v| format!("{} {}", v.date(), format_time(v.time()))),
        _ => value.try_decode::<String>(),
    };

    // DECIMAL, JSON and binary columns arrive as raw bytes
    let text = text.or_else(|_| {
        value
            .try_decode_unchecked::<Vec<u8>>()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    });

    match text {
        Ok(text) => Cell::from(text),
        Err(e) => {
            tracing::warn!(column_type = %type_name, error = %e, "undecodable column value");
            Cell::null()
        }
    }
}

fn format_time(time: time::Time) -> String {
    format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second())
}

/// A connection to a MySQL server.
pub type MysqlConnection = ServerConnection<MysqlBackend>;

impl ServerConnection<MysqlBackend> {
    /// Creates a disconnected MySQL connection
    pub fn mysql(details: ServerDetails) -> Self {
        Self::server(MysqlBackend, details)
    }
}
