//! Employee (ingested log) queries.

use chrono::{DateTime, NaiveDate, Utc};
use frametally_common::{EmployeeId, Machine, Result};
use rusqlite::Connection;

use super::{conversion_err, db_err, format_date, parse_date, parse_machine};
use crate::models::Employee;

/// Record that `script_runner` ingested a log for `user_on_file`.
pub fn insert_employee(
    conn: &Connection,
    script_runner: &str,
    machine: Machine,
    user_on_file: &str,
    date_of_file: NaiveDate,
) -> Result<Employee> {
    let id = EmployeeId::new();
    let submitted_at = Utc::now();

    conn.execute(
        "INSERT INTO employees (id, script_runner, machine, user_on_file, date_of_file, submitted_at)
         VALUES (:id, :script_runner, :machine, :user_on_file, :date_of_file, :submitted_at)",
        rusqlite::named_params! {
            ":id": id.to_string(),
            ":script_runner": script_runner,
            ":machine": machine.as_str(),
            ":user_on_file": user_on_file,
            ":date_of_file": format_date(date_of_file),
            ":submitted_at": submitted_at.to_rfc3339(),
        },
    )
    .map_err(db_err)?;

    Ok(Employee {
        id,
        script_runner: script_runner.to_string(),
        machine,
        user_on_file: user_on_file.to_string(),
        date_of_file,
        submitted_at,
    })
}

/// All employee rows, oldest submission first.
pub fn list_employees(conn: &Connection) -> Result<Vec<Employee>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, script_runner, machine, user_on_file, date_of_file, submitted_at
             FROM employees ORDER BY submitted_at, rowid",
        )
        .map_err(db_err)?;

    let rows = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let submitted_at: String = row.get(5)?;
            Ok(Employee {
                id: id.parse().map_err(|e| conversion_err(0, e))?,
                script_runner: row.get(1)?,
                machine: parse_machine(2, &row.get::<_, String>(2)?)?,
                user_on_file: row.get(3)?,
                date_of_file: parse_date(4, &row.get::<_, String>(4)?)?,
                submitted_at: DateTime::parse_from_rfc3339(&submitted_at)
                    .map_err(|e| conversion_err(5, e))?
                    .with_timezone(&Utc),
            })
        })
        .map_err(db_err)?;

    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(db_err)
}

/// Distinct users with a log from `machine`, sorted by name.
pub fn users_by_machine(conn: &Connection, machine: Machine) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT DISTINCT user_on_file FROM employees
             WHERE machine = :machine ORDER BY user_on_file",
        )
        .map_err(db_err)?;

    let rows = stmt
        .query_map(
            rusqlite::named_params! { ":machine": machine.as_str() },
            |row| row.get(0),
        )
        .map_err(db_err)?;

    rows.collect::<rusqlite::Result<Vec<String>>>()
        .map_err(db_err)
}
