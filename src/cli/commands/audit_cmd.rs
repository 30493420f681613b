//! `passvault audit` — display the audit log.
//!
//! Usage:
//!   passvault audit               # show last 50 entries
//!   passvault audit --last 20     # show last 20
//!   passvault audit --since 7d    # entries from last 7 days

use chrono::Utc;

use crate::audit::{AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::{data_dir, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let dir = data_dir(cli)?;

    let audit = AuditLog::open(&dir)
        .ok_or_else(|| PassVaultError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let (num_str, unit) = if let Some(s) = input.strip_suffix('d') {
        (s, 'd')
    } else if let Some(s) = input.strip_suffix('h') {
        (s, 'h')
    } else if let Some(s) = input.strip_suffix('m') {
        (s, 'm')
    } else {
        return Err(PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — use format like 7d, 24h, or 30m"
        )));
    };

    let num: i64 = num_str.parse().map_err(|_| {
        PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — number part is not valid"
        ))
    })?;

    // The panicking Duration constructors would abort on huge values,
    // so use the checked variants and keep the styled error path.
    let duration = match unit {
        'd' => chrono::Duration::try_days(num),
        'h' => chrono::Duration::try_hours(num),
        'm' => chrono::Duration::try_minutes(num),
        _ => unreachable!(),
    }
    .ok_or_else(|| {
        PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — value is out of range"
        ))
    })?;

    // Subtraction can still leave the representable datetime range.
    Utc::now().checked_sub_signed(duration).ok_or_else(|| {
        PassVaultError::CommandFailed(format!(
            "invalid duration '{input}' — value is out of range"
        ))
    })
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Website", "Details"]);

    for entry in entries {
        let time = entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        let op = colorize_operation(&entry.operation);
        let website = entry.website.as_deref().unwrap_or("-");
        let details = entry.details.as_deref().unwrap_or("-");

        table.add_row(vec![time, op, website.to_string(), details.to_string()]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "init" => style(op).green().to_string(),
        "add" => style(op).blue().to_string(),
        "remove" => style(op).red().to_string(),
        "reveal" => style(op).cyan().to_string(),
        "generate" => style(op).yellow().to_string(),
        _ => op.to_string(),
    }
}
