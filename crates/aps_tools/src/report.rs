//! Result tables for forums, web pages and terminals.
//!
//! Every renderer projects a list of records onto a list of column names.
//! Columns are checked before any row is rendered, so an unknown name fails
//! even for an empty result list. Fields a record does not carry (zero part
//! counts, unset optional values) render as empty cells.

use aps_core::error::{Result, ShellError};
use aps_core::record::{is_known_field, FieldValue, Record};
use clap::ValueEnum;

/// Columns shown in HTML and plain-text tables by default.
pub const DEFAULT_COLUMNS: [&str; 7] = [
    "dps", "damage", "diameter", "velocity", "period", "blocks", "shell",
];

/// Columns shown in BBCode tables by default.
pub const DEFAULT_BBCODE_COLUMNS: [&str; 6] =
    ["dps", "damage", "diameter", "velocity", "period", "shell"];

/// Output format of the optimizer report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// Aligned plain text.
    #[default]
    Table,
    /// HTML table.
    Html,
    /// Forum BBCode table.
    Bbcode,
    /// JSON document.
    Json,
}

/// Render one value the way result tables show it.
///
/// `separator` joins damage components.
#[must_use]
pub fn format_value(name: &str, value: &FieldValue, separator: &str) -> String {
    match (name, value) {
        ("diameter", FieldValue::Real(d)) => format!("{:3}", (d * 1000.0).floor() as i64),
        (_, FieldValue::Damage(damage)) => damage
            .iter()
            .map(|e| format!("{}={:3}:{:3.1}", e.kind, e.value.trunc() as i64, e.ap))
            .collect::<Vec<_>>()
            .join(separator),
        (_, FieldValue::Real(v)) if *v >= 0.0 => format!(" {v:.2}"),
        (_, FieldValue::Real(v)) => format!("{v:.2}"),
        (_, other) => other.to_string(),
    }
}

fn check_columns<S: AsRef<str>>(columns: &[S]) -> Result<()> {
    for column in columns {
        let name = column.as_ref();
        if !is_known_field(name) {
            return Err(ShellError::UnknownField(name.to_string()));
        }
    }
    Ok(())
}

fn cells<R: Record, S: AsRef<str>>(row: &R, columns: &[S], separator: &str) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let name = column.as_ref();
            row.field(name)
                .map(|value| format_value(name, &value, separator))
                .unwrap_or_default()
        })
        .collect()
}

/// Render an HTML table.
///
/// # Errors
///
/// Returns [`ShellError::UnknownField`] for an unknown column.
pub fn html_table<R: Record, S: AsRef<str>>(rows: &[R], columns: &[S]) -> Result<String> {
    check_columns(columns)?;
    let caption: Vec<String> = columns
        .iter()
        .map(|c| format!("<b>{}</b>", c.as_ref().to_uppercase()))
        .collect();
    let body: Vec<String> = rows
        .iter()
        .map(|row| format!("<td>{}</td>", cells(row, columns, "</br>").join("</td><td>")))
        .collect();
    Ok(format!(
        "<table><tr><td>{}</td></tr><tr>{}</tr></table>",
        caption.join("</td><td>"),
        body.join("</tr><tr>")
    ))
}

/// Render a BBCode table.
///
/// # Errors
///
/// Returns [`ShellError::UnknownField`] for an unknown column.
pub fn bbcode_table<R: Record, S: AsRef<str>>(rows: &[R], columns: &[S]) -> Result<String> {
    check_columns(columns)?;
    let caption: String = columns
        .iter()
        .map(|c| format!("[th][b]{}[/b][/th]", c.as_ref().to_uppercase()))
        .collect();
    let body: Vec<String> = rows
        .iter()
        .map(|row| {
            cells(row, columns, " ")
                .iter()
                .map(|cell| format!("[td]{cell}[/td]"))
                .collect::<String>()
        })
        .collect();
    Ok(format!(
        "[table][tr]{caption}[/tr][tr]{}[/tr][/table]",
        body.join("[/tr][tr]")
    ))
}

/// Render an aligned plain-text table.
///
/// # Errors
///
/// Returns [`ShellError::UnknownField`] for an unknown column.
pub fn text_table<R: Record, S: AsRef<str>>(rows: &[R], columns: &[S]) -> Result<String> {
    check_columns(columns)?;
    let mut lines: Vec<Vec<String>> = vec![columns
        .iter()
        .map(|c| c.as_ref().to_uppercase())
        .collect()];
    lines.extend(rows.iter().map(|row| {
        cells(row, columns, " ")
            .into_iter()
            .map(|cell| cell.trim().to_string())
            .collect()
    }));

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| lines.iter().map(|line| line[i].len()).max().unwrap_or(0))
        .collect();
    let rendered: Vec<String> = lines
        .iter()
        .map(|line| {
            line.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect();
    Ok(rendered.join("\n"))
}

/// Render every field a record carries, one `name: value` per line.
#[must_use]
pub fn field_listing<R: Record>(record: &R) -> String {
    record
        .fields()
        .iter()
        .map(|(name, value)| format!("{name}: {}", format_value(name, value, " ").trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use aps_core::cannon::{evaluate, DamageKind, DamageProfile, EvaluatedConfig};
    use aps_core::context::CannonContext;

    fn config() -> EvaluatedConfig {
        evaluate(
            &"HE, HE, bleeder, gunpowder".parse().unwrap(),
            0.5,
            &CannonContext::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value("diameter", &FieldValue::Real(0.1234), " "), "123");
        assert_eq!(format_value("diameter", &FieldValue::Real(0.05), " "), " 50");
        assert_eq!(format_value("dps", &FieldValue::Real(12.345), " "), " 12.35");
        assert_eq!(format_value("dps", &FieldValue::Real(-1.0), " "), "-1.00");
        assert_eq!(format_value("blocks", &FieldValue::Int(15), " "), "15");

        let mut damage = DamageProfile::new();
        damage.insert(DamageKind::Kinetic, 2842.7, 3.04).unwrap();
        damage.insert(DamageKind::Explosive, 12.0, 3.04).unwrap();
        let value = FieldValue::Damage(damage);
        assert_eq!(format_value("damage", &value, " "), "kinetic=2842:3.0 HE= 12:3.0");
        assert_eq!(
            format_value("damage", &value, "</br>"),
            "kinetic=2842:3.0</br>HE= 12:3.0"
        );
    }

    #[test]
    fn test_html_structure() {
        let html = html_table(&[config()], &["diameter", "rails", "shell"]).unwrap();
        assert_eq!(
            html,
            "<table><tr><td><b>DIAMETER</b></td><td><b>RAILS</b></td><td><b>SHELL</b></td></tr>\
             <tr><td>500</td><td></td><td>[HE, HE, bleeder, gunpowder]</td></tr></table>"
        );
    }

    #[test]
    fn test_bbcode_structure() {
        let bb = bbcode_table(&[config(), config()], &["modules"]).unwrap();
        assert_eq!(
            bb,
            "[table][tr][th][b]MODULES[/b][/th][/tr][tr][td]4[/td][/tr][tr][td]4[/td][/tr][/table]"
        );
    }

    #[test]
    fn test_unknown_column_fails_without_rows() {
        let rows: Vec<EvaluatedConfig> = Vec::new();
        assert_eq!(
            html_table(rows.as_slice(), &["dps", "warp"]).unwrap_err(),
            ShellError::UnknownField("warp".to_string())
        );
        assert!(bbcode_table(rows.as_slice(), &["warp"]).is_err());
        assert!(text_table(rows.as_slice(), &["warp"]).is_err());
    }

    #[test]
    fn test_text_table_aligns() {
        let text = text_table(&[config()], &DEFAULT_COLUMNS).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("DPS"));
        assert!(lines[1].ends_with("[HE, HE, bleeder, gunpowder]"));
    }

    #[test]
    fn test_field_listing() {
        let listing = field_listing(&config());
        assert!(listing.contains("modules: 4"));
        assert!(listing.contains("diameter: 500"));
        assert!(!listing.contains("rails:"));
    }
}
