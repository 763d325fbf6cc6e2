//! Dashboard rendering
//!
//! Renders patient records as an HTML table. Header cells come from the
//! column list and body cells from `PatientRecord::cells`, so both follow
//! the same column order.

use std::fmt::Write;

use crate::model::{column_names, PatientRecord};

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Patients Dashboard</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; font-size: 0.85rem; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
th { background: #f0f4f8; }
tr:nth-child(even) td { background: #fafafa; }
</style>
</head>
<body>
<h1>Patients</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the dashboard page for the given records
pub fn render_dashboard(rows: &[PatientRecord]) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(PAGE_HEAD.len() + rows.len() * 512);
    html.push_str(PAGE_HEAD);

    writeln!(html, "<p>Showing {} records</p>", rows.len())?;
    html.push_str("<table>\n<thead>\n<tr>");
    for name in column_names() {
        write!(html, "<th>{}</th>", escape_html(name))?;
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in rows {
        html.push_str("<tr>");
        for cell in record.cells() {
            write!(html, "<td>{}</td>", escape_html(&cell))?;
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html.push_str(PAGE_TAIL);
    Ok(html)
}
