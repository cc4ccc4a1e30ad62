// Printable notation document
// A self-contained HTML table that the platform print service turns into PDF

use serde::{Deserialize, Serialize};

use crate::grid::{export_column_separators, NotationGrid};
use crate::taals::TaalDefinition;

/// Everything the renderer needs about one composition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub composition_name: String,
    pub taal_name: String,
    pub structure: Vec<usize>,
    pub number_of_columns: usize,
    pub grid: NotationGrid,
}

impl ExportRequest {
    pub fn new(composition_name: &str, taal: &TaalDefinition, grid: &NotationGrid) -> Self {
        ExportRequest {
            composition_name: composition_name.to_string(),
            taal_name: taal.name.clone(),
            structure: taal.structure.clone(),
            number_of_columns: taal.number_of_columns,
            grid: grid.clone(),
        }
    }
}

const STYLESHEET: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; }
.header { text-align: center; margin-bottom: 30px; }
.composition-title { font-size: 24px; font-weight: bold; color: #2D3436; margin-bottom: 10px; }
.taal-info { font-size: 18px; color: #636E72; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; border: 1px solid #000000; }
th, td { border: none; border-bottom: 1px solid #ddd; text-align: center; padding: 12px; }
th { background-color: #f5f5f5; font-weight: bold; }
td.row-number { background-color: #f9f9f9; font-weight: bold; }
td.cell { border-bottom: 1px solid #E0E0E0; min-height: 40px; width: 150px; }
.vibhag-end { border-right: 1px solid #000000; }";

/// Escape text for element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn class_attr(classes: &[&str]) -> String {
    let joined: Vec<&str> = classes.iter().copied().filter(|c| !c.is_empty()).collect();
    if joined.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", joined.join(" "))
    }
}

/// Render the document.
///
/// One header row (`#`, then 1..N), then one row per grid row. Every vibhag
/// end gets a rule, the final column included.
pub fn render_document(request: &ExportRequest) -> String {
    let columns = request.number_of_columns;
    let separators = export_column_separators(&request.structure, columns);
    let mut table = String::new();

    // Header row
    table.push_str("<tr><th class=\"vibhag-end\">#</th>");
    for (i, &boundary) in separators.iter().enumerate() {
        let class = class_attr(&[if boundary { "vibhag-end" } else { "" }]);
        table.push_str(&format!("<th{}>{}</th>", class, i + 1));
    }
    table.push_str("</tr>\n");

    // Data rows
    for (row_index, row) in request.grid.rows().iter().enumerate() {
        table.push_str(&format!(
            "<tr><td class=\"row-number vibhag-end\">{}</td>",
            row_index + 1
        ));
        for (col, &boundary) in separators.iter().enumerate() {
            let value = row.get(col).map(String::as_str).unwrap_or("");
            let class = class_attr(&["cell", if boundary { "vibhag-end" } else { "" }]);
            table.push_str(&format!("<td{}>{}</td>", class, escape_html(value)));
        }
        table.push_str("</tr>\n");
    }

    let title = escape_html(&request.composition_name);
    format!(
        "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<style>
{style}
</style>
</head>
<body>
<div class=\"header\">
<div class=\"composition-title\">{title}</div>
<div class=\"taal-info\">Taal: {taal}</div>
</div>
<table>
{table}</table>
</body>
</html>
",
        title = title,
        style = STYLESHEET,
        taal = escape_html(&request.taal_name),
        table = table,
    )
}
