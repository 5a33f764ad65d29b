//! Full-table page - a plain standalone HTML table

use campaignweb_core::TableReport;
use campaignweb_utils::escape_html;

const TABLE_STYLE: &str = r#"<style>
        .dataframe { border-collapse: collapse; width: 100%; }
        .dataframe th, .dataframe td { border: 1px solid black; padding: 8px; text-align: left; }
        .dataframe th { background-color: #f2f2f2; }
        h1 { text-align: center; }
    </style>"#;

fn render_rows(report: &TableReport) -> String {
    let mut html = String::new();
    for row in &report.rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.name),
            escape_html(&row.value)
        ));
    }
    html
}

/// Render a full table as its own page
pub fn render_table_page(report: &TableReport) -> String {
    let heading = escape_html(&report.heading);
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="UTF-8">
    <title>{heading}</title>
    {style}
</head>
<body>
    <h1>{heading}</h1>
    <table border="1" class="dataframe">
        <thead>
            <tr><th>{name_column}</th><th>{value_column}</th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>
</body>
</html>"#,
        heading = heading,
        style = TABLE_STYLE,
        name_column = escape_html(&report.columns[0]),
        value_column = escape_html(&report.columns[1]),
        rows = render_rows(report),
    )
}
