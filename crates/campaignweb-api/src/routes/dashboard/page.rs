//! Dashboard rendering - dropdown, photo banner and bar charts

use campaignweb_core::{BarChart, Campaigns, CandidateFolder, CandidateReport};
use campaignweb_utils::escape_html;

use crate::ApiError;

/// Draws every `canvas[data-chart]` from the JSON model next to it, on first
/// load and after each HTMX swap.
const CHART_SCRIPT: &str = r#"<script>
const barTextPlugin = {
    id: 'barText',
    afterDatasetsDraw(chart) {
        const ctx = chart.ctx;
        chart.data.datasets.forEach((dataset, i) => {
            chart.getDatasetMeta(i).data.forEach((bar, j) => {
                ctx.save();
                ctx.fillStyle = '#333';
                ctx.font = '12px sans-serif';
                ctx.textAlign = 'center';
                ctx.textBaseline = 'bottom';
                ctx.fillText(dataset.texts[j], bar.x, bar.y - 2);
                ctx.restore();
            });
        });
    }
};

function drawBarChart(canvas) {
    if (canvas.dataset.drawn) return;
    canvas.dataset.drawn = '1';
    const model = JSON.parse(document.getElementById(canvas.dataset.chart).textContent);
    new Chart(canvas, {
        type: 'bar',
        data: {
            labels: model.bars.map(b => b.label),
            datasets: [{
                label: model.id,
                data: model.bars.map(b => b.value),
                backgroundColor: model.bars.map(b => b.color),
                texts: model.bars.map(b => b.text),
            }]
        },
        options: {
            plugins: {
                legend: { display: false },
                tooltip: { callbacks: { title: () => '', label: (item) => model.bars[item.dataIndex].hover } }
            }
        },
        plugins: [barTextPlugin]
    });
}

htmx.onLoad(function (elt) {
    elt.querySelectorAll('canvas[data-chart]').forEach(drawBarChart);
});
</script>"#;

/// Placeholder shown when no folder is selected
pub fn render_placeholder() -> String {
    r#"<div class='text-center py-12 text-gray-500'><p>Nenhuma pasta selecionada</p></div>"#.to_string()
}

/// Error box shown in the graph container when a folder cannot be read
pub fn render_panel_error(error: &ApiError) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-xl p-6 text-red-700'><p class='font-semibold'>Erro ao carregar a pasta</p><pre class='mt-2 text-sm whitespace-pre-wrap'>{}</pre></div>"#,
        escape_html(&error.to_string())
    )
}

/// One chart card: title (with the show-all link when truncated) and canvas
pub fn render_chart(chart: &BarChart) -> String {
    let link = chart
        .show_all
        .as_ref()
        .map(|link| {
            format!(
                r#" - <a href='{}' target='_blank' class='text-indigo-600 hover:underline'>{}</a>"#,
                escape_html(&link.href),
                escape_html(&link.label)
            )
        })
        .unwrap_or_default();

    // "</" must not appear inside a script element
    let model = serde_json::to_string(chart)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
    <h3 class='text-lg font-semibold mb-4'>{title}{link}</h3>
    <canvas id='chart-{id}' data-chart='chart-data-{id}'></canvas>
    <script type='application/json' id='chart-data-{id}'>{model}</script>
</div>"#,
        title = escape_html(&chart.title),
        link = link,
        id = escape_html(&chart.id),
        model = model,
    )
}

/// Photo banner plus the three charts of a candidate
pub fn render_panel(report: &CandidateReport) -> String {
    let name = escape_html(&report.folder.name);
    format!(
        r#"<div class='flex items-center mb-6'>
    <img src='{}' alt='{}' style='height: 250px; width: auto; margin-right: 20px;'>
    <h1 class='text-3xl font-bold' style='display: inline'>{}</h1>
</div>
{}
{}
{}"#,
        report.photo,
        name,
        name,
        render_chart(&report.charts.revenue),
        render_chart(&report.charts.expense),
        render_chart(&report.charts.totals),
    )
}

fn render_dropdown(folders: &[CandidateFolder], selected: Option<&CandidateFolder>) -> String {
    let mut html = String::from(
        r#"<select name='pasta' hx-get='/painel' hx-trigger='change' hx-target='#graph-container' hx-indicator='#loading' class='w-full px-3 py-2 border rounded-lg bg-white'>"#,
    );

    let none_selected = if selected.is_none() { " selected" } else { "" };
    html.push_str(&format!(r#"<option value=''{}>Selecione uma pasta</option>"#, none_selected));

    for folder in folders {
        let is_selected = if selected == Some(folder) { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value='{}'{}>{}</option>"#,
            escape_html(&folder.id()),
            is_selected,
            escape_html(&folder.name)
        ));
    }
    html.push_str("</select>");
    html
}

/// Full dashboard page
pub fn render_dashboard(campaigns: &Campaigns, selected: Option<&CandidateFolder>, panel: &str) -> String {
    let title = &campaigns.config().dashboard.title;
    let content = format!(
        r#"<div class='max-w-6xl mx-auto p-6'>
    <h1 class='text-2xl font-bold mb-4'>{}</h1>
    <div class='mb-6'>{}</div>
    <div id='loading' class='htmx-indicator text-sm text-gray-500 mb-2'>Carregando...</div>
    <div id='graph-container'>{}</div>
</div>
{}"#,
        escape_html(title),
        render_dropdown(campaigns.folders(), selected),
        panel,
        CHART_SCRIPT
    );

    crate::base_html(title, &content)
}
