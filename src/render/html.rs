//! Renders a dashboard view as one self-contained HTML page.
//!
//! Charts are Plotly figures described as JSON and drawn client-side by plotly.js from
//! its CDN. Every table section renders independently: an empty table shows an
//! explanatory message, a failed one shows its error.

use crate::aggregation::daily_aqi::DailyAqi;
use crate::aggregation::daily_pollutants::DailyPollutants;
use crate::aggregation::station_ranking::StationRanking;
use crate::aggregation::summary::Summary;
use crate::dashboard::DashboardView;
use crate::error::AirQualityError;
use crate::render::display_value;
use crate::types::aqi_category::{label_for, AqiCategory};
use crate::types::pollutant::Pollutant;
use serde_json::{json, Value};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 16px; color: #212529; }
h1 { margin-bottom: 4px; }
.range { color: #868e96; margin-top: 0; }
.tiles { display: flex; gap: 16px; margin: 12px 0; }
.tile { flex: 1; text-align: center; border: 1px solid #dee2e6; border-radius: 4px; padding: 8px; }
.tile .name { font-weight: bold; }
.tile .value { font-weight: bold; font-size: 30px; margin: 4px 0; }
.empty { color: #868e96; font-style: italic; padding: 16px; }
.error { color: #c92a2a; padding: 16px; border: 1px solid #ffc9c9; border-radius: 4px; }
.legend-table { width: 100%; border-collapse: collapse; margin-top: 10px; }
.legend-table th, .legend-table td { padding: 8px; text-align: left; border-bottom: 1px solid #ddd; }
.color-box { width: 20px; height: 20px; display: inline-block; }
"#;

/// Renders `view` as a complete HTML document titled `title`.
pub fn render_html(view: &DashboardView, title: &str) -> String {
    let range = match view.range {
        Some(range) => range.to_string(),
        None => "No data available".to_string(),
    };

    let mut body = String::new();
    body.push_str(&format!(
        "<h1>{}</h1>\n<p class=\"range\">{}</p>\n",
        escape_html(title),
        escape_html(&range)
    ));

    body.push_str("<h2>Air Quality Index (AQI) Ranking: Stations from Worst to Best</h2>\n");
    body.push_str(&section(
        "station-ranking",
        &view.station_ranking,
        "No station has measurements in the selected range.",
        ranking_figure,
    ));

    body.push_str("<h2>Daily AQI</h2>\n");
    body.push_str(&aqi_tiles(&view.summary));
    body.push_str(&section(
        "daily-aqi",
        &view.daily_aqi,
        "No daily AQI values in the selected range.",
        daily_aqi_figure,
    ));
    body.push_str(&legend_table());

    body.push_str("<h2>Daily Pollutants Concentration</h2>\n");
    body.push_str("<h4 style=\"text-align: center;\">Average Pollutants Concentration</h4>\n");
    body.push_str(&pollutant_tiles(&view.summary));
    body.push_str(&section(
        "daily-pollutants",
        &view.daily_pollutants,
        "No pollutant measurements in the selected range.",
        pollutant_figure,
    ));

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
<style>{style}</style>
</head>
<body>
{body}</body>
</html>
"##,
        title = escape_html(title),
        cdn = PLOTLY_CDN,
        style = STYLE,
        body = body,
    )
}

/// Chart container plus the script drawing it, or the empty/error state.
fn section<T>(
    id: &str,
    rows: &Result<Vec<T>, AirQualityError>,
    empty_message: &str,
    figure: fn(&[T]) -> Value,
) -> String {
    match rows {
        Err(e) => format!(
            "<div class=\"error\">This section could not be computed: {}</div>\n",
            escape_html(&e.to_string())
        ),
        Ok(rows) if rows.is_empty() => {
            format!("<div class=\"empty\">{}</div>\n", escape_html(empty_message))
        }
        Ok(rows) => {
            let fig = figure(rows);
            format!(
                "<div id=\"{id}\"></div>\n<script>Plotly.newPlot(\"{id}\", {data}, {layout});</script>\n",
                id = id,
                data = script_json(&fig["data"]),
                layout = script_json(&fig["layout"]),
            )
        }
    }
}

fn ranking_figure(rows: &[StationRanking]) -> Value {
    let stations: Vec<&str> = rows.iter().map(|r| r.station.as_str()).collect();
    let values: Vec<Option<i64>> = rows.iter().map(|r| r.avg_aqi).collect();
    let colors: Vec<&str> = rows.iter().map(|r| r.color).collect();
    let labels: Vec<String> = rows.iter().map(|r| display_value(r.avg_aqi)).collect();
    let categories: Vec<&str> = rows.iter().map(|r| label_for(r.category)).collect();
    json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "y": stations,
            "x": values,
            "marker": { "color": colors },
            "text": labels,
            "textposition": "outside",
            "customdata": categories,
            "hovertemplate": "%{y}<br>AQI: %{x}<br>%{customdata}<extra></extra>",
        }],
        "layout": {
            "template": "plotly_white",
            "xaxis": { "title": { "text": "AQI" } },
            "yaxis": { "title": { "text": "Station" }, "type": "category" },
            "height": 120 + 30 * rows.len(),
            "margin": { "l": 140 },
        },
    })
}

fn daily_aqi_figure(rows: &[DailyAqi]) -> Value {
    let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
    let values: Vec<Option<i64>> = rows.iter().map(|r| r.avg_aqi).collect();
    let categories: Vec<&str> = rows.iter().map(|r| label_for(r.category)).collect();
    let first = dates.first().cloned().unwrap_or_default();
    let last = dates.last().cloned().unwrap_or_default();
    let bands: Vec<Value> = AqiCategory::ALL
        .iter()
        .map(|category| {
            let (y0, y1) = category.display_band();
            json!({
                "type": "rect",
                "xref": "x",
                "yref": "y",
                "x0": first,
                "x1": last,
                "y0": y0,
                "y1": y1,
                "fillcolor": category.color(),
                "opacity": 0.7,
                "layer": "below",
                "line": { "width": 0 },
            })
        })
        .collect();
    json!({
        "data": [{
            "type": "scatter",
            "mode": "lines",
            "x": dates,
            "y": values,
            "customdata": categories,
            "line": { "color": "#1f77b4" },
            "hovertemplate": "%{x}<br>AQI: %{y}<br>Category: %{customdata}<extra></extra>",
        }],
        "layout": {
            "title": { "text": "AQI Trend Over Time" },
            "template": "plotly_white",
            "xaxis": { "title": { "text": "Date" } },
            "yaxis": { "title": { "text": "AQI" } },
            "shapes": bands,
        },
    })
}

fn pollutant_figure(rows: &[DailyPollutants]) -> Value {
    let dates: Vec<String> = rows.iter().map(|r| r.date.to_string()).collect();
    let traces: Vec<Value> = Pollutant::ALL
        .iter()
        .map(|pollutant| {
            let values: Vec<Option<i64>> =
                rows.iter().map(|r| r.levels.get(*pollutant)).collect();
            json!({
                "type": "scatter",
                "mode": "lines",
                "name": pollutant.column(),
                "x": dates,
                "y": values,
            })
        })
        .collect();
    json!({
        "data": traces,
        "layout": {
            "title": { "text": "Pollutant Concentrations Over Time" },
            "template": "plotly_white",
            "xaxis": { "title": { "text": "Date" } },
            "yaxis": { "title": { "text": "Concentration" } },
            "legend": { "title": { "text": "Pollutant" } },
        },
    })
}

fn tile(name: &str, value: &str) -> String {
    format!(
        "<div class=\"tile\"><p class=\"name\">{}</p><p class=\"value\">{}</p></div>",
        escape_html(name),
        escape_html(value)
    )
}

fn aqi_tiles(summary: &Summary) -> String {
    format!(
        "<div class=\"tiles\">{}{}</div>\n",
        tile("Average AQI", &display_value(summary.avg_aqi)),
        tile("AQI Category", label_for(summary.category)),
    )
}

fn pollutant_tiles(summary: &Summary) -> String {
    let tiles: String = Pollutant::ALL
        .iter()
        .map(|p| tile(p.label(), &display_value(summary.pollutants.get(*p))))
        .collect();
    format!("<div class=\"tiles\">{}</div>\n", tiles)
}

fn legend_table() -> String {
    let rows: String = AqiCategory::ALL
        .iter()
        .map(|c| {
            format!(
                "<tr><td>{}</td><td style=\"text-align: center;\"><div class=\"color-box\" style=\"background-color: {};\">&nbsp;</div></td></tr>",
                c.label(),
                c.color()
            )
        })
        .collect();
    format!(
        "<table class=\"legend-table\">\n<tr><th>Category</th><th style=\"text-align: center;\">Color</th></tr>\n{}\n</table>\n",
        rows
    )
}

/// JSON text that can be embedded in a `<script>` element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
