//! Maps dashboard views to Plotly figures and fills the page template.
//!
//! No aggregation happens here. Each view becomes one bar chart or one table and the
//! figures are embedded as JSON for the page script to plot.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Value, json};
use workout_core::{
    DailyCategoryCount, DailyCategoryTotal, DailyCount, DailyDurationCount, DailyTotal,
    DashboardSummary, DashboardViews, DurationCount, InstructorCount,
};

const TEMPLATE: &str = include_str!("../assets/dashboard.html");
const SUMMARY_SLOT: &str = "<!-- SUMMARY -->";
const LENGTH_TABLE_SLOT: &str = "<!-- LENGTH_TABLE -->";
const CHARTS_SLOT: &str = "__DASHBOARD_CHARTS__";

/// A figure bound to the element id it is plotted into.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub id: &'static str,
    pub figure: Figure,
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub barmode: &'static str,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorange: Option<&'static str>,
}

impl Axis {
    fn titled(text: &str) -> Self {
        Self {
            title: Title {
                text: text.to_string(),
            },
            autorange: None,
        }
    }
}

fn layout(title: &str, barmode: &'static str, x_title: &str, y_title: &str) -> Layout {
    Layout {
        title: Title {
            text: title.to_string(),
        },
        barmode,
        xaxis: Axis::titled(x_title),
        yaxis: Axis::titled(y_title),
    }
}

fn bar(name: Option<String>, x: Vec<Value>, y: Vec<Value>) -> BarTrace {
    BarTrace {
        kind: "bar",
        name,
        x,
        y,
        orientation: None,
    }
}

fn date_value(date: NaiveDate) -> Value {
    Value::String(date.format("%Y-%m-%d").to_string())
}

/// One trace per key, keys in ascending order.
fn stacked<K: Ord>(
    entries: impl IntoIterator<Item = (K, NaiveDate, Value)>,
    name: impl Fn(&K) -> String,
) -> Vec<BarTrace> {
    let mut series: BTreeMap<K, (Vec<Value>, Vec<Value>)> = BTreeMap::new();
    for (key, date, value) in entries {
        let (xs, ys) = series.entry(key).or_default();
        xs.push(date_value(date));
        ys.push(value);
    }
    series
        .into_iter()
        .map(|(key, (xs, ys))| bar(Some(name(&key)), xs, ys))
        .collect()
}

pub fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{}", minutes as i64)
    } else {
        format!("{:.2}", minutes)
    }
}

fn format_average(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "n/a".to_string(),
    }
}

pub fn calories_chart(totals: &[DailyTotal]) -> Figure {
    let x = totals.iter().map(|total| date_value(total.date)).collect();
    let y = totals.iter().map(|total| json!(total.value)).collect();
    Figure {
        data: vec![bar(None, x, y)],
        layout: layout("Calories per Day", "group", "Date", "Total Calories"),
    }
}

pub fn calories_by_discipline_chart(totals: &[DailyCategoryTotal]) -> Figure {
    let data = stacked(
        totals
            .iter()
            .map(|total| (total.category.clone(), total.date, json!(total.value))),
        String::clone,
    );
    Figure {
        data,
        layout: layout(
            "Calories per Day by Fitness Type",
            "stack",
            "Date",
            "Total Calories",
        ),
    }
}

pub fn workouts_chart(counts: &[DailyCount]) -> Figure {
    let x = counts.iter().map(|count| date_value(count.date)).collect();
    let y = counts.iter().map(|count| json!(count.count)).collect();
    Figure {
        data: vec![bar(None, x, y)],
        layout: layout("Number of Workouts per Day", "group", "Date", "Number of Classes"),
    }
}

pub fn workouts_by_discipline_chart(counts: &[DailyCategoryCount]) -> Figure {
    let data = stacked(
        counts
            .iter()
            .map(|count| (count.category.clone(), count.date, json!(count.count))),
        String::clone,
    );
    Figure {
        data,
        layout: layout(
            "Number of Workouts per Day by Fitness Type",
            "stack",
            "Date",
            "Number of Classes",
        ),
    }
}

/// Horizontal bars, most frequent instructor on top.
pub fn instructor_chart(counts: &[InstructorCount]) -> Figure {
    let x = counts.iter().map(|count| json!(count.count)).collect();
    let y = counts
        .iter()
        .map(|count| Value::String(count.instructor_name.clone()))
        .collect();
    let mut trace = bar(None, x, y);
    trace.orientation = Some("h");
    let mut layout = layout(
        "Classes per Instructor",
        "group",
        "Number of classes",
        "Instructor Name",
    );
    layout.yaxis.autorange = Some("reversed");
    Figure {
        data: vec![trace],
        layout,
    }
}

pub fn classes_by_length_chart(counts: &[DailyDurationCount]) -> Figure {
    // Keyed by whole seconds so traces sort numerically.
    let data = stacked(
        counts.iter().map(|count| {
            (
                (count.duration_minutes * 60.0).round() as i64,
                count.date,
                json!(count.count),
            )
        }),
        |seconds| format_minutes(*seconds as f64 / 60.0),
    );
    Figure {
        data,
        layout: layout(
            "Number of Classes per Day by Length",
            "stack",
            "Date",
            "Number of Classes",
        ),
    }
}

pub fn dashboard_charts(views: &DashboardViews) -> Vec<Chart> {
    vec![
        Chart {
            id: "calorie-graph",
            figure: calories_chart(&views.calories_by_date),
        },
        Chart {
            id: "calorie-graph-fitness-type",
            figure: calories_by_discipline_chart(&views.calories_by_date_discipline),
        },
        Chart {
            id: "count-workouts-by-date",
            figure: workouts_chart(&views.workouts_by_date),
        },
        Chart {
            id: "count-workouts-by-date-fitness-type",
            figure: workouts_by_discipline_chart(&views.workouts_by_date_discipline),
        },
        Chart {
            id: "instructor-graph",
            figure: instructor_chart(&views.instructor_counts),
        },
        Chart {
            id: "classes-by-length-graph",
            figure: classes_by_length_chart(&views.workouts_by_date_duration),
        },
    ]
}

pub fn summary_html(summary: &DashboardSummary) -> String {
    format!(
        "<h3>Total Workouts: {}</h3>\n  \
         <h3>Average Calories Per Day Overall, {}</h3>\n  \
         <h3>Average Calories Per Day during {}, {}</h3>",
        summary.total_workouts,
        format_average(summary.average_calories_per_day),
        summary.reference_period.label(),
        format_average(summary.average_calories_per_day_reference),
    )
}

pub fn length_table_html(counts: &[DurationCount]) -> String {
    let mut html = String::from(
        "<table id=\"length-table\" class=\"length-table\">\n    \
         <thead><tr><th>Length of Class (Minutes)</th><th>Count of Classes</th></tr></thead>\n    \
         <tbody>\n",
    );
    for count in counts {
        html.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td></tr>\n",
            format_minutes(count.duration_minutes),
            count.count
        ));
    }
    html.push_str("    </tbody>\n  </table>");
    html
}

/// JSON safe to place inside a `<script>` element.
pub fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Full dashboard page. Either the whole page renders or an error is returned.
pub fn render_dashboard_page(views: &DashboardViews) -> Result<String, serde_json::Error> {
    let charts = serde_json::to_string(&dashboard_charts(views))?;
    Ok(TEMPLATE
        .replacen(SUMMARY_SLOT, &summary_html(&views.summary), 1)
        .replacen(LENGTH_TABLE_SLOT, &length_table_html(&views.workouts_by_duration), 1)
        .replacen(CHARTS_SLOT, &escape_script_json(&charts), 1))
}
