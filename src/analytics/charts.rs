//! Chart generation for the analytics page.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered into an HTML container with corresponding JavaScript
//! initialization code:
//! - **Monthly Trend**: income and expense lines per month
//! - **Category Distribution**: pie of expenses grouped by category
//! - **Monthly Comparison**: income vs expense bars per month

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    ledger::{CategoryShare, Entry, category_breakdown, monthly_series},
};

/// An analytics chart with its HTML container ID and ECharts configuration.
pub(super) struct AnalyticsChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Creates the array of analytics charts from the ledger snapshot.
pub(super) fn build_analytics_charts(entries: &[Entry]) -> [AnalyticsChart; 3] {
    [
        AnalyticsChart {
            id: "monthly-trend-chart",
            options: monthly_trend_chart(entries).to_string(),
        },
        AnalyticsChart {
            id: "category-distribution-chart",
            options: category_distribution_chart(entries).to_string(),
        },
        AnalyticsChart {
            id: "monthly-comparison-chart",
            options: monthly_comparison_chart(entries).to_string(),
        },
    ]
}

/// Renders the HTML containers for analytics charts.
pub(super) fn charts_view(charts: &[AnalyticsChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for analytics charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[AnalyticsChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

fn monthly_labels_and_totals(entries: &[Entry]) -> (Vec<String>, Vec<f64>, Vec<f64>) {
    let series = monthly_series(entries);

    let labels = series.iter().map(|(key, _)| key.to_string()).collect();
    let income = series.iter().map(|(_, totals)| totals.income).collect();
    let expense = series.iter().map(|(_, totals)| totals.expense).collect();

    (labels, income, expense)
}

pub(super) fn monthly_trend_chart(entries: &[Entry]) -> Chart {
    let (labels, income, expense) = monthly_labels_and_totals(entries);

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Trend")
                .subtext("Income and expenses per month"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Income").data(income))
        .series(Line::new().name("Expenses").data(expense))
}

pub(super) fn category_distribution_chart(entries: &[Entry]) -> Chart {
    let shares = category_breakdown(entries);

    let data: Vec<(f64, &str)> = shares
        .iter()
        .map(|CategoryShare { label, amount, .. }| (*amount, label.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Category Distribution")
                .subtext("Expenses grouped by category"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name("Expenses").radius("60%").data(data))
}

pub(super) fn monthly_comparison_chart(entries: &[Entry]) -> Chart {
    let (labels, income, expense) = monthly_labels_and_totals(entries);

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Comparison")
                .subtext("Income vs expenses"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("8%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Income")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(income),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(expense),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
