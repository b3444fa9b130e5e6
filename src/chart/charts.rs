//! Builds the ECharts options for the monthly expenses chart and the script that draws it.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    expense::{Expense, MONTH_LABELS, monthly_totals},
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct ChartView {
    /// The HTML element ID of the chart container (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// The container the chart is drawn into.
pub(super) fn chart_container(chart: &ChartView) -> Markup {
    html!(
        section id="charts" class="w-full max-w-3xl mx-auto mb-4"
        {
            div
                id=(chart.id)
                class="min-h-[380px] rounded dark:bg-gray-100"
            {}
        }
    )
}

/// Initialises the chart once the page has loaded, following the system colour scheme.
pub(super) fn chart_script(chart: &ChartView) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{}"));
            chart.setOption({});

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#,
        chart.id, chart.options
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// A bar per calendar month, January to December, summed over every year.
pub(super) fn monthly_expenses_chart(expenses: &[Expense]) -> Chart {
    let labels = MONTH_LABELS
        .iter()
        .map(|label| label.to_string())
        .collect::<Vec<_>>();
    let values = monthly_totals(expenses).to_vec();

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Expenses")
                .subtext("All years combined"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
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
        .series(Bar::new().name("Expenses").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args("number", "return '$' + Number(number).toFixed(2);")
}
