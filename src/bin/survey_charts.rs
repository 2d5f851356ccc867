use std::path::Path;

use survey_charts::telemetry::init_default_tracing;
use survey_charts::{DashboardConfig, SurveyDashboard};

const OUTPUT_PATH: &str = "index.html";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = init_default_tracing();

    let dashboard = SurveyDashboard::new(DashboardConfig::default())
        .map_err(|err| format!("invalid dashboard config: {err}"))?;
    let report = dashboard.run().map_err(|err| err.to_string())?;
    report
        .write_html(Path::new(OUTPUT_PATH))
        .map_err(|err| format!("failed to write `{OUTPUT_PATH}`: {err}"))?;

    match report.data_error {
        Some(reason) => eprintln!("charts not rendered: {reason}"),
        None => println!(
            "wrote {} charts to {OUTPUT_PATH}",
            report.rendered_chart_count()
        ),
    }
    Ok(())
}
