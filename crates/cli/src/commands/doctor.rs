use rust_decimal::Decimal;
use serde::Serialize;
use smartshop_core::catalog::Dataset;
use smartshop_core::checkout::compare_stores;
use smartshop_core::config::{AppConfig, LoadOptions};
use smartshop_core::fixtures;

use super::{CommandResult, GlobalArgs, EXIT_CONFIG, EXIT_DATASET};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(globals: &GlobalArgs, json_output: bool) -> CommandResult {
    let report = build_report(&globals.load_options());
    let exit_code = exit_code(&report);

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(options: &LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options.clone()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match load_dataset(&config) {
                Ok((dataset, origin)) => {
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Pass,
                        details: format!(
                            "{} product(s) and {} retailer(s) from {origin}",
                            dataset.products.len(),
                            dataset.retailers.len()
                        ),
                    });
                    checks.push(check_catalog(&dataset));
                    checks.push(check_retailers(&dataset));
                }
                Err(details) => {
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Fail,
                        details,
                    });
                    checks.extend(skipped(&["catalog_readiness", "retailer_readiness"], "dataset"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.extend(skipped(
                &["dataset_load", "catalog_readiness", "retailer_readiness"],
                "configuration",
            ));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn load_dataset(config: &AppConfig) -> Result<(Dataset, String), String> {
    match &config.catalog.path {
        Some(path) => Dataset::load(path)
            .map(|dataset| (dataset, format!("`{}`", path.display())))
            .map_err(|error| error.to_string()),
        None => Ok((fixtures::demo_dataset(), "the built-in demo dataset".to_string())),
    }
}

fn check_catalog(dataset: &Dataset) -> DoctorCheck {
    let discounted =
        dataset.products.iter().filter(|product| product.discount_amount().is_some()).count();
    if dataset.products.is_empty() {
        return DoctorCheck {
            name: "catalog_readiness",
            status: CheckStatus::Fail,
            details: "catalog has no products; search and recommendations will be empty"
                .to_string(),
        };
    }

    DoctorCheck {
        name: "catalog_readiness",
        status: CheckStatus::Pass,
        details: format!("{} product(s), {discounted} on offer", dataset.products.len()),
    }
}

fn check_retailers(dataset: &Dataset) -> DoctorCheck {
    if dataset.retailers.is_empty() {
        return DoctorCheck {
            name: "retailer_readiness",
            status: CheckStatus::Fail,
            details: "no retailers configured; store comparison has nothing to price".to_string(),
        };
    }

    match compare_stores(Decimal::ONE_HUNDRED, &dataset.retailers) {
        Ok(quotes) => DoctorCheck {
            name: "retailer_readiness",
            status: CheckStatus::Pass,
            details: format!(
                "{} retailer(s) priced a sample cart; cheapest is {}",
                quotes.len(),
                quotes.first().map(|quote| quote.retailer.name.as_str()).unwrap_or("none")
            ),
        },
        Err(error) => DoctorCheck {
            name: "retailer_readiness",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn skipped(names: &[&'static str], cause: &str) -> Vec<DoctorCheck> {
    names
        .iter()
        .map(|name| DoctorCheck {
            name: *name,
            status: CheckStatus::Skipped,
            details: format!("skipped because {cause} did not load"),
        })
        .collect()
}

fn exit_code(report: &DoctorReport) -> u8 {
    let failed = |name: &str| {
        report.checks.iter().any(|check| check.name == name && check.status == CheckStatus::Fail)
    };

    if failed("config_validation") {
        EXIT_CONFIG
    } else if report.overall_status == CheckStatus::Fail {
        EXIT_DATASET
    } else {
        0
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
