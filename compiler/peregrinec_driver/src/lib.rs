//! Contains the main `run()` function of the route table generator.

use std::{io::Write, process::ExitCode};

use config::{Config, Settings};
use peregrinec_diagnostic::Report;
use peregrinec_handler::Storage;
use peregrinec_log::Severity;
use peregrinec_route::{
    diagnostic::Violation,
    validator::Validator,
    visitor::{Accumulator, RouteVisitor, Visitor},
};
use peregrinec_route_table::{MergeSummary, Merger};
use peregrinec_source_file::SourceMap;
use term::ReportTerm;
use unit::SourceFilter;

pub mod arguments;
pub mod config;
pub mod term;
pub mod unit;

pub use arguments::Arguments;

/// Runs the program with the given arguments, emitting the diagnostics to
/// the given writer.
///
/// Every input is validated even if an earlier one fails to load. The route
/// table is merged once, after all the inputs were visited.
#[must_use]
pub fn run(arguments: &Arguments, err_writer: &mut dyn Write) -> ExitCode {
    let mut report_term = ReportTerm::new(err_writer);

    let config = match &arguments.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(error) => {
                report_term.report_message(Severity::Error, &error.to_string());
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let settings = Settings::resolve(arguments, config);
    log::debug!("running with {settings:?}");

    let filter = SourceFilter::new(settings.exclude.clone());
    let validator = Validator::new(settings.contract.clone());
    let storage = Storage::<Violation>::new();

    let mut source_map = SourceMap::new();
    let mut accumulator = Accumulator::new();
    let mut failed_to_load = false;

    for input in &arguments.inputs {
        let unit = match unit::load(input, &filter, &mut source_map) {
            Ok(Some(unit)) => unit,
            Ok(None) => continue,
            Err(error) => {
                report_term.report_message(Severity::Error, &error.to_string());
                failed_to_load = true;
                continue;
            }
        };

        let mut visitor =
            RouteVisitor::new(&validator, &mut accumulator, &storage);

        for declaration in &unit.declarations {
            visitor.visit(declaration);
        }

        for violation in storage.take() {
            let diagnostic = violation
                .report(&settings.contract)
                .unwrap_or_else(|never| match never {});

            report_term.report_diagnostic(&diagnostic, &source_map);
        }
    }

    // a failing load fails the run on its own; persistence errors never do
    let has_errors = report_term.error_count() > 0;

    report_term.report_message(
        Severity::Info,
        &format!("route count: {}", accumulator.len()),
    );

    let merger = Merger::new(settings.output_dir.clone(), settings.dedup_key);
    match merger.merge(accumulator.records()) {
        Ok(MergeSummary::Skipped) => {
            let path = merger.table_path();
            log::debug!("no route found, {} left untouched", path.display());
        }
        Ok(MergeSummary::Written { .. }) => {}
        Err(error) => {
            report_term.report_message(Severity::Error, &error.to_string());
        }
    }

    if failed_to_load || (settings.fail_on_error && has_errors) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
