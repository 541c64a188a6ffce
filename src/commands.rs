//! `folio plan` and `folio route`.

use std::{fs, path::Path, process};

use folio::{
    application::{
        archive::{ArchiveController, ArchiveState},
        error::AppError,
        router,
    },
    config::{self, OutputFormat, PlanArgs, RouteArgs},
    domain::{articles::ArticleList, types::PageNumber},
    infra::{error::InfraError, html, telemetry},
    presentation::report::{PlanReport, RouteReport, RouteStep},
};
use serde::Serialize;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

pub fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(error = %report.summary(), source = report.source, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %report.summary(), source = report.source, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(|err| {
        AppError::from(InfraError::configuration(format!(
            "failed to load configuration: {err}"
        )))
    })?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        config::Command::Plan(args) => run_plan(&settings, args),
        config::Command::Route(args) => run_route(&settings, args),
    }
}

struct LoadedArchive {
    controller: ArchiveController,
    missing_landmarks: Vec<&'static str>,
}

fn load_archive(settings: &config::Settings, path: &Path) -> Result<LoadedArchive, AppError> {
    let document = fs::read_to_string(path).map_err(InfraError::from)?;
    let scan = html::scan_archive(&document, &settings.pager.selectors)?;
    let missing_landmarks = scan.missing_landmarks();
    let articles = ArticleList::new(scan.articles)?;
    let controller = ArchiveController::new(articles, &settings.pager)?;
    info!(
        path = %path.display(),
        articles = controller.paginator().articles().len(),
        pages = controller.paginator().page_count(),
        "archive loaded"
    );
    Ok(LoadedArchive {
        controller,
        missing_landmarks,
    })
}

fn run_plan(settings: &config::Settings, args: PlanArgs) -> Result<(), AppError> {
    let LoadedArchive {
        controller,
        missing_landmarks,
    } = load_archive(settings, &args.file)?;

    let transition = match args.page {
        Some(raw) => {
            let page = PageNumber::new(raw)
                .ok_or_else(|| AppError::validation("--page must be at least 1"))?;
            controller.on_control_click(ArchiveState::default(), page)?
        }
        None => controller.on_load(args.fragment.as_deref()),
    };

    let report = PlanReport::from_transition(
        args.file.display().to_string(),
        controller.paginator(),
        &transition,
        missing_landmarks,
    )?;
    info!(page = %report.page, fragment = %report.fragment, "plan resolved");
    emit(&report, args.format)
}

fn run_route(settings: &config::Settings, args: RouteArgs) -> Result<(), AppError> {
    let LoadedArchive { controller, .. } = load_archive(settings, &args.file)?;
    let page_count = controller.paginator().page_count();

    let mut state = ArchiveState::default();
    let mut steps = Vec::with_capacity(args.fragments.len());
    for fragment in args.fragments {
        let observed = Some(fragment.as_str()).filter(|value| !value.is_empty());
        let decision = router::route(
            observed,
            state.last_seen_hash,
            state.active_page.is_some(),
            page_count,
        );
        state = controller.on_fragment(state, observed).state;
        steps.push(RouteStep {
            fragment,
            decision,
            active_page: state.active_page,
        });
    }

    let report = RouteReport {
        source: args.file.display().to_string(),
        page_count,
        steps,
    };
    emit(&report, args.format)
}

fn emit<T>(report: &T, format: OutputFormat) -> Result<(), AppError>
where
    T: Serialize + std::fmt::Display,
{
    match format {
        OutputFormat::Text => print!("{report}"),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|err| AppError::unexpected(format!("failed to encode report: {err}")))?;
            println!("{json}");
        }
    }
    Ok(())
}
