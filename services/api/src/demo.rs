use crate::infra::{
    demo_context, InMemoryAssessmentStore, InMemoryCheckRecordStore, InMemoryComplianceConfig,
    InMemoryProgressStore, LoggingOnboardingHooks,
};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;
use complychef::compliance::assessment::{
    evaluate_green_shield, AnswerStatus, AssessmentAnswer, AssessmentService, GreenShieldInputs,
    Severity,
};
use complychef::compliance::identity::OrgContext;
use complychef::compliance::monitoring::completion::ShiftCompletionSummary;
use complychef::compliance::monitoring::{
    CheckSubmission, EquipmentClass, EquipmentInstanceId, Observation, ProbeImportOutcome, Shift,
    ShiftMonitoringService,
};
use complychef::compliance::onboarding::OnboardingService;
use complychef::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Diary date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Shift to demonstrate (am or pm). Defaults to am.
    #[arg(long, value_parser = crate::infra::parse_shift)]
    pub(crate) shift: Option<Shift>,
    /// Optional probe CSV export to hydrate the temperature checks.
    #[arg(long)]
    pub(crate) probe_csv: Option<PathBuf>,
    /// Include a full check listing in the shift portion of the demo output.
    #[arg(long)]
    pub(crate) include_checks: bool,
    /// Skip the self-assessment portion of the demo.
    #[arg(long)]
    pub(crate) skip_assessment: bool,
    /// Skip the onboarding walkthrough portion of the demo.
    #[arg(long)]
    pub(crate) skip_onboarding: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ShiftReportArgs {
    /// Diary date to reconcile (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: NaiveDate,
    /// Shift to reconcile (am or pm)
    #[arg(long, value_parser = crate::infra::parse_shift)]
    pub(crate) shift: Shift,
    /// Optional probe CSV export to file temperature readings first
    #[arg(long)]
    pub(crate) probe_csv: Option<PathBuf>,
    /// Include a full check listing in the output
    #[arg(long)]
    pub(crate) list_checks: bool,
}

pub(crate) fn run_shift_report(args: ShiftReportArgs) -> Result<(), AppError> {
    let ShiftReportArgs {
        date,
        shift,
        probe_csv,
        list_checks,
    } = args;

    let (service, context, import) = hydrated_monitoring_service(probe_csv, date)?;
    let report = service.shift_status(&context, date, shift)?;
    let summary = report.summary();
    render_shift_summary(&summary, import.as_ref(), list_checks);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        date,
        shift,
        probe_csv,
        include_checks,
        skip_assessment,
        skip_onboarding,
    } = args;

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let shift = shift.unwrap_or(Shift::Am);

    println!("Compliance diary demo");
    let (service, context, import) = hydrated_monitoring_service(probe_csv, date)?;

    println!("\nLogging the shift's checks");
    for submission in demo_shift_checks(date, shift) {
        let key = submission.check_key.clone();
        match service.log_check(&context, submission, Utc::now()) {
            Ok(record) => {
                let view = record.view();
                println!("- {} -> {}", key, view.status_label);
            }
            Err(err) => println!("- {} skipped: {}", key, err),
        }
    }

    let report = service.shift_status(&context, date, shift)?;
    let summary = report.summary();
    println!();
    render_shift_summary(&summary, import.as_ref(), include_checks);

    if !skip_assessment {
        println!("\nSelf-assessment demo");
        run_assessment_portion(&context, date);
    }

    if !skip_onboarding {
        println!("\nOnboarding walkthrough demo");
        run_onboarding_portion(&context);
    }

    Ok(())
}

fn run_assessment_portion(context: &OrgContext, date: NaiveDate) {
    let store = Arc::new(InMemoryAssessmentStore::default());
    let service = Arc::new(AssessmentService::new(store));

    let answers = demo_assessment_answers();
    let predicted = match service.predict(&answers) {
        Ok(rating) => rating,
        Err(err) => {
            println!("  Prediction unavailable: {}", err);
            return;
        }
    };
    println!(
        "- Live prediction for the form: {} star(s) ({})",
        predicted.value(),
        predicted.label()
    );

    let record = match service.save(context, date, answers, date, Utc::now()) {
        Ok(record) => record,
        Err(err) => {
            println!("  Save rejected: {}", err);
            return;
        }
    };
    let view = record.view();
    println!(
        "- Saved {}: {} answered, {} non-compliant -> {} star(s)",
        view.date, view.answered, view.non_compliant, view.predicted_rating
    );

    let shield = evaluate_green_shield(&GreenShieldInputs {
        licence_number: Some("FSL-2209".to_string()),
        licence_document_uploaded: true,
        supervisor_certificates: 1,
        completed_self_assessments: 1,
    });
    match serde_json::to_string_pretty(&shield) {
        Ok(json) => println!("  Green Shield status:\n{}", json),
        Err(err) => println!("  Green Shield status unavailable: {}", err),
    }
}

fn run_onboarding_portion(context: &OrgContext) {
    let store = Arc::new(InMemoryProgressStore::default());
    let service = Arc::new(OnboardingService::new(
        store,
        Arc::new(LoggingOnboardingHooks),
    ));

    let mut view = match service.state(context) {
        Ok(view) => view,
        Err(err) => {
            println!("  Onboarding unavailable: {}", err);
            return;
        }
    };
    println!(
        "- Starting at {} ({}/{})",
        view.phase_title,
        view.index + 1,
        view.total
    );

    while view.index + 1 < view.total {
        let step = if view.phase_key == "team_invites" {
            service.skip(context)
        } else {
            service.advance(context)
        };
        view = match step {
            Ok(view) => view,
            Err(err) => {
                println!("  Walkthrough halted: {}", err);
                return;
            }
        };
        println!(
            "- Now at {} ({}/{})",
            view.phase_title,
            view.index + 1,
            view.total
        );
    }

    view = match service.finish(context) {
        Ok(view) => view,
        Err(err) => {
            println!("  Finish rejected: {}", err);
            return;
        }
    };
    println!(
        "- Finished: {} phase(s) completed, skipped {:?}",
        view.completed.len(),
        view.skipped
    );
}

fn demo_shift_checks(date: NaiveDate, shift: Shift) -> Vec<CheckSubmission> {
    let suffix = match shift {
        Shift::Am => "am",
        Shift::Pm => "pm",
    };

    let equipment = |key: &str, unit: &str, celsius: f64| CheckSubmission {
        check_key: key.to_string(),
        date,
        shift,
        equipment_instance: Some(EquipmentInstanceId(format!("{unit}-{suffix}"))),
        receiving_category: None,
        observation: Observation::Temperature { celsius },
        corrective_note: None,
    };

    let food = |key: &str, celsius: f64| CheckSubmission {
        check_key: key.to_string(),
        date,
        shift,
        equipment_instance: None,
        receiving_category: None,
        observation: Observation::Temperature { celsius },
        corrective_note: None,
    };

    let procedural = |key: &str, passed: bool, note: Option<&str>| CheckSubmission {
        check_key: key.to_string(),
        date,
        shift,
        equipment_instance: None,
        receiving_category: None,
        observation: Observation::Procedural { passed },
        corrective_note: note.map(str::to_string),
    };

    vec![
        equipment("fridge_temperature", "fridge-walk-in", 3.6),
        equipment("fridge_temperature", "fridge-prep", 4.8),
        equipment("freezer_temperature", "freezer-chest", -19.2),
        equipment("hot_hold_temperature", "hot-hold-counter", 66.0),
        food("cooking_temperature", 78.5),
        CheckSubmission {
            check_key: "receiving_temperature".to_string(),
            date,
            shift,
            equipment_instance: None,
            receiving_category: Some(EquipmentClass::Dairy),
            observation: Observation::Temperature { celsius: 3.2 },
            corrective_note: None,
        },
        procedural("opening_checks", true, None),
        procedural("fitness_to_work", true, None),
        procedural(
            "handwash_stations",
            false,
            Some("Restocked soap and paper towels at the back station"),
        ),
        procedural("allergen_board", true, None),
    ]
}

fn demo_assessment_answers() -> Vec<AssessmentAnswer> {
    let compliant = |code: &str| AssessmentAnswer {
        item_code: code.to_string(),
        status: AnswerStatus::Compliant,
        severity: None,
        comments: None,
        evidence_flag: None,
    };

    vec![
        compliant("TC-01"),
        compliant("TC-04"),
        compliant("CC-01"),
        compliant("FH-02"),
        AssessmentAnswer {
            item_code: "CL-02".to_string(),
            status: AnswerStatus::NonCompliant,
            severity: Some(Severity::Minor),
            comments: Some("Sanitiser contact time not observed on the pass".to_string()),
            evidence_flag: None,
        },
        compliant("PC-01"),
        compliant("AL-01"),
    ]
}

pub(crate) fn hydrated_monitoring_service(
    probe_csv: Option<PathBuf>,
    date: NaiveDate,
) -> Result<
    (
        Arc<ShiftMonitoringService<InMemoryCheckRecordStore, InMemoryComplianceConfig>>,
        OrgContext,
        Option<ProbeImportOutcome>,
    ),
    AppError,
> {
    let store = Arc::new(InMemoryCheckRecordStore::default());
    let config = Arc::new(InMemoryComplianceConfig::default());
    let service = Arc::new(ShiftMonitoringService::new(store, config));
    let context = demo_context();

    let import = match probe_csv {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            Some(service.import_probe_log(&context, file, date, Utc::now())?)
        }
        None => None,
    };

    Ok((service, context, import))
}

pub(crate) fn render_shift_summary(
    summary: &ShiftCompletionSummary,
    import: Option<&ProbeImportOutcome>,
    list_checks: bool,
) {
    println!("Shift reconciliation");
    println!("Shift: {} {}", summary.date, summary.shift_label);

    match import {
        Some(outcome) => {
            println!(
                "Data source: probe CSV import ({} filed, {} already logged)",
                outcome.accepted, outcome.duplicates
            );
            if !outcome.unmatched_sensors.is_empty() {
                println!("Unmatched sensors:");
                for sensor in &outcome.unmatched_sensors {
                    println!("  - {}", sensor);
                }
            }
            if !outcome.needs_attention.is_empty() {
                println!("Readings held for attention:");
                for issue in &outcome.needs_attention {
                    println!(
                        "  - {} on {}: {:.1}C ({})",
                        issue.check_key,
                        issue.equipment_instance,
                        issue.celsius,
                        issue.status_label
                    );
                }
            }
        }
        None => println!("Data source: diary entries only (no probe data provided)"),
    }

    println!("\nSection progress");
    for section in &summary.sections {
        println!(
            "- {}: {}/{} checks done, {} failed",
            section.section_label, section.done, section.total, section.failed
        );
    }

    if summary.complete {
        println!("\nShift complete");
    } else {
        println!("\nOutstanding checks");
        for check in summary.checks.iter().filter(|check| !check.done) {
            if check.awaiting_setup {
                println!("- {} (no active equipment configured)", check.name);
            } else if check.outstanding.is_empty() {
                println!("- {}", check.name);
            } else {
                println!("- {}: {}", check.name, check.outstanding.join(", "));
            }
        }
    }

    if summary.has_failures {
        println!("\nFailed checks are on record with their corrective notes");
    }

    if list_checks {
        println!("\nCheck breakdown");
        for check in &summary.checks {
            let state = if check.done {
                if check.failed {
                    "failed (noted)"
                } else {
                    "done"
                }
            } else if check.awaiting_setup {
                "awaiting setup"
            } else {
                "outstanding"
            };
            println!(
                "- {} | {} | {} | {}",
                check.key, check.name, check.section_label, state
            );
        }
    }
}
