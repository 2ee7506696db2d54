use crate::infra::{InMemoryAuditSink, InMemoryCaseRepository};
use clap::Args;
use immigr_pro::cases::{
    ApplicantContact, CaseQuery, CaseService, CaseStatus, CaseSubmission, CaseUpdate,
    NoteRequest,
};
use immigr_pro::config::CasesConfig;
use immigr_pro::eligibility::{
    ApplicantProfile, EducationLevel, EligibilityEngine, EvaluationResult, LanguageInput,
    MaritalStatus, SkillScores, SponsorshipRelation,
};
use immigr_pro::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a questionnaire profile (camelCase JSON)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Pretty-print the JSON result
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only print the sample evaluations, skipping the counselor session.
    #[arg(long)]
    pub(crate) skip_cases: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.profile)?;
    let result = evaluate_document(&raw)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn evaluate_document(raw: &str) -> Result<EvaluationResult, AppError> {
    let profile: ApplicantProfile = serde_json::from_str(raw)?;
    Ok(EligibilityEngine::default().evaluate(&profile))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = EligibilityEngine::default();
    let samples = sample_applicants();

    println!("Scenario table");
    println!("{:<34} {:<8} {:>6} {:>8}", "scenario", "top", "score", "budget");
    for (label, profile) in scenario_profiles() {
        let result = engine.evaluate(&profile);
        match &result.top_program {
            Some(top) => println!(
                "{:<34} {:<8} {:>6} {:>8}",
                label,
                top.program_key.code(),
                top.score,
                top.estimated_budget
            ),
            None => println!("{label:<34} -"),
        }
    }

    println!("\nEligibility walkthrough");
    for (contact, profile) in &samples {
        let result = engine.evaluate(profile);
        render_evaluation(&contact.full_name, &result);
    }

    if args.skip_cases {
        return Ok(());
    }

    let audit = Arc::new(InMemoryAuditSink::default());
    let service = CaseService::new(
        Arc::new(InMemoryCaseRepository::default()),
        audit.clone(),
        engine,
        CasesConfig::default(),
    );

    let mut ids = Vec::with_capacity(samples.len());
    for (applicant, profile) in samples {
        let record = service.submit(CaseSubmission { applicant, profile })?;
        ids.push(record.id);
    }

    if let Some(first) = ids.first() {
        service.update(
            first,
            CaseUpdate {
                status: Some(CaseStatus::Review),
                counselor: Some("Demo Counselor".to_string()),
                actor: Some("demo".to_string()),
                ..CaseUpdate::default()
            },
        )?;
        service.add_note(
            first,
            NoteRequest {
                text: "Proof of funds requested".to_string(),
                actor: Some("demo".to_string()),
            },
        )?;
    }

    let page = service.list(&CaseQuery::default())?;
    println!(
        "\nCase queue ({} cases, page {}/{})",
        page.total, page.page, page.page_count
    );
    for record in &page.items {
        println!(
            "- {} | {} | {} | {} pts | est. ${}",
            record.id.as_str(),
            record.applicant.full_name,
            record.status.label(),
            record.score.unwrap_or_default(),
            record.budget_estimate.unwrap_or_default()
        );
    }

    println!("\nStatus counts");
    for entry in service.status_counts()? {
        if entry.count > 0 {
            println!("- {}: {}", entry.status.label(), entry.count);
        }
    }

    let export = service.export_csv(&CaseQuery::default())?;
    println!("\nCSV export ({} bytes)", export.len());
    print!("{}", String::from_utf8_lossy(&export));

    println!("\nAudit trail: {} entries", audit.entries().len());
    Ok(())
}

fn render_evaluation(name: &str, result: &EvaluationResult) {
    println!("\n{name}");
    println!(
        "- Proficiency L{} S{} R{} W{} | composite {}",
        result.proficiency.listening,
        result.proficiency.speaking,
        result.proficiency.reading,
        result.proficiency.writing,
        result.breakdown.composite
    );
    println!("- Recommended: {}", result.summary());
    for candidate in &result.alternatives {
        println!(
            "  - {}: {} pts | est. ${} | {}",
            candidate.program_key.code(),
            candidate.score,
            candidate.estimated_budget,
            candidate.reasons.join("; ")
        );
    }
}

fn sample_applicants() -> Vec<(ApplicantContact, ApplicantProfile)> {
    vec![
        (
            contact("Amina Diallo", "amina@example.com"),
            ApplicantProfile {
                age: 27,
                education: EducationLevel::Bachelor,
                language_input: LanguageInput::Overall { overall: 6.5 },
                foreign_experience_years: 3.0,
                target_province: "Ontario".to_string(),
                available_funds_amount: 15_000.0,
                ..ApplicantProfile::default()
            },
        ),
        (
            contact("Julien Tremblay", "julien@example.com"),
            ApplicantProfile {
                age: 35,
                marital_status: MaritalStatus::Married,
                education: EducationLevel::Master,
                language_input: LanguageInput::ScaleC(SkillScores::new(520.0, 480.0, 510.0, 470.0)),
                foreign_experience_years: 6.0,
                target_province: "Québec".to_string(),
                available_funds_amount: 22_000.0,
                ..ApplicantProfile::default()
            },
        ),
        (
            contact("Priya Nair", "priya@example.com"),
            ApplicantProfile {
                age: 31,
                education: EducationLevel::College,
                language_input: LanguageInput::ScaleA(SkillScores::new(8.0, 7.0, 8.0, 7.0)),
                canadian_experience_years: 2.0,
                has_validated_job_offer: true,
                target_province: "Alberta".to_string(),
                available_funds_amount: 9_000.0,
                sponsorship_relation: SponsorshipRelation::Spouse,
                ..ApplicantProfile::default()
            },
        ),
    ]
}

/// Questionnaire defaults followed by one variation per documented scenario.
fn scenario_profiles() -> Vec<(&'static str, ApplicantProfile)> {
    let defaults = ApplicantProfile {
        age: 27,
        education: EducationLevel::Bachelor,
        language_input: LanguageInput::Overall { overall: 6.5 },
        foreign_experience_years: 3.0,
        target_province: "Ontario".to_string(),
        available_funds_amount: 15_000.0,
        ..ApplicantProfile::default()
    };

    vec![
        ("questionnaire defaults", defaults.clone()),
        (
            "one year of Canadian experience",
            ApplicantProfile {
                canadian_experience_years: 1.0,
                ..ApplicantProfile::default()
            },
        ),
        (
            "targeting Québec",
            ApplicantProfile {
                target_province: "Québec".to_string(),
                ..defaults.clone()
            },
        ),
        (
            "spouse sponsorship only",
            ApplicantProfile {
                sponsorship_relation: SponsorshipRelation::Spouse,
                ..ApplicantProfile::default()
            },
        ),
        (
            "validated job offer",
            ApplicantProfile {
                has_validated_job_offer: true,
                ..defaults
            },
        ),
    ]
}

fn contact(full_name: &str, email: &str) -> ApplicantContact {
    ApplicantContact {
        full_name: full_name.to_string(),
        email: email.to_string(),
    }
}
