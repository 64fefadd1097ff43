use crate::infra::{
    load_profile_document, seed_catalog, InMemoryMatchingService, InMemoryProfileRepository,
    InMemorySchemeRepository,
};
use chrono::Local;
use clap::Args;
use govaid::error::AppError;
use govaid::workflows::catalog::SchemeCatalogImporter;
use govaid::workflows::schemes::{
    ApplicantId, ApplicantProfile, ApplicantRole, EligibilityEngine, EntrepreneurProfileRecord,
    FilterOutcome, MalformedRulePolicy, MatchingConfig, MatchingServiceError, ProfileRecord,
    SchemeDraft, SchemeMatchingService, StudentProfileRecord,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// CSV catalog with name,eligibility,provider,benefits,link,target_group columns
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// JSON profile document tagged with "role": "student" | "entrepreneur"
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Leave out schemes with non-numeric limits instead of failing the run
    #[arg(long)]
    pub(crate) skip_malformed: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Raw eligibility text, e.g. "income<250000;gender=female"
    #[arg(long)]
    pub(crate) eligibility: String,
    /// JSON profile document; an empty profile is used when omitted
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        catalog,
        profile,
        skip_malformed,
    } = args;

    let policy = if skip_malformed {
        MalformedRulePolicy::Skip
    } else {
        MalformedRulePolicy::Abort
    };
    let service = in_memory_service(policy);
    let drafts = SchemeCatalogImporter::from_path(&catalog)?;
    let seeded = seed_catalog(&service, drafts)?;

    let record = load_profile_document(&profile)?;
    let role = record.role();
    let applicant = ApplicantId("cli".to_string());
    service.save_profile(&applicant, record)?;

    let outcome = service.eligible_schemes(&applicant, role)?;
    println!("Loaded {} scheme(s) from {}", seeded, catalog.display());
    render_matches(role, &outcome);
    Ok(())
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let profile = match args.profile {
        Some(path) => load_profile_document(&path)?.applicant_profile(),
        None => ApplicantProfile::default(),
    };

    let decision = EligibilityEngine::new()
        .evaluate(&args.eligibility, &profile)
        .map_err(MatchingServiceError::from)?;
    println!("{}", decision.summary());
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let today = Local::now().date_naive();
    println!("GovAid scheme matching demo ({today})");

    let service = in_memory_service(MalformedRulePolicy::Skip);
    let seeded = seed_catalog(&service, sample_catalog())?;
    println!("- Seeded {seeded} sample schemes");

    let applicants = [
        (
            ApplicantId("demo-student".to_string()),
            ProfileRecord::Student(StudentProfileRecord {
                state: Some("Maharashtra".to_string()),
                category: Some("SC".to_string()),
                annual_income: Some(180_000),
                gender: Some("Female".to_string()),
                education_level: Some("Undergraduate".to_string()),
                course: Some("B.Tech".to_string()),
                ..StudentProfileRecord::default()
            }),
        ),
        (
            ApplicantId("demo-founder".to_string()),
            ProfileRecord::Entrepreneur(EntrepreneurProfileRecord {
                state: Some("Karnataka".to_string()),
                age: Some(31),
                industry_type: Some("Healthtech".to_string()),
                startup_stage: Some("Idea".to_string()),
                annual_turnover: Some(1_200_000),
                funding_needs: Some(2_500_000),
            }),
        ),
    ];

    for (applicant, record) in applicants {
        let role = record.role();
        println!("\nApplicant {} ({role})", applicant.0);
        service.save_profile(&applicant, record)?;
        match service.eligible_schemes(&applicant, role) {
            Ok(outcome) => render_matches(role, &outcome),
            Err(err) => println!("  Matching unavailable: {err}"),
        }
    }

    Ok(())
}

fn in_memory_service(policy: MalformedRulePolicy) -> InMemoryMatchingService {
    SchemeMatchingService::new(
        Arc::new(InMemorySchemeRepository::default()),
        Arc::new(InMemoryProfileRepository::default()),
        MatchingConfig {
            malformed_rules: policy,
        },
    )
}

fn render_matches(role: ApplicantRole, outcome: &FilterOutcome) {
    if outcome.schemes.is_empty() {
        println!("No {role} schemes match this profile");
    } else {
        println!("{} {role} scheme(s) match:", outcome.schemes.len());
        for view in &outcome.schemes {
            println!("  - {} ({})", view.name, view.provider);
            if !view.benefits.is_empty() {
                println!("    benefits: {}", view.benefits);
            }
            if !view.eligibility.trim().is_empty() {
                println!("    eligibility: {}", view.eligibility);
            }
            if !view.link.is_empty() {
                println!("    apply: {}", view.link);
            }
        }
    }

    for skipped in &outcome.skipped {
        println!("  ! skipped {}: {}", skipped.name, skipped.reason);
    }
}

fn sample_catalog() -> Vec<SchemeDraft> {
    let draft = |name: &str, eligibility: &str, provider: &str, benefits: &str, role| SchemeDraft {
        name: name.to_string(),
        eligibility: eligibility.to_string(),
        provider: provider.to_string(),
        benefits: benefits.to_string(),
        link: String::new(),
        target_group: role,
    };

    vec![
        draft(
            "Post Matric Scholarship for SC Students",
            "income<250000;category=sc",
            "Ministry of Social Justice",
            "Tuition and maintenance allowance",
            ApplicantRole::Student,
        ),
        draft(
            "Pragati Scholarship for Girls",
            "income<800000;gender=female",
            "AICTE",
            "INR 50000 per year",
            ApplicantRole::Student,
        ),
        draft(
            "Merit Scholarship (Kerala)",
            "state=kerala",
            "Government of Kerala",
            "INR 10000 per year",
            ApplicantRole::Student,
        ),
        draft(
            "Startup India Seed Fund",
            "startup_stage=idea;turnover<10000000",
            "DPIIT",
            "Up to INR 20 lakh grant",
            ApplicantRole::Entrepreneur,
        ),
        draft(
            "Young Founders Loan",
            "age<30;industry=any",
            "SIDBI",
            "Collateral-free loan",
            ApplicantRole::Entrepreneur,
        ),
        draft(
            "Legacy Rural Grant",
            "turnover<5 lakh",
            "State Rural Mission",
            "One-time grant",
            ApplicantRole::Entrepreneur,
        ),
    ]
}
