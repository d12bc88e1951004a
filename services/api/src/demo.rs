use crate::infra::{load_service, model_path};
use clap::Args;
use loan_risk::error::AppError;
use loan_risk::scoring::{ApplicationForm, LoanRiskService};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

/// Applicant fields for a single prediction. Defaults mirror the intake form.
#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[arg(long, default_value_t = 30.0)]
    pub(crate) age: f64,
    /// male or female
    #[arg(long, default_value = "male")]
    pub(crate) gender: String,
    /// High School, Associate, Bachelor, or Master
    #[arg(long, default_value = "Bachelor")]
    pub(crate) education: String,
    #[arg(long, default_value_t = 50_000.0)]
    pub(crate) income: f64,
    /// Years of employment experience
    #[arg(long, default_value_t = 5.0)]
    pub(crate) employment_experience: f64,
    /// RENT, OWN, MORTGAGE, or OTHER
    #[arg(long, default_value = "RENT")]
    pub(crate) home_ownership: String,
    #[arg(long, default_value_t = 10_000.0)]
    pub(crate) loan_amount: f64,
    /// EDUCATION, HOMEIMPROVEMENT, MEDICAL, PERSONAL, or VENTURE
    #[arg(long, default_value = "PERSONAL")]
    pub(crate) loan_intent: String,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 10.0)]
    pub(crate) interest_rate: f64,
    /// Loan amount as a fraction of income
    #[arg(long, default_value_t = 0.3)]
    pub(crate) loan_percent_income: f64,
    /// Years of credit history
    #[arg(long, default_value_t = 5.0)]
    pub(crate) credit_history_length: f64,
    #[arg(long, default_value_t = 650.0)]
    pub(crate) credit_score: f64,
    /// Yes or No
    #[arg(long, default_value = "No")]
    pub(crate) previous_defaults: String,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

impl PredictArgs {
    pub(crate) fn to_form(&self) -> ApplicationForm {
        ApplicationForm {
            age: self.age,
            gender: self.gender.clone(),
            education: self.education.clone(),
            income: self.income,
            employment_experience: self.employment_experience,
            home_ownership: self.home_ownership.clone(),
            loan_amount: self.loan_amount,
            loan_intent: self.loan_intent.clone(),
            interest_rate: self.interest_rate,
            loan_percent_income: self.loan_percent_income,
            credit_history_length: self.credit_history_length,
            credit_score: self.credit_score,
            previous_defaults: self.previous_defaults.clone(),
        }
    }
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let form = args.to_form();
    let service = load_service(model_path(args.model)?)?;
    println!("{}", service.predict_form(&form));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = load_service(model_path(args.model)?)?;

    println!("Loan default prediction demo");
    render_artifact_summary(&service);

    for (index, (label, form)) in demo_applicants().into_iter().enumerate() {
        println!("\nApplicant {} ({label})", index + 1);
        println!(
            "- age {} | {} | {} | income {:.0} | {} years employed",
            form.age, form.gender, form.education, form.income, form.employment_experience
        );
        println!(
            "- {} | loan {:.0} for {} at {:.2}% ({:.0}% of income)",
            form.home_ownership,
            form.loan_amount,
            form.loan_intent,
            form.interest_rate,
            form.loan_percent_income * 100.0
        );
        println!(
            "- credit score {} | {} years history | previous defaults: {}",
            form.credit_score, form.credit_history_length, form.previous_defaults
        );
        for line in service.predict_form(&form).lines().filter(|l| !l.is_empty()) {
            println!("  {line}");
        }
    }

    Ok(())
}

fn render_artifact_summary(service: &LoanRiskService) {
    let artifact = service.artifact();
    let metadata = artifact.metadata();
    println!(
        "Model: {} (version {})",
        metadata.name.as_deref().unwrap_or("unnamed"),
        metadata.version.as_deref().unwrap_or("unversioned")
    );
    if let Some(trained_on) = metadata.trained_on.as_deref() {
        println!("Trained on: {trained_on}");
    }
    println!(
        "Pipeline: {} scaler -> {} over {} features",
        artifact.scaler().kind(),
        artifact.classifier().kind(),
        artifact.feature_names().len()
    );
}

pub(crate) fn demo_applicants() -> Vec<(&'static str, ApplicationForm)> {
    vec![
        (
            "early career renter",
            ApplicationForm {
                age: 30.0,
                gender: "male".to_string(),
                education: "Bachelor".to_string(),
                income: 50_000.0,
                employment_experience: 5.0,
                home_ownership: "RENT".to_string(),
                loan_amount: 10_000.0,
                loan_intent: "PERSONAL".to_string(),
                interest_rate: 10.0,
                loan_percent_income: 0.3,
                credit_history_length: 5.0,
                credit_score: 650.0,
                previous_defaults: "No".to_string(),
            },
        ),
        (
            "established homeowner",
            ApplicationForm {
                age: 45.0,
                gender: "female".to_string(),
                education: "Master".to_string(),
                income: 80_000.0,
                employment_experience: 15.0,
                home_ownership: "OWN".to_string(),
                loan_amount: 25_000.0,
                loan_intent: "EDUCATION".to_string(),
                interest_rate: 8.5,
                loan_percent_income: 0.25,
                credit_history_length: 10.0,
                credit_score: 720.0,
                previous_defaults: "No".to_string(),
            },
        ),
        (
            "thin file with prior default",
            ApplicationForm {
                age: 25.0,
                gender: "male".to_string(),
                education: "High School".to_string(),
                income: 25_000.0,
                employment_experience: 2.0,
                home_ownership: "RENT".to_string(),
                loan_amount: 15_000.0,
                loan_intent: "VENTURE".to_string(),
                interest_rate: 18.0,
                loan_percent_income: 0.6,
                credit_history_length: 2.0,
                credit_score: 550.0,
                previous_defaults: "Yes".to_string(),
            },
        ),
    ]
}
