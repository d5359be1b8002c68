use crate::infra::{parse_color, parse_consistency, parse_texture};
use crate::render::{render_batch, render_knowledge_base, render_report};
use clap::Args;
use poultry_dx::config::AppConfig;
use poultry_dx::diagnosis::domain::parse_tags;
use poultry_dx::diagnosis::{
    CaseImporter, CaseRecord, CareGuidance, ChickenSymptom, DiagnosisEngine, DiagnosisResult,
    DiagnosisService, EvidenceInput, FecesColor, FecesConsistency, FecesSymptom, FecesTexture,
    SimulatedEvidenceExtractor, SpecimenImage, SpecimenImages,
};
use poultry_dx::error::AppError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// Flock age in weeks
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: f64,
    /// Feces symptom tags (blood, mucus, diarrhea, abnormal_color); repeat or comma-separate
    #[arg(long = "feces-symptom", value_delimiter = ',')]
    pub(crate) feces_symptoms: Vec<String>,
    /// Bird symptom tags (weight_loss, gait_disorder, feather_ruffling, abnormal_posture)
    #[arg(long = "chicken-symptom", value_delimiter = ',')]
    pub(crate) chicken_symptoms: Vec<String>,
    /// Feces consistency (normal, soft, watery, hard)
    #[arg(long, value_parser = parse_consistency, default_value = "normal")]
    pub(crate) consistency: FecesConsistency,
    /// Feces color, shown in the reasoning trail only
    #[arg(long, value_parser = parse_color)]
    pub(crate) color: Option<FecesColor>,
    /// Feces texture (normal, watery, mucoid, bloody), shown in the reasoning trail only
    #[arg(long, value_parser = parse_texture)]
    pub(crate) texture: Option<FecesTexture>,
    /// Language for console output
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one case per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Language for console output
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
    /// Print every case result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DiseasesArgs {
    /// Language for console output
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
    /// Print the knowledge base as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Extractor seed (defaults to APP_EXTRACTOR_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of simulated flock houses to diagnose
    #[arg(long, default_value_t = 3)]
    pub(crate) houses: usize,
    /// Language for console output
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
}

#[derive(Debug, Serialize)]
struct BatchOutcome<'a> {
    case_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    observed_on: Option<chrono::NaiveDate>,
    result: &'a DiagnosisResult,
}

pub(crate) fn run_diagnose(args: DiagnoseArgs, config: &AppConfig) -> Result<(), AppError> {
    let evidence = evidence_from_args(&args);
    let engine = DiagnosisEngine::new(Arc::new(config.diagnosis.knowledge_base()?));
    let result = engine.evaluate(&evidence)?;
    let report = CareGuidance.report(engine.knowledge_base(), result, None);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report, &args.lang));
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs, config: &AppConfig) -> Result<(), AppError> {
    let engine = DiagnosisEngine::new(Arc::new(config.diagnosis.knowledge_base()?));
    let cases = CaseImporter::from_path(&args.csv)?;

    let diagnosed = cases
        .into_iter()
        .map(|case| -> Result<(CaseRecord, DiagnosisResult), AppError> {
            let result = engine.evaluate(&case.evidence)?;
            Ok((case, result))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if args.json {
        let outcomes: Vec<BatchOutcome<'_>> = diagnosed
            .iter()
            .map(|(case, result)| BatchOutcome {
                case_id: &case.case_id,
                observed_on: case.observed_on,
                result,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("{}", render_batch(&diagnosed, &args.lang));
    }
    Ok(())
}

pub(crate) fn run_diseases(args: DiseasesArgs, config: &AppConfig) -> Result<(), AppError> {
    let knowledge = config.diagnosis.knowledge_base()?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&knowledge)?);
    } else {
        println!("{}", render_knowledge_base(&knowledge, &args.lang));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let seed = args.seed.unwrap_or(config.diagnosis.extractor_seed);
    let knowledge = Arc::new(config.diagnosis.knowledge_base()?);
    let extractor = Arc::new(SimulatedEvidenceExtractor::new(seed, &knowledge));
    let service = DiagnosisService::new(knowledge, extractor);

    println!("Simulated specimen diagnosis (seed {seed})");
    for house in 1..=args.houses {
        let report = service.diagnose_specimens(&demo_specimens(house))?;
        println!("\nHouse {house}");
        println!("{}", render_report(&report, &args.lang));
    }
    Ok(())
}

fn demo_specimens(house: usize) -> SpecimenImages {
    SpecimenImages {
        chicken: Some(SpecimenImage {
            name: format!("house-{house}-bird.jpg"),
            storage_key: format!("demo/house-{house}/bird.jpg"),
        }),
        feces: Some(SpecimenImage {
            name: format!("house-{house}-droppings.jpg"),
            storage_key: format!("demo/house-{house}/droppings.jpg"),
        }),
    }
}

fn evidence_from_args(args: &DiagnoseArgs) -> EvidenceInput {
    let (feces_symptoms, unknown_feces) = parse_tags(&args.feces_symptoms, FecesSymptom::parse);
    let (chicken_symptoms, unknown_chicken) =
        parse_tags(&args.chicken_symptoms, ChickenSymptom::parse);
    if !unknown_feces.is_empty() || !unknown_chicken.is_empty() {
        warn!(
            ?unknown_feces,
            ?unknown_chicken,
            "ignoring unrecognized symptom tags"
        );
    }

    EvidenceInput {
        feces_symptoms,
        feces_consistency: args.consistency,
        chicken_symptoms,
        age_weeks: args.age,
        feces_color: args.color,
        feces_texture: args.texture,
    }
}
