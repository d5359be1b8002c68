use super::domain::{
    BreedProfile, DiseaseId, DiseaseProfile, FecesColor, LocalizedText, TreatmentPlan,
    WeightRange,
};
use super::reference::{
    standard_feces_colors, standard_neck_conditions, FecesColorGuide, NeckCondition,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Immutable disease, breed and field-guide reference tables.
///
/// Disease order is significant: it is the iteration order the engine uses to
/// break ties between equal scores. The droppings color and neck tables are
/// reference material only and never feed the scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    diseases: Vec<DiseaseProfile>,
    #[serde(default)]
    breeds: Vec<BreedProfile>,
    #[serde(default)]
    feces_colors: Vec<FecesColorGuide>,
    #[serde(default)]
    neck_conditions: Vec<NeckCondition>,
}

/// Failure to build or load a knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeBaseError {
    #[error("knowledge base contains no diseases")]
    Empty,
    #[error("disease '{0}' is defined more than once")]
    DuplicateDisease(DiseaseId),
    #[error("disease '{id}' has an invalid accuracy range {min}..{max} (expected 0 <= min <= max <= 100)")]
    InvalidAccuracyRange { id: DiseaseId, min: f64, max: f64 },
    #[error("breed '{0}' is defined more than once")]
    DuplicateBreed(String),
    #[error("breed '{id}' has an invalid weight range {min}..{max} kg")]
    InvalidWeightRange { id: String, min: f64, max: f64 },
    #[error("reference entry '{0}' is defined more than once")]
    DuplicateReference(String),
    #[error("reference entry '{id}' has a risk of {risk}% (expected at most 100)")]
    InvalidRisk { id: String, risk: u8 },
    #[error("feces color '{0}' is claimed by more than one color guide")]
    OverlappingColor(&'static str),
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid knowledge base document: {0}")]
    Json(#[from] serde_json::Error),
}

impl KnowledgeBase {
    /// Validates profile invariants. An empty disease list is accepted here;
    /// the loaders and the engine reject it.
    pub fn new(
        diseases: Vec<DiseaseProfile>,
        breeds: Vec<BreedProfile>,
    ) -> Result<Self, KnowledgeBaseError> {
        let knowledge = Self {
            diseases,
            breeds,
            feces_colors: Vec::new(),
            neck_conditions: Vec::new(),
        };
        knowledge.validate()?;
        Ok(knowledge)
    }

    /// Replaces the droppings color and neck condition tables.
    pub fn with_reference(
        mut self,
        feces_colors: Vec<FecesColorGuide>,
        neck_conditions: Vec<NeckCondition>,
    ) -> Result<Self, KnowledgeBaseError> {
        self.feces_colors = feces_colors;
        self.neck_conditions = neck_conditions;
        self.validate()?;
        Ok(self)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, KnowledgeBaseError> {
        let knowledge: Self = serde_json::from_reader(reader)?;
        knowledge.validate()?;
        if knowledge.diseases.is_empty() {
            return Err(KnowledgeBaseError::Empty);
        }
        Ok(knowledge)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeBaseError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn diseases(&self) -> &[DiseaseProfile] {
        &self.diseases
    }

    pub fn breeds(&self) -> &[BreedProfile] {
        &self.breeds
    }

    pub fn disease(&self, id: &DiseaseId) -> Option<&DiseaseProfile> {
        self.diseases.iter().find(|profile| &profile.id == id)
    }

    pub fn feces_colors(&self) -> &[FecesColorGuide] {
        &self.feces_colors
    }

    pub fn neck_conditions(&self) -> &[NeckCondition] {
        &self.neck_conditions
    }

    /// The guide whose category covers the observed color, if any.
    pub fn feces_color_guide(&self, color: FecesColor) -> Option<&FecesColorGuide> {
        self.feces_colors
            .iter()
            .find(|guide| guide.colors.contains(&color))
    }

    pub fn breed(&self, id: &str) -> Option<&BreedProfile> {
        self.breeds.iter().find(|breed| breed.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    fn validate(&self) -> Result<(), KnowledgeBaseError> {
        let mut seen = HashSet::new();
        for profile in &self.diseases {
            let min = profile.min_base_accuracy;
            let max = profile.max_base_accuracy;
            let in_range =
                min.is_finite() && max.is_finite() && 0.0 <= min && min <= max && max <= 100.0;
            if !in_range {
                return Err(KnowledgeBaseError::InvalidAccuracyRange {
                    id: profile.id.clone(),
                    min,
                    max,
                });
            }
            if !seen.insert(&profile.id) {
                return Err(KnowledgeBaseError::DuplicateDisease(profile.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for breed in &self.breeds {
            let WeightRange { min, max } = breed.weight_range_kg;
            if !(min.is_finite() && max.is_finite() && 0.0 < min && min <= max) {
                return Err(KnowledgeBaseError::InvalidWeightRange {
                    id: breed.id.clone(),
                    min,
                    max,
                });
            }
            if !seen.insert(breed.id.as_str()) {
                return Err(KnowledgeBaseError::DuplicateBreed(breed.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        let mut claimed = HashSet::new();
        for guide in &self.feces_colors {
            if !seen.insert(guide.id.as_str()) {
                return Err(KnowledgeBaseError::DuplicateReference(guide.id.clone()));
            }
            for color in &guide.colors {
                if !claimed.insert(*color) {
                    return Err(KnowledgeBaseError::OverlappingColor(color.label()));
                }
            }
            let mut risks = guide.diseases.iter().chain(&guide.conditions);
            if let Some(entry) = risks.find(|entry| entry.risk > 100) {
                return Err(KnowledgeBaseError::InvalidRisk {
                    id: guide.id.clone(),
                    risk: entry.risk,
                });
            }
        }

        let mut seen = HashSet::new();
        for condition in &self.neck_conditions {
            if !seen.insert(condition.id.as_str()) {
                return Err(KnowledgeBaseError::DuplicateReference(condition.id.clone()));
            }
        }

        Ok(())
    }

    /// The enteric disease table, broiler/layer breeds and field guides the
    /// service ships with.
    pub fn standard() -> Self {
        Self {
            diseases: standard_diseases(),
            breeds: standard_breeds(),
            feces_colors: standard_feces_colors(),
            neck_conditions: standard_neck_conditions(),
        }
    }
}

pub mod ids {
    pub const COCCIDIOSIS: &str = "coccidiosis";
    pub const NECROTIC_ENTERITIS: &str = "necrotic_enteritis";
    pub const HISTOMONIASIS: &str = "histomoniasis";
    pub const ULCERATIVE_ENTERITIS: &str = "ulcerative_enteritis";
    pub const SALMONELLOSIS: &str = "salmonellosis";
    pub const E_COLI_INFECTION: &str = "e_coli_infection";
    pub const HELMINTHIASIS: &str = "helminthiasis";
    pub const CRYPTOSPORIDIOSIS: &str = "cryptosporidiosis";
    pub const MYCOTOXICOSIS: &str = "mycotoxicosis";
    pub const DIETARY_ENTERITIS: &str = "dietary_enteritis";
    pub const BACTERIAL_ENTERITIS: &str = "bacterial_enteritis";
    pub const VIRAL_ENTERITIS: &str = "viral_enteritis";
}

struct DiseaseRow {
    id: &'static str,
    name: (&'static str, &'static str),
    range: (f64, f64),
    description: (&'static str, &'static str),
    clues: &'static [(&'static str, &'static str)],
}

const DISEASE_ROWS: &[DiseaseRow] = &[
    DiseaseRow {
        id: ids::COCCIDIOSIS,
        name: ("Coccidiosis", "الكوكسيديا"),
        range: (75.0, 90.0),
        description: (
            "Most common cause of bloody or mucoid diarrhea, intestinal lesions, and mortality (esp. 3-6 wk age). Confirmed by oocysts or typical intestinal lesions.",
            "أكثر أسباب الإسهال الدموي أو المخاطي شيوعاً، آفات معوية، ووفيات (خاصة في عمر 3-6 أسابيع). يتم التأكد عن طريق الأكياس أو الآفات المعوية النموذجية.",
        ),
        clues: &[
            ("Bloody diarrhea", "إسهال دموي"),
            ("Mucoid feces", "مخاط في البراز"),
            ("Age 3-6 weeks", "عمر 3-6 أسابيع"),
            ("Intestinal lesions", "آفات معوية"),
        ],
    },
    DiseaseRow {
        id: ids::NECROTIC_ENTERITIS,
        name: ("Necrotic enteritis", "التهاب الأمعاء الناخر"),
        range: (30.0, 50.0),
        description: (
            "Common secondary infection following coccidiosis; thickened, necrotic mucosa with brown debris. Often occurs with high-protein diets.",
            "عدوى ثانوية شائعة بعد الكوكسيديا؛ غشاء مخاطي متسمك وناخر مع حطام بني. غالباً ما يحدث مع الأنظمة الغذائية عالية البروتين.",
        ),
        clues: &[
            ("Following coccidiosis", "بعد الكوكسيديا"),
            ("Necrotic mucosa", "غشاء مخاطي ناخر"),
            ("High-protein diets", "أنظمة عالية البروتين"),
        ],
    },
    DiseaseRow {
        id: ids::HISTOMONIASIS,
        name: ("Histomoniasis", "الهستومونياس"),
        range: (10.0, 20.0),
        description: (
            "Cecal cores and target-like liver lesions, especially in turkeys; rarely in chickens.",
            "نوى عمياء وآفات كبدية شبيهة بالهدف، خاصة في الديوك الرومية؛ نادراً في الدجاج.",
        ),
        clues: &[
            ("Cecal cores", "نوى عمياء"),
            ("Liver lesions", "آفات كبدية"),
            ("Rare in chickens", "نادر في الدجاج"),
        ],
    },
    DiseaseRow {
        id: ids::ULCERATIVE_ENTERITIS,
        name: ("Ulcerative enteritis", "التهاب الأمعاء التقرحي"),
        range: (5.0, 15.0),
        description: (
            "Small ulcers along intestine; no bloody droppings. Usually in quails or stressed layers.",
            "قرحات صغيرة على طول الأمعاء؛ لا توجد براز دموي. عادة في السمان أو الطبقات المجهدة.",
        ),
        clues: &[
            ("Intestinal ulcers", "قرحات معوية"),
            ("No bloody droppings", "لا يوجد براز دموي"),
            ("Stressed birds", "طيور مجهدة"),
        ],
    },
    DiseaseRow {
        id: ids::SALMONELLOSIS,
        name: ("Salmonellosis", "السالمونيلا"),
        range: (10.0, 25.0),
        description: (
            "Watery diarrhea, systemic signs; not bloody. Confirmed by culture.",
            "إسهال مائي، علامات جهازية؛ ليس دموياً. يتم التأكد عن طريق الزراعة.",
        ),
        clues: &[
            ("Watery diarrhea", "إسهال مائي"),
            ("Systemic signs", "علامات جهازية"),
            ("Not bloody", "ليس دموياً"),
        ],
    },
    DiseaseRow {
        id: ids::E_COLI_INFECTION,
        name: ("E. coli infection", "عدوى الإشريكية القولونية"),
        range: (10.0, 20.0),
        description: (
            "More often respiratory or septicemic; enteric form rare.",
            "غالباً ما يكون تنفسياً أو تسممياً؛ الشكل المعوي نادر.",
        ),
        clues: &[
            ("Respiratory or septicemic", "تنفسي أو تسممي"),
            ("Enteric form rare", "شكل معوي نادر"),
        ],
    },
    DiseaseRow {
        id: ids::HELMINTHIASIS,
        name: ("Helminthiasis", "الديدان المعوية"),
        range: (10.0, 20.0),
        description: (
            "Chronic poor growth; worms visible on necropsy; no blood.",
            "نمو ضعيف مزمن؛ ديدان مرئية عند التشريح؛ لا يوجد دم.",
        ),
        clues: &[
            ("Chronic poor growth", "نمو ضعيف مزمن"),
            ("Visible worms", "ديدان مرئية"),
            ("No blood", "لا يوجد دم"),
        ],
    },
    DiseaseRow {
        id: ids::CRYPTOSPORIDIOSIS,
        name: ("Cryptosporidiosis", "الكريبتوسبوريديا"),
        range: (5.0, 10.0),
        description: (
            "Mild enteritis in young chicks; no gross bloody lesions.",
            "التهاب معوي خفيف في الكتاكيت الصغيرة؛ لا توجد آفات دموية ظاهرة.",
        ),
        clues: &[
            ("Young chicks", "كتاكيت صغيرة"),
            ("Mild enteritis", "التهاب معوي خفيف"),
            ("No bloody lesions", "لا آفات دموية"),
        ],
    },
    DiseaseRow {
        id: ids::MYCOTOXICOSIS,
        name: ("Mycotoxicosis", "التسمم الفطري"),
        range: (10.0, 15.0),
        description: (
            "Poor performance, pale liver; chronic course; feed analysis confirms.",
            "أداء ضعيف، كبد شاحب؛ مسار مزمن؛ يؤكد تحليل العلف.",
        ),
        clues: &[
            ("Poor performance", "أداء ضعيف"),
            ("Pale liver", "كبد شاحب"),
            ("Chronic course", "مسار مزمن"),
        ],
    },
    DiseaseRow {
        id: ids::DIETARY_ENTERITIS,
        name: ("Dietary enteritis", "التهاب الأمعاء الغذائي"),
        range: (5.0, 15.0),
        description: (
            "Soft droppings due to feed error; no lesions.",
            "براز طري بسبب خطأ في العلف؛ لا توجد آفات.",
        ),
        clues: &[
            ("Soft droppings", "براز طري"),
            ("Feed error", "خطأ في العلف"),
            ("No lesions", "لا آفات"),
        ],
    },
    DiseaseRow {
        id: ids::BACTERIAL_ENTERITIS,
        name: ("Bacterial enteritis", "التهاب الأمعاء البكتيري"),
        range: (10.0, 20.0),
        description: (
            "Mild catarrhal enteritis; mixed flora on culture.",
            "التهاب معوي نزلي خفيف؛ فلورا مختلطة في الزراعة.",
        ),
        clues: &[
            ("Mild enteritis", "التهاب معوي خفيف"),
            ("Mixed flora", "فلورا مختلطة"),
        ],
    },
    DiseaseRow {
        id: ids::VIRAL_ENTERITIS,
        name: ("Viral enteritis", "التهاب الأمعاء الفيروسي"),
        range: (5.0, 10.0),
        description: (
            "Mostly in chicks <10 days; watery droppings, no blood.",
            "في الغالب في الكتاكيت <10 أيام؛ براز مائي، لا دم.",
        ),
        clues: &[
            ("Chicks <10 days", "كتاكيت <10 أيام"),
            ("Watery droppings", "براز مائي"),
            ("No blood", "لا دم"),
        ],
    },
];

fn standard_diseases() -> Vec<DiseaseProfile> {
    DISEASE_ROWS
        .iter()
        .map(|row| DiseaseProfile {
            id: DiseaseId::new(row.id),
            name: LocalizedText::en_ar(row.name.0, row.name.1),
            min_base_accuracy: row.range.0,
            max_base_accuracy: row.range.1,
            description: LocalizedText::en_ar(row.description.0, row.description.1),
            clues: row
                .clues
                .iter()
                .map(|(en, ar)| LocalizedText::en_ar(en, ar))
                .collect(),
            treatment: standard_treatment(row.id),
        })
        .collect()
}

fn standard_treatment(id: &str) -> Option<TreatmentPlan> {
    match id {
        ids::COCCIDIOSIS => Some(TreatmentPlan {
            medication: LocalizedText::en_ar("Amprolium or Sulfa drugs", "أمبروليوم أو سلفا"),
            dosage: LocalizedText::en_ar(
                "As per veterinarian instructions",
                "حسب تعليمات الطبيب البيطري",
            ),
            duration: LocalizedText::en_ar("5-7 days", "5-7 أيام"),
            warnings: LocalizedText::en_ar(
                "Monitor response and ensure adequate hydration",
                "مراقبة الاستجابة وضمان الترطيب الكافي",
            ),
        }),
        ids::NECROTIC_ENTERITIS => Some(TreatmentPlan {
            medication: LocalizedText::en_ar(
                "Bacitracin or Virginiamycin",
                "باسيتراسين أو فيرجينياميسين",
            ),
            dosage: LocalizedText::en_ar("Based on chicken weight", "حسب وزن الدجاجة"),
            duration: LocalizedText::en_ar("7-10 days", "7-10 أيام"),
            warnings: LocalizedText::en_ar(
                "Improve feed quality and reduce protein",
                "تحسين جودة العلف وتقليل البروتين",
            ),
        }),
        _ => None,
    }
}

fn standard_breeds() -> Vec<BreedProfile> {
    let breed = |id: &str, ar: &str, min: f64, max: f64, traits: [(&str, &str); 3]| BreedProfile {
        id: id.to_string(),
        name: LocalizedText::en_ar(id, ar),
        weight_range_kg: WeightRange { min, max },
        characteristics: traits
            .iter()
            .map(|(en, ar)| LocalizedText::en_ar(en, ar))
            .collect(),
    };

    vec![
        breed(
            "Ross 308",
            "روس 308",
            2.5,
            3.2,
            [
                ("White feathers", "أبيض الريش"),
                ("Full body", "جسم ممتلئ"),
                ("Fast growth", "نمو سريع"),
            ],
        ),
        breed(
            "Cobb 500",
            "كوب 500",
            2.8,
            3.5,
            [
                ("White feathers", "أبيض الريش"),
                ("Broad breast", "صدر عريض"),
                ("High feed efficiency", "كفاءة علف عالية"),
            ],
        ),
        breed(
            "ISA Brown",
            "إيزا براون",
            2.0,
            2.5,
            [
                ("Brown feathers", "بني الريش"),
                ("Medium size", "حجم متوسط"),
                ("High egg production", "إنتاج بيض عالي"),
            ],
        ),
    ]
}
