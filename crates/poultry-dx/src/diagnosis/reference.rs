//! Supplementary reference tables: what a droppings color category usually
//! points to, and the neck and crop conditions a flock owner may see.

use super::domain::{FecesColor, LocalizedText};
use serde::{Deserialize, Serialize};

/// A named risk, expressed as a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub name: LocalizedText,
    pub risk: u8,
}

/// Diseases, conditions and first response for one droppings color category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FecesColorGuide {
    pub id: String,
    pub name: LocalizedText,
    /// Observed colors that fall into this category.
    #[serde(default)]
    pub colors: Vec<FecesColor>,
    pub diseases: Vec<RiskEntry>,
    #[serde(default)]
    pub conditions: Vec<RiskEntry>,
    pub intervention: LocalizedText,
    pub treatment: LocalizedText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeckCondition {
    pub id: String,
    pub name: LocalizedText,
    pub causes: LocalizedText,
    pub actions: LocalizedText,
    pub severity: Severity,
}

fn risk(en: &str, ar: &str, risk: u8) -> RiskEntry {
    RiskEntry {
        name: LocalizedText::en_ar(en, ar),
        risk,
    }
}

pub(crate) fn standard_feces_colors() -> Vec<FecesColorGuide> {
    vec![
        FecesColorGuide {
            id: "light_green".to_string(),
            name: LocalizedText::en_ar("Light green", "أخضر فاتح"),
            colors: vec![FecesColor::Green],
            diseases: vec![
                risk("Newcastle disease", "نيوكاسل (Newcastle)", 85),
                risk("Avian influenza", "إنفلونزا الطيور", 78),
                risk("Fowl cholera", "كوليرا الدجاج", 72),
            ],
            conditions: vec![
                risk("Starvation", "الجوع", 45),
                risk("Liver failure", "فشل الكبد", 68),
                risk("Poisoning", "التسمم", 55),
            ],
            intervention: LocalizedText::en_ar(
                "Urgent veterinary intervention required; high likelihood of serious infectious disease",
                "تدخل بيطري عاجل مطلوب - احتمالية عالية لأمراض معدية خطيرة",
            ),
            treatment: LocalizedText::en_ar(
                "Isolate affected birds immediately. Give broad-spectrum antibiotics under veterinary supervision. Disinfect the whole house. Improve ventilation and feed quality.",
                "عزل فوري للطيور المصابة. إعطاء مضادات حيوية واسعة الطيف تحت إشراف بيطري. تطهير المكان بالكامل. تحسين التهوية وجودة العلف.",
            ),
        },
        FecesColorGuide {
            id: "yellow_mustard".to_string(),
            name: LocalizedText::en_ar("Yellow/mustard", "أصفر/خردلي"),
            colors: vec![FecesColor::Yellow],
            diseases: vec![
                risk("Blackhead (histomoniasis)", "داء الرأس الأسود (Blackhead)", 75),
                risk("Cecal coccidiosis", "كوكسيديا الأعور", 70),
            ],
            conditions: vec![risk("Liver problems", "مشاكل الكبد", 65)],
            intervention: LocalizedText::en_ar(
                "Prompt intervention recommended; close monitoring needed",
                "تدخل سريع موصى به - مراقبة دقيقة ضرورية",
            ),
            treatment: LocalizedText::en_ar(
                "Give anticoccidials (amprolium). Improve hygiene and ventilation. Add vitamins A and K for liver support. Veterinary check within 24-48 hours.",
                "إعطاء أدوية مضادة للكوكسيديا (أمبروليوم). تحسين النظافة والتهوية. إضافة فيتامينات A وK للدعم الكبدي. فحص بيطري خلال 24-48 ساعة.",
            ),
        },
        FecesColorGuide {
            id: "red_bloody".to_string(),
            name: LocalizedText::en_ar("Red/bloody brown", "أحمر/بني دموي"),
            colors: vec![FecesColor::Red],
            diseases: vec![risk("Coccidiosis", "كوكسيديا (Coccidiosis)", 90)],
            conditions: vec![
                risk("Necrotic enteritis", "التهاب أمعاء تنخري", 72),
                risk("Internal injury", "إصابة داخلية", 50),
            ],
            intervention: LocalizedText::en_ar(
                "Emergency; immediate veterinary intervention required",
                "حالة طارئة - تدخل بيطري فوري مطلوب",
            ),
            treatment: LocalizedText::en_ar(
                "Give amprolium or sulfamethazine immediately. Provide clean water with electrolytes. Isolate affected birds. Urgent veterinary review to prevent losses.",
                "إعطاء أمبروليوم أو سلفاميثازين فوراً. توفير ماء نظيف مع إلكتروليتات. عزل الطيور المصابة. مراجعة بيطرية عاجلة لمنع الوفيات.",
            ),
        },
        FecesColorGuide {
            id: "orange".to_string(),
            name: LocalizedText::en_ar("Orange", "برتقالي"),
            colors: Vec::new(),
            diseases: vec![risk("Post-coccidiosis", "ما بعد كوكسيديا", 60)],
            conditions: vec![risk("Acute liver damage", "تلف كبد حاد", 75)],
            intervention: LocalizedText::en_ar(
                "Intensive monitoring; veterinary consultation recommended",
                "مراقبة مكثفة - استشارة بيطرية موصى بها",
            ),
            treatment: LocalizedText::en_ar(
                "Give vitamin B complex and vitamin K. Improve feed quality. Provide high-quality protein. Veterinary follow-up within 48 hours.",
                "إعطاء فيتامينات B المركبة وفيتامين K. تحسين جودة العلف. توفير بروتين عالي الجودة. متابعة بيطرية خلال 48 ساعة.",
            ),
        },
        FecesColorGuide {
            id: "white_chalky".to_string(),
            name: LocalizedText::en_ar("White/chalky", "أبيض/طباشيري"),
            colors: vec![FecesColor::White],
            diseases: vec![
                risk("Nephropathogenic bronchitis", "التهاب الشعب الكلوي", 80),
                risk("Gout", "النقرس (Gout)", 70),
            ],
            conditions: vec![
                risk("Kidney failure", "فشل كلوي", 65),
                risk("Dehydration", "جفاف", 55),
            ],
            intervention: LocalizedText::en_ar(
                "Urgent veterinary intervention; likely kidney problems",
                "تدخل بيطري عاجل - مشاكل كلوية محتملة",
            ),
            treatment: LocalizedText::en_ar(
                "Increase available water. Temporarily reduce feed protein (14-16%). Give vitamin A. Veterinary check to find the exact cause.",
                "زيادة كمية الماء المتاح. تقليل البروتين في العلف مؤقتاً (14-16%). إعطاء فيتامين A. فحص بيطري لتحديد السبب الدقيق.",
            ),
        },
        FecesColorGuide {
            id: "undigested_feed".to_string(),
            name: LocalizedText::en_ar("Contains undigested feed", "يحتوي علف غير مهضوم"),
            colors: Vec::new(),
            diseases: vec![risk("Malabsorption", "سوء امتصاص (Malabsorption)", 65)],
            conditions: vec![
                risk("Poor feed quality", "جودة علف سيئة", 70),
                risk("Rapid gut transit", "عبور سريع للأمعاء", 60),
            ],
            intervention: LocalizedText::en_ar(
                "Monitor and improve; check feed and water quality",
                "مراقبة وتحسين - فحص جودة العلف والماء",
            ),
            treatment: LocalizedText::en_ar(
                "Check feed quality and storage. Add digestive enzymes and probiotics. Provide grit. Reduce stress and crowding. Consult a nutritionist.",
                "فحص جودة وتخزين العلف. إضافة إنزيمات هضمية وبروبيوتيك. توفير حصى للدجاج. تقليل التوتر والازدحام. استشارة خبير تغذية.",
            ),
        },
    ]
}

pub(crate) fn standard_neck_conditions() -> Vec<NeckCondition> {
    let condition = |id: &str,
                     name: (&str, &str),
                     causes: (&str, &str),
                     actions: (&str, &str),
                     severity: Severity| NeckCondition {
        id: id.to_string(),
        name: LocalizedText::en_ar(name.0, name.1),
        causes: LocalizedText::en_ar(causes.0, causes.1),
        actions: LocalizedText::en_ar(actions.0, actions.1),
        severity,
    };

    vec![
        condition(
            "torticollis",
            ("Torticollis/twisted neck", "التواء الرقبة"),
            (
                "Vitamin B1 deficiency, Newcastle disease, encephalitis, poisoning",
                "نقص فيتامين B1، نيوكاسل، التهاب الدماغ، تسمم",
            ),
            (
                "Isolate the bird immediately. Give vitamin B complex in the water. Consult a veterinarian if there is no improvement within 48 hours.",
                "عزل الطائر فورًا. إعطاء فيتامين B المركب في الماء. استشر طبيب بيطري إذا لم يتحسن خلال 48 ساعة.",
            ),
            Severity::High,
        ),
        condition(
            "neck_drooping",
            ("Neck drooping/bending", "انحناء الرقبة للأسفل أو للجانب"),
            (
                "General weakness, malnutrition, neurological disease",
                "ضعف عام، سوء تغذية، أمراض عصبية",
            ),
            (
                "Check feed and water quality. Give vitamin and mineral supplements. Provide a calm, warm environment.",
                "فحص جودة العلف والماء. إعطاء مكملات فيتامينات ومعادن. توفير بيئة هادئة ودافئة.",
            ),
            Severity::Medium,
        ),
        condition(
            "neck_spasms",
            ("Neck spasms", "تشنج الرقبة"),
            (
                "Newcastle disease, calcium deficiency, food poisoning",
                "نيوكاسل، نقص كالسيوم، تسمم غذائي",
            ),
            (
                "Isolate immediately. Give calcium and vitamin D3. Urgent veterinary review.",
                "عزل فوري. إعطاء كالسيوم وفيتامين D3. مراجعة طبيب بيطري عاجلة.",
            ),
            Severity::High,
        ),
        condition(
            "flaccid_neck",
            ("Flaccid neck", "ارتخاء الرقبة"),
            (
                "Severe weakness, dehydration, heat stress",
                "ضعف شديد، جفاف، صدمة حرارية",
            ),
            (
                "Move to a cool place. Give a sugar and salt solution (one teaspoon per liter of water). Monitor closely.",
                "نقل إلى مكان بارد. إعطاء محلول سكر وملح (ملعقة صغيرة لكل لتر ماء). مراقبة دقيقة.",
            ),
            Severity::Medium,
        ),
        condition(
            "star_gazing",
            ("Head rotation/star gazing", "دوران الرأس"),
            (
                "Vitamin E deficiency, poisoning, Marek's disease",
                "نقص فيتامين E، تسمم، مرض ماريك",
            ),
            (
                "Give vitamin E and selenium. Isolate the bird. Veterinary examination needed to rule out Marek's disease.",
                "إعطاء فيتامين E وسيلينيوم. عزل الطائر. فحص بيطري مطلوب لاستبعاد ماريك.",
            ),
            Severity::High,
        ),
        condition(
            "stiff_neck",
            ("Stiff neck", "تيبس الرقبة"),
            (
                "Arthritis, mechanical injury, old age",
                "التهاب مفاصل، إصابة ميكانيكية، تقدم في العمر",
            ),
            (
                "Provide rest and comfortable housing. Give anti-inflammatories under veterinary supervision. Avoid excessive movement.",
                "توفير راحة وبيئة مريحة. إعطاء مضاد التهاب تحت إشراف بيطري. تجنب الحركة الزائدة.",
            ),
            Severity::Low,
        ),
        condition(
            "crop_swelling",
            ("Crop/neck swelling", "انتفاخ الرقبة أو الحوصلة"),
            (
                "Impacted crop, fungal infection (candida), tumor",
                "انحشار الحوصلة، عدوى فطرية (كانديدا)، ورم",
            ),
            (
                "Withhold feed. Massage the crop gently. Consult a veterinarian immediately if there is no improvement.",
                "عدم إطعام الطائر. تدليك الحوصلة برفق. استشارة بيطري فورية إذا لم يتحسن.",
            ),
            Severity::Medium,
        ),
        condition(
            "pendulous_crop",
            ("Pendulous/full crop", "تدلي أو امتلاء الحوصلة"),
            (
                "Overeating, excess wet feed, blockage",
                "إفراط في الأكل، طعام رطب زائد، انسداد",
            ),
            (
                "Hold the bird upright and massage the crop gently to help it empty. Reduce feed for a while. Consult a veterinarian.",
                "رفع الطائر رأسياً بلطف وتدليك الحوصلة لتحفيز الإفراغ. تقليل الطعام مؤقتاً. استشارة بيطري.",
            ),
            Severity::Medium,
        ),
    ]
}
