use std::sync::LazyLock;

use radcard_core::models::narrative::Likelihood::{High, Low, Medium};

use crate::choice::{Degree, Multiplicity};
use crate::rules::DifferentialRule;

use super::selection::{
    BleedType, BrainSelection, CtDensity, ExtraAxialAge, InfarctStage, MassEnhancement, Territory,
};
use super::{resolved_age, resolved_infarct_stage};

pub const HEMORRHAGE: &str = "Hemorrhage";
pub const ISCHEMIA: &str = "Ischemia";
pub const MASS: &str = "Mass lesion";

type Rule = DifferentialRule<BrainSelection>;

fn age(s: &BrainSelection) -> ExtraAxialAge {
    resolved_age(s).value
}

fn extra_axial(s: &BrainSelection) -> bool {
    s.bleed_type.is_extra_axial()
}

fn no_mass_effect(s: &BrainSelection) -> bool {
    s.midline_shift().is_some_and(|v| v <= 0.0)
        && !s.basal_cistern_effacement.is_positive()
        && !s.ventricular_compression.is_positive()
        && !s.has_herniation()
}

fn ring(s: &BrainSelection) -> bool {
    s.mass.is_present() && s.mass_enhancement == MassEnhancement::Ring
}

/// Ordered differential rules for the brain module.
pub static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Epidural
        Rule::propose(
            "hem.edh.fracture",
            HEMORRHAGE,
            "Arterial epidural hematoma",
            High,
            "Epidural collection with adjacent skull fracture",
            |s| s.bleed_type == BleedType::Edh && s.skull_fracture.is_present(),
        ),
        Rule::propose(
            "hem.edh.venous",
            HEMORRHAGE,
            "Venous epidural hematoma",
            Medium,
            "Vertex or posterior fossa location suggests dural sinus injury",
            |s| {
                s.bleed_type == BleedType::Edh
                    && s.region_mentions(&["vertex", "posterior fossa", "sinus"])
            },
        ),
        Rule::propose(
            "hem.edh.biconvex",
            HEMORRHAGE,
            "Arterial epidural hematoma",
            Medium,
            "Biconvex extra-axial collection",
            |s| s.bleed_type == BleedType::Edh,
        ),
        // Subdural
        Rule::propose(
            "hem.sdh.acute.trauma",
            HEMORRHAGE,
            "Acute traumatic subdural hematoma",
            High,
            "Acute crescentic collection after trauma",
            |s| {
                s.bleed_type == BleedType::Sdh
                    && age(s) == ExtraAxialAge::Acute
                    && s.trauma.is_present()
            },
        ),
        Rule::propose(
            "hem.sdh.acute",
            HEMORRHAGE,
            "Acute traumatic subdural hematoma",
            Medium,
            "Acute crescentic extra-axial collection",
            |s| s.bleed_type == BleedType::Sdh && age(s) == ExtraAxialAge::Acute,
        ),
        Rule::propose(
            "hem.sdh.subacute",
            HEMORRHAGE,
            "Subacute subdural hematoma",
            High,
            "Subacute-stage crescentic collection",
            |s| s.bleed_type == BleedType::Sdh && age(s) == ExtraAxialAge::Subacute,
        ),
        Rule::propose(
            "hem.sdh.chronic",
            HEMORRHAGE,
            "Chronic subdural hematoma",
            High,
            "Chronic-stage crescentic collection",
            |s| s.bleed_type == BleedType::Sdh && age(s) == ExtraAxialAge::Chronic,
        ),
        Rule::propose(
            "hem.sdh.acute_on_chronic",
            HEMORRHAGE,
            "Acute-on-chronic subdural hematoma",
            High,
            "Mixed-age subdural collection",
            |s| s.bleed_type == BleedType::Sdh && age(s) == ExtraAxialAge::AcuteOnChronic,
        ),
        Rule::raise(
            "hem.sdh.chronic.anticoagulation",
            HEMORRHAGE,
            "Chronic subdural hematoma",
            "Anticoagulation predisposes to recurrent subdural bleeding",
            |s| s.bleed_type == BleedType::Sdh && s.anticoagulated.is_present(),
        ),
        Rule::propose(
            "hem.sdh.hygroma",
            HEMORRHAGE,
            "Subdural hygroma",
            Low,
            "CSF-density subdural collection",
            |s| s.bleed_type == BleedType::Sdh && s.ct_density == CtDensity::Hypodense,
        ),
        Rule::raise(
            "hem.sdh.hygroma.no_mass_effect",
            HEMORRHAGE,
            "Subdural hygroma",
            "No mass effect",
            |s| s.bleed_type == BleedType::Sdh && no_mass_effect(s),
        ),
        Rule::propose(
            "hem.extra_axial.empyema",
            HEMORRHAGE,
            "Subdural empyema",
            Medium,
            "Extra-axial collection with fever",
            |s| extra_axial(s) && s.fever.is_present(),
        ),
        Rule::lower(
            "hem.extra_axial.empyema.trauma",
            HEMORRHAGE,
            "Subdural empyema",
            "Trauma history favors hematoma",
            |s| extra_axial(s) && s.trauma.is_present(),
        ),
        // Subarachnoid
        Rule::propose(
            "hem.sah.traumatic",
            HEMORRHAGE,
            "Traumatic subarachnoid hemorrhage",
            High,
            "Subarachnoid blood after trauma",
            |s| s.bleed_type == BleedType::Sah && s.trauma.is_present(),
        ),
        Rule::propose(
            "hem.sah.aneurysmal",
            HEMORRHAGE,
            "Aneurysmal subarachnoid hemorrhage",
            High,
            "Subarachnoid blood without trauma",
            |s| s.bleed_type == BleedType::Sah && !s.trauma.is_present(),
        ),
        Rule::propose(
            "hem.sah.aneurysmal.after_fall",
            HEMORRHAGE,
            "Aneurysmal subarachnoid hemorrhage",
            Low,
            "Aneurysmal rupture can precede a fall",
            |s| s.bleed_type == BleedType::Sah && s.trauma.is_present(),
        ),
        Rule::propose(
            "hem.sah.perimesencephalic",
            HEMORRHAGE,
            "Perimesencephalic nonaneurysmal hemorrhage",
            Medium,
            "Blood centered on the perimesencephalic cisterns",
            |s| {
                s.bleed_type == BleedType::Sah
                    && s.region_mentions(&["perimesencephalic", "prepontine", "interpeduncular"])
            },
        ),
        Rule::lower(
            "hem.sah.aneurysmal.perimesencephalic",
            HEMORRHAGE,
            "Aneurysmal subarachnoid hemorrhage",
            "Perimesencephalic distribution",
            |s| {
                s.bleed_type == BleedType::Sah
                    && s.region_mentions(&["perimesencephalic", "prepontine", "interpeduncular"])
            },
        ),
        // Intraparenchymal
        Rule::propose(
            "hem.iph.contusion",
            HEMORRHAGE,
            "Hemorrhagic contusion",
            High,
            "Parenchymal blood after trauma",
            |s| s.bleed_type == BleedType::Iph && s.trauma.is_present(),
        ),
        Rule::propose(
            "hem.iph.hypertensive",
            HEMORRHAGE,
            "Hypertensive hemorrhage",
            High,
            "Deep location typical of hypertensive bleeding",
            |s| {
                s.bleed_type == BleedType::Iph
                    && s.region_mentions(&[
                        "basal ganglia",
                        "putamen",
                        "thalam",
                        "pons",
                        "cerebell",
                    ])
            },
        ),
        Rule::propose(
            "hem.iph.amyloid",
            HEMORRHAGE,
            "Cerebral amyloid angiopathy",
            Medium,
            "Lobar location",
            |s| {
                s.bleed_type == BleedType::Iph
                    && s.region_mentions(&[
                        "lobar",
                        "cortical",
                        "frontal",
                        "parietal",
                        "occipital",
                        "temporal",
                    ])
            },
        ),
        Rule::propose(
            "hem.iph.tumor",
            HEMORRHAGE,
            "Hemorrhagic metastasis",
            Medium,
            "Known malignancy",
            |s| s.bleed_type == BleedType::Iph && s.known_malignancy.is_present(),
        ),
        Rule::raise(
            "hem.iph.tumor.mass",
            HEMORRHAGE,
            "Hemorrhagic metastasis",
            "Associated mass lesion",
            |s| s.bleed_type == BleedType::Iph && s.mass.is_present(),
        ),
        Rule::propose(
            "hem.iph.anticoagulation",
            HEMORRHAGE,
            "Anticoagulation-related hemorrhage",
            Medium,
            "Patient is anticoagulated",
            |s| s.has_bleed() && s.anticoagulated.is_present(),
        ),
        Rule::propose(
            "hem.iph.transformation",
            HEMORRHAGE,
            "Hemorrhagic transformation of infarct",
            Medium,
            "Blood within an infarcted territory",
            |s| s.bleed_type == BleedType::Iph && s.infarct.is_present(),
        ),
        Rule::raise(
            "hem.iph.transformation.flagged",
            HEMORRHAGE,
            "Hemorrhagic transformation of infarct",
            "Hemorrhagic transformation reported",
            |s| s.hemorrhagic_transformation.is_present(),
        ),
        // Intraventricular
        Rule::propose(
            "hem.ivh.traumatic",
            HEMORRHAGE,
            "Traumatic intraventricular hemorrhage",
            Medium,
            "Ventricular blood after trauma",
            |s| s.bleed_type == BleedType::Ivh && s.trauma.is_present(),
        ),
        Rule::propose(
            "hem.ivh.extension",
            HEMORRHAGE,
            "Extension of parenchymal hemorrhage",
            Medium,
            "Non-traumatic ventricular blood",
            |s| s.bleed_type == BleedType::Ivh && !s.trauma.is_present(),
        ),
        // Ischemia
        Rule::propose(
            "isch.early",
            ISCHEMIA,
            "Acute arterial infarct",
            High,
            "Early ischemic stage",
            |s| s.infarct.is_present() && resolved_infarct_stage(s).value.is_early(),
        ),
        Rule::propose(
            "isch.subacute",
            ISCHEMIA,
            "Subacute infarct",
            High,
            "Subacute ischemic stage",
            |s| s.infarct.is_present() && resolved_infarct_stage(s).value == InfarctStage::Subacute,
        ),
        Rule::propose(
            "isch.chronic",
            ISCHEMIA,
            "Chronic infarct",
            High,
            "Encephalomalacia and volume loss",
            |s| s.infarct.is_present() && resolved_infarct_stage(s).value == InfarctStage::Chronic,
        ),
        Rule::propose(
            "isch.indeterminate",
            ISCHEMIA,
            "Infarct of indeterminate age",
            Medium,
            "Stage not determinable from the selections",
            |s| s.infarct.is_present() && !resolved_infarct_stage(s).is_known(),
        ),
        Rule::propose(
            "isch.watershed",
            ISCHEMIA,
            "Watershed infarct",
            High,
            "Border-zone distribution suggests hypoperfusion",
            |s| s.infarct.is_present() && s.infarct_territory == Territory::Watershed,
        ),
        Rule::propose(
            "isch.lacunar",
            ISCHEMIA,
            "Lacunar infarct",
            High,
            "Small deep infarct",
            |s| s.infarct.is_present() && s.infarct_territory == Territory::Lacunar,
        ),
        Rule::raise(
            "isch.hyperdense_vessel",
            ISCHEMIA,
            "Acute arterial infarct",
            "Hyperdense vessel sign",
            |s| s.hyperdense_vessel.is_present(),
        ),
        Rule::propose(
            "isch.tumor_mimic",
            ISCHEMIA,
            "Neoplasm mimicking infarct",
            Low,
            "Coexisting mass lesion",
            |s| s.infarct.is_present() && s.mass.is_present(),
        ),
        // Mass lesion
        Rule::propose(
            "mass.ring.multiple",
            MASS,
            "Metastases",
            High,
            "Multiple ring-enhancing lesions",
            |s| ring(s) && s.mass_multiplicity == Multiplicity::Multiple,
        ),
        Rule::propose(
            "mass.ring.glioma",
            MASS,
            "High-grade glioma",
            Medium,
            "Solitary ring-enhancing lesion",
            |s| ring(s) && s.mass_multiplicity != Multiplicity::Multiple,
        ),
        Rule::propose(
            "mass.ring.abscess",
            MASS,
            "Cerebral abscess",
            Medium,
            "Ring enhancement",
            ring,
        ),
        Rule::raise(
            "mass.ring.abscess.fever",
            MASS,
            "Cerebral abscess",
            "Fever",
            |s| ring(s) && s.fever.is_present(),
        ),
        Rule::propose(
            "mass.malignancy",
            MASS,
            "Metastases",
            Medium,
            "Known malignancy",
            |s| s.mass.is_present() && s.known_malignancy.is_present(),
        ),
        Rule::raise(
            "mass.edema.metastases",
            MASS,
            "Metastases",
            "Edema out of proportion to lesion size",
            |s| s.mass.is_present() && s.mass_edema == Degree::Marked,
        ),
        Rule::propose(
            "mass.dural_tail",
            MASS,
            "Meningioma",
            High,
            "Extra-axial enhancing mass with dural tail",
            |s| s.mass.is_present() && s.mass_enhancement == MassEnhancement::DuralTail,
        ),
        Rule::propose(
            "mass.heterogeneous",
            MASS,
            "High-grade glioma",
            High,
            "Heterogeneous enhancement",
            |s| s.mass.is_present() && s.mass_enhancement == MassEnhancement::Heterogeneous,
        ),
        Rule::propose(
            "mass.homogeneous.lymphoma",
            MASS,
            "Primary CNS lymphoma",
            Medium,
            "Homogeneous enhancement",
            |s| s.mass.is_present() && s.mass_enhancement == MassEnhancement::Homogeneous,
        ),
        Rule::propose(
            "mass.homogeneous.meningioma",
            MASS,
            "Meningioma",
            Low,
            "Homogeneous enhancement",
            |s| s.mass.is_present() && s.mass_enhancement == MassEnhancement::Homogeneous,
        ),
        Rule::propose(
            "mass.non_enhancing",
            MASS,
            "Low-grade glioma",
            Medium,
            "Non-enhancing mass",
            |s| s.mass.is_present() && s.mass_enhancement == MassEnhancement::None,
        ),
        Rule::lower(
            "mass.non_enhancing.edema",
            MASS,
            "Low-grade glioma",
            "Marked edema is atypical",
            |s| s.mass.is_present() && s.mass_edema == Degree::Marked,
        ),
    ]
});
