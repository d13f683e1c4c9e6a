//! Page definitions: which fields a quiz page collects, where it sends them
//! and how the generator's answer is shaped.

use crate::catalog;
use crate::generator::ParamValue;
use crate::quiz::ResponseSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDomain {
    Choice(&'static [&'static str]),
    FreeText {
        suggestions: Option<&'static [&'static str]>,
    },
    Range {
        min: i64,
        max: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Text(&'static str),
    Int(i64),
}

impl FieldDefault {
    pub fn value(&self) -> ParamValue {
        match self {
            FieldDefault::Text(s) => ParamValue::Text(s.to_string()),
            FieldDefault::Int(n) => ParamValue::Int(*n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub domain: FieldDomain,
    pub default: FieldDefault,
}

#[derive(Debug, PartialEq, Eq)]
pub struct PageSpec {
    pub title: &'static str,
    pub route: &'static str,
    pub fields: &'static [FieldSpec],
    pub schema: ResponseSchema,
}

impl PageSpec {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        let fields: &'static [FieldSpec] = self.fields;
        fields.iter().find(|f| f.name == name)
    }
}

pub static GRC_WIZARD: PageSpec = PageSpec {
    title: "GRC Wizard",
    route: "grc/generate_question",
    fields: &[
        FieldSpec {
            name: "category",
            label: "Category",
            domain: FieldDomain::Choice(catalog::GRC_CATEGORIES),
            default: FieldDefault::Text("Random"),
        },
        FieldSpec {
            name: "difficulty",
            label: "Difficulty",
            domain: FieldDomain::Choice(catalog::DIFFICULTIES),
            default: FieldDefault::Text("Easy"),
        },
    ],
    schema: ResponseSchema::SingleWithTip,
};

pub static SCENARIO_SPHERE: PageSpec = PageSpec {
    title: "Scenario Sphere",
    route: "scenario/generate_scenario",
    fields: &[
        FieldSpec {
            name: "industry",
            label: "Industry",
            domain: FieldDomain::Choice(catalog::INDUSTRIES),
            default: FieldDefault::Text("Finance"),
        },
        FieldSpec {
            name: "attack_type",
            label: "Type of Attack",
            domain: FieldDomain::FreeText {
                suggestions: Some(catalog::ATTACK_TYPES),
            },
            default: FieldDefault::Text(""),
        },
        FieldSpec {
            name: "skill_level",
            label: "Skill Level",
            domain: FieldDomain::Choice(catalog::SKILL_LEVELS),
            default: FieldDefault::Text("Script Kiddie"),
        },
        FieldSpec {
            name: "threat_intensity",
            label: "Threat Intensity",
            domain: FieldDomain::Range {
                min: catalog::THREAT_INTENSITY_MIN,
                max: catalog::THREAT_INTENSITY_MAX,
            },
            default: FieldDefault::Int(50),
        },
    ],
    schema: ResponseSchema::ScenarioQuestions,
};
