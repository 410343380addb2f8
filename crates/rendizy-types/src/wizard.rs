//! Property wizard types.
//!
//! The wizard is a fixed sequence of blocks, each holding an ordered list of
//! steps. The structure itself lives in `rendizy-core::wizard::structure`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly a step must be filled before publishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepValidation {
    Required,
    Recommended,
    Optional,
}

impl fmt::Display for StepValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepValidation::Required => "required",
            StepValidation::Recommended => "recommended",
            StepValidation::Optional => "optional",
        };
        write!(f, "{s}")
    }
}

/// Commercial modality of a property. A property may have several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    ShortTermRental,
    ResidentialRental,
    BuySell,
}

impl std::str::FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term_rental" => Ok(Modality::ShortTermRental),
            "residential_rental" => Ok(Modality::ResidentialRental),
            "buy_sell" => Ok(Modality::BuySell),
            other => Err(format!("unknown modality '{other}'")),
        }
    }
}

/// One step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub validation: StepValidation,
}

/// A group of steps shown under one tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardBlock {
    pub id: &'static str,
    pub title: &'static str,
    pub steps: &'static [WizardStep],
}

/// Payload sent upstream when a step is saved.
///
/// `data` is flattened so the endpoint receives the form fields alongside
/// the progress bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSubmission<T> {
    #[serde(flatten)]
    pub data: T,
    pub completion_percentage: u8,
    pub completed_steps: Vec<String>,
}
