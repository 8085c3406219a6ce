//! Heuristic model inference from the Vehicle Descriptor Section.
//!
//! Manufacturers do not publish a uniform VDS layout, so the model is
//! guessed by looking for known model-name fragments anywhere in the six VDS
//! characters. Each manufacturer has an ordered table; the first fragment
//! found wins, then a short list of fallback fragments is tried, and finally
//! the manufacturer's most common model is returned.
//!
//! The result is plausible, not authoritative. Fragments overlap (a VDS
//! containing `T8` can be read as a T880 or a T800 depending on what
//! follows) and table order decides. Callers that need to know how a model
//! was chosen should inspect [`ModelGuess::basis`].

use serde::Serialize;

use super::wmi::Manufacturer;

/// Where a fragment has to appear in the VDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Anywhere,
    Prefix,
}

#[derive(Debug)]
struct Rule {
    fragment: &'static str,
    model: &'static str,
    anchor: Anchor,
}

impl Rule {
    const fn anywhere(fragment: &'static str, model: &'static str) -> Self {
        Self {
            fragment,
            model,
            anchor: Anchor::Anywhere,
        }
    }

    const fn prefix(fragment: &'static str, model: &'static str) -> Self {
        Self {
            fragment,
            model,
            anchor: Anchor::Prefix,
        }
    }

    fn matches(&self, vds: &str) -> bool {
        match self.anchor {
            Anchor::Anywhere => vds.contains(self.fragment),
            Anchor::Prefix => vds.starts_with(self.fragment),
        }
    }
}

#[derive(Debug)]
struct ModelTable {
    primary: &'static [Rule],
    fallback: &'static [Rule],
    default: &'static str,
}

// Fragments only use VIN characters; one containing I, O or Q could never
// match. Kenworth model names are matched on their first three characters.
static KENWORTH: ModelTable = ModelTable {
    primary: &[
        Rule::anywhere("T68", "T680"),
        Rule::anywhere("T88", "T880"),
        Rule::anywhere("W90", "W900"),
        Rule::anywhere("T80", "T800"),
        Rule::anywhere("T37", "T370"),
        Rule::anywhere("T27", "T270"),
        Rule::anywhere("C50", "C500"),
    ],
    fallback: &[
        Rule::prefix("T6", "T680"),
        Rule::prefix("T8", "T880"),
        Rule::prefix("W9", "W900"),
    ],
    default: "T680",
};

static PETERBILT: ModelTable = ModelTable {
    primary: &[
        Rule::anywhere("579", "579"),
        Rule::anywhere("389", "389"),
        Rule::anywhere("367", "367"),
        Rule::anywhere("348", "348"),
        Rule::anywhere("337", "337"),
        Rule::anywhere("220", "220"),
    ],
    fallback: &[
        Rule::anywhere("57", "579"),
        Rule::anywhere("38", "389"),
        Rule::anywhere("36", "367"),
    ],
    default: "579",
};

static FREIGHTLINER: ModelTable = ModelTable {
    primary: &[
        Rule::anywhere("CASC", "Cascadia"),
        Rule::anywhere("M2", "M2 106"),
        Rule::anywhere("114", "114SD"),
        Rule::anywhere("108", "108SD"),
    ],
    fallback: &[
        Rule::anywhere("CA", "Cascadia"),
        Rule::anywhere("SC", "Cascadia"),
    ],
    default: "Cascadia",
};

static INTERNATIONAL: ModelTable = ModelTable {
    primary: &[
        Rule::anywhere("LT", "LT"),
        Rule::anywhere("RH", "RH"),
        Rule::anywhere("HX", "HX"),
    ],
    fallback: &[],
    default: "LT",
};

static VOLVO: ModelTable = ModelTable {
    primary: &[
        Rule::anywhere("VNL", "VNL"),
        Rule::anywhere("VNR", "VNR"),
        Rule::anywhere("VHD", "VHD"),
        Rule::anywhere("VAH", "VAH"),
    ],
    fallback: &[Rule::anywhere("VN", "VNL"), Rule::anywhere("VH", "VHD")],
    default: "VNL",
};

impl Manufacturer {
    fn model_table(self) -> &'static ModelTable {
        match self {
            Self::Kenworth => &KENWORTH,
            Self::Peterbilt => &PETERBILT,
            Self::Freightliner => &FREIGHTLINER,
            Self::International => &INTERNATIONAL,
            Self::Volvo => &VOLVO,
        }
    }

    /// The model assumed when nothing in the VDS is recognized.
    #[must_use]
    pub fn default_model(self) -> &'static str {
        self.model_table().default
    }
}

/// How a model guess was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "fragment")]
pub enum ModelBasis {
    /// A model-name fragment was found in the VDS.
    Fragment(&'static str),
    /// Only a shorter fallback fragment matched.
    Fallback(&'static str),
    /// Nothing matched; the manufacturer's most common model was assumed.
    Default,
}

/// A best-effort model inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelGuess {
    /// The inferred model name.
    pub model: &'static str,
    /// What produced it.
    pub basis: ModelBasis,
}

/// Guess the model of a truck from its VDS.
///
/// The VDS is expected in upper case. This is a heuristic: it always
/// produces a model for a known manufacturer and a non-empty VDS, even when
/// the guess is just the manufacturer's most common model. Returns `None`
/// only for an empty VDS.
#[must_use]
pub fn infer_model(manufacturer: Manufacturer, vds: &str) -> Option<ModelGuess> {
    if vds.is_empty() {
        return None;
    }

    let table = manufacturer.model_table();

    if let Some(rule) = table.primary.iter().find(|r| r.matches(vds)) {
        return Some(ModelGuess {
            model: rule.model,
            basis: ModelBasis::Fragment(rule.fragment),
        });
    }

    if let Some(rule) = table.fallback.iter().find(|r| r.matches(vds)) {
        return Some(ModelGuess {
            model: rule.model,
            basis: ModelBasis::Fallback(rule.fragment),
        });
    }

    Some(ModelGuess {
        model: table.default,
        basis: ModelBasis::Default,
    })
}
