//! The compound identifier value type and its closed kind enumeration.

use std::fmt;

/// A chemical identifier scheme.
///
/// Numeric codes are stable across versions so serialized data keeps working
/// when new kinds are appended. Unknown codes decode to [`Unspecified`]
/// (`CompoundIdentifierKind::Unspecified`) rather than failing, so a newer
/// producer and an older consumer stay compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum CompoundIdentifierKind {
    Unspecified = 0,
    Custom = 1,
    /// Simplified molecular-input line-entry system.
    Smiles = 2,
    /// IUPAC International Chemical Identifier.
    Inchi = 3,
    /// Molblock from an MDL Molfile V3000.
    Molblock = 4,
    /// Chemical name following IUPAC nomenclature recommendations.
    IupacName = 5,
    /// Any accepted common name, trade name, etc.
    Name = 6,
    /// Chemical Abstracts Service Registry Number (with hyphens).
    CasNumber = 7,
    /// PubChem Compound ID number.
    PubchemCid = 8,
    /// ChemSpider ID number.
    ChemspiderId = 9,
    /// ChemAxon extended SMILES.
    Cxsmiles = 10,
    /// IUPAC International Chemical Identifier key.
    InchiKey = 11,
    /// XYZ molecule file.
    Xyz = 12,
    /// UniProt ID (for enzymes).
    UniprotId = 13,
    /// Protein Data Bank ID (for enzymes).
    PdbId = 14,
    /// Amino acid sequence (for enzymes).
    AminoAcidSequence = 15,
    /// HELM notation; see https://www.pistoiaalliance.org/helm-notation/.
    Helm = 16,
    /// A human-readable compound title.
    Title = 17,
    /// SMILES with stereochemistry retained.
    IsomericSmiles = 18,
}

impl CompoundIdentifierKind {
    /// Numeric code for this kind, stable across versions.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a numeric code, mapping anything unrecognized to `Unspecified`
    /// rather than failing, so new codes can be added compatibly.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Custom,
            2 => Self::Smiles,
            3 => Self::Inchi,
            4 => Self::Molblock,
            5 => Self::IupacName,
            6 => Self::Name,
            7 => Self::CasNumber,
            8 => Self::PubchemCid,
            9 => Self::ChemspiderId,
            10 => Self::Cxsmiles,
            11 => Self::InchiKey,
            12 => Self::Xyz,
            13 => Self::UniprotId,
            14 => Self::PdbId,
            15 => Self::AminoAcidSequence,
            16 => Self::Helm,
            17 => Self::Title,
            18 => Self::IsomericSmiles,
            _ => Self::Unspecified,
        }
    }
}

/// A compound identifier: a `(kind, value, details?)` triple.
///
/// `value` is opaque to this type; its interpretation is entirely determined
/// by `kind`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CompoundIdentifier {
    pub kind: CompoundIdentifierKind,
    pub value: String,
    pub details: Option<String>,
}

impl CompoundIdentifier {
    /// Construct an identifier with no `details` annotation.
    ///
    /// # Panics
    ///
    /// Panics if `value` is empty — `value` is required to be non-empty per
    /// the data model.
    pub fn new(kind: CompoundIdentifierKind, value: impl Into<String>) -> Self {
        let value = value.into();
        assert!(!value.is_empty(), "CompoundIdentifier value must be non-empty");
        Self {
            kind,
            value,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Fallible equality check: `Ok(true/false)` if both identifiers share a
    /// `kind`, `Err` if they don't.
    ///
    /// Comparing identifiers of differing kind is a programming error in the
    /// data model's contract; [`PartialEq`] panics on that condition, this
    /// method gives the caller a way to check first instead.
    pub fn identical_to(&self, other: &Self) -> Result<bool, KindMismatch> {
        if self.kind != other.kind {
            return Err(KindMismatch {
                left: self.kind,
                right: other.kind,
            });
        }
        Ok(self.value == other.value)
    }
}

/// Returned by [`CompoundIdentifier::identical_to`] when the two identifiers
/// being compared have different kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot compare identifiers of differing kind ({left:?} != {right:?})")]
pub struct KindMismatch {
    pub left: CompoundIdentifierKind,
    pub right: CompoundIdentifierKind,
}

impl PartialEq for CompoundIdentifier {
    /// Two identifiers are equal iff their `kind`s are identical and their
    /// `value`s are byte-identical.
    ///
    /// # Panics
    ///
    /// Panics if `self.kind != other.kind` — comparing identifiers of
    /// differing kind is a programming error and must fail loudly rather
    /// than silently return `false`. Use [`Self::identical_to`] for a
    /// fallible comparison.
    fn eq(&self, other: &Self) -> bool {
        self.identical_to(other).unwrap_or_else(|e| panic!("{e}"))
    }
}

impl Eq for CompoundIdentifier {}

impl fmt::Display for CompoundIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.value)
    }
}
