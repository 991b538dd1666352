//! Tagged value union for gene payloads.

use crate::error::EvolveError;

/// The value a gene carries on one organism.
///
/// Scalar variants hold one payload; [`Seq`](GeneValue::Seq) holds an
/// ordered sequence of element values, used by sequence and permutation
/// genes. Two organisms may hold equal values and still be distinct
/// individuals — identity lives on the organism, never on the value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Seq(Vec<GeneValue>),
}

impl GeneValue {
    /// Human-readable kind name, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            GeneValue::Bool(_) => "bool",
            GeneValue::Int(_) => "int",
            GeneValue::Float(_) => "float",
            GeneValue::Char(_) => "char",
            GeneValue::Seq(_) => "sequence",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            GeneValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            GeneValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            GeneValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            GeneValue::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[GeneValue]> {
        match self {
            GeneValue::Seq(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the value as a sequence, or reports a kind mismatch.
    pub(crate) fn into_seq(self) -> Result<Vec<GeneValue>, EvolveError> {
        match self {
            GeneValue::Seq(s) => Ok(s),
            other => Err(kind_mismatch("sequence", &other)),
        }
    }
}

/// Builds the kind-mismatch error for a value that should have been
/// of `expected` kind.
pub(crate) fn kind_mismatch(expected: &'static str, actual: &GeneValue) -> EvolveError {
    EvolveError::KindMismatch {
        expected,
        actual: actual.kind(),
    }
}
