//! Supported identity documents and their fixed field schemas.

use std::fmt;
use std::str::FromStr;

/// A named field returned by the extraction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the response `data` object.
    pub key: &'static str,
    /// Human-readable label for display.
    pub label: &'static str,
}

const AADHAAR_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "name", label: "Name" },
    FieldSpec { key: "dob", label: "Date of Birth" },
    FieldSpec { key: "gender", label: "Gender" },
    FieldSpec { key: "aadhaar_number", label: "Aadhaar Number" },
    FieldSpec { key: "address", label: "Address" },
];

const PAN_FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "name", label: "Name" },
    FieldSpec { key: "father_name", label: "Father's Name" },
    FieldSpec { key: "dob", label: "Date of Birth" },
    FieldSpec { key: "pan_number", label: "PAN Number" },
];

/// The kind of identity document being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Aadhaar,
    Pan,
}

impl DocumentKind {
    pub fn all() -> &'static [DocumentKind] {
        &[DocumentKind::Aadhaar, DocumentKind::Pan]
    }

    /// Lowercase identifier used in endpoints and export file names.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Pan => "pan",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar Card",
            Self::Pan => "PAN Card",
        }
    }

    /// Default endpoint path on the extraction server.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Self::Aadhaar => "/extract_aadhaar",
            Self::Pan => "/extract_pan",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Aadhaar => AADHAAR_FIELDS,
            Self::Pan => PAN_FIELDS,
        }
    }

    /// File name used when downloading the cached result.
    pub fn export_filename(self) -> String {
        format!("{}_card_details.json", self.slug())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aadhaar" | "aadhar" | "a" => Ok(Self::Aadhaar),
            "pan" | "b" => Ok(Self::Pan),
            other => Err(format!("unknown document kind: {other}")),
        }
    }
}
