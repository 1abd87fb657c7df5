use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Storage backend types
///
/// Defined in core because configuration selects a backend per asset class and
/// every stored asset records which backend holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "s3" => Ok(StorageBackend::S3),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

/// How the object storage backend renders the location it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum S3LocationStyle {
    /// `s3://{bucket}/{key}`
    #[default]
    Uri,
    /// Public HTTPS URL (virtual-hosted AWS style, or path style under a custom endpoint)
    Public,
}

impl FromStr for S3LocationStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uri" => Ok(S3LocationStyle::Uri),
            "public" => Ok(S3LocationStyle::Public),
            _ => Err(anyhow::anyhow!("Invalid S3 location style: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backends_case_insensitively() {
        assert_eq!("LOCAL".parse::<StorageBackend>().unwrap(), StorageBackend::Local);
        assert_eq!(" s3 ".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert!("nfs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn backend_display_round_trips() {
        for backend in [StorageBackend::Local, StorageBackend::S3] {
            assert_eq!(backend.to_string().parse::<StorageBackend>().unwrap(), backend);
        }
    }

    #[test]
    fn location_style_defaults_to_uri() {
        assert_eq!(S3LocationStyle::default(), S3LocationStyle::Uri);
        assert_eq!("public".parse::<S3LocationStyle>().unwrap(), S3LocationStyle::Public);
    }
}
