use std::fmt;
use std::str::FromStr;

use tracing::debug;
use url::Url;

use crate::error::ExportError;

/// URL schemes the exporter will hand to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
    Ftp,
    File,
}

impl Scheme {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "ftp" => Some(Self::Ftp),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    fn needs_host(self) -> bool {
        !matches!(self, Self::File)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Txt,
}

impl ExportFormat {
    /// Lowercase file extension, also used as the display name.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("csv") {
            Ok(Self::Csv)
        } else if s.eq_ignore_ascii_case("txt") {
            Ok(Self::Txt)
        } else {
            debug!("Rejected extension '{}'", s);
            Err(ExportError::InvalidExtension)
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A validated pair of command-line arguments.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub url: Url,
    pub format: ExportFormat,
}

/// Check both raw arguments. The URL is checked first, so it wins when both are bad.
pub fn validate(url: Option<&str>, extension: Option<&str>) -> Result<ExportRequest, ExportError> {
    let url = parse_url(url)?;
    let format = extension.ok_or(ExportError::InvalidExtension)?.parse()?;
    Ok(ExportRequest { url, format })
}

fn parse_url(raw: Option<&str>) -> Result<Url, ExportError> {
    let invalid = |reason: &str| {
        debug!("Rejected URL {:?}: {}", raw, reason);
        ExportError::InvalidUrl {
            reason: reason.to_string(),
        }
    };

    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Err(invalid("no URL given"));
    };
    if raw.trim() != raw {
        return Err(invalid("surrounding whitespace"));
    }

    let (scheme, rest) = raw
        .split_once("://")
        .ok_or_else(|| invalid("expected <scheme>://<address>"))?;
    let scheme =
        Scheme::parse(scheme).ok_or_else(|| invalid("scheme must be http, https, ftp or file"))?;
    if rest.is_empty() {
        return Err(invalid("nothing after the scheme"));
    }

    let url = Url::parse(raw).map_err(|e| invalid(&e.to_string()))?;

    if scheme.needs_host() && url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host"));
    }
    if scheme == Scheme::File && url.path().trim_matches('/').is_empty() {
        return Err(invalid("file URL has no path"));
    }

    Ok(url)
}
