use std::fmt;
use std::str::FromStr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DocumentError, Result};

/// Characters escaped when rendering the path component in string form
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'?')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\');

/// A structured document location: scheme, optional authority, and a
/// `/`-separated path.
///
/// The filesystem rendering of the path is computed once at construction and
/// exposed through [`fs_path`](Self::fs_path); selector patterns are matched
/// against that rendering. Instances are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentUri {
    scheme: String,
    authority: String,
    path: String,
    fs_path: String,
}

impl DocumentUri {
    /// Parse a URI string such as `file:///src/lib.rs` or
    /// `untitled:Untitled-1`. Percent-escapes in the path are decoded.
    pub fn parse(input: &str) -> Result<Self> {
        let url = url::Url::parse(input).map_err(|source| DocumentError::InvalidUri {
            input: input.to_owned(),
            source,
        })?;
        let path = percent_decode_str(url.path())
            .decode_utf8()
            .map_err(|_| DocumentError::InvalidEncoding(url.path().to_owned()))?
            .into_owned();
        Ok(Self::assemble(
            url.scheme().to_owned(),
            authority_of(&url),
            path,
        ))
    }

    /// Build a `file:` URI from a filesystem path.
    ///
    /// Backslashes are folded to `/`, a UNC prefix (`//server/share`) becomes
    /// the authority, and a leading `/` is ensured so that relative paths
    /// still yield a well-formed URI.
    pub fn file(path: impl Into<String>) -> Self {
        let mut path = path.into().replace('\\', "/");
        let mut authority = String::new();
        if let Some(unc) = path.strip_prefix("//") {
            match unc.find('/') {
                Some(idx) => {
                    authority = unc[..idx].to_owned();
                    path = unc[idx..].to_owned();
                }
                None => {
                    authority = unc.to_owned();
                    path = "/".to_owned();
                }
            }
        }
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self::assemble("file".to_owned(), authority, path)
    }

    /// Build a URI from a scheme and a raw path, without an authority.
    ///
    /// The scheme must match `[A-Za-z][A-Za-z0-9+.-]*` and is lowercased.
    pub fn from_parts(scheme: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let scheme = scheme.into();
        validate_scheme(&scheme)?;
        Ok(Self::assemble(
            scheme.to_ascii_lowercase(),
            String::new(),
            path.into(),
        ))
    }

    fn assemble(scheme: String, authority: String, path: String) -> Self {
        let fs_path = fs_path_of(&scheme, &authority, &path, std::path::MAIN_SEPARATOR);
        Self {
            scheme,
            authority,
            path,
            fs_path,
        }
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// The decoded, `/`-separated path component
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Filesystem rendering of the path: platform separators, drive letters
    /// lowercased (`/C:/x` becomes `c:\x` on Windows, `c:/x` elsewhere), and
    /// `file` URIs with an authority rendered as UNC paths.
    #[must_use]
    pub fn fs_path(&self) -> &str {
        &self.fs_path
    }
}

fn validate_scheme(scheme: &str) -> Result<()> {
    let mut chars = scheme.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DocumentError::InvalidScheme(scheme.to_owned()))
    }
}

fn authority_of(url: &url::Url) -> String {
    let mut authority = String::new();
    if !url.username().is_empty() {
        authority.push_str(url.username());
        if let Some(password) = url.password() {
            authority.push(':');
            authority.push_str(password);
        }
        authority.push('@');
    }
    if let Some(host) = url.host_str() {
        authority.push_str(host);
    }
    if let Some(port) = url.port() {
        authority.push(':');
        authority.push_str(&port.to_string());
    }
    authority
}

fn fs_path_of(scheme: &str, authority: &str, path: &str, separator: char) -> String {
    let bytes = path.as_bytes();
    let mut value = if scheme == "file" && !authority.is_empty() && path.len() > 1 {
        format!("//{authority}{path}")
    } else if bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':'
    {
        let mut drive = String::with_capacity(path.len() - 1);
        drive.push(bytes[1].to_ascii_lowercase() as char);
        drive.push_str(&path[2..]);
        drive
    } else {
        path.to_owned()
    };
    if separator == '\\' {
        value = value.replace('/', "\\");
    }
    value
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if !self.authority.is_empty() || self.scheme == "file" {
            write!(f, "//{}", self.authority)?;
        }
        write!(f, "{}", utf8_percent_encode(&self.path, PATH_ESCAPE))
    }
}

impl FromStr for DocumentUri {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DocumentUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
