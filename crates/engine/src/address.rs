//! Absolute address value type
//!
//! An [`Address`] is the full location the engine reads and writes:
//! `scheme://authority/path?query#fragment`. The engine only ever replaces
//! the query component; scheme, authority, path and fragment pass through
//! every write untouched.
//!
//! An empty path normalizes to `/`, so `https://example.com` and
//! `https://example.com/` are the same address and produce the same href.

use std::fmt;
use thiserror::Error;

/// Address parse failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    /// No `scheme://` separator in the input
    #[error("missing scheme separator")]
    MissingScheme,
    /// Scheme is empty or contains invalid characters
    #[error("invalid scheme '{0}'")]
    InvalidScheme(String),
    /// Nothing between `://` and the path
    #[error("empty authority")]
    EmptyAuthority,
}

/// An absolute URL-like value: origin + path + query (+ fragment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    scheme: String,
    authority: String,
    path: String,
    query: String,
    fragment: Option<String>,
}

impl Address {
    /// Parse an absolute address string.
    pub fn parse(input: &str) -> Result<Address, AddressParseError> {
        let (scheme, rest) = input
            .split_once("://")
            .ok_or(AddressParseError::MissingScheme)?;
        if !is_valid_scheme(scheme) {
            return Err(AddressParseError::InvalidScheme(scheme.to_string()));
        }

        let authority_end = rest
            .find(|c| matches!(c, '/' | '?' | '#'))
            .unwrap_or(rest.len());
        let authority = &rest[..authority_end];
        if authority.is_empty() {
            return Err(AddressParseError::EmptyAuthority);
        }

        let mut remainder = &rest[authority_end..];
        let mut fragment = None;
        if let Some((before, frag)) = remainder.split_once('#') {
            fragment = Some(frag.to_string());
            remainder = before;
        }
        let (path, query) = match remainder.split_once('?') {
            Some((p, q)) => (p, q),
            None => (remainder, ""),
        };
        let path = if path.is_empty() { "/" } else { path };

        Ok(Address {
            scheme: scheme.to_string(),
            authority: authority.to_string(),
            path: path.to_string(),
            query: query.to_string(),
            fragment,
        })
    }

    /// Whether a configured string is an absolute address on its own.
    pub fn is_absolute(input: &str) -> bool {
        Address::parse(input).is_ok()
    }

    /// Complete a relative address (a path-form string) against an origin.
    pub fn parse_relative(relative: &str, origin: &str) -> Result<Address, AddressParseError> {
        let origin = origin.trim_end_matches('/');
        let joined = if relative.starts_with('/') {
            format!("{}{}", origin, relative)
        } else {
            format!("{}/{}", origin, relative)
        };
        Address::parse(&joined)
    }

    /// The scheme component
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The authority component (host and optional port)
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// `scheme://authority`
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// The path component (always starts with `/`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw query component, without the leading `?`
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The fragment component, without the leading `#`
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// A copy of this address with only the query component replaced
    pub fn with_query(&self, query: impl Into<String>) -> Address {
        Address {
            query: query.into(),
            ..self.clone()
        }
    }

    /// The full address string
    pub fn href(&self) -> String {
        let mut href = format!("{}://{}{}", self.scheme, self.authority, self.path);
        if !self.query.is_empty() {
            href.push('?');
            href.push_str(&self.query);
        }
        if let Some(fragment) = &self.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.href())
    }
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
