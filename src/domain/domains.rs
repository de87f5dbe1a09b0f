//! Entered domain names.

use std::fmt;

use crate::domain::AppError;

/// Ordered, non-empty list of domains in entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSet {
    domains: Vec<String>,
}

impl DomainSet {
    /// Build a set from entered values. Blank entries are dropped; duplicates are kept.
    pub fn new<I, S>(domains: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains: Vec<String> = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if domains.is_empty() {
            return Err(AppError::EmptyDomainSet);
        }
        Ok(Self { domains })
    }

    /// Parse a whitespace-separated prompt answer such as `"a.com b.com"`.
    pub fn parse(input: &str) -> Result<Self, AppError> {
        Self::new(input.split_whitespace())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Exact membership; `a.com` does not match `xa.com`.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.iter().any(|d| d == domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    pub fn first(&self) -> &str {
        &self.domains[0]
    }
}

impl fmt::Display for DomainSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.domains.join(", "))
    }
}
