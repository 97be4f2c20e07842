//! Synonym table loaded from a line-oriented resource.
//!
//! Each line holds one group of interchangeable keywords:
//!
//! ```text
//! 'py' 'python'
//! 'k8s' 'kubernetes' 'kube'
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{JnError, Result};

const GROUP_DELIMITER: &str = "' '";

/// An ordered set of interchangeable keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymGroup {
    members: Vec<String>,
}

impl SynonymGroup {
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

/// Keyword → group lookup. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
    by_keyword: HashMap<String, usize>,
    case_insensitive: bool,
}

impl SynonymTable {
    /// A table with no groups; compiling against it only applies aliases.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the resource at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(JnError::ResourceNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let table = Self::parse(&raw)?;
        tracing::debug!(
            path = %path.display(),
            groups = table.groups.len(),
            keywords = table.by_keyword.len(),
            "loaded synonym table"
        );
        Ok(table)
    }

    /// Parse resource content. A keyword listed in several groups maps to the last one.
    pub fn parse(content: &str) -> Result<Self> {
        let mut groups = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            groups.push(parse_group(idx + 1, trimmed)?);
        }
        Ok(Self::from_groups(groups, false))
    }

    /// Match keywords regardless of ASCII/Unicode case.
    #[must_use]
    pub fn case_insensitive(self, enabled: bool) -> Self {
        Self::from_groups(self.groups, enabled)
    }

    fn from_groups(groups: Vec<SynonymGroup>, case_insensitive: bool) -> Self {
        let mut by_keyword = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            for member in &group.members {
                by_keyword.insert(normalize(member, case_insensitive), idx);
            }
        }
        Self {
            groups,
            by_keyword,
            case_insensitive,
        }
    }

    /// The group containing `keyword`, if any.
    #[must_use]
    pub fn group_for(&self, keyword: &str) -> Option<&SynonymGroup> {
        let key = normalize(keyword, self.case_insensitive);
        self.by_keyword.get(key.as_str()).map(|&idx| &self.groups[idx])
    }

    #[must_use]
    pub const fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    #[must_use]
    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn parse_group(line: usize, trimmed: &str) -> Result<SynonymGroup> {
    let malformed = || JnError::MalformedGroup {
        line,
        content: trimmed.to_string(),
    };

    if trimmed.len() < 2 {
        return Err(malformed());
    }
    let inner = trimmed
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(malformed)?;

    let members: Vec<String> = inner.split(GROUP_DELIMITER).map(str::to_string).collect();
    if members.iter().any(|member| member.is_empty()) {
        return Err(malformed());
    }
    Ok(SynonymGroup { members })
}

fn normalize(keyword: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        keyword.to_lowercase()
    } else {
        keyword.to_string()
    }
}
