//! Field identifier to wire-tag naming convention.
//!
//! `FingerprintMD5` becomes `fingerprint_md5`: capitalized words are split,
//! lowercased, and joined with underscores. Runs of capitals that form a
//! known acronym stay together; any other capital run splits per letter.

use std::collections::BTreeMap;

/// Acronyms recognised out of the box. Projects extend the table through
/// `WiretagConfig::acronyms`.
pub const DEFAULT_ACRONYMS: &[&str] = &[
    "ACL", "API", "ASCII", "CA", "CPU", "CSRF", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP",
    "HTTPS", "ID", "IDP", "IP", "JSON", "JWKS", "JWT", "LDAP", "MD5", "MFA", "OTP", "QR", "RPC",
    "SAML", "SHA1", "SHA256", "SHA512", "SMTP", "SQL", "SSH", "SSL", "TCP", "TLS", "TOTP", "TTL",
    "UDP", "UI", "UID", "URI", "URL", "UTF8", "UUID", "XML", "XSRF", "XSS", "YAML",
];

/// Substring rewrites applied after the words are joined.
pub const DEFAULT_REWRITES: &[(&str, &str)] = &[("open_ssh", "openssh")];

/// Acronym table and post-join rewrites used by [`NamingRules::expected_tag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingRules {
    /// Sorted longest-first so the longest acronym wins.
    acronyms: Vec<Vec<char>>,
    rewrites: BTreeMap<String, String>,
}

impl Default for NamingRules {
    fn default() -> Self {
        let rewrites = DEFAULT_REWRITES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        Self::from_parts(DEFAULT_ACRONYMS.iter().copied(), rewrites)
    }
}

impl NamingRules {
    fn from_parts<'a>(
        acronyms: impl IntoIterator<Item = &'a str>,
        rewrites: BTreeMap<String, String>,
    ) -> Self {
        let mut table: Vec<Vec<char>> = acronyms
            .into_iter()
            .filter(|a| !a.is_empty())
            .map(|a| a.to_uppercase().chars().collect())
            .collect();
        table.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        table.dedup();
        Self {
            acronyms: table,
            rewrites,
        }
    }

    /// Default rules extended with project-specific acronyms and rewrites.
    /// Extra rewrites override defaults with the same key.
    pub fn with_extensions(extra_acronyms: &[String], extra_rewrites: &BTreeMap<String, String>) -> Self {
        let mut rewrites: BTreeMap<String, String> = DEFAULT_REWRITES
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        rewrites.extend(extra_rewrites.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self::from_parts(
            DEFAULT_ACRONYMS
                .iter()
                .copied()
                .chain(extra_acronyms.iter().map(String::as_str)),
            rewrites,
        )
    }

    pub fn is_acronym(&self, word: &str) -> bool {
        let upper: Vec<char> = word.to_uppercase().chars().collect();
        self.acronyms.iter().any(|a| *a == upper)
    }

    /// Split an identifier into lowercase words.
    pub fn split_words(&self, identifier: &str) -> Vec<String> {
        let chars: Vec<char> = identifier.chars().collect();
        let mut words: Vec<String> = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == '_' {
                i += 1;
                continue;
            }

            if c.is_uppercase() {
                if let Some(len) = self.match_acronym(&chars[i..]) {
                    words.push(lower(&chars[i..i + len]));
                    i += len;
                    continue;
                }
                let mut j = i + 1;
                while j < chars.len() && is_word_tail(chars[j]) {
                    j += 1;
                }
                words.push(lower(&chars[i..j]));
                i = j;
                continue;
            }

            // Lowercase or digit run with no leading capital.
            let mut j = i;
            while j < chars.len() && is_word_tail(chars[j]) {
                j += 1;
            }
            if j == i {
                // Neither cased nor a digit: keep it attached to the run.
                j = i + 1;
            }
            let run = lower(&chars[i..j]);
            match words.last_mut() {
                Some(prev) if c.is_ascii_digit() => prev.push_str(&run),
                _ => words.push(run),
            }
            i = j;
        }

        words
    }

    /// Expected wire tag for an exported field identifier.
    ///
    /// # Panics
    ///
    /// Panics on an empty identifier; callers only pass declared field names.
    pub fn expected_tag(&self, identifier: &str) -> String {
        assert!(
            !identifier.is_empty(),
            "expected_tag called with an empty field identifier"
        );
        let mut tag = self.split_words(identifier).join("_");
        for (from, to) in &self.rewrites {
            if tag.contains(from.as_str()) {
                tag = tag.replace(from.as_str(), to);
            }
        }
        tag
    }

    /// Length of the acronym starting at `rest[0]`, including a plural `s`.
    fn match_acronym(&self, rest: &[char]) -> Option<usize> {
        for acronym in &self.acronyms {
            let len = acronym.len();
            if rest.len() < len || rest[..len] != acronym[..] {
                continue;
            }
            match rest.get(len) {
                None => return Some(len),
                Some(&next) if next == '_' || next.is_ascii_digit() || next.is_uppercase() => {
                    return Some(len)
                }
                Some(&'s') => match rest.get(len + 1) {
                    None => return Some(len + 1),
                    Some(&after) if after == '_' || after.is_uppercase() => return Some(len + 1),
                    _ => continue,
                },
                _ => continue,
            }
        }
        None
    }
}

fn is_word_tail(c: char) -> bool {
    c.is_ascii_digit() || (c.is_alphabetic() && !c.is_uppercase())
}

fn lower(chars: &[char]) -> String {
    chars.iter().flat_map(|c| c.to_lowercase()).collect()
}

/// Expected tag under the default rules.
pub fn expected_tag(identifier: &str) -> String {
    NamingRules::default().expected_tag(identifier)
}

/// Re-join tag words as a PascalCase identifier (`fingerprint_md5` ->
/// `FingerprintMd5`).
pub fn to_pascal_case(tag: &str) -> String {
    tag.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
