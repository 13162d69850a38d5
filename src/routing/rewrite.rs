//! Path rewriting.
//!
//! Rules are tried in declaration order; only the first rule whose pattern
//! matches is applied, and it replaces the first occurrence. The query string
//! is never touched.

use std::borrow::Cow;

use regex::Regex;

use crate::config::RewriteRuleConfig;

#[derive(Debug, Clone)]
struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

/// Compiled rewrite rules for a single route.
#[derive(Debug, Clone)]
pub struct PathRewrite {
    rules: Vec<RewriteRule>,
}

impl PathRewrite {
    /// Compile the configured rules. Returns `None` when there are none.
    ///
    /// On failure the offending pattern is returned with the regex error.
    pub fn compile(
        rules: &[RewriteRuleConfig],
    ) -> Result<Option<Self>, (String, regex::Error)> {
        if rules.is_empty() {
            return Ok(None);
        }

        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|pattern| RewriteRule {
                        pattern,
                        replacement: rule.replacement.clone(),
                    })
                    .map_err(|e| (rule.pattern.clone(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Self { rules }))
    }

    /// Rewrite a request path. An empty result becomes `/`, and a result
    /// without a leading slash gets one.
    pub fn apply<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let Some(rule) = self.rules.iter().find(|r| r.pattern.is_match(path)) else {
            return Cow::Borrowed(path);
        };

        let rewritten = rule.pattern.replacen(path, 1, rule.replacement.as_str());
        if rewritten.starts_with('/') {
            Cow::Owned(rewritten.into_owned())
        } else {
            Cow::Owned(format!("/{}", rewritten))
        }
    }
}
