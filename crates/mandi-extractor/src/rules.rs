//! Detection rules
//!
//! A [`RuleSet`] is an ordered list of tagged [`Rule`] variants. The
//! extractor walks it in tier order and never looks inside a rule, so rule
//! tables for other languages or new categories can be built from
//! configuration or by hand.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::normalize::title_case;
use mandi_domain::{Category, DetectionTier};
use regex::Regex;

/// Capture group holding the supplier name
pub const NAME_GROUP: &str = "name";

/// Capture group holding a location label
pub const LOCATION_GROUP: &str = "location";

/// A raw match produced by a rule, before filtering
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Title-cased supplier name
    pub name: String,

    /// Location label, for rules that infer one
    pub location: Option<String>,
}

impl Candidate {
    /// Text the length and stop-word checks apply to: the captured place
    /// for location matches, the name otherwise
    pub fn span(&self) -> &str {
        self.location.as_deref().unwrap_or(&self.name)
    }
}

/// One detection strategy
#[derive(Debug, Clone)]
pub enum Rule {
    /// Case-insensitive substring search against known names
    Brand {
        /// Known names, in the order they are tried
        names: Vec<String>,
    },

    /// A regular expression with a `name` group
    Pattern {
        /// Tier the rule reports under
        tier: DetectionTier,
        /// Only applies to posts of this category, when set
        scope: Option<Category>,
        /// Compiled pattern
        regex: Regex,
    },

    /// A regular expression with a `location` group; the supplier name is
    /// synthesized as "{location} {suffix}"
    Location {
        /// Compiled pattern
        regex: Regex,
        /// Word appended to the location
        suffix: String,
    },
}

impl Rule {
    /// Brand dictionary rule
    pub fn brand<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::Brand {
            names: names
                .into_iter()
                .map(Into::into)
                .filter(|n: &String| !n.trim().is_empty())
                .collect(),
        }
    }

    /// Pattern rule for a tier, optionally scoped to a category
    pub fn pattern(
        tier: DetectionTier,
        scope: Option<Category>,
        pattern: &str,
    ) -> Result<Self, ExtractorError> {
        let regex = compile(pattern, NAME_GROUP)?;
        Ok(Rule::Pattern { tier, scope, regex })
    }

    /// Location fallback rule
    pub fn location(pattern: &str, suffix: impl Into<String>) -> Result<Self, ExtractorError> {
        let regex = compile(pattern, LOCATION_GROUP)?;
        Ok(Rule::Location {
            regex,
            suffix: suffix.into(),
        })
    }

    /// Tier this rule reports under
    pub fn tier(&self) -> DetectionTier {
        match self {
            Rule::Brand { .. } => DetectionTier::Brand,
            Rule::Pattern { tier, .. } => *tier,
            Rule::Location { .. } => DetectionTier::Location,
        }
    }

    /// Whether the rule runs for a post of this category
    ///
    /// Scoped rules never run for posts without a category.
    pub fn applies_to(&self, category: Option<Category>) -> bool {
        match self {
            Rule::Pattern {
                scope: Some(scope), ..
            } => category == Some(*scope),
            _ => true,
        }
    }

    /// Every match in `content`, in text order (dictionary order for brands)
    pub fn matches(&self, content: &str) -> Vec<Candidate> {
        match self {
            Rule::Brand { names } => {
                let haystack = content.to_lowercase();
                names
                    .iter()
                    .filter(|name| haystack.contains(&name.trim().to_lowercase()))
                    .map(|name| Candidate {
                        name: title_case(name),
                        location: None,
                    })
                    .collect()
            }
            Rule::Pattern { regex, .. } => regex
                .captures_iter(content)
                .filter_map(|caps| caps.name(NAME_GROUP))
                .map(|m| Candidate {
                    name: title_case(m.as_str()),
                    location: None,
                })
                .filter(|c| !c.name.is_empty())
                .collect(),
            Rule::Location { regex, suffix } => regex
                .captures_iter(content)
                .filter_map(|caps| caps.name(LOCATION_GROUP))
                .map(|m| title_case(m.as_str()))
                .filter(|place| !place.is_empty())
                .map(|place| Candidate {
                    name: format!("{} {}", place, title_case(suffix)),
                    location: Some(place),
                })
                .collect(),
        }
    }
}

/// Compile a pattern and check it exposes the group its rule reads
pub(crate) fn compile(pattern: &str, group: &'static str) -> Result<Regex, ExtractorError> {
    let regex = Regex::new(pattern)
        .map_err(|e| ExtractorError::InvalidPattern(pattern.to_string(), e.to_string()))?;

    if !regex.capture_names().any(|n| n == Some(group)) {
        return Err(ExtractorError::MissingGroup(pattern.to_string(), group));
    }
    Ok(regex)
}

/// Rules ordered by tier precedence
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build the rule table described by a configuration
    pub fn compile(config: &ExtractorConfig) -> Result<Self, ExtractorError> {
        let mut rules = vec![Rule::brand(config.brands.iter().cloned())];

        for pattern in &config.direct_patterns {
            rules.push(Rule::pattern(DetectionTier::Direct, None, pattern)?);
        }

        for category in Category::ALL {
            for pattern in config.patterns_for(category) {
                rules.push(Rule::pattern(DetectionTier::Category, Some(category), pattern)?);
            }
        }

        for pattern in &config.location_patterns {
            rules.push(Rule::location(pattern, config.location_name_suffix.clone())?);
        }

        Ok(Self::from_rules(rules))
    }

    /// Build from hand-made rules; they are stably sorted into tier order
    pub fn from_rules(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(Rule::tier);
        Self { rules }
    }

    /// Add a rule after every existing rule of the same or earlier tier
    pub fn push(&mut self, rule: Rule) {
        let tier = rule.tier();
        let at = self.rules.partition_point(|r| r.tier() <= tier);
        self.rules.insert(at, rule);
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
