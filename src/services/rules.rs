use indexmap::IndexMap;
use regex::{Captures, NoExpand, Regex};
use serde::{Deserialize, Serialize};

/// Canonical white produced by the palette
pub const WHITE: &str = "#ffffff";

/// Canonical black produced by the palette
pub const BLACK: &str = "#000000";

/// How the rule table is applied to a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// One combined scan; every attribute occurrence is rewritten at most once
    #[default]
    SinglePass,
    /// Each rule runs over the previous rule's output, so colors produced by
    /// an earlier rule can be rewritten again by a later one
    Cascade,
}

/// SVG attribute a rule targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Fill,
    Stroke,
}

impl Attribute {
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Fill => "fill",
            Attribute::Stroke => "stroke",
        }
    }
}

/// Rule groups, in the order they appear in the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGroup {
    /// Dark backgrounds become white
    DarkBackground,
    /// Text and pale fills become black
    LightText,
    /// Cyan-blue and violet strokes become black
    AccentStroke,
    /// Green, red, yellow and one more dark background
    AccentFill,
    /// Navy and slate strokes become black
    MutedStroke,
}

/// How a rule recognises the color value
#[derive(Debug, Clone, Copy)]
enum ColorMatch {
    /// A literal hex color, matched case-sensitively
    Exact(&'static str),
    /// A regex fragment for the value between the quotes
    Pattern(&'static str),
}

struct RuleDef {
    group: RuleGroup,
    attribute: Attribute,
    color: ColorMatch,
    target: &'static str,
    exempt: &'static [&'static str],
}

const fn rule(
    group: RuleGroup,
    attribute: Attribute,
    color: ColorMatch,
    target: &'static str,
) -> RuleDef {
    RuleDef {
        group,
        attribute,
        color,
        target,
        exempt: &[],
    }
}

use Attribute::{Fill, Stroke};
use ColorMatch::{Exact, Pattern};
use RuleGroup::*;

// Declaration order is significant in cascade mode and decides ties in
// single-pass mode.
const PALETTE: [RuleDef; 20] = [
    RuleDef {
        exempt: &[BLACK],
        ..rule(DarkBackground, Fill, Pattern("#0[0-9a-fA-F]{5}"), WHITE)
    },
    rule(DarkBackground, Fill, Exact("#071022"), WHITE),
    rule(DarkBackground, Fill, Exact("#081022"), WHITE),
    rule(DarkBackground, Fill, Exact("#0b1320"), WHITE),
    rule(DarkBackground, Fill, Exact("#111827"), WHITE),
    rule(DarkBackground, Fill, Exact("#0f172a"), WHITE),
    rule(LightText, Fill, Exact("#fff"), BLACK),
    rule(LightText, Fill, Exact("#ffffff"), BLACK),
    rule(LightText, Fill, Exact("#e6eef6"), BLACK),
    rule(LightText, Fill, Exact("#9aa9b2"), BLACK),
    rule(LightText, Fill, Exact("#cfeefd"), BLACK),
    rule(LightText, Fill, Exact("#dcd7ff"), BLACK),
    rule(AccentStroke, Stroke, Exact("#38bdf8"), BLACK),
    rule(AccentStroke, Stroke, Exact("#a78bfa"), BLACK),
    rule(AccentFill, Fill, Exact("#10b981"), WHITE),
    rule(AccentFill, Fill, Exact("#ef4444"), BLACK),
    rule(AccentFill, Fill, Exact("#ffdd57"), WHITE),
    rule(AccentFill, Fill, Exact("#071427"), WHITE),
    rule(MutedStroke, Stroke, Exact("#123146"), BLACK),
    rule(MutedStroke, Stroke, Exact("#475569"), BLACK),
];

/// A compiled `attribute="#color"` substitution
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    group: RuleGroup,
    attribute: Attribute,
    label: String,
    pattern: Regex,
    replacement: String,
    exempt: Vec<String>,
}

impl SubstitutionRule {
    fn compile(def: &RuleDef) -> Result<Self, regex::Error> {
        let attr = def.attribute.name();
        let (value, fragment) = match def.color {
            Exact(color) => (color.to_string(), regex::escape(color)),
            Pattern(fragment) => (fragment.to_string(), fragment.to_string()),
        };

        Ok(Self {
            group: def.group,
            attribute: def.attribute,
            label: format!("{}={}", attr, value),
            pattern: Regex::new(&format!(r#"{}="{}""#, attr, fragment))?,
            replacement: format!(r#"{}="{}""#, attr, def.target),
            exempt: def
                .exempt
                .iter()
                .map(|color| format!(r#"{}="{}""#, attr, color))
                .collect(),
        })
    }

    pub fn group(&self) -> RuleGroup {
        self.group
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    /// Human-readable `attribute=color` label, unique within the palette
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Full replacement text, e.g. `fill="#ffffff"`
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    fn is_exempt(&self, occurrence: &str) -> bool {
        self.exempt.iter().any(|e| e == occurrence)
    }

    /// True when this rule would rewrite exactly `occurrence`
    fn claims(&self, occurrence: &str) -> bool {
        !self.is_exempt(occurrence)
            && self
                .pattern
                .find(occurrence)
                .is_some_and(|m| m.start() == 0 && m.end() == occurrence.len())
    }
}

/// Outcome of running the rule table over one document
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub content: String,
    pub replacements: usize,
    /// Replacement count per rule label, in declaration order
    pub per_rule: IndexMap<String, usize>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        self.replacements > 0
    }
}

/// Ordered table of substitution rules
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
    combined: Regex,
}

impl RuleSet {
    /// Compile the built-in black and white palette
    pub fn palette() -> Result<Self, regex::Error> {
        let rules = PALETTE
            .iter()
            .map(SubstitutionRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        // All patterns end at the closing quote, so alternatives that match
        // at the same offset always cover the same span and the first
        // declared rule wins.
        let alternation = rules
            .iter()
            .map(|r| format!("(?:{})", r.pattern.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let combined = Regex::new(&alternation)?;

        tracing::debug!("Compiled {} substitution rules", rules.len());
        Ok(Self { rules, combined })
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to `content` using the given mode
    pub fn apply(&self, content: &str, mode: ApplyMode) -> Rewrite {
        match mode {
            ApplyMode::SinglePass => self.apply_single_pass(content),
            ApplyMode::Cascade => self.apply_cascade(content),
        }
    }

    fn empty_tally(&self) -> IndexMap<String, usize> {
        self.rules.iter().map(|r| (r.label.clone(), 0)).collect()
    }

    fn apply_single_pass(&self, content: &str) -> Rewrite {
        let mut per_rule = self.empty_tally();
        let mut replacements = 0;

        let rewritten = self.combined.replace_all(content, |caps: &Captures| {
            let occurrence = &caps[0];
            match self.rules.iter().find(|r| r.claims(occurrence)) {
                Some(rule) => {
                    replacements += 1;
                    if let Some(count) = per_rule.get_mut(&rule.label) {
                        *count += 1;
                    }
                    rule.replacement.clone()
                }
                // only exempt colors get here
                None => occurrence.to_string(),
            }
        });

        Rewrite {
            content: rewritten.into_owned(),
            replacements,
            per_rule,
        }
    }

    fn apply_cascade(&self, content: &str) -> Rewrite {
        let mut per_rule = self.empty_tally();
        let mut replacements = 0;
        let mut current = content.to_string();

        for rule in &self.rules {
            let hits = rule
                .pattern
                .find_iter(&current)
                .filter(|m| !rule.is_exempt(m.as_str()))
                .count();
            if hits == 0 {
                continue;
            }

            current = if rule.exempt.is_empty() {
                rule.pattern
                    .replace_all(&current, NoExpand(&rule.replacement))
                    .into_owned()
            } else {
                rule.pattern
                    .replace_all(&current, |caps: &Captures| {
                        if rule.is_exempt(&caps[0]) {
                            caps[0].to_string()
                        } else {
                            rule.replacement.clone()
                        }
                    })
                    .into_owned()
            };

            tracing::trace!("Rule {} rewrote {} occurrence(s)", rule.label, hits);
            replacements += hits;
            if let Some(count) = per_rule.get_mut(&rule.label) {
                *count += hits;
            }
        }

        Rewrite {
            content: current,
            replacements,
            per_rule,
        }
    }
}
