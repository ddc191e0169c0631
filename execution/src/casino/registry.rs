//! Table registry: maps provider table ids to family descriptors.
//!
//! The registry provides:
//! - The built-in descriptor for every [`Family`]
//! - Exact, prefix and contains routes from table ids to families
//! - Disabled family filtering
//! - One-time validation of every descriptor and route
//!
//! # Example
//! ```rust
//! use tablebook_execution::casino::TableRegistry;
//! use tablebook_types::Family;
//!
//! let registry = TableRegistry::default();
//! let table = registry.resolve("29Baccarat").unwrap();
//! assert_eq!(table.family(), Family::Baccarat29);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use tablebook_types::{Family, HistoryEntry, Outcome, PlacedBet, RawRoundEvent};
use thiserror::Error;
use tracing::error;

use super::families::BUILTIN;
use super::grammar::{DecodeOptions, Grammar};
use super::payload::normalize_label;
use super::FamilyDescriptor;

/// How a route pattern is compared with a normalized table id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternKind {
    Exact,
    Prefix,
    Contains,
}

impl PatternKind {
    fn matches(&self, table_id: &str, pattern: &str) -> bool {
        match self {
            Self::Exact => table_id == pattern,
            Self::Prefix => table_id.starts_with(pattern),
            Self::Contains => table_id.contains(pattern),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Prefix => "prefix",
            Self::Contains => "contains",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown pattern kind: {0}")]
pub struct UnknownPatternKind(pub String);

impl FromStr for PatternKind {
    type Err = UnknownPatternKind;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "prefix" => Ok(Self::Prefix),
            "contains" => Ok(Self::Contains),
            _ => Err(UnknownPatternKind(value.to_string())),
        }
    }
}

/// One table-id pattern and the family it routes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub kind: PatternKind,
    /// Lowercased, trimmed pattern.
    pub pattern: String,
    pub family: Family,
}

/// Errors detected while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("empty {kind} pattern for family {family}")]
    EmptyPattern { kind: PatternKind, family: Family },
    #[error("{kind} pattern {pattern:?} routes to both {first} and {second}")]
    DuplicateRoute {
        kind: PatternKind,
        pattern: String,
        first: Family,
        second: Family,
    },
    #[error("family {family} pairs rule {rule} with an incompatible grammar")]
    IncompatibleRule { family: Family, rule: String },
    #[error("family {family} defines result code {code} twice")]
    DuplicateCode { family: Family, code: i64 },
    #[error("family {family} defines label {label:?} twice")]
    DuplicateLabel { family: Family, label: String },
    #[error("{kind} pattern {pattern:?} routes to disabled family {family}")]
    DisabledFamilyRoute {
        kind: PatternKind,
        pattern: String,
        family: Family,
    },
}

/// Immutable dispatch table from table ids to families.
///
/// Built once at startup and shared by reference; resolution never allocates beyond
/// normalizing the table id.
#[derive(Clone, Debug)]
pub struct TableRegistry {
    descriptors: Vec<FamilyDescriptor>,
    routes: Vec<Route>,
    /// Route indexes in resolution order.
    order: Vec<usize>,
    disabled: BTreeSet<Family>,
    options: DecodeOptions,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRegistry {
    /// Registry with every built-in family enabled and default decode options.
    ///
    /// Built-in descriptors go through the same validation as [`RegistryBuilder::build`].
    /// A descriptor that fails it is logged and left out.
    pub fn new() -> Self {
        let mut descriptors = Vec::with_capacity(BUILTIN.len());
        for descriptor in &BUILTIN {
            match validate_descriptor(descriptor) {
                Ok(()) => descriptors.push(*descriptor),
                Err(err) => error!(%err, "skipping invalid built-in descriptor"),
            }
        }
        let disabled = BTreeSet::new();
        let routes = builtin_routes(&descriptors, &disabled);
        Self::assemble(descriptors, routes, disabled, DecodeOptions::default())
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// List all built-in families.
    pub fn all_families() -> &'static [Family] {
        &Family::ALL
    }

    /// Built-in descriptor for a family, ignoring any registry configuration.
    pub fn builtin(family: Family) -> Option<&'static FamilyDescriptor> {
        BUILTIN
            .iter()
            .find(|descriptor| descriptor.family == family)
    }

    fn assemble(
        descriptors: Vec<FamilyDescriptor>,
        routes: Vec<Route>,
        disabled: BTreeSet<Family>,
        options: DecodeOptions,
    ) -> Self {
        let mut order: Vec<usize> = (0..routes.len()).collect();
        order.sort_by_key(|&idx| {
            let route = &routes[idx];
            (route.kind, std::cmp::Reverse(route.pattern.len()), idx)
        });
        Self {
            descriptors,
            routes,
            order,
            disabled,
            options,
        }
    }

    /// Resolve a provider table id. Matching is case-insensitive and ignores surrounding
    /// whitespace: exact routes first, then prefix, then contains, longest pattern first.
    pub fn resolve(&self, table_id: &str) -> Option<Table<'_>> {
        let table_id = table_id.trim().to_lowercase();
        if table_id.is_empty() {
            return None;
        }
        self.order
            .iter()
            .map(|&idx| &self.routes[idx])
            .find(|route| route.kind.matches(&table_id, &route.pattern))
            .and_then(|route| self.descriptor(route.family))
            .map(|descriptor| Table {
                descriptor,
                options: &self.options,
            })
    }

    /// Descriptor for an enabled family.
    pub fn descriptor(&self, family: Family) -> Option<&FamilyDescriptor> {
        if self.disabled.contains(&family) {
            return None;
        }
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.family == family)
    }

    /// Enabled families in declaration order.
    pub fn families(&self) -> Vec<Family> {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.family)
            .filter(|family| !self.disabled.contains(family))
            .collect()
    }

    pub fn is_enabled(&self, family: Family) -> bool {
        self.descriptor(family).is_some()
    }

    /// Routes in resolution order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.order.iter().map(|&idx| &self.routes[idx])
    }
}

/// Collects routes, disabled families and options, then validates them into a
/// [`TableRegistry`].
#[derive(Clone, Debug)]
pub struct RegistryBuilder {
    descriptors: Vec<FamilyDescriptor>,
    extra_routes: Vec<(PatternKind, String, Family)>,
    disabled: BTreeSet<Family>,
    options: DecodeOptions,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self {
            descriptors: BUILTIN.to_vec(),
            extra_routes: Vec::new(),
            disabled: BTreeSet::new(),
            options: DecodeOptions::default(),
        }
    }
}

impl RegistryBuilder {
    /// Adds a route on top of the built-in ones.
    pub fn route(mut self, kind: PatternKind, pattern: impl Into<String>, family: Family) -> Self {
        self.extra_routes.push((kind, pattern.into(), family));
        self
    }

    /// Replaces the built-in descriptor of `descriptor.family`.
    pub fn descriptor(mut self, descriptor: FamilyDescriptor) -> Self {
        match self
            .descriptors
            .iter_mut()
            .find(|existing| existing.family == descriptor.family)
        {
            Some(existing) => *existing = descriptor,
            None => self.descriptors.push(descriptor),
        }
        self
    }

    /// Disables a family. Its built-in routes are dropped.
    pub fn disable(mut self, family: Family) -> Self {
        self.disabled.insert(family);
        self
    }

    pub fn options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<TableRegistry, RegistryError> {
        for descriptor in &self.descriptors {
            validate_descriptor(descriptor)?;
        }

        let mut routes = builtin_routes(&self.descriptors, &self.disabled);
        for (kind, pattern, family) in &self.extra_routes {
            let pattern = normalize_label(pattern);
            if self.disabled.contains(family) {
                return Err(RegistryError::DisabledFamilyRoute {
                    kind: *kind,
                    pattern,
                    family: *family,
                });
            }
            routes.push(Route {
                kind: *kind,
                pattern,
                family: *family,
            });
        }

        let mut seen: HashMap<(PatternKind, String), Family> = HashMap::new();
        let mut deduped = Vec::with_capacity(routes.len());
        for route in routes {
            if route.pattern.is_empty() {
                return Err(RegistryError::EmptyPattern {
                    kind: route.kind,
                    family: route.family,
                });
            }
            match seen.get(&(route.kind, route.pattern.clone())) {
                Some(first) if *first == route.family => continue,
                Some(first) => {
                    return Err(RegistryError::DuplicateRoute {
                        kind: route.kind,
                        pattern: route.pattern,
                        first: *first,
                        second: route.family,
                    });
                }
                None => {
                    seen.insert((route.kind, route.pattern.clone()), route.family);
                    deduped.push(route);
                }
            }
        }

        Ok(TableRegistry::assemble(
            self.descriptors,
            deduped,
            self.disabled,
            self.options,
        ))
    }
}

fn builtin_routes(descriptors: &[FamilyDescriptor], disabled: &BTreeSet<Family>) -> Vec<Route> {
    descriptors
        .iter()
        .filter(|descriptor| !disabled.contains(&descriptor.family))
        .flat_map(|descriptor| {
            descriptor.tables.iter().map(|(kind, pattern)| Route {
                kind: *kind,
                pattern: normalize_label(pattern),
                family: descriptor.family,
            })
        })
        .collect()
}

fn validate_descriptor(descriptor: &FamilyDescriptor) -> Result<(), RegistryError> {
    let family = descriptor.family;
    if !descriptor.rule.accepts(&descriptor.grammar) {
        return Err(RegistryError::IncompatibleRule {
            family,
            rule: format!("{:?}", descriptor.rule),
        });
    }
    if let Grammar::FixedCode { codes } = descriptor.grammar {
        let mut seen_codes = HashSet::new();
        let mut seen_labels = HashSet::new();
        for entry in codes {
            if !seen_codes.insert(entry.code) {
                return Err(RegistryError::DuplicateCode {
                    family,
                    code: entry.code,
                });
            }
            if !seen_labels.insert(normalize_label(entry.label)) {
                return Err(RegistryError::DuplicateLabel {
                    family,
                    label: entry.label.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// A resolved table: one family's descriptor plus the registry's decode options.
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    descriptor: &'a FamilyDescriptor,
    options: &'a DecodeOptions,
}

impl<'a> Table<'a> {
    pub fn family(&self) -> Family {
        self.descriptor.family
    }

    pub fn descriptor(&self) -> &'a FamilyDescriptor {
        self.descriptor
    }

    pub fn decode(&self, event: &RawRoundEvent) -> Option<Outcome> {
        self.descriptor.decode(event, self.options)
    }

    pub fn matches(&self, bet: &PlacedBet, outcome: &Outcome) -> bool {
        self.descriptor.matches(bet, outcome)
    }

    pub fn history(&self, events: &[RawRoundEvent]) -> Vec<HistoryEntry> {
        self.descriptor.history(events, self.options)
    }
}
