//! Slider reconciliation engine
//!
//! Groups identically nicknamed sliders across graph sources, elects one
//! canonical range per group, and maps canonical edits back onto each
//! member's own range.
//!
//! Every [`SliderEngine::reconcile`] call rebuilds all group state from
//! scratch into temporaries and swaps it in at the end, so readers only ever
//! see a complete pass.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use super::notes::{self, NoteSet};
use super::range::{resolve_range, ResolvedRange};
use super::slug::SlugAllocator;
use super::source::{GraphMetadata, GraphSource, RawSlider};
use super::view::{
    CanonicalSource, MapResult, MemberStatus, MemberView, RangeView, SliderGroupView, SliderUpdate,
};
use crate::config::SyncConfig;
use crate::constants::group::{DEFAULT_PRIMARY_ROLE, FALLBACK_NODE_PREFIX};
use crate::error::Result;

/// Flattened slider awaiting grouping
struct Entry<'a> {
    graph_id: &'a str,
    metadata: &'a GraphMetadata,
    slider: &'a RawSlider,
    node_id: String,
    key: IdentityKey,
    order: usize,
}

/// Grouping identity
///
/// Nicknames and synthetic keys live in separate namespaces, so a slider
/// nicknamed `a:n1` never joins the unnamed slider `n1` of graph `a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum IdentityKey {
    Nick(String),
    Synthetic { graph_id: String, node_id: String },
}

impl IdentityKey {
    /// Text form published as the group key
    fn text(&self) -> String {
        match self {
            IdentityKey::Nick(nick) => nick.clone(),
            IdentityKey::Synthetic { graph_id, node_id } => format!("{}:{}", graph_id, node_id),
        }
    }
}

impl Entry<'_> {
    fn graph_label(&self) -> String {
        self.metadata
            .trimmed_label()
            .unwrap_or(self.graph_id)
            .to_string()
    }
}

#[derive(Debug, Clone)]
struct MemberRecord {
    graph_id: String,
    node_id: String,
    graph_label: String,
    role: Option<String>,
    label: Option<String>,
    nick_name: Option<String>,
    range: ResolvedRange,
    normalized_value: f64,
    notes: NoteSet,
}

impl MemberRecord {
    fn view(&self) -> MemberView {
        MemberView {
            graph_id: self.graph_id.clone(),
            node_id: self.node_id.clone(),
            graph_label: self.graph_label.clone(),
            role: self.role.clone(),
            label: self.label.clone(),
            nick_name: self.nick_name.clone(),
            value: self.range.value,
            normalized_value: self.normalized_value,
            range: RangeView {
                min: self.range.min,
                max: self.range.max,
                step: self.range.step,
            },
            notes: self.notes.messages(),
            status: self.status(),
        }
    }

    fn status(&self) -> MemberStatus {
        if self.notes.is_empty() {
            MemberStatus::Ok
        } else {
            MemberStatus::Warning
        }
    }
}

#[derive(Debug, Clone)]
struct GroupRecord {
    id: String,
    key: String,
    label: String,
    nick_name: Option<String>,
    canonical: ResolvedRange,
    canonical_source: CanonicalSource,
    notes: NoteSet,
    members: Vec<MemberRecord>,
}

impl GroupRecord {
    fn view(&self) -> SliderGroupView {
        let members: Vec<MemberView> = self.members.iter().map(MemberRecord::view).collect();
        let graph_count = self
            .members
            .iter()
            .map(|m| m.graph_id.as_str())
            .collect::<HashSet<_>>()
            .len();
        let has_warnings =
            !self.notes.is_empty() || members.iter().any(|m| m.status == MemberStatus::Warning);

        SliderGroupView {
            id: self.id.clone(),
            key: self.key.clone(),
            label: self.label.clone(),
            nick_name: self.nick_name.clone(),
            value: self.canonical.value,
            min: self.canonical.min,
            max: self.canonical.max,
            step: self.canonical.step,
            graph_count,
            notes: self.notes.messages(),
            has_warnings,
            canonical_source: self.canonical_source.clone(),
            members,
        }
    }
}

/// Cross-graph slider grouping and value mapping
#[derive(Debug, Clone)]
pub struct SliderEngine {
    groups: HashMap<String, GroupRecord>,
    group_order: Vec<String>,
    primary_role: String,
    active_graph: Option<String>,
}

impl Default for SliderEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PRIMARY_ROLE)
    }
}

impl SliderEngine {
    /// Create an engine whose canonical election favors `primary_role`
    pub fn new(primary_role: &str) -> Self {
        Self {
            groups: HashMap::new(),
            group_order: Vec::new(),
            primary_role: primary_role.trim().to_lowercase(),
            active_graph: None,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(&config.primary_role))
    }

    /// Case-folded role that wins canonical election
    pub fn primary_role(&self) -> &str {
        &self.primary_role
    }

    /// Active graph used by the last reconcile
    pub fn active_graph(&self) -> Option<&str> {
        self.active_graph.as_deref()
    }

    pub fn len(&self) -> usize {
        self.group_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_order.is_empty()
    }

    /// Public group ids in display order
    pub fn group_ids(&self) -> Vec<String> {
        self.group_order.clone()
    }

    /// Rebuild every group from the given sources
    pub fn reconcile(&mut self, sources: &[GraphSource], active_graph_id: Option<&str>) {
        let active = active_graph_id.map(str::trim).filter(|s| !s.is_empty());
        let entries = flatten(sources);

        let mut buckets: Vec<(String, Vec<&Entry>)> = Vec::new();
        let mut bucket_index: HashMap<&IdentityKey, usize> = HashMap::new();
        for entry in &entries {
            match bucket_index.get(&entry.key) {
                Some(&index) => buckets[index].1.push(entry),
                None => {
                    bucket_index.insert(&entry.key, buckets.len());
                    buckets.push((entry.key.text(), vec![entry]));
                }
            }
        }

        let mut slugs = SlugAllocator::new();
        let mut groups = HashMap::with_capacity(buckets.len());
        let mut group_order = Vec::with_capacity(buckets.len());
        for (key, members) in buckets {
            let record = self.build_group(key, &members, active, &mut slugs);
            group_order.push(record.id.clone());
            groups.insert(record.id.clone(), record);
        }

        info!(
            "Reconciled {} sliders from {} sources into {} groups",
            entries.len(),
            sources.len(),
            group_order.len()
        );

        self.groups = groups;
        self.group_order = group_order;
        self.active_graph = active.map(str::to_string);
    }

    fn build_group(
        &self,
        key: String,
        members: &[&Entry],
        active: Option<&str>,
        slugs: &mut SlugAllocator,
    ) -> GroupRecord {
        let canonical_entry = self.elect_canonical(members, active);
        let canonical = resolve_range(canonical_entry.slider);

        let mut notes = NoteSet::new();
        notes.insert_if(canonical.bounds_derived(), notes::CANONICAL_RANGE_DERIVED);
        notes.insert_if(canonical.step_adjusted, notes::CANONICAL_STEP_ADJUSTED);
        notes.insert_if(canonical.value_clamped, notes::CANONICAL_VALUE_CLAMPED);

        let member_records: Vec<MemberRecord> = members
            .iter()
            .map(|entry| build_member(entry, &canonical))
            .collect();
        let mismatched = member_records
            .iter()
            .any(|m| m.range.min != canonical.min || m.range.max != canonical.max);
        notes.insert_if(mismatched, notes::RANGE_MISMATCH);

        let nick_name = canonical_entry.slider.trimmed_nick_name().map(str::to_string);
        let label = canonical_entry
            .slider
            .trimmed_label()
            .or(nick_name.as_deref())
            .unwrap_or(&key)
            .to_string();
        let id = slugs.allocate(
            nick_name
                .as_deref()
                .or(canonical_entry.slider.trimmed_label())
                .unwrap_or(&key),
        );

        debug!(
            "Group {} ({} members) canonical {}:{}",
            id,
            member_records.len(),
            canonical_entry.graph_id,
            canonical_entry.node_id
        );

        GroupRecord {
            id,
            key,
            label,
            nick_name,
            canonical,
            canonical_source: CanonicalSource {
                graph_id: canonical_entry.graph_id.to_string(),
                node_id: canonical_entry.node_id.clone(),
                graph_label: canonical_entry.graph_label(),
                role: canonical_entry.metadata.trimmed_role().map(str::to_string),
            },
            notes,
            members: member_records,
        }
    }

    /// Pairwise scan keeping whichever entry outranks the current pick
    fn elect_canonical<'e, 'a>(&self, members: &[&'e Entry<'a>], active: Option<&str>) -> &'e Entry<'a> {
        let mut best = members[0];
        for &candidate in &members[1..] {
            if self.outranks(candidate, best, active) {
                best = candidate;
            }
        }
        best
    }

    /// Strict precedence: role, primary flag, active graph, priority, order
    fn outranks(&self, challenger: &Entry, incumbent: &Entry, active: Option<&str>) -> bool {
        let role_match = |e: &Entry| {
            !self.primary_role.is_empty()
                && e.metadata.normalized_role().as_deref() == Some(self.primary_role.as_str())
        };
        let in_active = |e: &Entry| active == Some(e.graph_id);

        if let Some(decided) = prefer(role_match(challenger), role_match(incumbent)) {
            return decided;
        }
        if let Some(decided) = prefer(
            challenger.metadata.is_flagged_primary(),
            incumbent.metadata.is_flagged_primary(),
        ) {
            return decided;
        }
        if let Some(decided) = prefer(in_active(challenger), in_active(incumbent)) {
            return decided;
        }
        if let (Some(a), Some(b)) = (challenger.metadata.priority, incumbent.metadata.priority) {
            if a != b {
                return a < b;
            }
        }
        challenger.order < incumbent.order
    }

    /// Map a canonical value onto every member of a group
    ///
    /// Returns `None` for unknown groups so a UI racing a rebuild can call
    /// this safely.
    pub fn map_value(&self, group_id: &str, canonical_value: f64) -> Option<MapResult> {
        let group = self.groups.get(group_id)?;
        let canonical = &group.canonical;
        let value = if canonical_value.is_finite() {
            canonical_value.clamp(canonical.min, canonical.max)
        } else {
            canonical.value
        };
        let relative = canonical.relative_position(value);

        let updates = group
            .members
            .iter()
            .map(|member| {
                let range = &member.range;
                let lo = range.min.min(range.max);
                let hi = range.min.max(range.max);
                SliderUpdate {
                    graph_id: member.graph_id.clone(),
                    node_id: member.node_id.clone(),
                    value: (range.min + relative * range.span).clamp(lo, hi),
                }
            })
            .collect();

        Some(MapResult { value, updates })
    }

    /// Every group in display order
    pub fn list(&self) -> Vec<SliderGroupView> {
        self.group_order
            .iter()
            .filter_map(|id| self.groups.get(id))
            .map(GroupRecord::view)
            .collect()
    }

    pub fn get_group(&self, group_id: &str) -> Option<SliderGroupView> {
        self.groups.get(group_id).map(GroupRecord::view)
    }
}

/// `Some(a)` when the two sides differ on a criterion
fn prefer(a: bool, b: bool) -> Option<bool> {
    if a != b {
        Some(a)
    } else {
        None
    }
}

/// Identity key: folded nickname, else a per-graph synthetic key
fn identity_key(graph_id: &str, node_id: &str, slider: &RawSlider) -> IdentityKey {
    match slider.trimmed_nick_name() {
        Some(nick) => IdentityKey::Nick(nick.to_lowercase()),
        None => IdentityKey::Synthetic {
            graph_id: graph_id.to_string(),
            node_id: node_id.to_string(),
        },
    }
}

fn flatten(sources: &[GraphSource]) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    for source in sources {
        let (Some(graph_id), Some(sliders)) = (source.trimmed_graph_id(), source.sliders.as_ref()) else {
            debug!("Skipping graph source without id or slider list");
            continue;
        };
        for (index, slider) in sliders.iter().enumerate() {
            let node_id = slider
                .resolved_node_id()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}{}", FALLBACK_NODE_PREFIX, index));
            let key = identity_key(graph_id, &node_id, slider);
            entries.push(Entry {
                graph_id,
                metadata: &source.metadata,
                slider,
                node_id,
                key,
                order: entries.len(),
            });
        }
    }
    entries
}

fn build_member(entry: &Entry, canonical: &ResolvedRange) -> MemberRecord {
    let range = resolve_range(entry.slider);

    let mut notes = NoteSet::new();
    notes.insert_if(range.bounds_derived(), notes::RANGE_DERIVED);
    notes.insert_if(!range.has_range, notes::NO_RANGE);
    notes.insert_if(range.step_adjusted, notes::STEP_ADJUSTED);
    notes.insert_if(range.value_clamped, notes::VALUE_CLAMPED);

    let normalized_value = if range.has_range && canonical.has_range {
        let relative = range.relative_position(range.value);
        let clamped = relative.clamp(0.0, 1.0);
        notes.insert_if(clamped != relative, notes::NORMALIZED);
        canonical.min + clamped * canonical.span
    } else {
        canonical.min
    };
    notes.insert_if(range.value_invalid, notes::INVALID_VALUE);

    MemberRecord {
        graph_id: entry.graph_id.to_string(),
        node_id: entry.node_id.clone(),
        graph_label: entry.graph_label(),
        role: entry.metadata.trimmed_role().map(str::to_string),
        label: entry.slider.trimmed_label().map(str::to_string),
        nick_name: entry.slider.trimmed_nick_name().map(str::to_string),
        range,
        normalized_value,
        notes,
    }
}
