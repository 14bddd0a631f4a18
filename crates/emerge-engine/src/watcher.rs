//! Shared watcher pool.
//!
//! Platform intersection watchers are expensive, so registrations that
//! watch under identical conditions (same root, same margin, same
//! threshold) share one. The pool keys live watchers by those conditions,
//! tracks which elements each one serves, and tears a watcher down the
//! moment its last member leaves.
//!
//! The pool never touches the platform itself. Every structural change is
//! appended to the caller's effect list ([`Effect::CreateWatcher`],
//! [`Effect::Observe`], [`Effect::Unobserve`],
//! [`Effect::DisconnectWatcher`]) in the order the embedder must execute
//! them: a watcher is always created before anything is observed through
//! it, and a prior observation is always released before its replacement
//! is issued.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use emerge_config::{RevealConfig, RootMargin};

use crate::effects::Effect;
use crate::types::{ElementId, IntersectionRecord, WatcherId};

/// Watch conditions handed to the embedder when a watcher is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Scrollable ancestor to measure against, or the viewport when unset.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<ElementId>,
    /// Margin applied to the root's box before intersection is computed.
    #[serde(default)]
    pub margin: RootMargin,
    /// Ratio the watcher should report crossings for, if any.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl WatchOptions {
    /// Derive the watch conditions a canonical config asks for.
    pub fn from_config(config: &RevealConfig) -> Self {
        Self {
            root: config.root.map(ElementId),
            margin: config.effective_margin(),
            threshold: config.threshold,
        }
    }
}

/// Pool key: two configs watch under the same conditions exactly when
/// their keys are equal. The margin is keyed by its canonical text and the
/// threshold in micro-units, so floating-point noise below a millionth
/// does not split watchers.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
struct WatcherKey {
    root: Option<ElementId>,
    margin: String,
    threshold_micros: Option<u32>,
}

impl WatcherKey {
    fn for_options(options: &WatchOptions) -> Self {
        Self {
            root: options.root,
            margin: options.margin.to_string(),
            threshold_micros: options
                .threshold
                .map(|t| (t * 1_000_000.0).round() as u32),
        }
    }
}

struct WatcherEntry {
    watcher: WatcherId,
    options: WatchOptions,
    members: HashSet<ElementId>,
}

/// Reference-counted registry of live watchers, keyed by watch conditions.
#[derive(Default)]
pub struct WatcherPool {
    entries: HashMap<WatcherKey, WatcherEntry>,
    by_element: HashMap<ElementId, WatcherKey>,
    next_watcher: u64,
}

impl WatcherPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_watcher(&mut self) -> WatcherId {
        self.next_watcher += 1;
        WatcherId(self.next_watcher)
    }

    /// Start watching an element under the given conditions.
    ///
    /// Reuses a live watcher when one already exists for equal conditions,
    /// otherwise creates one. If the element was already observed under
    /// different conditions, the old observation is released first.
    pub fn observe(
        &mut self,
        element: ElementId,
        options: WatchOptions,
        effects: &mut Vec<Effect>,
    ) {
        let key = WatcherKey::for_options(&options);

        if let Some(current) = self.by_element.get(&element) {
            if *current == key {
                return;
            }
            self.unobserve(element, effects);
        }

        let watcher = match self.entries.get(&key) {
            Some(entry) => entry.watcher,
            None => {
                let watcher = self.alloc_watcher();
                effects.push(Effect::CreateWatcher {
                    watcher,
                    options: options.clone(),
                });
                self.entries.insert(
                    key.clone(),
                    WatcherEntry {
                        watcher,
                        options,
                        members: HashSet::new(),
                    },
                );
                watcher
            }
        };

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.members.insert(element);
        }
        effects.push(Effect::Observe { watcher, element });
        self.by_element.insert(element, key);
    }

    /// Stop watching an element. No-op if it is not observed.
    ///
    /// Disconnects the watcher immediately when the element was its last
    /// member.
    pub fn unobserve(&mut self, element: ElementId, effects: &mut Vec<Effect>) {
        let Some(key) = self.by_element.remove(&element) else {
            return;
        };
        let Some(entry) = self.entries.get_mut(&key) else {
            return;
        };

        entry.members.remove(&element);
        effects.push(Effect::Unobserve {
            watcher: entry.watcher,
            element,
        });

        if entry.members.is_empty() {
            let watcher = entry.watcher;
            self.entries.remove(&key);
            effects.push(Effect::DisconnectWatcher { watcher });
        }
    }

    /// Demultiplex a measurement batch from one watcher.
    ///
    /// Returns only the records whose target is a current member of that
    /// watcher; records for unknown watchers or former members are
    /// silently dropped.
    pub fn deliver(
        &self,
        watcher: WatcherId,
        records: &[IntersectionRecord],
    ) -> Vec<IntersectionRecord> {
        let Some(entry) = self.entries.values().find(|e| e.watcher == watcher) else {
            return Vec::new();
        };
        records
            .iter()
            .filter(|record| entry.members.contains(&record.target))
            .copied()
            .collect()
    }

    /// Disconnect every live watcher and forget all members.
    pub fn disconnect_all(&mut self, effects: &mut Vec<Effect>) {
        let mut watchers: Vec<WatcherId> =
            self.entries.values().map(|entry| entry.watcher).collect();
        watchers.sort();
        for watcher in watchers {
            effects.push(Effect::DisconnectWatcher { watcher });
        }
        self.entries.clear();
        self.by_element.clear();
    }

    /// Check if an element is currently observed.
    pub fn is_observed(&self, element: ElementId) -> bool {
        self.by_element.contains_key(&element)
    }

    /// Get the conditions the element is currently watched under.
    pub fn options_for(&self, element: ElementId) -> Option<&WatchOptions> {
        let key = self.by_element.get(&element)?;
        self.entries.get(key).map(|entry| &entry.options)
    }

    /// Get the number of live watchers.
    pub fn watcher_count(&self) -> usize {
        self.entries.len()
    }

    /// Get the number of observed elements across all watchers.
    pub fn observed_count(&self) -> usize {
        self.by_element.len()
    }
}

impl std::fmt::Debug for WatcherPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherPool")
            .field("watchers", &self.watcher_count())
            .field("observed", &self.observed_count())
            .finish()
    }
}
