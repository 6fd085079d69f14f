use serde::Serialize;

/// Identities used when no roster is configured
pub const DEFAULT_ROSTER: [&str; 4] = [
    "LeadDeveloper",
    "LogisticsAnalyst",
    "EthicsAuditor",
    "CoordinatorAgent",
];

/// Stable, ordered set of agent identities.
///
/// Identities are taken from the configured seed names first, then
/// generated as `agent-NN`. Resizing keeps the existing prefix, so an agent
/// keeps its id across refreshes and across shrink/grow cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    #[serde(skip)]
    seed: Vec<String>,
    ids: Vec<String>,
}

impl Roster {
    pub fn new(seed: Vec<String>, count: usize) -> Self {
        let mut roster = Self {
            seed,
            ids: Vec::with_capacity(count),
        };
        roster.resize(count);
        roster
    }

    /// Roster seeded with `DEFAULT_ROSTER`
    pub fn with_defaults(count: usize) -> Self {
        Self::new(DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(), count)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Grow or shrink to `count` identities, keeping the current prefix
    pub fn resize(&mut self, count: usize) {
        self.ids.truncate(count);
        while self.ids.len() < count {
            let id = self.next_id();
            self.ids.push(id);
        }
    }

    fn next_id(&self) -> String {
        if let Some(name) = self.seed.iter().find(|name| !self.ids.contains(name)) {
            return name.clone();
        }

        let mut n = self.ids.len() + 1;
        loop {
            let candidate = format!("agent-{:02}", n);
            if !self.ids.contains(&candidate) && !self.seed.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
