// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reproducible random vault mutation for stress tests.
//!
//! Draws actions from a fixed weighted mix (entry/group creation,
//! deletion, moves, property and meta writes) with a seeded RNG, so a
//! failing run replays exactly.

use coffer_format::{build_command, CommandKind};
use coffer_history::{HistoryExecutor, ROOT_GROUP_ID};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const PROPERTY_KEYS: [&str; 4] = ["title", "username", "password", "url"];
const META_KEYS: [&str; 3] = ["note", "tag", "last_seen"];

/// Total weight of the action mix below.
const MIX_TOTAL: u32 = 45;

/// Applies a reproducible stream of valid commands to an executor.
pub struct CommandMixer {
    rng: ChaCha8Rng,
    counter: usize,
}

impl CommandMixer {
    /// Mixer with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            counter: 0,
        }
    }

    /// Apply `count` random valid commands, each as its own batch.
    pub fn apply_random_commands(&mut self, executor: &mut HistoryExecutor, count: usize) {
        let mut applied = 0;
        while applied < count {
            if self.try_step(executor) {
                applied += 1;
            }
        }
    }

    /// Attempt one action from the mix. Returns false when the drawn
    /// action has no valid target yet.
    fn try_step(&mut self, executor: &mut HistoryExecutor) -> bool {
        let groups = ids(executor.dataset().all_groups().map(|(id, _)| id));
        if groups.is_empty() {
            return self.new_group(executor, ROOT_GROUP_ID);
        }
        let entries = ids(executor.dataset().all_entries().map(|(id, _)| id));

        // Action mix: new-entry 8, new-group 4, delete-entry 2,
        // delete-group 1, move-entry 2, move-group 1, set-prop 15,
        // set-meta 12.
        match self.rng.gen_range(0..MIX_TOTAL) {
            0..=7 => {
                let group = self.pick(&groups);
                let id = self.next_id("e");
                self.run(
                    executor,
                    CommandKind::CreateEntry,
                    &[group.as_str(), id.as_str()],
                )
            }
            8..=11 => {
                let parent = self.pick_parent(&groups);
                self.new_group(executor, &parent)
            }
            12..=13 => match self.pick_opt(&entries) {
                Some(entry) => self.run(executor, CommandKind::DeleteEntry, &[entry.as_str()]),
                None => false,
            },
            14 => {
                let group = self.pick(&groups);
                self.run(executor, CommandKind::DeleteGroup, &[group.as_str()])
            }
            15..=16 => match self.pick_opt(&entries) {
                Some(entry) => {
                    let group = self.pick(&groups);
                    self.run(
                        executor,
                        CommandKind::MoveEntry,
                        &[entry.as_str(), group.as_str()],
                    )
                }
                None => false,
            },
            17 => {
                let group = self.pick(&groups);
                let target = self.pick_parent(&groups);
                if target == group || executor.dataset().is_descendant(&group, &target) {
                    return false;
                }
                self.run(
                    executor,
                    CommandKind::MoveGroup,
                    &[group.as_str(), target.as_str()],
                )
            }
            18..=32 => match self.pick_opt(&entries) {
                Some(entry) => {
                    let key = PROPERTY_KEYS[self.rng.gen_range(0..PROPERTY_KEYS.len())];
                    let value = format!("value {}", self.rng.gen_range(0..1000));
                    self.run(
                        executor,
                        CommandKind::SetEntryProperty,
                        &[entry.as_str(), key, value.as_str()],
                    )
                }
                None => false,
            },
            _ => match self.pick_opt(&entries) {
                Some(entry) => {
                    let key = META_KEYS[self.rng.gen_range(0..META_KEYS.len())];
                    let value = format!("meta {}", self.rng.gen_range(0..1000));
                    self.run(
                        executor,
                        CommandKind::SetEntryMeta,
                        &[entry.as_str(), key, value.as_str()],
                    )
                }
                None => false,
            },
        }
    }

    fn new_group(&mut self, executor: &mut HistoryExecutor, parent: &str) -> bool {
        let id = self.next_id("g");
        self.run(executor, CommandKind::CreateGroup, &[parent, id.as_str()])
    }

    fn run(&mut self, executor: &mut HistoryExecutor, kind: CommandKind, args: &[&str]) -> bool {
        let line = build_command(kind, args).expect("generator builds valid commands");
        executor
            .execute_one(&line)
            .expect("generator commands replay cleanly");
        true
    }

    fn next_id(&mut self, kind: &str) -> String {
        self.counter += 1;
        let tag = if kind == "g" { 8 } else { 9 };
        format!("00000000-0000-4000-{tag}000-{:012}", self.counter)
    }

    fn pick(&mut self, pool: &[String]) -> String {
        pool[self.rng.gen_range(0..pool.len())].clone()
    }

    fn pick_opt(&mut self, pool: &[String]) -> Option<String> {
        if pool.is_empty() {
            None
        } else {
            Some(self.pick(pool))
        }
    }

    /// A parent token: the root or an existing group.
    fn pick_parent(&mut self, groups: &[String]) -> String {
        if self.rng.gen_range(0..4) == 0 {
            ROOT_GROUP_ID.to_string()
        } else {
            self.pick(groups)
        }
    }
}

fn ids<'a>(iter: impl Iterator<Item = &'a str>) -> Vec<String> {
    iter.map(str::to_string).collect()
}
