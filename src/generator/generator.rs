// src/generator/generator.rs

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GeneratorConfig;
use crate::error::DungeonError;
use crate::generator::align::align;
use crate::generator::layout::{Connection, Layout};
use crate::generator::report::{GenerationReport, Phase, PlacementOutcome};
use crate::library::PartLibrary;
use crate::map::{DoorId, PartCategory, PartId, PartTemplate};
use crate::scene::World;
use crate::utils::util::clamp_probability;
use crate::utils::{sample_bounded, Pose, MAX_ANCHOR_SAMPLES, MAX_PLACEMENT_RETRIES};

/// Phases of a run, entered strictly in this order and never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Idle,
    MainGrowth,
    AlternateEntrances,
    Sealing,
    Done,
}

/// A claimed socket on a placed part, with its world pose at claim time.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    part: PartId,
    entry: usize,
    pose: Pose,
}

/// Grows a dungeon out of template parts.
///
/// A run places the entrance, then grows rooms and hallways onto random free
/// sockets of already placed parts, then attaches the alternate entrances,
/// and finally seals every socket left unused. Every search is capped, so a
/// run always terminates; parts that cannot be placed are dropped and
/// reported rather than failing the run.
pub struct DungeonGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
    state: GenerationState,
    layout: Layout,
    report: GenerationReport,
}

impl DungeonGenerator<StdRng> {
    /// Seeds from `config.seed`, or from the OS when no seed is set.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> DungeonGenerator<R> {
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        DungeonGenerator {
            config,
            rng,
            state: GenerationState::Idle,
            layout: Layout::new(),
            report: GenerationReport::default(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn state(&self) -> GenerationState {
        self.state
    }

    pub fn is_generated(&self) -> bool {
        self.state == GenerationState::Done
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Parts in placement order; the entrance comes first.
    pub fn placed_parts(&self) -> &[PartId] {
        self.layout.placed_parts()
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Runs every phase to completion.
    ///
    /// Errors only when the inputs are unusable or the generator already ran.
    /// Failed placements are recorded in the returned report.
    pub fn run<L, W>(&mut self, library: &L, world: &mut W) -> Result<&GenerationReport, DungeonError>
    where
        L: PartLibrary + ?Sized,
        W: World + ?Sized,
    {
        if self.state != GenerationState::Idle {
            return Err(DungeonError::AlreadyGenerated);
        }
        self.config.validate(library)?;

        let started = Instant::now();
        info!("Starting dungeon generation ({} parts requested).", self.config.room_count);

        self.state = GenerationState::MainGrowth;
        self.grow(library, world);

        self.state = GenerationState::AlternateEntrances;
        self.place_alternate_entrances(library, world);

        self.state = GenerationState::Sealing;
        self.seal_unused_entries(library, world);

        self.state = GenerationState::Done;
        self.report.generation_time = started.elapsed().as_secs_f64();
        info!(
            "Dungeon generation completed: {} parts placed, {} abandoned, {} retries, {} doors, {} fillers in {:.3}s.",
            self.report.placed_count(),
            self.report.abandoned_count(),
            self.report.total_retries(),
            self.report.doors,
            self.report.fillers,
            self.report.generation_time
        );
        Ok(&self.report)
    }

    fn grow<L, W>(&mut self, library: &L, world: &mut W)
    where
        L: PartLibrary + ?Sized,
        W: World + ?Sized,
    {
        let alternates = library.templates_for(PartCategory::AlternateEntrance).len();
        let iterations = self.config.main_iterations(alternates);
        info!("Generating main dungeon parts ({} iterations).", iterations);

        for _ in 0..iterations {
            if self.layout.is_empty() {
                self.place_entrance(library, world);
                continue;
            }

            let category = if self.rng.random_bool(clamp_probability(self.config.hallway_chance)) {
                PartCategory::Hallway
            } else {
                self.room_category(library)
            };
            let outcome = self.place_step(library, world, category);
            self.report.record(Phase::MainGrowth, category, outcome);
        }
    }

    fn place_entrance<L, W>(&mut self, library: &L, world: &mut W)
    where
        L: PartLibrary + ?Sized,
        W: World + ?Sized,
    {
        let Some(template) = library.templates_for(PartCategory::Entrance).first() else {
            warn!("No entrance template configured.");
            return;
        };
        match world.instantiate(template, PartCategory::Entrance, self.config.origin) {
            Some(entrance) => {
                self.layout.place_entrance(entrance);
                self.report.entrance = Some(entrance);
                info!("Entrance '{}' added to generated rooms.", template.name);
            }
            None => warn!("Entrance template '{}' has no dungeon part.", template.name),
        }
    }

    /// Regular room, or occasionally a special room when any exist.
    fn room_category<L: PartLibrary + ?Sized>(&mut self, library: &L) -> PartCategory {
        let has_special = !library.templates_for(PartCategory::SpecialRoom).is_empty();
        if has_special && self.rng.random_bool(clamp_probability(self.config.special_room_chance)) {
            PartCategory::SpecialRoom
        } else {
            PartCategory::Room
        }
    }

    fn place_alternate_entrances<L, W>(&mut self, library: &L, world: &mut W)
    where
        L: PartLibrary + ?Sized,
        W: World + ?Sized,
    {
        let count = library.templates_for(PartCategory::AlternateEntrance).len();
        if count == 0 {
            return;
        }
        info!("Generating {} alternate entrances.", count);
        for _ in 0..count {
            let outcome = self.place_step(library, world, PartCategory::AlternateEntrance);
            self.report.record(Phase::AlternateEntrances, PartCategory::AlternateEntrance, outcome);
        }
    }

    /// Closes every unused socket of every placed part with a filler wall.
    /// Sockets sealed by an earlier call are skipped, so calling this again
    /// adds nothing unless occupancy changed in between. Returns the number of
    /// fillers spawned by this call.
    pub fn seal_unused_entries<L, W>(&mut self, library: &L, world: &mut W) -> usize
    where
        L: PartLibrary + ?Sized,
        W: World + ?Sized,
    {
        info!("Filling empty entrances.");
        let fillers = library.templates_for(PartCategory::FillerWall);
        let mut spawned = 0;

        for &id in self.layout.placed_parts() {
            let filler = world
                .part(id)
                .filler()
                .and_then(|name| fillers.iter().find(|t| t.name == name))
                .or_else(|| fillers.first());
            let Some(filler) = filler else {
                warn!("No filler wall for '{}'; its sockets stay open.", world.part(id).template_name());
                continue;
            };
            for pose in world.part_mut(id).seal_unused_entry_points() {
                world.spawn_filler(filler, pose);
                spawned += 1;
            }
        }

        self.report.fillers += spawned;
        spawned
    }

    /// One growth step: claim an anchor socket, instantiate a candidate from
    /// `category`, and settle it onto the anchor.
    fn place_step<L, W>(&mut self, library: &L, world: &mut W, category: PartCategory) -> PlacementOutcome
    where
        L: PartLibrary + ?Sized,
        W: World + ?Sized,
    {
        let (Some(template), Some(door_template)) = (
            pick(&mut self.rng, library.templates_for(category)),
            pick(&mut self.rng, library.templates_for(PartCategory::Door)),
        ) else {
            warn!("No {} or door templates to place.", category.name());
            return PlacementOutcome::CandidateExhausted {
                template: category.name().to_string(),
            };
        };

        let Some(anchor) = self.find_anchor(world) else {
            warn!(
                "Failed to find a room with an available entry point after {} retries.",
                MAX_ANCHOR_SAMPLES
            );
            return PlacementOutcome::AnchorExhausted;
        };

        let door = world.spawn_door(door_template, anchor.pose);

        let Some(candidate) = world.instantiate(template, category, self.config.origin) else {
            warn!("Template '{}' has no dungeon part.", template.name);
            world.part_mut(anchor.part).release_entry_point(anchor.entry);
            world.despawn_door(door);
            return PlacementOutcome::CandidateExhausted {
                template: template.name.clone(),
            };
        };

        let Some(candidate_entry) = world.part_mut(candidate).acquire_free_entry_point(&mut self.rng) else {
            warn!("'{}' has no free entry point; discarding it.", template.name);
            world.part_mut(anchor.part).release_entry_point(anchor.entry);
            abandon(world, candidate, door);
            return PlacementOutcome::CandidateExhausted {
                template: template.name.clone(),
            };
        };

        self.settle(world, candidate, candidate_entry, anchor, door)
    }

    /// Aligns the candidate onto the anchor and keeps it if nothing overlaps.
    /// On conflict both sockets are released and the candidate is tried on a
    /// fresh anchor, up to `MAX_PLACEMENT_RETRIES` times.
    fn settle<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        candidate: PartId,
        mut candidate_entry: usize,
        mut anchor: Anchor,
        door: DoorId,
    ) -> PlacementOutcome {
        let name = world.part(candidate).template_name().to_string();
        let mut retries = 0;

        loop {
            let Some(junction) = align(world, anchor.part, anchor.entry, candidate, candidate_entry) else {
                warn!("Could not align '{}'; discarding it.", name);
                world.part_mut(anchor.part).release_entry_point(anchor.entry);
                world.part_mut(candidate).release_entry_point(candidate_entry);
                abandon(world, candidate, door);
                return PlacementOutcome::CandidateExhausted { template: name };
            };
            world.set_door_pose(door, junction);

            let bounds = world.part(candidate).world_bounds();
            let conflicts = world.overlapping(&bounds, candidate);
            if conflicts.is_empty() {
                self.layout.commit(Connection {
                    anchor: anchor.part,
                    anchor_entry: anchor.entry,
                    part: candidate,
                    part_entry: candidate_entry,
                    door,
                });
                self.report.doors += 1;
                info!(
                    "Placed '{}' on '{}' after {} retries.",
                    name,
                    world.part(anchor.part).template_name(),
                    retries
                );
                return PlacementOutcome::Placed {
                    part: candidate,
                    anchor: anchor.part,
                    retries,
                };
            }

            debug!("Intersection detected for '{}' with {:?}.", name, conflicts);
            world.part_mut(candidate).release_entry_point(candidate_entry);
            world.part_mut(anchor.part).release_entry_point(anchor.entry);

            if retries >= MAX_PLACEMENT_RETRIES {
                warn!("Retry limit reached for placing '{}'.", name);
                abandon(world, candidate, door);
                return PlacementOutcome::RetryExhausted { template: name, retries };
            }
            retries += 1;
            debug!("Retrying placement for '{}', attempt {}.", name, retries);

            let Some(next) = self.find_anchor(world) else {
                warn!("No anchor left for '{}' after {} retries.", name, retries);
                abandon(world, candidate, door);
                return PlacementOutcome::AnchorExhausted;
            };
            let Some(entry) = world.part_mut(candidate).acquire_free_entry_point(&mut self.rng) else {
                world.part_mut(next.part).release_entry_point(next.entry);
                abandon(world, candidate, door);
                return PlacementOutcome::CandidateExhausted { template: name };
            };
            anchor = next;
            candidate_entry = entry;
        }
    }

    /// Samples placed parts (with repetition, at most `MAX_ANCHOR_SAMPLES`
    /// draws) and claims a free socket on the first one that has one.
    fn find_anchor<W: World + ?Sized>(&mut self, world: &mut W) -> Option<Anchor> {
        let placed = self.layout.placed_parts();
        let anchor = sample_bounded(&mut self.rng, placed.len(), MAX_ANCHOR_SAMPLES, |rng, index| {
            let part = placed[index];
            let entry = world.part_mut(part).acquire_free_entry_point(rng)?;
            let pose = world.part(part).entry_pose(entry)?;
            Some(Anchor { part, entry, pose })
        })?;
        debug!(
            "Found available entry point in room '{}'.",
            world.part(anchor.part).template_name()
        );
        Some(anchor)
    }
}

/// Uniform choice from a pool.
fn pick<'a, R: Rng>(rng: &mut R, pool: &'a [PartTemplate]) -> Option<&'a PartTemplate> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.random_range(0..pool.len()))
}

/// Drops a candidate that will never join the layout, and its door.
fn abandon<W: World + ?Sized>(world: &mut W, candidate: PartId, door: DoorId) {
    world.discard_part(candidate);
    world.despawn_door(door);
}
