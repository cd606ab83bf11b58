// src/generator/mod.rs
pub mod align;
pub mod export;
mod generator;
pub mod layout;
pub mod report;

pub use align::align;
pub use export::DungeonExport;
pub use generator::{DungeonGenerator, GenerationState};
pub use layout::{Connection, Layout};
pub use report::{GenerationReport, Phase, PlacementOutcome, StepRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::error::DungeonError;
    use crate::library::TemplateLibrary;
    use crate::map::{PartCategory, PartTemplate};
    use crate::scene::testing::{OverlapPolicy, StubWorld};
    use crate::scene::{Instantiator, Scene};
    use crate::utils::{Bounds, Pose, EPSILON, MAX_PLACEMENT_RETRIES};
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square_room(name: &str) -> PartTemplate {
        PartTemplate::new(
            name,
            Bounds::new(Vec3::new(-4.0, 0.0, -4.0), Vec3::new(4.0, 4.0, 4.0)),
            vec![
                Pose::from_yaw(Vec3::new(0.0, 0.0, 4.0), 0.0),
                Pose::from_yaw(Vec3::new(4.0, 0.0, 0.0), 90.0),
                Pose::from_yaw(Vec3::new(0.0, 0.0, -4.0), 180.0),
                Pose::from_yaw(Vec3::new(-4.0, 0.0, 0.0), 270.0),
            ],
        )
    }

    fn hallway(name: &str) -> PartTemplate {
        PartTemplate::new(
            name,
            Bounds::new(Vec3::new(-1.5, 0.0, -6.0), Vec3::new(1.5, 3.0, 6.0)),
            vec![
                Pose::from_yaw(Vec3::new(0.0, 0.0, 6.0), 0.0),
                Pose::from_yaw(Vec3::new(0.0, 0.0, -6.0), 180.0),
            ],
        )
    }

    fn dead_end(name: &str) -> PartTemplate {
        PartTemplate::new(
            name,
            Bounds::new(Vec3::new(-2.0, 0.0, -4.0), Vec3::new(2.0, 3.0, 0.0)),
            vec![Pose::IDENTITY],
        )
    }

    fn library() -> TemplateLibrary {
        TemplateLibrary::new()
            .with(PartCategory::Entrance, square_room("gate"))
            .with(PartCategory::Room, square_room("chamber"))
            .with(PartCategory::Hallway, hallway("corridor"))
            .with(PartCategory::Door, PartTemplate::marker("arch"))
            .with(PartCategory::FillerWall, PartTemplate::marker("brick"))
    }

    fn seeded(room_count: usize, seed: u64) -> DungeonGenerator<StdRng> {
        DungeonGenerator::with_rng(
            GeneratorConfig::default().with_room_count(room_count),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Every socket of every placed part is either linked or sealed, never
    /// both free and open, and occupancy matches the recorded links.
    fn assert_sockets_accounted_for(gen: &DungeonGenerator<StdRng>, world: &impl Instantiator) {
        let layout = gen.layout();
        for &id in layout.placed_parts() {
            let part = world.part(id);
            let links = layout
                .connections()
                .iter()
                .filter(|c| c.part == id || c.anchor == id)
                .count();
            assert_eq!(part.occupied_count(), links, "occupancy of {}", part.template_name());
            for entry in part.entry_points() {
                assert!(entry.is_occupied() ^ entry.is_sealed(), "socket {}", entry.name());
            }
        }
    }

    fn assert_links_coincide(gen: &DungeonGenerator<StdRng>, world: &impl Instantiator) {
        for link in gen.layout().connections() {
            let a = world.part(link.anchor).entry_pose(link.anchor_entry).unwrap();
            let b = world.part(link.part).entry_pose(link.part_entry).unwrap();
            assert!(a.distance_to(&b) < EPSILON);
            assert!(a.forward().dot(b.forward()) <= 0.0);
            assert!(world.part(link.anchor).entry_point(link.anchor_entry).unwrap().is_occupied());
            assert!(world.part(link.part).entry_point(link.part_entry).unwrap().is_occupied());
        }
    }

    #[test]
    fn test_single_room_is_just_the_sealed_entrance() {
        let mut world = StubWorld::new(OverlapPolicy::Real);
        let mut gen = seeded(1, 1);
        assert!(!gen.is_generated());
        assert_eq!(gen.state(), GenerationState::Idle);

        let report = gen.run(&library(), &mut world).unwrap();
        assert!(report.steps.is_empty());
        assert_eq!(report.fillers, 4);

        assert!(gen.is_generated());
        assert_eq!(gen.placed_parts().len(), 1);
        let entrance = gen.placed_parts()[0];
        assert_eq!(world.part(entrance).category(), PartCategory::Entrance);
        assert!(world.part(entrance).entry_points().iter().all(|e| e.is_sealed()));
        assert_eq!(world.scene.fillers().len(), 4);
        assert_eq!(world.scene.door_count(), 0);
    }

    #[test]
    fn test_five_parts_without_overlaps() {
        let mut world = StubWorld::new(OverlapPolicy::Never);
        let mut gen = seeded(5, 2);
        let report = gen.run(&library(), &mut world).unwrap();

        assert_eq!(report.placed_count(), 5);
        assert!(report.steps.iter().all(|s| s.outcome.is_placed() && s.outcome.retries() == 0));

        let layout = gen.layout();
        assert_eq!(layout.len(), 5);
        assert_eq!(world.part(layout.placed_parts()[0]).category(), PartCategory::Entrance);
        for (i, &id) in layout.placed_parts().iter().enumerate().skip(1) {
            let links: Vec<_> = layout.connections().iter().filter(|c| c.part == id).collect();
            assert_eq!(links.len(), 1);
            let anchor_index = layout.placed_parts().iter().position(|p| *p == links[0].anchor).unwrap();
            assert!(anchor_index < i);
        }
        assert!(layout.is_connected());
        assert_eq!(world.scene.door_count(), 4);
        assert_eq!(gen.report().doors, 4);
        assert_sockets_accounted_for(&gen, &world);
        assert_links_coincide(&gen, &world);
    }

    #[test]
    fn test_constant_conflict_leaves_only_the_entrance() {
        let mut world = StubWorld::new(OverlapPolicy::Always);
        let mut gen = seeded(4, 3);
        let report = gen.run(&library(), &mut world).unwrap();

        assert_eq!(report.steps.len(), 3);
        for step in &report.steps {
            match &step.outcome {
                PlacementOutcome::RetryExhausted { retries, .. } => assert_eq!(*retries, MAX_PLACEMENT_RETRIES),
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        // The first attempt plus one query per retry, for each abandoned step.
        assert_eq!(world.queries.get(), 3 * (MAX_PLACEMENT_RETRIES + 1));
        assert_eq!(gen.placed_parts().len(), 1);
        assert_eq!(world.scene.live_part_count(), 1);
        assert_eq!(world.scene.instantiated_count(), 4);
        assert_eq!(world.scene.door_count(), 0);
        assert_eq!(gen.report().fillers, 4);
        assert_sockets_accounted_for(&gen, &world);
    }

    #[test]
    fn test_real_overlaps_build_a_connected_dungeon() {
        let mut world = StubWorld::new(OverlapPolicy::Real);
        let mut gen = seeded(14, 4);
        gen.run(&library(), &mut world).unwrap();

        let layout = gen.layout();
        assert!(layout.len() > 1);
        assert!(layout.is_connected());
        assert_eq!(layout.connections().len(), layout.len() - 1);
        assert_eq!(world.scene.door_count(), layout.connections().len());

        let placed = layout.placed_parts();
        for (i, &a) in placed.iter().enumerate() {
            for &b in &placed[i + 1..] {
                assert!(!world.part(a).world_bounds().overlaps(&world.part(b).world_bounds()));
            }
        }
        for link in layout.connections() {
            let door = world.scene.door(link.door).unwrap();
            assert_eq!(door.pose, world.part(link.anchor).entry_pose(link.anchor_entry).unwrap());
        }
        assert_sockets_accounted_for(&gen, &world);
        assert_links_coincide(&gen, &world);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let library = library();
        let layout_of = |seed: u64| {
            let mut scene = Scene::new();
            let mut gen = seeded(10, seed);
            gen.run(&library, &mut scene).unwrap();
            gen.placed_parts()
                .iter()
                .map(|&id| (scene.part(id).template_name().to_string(), *scene.part(id).transform()))
                .collect::<Vec<_>>()
        };
        assert_eq!(layout_of(99), layout_of(99));
    }

    #[test]
    fn test_sealing_twice_adds_nothing() {
        let library = library();
        let mut scene = Scene::new();
        let mut gen = seeded(6, 5);
        gen.run(&library, &mut scene).unwrap();
        let fillers = scene.fillers().to_vec();
        assert_eq!(gen.seal_unused_entries(&library, &mut scene), 0);
        assert_eq!(scene.fillers(), fillers.as_slice());
        assert_eq!(gen.report().fillers, fillers.len());
    }

    #[test]
    fn test_alternate_entrances_run_after_growth() {
        let library = library().with(PartCategory::AlternateEntrance, dead_end("sewer grate"));
        let mut world = StubWorld::new(OverlapPolicy::Never);
        let mut gen = seeded(4, 6);
        let report = gen.run(&library, &mut world).unwrap();

        assert_eq!(report.steps_in(Phase::MainGrowth).count(), 2);
        let alternates: Vec<_> = report.steps_in(Phase::AlternateEntrances).collect();
        assert_eq!(alternates.len(), 1);
        assert_eq!(alternates[0].category, PartCategory::AlternateEntrance);
        assert!(alternates[0].outcome.is_placed());

        let last = *gen.placed_parts().last().unwrap();
        assert_eq!(world.part(last).category(), PartCategory::AlternateEntrance);
        assert_eq!(world.part(last).template_name(), "sewer grate");
        assert_eq!(gen.placed_parts().len(), 4);
    }

    #[test]
    fn test_candidate_without_sockets_is_discarded() {
        let mut library = library();
        library.rooms = vec![PartTemplate::new(
            "sealed vault",
            Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)),
            Vec::new(),
        )];
        let mut config = GeneratorConfig::default().with_room_count(2);
        config.hallway_chance = 0.0;
        let mut world = StubWorld::new(OverlapPolicy::Never);
        let mut gen = DungeonGenerator::with_rng(config, StdRng::seed_from_u64(7));
        let report = gen.run(&library, &mut world).unwrap();

        assert_eq!(
            report.steps[0].outcome,
            PlacementOutcome::CandidateExhausted {
                template: "sealed vault".to_string()
            }
        );
        assert_eq!(world.scene.live_part_count(), 1);
        assert_eq!(world.scene.door_count(), 0);
        // The anchor socket claimed for the step was handed back, then sealed.
        assert_eq!(report.fillers, 4);
        assert_sockets_accounted_for(&gen, &world);
    }

    #[test]
    fn test_dead_ends_exhaust_anchor_search() {
        let library = TemplateLibrary::new()
            .with(PartCategory::Entrance, dead_end("stairwell"))
            .with(PartCategory::Room, dead_end("cell"))
            .with(PartCategory::Hallway, dead_end("alcove"))
            .with(PartCategory::Door, PartTemplate::marker("arch"))
            .with(PartCategory::FillerWall, PartTemplate::marker("brick"));
        let mut world = StubWorld::new(OverlapPolicy::Never);
        let mut gen = seeded(3, 8);
        let report = gen.run(&library, &mut world).unwrap();

        assert!(report.steps[0].outcome.is_placed());
        assert_eq!(report.steps[1].outcome, PlacementOutcome::AnchorExhausted);
        assert_eq!(gen.placed_parts().len(), 2);
        assert_eq!(gen.report().fillers, 0);
        assert!(gen.is_generated());
    }

    #[test]
    fn test_special_rooms_are_drawn_when_certain() {
        let library = library().with(PartCategory::SpecialRoom, square_room("shrine"));
        let mut config = GeneratorConfig::default().with_room_count(4);
        config.hallway_chance = 0.0;
        config.special_room_chance = 1.0;
        let mut world = StubWorld::new(OverlapPolicy::Never);
        let mut gen = DungeonGenerator::with_rng(config, StdRng::seed_from_u64(9));
        let report = gen.run(&library, &mut world).unwrap();

        assert!(report.steps.iter().all(|s| s.category == PartCategory::SpecialRoom));
        for &id in &gen.placed_parts()[1..] {
            assert_eq!(world.part(id).template_name(), "shrine");
        }
    }

    #[test]
    fn test_run_only_once() {
        let library = library();
        let mut scene = Scene::new();
        let mut gen = seeded(3, 10);
        gen.run(&library, &mut scene).unwrap();
        let placed = gen.placed_parts().len();
        assert!(matches!(gen.run(&library, &mut scene), Err(DungeonError::AlreadyGenerated)));
        assert_eq!(gen.placed_parts().len(), placed);
    }

    #[test]
    fn test_invalid_library_leaves_generator_idle() {
        let mut library = library();
        library.doors.clear();
        let mut scene = Scene::new();
        let mut gen = seeded(3, 11);
        let err = gen.run(&library, &mut scene).unwrap_err();
        assert!(matches!(err, DungeonError::MissingTemplates(PartCategory::Door)));
        assert_eq!(gen.state(), GenerationState::Idle);
        assert_eq!(scene.instantiated_count(), 0);
    }

    #[test]
    fn test_export_lists_layout_in_order() {
        let library = library();
        let mut scene = Scene::new();
        let mut gen = seeded(5, 12);
        gen.run(&library, &mut scene).unwrap();
        let export = DungeonExport::from_scene(gen.layout(), &scene, gen.report());
        assert_eq!(export.parts.len(), gen.placed_parts().len());
        assert_eq!(export.parts[0].template, "gate");
        assert_eq!(export.doors.len(), export.connections.len());
        let json = export.to_json(false).unwrap();
        assert!(json.contains("\"connections\""));
    }

    #[test]
    fn test_bundled_assets_generate() {
        let library = TemplateLibrary::from_json(include_str!("../../assets/library.json")).unwrap();
        let config = GeneratorConfig::from_json(include_str!("../../assets/config.json")).unwrap();
        let mut scene = Scene::new();
        let mut gen = DungeonGenerator::new(config);
        gen.run(&library, &mut scene).unwrap();
        assert!(gen.is_generated());
        assert!(gen.layout().is_connected());
        assert_eq!(scene.live_part_count(), gen.placed_parts().len());
        assert_sockets_accounted_for(&gen, &scene);
        assert_links_coincide(&gen, &scene);
    }

    #[test]
    fn test_conflicts_then_success_reuses_one_door() {
        let mut world = StubWorld::new(OverlapPolicy::ConflictFirst(7));
        let mut config = GeneratorConfig::default().with_room_count(2);
        config.hallway_chance = 0.0;
        let mut gen = DungeonGenerator::with_rng(config, StdRng::seed_from_u64(21));
        let report = gen.run(&library(), &mut world).unwrap();

        assert_eq!(report.steps.len(), 1);
        assert!(matches!(report.steps[0].outcome, PlacementOutcome::Placed { retries: 7, .. }));
        assert_eq!(report.doors, 1);
        assert_eq!(report.fillers, 6);
        assert_eq!(world.queries.get(), 8);

        // The candidate was moved between anchors, never re-instantiated.
        assert_eq!(world.scene.instantiated_count(), 2);
        assert_eq!(world.scene.door_count(), 1);

        let link = &gen.layout().connections()[0];
        let door = world.scene.door(link.door).unwrap();
        let anchor_pose = world.part(link.anchor).entry_pose(link.anchor_entry).unwrap();
        assert!(door.pose.distance_to(&anchor_pose) < EPSILON);
        assert!(door.pose.forward().dot(anchor_pose.forward()) > 1.0 - EPSILON);

        assert_sockets_accounted_for(&gen, &world);
        assert_links_coincide(&gen, &world);
    }

    #[test]
    fn test_seeded_export_is_reproducible() {
        let export_json = |seed: u64| {
            let mut scene = Scene::new();
            let mut gen = seeded(8, seed);
            gen.run(&library(), &mut scene).unwrap();
            DungeonExport::from_scene(gen.layout(), &scene, gen.report())
                .to_json(false)
                .unwrap()
        };
        let json = export_json(33);
        assert_eq!(json, export_json(33));
        assert!(!json.contains("generation_time"));
        assert!(json.contains("\"doors\""));
    }
}
