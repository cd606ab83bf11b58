// src/lib.rs
//! # Dungeon Forge
//!
//! Assembles a connected 3D dungeon from prefabricated parts (an entrance,
//! rooms, special rooms, alternate entrances and hallways) by joining them
//! socket to socket while avoiding overlap, then sealing every socket left
//! unused.
//!
//! The generator only talks to its host through three seams: a
//! [`library::PartLibrary`] of templates, an [`scene::Instantiator`] that turns
//! templates into runtime parts, and a [`scene::SpatialQuery`] for overlap
//! tests. [`scene::Scene`] is an in-memory implementation of the last two.
//!
//! ```
//! use dungeon_forge::{DungeonGenerator, GeneratorConfig, Scene, TemplateLibrary};
//!
//! let library = TemplateLibrary::from_json(r#"{
//!     "entrance": [{ "name": "gate", "entry_points": [{ "position": [0.0, 0.0, 4.0] }],
//!                    "bounds": { "min": [-4.0, 0.0, -4.0], "max": [4.0, 4.0, 4.0] } }],
//!     "filler_walls": [{ "name": "brick" }]
//! }"#).unwrap();
//!
//! let mut scene = Scene::new();
//! let mut generator = DungeonGenerator::new(GeneratorConfig::default().with_room_count(1));
//! generator.run(&library, &mut scene).unwrap();
//! assert!(generator.is_generated());
//! assert_eq!(scene.fillers().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod library;
pub mod map;
pub mod scene;
pub mod utils;

pub use config::GeneratorConfig;
pub use error::DungeonError;
pub use generator::{DungeonExport, DungeonGenerator, GenerationReport, GenerationState, PlacementOutcome};
pub use library::{PartLibrary, TemplateLibrary};
pub use scene::{Instantiator, Scene, SpatialQuery, World};
