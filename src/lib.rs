//! Procedural 2D dungeon layout generation
//!
//! A standalone library for generating grid-based dungeon layouts, suitable
//! for use with any game engine (Bevy, Godot, etc.). Two strategies are
//! provided: recursive binary space partitioning, and room scattering with
//! spanning-tree corridor routing. Both produce the same output type with
//! rooms, corridors, walls, floor tiles, and pillar positions.
//!
//! # Quick Start
//!
//! ```rust
//! use rust_dungeon_layout::*;
//!
//! // Partition a 30x30 map into rooms
//! let config = BspConfigBuilder::new()
//!     .seed(42)
//!     .map_size(30, 30).unwrap()
//!     .split_iterations(3)
//!     .build().unwrap();
//!
//! let layout = generate_bsp(&config).unwrap();
//! println!("{} rooms, {} walls", layout.rooms().len(), layout.walls().len());
//!
//! // Or scatter rooms and connect the largest ones
//! let config = ScatterConfigBuilder::new()
//!     .seed(42)
//!     .map_size(60, 60).unwrap()
//!     .room_counts(25, 6).unwrap()
//!     .build().unwrap();
//!
//! let layout = generate_scatter(&config).unwrap();
//! assert!(!layout.corridors().is_empty());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-room lookups using a KD-tree
//! - `serde`: Enables serialization support for configurations

// Modules
pub mod error;
pub mod config;
pub mod rect;
pub mod room;
pub mod corridor;
pub mod tiles;
pub mod graph;
pub mod bsp;
pub mod scatter;
pub mod layout;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{DungeonError, Result};
pub use config::{BspConfig, BspConfigBuilder, ScatterConfig, ScatterConfigBuilder};
pub use rect::Rect;
pub use room::Room;
pub use corridor::Corridor;
pub use tiles::{Ground, Wall};
pub use graph::{SpanningTree, SpanningTreeStrategy, STEdge};
pub use bsp::generate_bsp;
pub use scatter::generate_scatter;
pub use layout::DungeonLayout;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam's 2D vectors for convenience
pub use glam::{IVec2, Vec2};
