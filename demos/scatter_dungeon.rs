//! Example: Generate a room-scatter dungeon
//!
//! Demonstrates room scattering, main-room selection, and spanning-tree
//! corridor routing.

use rust_dungeon_layout::*;

fn main() -> Result<()> {
    println!("Room-Scatter Dungeon Example");
    println!("============================\n");

    let config = ScatterConfigBuilder::new()
        .seed(7)
        .map_size(60, 60)?
        .room_counts(25, 6)?
        .room_size_range(IVec2::new(4, 4), IVec2::new(10, 10))?
        .spanning_tree(SpanningTreeStrategy::Minimum)
        .build()?;

    let layout = generate_scatter(&config)?;

    println!(
        "Placed {} of {} requested rooms, kept {} main rooms",
        layout.accepted_rooms(),
        layout.requested_rooms(),
        layout.rooms().len()
    );

    for (i, room) in layout.rooms().iter().enumerate() {
        println!(
            "  room {}: center ({:.1}, {:.1}), size {}x{}",
            i,
            room.center().x,
            room.center().y,
            room.size().x as i32,
            room.size().y as i32
        );
    }

    println!("\n{} corridors connect them:", layout.corridors().len());
    for corridor in layout.corridors() {
        println!(
            "  ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            corridor.start().x,
            corridor.start().y,
            corridor.end().x,
            corridor.end().y
        );
    }

    #[cfg(feature = "spatial-index")]
    {
        let mut rng = rand::thread_rng();
        let spawn = layout.get_random_position(&mut rng);
        let room = layout.find_room_at(spawn);
        println!("\nSpawn point {:?} is in room {:?}", spawn, room);
    }

    Ok(())
}
