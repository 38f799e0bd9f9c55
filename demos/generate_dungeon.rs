//! Example: Generate a BSP dungeon and print it as ASCII
//!
//! Demonstrates the basic usage of the partitioning pipeline.

use rust_dungeon_layout::*;

fn main() -> Result<()> {
    println!("BSP Dungeon Generation Example");
    println!("==============================\n");

    let config = BspConfigBuilder::new()
        .seed(42)
        .map_size(48, 24)?
        .split_iterations(4)
        .build()?;

    println!("Seed: {}", config.seed);
    println!("Map: {}x{}", config.map_size.x, config.map_size.y);

    let layout = generate_bsp(&config)?;

    println!("\nGenerated:");
    println!("  {} rooms", layout.rooms().len());
    println!("  {} corridors", layout.corridors().len());
    println!("  {} walls", layout.walls().len());
    println!("  {} ground tiles", layout.grounds().len());
    println!("  {} pillars", layout.pillars().len());
    if layout.skipped_corridors() > 0 {
        println!(
            "  {} corridors skipped; some regions are unreachable",
            layout.skipped_corridors()
        );
    }

    println!("\n{}", render(&layout));
    Ok(())
}

/// Render ground tiles as '.', everything else as ' '
fn render(layout: &DungeonLayout) -> String {
    let size = layout.map_size();
    let mut rows = vec![vec![' '; size.x as usize]; size.y as usize];
    for ground in layout.grounds() {
        rows[ground.y as usize][ground.x as usize] = '.';
    }

    // Top row last so the origin sits at the bottom left.
    rows.iter()
        .rev()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
