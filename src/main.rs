//! World preview CLI: generate an archipelago, render it as ASCII, and
//! print a summary of what the pipeline produced.

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use tradewinds::{generate_world, Terrain, World, WorldGenConfig};

#[derive(Parser)]
#[command(name = "tradewinds")]
#[command(about = "Procedural archipelago generator and navigation preview")]
#[command(version)]
struct Cli {
    /// World width in world units
    #[arg(long, default_value_t = 640.0)]
    width: f32,

    /// World height in world units
    #[arg(long, default_value_t = 640.0)]
    height: f32,

    /// Tile size in world units
    #[arg(long, default_value_t = 16.0)]
    tile_size: f32,

    /// Generation seed
    #[arg(long)]
    seed: Option<u64>,

    /// Elevation noise frequency (lower = larger islands)
    #[arg(long)]
    frequency: Option<f64>,

    /// Fixed village count per island
    #[arg(long)]
    villages_per_island: Option<u32>,

    /// Render the tile grid as ASCII
    #[arg(long)]
    map: bool,

    /// Emit the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = WorldGenConfig::default();
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(frequency) = cli.frequency {
        config.frequency = frequency;
    }
    if cli.villages_per_island.is_some() {
        config.villages_per_island = cli.villages_per_island;
    }

    let world = match generate_world(cli.width, cli.height, cli.tile_size, &config) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if cli.map {
        print_map(&world);
    }
    if cli.json {
        match serde_json::to_string_pretty(&summary_json(&world)) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_summary(&world);
    }
}

fn glyph(terrain: Terrain) -> char {
    match terrain {
        Terrain::Water => '.',
        Terrain::Reef => ',',
        Terrain::River => '~',
        Terrain::Coast => '+',
        Terrain::Land => '#',
        Terrain::Hill => '^',
        Terrain::Desert => 'd',
        Terrain::Forest => 'f',
        Terrain::Road => '=',
        Terrain::Village => 'V',
        Terrain::Native => 'N',
        Terrain::Mission => 'M',
    }
}

fn print_map(world: &World) {
    let grid = &world.grid;
    let mut line = String::with_capacity(grid.cols());
    for r in 0..grid.rows() {
        line.clear();
        for c in 0..grid.cols() {
            line.push(glyph(grid.get(r, c).unwrap_or(Terrain::Water)));
        }
        println!("{}", line);
    }
}

fn terrain_counts(world: &World) -> Vec<(&'static str, usize)> {
    let categories = [
        (Terrain::Water, "Water"),
        (Terrain::Reef, "Reef"),
        (Terrain::River, "River"),
        (Terrain::Coast, "Coast"),
        (Terrain::Land, "Land"),
        (Terrain::Hill, "Hill"),
        (Terrain::Desert, "Desert"),
        (Terrain::Forest, "Forest"),
        (Terrain::Road, "Road"),
        (Terrain::Village, "Village"),
        (Terrain::Native, "Native"),
        (Terrain::Mission, "Mission"),
    ];
    categories
        .into_iter()
        .map(|(terrain, name)| {
            let count = world.grid.iter().filter(|&(_, _, t)| t == terrain).count();
            (name, count)
        })
        .filter(|&(_, count)| count > 0)
        .collect()
}

fn print_summary(world: &World) {
    let total = world.grid.rows() * world.grid.cols();
    println!("=== World Summary ===");
    println!("Seed: {}", world.seed);
    println!("Grid: {}x{} tiles", world.grid.cols(), world.grid.rows());
    println!(
        "Islands: {} (largest {})",
        world.islands.len(),
        world.islands.iter().map(|i| i.size).max().unwrap_or(0)
    );
    println!(
        "Settlements: {} villages, {} natives, {} missions",
        world.villages.len(),
        world.natives.len(),
        world.missions.len()
    );
    println!("\nTerrain:");
    for (name, count) in terrain_counts(world) {
        let pct = count as f32 / total as f32 * 100.0;
        println!("  {:<8} {:>6} ({:.1}%)", name, count, pct);
    }
}

fn summary_json(world: &World) -> serde_json::Value {
    json!({
        "seed": world.seed,
        "rows": world.grid.rows(),
        "cols": world.grid.cols(),
        "islands": world.islands.iter().map(|i| json!({
            "id": i.id,
            "size": i.size,
            "coast_tiles": i.coast.len(),
        })).collect::<Vec<_>>(),
        "villages": world.villages.len(),
        "natives": world.natives.len(),
        "missions": world.missions.len(),
        "terrain": terrain_counts(world)
            .into_iter()
            .map(|(name, count)| (name.to_string(), json!(count)))
            .collect::<serde_json::Map<_, _>>(),
    })
}
