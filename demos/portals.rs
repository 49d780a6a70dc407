//! Portal routing demo: a box cave and a hex cave joined by two portals.
//!
//! Run: cargo run --bin portals [seed]
//!
//! Set `RUST_LOG=gridlink_paths=debug` to watch the router try portals.

use gridlink_core::{Layout, Point, Topology, Vec2};
use gridlink_demos::{cave, nearest_open, render};
use gridlink_paths::{
    CanCrossCheckType, FinderConfig, Grid, MultiGridRouter, PathOptions, PortalEnd,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

const BOX_W: i32 = 32;
const BOX_H: i32 = 12;
const HEX_W: i32 = 20;
const HEX_H: i32 = 10;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gridlink_paths=info,gridlink_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE_u64);
    if let Err(e) = run(seed) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    log::info!("seed {seed}: box cave {BOX_W}x{BOX_H}, hex cave {HEX_W}x{HEX_H}");

    let boxed = cave(&mut rng, Topology::Box, BOX_W, BOX_H)?;
    let hex = cave(&mut rng, Topology::HexPointyTop, HEX_W, HEX_H)?
        .with_layout(Layout::new(Vec2::new(BOX_W as f32 + 8.0, 0.0), 1.0));

    let mut router = MultiGridRouter::new();
    let config = FinderConfig::default().with_diagonals(true);
    let left = router.add_grid(Grid::new(boxed).with_config(config));
    let right = router.add_grid(Grid::new(hex));

    let pick = |router: &MultiGridRouter, id, x, y| {
        router
            .grid(id)
            .and_then(|g| nearest_open(g.cells(), Point::new(x, y)))
            .map(|cell| PortalEnd::new(id, cell))
            .ok_or("no open cell")
    };

    let start = pick(&router, left, 0, 0)?;
    let goal = pick(&router, right, HEX_W - 1, HEX_H - 1)?;
    let north = (pick(&router, left, BOX_W - 1, 1)?, pick(&router, right, 0, 1)?);
    let south = (
        pick(&router, left, BOX_W - 1, BOX_H - 2)?,
        pick(&router, right, 0, HEX_H - 2)?,
    );
    router.add_connection(north.0, north.1, 4.0);
    router.add_connection(south.0, south.1, 1.0);

    for (label, opts) in [
        ("default", PathOptions::default()),
        ("flat costs", PathOptions::default().with_ignore_cell_costs(true)),
        ("clearance 2", PathOptions::default().with_min_clearance(2)),
        (
            "through walls",
            PathOptions::default().with_can_cross_check(CanCrossCheckType::IgnoreAllCells),
        ),
    ] {
        let route = router.find_path(start, goal, &opts);
        println!("\n== {label}: {} steps, cost {:.2}", route.len(), route.cost);
        if route.is_empty() {
            println!("no route");
            continue;
        }
        for (id, portal, mark_start) in [(left, north.0, true), (right, north.1, false)] {
            let Some(grid) = router.grid(id) else {
                continue;
            };
            let cells: Vec<usize> = route
                .steps
                .iter()
                .filter(|s| s.grid == id)
                .map(|s| s.cell)
                .collect();
            let other = if id == left { south.0 } else { south.1 };
            let mut marks = vec![(portal.cell, 'N'), (other.cell, 'S')];
            if mark_start {
                marks.push((start.cell, '@'));
            } else {
                marks.push((goal.cell, '>'));
            }
            println!("{}", render(grid.cells(), &cells, &marks));
        }
    }

    let portal_count = router.connection_count() / 2;
    router.clear_connections();
    let cut = router.find_path(start, goal, &PathOptions::default());
    println!(
        "after removing {portal_count} portals: {}",
        if cut.is_empty() { "no route" } else { "route found" }
    );
    Ok(())
}
