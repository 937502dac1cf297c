//! tiny — smallest end-to-end run of the cartograph workspace.
//!
//! Builds an atlas over a synthetic harbour town, routes between a few
//! addresses for every vehicle class, and answers a viewport query per
//! category.  Set `RUST_LOG=debug` to see the pipeline stages.

mod town;

use std::time::Instant;

use anyhow::Result;
use log::info;

use cg_atlas::{AtlasBuilder, AtlasConfig, AtlasHandle};
use cg_core::{Category, GeoPoint, Rect, Vehicle};
use cg_spatial::Waypoint;

// ── Queries ───────────────────────────────────────────────────────────────────

const TRIPS: &[(&str, &str)] = &[
    ("Skovvej 2, 4000 Havneby", "Havnegade 30, 4000 Havneby"),
    ("vestvej 8", "skovvej 11"),
    ("Havnegade 4", "Strandvejen 1"),
];

fn main() -> Result<()> {
    env_logger::init();

    println!("=== tiny — cartograph ===");

    // 1. Build.
    let started = Instant::now();
    let atlas = AtlasBuilder::new(town::dataset()?)
        .config(AtlasConfig::default())
        .addresses(town::address_book())
        .build()?;
    println!("Built in {:.1?}", started.elapsed());

    for (category, paths) in atlas.paths().iter() {
        println!("  {:<10} {:>3} paths", category.as_str(), paths.len());
    }
    println!(
        "Road graph: {} vertices, {} edges",
        atlas.graph().vertex_count(),
        atlas.graph().edge_count()
    );
    for issue in atlas.stitch_issues() {
        println!("  stitch issue: {issue}");
    }

    let handle = AtlasHandle::new(atlas);
    let atlas = handle.load();

    // 2. Address routes.
    println!();
    for &(from, to) in TRIPS {
        for vehicle in [Vehicle::Car, Vehicle::Bike, Vehicle::Walk] {
            match atlas.route(from, to, vehicle) {
                Ok(trip) => println!(
                    "{from} → {to} [{vehicle}]: {:.2} km, {:.0} min, {} edges",
                    trip.distance_km(),
                    trip.duration_hours * 60.0,
                    trip.route.edges.len()
                ),
                Err(err) => println!("{from} → {to} [{vehicle}]: {err}"),
            }
        }
    }

    // 3. Coordinate batch.
    let queries = [
        (Waypoint::Position(GeoPoint::new(55.6801, 12.5601)), Waypoint::Position(GeoPoint::new(55.6800, 12.5841))),
        (Waypoint::Position(GeoPoint::new(55.6901, 12.5641)), Waypoint::Position(GeoPoint::new(55.6750, 12.5600))),
    ];
    let results = atlas.route_many(&queries, Vehicle::Car);
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(trip) => println!("batch #{i}: {:.2} km", trip.distance_km()),
            Err(err) => println!("batch #{i}: {err}"),
        }
    }

    // 4. Viewport.
    println!();
    let viewport = Rect::new(55.678, 55.692, 12.558, 12.570);
    for category in Category::ALL {
        let hits = atlas.range_query(category, &viewport);
        if !hits.is_empty() {
            println!("viewport {:<10} {:>3} paths", category.as_str(), hits.len());
        }
    }

    info!("done");
    Ok(())
}
