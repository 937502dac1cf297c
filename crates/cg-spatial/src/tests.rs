//! Unit tests for cg-spatial.
//!
//! Graphs are built from hand-placed nodes around (55°N, 12°E) so distances
//! are small and easy to reason about.

#[cfg(test)]
mod helpers {
    use cg_core::{Category, GeoPoint, Node, NodeId, NodeStore, RoadInfo, VertexId, WayId};
    use cg_paths::LinePath;

    use crate::{Graph, GraphBuilder};

    pub fn store(nodes: &[(i64, f64, f64)]) -> NodeStore {
        NodeStore::from_nodes(nodes.iter().map(|&(id, lat, lon)| Node::new(id, lat, lon))).unwrap()
    }

    pub fn path(store: &NodeStore, way: i64, raw: &[i64], category: Category) -> LinePath {
        let ids: Vec<NodeId> = raw.iter().copied().map(NodeId).collect();
        LinePath::materialize(WayId(way), &ids, category, false, store)
    }

    pub fn named(name: &str) -> RoadInfo {
        RoadInfo { name: Some(name.to_owned()), ..RoadInfo::default() }
    }

    pub fn pos(store: &NodeStore, id: i64) -> GeoPoint {
        store.by_id(NodeId(id)).unwrap().pos
    }

    pub fn v(graph: &Graph, store: &NodeStore, id: i64) -> VertexId {
        graph.vertex_of(store.resolve(NodeId(id))).unwrap()
    }

    /// Five nodes, two named streets:
    ///
    /// ```text
    ///   4 (55.03, 12.00)
    ///   |  \
    ///   |    \ Long Road
    ///   |      5 (55.01, 12.02)
    ///   |      |
    ///   1 ---- 2 ---- 3      Main Street: 1-2-3-5
    /// ```
    ///
    /// Main Street 1→5 is about 2.4 km; the Long Road detour is about 5.9 km.
    pub fn town() -> (NodeStore, Graph) {
        let store = store(&[
            (1, 55.00, 12.00),
            (2, 55.00, 12.01),
            (3, 55.00, 12.02),
            (4, 55.03, 12.00),
            (5, 55.01, 12.02),
        ]);
        let mut b = GraphBuilder::new(&store);
        b.add_line_path(&path(&store, 1, &[1, 2, 3, 5], Category::Road), &named("Main Street"));
        b.add_line_path(&path(&store, 2, &[1, 4, 5], Category::Road), &named("Long Road"));
        let graph = b.build();
        (store, graph)
    }

    pub fn dist(store: &NodeStore, a: i64, b: i64) -> f64 {
        pos(store, a).distance_km(pos(store, b))
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod building {
    use cg_core::{Category, Dataset, NodeId, NodeIdx, Rect, RoadInfo, Way};
    use cg_paths::{StitchConfig, Stitcher};

    use super::helpers::{dist, named, path, store, town, v};
    use crate::{Graph, GraphBuilder, SpatialError};

    #[test]
    fn empty_build() {
        let graph = Graph::empty();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn two_way_path_emits_both_directions() {
        let (store, graph) = town();
        // 3 + 2 consecutive pairs, each in both directions.
        assert_eq!(graph.edge_count(), 10);
        assert_eq!(graph.vertex_count(), 5);

        // Forward edge first, then its reverse.
        let e0 = &graph.edges[0];
        let e1 = &graph.edges[1];
        assert_eq!((e0.source, e0.target), (v(&graph, &store, 1), v(&graph, &store, 2)));
        assert_eq!((e1.source, e1.target), (e0.target, e0.source));
        assert!((e0.length_km - dist(&store, 1, 2)).abs() < 1e-12);
    }

    #[test]
    fn edge_count_per_path() {
        let store = store(&[(1, 0.0, 0.0), (2, 0.0, 0.1), (3, 0.0, 0.2), (4, 0.0, 0.3)]);
        let p = path(&store, 1, &[1, 2, 3, 4], Category::Road);

        let mut two_way = GraphBuilder::new(&store);
        assert_eq!(two_way.add_line_path(&p, &RoadInfo::default()), 6);

        let mut one_way = GraphBuilder::new(&store);
        let road = RoadInfo { one_way: true, ..RoadInfo::default() };
        assert_eq!(one_way.add_line_path(&p, &road), 3);
        let graph = one_way.build();
        assert_eq!(graph.out_degree(graph.vertex_of(store.resolve(NodeId(4))).unwrap()), 0);
    }

    #[test]
    fn unresolved_nodes_are_skipped() {
        let store = store(&[(1, 0.0, 0.0), (2, 0.0, 0.1), (4, 0.0, 0.3)]);
        // Node 3 is unknown: pairs (2,3) and (3,4) are dropped.
        let p = path(&store, 1, &[1, 2, 3, 4], Category::Road);
        let mut b = GraphBuilder::new(&store);
        assert_eq!(b.add_line_path(&p, &RoadInfo::default()), 2);
        let graph = b.build();

        // Node 4 never appeared on an edge, so it is not a vertex.
        assert_eq!(graph.vertex_count(), 2);
        let n4 = store.resolve(NodeId(4));
        assert!(graph.vertex_of(n4).is_none());
        assert!(matches!(graph.require_vertex(n4), Err(SpatialError::NodeNotInGraph(n)) if n == n4));
        assert!(graph.require_vertex(NodeIdx::INVALID).is_err());
    }

    #[test]
    fn csr_out_edges_share_source() {
        let (store, graph) = town();
        let n1 = v(&graph, &store, 1);
        assert_eq!(graph.out_degree(n1), 2); // 1→2, 1→4
        for e in graph.out_edges(n1) {
            assert_eq!(graph.edge(e).source, n1);
        }
        assert_eq!(graph.out_degree(v(&graph, &store, 5)), 2); // 5→3, 5→4
    }

    #[test]
    fn name_index_is_sorted() {
        let (_, graph) = town();
        let names: Vec<Option<&str>> = graph
            .edges_by_name()
            .iter()
            .map(|&e| graph.edge(e).name.as_deref())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(graph.find_name("Main Street").is_some());
        assert!(graph.find_name("main street").is_none());
    }

    #[test]
    fn from_parts_round_trip() {
        let (_, graph) = town();
        let rebuilt = Graph::from_parts(graph.to_parts());
        assert_eq!(rebuilt.to_parts(), graph.to_parts());
        for i in 0..graph.vertex_count() {
            let v = cg_core::VertexId(i as u32);
            assert_eq!(
                rebuilt.out_edges(v).collect::<Vec<_>>(),
                graph.out_edges(v).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn from_stitched_paths_carries_road_attributes() {
        let store = store(&[(1, 55.0, 12.0), (2, 55.0, 12.01), (3, 55.01, 12.01)]);
        let ways = vec![
            Way::new(1, vec![NodeId(1), NodeId(2)], Category::Road).with_road(named("Strandvejen")),
            Way::new(2, vec![NodeId(2), NodeId(3)], Category::Road)
                .with_road(RoadInfo { one_way: true, max_speed_kmh: Some(30), ..RoadInfo::default() }),
            Way::new(3, vec![NodeId(1), NodeId(3)], Category::Building),
        ];
        let dataset = Dataset::new(store, ways, vec![], Rect::new(54.0, 56.0, 11.0, 13.0)).unwrap();
        let stitched = Stitcher::new(StitchConfig::default()).run(&dataset);

        let graph = Graph::from_paths(stitched.paths.routable(), &dataset);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges[0].name.as_deref(), Some("Strandvejen"));
        assert!(graph.edges[2].one_way);
        assert_eq!(graph.edges[2].max_speed_kmh, Some(30));
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use cg_core::GeoPoint;

    use super::helpers::{pos, town, v};
    use crate::{DEFAULT_RESOLVE_WINDOW, Graph, SpatialError, Waypoint, resolve};

    #[test]
    fn snap_exact_and_nearest() {
        let (store, graph) = town();
        assert_eq!(graph.snap_to_vertex(pos(&store, 4)), Some(v(&graph, &store, 4)));
        let near_2 = GeoPoint::new(55.0005, 12.009);
        assert_eq!(graph.snap_to_vertex(near_2), Some(v(&graph, &store, 2)));
    }

    #[test]
    fn position_waypoint() {
        let (store, graph) = town();
        let near_5 = GeoPoint::new(55.0101, 12.0199);
        let got = resolve(&graph, Waypoint::Position(near_5), DEFAULT_RESOLVE_WINDOW).unwrap();
        assert_eq!(got, v(&graph, &store, 5));
    }

    #[test]
    fn empty_graph_has_nothing_to_snap_to() {
        let graph = Graph::empty();
        let err = resolve(&graph, Waypoint::Position(GeoPoint::new(0.0, 0.0)), 10).unwrap_err();
        assert!(matches!(err, SpatialError::EmptyGraph));
    }
}

// ── Street resolution ─────────────────────────────────────────────────────────

#[cfg(test)]
mod resolution {
    use cg_core::GeoPoint;

    use super::helpers::{pos, town, v};
    use crate::{Address, DEFAULT_RESOLVE_WINDOW, SpatialError, Waypoint, resolve, resolve_street};

    #[test_log::test]
    fn picks_closest_target_on_the_street() {
        let (store, graph) = town();
        let got = resolve_street(&graph, "Main Street", pos(&store, 3), DEFAULT_RESOLVE_WINDOW).unwrap();
        assert_eq!(got, v(&graph, &store, 3));

        let near_1 = GeoPoint::new(54.999, 11.999);
        let got = resolve_street(&graph, "Main Street", near_1, DEFAULT_RESOLVE_WINDOW).unwrap();
        assert_eq!(got, v(&graph, &store, 1));
    }

    #[test]
    fn only_edges_of_that_street_count() {
        let (store, graph) = town();
        // Node 4 is only on Long Road; Main Street's closest vertex is 5.
        let got = resolve_street(&graph, "Main Street", pos(&store, 4), DEFAULT_RESOLVE_WINDOW).unwrap();
        assert_eq!(got, v(&graph, &store, 5));
        let got = resolve_street(&graph, "Long Road", pos(&store, 4), DEFAULT_RESOLVE_WINDOW).unwrap();
        assert_eq!(got, v(&graph, &store, 4));
    }

    #[test]
    fn zero_window_still_uses_the_hit() {
        let (store, graph) = town();
        assert!(resolve_street(&graph, "Long Road", pos(&store, 4), 0).is_ok());
    }

    #[test]
    fn unbounded_window_scans_the_whole_index() {
        let (store, graph) = town();
        for id in [1, 3, 4, 5] {
            let wide = resolve_street(&graph, "Main Street", pos(&store, id), usize::MAX).unwrap();
            let default = resolve_street(&graph, "Main Street", pos(&store, id), DEFAULT_RESOLVE_WINDOW).unwrap();
            assert_eq!(wide, default);
        }
        let err = resolve_street(&graph, "Nowhere Lane", pos(&store, 1), usize::MAX).unwrap_err();
        assert!(matches!(err, SpatialError::AddressNotFound(_)));
    }

    #[test]
    fn unknown_street() {
        let (store, graph) = town();
        let err = resolve_street(&graph, "Nowhere Lane", pos(&store, 1), DEFAULT_RESOLVE_WINDOW).unwrap_err();
        assert!(matches!(err, SpatialError::AddressNotFound(s) if s == "Nowhere Lane"));
    }

    #[test]
    fn address_converts_to_street_waypoint() {
        let (store, graph) = town();
        let addr = Address::new("Long Road", pos(&store, 5)).with_house_number("7");
        let got = resolve(&graph, Waypoint::from(&addr), DEFAULT_RESOLVE_WINDOW).unwrap();
        assert_eq!(got, v(&graph, &store, 5));
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use cg_core::{Category, RoadInfo, VertexId, Vehicle};

    use super::helpers::{dist, path, store, town, v};
    use crate::{DijkstraRouter, GraphBuilder, Router, SpatialError};

    #[test]
    fn trivial_same_vertex() {
        let (store, graph) = town();
        let n1 = v(&graph, &store, 1);
        let r = DijkstraRouter.route(&graph, n1, n1, Vehicle::Car).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.distance_km, 0.0);
    }

    #[test]
    fn shortest_path_avoids_detour() {
        let (store, graph) = town();
        let (n1, n5) = (v(&graph, &store, 1), v(&graph, &store, 5));
        let route = DijkstraRouter.route(&graph, n1, n5, Vehicle::Car).unwrap();

        assert_eq!(route.edges.len(), 3);
        let expected = dist(&store, 1, 2) + dist(&store, 2, 3) + dist(&store, 3, 5);
        assert!((route.distance_km - expected).abs() < 1e-9);
        assert!(route.distance_km < dist(&store, 1, 4) + dist(&store, 4, 5));

        // Edge sequence is connected from source to destination.
        assert_eq!(graph.edge(route.edges[0]).source, n1);
        assert_eq!(graph.edge(*route.edges.last().unwrap()).target, n5);
        for w in route.edges.windows(2) {
            assert_eq!(graph.edge(w[0]).target, graph.edge(w[1]).source);
        }
    }

    #[test]
    fn route_is_symmetric_on_two_way_roads() {
        let (store, graph) = town();
        let (n1, n5) = (v(&graph, &store, 1), v(&graph, &store, 5));
        let there = DijkstraRouter.route(&graph, n1, n5, Vehicle::Car).unwrap();
        let back = DijkstraRouter.route(&graph, n5, n1, Vehicle::Car).unwrap();
        assert!((there.distance_km - back.distance_km).abs() < 1e-9);
    }

    #[test_log::test]
    fn disconnected_is_unreachable() {
        let store = store(&[(1, 0.0, 0.0), (2, 0.0, 0.1), (3, 1.0, 0.0), (4, 1.0, 0.1)]);
        let mut b = GraphBuilder::new(&store);
        b.add_line_path(&path(&store, 1, &[1, 2], Category::Road), &RoadInfo::default());
        b.add_line_path(&path(&store, 2, &[3, 4], Category::Road), &RoadInfo::default());
        let graph = b.build();

        let err = DijkstraRouter
            .route(&graph, v(&graph, &store, 1), v(&graph, &store, 4), Vehicle::Car)
            .unwrap_err();
        match err {
            SpatialError::Unreachable { distance, .. } => assert!(distance.is_infinite()),
            other => panic!("expected Unreachable, got {other:?}"),
        }
    }

    #[test]
    fn one_way_blocks_return() {
        let store = store(&[(1, 0.0, 0.0), (2, 0.0, 0.1)]);
        let mut b = GraphBuilder::new(&store);
        let road = RoadInfo { one_way: true, ..RoadInfo::default() };
        b.add_line_path(&path(&store, 1, &[1, 2], Category::Road), &road);
        let graph = b.build();
        let (a, c) = (v(&graph, &store, 1), v(&graph, &store, 2));

        assert!(DijkstraRouter.route(&graph, a, c, Vehicle::Car).is_ok());
        assert!(matches!(
            DijkstraRouter.route(&graph, c, a, Vehicle::Car),
            Err(SpatialError::Unreachable { .. })
        ));
    }

    #[test]
    fn vehicle_filters_edges() {
        // 1 -road- 2 -footway- 3, plus a motorway 1-3.
        let store = store(&[(1, 0.0, 0.0), (2, 0.0, 0.1), (3, 0.0, 0.2)]);
        let mut b = GraphBuilder::new(&store);
        b.add_line_path(&path(&store, 1, &[1, 2], Category::Road), &RoadInfo::default());
        b.add_line_path(&path(&store, 2, &[2, 3], Category::Footway), &RoadInfo::default());
        b.add_line_path(&path(&store, 3, &[1, 3], Category::Motorway), &RoadInfo::default());
        let graph = b.build();
        let (a, c) = (v(&graph, &store, 1), v(&graph, &store, 3));

        let car = DijkstraRouter.route(&graph, a, c, Vehicle::Car).unwrap();
        assert_eq!(car.edges.len(), 1);
        assert_eq!(graph.edge(car.edges[0]).category, Category::Motorway);

        let walk = DijkstraRouter.route(&graph, a, c, Vehicle::Walk).unwrap();
        assert_eq!(walk.edges.len(), 2);

        // Bikes may use the road but neither the footway nor the motorway.
        assert!(DijkstraRouter.route(&graph, a, c, Vehicle::Bike).is_err());
    }

    #[test]
    fn out_of_range_vertex() {
        let (store, graph) = town();
        let err = DijkstraRouter
            .route(&graph, v(&graph, &store, 1), VertexId(999), Vehicle::Car)
            .unwrap_err();
        assert!(matches!(err, SpatialError::UnknownVertex(VertexId(999))));
    }

    #[test]
    fn duration_uses_speed_limits() {
        let store = store(&[(1, 0.0, 0.0), (2, 0.0, 0.1)]);
        let mut b = GraphBuilder::new(&store);
        let road = RoadInfo { max_speed_kmh: Some(50), ..RoadInfo::default() };
        b.add_line_path(&path(&store, 1, &[1, 2], Category::Road), &road);
        let graph = b.build();
        let (a, c) = (v(&graph, &store, 1), v(&graph, &store, 2));

        let route = DijkstraRouter.route(&graph, a, c, Vehicle::Car).unwrap();
        let car = route.duration_hours(&graph, Vehicle::Car);
        let walk = route.duration_hours(&graph, Vehicle::Walk);
        assert!((car - route.distance_km / 50.0).abs() < 1e-12);
        assert!((walk - route.distance_km / 5.0).abs() < 1e-12);
    }
}

// ── Randomized optimality ─────────────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use cg_core::{Category, RoadInfo, VertexId, Vehicle};

    use super::helpers::{path, store};
    use crate::{DijkstraRouter, Graph, GraphBuilder, Router, SpatialError};

    fn random_graph(seed: u64, nodes: i64, paths: usize) -> Graph {
        let mut rng = SmallRng::seed_from_u64(seed);
        let raw: Vec<(i64, f64, f64)> = (1..=nodes)
            .map(|id| (id, 55.0 + rng.gen_range(0.0..0.1), 12.0 + rng.gen_range(0.0..0.1)))
            .collect();
        let store = store(&raw);
        let mut b = GraphBuilder::new(&store);
        for way in 0..paths {
            let a = rng.gen_range(1..=nodes);
            let c = rng.gen_range(1..=nodes);
            if a == c {
                continue;
            }
            let road = RoadInfo { one_way: rng.gen_bool(0.3), ..RoadInfo::default() };
            b.add_line_path(&path(&store, way as i64, &[a, c], Category::Road), &road);
        }
        b.build()
    }

    /// Plain Bellman-Ford distances from `from`.
    fn reference(graph: &Graph, from: VertexId) -> Vec<f64> {
        let mut dist = vec![f64::INFINITY; graph.vertex_count()];
        dist[from.index()] = 0.0;
        for _ in 0..graph.vertex_count() {
            let mut changed = false;
            for e in &graph.edges {
                let d = dist[e.source.index()] + e.length_km;
                if d < dist[e.target.index()] {
                    dist[e.target.index()] = d;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        dist
    }

    #[test_log::test]
    fn matches_bellman_ford() {
        for seed in [1, 2, 3] {
            let graph = random_graph(seed, 30, 45);
            for s in 0..graph.vertex_count().min(6) {
                let from = VertexId(s as u32);
                let expected = reference(&graph, from);
                for t in 0..graph.vertex_count() {
                    let to = VertexId(t as u32);
                    match DijkstraRouter.route(&graph, from, to, Vehicle::Car) {
                        Ok(route) => {
                            assert!((route.distance_km - expected[t]).abs() < 1e-9);
                            let sum: f64 = route.edges.iter().map(|&e| graph.edge(e).length_km).sum();
                            assert!((sum - route.distance_km).abs() < 1e-9);
                        }
                        Err(SpatialError::Unreachable { .. }) => assert!(expected[t].is_infinite()),
                        Err(other) => panic!("unexpected error {other}"),
                    }
                }
            }
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let a = random_graph(9, 25, 40);
        let b = random_graph(9, 25, 40);
        assert_eq!(a.to_parts(), b.to_parts());
        let (from, to) = (VertexId(0), VertexId((a.vertex_count() - 1) as u32));
        let ra = DijkstraRouter.route(&a, from, to, Vehicle::Car).ok();
        let rb = DijkstraRouter.route(&b, from, to, Vehicle::Car).ok();
        assert_eq!(ra, rb);
    }
}

// ── Address book ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod addresses {
    use cg_core::GeoPoint;

    use crate::address::normalize;
    use crate::{Address, AddressBook, SpatialError};

    fn book() -> AddressBook {
        let p = GeoPoint::new(55.68, 12.57);
        AddressBook::from_addresses([
            Address::new("Nørregade", p).with_house_number("4").with_postcode("1165").with_city("København K"),
            Address::new("Nørregade", p).with_house_number("10").with_postcode("1165").with_city("København K"),
            Address::new("Main Street", p).with_house_number("4"),
            Address::new("Main Streetway", p),
        ])
    }

    #[test]
    fn label_and_normalize() {
        let a = Address::new("Nørregade", GeoPoint::new(0.0, 0.0))
            .with_house_number("4")
            .with_postcode("1165")
            .with_city("København K");
        assert_eq!(a.label(), "Nørregade 4, 1165 København K");
        assert_eq!(normalize("  Nørregade 4,1165   KØBENHAVN k "), "nørregade 4 1165 københavn k");
    }

    #[test]
    fn exact_lookup_ignores_case_and_spacing() {
        let book = book();
        assert_eq!(book.len(), 4);
        let hit = book.find("nørregade 10,  1165 københavn k").unwrap();
        assert_eq!(hit.house_number.as_deref(), Some("10"));
    }

    #[test]
    fn prefix_lookup_respects_word_boundaries() {
        let book = book();
        assert_eq!(book.find("main street").unwrap().house_number.as_deref(), Some("4"));
        assert!(book.find("main str").is_none());
        assert!(book.find("").is_none());
    }

    #[test]
    fn lookup_miss_is_an_error() {
        let err = book().lookup("Vestergade 1").unwrap_err();
        assert!(matches!(err, SpatialError::AddressNotFound(s) if s == "Vestergade 1"));
    }

    #[test]
    fn prefix_search_for_completion() {
        let book = book();
        assert_eq!(book.with_prefix("Nørre", 10).len(), 2);
        assert_eq!(book.with_prefix("main", 10).len(), 2);
        assert_eq!(book.with_prefix("main", 1).len(), 1);
        assert!(book.with_prefix("zzz", 10).is_empty());
    }

    #[test]
    fn duplicates_keep_the_latest() {
        let mut book = AddressBook::from_addresses([
            Address::new("Torvet", GeoPoint::new(1.0, 1.0)),
            Address::new("Torvet", GeoPoint::new(2.0, 2.0)),
        ]);
        assert_eq!(book.len(), 1);
        assert_eq!(book.find("torvet").unwrap().pos, GeoPoint::new(2.0, 2.0));

        book.insert(Address::new("TORVET", GeoPoint::new(3.0, 3.0)));
        assert_eq!(book.len(), 1);
        book.insert(Address::new("Algade", GeoPoint::new(4.0, 4.0)));
        assert_eq!(book.iter().next().unwrap().street, "Algade");
    }
}

// ── KD-tree ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kdtree {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use cg_core::geo::Axis;
    use cg_core::{Category, Rect};

    use super::helpers::{path, store};
    use crate::{IndexConfig, KdTree};

    fn random_boxes(seed: u64, n: usize) -> Vec<Rect> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let lat = rng.gen_range(55.0..56.0);
                let lon = rng.gen_range(12.0..13.0);
                let h = rng.gen_range(0.0..0.05);
                let w = rng.gen_range(0.0..0.05);
                Rect::new(lat, lat + h, lon, lon + w)
            })
            .collect()
    }

    fn brute_force(boxes: &[Rect], area: &Rect) -> Vec<usize> {
        (0..boxes.len()).filter(|&i| boxes[i].intersects(area)).collect()
    }

    const BOUNDS: Rect = Rect { min_lat: 55.0, max_lat: 56.0, min_lon: 12.0, max_lon: 13.0 };

    #[test]
    fn full_bounds_returns_everything_once() {
        let boxes = random_boxes(1, 500);
        let tree = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        let all = tree.query(&tree.bounds());
        assert_eq!(all, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn disjoint_query_is_empty() {
        let boxes = random_boxes(2, 200);
        let tree = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        assert!(tree.query(&Rect::new(10.0, 11.0, 10.0, 11.0)).is_empty());
        assert!(tree.query(&Rect::EMPTY).is_empty());
    }

    #[test]
    fn matches_brute_force() {
        let boxes = random_boxes(3, 400);
        let tree = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        let mut rng = SmallRng::seed_from_u64(33);
        for _ in 0..100 {
            let lat = rng.gen_range(54.9..56.0);
            let lon = rng.gen_range(11.9..13.0);
            let area = Rect::new(lat, lat + rng.gen_range(0.0..0.3), lon, lon + rng.gen_range(0.0..0.3));
            assert_eq!(tree.query(&area), brute_force(&boxes, &area));
        }
    }

    #[test]
    fn splits_lon_first_and_respects_limits() {
        let boxes = random_boxes(4, 100);
        let tree = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        assert!(matches!(tree.root_split(), Some((Axis::Lon, _))));
        assert!(tree.depth() <= IndexConfig::default().max_depth);

        let small = KdTree::build(&boxes[..8], BOUNDS, &IndexConfig::default());
        assert!(small.root_split().is_none());
        assert_eq!(small.node_count(), 1);

        let flat = KdTree::build(&boxes, BOUNDS, &IndexConfig { leaf_capacity: 1, max_depth: 0 });
        assert_eq!(flat.node_count(), 1);
        assert_eq!(flat.query(&BOUNDS).len(), 100);
    }

    #[test]
    fn identical_boxes_stop_splitting() {
        let boxes = vec![Rect::new(55.5, 55.6, 12.5, 12.6); 50];
        let tree = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.query(&Rect::new(55.55, 55.55, 12.55, 12.55)).len(), 50);
    }

    #[test]
    fn geometry_outside_bounds_is_reachable() {
        let mut boxes = random_boxes(5, 40);
        boxes.push(Rect::new(60.0, 60.1, 20.0, 20.1));
        let tree = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        assert_eq!(tree.query(&Rect::new(59.0, 61.0, 19.0, 21.0)), vec![40]);
    }

    #[test]
    fn rebuild_answers_identically() {
        let boxes = random_boxes(6, 300);
        let a = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        let b = KdTree::build(&boxes, BOUNDS, &IndexConfig::default());
        let area = Rect::new(55.2, 55.7, 12.1, 12.4);
        assert_eq!(a.query(&area), b.query(&area));
    }

    #[test]
    fn indexes_line_paths() {
        let store = store(&[(1, 55.0, 12.0), (2, 55.1, 12.1), (3, 55.5, 12.5), (4, 55.6, 12.6)]);
        let paths = vec![
            path(&store, 1, &[1, 2], Category::Forest),
            path(&store, 2, &[3, 4], Category::Forest),
            path(&store, 3, &[99], Category::Forest), // nothing resolves
        ];
        let tree = KdTree::build(&paths, BOUNDS, &IndexConfig::default());
        let hits = tree.query_items(&paths, &Rect::new(55.05, 55.2, 12.0, 12.2));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].way, cg_core::WayId(1));
        assert_eq!(tree.query(&BOUNDS), vec![0, 1]);
    }
}
