//! Unit tests for cg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId, NodeIdx, VertexId, WayId};

    #[test]
    fn index_roundtrip() {
        let id = VertexId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VertexId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeIdx::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert!(!NodeIdx::default().is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(7).to_string(), "VertexId(7)");
        assert_eq!(NodeId(12).to_string(), "node/12");
        assert_eq!(WayId(-3).to_string(), "way/-3");
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::Axis;
    use crate::{GeoPoint, Rect};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(55.676, 12.568);
        assert_eq!(p.distance_km(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(55.0, 12.0);
        let b = GeoPoint::new(56.0, 12.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(55.6761, 12.5683);
        let b = GeoPoint::new(55.4038, 10.4024);
        assert_eq!(a.distance_km(b), b.distance_km(a));
        assert!(a.distance_km(b) > 0.0);
    }

    #[test]
    fn distance_grows_with_separation() {
        let origin = GeoPoint::new(10.0, 10.0);
        let mut last = 0.0;
        for step in 1..=20 {
            let d = origin.distance_km(GeoPoint::new(10.0 + step as f64 * 0.5, 10.0));
            assert!(d > last, "step {step}: {d} <= {last}");
            last = d;
        }
    }

    #[test]
    fn rect_intersection_is_inclusive() {
        let a = Rect::new(0.0, 1.0, 0.0, 1.0);
        let touching = Rect::new(1.0, 2.0, 1.0, 2.0);
        let apart = Rect::new(1.5, 2.0, 0.0, 1.0);
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
        assert!(!a.intersects(&Rect::EMPTY));
    }

    #[test]
    fn rect_from_points_and_split() {
        let r = Rect::from_points([GeoPoint::new(1.0, 5.0), GeoPoint::new(3.0, 2.0)]);
        assert_eq!(r, Rect::new(1.0, 3.0, 2.0, 5.0));

        let (low, high) = r.split(Axis::Lon, 4.0);
        assert_eq!(low.max_lon, 4.0);
        assert_eq!(high.min_lon, 4.0);
        assert_eq!(low.min_lat, r.min_lat);
        assert!(Rect::from_points([]).is_empty());
    }
}

#[cfg(test)]
mod category {
    use crate::Category;

    #[test]
    fn classification_is_total() {
        assert_eq!(Category::classify([("amenity", "bench")]), Category::Unknown);
        assert_eq!(Category::classify([]), Category::Unknown);
        assert_eq!(Category::classify([("highway", "bus_stop")]), Category::Unknown);
    }

    #[test]
    fn common_tags() {
        assert_eq!(Category::classify([("highway", "residential")]), Category::Road);
        assert_eq!(Category::classify([("highway", "motorway_link")]), Category::Motorway);
        assert_eq!(Category::classify([("highway", "cycleway")]), Category::Cycleway);
        assert_eq!(Category::classify([("natural", "coastline")]), Category::Coastline);
        assert_eq!(Category::classify([("natural", "wood")]), Category::Forest);
        assert_eq!(Category::classify([("building", "yes")]), Category::Building);
        assert_eq!(Category::classify([("place", "islet")]), Category::Place);
    }

    #[test]
    fn highway_wins_over_building() {
        let tags = [("building", "yes"), ("highway", "service")];
        assert_eq!(Category::classify(tags), Category::Road);
    }

    #[test]
    fn fill_flags() {
        assert!(Category::Forest.fill());
        assert!(Category::Building.fill());
        assert!(Category::Coastline.fill());
        assert!(!Category::Road.fill());
        assert!(!Category::Place.fill());
    }
}

#[cfg(test)]
mod tags {
    use crate::tags::parse_max_speed;
    use crate::{Category, NodeId, Way};

    #[test]
    fn max_speed_units() {
        assert_eq!(parse_max_speed("50"), Some(50));
        assert_eq!(parse_max_speed("80 km/h"), Some(80));
        assert_eq!(parse_max_speed("30 mph"), Some(48));
        assert_eq!(parse_max_speed("none"), None);
        assert_eq!(parse_max_speed("DK:urban"), None);
    }

    #[test]
    fn way_from_tags() {
        let tags = [("highway", "primary"), ("name", "Vesterbrogade"), ("maxspeed", "50"), ("oneway", "yes")];
        let way = Way::from_tags(1, vec![NodeId(1), NodeId(2)], &tags);
        assert_eq!(way.category, Category::Road);
        assert_eq!(way.road.name.as_deref(), Some("Vesterbrogade"));
        assert_eq!(way.road.max_speed_kmh, Some(50));
        assert!(way.road.one_way);
    }

    #[test]
    fn reverse_one_way_flips_nodes() {
        let tags = [("highway", "residential"), ("oneway", "-1")];
        let way = Way::from_tags(1, vec![NodeId(1), NodeId(2), NodeId(3)], &tags);
        assert_eq!(way.nodes, vec![NodeId(3), NodeId(2), NodeId(1)]);
        assert!(way.road.one_way);
    }

    #[test]
    fn motorway_is_implicitly_one_way() {
        let way = Way::from_tags(1, vec![], &[("highway", "motorway")]);
        assert!(way.road.one_way);
    }
}

#[cfg(test)]
mod dataset {
    use crate::{Category, CoreError, Dataset, Node, NodeId, NodeStore, Rect, Relation, Way, WayId};

    fn bounds() -> Rect {
        Rect::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn ways_are_sorted_and_searchable() {
        let ways = vec![
            Way::new(30, vec![], Category::Road),
            Way::new(10, vec![], Category::Road),
            Way::new(20, vec![], Category::Forest),
        ];
        let ds = Dataset::new(NodeStore::new(), ways, vec![], bounds()).unwrap();
        let ids: Vec<_> = ds.ways().iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        assert_eq!(ds.way(WayId(20)).unwrap().category, Category::Forest);
        assert!(ds.way(WayId(25)).is_none());
    }

    #[test]
    fn relation_members_are_sorted() {
        let rel = Relation::new(1, Category::Forest, vec![WayId(9), WayId(3), WayId(5)]);
        let ds = Dataset::new(NodeStore::new(), vec![], vec![rel], bounds()).unwrap();
        assert_eq!(ds.relations()[0].members, vec![WayId(3), WayId(5), WayId(9)]);
    }

    #[test]
    fn duplicate_way_rejected() {
        let ways = vec![Way::new(1, vec![], Category::Road), Way::new(1, vec![], Category::Road)];
        let err = Dataset::new(NodeStore::new(), ways, vec![], bounds()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateWay(WayId(1))));
    }

    #[test]
    fn empty_bounds_rejected() {
        let err = Dataset::new(NodeStore::new(), vec![], vec![], Rect::EMPTY).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBounds(_)));
    }

    #[test]
    fn node_store_resolution() {
        let store = NodeStore::from_nodes([Node::new(5, 1.0, 2.0), Node::new(7, 3.0, 4.0)]).unwrap();
        let idx = store.resolve(NodeId(7));
        assert_eq!(store.pos(idx).unwrap().lat, 3.0);
        assert!(!store.resolve(NodeId(99)).is_valid());
        assert!(store.get(store.resolve(NodeId(99))).is_none());
        assert!(NodeStore::from_nodes([Node::new(5, 0.0, 0.0), Node::new(5, 1.0, 1.0)]).is_err());
    }
}
