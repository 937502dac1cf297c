//! A synthetic harbour town, described the way a map parser would hand it
//! over: nodes, tagged ways, and tagged relations.
//!
//! ```text
//!   lat
//!  55.700   10 ─ 11 ─ 12 ─ 13           forest (relation, 3 ways)
//!            |         |
//!  55.690   14 ─ 15 ─ 16 ─ 17           Skovvej (residential)
//!            |    ·    |    |
//!  55.685    |    ·  (park) |           Stien (footway 15-19)
//!            |    ·    |    |
//!  55.680   18 ─ 19 ─ 20 ─ 21 ══ 22     Havnegade, E20 motorway 21-22
//!            |              |
//!  55.675   23 ─────────── 24           Strandvejen (one-way 24 → 23)
//!
//!  55.670   30 ─ 31 ─ 32 ─ 33           coastline, "Region Syd"
//! ```

use cg_core::{Dataset, Node, NodeId, NodeStore, Rect, Relation, Way, WayId};
use cg_spatial::{Address, AddressBook};

fn ids(raw: &[i64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

fn grid_node(id: i64, lat: f64, col: u32) -> Node {
    Node::new(id, lat, 12.560 + f64::from(col) * 0.004)
}

pub fn nodes() -> Vec<Node> {
    let mut nodes = Vec::new();
    for (row, lat) in [(10, 55.700), (14, 55.690), (18, 55.680)] {
        for col in 0..4 {
            nodes.push(grid_node(row + i64::from(col), lat, col));
        }
    }
    nodes.push(grid_node(22, 55.680, 6));
    nodes.push(grid_node(23, 55.675, 0));
    nodes.push(grid_node(24, 55.675, 3));
    for col in 0..4 {
        nodes.push(grid_node(30 + i64::from(col), 55.670, col));
    }
    // Building footprint next to the harbour.
    nodes.push(Node::new(40, 55.6810, 12.5650));
    nodes.push(Node::new(41, 55.6810, 12.5660));
    nodes.push(Node::new(42, 55.6815, 12.5660));
    nodes.push(Node::new(43, 55.6815, 12.5650));
    nodes
}

pub fn ways() -> Vec<Way> {
    vec![
        Way::from_tags(1, ids(&[14, 15, 16, 17]), &[("highway", "residential"), ("name", "Skovvej"), ("maxspeed", "40")]),
        Way::from_tags(2, ids(&[18, 19, 20, 21]), &[("highway", "secondary"), ("name", "Havnegade"), ("maxspeed", "50")]),
        Way::from_tags(3, ids(&[14, 18, 23]), &[("highway", "residential"), ("name", "Vestvej")]),
        Way::from_tags(4, ids(&[17, 21, 24]), &[("highway", "residential"), ("name", "Østvej")]),
        Way::from_tags(5, ids(&[23, 24]), &[("highway", "tertiary"), ("name", "Strandvejen"), ("oneway", "-1")]),
        Way::from_tags(6, ids(&[21, 22]), &[("highway", "motorway"), ("name", "E20"), ("maxspeed", "110")]),
        Way::from_tags(7, ids(&[15, 19]), &[("highway", "footway"), ("name", "Stien")]),
        Way::from_tags(8, ids(&[16, 20]), &[("highway", "cycleway"), ("name", "Parkstien")]),
        Way::from_tags(9, ids(&[40, 41, 42, 43, 40]), &[("building", "yes")]),
        // Forest boundary pieces, deliberately out of order and direction.
        Way::from_tags(20, ids(&[12, 13, 17]), &[]),
        Way::from_tags(21, ids(&[10, 11, 12]), &[]),
        Way::from_tags(22, ids(&[17, 16, 15, 14, 10]), &[]),
        // Coastline pieces.
        Way::from_tags(30, ids(&[32, 33]), &[("natural", "coastline")]),
        Way::from_tags(31, ids(&[30, 31]), &[("natural", "coastline")]),
        Way::from_tags(32, ids(&[31, 32]), &[("natural", "coastline")]),
    ]
}

pub fn relations() -> Vec<Relation> {
    vec![
        Relation::from_tags(
            100,
            vec![WayId(22), WayId(20), WayId(21)],
            &[("type", "multipolygon"), ("landuse", "forest"), ("name", "Byskoven")],
        ),
        Relation::from_tags(101, vec![WayId(30), WayId(31), WayId(32)], &[("name", "Region Syd")]),
    ]
}

pub fn bounds() -> Rect {
    Rect::new(55.665, 55.705, 12.555, 12.590)
}

pub fn dataset() -> anyhow::Result<Dataset> {
    let store = NodeStore::from_nodes(nodes())?;
    Ok(Dataset::new(store, ways(), relations(), bounds())?)
}

pub fn address_book() -> AddressBook {
    let at = |id: i64| nodes().into_iter().find(|n| n.id == NodeId(id)).map(|n| n.pos);
    let mut book = AddressBook::new();
    for (street, number, node) in [
        ("Skovvej", "2", 15),
        ("Skovvej", "11", 17),
        ("Havnegade", "4", 19),
        ("Havnegade", "30", 21),
        ("Vestvej", "8", 23),
        ("Strandvejen", "1", 24),
    ] {
        if let Some(pos) = at(node) {
            book.insert(
                Address::new(street, pos)
                    .with_house_number(number)
                    .with_postcode("4000")
                    .with_city("Havneby"),
            );
        }
    }
    book
}
