//! Randomized checks of the whole move set over generated worlds.

use blockpath_core::{BlockTable, Pos, Region, SnapshotWorld};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use crate::cost::INFEASIBLE;
use crate::movements::{CARDINAL_DIRECTIONS, DIAGONAL_DIRECTIONS, Movements};
use crate::moves::Node;
use crate::testutil::{mob, movements, movements_with};

const SEEDS: u64 = 200;
const CENTRE: Pos = Pos::new(4, 64, 4);

/// Mostly air over mostly solid ground, with a sprinkling of everything the
/// classifier distinguishes.
fn random_world(rng: &mut SmallRng) -> SnapshotWorld {
    let table = BlockTable::vanilla();
    let kind = |name: &str| table.kind(name).unwrap();
    let air = kind("air");
    let above = [
        "stone", "dirt", "water", "lava", "ladder", "stone_slab", "oak_fence", "white_carpet",
        "bedrock", "chest", "fire",
    ]
    .map(kind);
    let below = ["stone", "dirt", "water", "cobblestone", "bedrock", "sand"].map(kind);

    let bounds = Region::new(Pos::new(0, 56, 0), Pos::new(9, 72, 9));
    let mut w = SnapshotWorld::new(table, bounds);
    for p in bounds {
        let k = if p.y < 64 {
            match rng.random_range(0..10u32) {
                0..=1 => air,
                _ => below[rng.random_range(0..below.len())],
            }
        } else {
            match rng.random_range(0..10u32) {
                0..=6 => air,
                _ => above[rng.random_range(0..above.len())],
            }
        };
        w.set(p, k);
    }
    w.set(CENTRE, air);
    for id in 0..rng.random_range(0..3u32) {
        let cell = Pos::new(
            rng.random_range(2..7),
            rng.random_range(62..67),
            rng.random_range(2..7),
        );
        w.add_entity(mob(id, cell));
    }
    w
}

fn cases() -> impl Iterator<Item = (SnapshotWorld, Node)> {
    (0..SEEDS).map(|seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let w = random_world(&mut rng);
        let node = Node::new(CENTRE, rng.random_range(0..4));
        (w, node)
    })
}

#[test]
fn every_move_is_well_formed() {
    let m = movements();
    for (w, node) in cases() {
        for mv in m.neighbors(&w, &node).unwrap() {
            assert!(mv.cost > 0.0 && mv.cost < INFEASIBLE, "{node} {mv}");
            assert_eq!(
                mv.remaining_scaffold as usize + mv.to_place.len(),
                node.remaining_scaffold as usize,
                "{node} {mv}"
            );
            if mv.parkour {
                assert!(mv.to_break.is_empty() && mv.to_place.is_empty());
            }
            assert!(i64::from(node.pos.y - mv.pos.y) <= i64::from(m.config().max_drop_down));
        }
    }
}

#[test]
fn raising_the_drop_limit_only_adds_moves() {
    let shallow = movements_with(|c| c.max_drop_down = 2);
    let deep = movements_with(|c| c.max_drop_down = 6);
    for (w, node) in cases() {
        let (s, d) = (shallow.view(&w), deep.view(&w));
        for dir in CARDINAL_DIRECTIONS {
            if let Some(mv) = s.drop_down(&node, dir).unwrap() {
                assert_eq!(d.drop_down(&node, dir).unwrap(), Some(mv));
            }
        }
        if let Some(mv) = s.down(&node).unwrap() {
            assert_eq!(d.down(&node).unwrap(), Some(mv));
        }
    }
}

#[test]
fn parkour_toggle_only_removes_parkour_moves() {
    let on = movements();
    let off = movements_with(|c| c.allow_parkour = false);
    for (w, node) in cases() {
        let with: Vec<_> = on
            .neighbors(&w, &node)
            .unwrap()
            .into_iter()
            .filter(|mv| !mv.parkour)
            .collect();
        assert_eq!(with, off.neighbors(&w, &node).unwrap());
    }
}

/// The world mirrored across the x = z plane.
fn transposed(w: &SnapshotWorld) -> SnapshotWorld {
    let b = w.bounds();
    let bounds = Region::new(
        Pos::new(b.min.z, b.min.y, b.min.x),
        Pos::new(b.max.z, b.max.y, b.max.x),
    );
    let mut t = SnapshotWorld::new(w.table(), bounds);
    for p in b {
        if let Some(k) = w.get(p) {
            t.set(Pos::new(p.z, p.y, p.x), k);
        }
    }
    t
}

#[test]
fn diagonal_cost_does_not_depend_on_handedness() {
    let m: Movements = movements_with(|c| c.allow_entity_detection = false);
    for (w, node) in cases() {
        let t = transposed(&w);
        for dir in DIAGONAL_DIRECTIONS {
            let a = m.view(&w).diagonal(&node, dir).unwrap();
            let b = m.view(&t).diagonal(&node, Pos::new(dir.z, 0, dir.x)).unwrap();
            match (a, b) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    assert_eq!(a.pos, Pos::new(b.pos.z, b.pos.y, b.pos.x));
                    assert!((a.cost - b.cost).abs() < 1e-9, "{node} {a} vs {b}");
                }
                (a, b) => panic!("{node} {dir}: {a:?} vs {b:?}"),
            }
        }
    }
}
