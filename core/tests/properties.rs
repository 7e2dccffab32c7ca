//! Structural invariants over arbitrary edge lists.

use std::collections::{HashMap, HashSet};

use neuronet_core::{GraphHandle, LoadOptions, NodeId};
use proptest::prelude::*;

fn edge_list() -> impl Strategy<Value = Vec<(NodeId, NodeId)>> {
    prop::collection::vec((0u32..64, 0u32..64), 0..256)
}

proptest! {
    #[test]
    fn degree_matches_neighbor_count(edges in edge_list()) {
        let g = GraphHandle::from_edges(&edges);
        for n in 0..g.node_count() as NodeId {
            prop_assert_eq!(g.degree(n).unwrap(), g.neighbors(n).unwrap().len());
        }
    }

    #[test]
    fn degree_sum_is_edge_count(edges in edge_list()) {
        let g = GraphHandle::from_edges(&edges);
        let total: usize = (0..g.node_count() as NodeId).map(|n| g.degree(n).unwrap()).sum();
        prop_assert_eq!(total, g.edge_count());
        prop_assert_eq!(g.edge_count(), edges.len());
    }

    #[test]
    fn every_destination_is_in_range(edges in edge_list()) {
        let g = GraphHandle::from_edges(&edges);
        for n in 0..g.node_count() as NodeId {
            for &v in g.neighbors(n).unwrap() {
                prop_assert!((v as usize) < g.node_count());
            }
        }
    }

    #[test]
    fn neighbors_preserve_arrival_order(edges in edge_list()) {
        let g = GraphHandle::from_edges(&edges);
        let mut expected: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for &(s, d) in &edges {
            expected.entry(s).or_default().push(d);
        }
        for n in 0..g.node_count() as NodeId {
            let want = expected.get(&n).cloned().unwrap_or_default();
            prop_assert_eq!(g.neighbors(n).unwrap(), want.as_slice());
        }
    }

    #[test]
    fn max_degree_is_smallest_maximal_id(edges in edge_list()) {
        let g = GraphHandle::from_edges(&edges);
        match g.max_degree_node() {
            Err(_) => prop_assert_eq!(g.node_count(), 0),
            Ok(m) => {
                let dm = g.degree(m).unwrap();
                for n in 0..g.node_count() as NodeId {
                    let dn = g.degree(n).unwrap();
                    prop_assert!(dm >= dn);
                    if n < m {
                        prop_assert!(dn < dm);
                    }
                }
            }
        }
    }

    #[test]
    fn bfs_depth_zero_is_start_only(edges in edge_list(), start in 0u32..64) {
        let g = GraphHandle::from_edges(&edges);
        prop_assume!((start as usize) < g.node_count());
        let r = g.bfs(start, 0).unwrap();
        prop_assert_eq!(r.nodes, vec![start]);
        prop_assert!(r.tree_edges.is_empty());
    }

    #[test]
    fn bfs_forms_bounded_tree(edges in edge_list(), start in 0u32..64, depth in 0u32..6) {
        let g = GraphHandle::from_edges(&edges);
        prop_assume!((start as usize) < g.node_count());
        let r = g.bfs(start, depth).unwrap();

        let unique: HashSet<NodeId> = r.nodes.iter().copied().collect();
        prop_assert_eq!(unique.len(), r.nodes.len());
        prop_assert_eq!(r.nodes[0], start);
        prop_assert_eq!(r.tree_edges.len(), r.nodes.len() - 1);

        let mut level: HashMap<NodeId, u32> = HashMap::from([(start, 0)]);
        for &(p, c) in &r.tree_edges {
            prop_assert!(c != start);
            let lp = *level.get(&p).expect("parent discovered before child");
            prop_assert!(level.insert(c, lp + 1).is_none());
            prop_assert!(lp < depth);
            prop_assert!(g.neighbors(p).unwrap().contains(&c));
        }
        prop_assert!(r.depth_reached <= depth);
    }

    #[test]
    fn file_load_matches_in_memory(edges in edge_list()) {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        for &(s, d) in &edges {
            writeln!(file, "{s} {d}").unwrap();
        }
        file.flush().unwrap();

        let loaded = GraphHandle::load_with(file.path(), &LoadOptions::default()).unwrap();
        let built = GraphHandle::from_edges(&edges);
        prop_assert_eq!(loaded.graph(), built.graph());
    }
}
