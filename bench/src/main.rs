use std::collections::VecDeque;
use std::time::Instant;

use neuronet_core::{GraphHandle, NodeId};
use tracing_subscriber::EnvFilter;

type EdgeList = Vec<(NodeId, NodeId)>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");

    if mode == "help" || mode == "--help" {
        println!("Usage: neuronet-bench [mode] [node_count]");
        println!("       neuronet-bench file <edge-list>");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense cliques connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!("  file        Load an edge-list file and benchmark queries on it");
        println!();
        println!("Default node_count: 5000000");
        return;
    }

    println!("neuronet-bench");
    println!("==============");
    println!();

    if mode == "file" {
        let Some(path) = args.get(2) else {
            eprintln!("file mode needs a path. Use --help for options.");
            return;
        };
        let t = Instant::now();
        match GraphHandle::load(path) {
            Ok(graph) => {
                let report = graph.report();
                println!(
                    "Loaded {} in {:.2}s ({} lines, {} skipped, {} wide ids)",
                    path,
                    t.elapsed().as_secs_f64(),
                    report.lines_read,
                    report.skipped_lines,
                    report.wide_id_lines
                );
                run_queries(&graph);
            }
            Err(e) => eprintln!("Load failed: {}", e),
        }
        return;
    }

    let node_count: NodeId = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(5_000_000);

    let generators: Vec<(&str, fn(NodeId) -> EdgeList)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(NodeId) -> EdgeList),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(NodeId) -> EdgeList, node_count: NodeId) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    let gen_time = t.elapsed();

    let t = Instant::now();
    let graph = GraphHandle::from_edges(&edges);
    let build_time = t.elapsed();
    drop(edges);

    println!(
        "Generated in {:.2}s, CSR built in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    run_queries(&graph);
}

fn run_queries(graph: &GraphHandle) {
    let t = Instant::now();
    match graph.max_degree() {
        Ok(top) => println!(
            "Max-degree node {} (degree {}) in {:.1}ms",
            top.node,
            top.degree,
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => {
            println!("{}", e);
            println!();
            return;
        }
    }

    // BFS from node 0 (typically a hub or root)
    println!();
    println!("{:>8} {:>12} {:>12} {:>10}", "depth", "found", "reached", "time");
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = match graph.bfs(0, depth) {
            Ok(r) => r,
            Err(e) => {
                println!("{}", e);
                break;
            }
        };
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            depth,
            result.nodes.len(),
            result.depth_reached,
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop once the frontier ran dry before the depth limit.
        if result.depth_reached < depth {
            println!("{:>8} (reachable set exhausted)", "");
            break;
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_node(&mut self, max: NodeId) -> NodeId {
        self.next(max as u64) as NodeId
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// L-system fractal tree: every node spawns three children.
///
/// Log depth with exponential width; exercises wide frontiers.
fn gen_lsystem(node_count: NodeId) -> EdgeList {
    let mut edges = Vec::with_capacity(node_count as usize);
    let branching = 3;

    let mut next_id: NodeId = 1;
    let mut frontier: Vec<NodeId> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push((parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint, so
/// nodes with more edges are more likely to be picked. Edges point from the
/// newcomer to the hub and back, so node 0 can reach the whole graph.
fn gen_scale_free(node_count: NodeId) -> EdgeList {
    let edges_per_node: NodeId = 10;
    let mut edges = Vec::with_capacity(node_count as usize * edges_per_node as usize * 2);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<NodeId> = Vec::with_capacity(node_count as usize * edges_per_node as usize * 2);

    // Seed: small clique
    let seed: NodeId = 5.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push((i, j));
            edges.push((j, i));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if target != new_node {
                edges.push((new_node, target));
                edges.push((target, new_node));
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node links forward to its K nearest ring neighbors; each link is
/// rewired to a random node with probability p.
fn gen_small_world(node_count: NodeId) -> EdgeList {
    let k: NodeId = 10;
    let p = 0.05f64;
    let mut edges = Vec::with_capacity(node_count as usize * k as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = ((i as u64 + j as u64) % node_count as u64) as NodeId;
            if rng.next_f64() < p {
                let rewired = rng.next_node(node_count);
                edges.push((i, if rewired != i { rewired } else { neighbor }));
            } else {
                edges.push((i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: ~10 uniform random edges per node, no structure.
fn gen_random(node_count: NodeId) -> EdgeList {
    let target_edges = node_count as usize * 10;
    let mut edges = Vec::with_capacity(target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next_node(node_count);
        let to = rng.next_node(node_count);
        if from != to {
            edges.push((from, to));
        }
    }

    edges
}

/// Barbell: two dense cliques connected by a single thin bridge.
///
/// Each clique has ~n/2 nodes with ~20 random links per node; they're
/// joined by a chain of 10 bridge nodes. BFS from 0 has to squeeze
/// through the bridge to reach the second clique.
fn gen_barbell(node_count: NodeId) -> EdgeList {
    let bridge_len: NodeId = 10;
    let clique_size = node_count.saturating_sub(bridge_len) / 2;
    if clique_size < 2 {
        return (1..node_count).map(|i| (i - 1, i)).collect();
    }

    let mut edges = Vec::with_capacity(clique_size as usize * 40 + bridge_len as usize);
    let mut rng = FastRng::new(99999);

    let mut clique = |edges: &mut EdgeList, base: NodeId| {
        for i in 0..clique_size {
            for _ in 0..20.min(clique_size - 1) {
                let target = rng.next_node(clique_size);
                if target != i {
                    edges.push((base + i, base + target));
                }
            }
        }
    };

    clique(&mut edges, 0);

    // Bridge: chain from last node of A to first node of B
    let bridge_start = clique_size;
    edges.push((clique_size - 1, bridge_start));
    for i in 1..bridge_len {
        edges.push((bridge_start + i - 1, bridge_start + i));
    }
    let b_start = bridge_start + bridge_len;
    edges.push((b_start - 1, b_start));

    clique(&mut edges, b_start);

    edges
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a random node on the recent "surface", with
/// occasional long-range links that create loops and shortcuts. Edges point
/// from the surface outward so BFS from the seed follows the growth.
fn gen_dla(node_count: NodeId) -> EdgeList {
    let mut edges = Vec::with_capacity(node_count as usize * 2);
    let mut rng = FastRng::new(77777);

    // VecDeque for O(1) pop_front when evicting oldest surface nodes.
    let surface_max = 10000usize;
    let mut surface: VecDeque<NodeId> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push((attach_to, new_node));

        // 10% chance of a second connection
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next_node(new_node);
            if other != attach_to {
                edges.push((new_node, other));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
