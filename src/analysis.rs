//! Structural checks and exports of a finished maze: is it really a perfect maze, and what does
//! its passage graph look like to other tools.

use bit_set::BitSet;
use petgraph::algo::is_cyclic_undirected;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use std::collections::VecDeque;
use std::fmt::Write;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;
use crate::units::{EdgesCount, NodesCount};

pub type PassageGraph = Graph<Cartesian2DCoordinate, (), Undirected, u32>;

/// How many cells can be walked to from `start` through carved passages, `start` included.
/// Zero if `start` is not on the grid.
pub fn reachable_cells_count(grid: &Grid, start: Cartesian2DCoordinate) -> usize {

    let start_index = match grid.grid_coordinate_to_index(start) {
        Some(index) => index,
        None => return 0,
    };

    // The visited set doubles as the result: every cell reached is in it exactly once.
    let mut visited = BitSet::with_capacity(grid.size());
    visited.insert(start_index);
    let mut frontier = VecDeque::new();
    frontier.push_back(start);

    while let Some(cell_coord) = frontier.pop_front() {
        for link_coordinate in grid.links(cell_coord).iter() {
            if let Some(link_index) = grid.grid_coordinate_to_index(*link_coordinate) {
                if visited.insert(link_index) {
                    frontier.push_back(*link_coordinate);
                }
            }
        }
    }

    visited.len()
}

/// The carved passages as an undirected graph, one node per cell in row major order.
pub fn passage_graph(grid: &Grid) -> PassageGraph {
    let (NodesCount(nodes), EdgesCount(edges)) = grid.graph_size();
    let mut graph = PassageGraph::with_capacity(nodes, edges);
    for coord in grid.iter() {
        let _ = graph.add_node(coord);
    }

    for (src, dst) in grid.iter_links() {
        let node = |coord| grid.grid_coordinate_to_index(coord).map(NodeIndex::new);
        if let (Some(a), Some(b)) = (node(src), node(dst)) {
            let _ = graph.add_edge(a, b, ());
        }
    }

    graph
}

/// Do the carved passages form a loop anywhere?
pub fn has_cycle(grid: &Grid) -> bool {
    is_cyclic_undirected(&passage_graph(grid))
}

/// A perfect maze: every cell visited, and exactly one route between any two cells, which
/// for `n` connected cells means exactly `n - 1` passages.
pub fn is_perfect(grid: &Grid) -> bool {
    let (NodesCount(cells_count), EdgesCount(tree_edges)) = grid.graph_size();
    grid.iter().all(|coord| grid.is_visited(coord)) &&
    grid.links_count() == tree_edges &&
    reachable_cells_count(grid, grid.entrance()) == cells_count
}

/// Serialize the maze as a text edge list. Line 1: n(#vertices) m(#edges).
/// Line 2+ edge between vertices, using 1-based row major vertex indices.
pub fn edges_listing(grid: &Grid) -> String {

    let mut graph_data = String::new();
    let _ = writeln!(graph_data, "{} {}", grid.size(), grid.links_count());

    for (src, dst) in grid.iter_links() {
        if let (Some(index_a), Some(index_b)) = (grid.grid_coordinate_to_index(src),
                                                 grid.grid_coordinate_to_index(dst)) {
            let _ = writeln!(graph_data, "{} {}", index_a + 1, index_b + 1);
        }
    }

    graph_data
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::generators;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn generated(w: usize, h: usize, seed: u64) -> Grid {
        let mut g = Grid::new(Width(w), Height(h)).unwrap();
        generators::recursive_backtracker(&mut g, &mut generators::seeded_rng(seed)).unwrap();
        g
    }

    #[test]
    fn unlinked_grid_reaches_only_the_start() {
        let g = Grid::new(Width(3), Height(3)).unwrap();
        assert_eq!(reachable_cells_count(&g, gc(1, 1)), 1);
        assert_eq!(reachable_cells_count(&g, gc(3, 3)), 0);
        assert!(!is_perfect(&g));
        assert!(!has_cycle(&g));
    }

    #[test]
    fn loop_is_detected() {
        let mut g = Grid::new(Width(2), Height(2)).unwrap();
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.carve_passage(gc(1, 0), gc(1, 1)).unwrap();
        g.carve_passage(gc(1, 1), gc(0, 1)).unwrap();
        assert!(!has_cycle(&g));
        assert_eq!(reachable_cells_count(&g, gc(0, 1)), 4);

        g.carve_passage(gc(0, 1), gc(0, 0)).unwrap();
        assert!(has_cycle(&g));
        assert!(!is_perfect(&g));
    }

    #[test]
    fn generated_mazes_are_perfect() {
        for seed in 0..10 {
            let g = generated(9, 14, seed);
            assert!(is_perfect(&g));
            assert!(!has_cycle(&g));
        }
        assert!(is_perfect(&generated(1, 1, 0)));
    }

    #[test]
    fn passage_graph_shape() {
        let g = generated(5, 4, 8);
        let graph = passage_graph(&g);
        assert_eq!(graph.node_count(), 20);
        assert_eq!(graph.edge_count(), 19);
        assert_eq!(graph[NodeIndex::new(7)], gc(2, 1));
    }

    #[test]
    fn edges_listing_format() {
        let mut g = Grid::new(Width(2), Height(2)).unwrap();
        g.carve_passage(gc(0, 0), gc(1, 0)).unwrap();
        g.carve_passage(gc(1, 0), gc(1, 1)).unwrap();
        assert_eq!(edges_listing(&g), "4 2\n1 2\n2 4\n");
    }

    #[test]
    fn quickcheck_connected_and_acyclic() {
        fn prop(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 25 + 1, h as usize % 25 + 1);
            let g = generated(w, h, seed);
            // any start cell reaches the whole maze
            let start = g.random_cell(&mut generators::seeded_rng(seed ^ 0x5eed));
            reachable_cells_count(&g, start) == w * h && !has_cycle(&g)
        }
        quickcheck(prop as fn(u8, u8, u64) -> bool);
    }
}
