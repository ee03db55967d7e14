//! Network geometry: station graph construction, thinning and propagation.

use std::collections::{BTreeMap, VecDeque};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use log::{error, warn};
use petgraph::dot::{Config, Dot};
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

use rignet_core::{Iso3, Validity};

use crate::edge::{DirCompare, Edge, EdgeDir, EdgeError};
use crate::station::{StaFrame, StaKey, NULL_STA_KEY};

/// Representation of the geometry of a rigid-body network.
///
/// Stations are graph vertices, relative orientations are weighted edges.
/// The graph is undirected; transform directionality is carried on each
/// edge (see [`EdgeDir`]) and resolved on retrieval.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    /// Lookup map: graph vertex from station key.
    vert_id_from_sta_key: BTreeMap<StaKey, NodeIndex>,
    /// Graph structure storing network relationships.
    graph: UnGraph<StaFrame, Edge>,
}

impl Geometry {
    /// Empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the station already has a vertex in the graph.
    pub fn has_sta_key(&self, sta_key: StaKey) -> bool {
        self.vert_id_from_sta_key.contains_key(&sta_key)
    }

    /// Vertex for `sta_key`, adding one if not yet present.
    fn ensure_sta_frame_exists(&mut self, sta_key: StaKey) -> NodeIndex {
        *self
            .vert_id_from_sta_key
            .entry(sta_key)
            .or_insert_with(|| self.graph.add_node(StaFrame::new(sta_key)))
    }

    /// Graph vertex for a station key.
    fn vert_id_for_sta_key(&self, sta_key: StaKey) -> Option<NodeIndex> {
        self.vert_id_from_sta_key.get(&sta_key).copied()
    }

    /// Station key stored on a graph vertex.
    fn sta_key_for_vert_id(&self, vert_id: NodeIndex) -> Option<StaKey> {
        self.graph.node_weight(vert_id).map(|frame| frame.key)
    }

    /// Insert a transformation edge, creating endpoint frames on demand.
    ///
    /// # Panics
    ///
    /// Panics if the edge direction is invalid (equal or null endpoint
    /// keys): that is a bug in the calling code, not a data condition.
    pub fn insert_edge(&mut self, edge: Edge) {
        let dir = edge.edge_dir();
        if !dir.is_valid() {
            error!("rejecting edge with invalid direction ({dir})");
            panic!("Geometry::insert_edge requires distinct valid endpoint keys ({dir})");
        }

        let vert1 = self.ensure_sta_frame_exists(dir.from);
        let vert2 = self.ensure_sta_frame_exists(dir.into);
        self.graph.add_edge(vert1, vert2, edge);
    }

    /// Edge between the two stations of `dir`, regardless of the stored
    /// direction. Empty if either station is unknown or no edge exists.
    pub fn edge(&self, dir: &EdgeDir) -> Option<&Edge> {
        let vert1 = self.vert_id_for_sta_key(dir.from)?;
        let vert2 = self.vert_id_for_sta_key(dir.into)?;
        let eid = self.graph.find_edge(vert1, vert2)?;
        self.graph.edge_weight(eid)
    }

    /// Mutable access to the edge between the two stations of `dir`.
    pub fn edge_mut(&mut self, dir: &EdgeDir) -> Option<&mut Edge> {
        let vert1 = self.vert_id_for_sta_key(dir.from)?;
        let vert2 = self.vert_id_for_sta_key(dir.into)?;
        let eid = self.graph.find_edge(vert1, vert2)?;
        self.graph.edge_weight_mut(eid)
    }

    /// Accumulate an observed transform (interpreted per `dir`) into the
    /// robust edge between the two stations, creating the edge (and any
    /// missing frames) on first observation.
    ///
    /// `reserve` sizes the sample tracker of a newly created edge. An
    /// existing non-robust edge between the stations rejects accumulation.
    pub fn accumulate_xform(
        &mut self,
        dir: EdgeDir,
        xform: &Iso3,
        reserve: usize,
    ) -> Result<(), EdgeError> {
        if let Some(edge) = self.edge_mut(&dir) {
            return match dir.compare_to(&edge.edge_dir()) {
                DirCompare::Forward => edge.accumulate(xform),
                // stored direction is swapped: fold in the inverse sample
                DirCompare::Reverse => edge.accumulate(&xform.inverse()),
                DirCompare::Different => {
                    error!("edge lookup returned mismatched direction ({dir})");
                    panic!("Geometry::accumulate_xform direction bookkeeping broken ({dir})");
                }
            };
        }
        self.insert_edge(Edge::robust(dir, xform, reserve));
        Ok(())
    }

    /// Transform of edge `eid` oriented so that it carries `from`-vertex
    /// coordinates into `into`-vertex coordinates.
    ///
    /// # Panics
    ///
    /// Panics when the stored edge connects a different station pair than
    /// the requested vertices: the graph invariant is broken.
    fn oriented_xform(&self, eid: EdgeIndex, from: NodeIndex, into: NodeIndex) -> Iso3 {
        let edge = &self.graph[eid];
        let have_dir = edge.edge_dir();
        let want_dir = EdgeDir::new(
            self.sta_key_for_vert_id(from).unwrap_or(NULL_STA_KEY),
            self.sta_key_for_vert_id(into).unwrap_or(NULL_STA_KEY),
        );

        match want_dir.compare_to(&have_dir) {
            DirCompare::Forward => edge.xform(),
            DirCompare::Reverse => edge.xform().inverse(),
            DirCompare::Different => {
                error!("bad network construction: have ({have_dir}) want ({want_dir})");
                panic!("edge direction does not match its endpoints");
            }
        }
    }

    /// Edge ids of a minimum-weight spanning tree.
    ///
    /// Kruskal's construction: all edges considered in order of increasing
    /// weight, union-find rejecting cycle-closing candidates. Equal weights
    /// keep their relative insertion order. A disconnected network yields
    /// the spanning forest (one tree per connected component).
    pub fn spanning_edges(&self) -> Vec<EdgeIndex> {
        let mut eids: Vec<EdgeIndex> = self.graph.edge_indices().collect();
        eids.sort_by(|ea, eb| {
            let wa = self.graph[*ea].weight();
            let wb = self.graph[*eb].weight();
            wa.total_cmp(&wb)
        });

        let mut merged = UnionFind::<usize>::new(self.graph.node_count());
        let mut span_eids = Vec::with_capacity(self.graph.node_count().saturating_sub(1));
        for eid in eids {
            let (vert1, vert2) = self
                .graph
                .edge_endpoints(eid)
                .expect("edge id produced by this graph");
            if merged.union(vert1.index(), vert2.index()) {
                span_eids.push(eid);
            }
        }
        span_eids
    }

    /// New network containing only the given edges, each re-oriented to the
    /// canonical direction (`from` = smaller station key).
    ///
    /// Calling this with the result of [`Self::spanning_edges`] materializes
    /// the minimum spanning tree as its own [`Geometry`] for propagation.
    ///
    /// # Panics
    ///
    /// Panics if an edge id does not belong to this graph or its direction
    /// does not match its endpoints.
    pub fn network_tree(&self, eids: &[EdgeIndex]) -> Geometry {
        let mut network = Geometry::new();

        for &eid in eids {
            let (vert1, vert2) = self
                .graph
                .edge_endpoints(eid)
                .expect("edge id produced by this graph");
            let key1 = self.sta_key_for_vert_id(vert1).unwrap_or(NULL_STA_KEY);
            let key2 = self.sta_key_for_vert_id(vert2).unwrap_or(NULL_STA_KEY);

            let edge = &self.graph[eid];
            let canon_dir = EdgeDir::new(key1.min(key2), key1.max(key2));
            let use_edge = match canon_dir.compare_to(&edge.edge_dir()) {
                DirCompare::Forward => edge.clone(),
                DirCompare::Reverse => edge.reversed(),
                DirCompare::Different => {
                    error!(
                        "bad network construction: edge ({}) between stations {key1} and {key2}",
                        edge.edge_dir()
                    );
                    panic!("edge direction does not match its endpoints");
                }
            };
            network.insert_edge(use_edge);
        }

        network
    }

    /// Absolute station poses propagated from one anchored pose.
    ///
    /// Seeds the result with `{anchor_key → anchor_xform}` and walks the
    /// graph breadth-first from the anchor. Every edge is re-oriented so
    /// that its domain station is already solved, then
    /// `x_into = edge.xform() ∘ x_from`. Later edges overwrite earlier
    /// results, so cycles resolve in traversal order; run the network
    /// through [`Self::spanning_edges`] + [`Self::network_tree`] first for
    /// a cycle-free propagation.
    ///
    /// An unknown anchor key yields an empty map.
    pub fn propagate_transforms(
        &self,
        anchor_key: StaKey,
        anchor_xform: &Iso3,
    ) -> BTreeMap<StaKey, Iso3> {
        let mut sta_xforms = BTreeMap::new();
        if self.graph.node_count() == 0 {
            return sta_xforms;
        }

        let Some(vert0) = self.vert_id_for_sta_key(anchor_key) else {
            warn!("invalid anchor station reference (key {anchor_key})");
            return sta_xforms;
        };
        sta_xforms.insert(anchor_key, *anchor_xform);

        let mut visited = vec![false; self.graph.node_count()];
        let mut processed = vec![false; self.graph.edge_count()];
        let mut queue = VecDeque::new();
        visited[vert0.index()] = true;
        queue.push_back(vert0);

        while let Some(vert) = queue.pop_front() {
            let from_key = self
                .sta_key_for_vert_id(vert)
                .expect("queued vertex belongs to this graph");
            let x_from_wrt_ref = sta_xforms[&from_key];
            if !x_from_wrt_ref.is_valid() {
                warn!("propagating from invalid pose at station {from_key}");
            }

            for edge_ref in self.graph.edges(vert) {
                let eid = edge_ref.id();
                if processed[eid.index()] {
                    continue;
                }
                processed[eid.index()] = true;

                let other = if edge_ref.source() == vert {
                    edge_ref.target()
                } else {
                    edge_ref.source()
                };
                let into_key = self
                    .sta_key_for_vert_id(other)
                    .expect("edge endpoint belongs to this graph");

                let x_into_wrt_from = self.oriented_xform(eid, vert, other);
                let x_into_wrt_ref = x_into_wrt_from * x_from_wrt_ref;
                sta_xforms.insert(into_key, x_into_wrt_ref);

                if !visited[other.index()] {
                    visited[other.index()] = true;
                    queue.push_back(other);
                }
            }
        }

        sta_xforms
    }

    /// Number of station vertices.
    pub fn size_verts(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of relative-orientation edges.
    pub fn size_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// One-line summary of the network size.
    pub fn info_string(&self, title: &str) -> String {
        let mut text = String::new();
        if !title.is_empty() {
            let _ = write!(text, "{title} ");
        }
        let _ = write!(
            text,
            "sizeVerts: {} sizeEdges: {}",
            self.size_verts(),
            self.size_edges()
        );
        text
    }

    /// Deterministic multi-line dump of vertices and edges.
    ///
    /// Vertex and edge records are sorted, and every edge is reported in
    /// its canonical (smaller key first) orientation, so two networks with
    /// the same content produce the same text.
    pub fn info_string_contents(&self, title: &str) -> String {
        let mut info_verts: Vec<String> = self
            .graph
            .node_weights()
            .map(|frame| format!("VertKey: {:8}", frame.key))
            .collect();

        let mut info_edges: Vec<String> = self
            .graph
            .edge_weights()
            .map(|edge| {
                if edge.edge_dir().is_forward() {
                    format!("Edge: {edge}")
                } else {
                    format!("Edge: {}", edge.reversed())
                }
            })
            .collect();

        info_verts.sort();
        info_edges.sort();

        let mut text = self.info_string(title);
        text.push_str("\nvertices...");
        for info_vert in &info_verts {
            text.push('\n');
            text.push_str(info_vert);
        }
        text.push_str("\nedges...");
        for info_edge in &info_edges {
            text.push('\n');
            text.push_str(info_edge);
        }
        text
    }

    /// Save the network as a graphviz `.dot` file.
    ///
    /// Vertex labels carry the station key; edge labels carry the vertex
    /// pair and the edge weight.
    pub fn save_network_graphic(&self, dot_path: &Path) -> io::Result<()> {
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::NodeNoLabel, Config::EdgeNoLabel],
            &|_graph, edge_ref| {
                let edge: &Edge = edge_ref.weight();
                format!(
                    "label=\"{}-->{}\\n{:.6}\"",
                    edge_ref.source().index(),
                    edge_ref.target().index(),
                    edge.weight()
                )
            },
            &|_graph, (vert_id, frame)| {
                format!("label=\"{}='{}'\"", vert_id.index(), frame.key)
            },
        );
        fs::write(dot_path, format!("{dot:?}"))
    }
}
