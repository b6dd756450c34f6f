// Structured serializer for cached values.
// Flattens arbitrary response graphs (including shared references and cycles)
// into a self-describing, storable string representation.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::error::{CacheError, CacheResult};

/// Index of a node within a [`Graph`].
pub type NodeId = usize;

/// Deepest nesting [`Graph::to_value`] will produce, matching serde_json's
/// own default recursion limit. Graphs themselves are flat and unbounded.
pub const MAX_VALUE_DEPTH: usize = 128;

/// One node of a flattened value graph.
///
/// Containers hold indices rather than nested values, so two fields may point
/// at the same node and a node may (transitively) point back at itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<NodeId>),
    Record(Vec<(String, NodeId)>),
    /// Placeholder for a non-data handle (e.g. a live timer reference) that
    /// cannot survive a process boundary. Decodes to this same inert marker.
    Opaque(String),
}

/// An arena-indexed value graph.
///
/// Shared-reference identity is a shared [`NodeId`]: mutating the node behind
/// one field is observable through every other field holding the same index.
/// Plain JSON trees convert losslessly via [`Graph::from_value`]; graphs with
/// sharing or cycles are built by pushing nodes directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    root: NodeId,
}

/// On-the-wire form: the node table plus the root index.
#[derive(Serialize, Deserialize)]
struct Wire {
    root: NodeId,
    nodes: Vec<Node>,
}

impl Graph {
    /// Append a node, returning its index.
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = root;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build a graph from a plain JSON tree.
    pub fn from_value(value: &Value) -> Self {
        let mut graph = Graph::default();
        let root = graph.intern(value);
        graph.set_root(root);
        graph
    }

    fn intern(&mut self, value: &Value) -> NodeId {
        match value {
            Value::Null => self.push(Node::Null),
            Value::Bool(b) => self.push(Node::Bool(*b)),
            Value::Number(n) => self.push(Node::Number(n.clone())),
            Value::String(s) => self.push(Node::Text(s.clone())),
            Value::Array(items) => {
                let ids: Vec<NodeId> = items.iter().map(|item| self.intern(item)).collect();
                self.push(Node::List(ids))
            }
            Value::Object(map) => {
                let fields: Vec<(String, NodeId)> = map
                    .iter()
                    .map(|(name, item)| (name.clone(), self.intern(item)))
                    .collect();
                self.push(Node::Record(fields))
            }
        }
    }

    /// Flatten the graph back into a plain JSON tree.
    ///
    /// Shared nodes expand into independent copies (plain JSON has no
    /// identity); a reference cycle cannot be flattened and is reported as a
    /// serialization error. Opaque markers become `{"opaque": <label>}`.
    /// Nesting deeper than [`MAX_VALUE_DEPTH`] is also a serialization error,
    /// never a stack overflow.
    pub fn to_value(&self) -> CacheResult<Value> {
        let mut in_progress = vec![false; self.nodes.len()];
        self.value_at(self.root, 0, &mut in_progress)
    }

    fn value_at(&self, id: NodeId, depth: usize, in_progress: &mut [bool]) -> CacheResult<Value> {
        let node = self
            .node(id)
            .ok_or_else(|| CacheError::Serialization(format!("dangling node reference {id}")))?;

        if depth > MAX_VALUE_DEPTH {
            return Err(CacheError::Serialization(format!(
                "value nesting exceeds {MAX_VALUE_DEPTH} levels"
            )));
        }
        if in_progress[id] {
            return Err(CacheError::Serialization(
                "reference cycle cannot be flattened to plain JSON".into(),
            ));
        }

        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Number(n) => Ok(Value::Number(n.clone())),
            Node::Text(s) => Ok(Value::String(s.clone())),
            Node::Opaque(label) => Ok(serde_json::json!({ "opaque": label })),
            Node::List(items) => {
                in_progress[id] = true;
                let values = items
                    .iter()
                    .map(|&item| self.value_at(item, depth + 1, in_progress))
                    .collect::<CacheResult<Vec<Value>>>()?;
                in_progress[id] = false;
                Ok(Value::Array(values))
            }
            Node::Record(fields) => {
                in_progress[id] = true;
                let mut map = serde_json::Map::with_capacity(fields.len());
                for (name, item) in fields {
                    map.insert(name.clone(), self.value_at(*item, depth + 1, in_progress)?);
                }
                in_progress[id] = false;
                Ok(Value::Object(map))
            }
        }
    }
}

/// Encode a graph to its wire representation.
///
/// Walks the graph from the root, assigning each distinct node a compact
/// index on first visit; later encounters reuse the index, so shared nodes
/// and cycles are emitted exactly once. Unreachable nodes are dropped.
pub fn encode(graph: &Graph) -> CacheResult<String> {
    if graph.is_empty() {
        return Err(CacheError::Serialization("cannot encode an empty graph".into()));
    }

    const UNVISITED: usize = usize::MAX;
    let mut remap = vec![UNVISITED; graph.len()];
    let mut order: Vec<NodeId> = Vec::with_capacity(graph.len());
    let mut stack = vec![graph.root()];

    while let Some(id) = stack.pop() {
        let node = graph
            .node(id)
            .ok_or_else(|| CacheError::Serialization(format!("dangling node reference {id}")))?;
        if remap[id] != UNVISITED {
            continue;
        }
        remap[id] = order.len();
        order.push(id);
        match node {
            Node::List(items) => stack.extend(items.iter().copied()),
            Node::Record(fields) => stack.extend(fields.iter().map(|(_, item)| *item)),
            _ => {}
        }
    }

    let nodes = order
        .iter()
        .map(|&old| match &graph.nodes[old] {
            Node::List(items) => Node::List(items.iter().map(|&item| remap[item]).collect()),
            Node::Record(fields) => Node::Record(
                fields
                    .iter()
                    .map(|(name, item)| (name.clone(), remap[*item]))
                    .collect(),
            ),
            other => other.clone(),
        })
        .collect();

    serde_json::to_string(&Wire { root: 0, nodes })
        .map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Decode a wire representation back into a graph.
///
/// All nodes are materialized first, then every reference is validated, so a
/// back-reference (shared node or cycle) resolves to the already-allocated
/// node. Malformed input is a serialization error, never a panic.
pub fn decode(raw: &str) -> CacheResult<Graph> {
    let wire: Wire =
        serde_json::from_str(raw).map_err(|e| CacheError::Serialization(e.to_string()))?;

    if wire.nodes.is_empty() || wire.root >= wire.nodes.len() {
        return Err(CacheError::Serialization("wire form has no valid root".into()));
    }
    for node in &wire.nodes {
        let out_of_range = match node {
            Node::List(items) => items.iter().copied().find(|&item| item >= wire.nodes.len()),
            Node::Record(fields) => fields
                .iter()
                .map(|(_, item)| *item)
                .find(|&item| item >= wire.nodes.len()),
            _ => None,
        };
        if let Some(bad) = out_of_range {
            return Err(CacheError::Serialization(format!(
                "node reference {bad} out of range"
            )));
        }
    }

    Ok(Graph {
        nodes: wire.nodes,
        root: wire.root,
    })
}

/// Encode any serializable record through the graph form.
pub fn encode_record<T: Serialize>(value: &T) -> CacheResult<String> {
    let json = serde_json::to_value(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
    encode(&Graph::from_value(&json))
}

/// Decode a stored representation into a plain record.
pub fn decode_record<T: DeserializeOwned>(raw: &str) -> CacheResult<T> {
    let json = decode(raw)?.to_value()?;
    serde_json::from_value(json).map_err(|e| CacheError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Stats {
        grade: String,
        total_stars: u64,
        languages: Vec<String>,
    }

    fn sample_stats() -> Stats {
        Stats {
            grade: "A+".to_string(),
            total_stars: 42,
            languages: vec!["Rust".to_string(), "TypeScript".to_string()],
        }
    }

    #[test]
    fn test_record_round_trip() {
        let stats = sample_stats();
        let raw = encode_record(&stats).unwrap();
        let decoded: Stats = decode_record(&raw).unwrap();
        assert_eq!(decoded, stats);
    }

    #[test]
    fn test_shared_reference_identity_survives_round_trip() {
        let mut graph = Graph::default();
        let shared = graph.push(Node::Text("shared".into()));
        let root = graph.push(Node::Record(vec![
            ("first".into(), shared),
            ("second".into(), shared),
        ]));
        graph.set_root(root);

        let mut decoded = decode(&encode(&graph).unwrap()).unwrap();

        let (first, second) = match decoded.node(decoded.root()).unwrap() {
            Node::Record(fields) => (fields[0].1, fields[1].1),
            other => panic!("expected record root, got {other:?}"),
        };
        assert_eq!(first, second);

        // Mutation through one field is observable through the other.
        *decoded.node_mut(first).unwrap() = Node::Text("mutated".into());
        assert_eq!(
            decoded.node(second),
            Some(&Node::Text("mutated".into()))
        );
    }

    #[test]
    fn test_cycle_round_trip() {
        let mut graph = Graph::default();
        let root = graph.push(Node::Record(vec![("name".into(), 0)]));
        // Close the cycle: the record's only field points back at itself.
        if let Some(Node::Record(fields)) = graph.node_mut(root) {
            fields[0].1 = root;
        }
        graph.set_root(root);

        let decoded = decode(&encode(&graph).unwrap()).unwrap();
        match decoded.node(decoded.root()).unwrap() {
            Node::Record(fields) => assert_eq!(fields[0].1, decoded.root()),
            other => panic!("expected record root, got {other:?}"),
        }

        // A cycle cannot flatten to plain JSON, but it reports rather than loops.
        assert!(decoded.to_value().is_err());
    }

    #[test]
    fn test_opaque_marker_decodes_inert() {
        let mut graph = Graph::default();
        let handle = graph.push(Node::Opaque("interval".into()));
        let data = graph.push(Node::Text("payload".into()));
        let root = graph.push(Node::Record(vec![
            ("interval".into(), handle),
            ("data".into(), data),
        ]));
        graph.set_root(root);

        let decoded = decode(&encode(&graph).unwrap()).unwrap();
        let handle_id = match decoded.node(decoded.root()).unwrap() {
            Node::Record(fields) => fields[0].1,
            other => panic!("expected record root, got {other:?}"),
        };
        assert_eq!(
            decoded.node(handle_id),
            Some(&Node::Opaque("interval".into()))
        );
    }

    #[test]
    fn test_shared_node_emitted_once() {
        let mut graph = Graph::default();
        let shared = graph.push(Node::Text("dedup".into()));
        let root = graph.push(Node::List(vec![shared, shared, shared]));
        graph.set_root(root);

        let decoded = decode(&encode(&graph).unwrap()).unwrap();
        // Root plus one shared text node, not three copies.
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_unreachable_nodes_dropped() {
        let mut graph = Graph::default();
        let _orphan = graph.push(Node::Text("orphan".into()));
        let root = graph.push(Node::Null);
        graph.set_root(root);

        let decoded = decode(&encode(&graph).unwrap()).unwrap();
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn test_deep_nesting_degrades_to_error() {
        // A long chain of records encodes and decodes fine (the wire form is
        // flat), but flattening it to plain JSON must report an error rather
        // than overflow the stack.
        let mut graph = Graph::default();
        let mut child = graph.push(Node::Null);
        for _ in 0..200_000 {
            child = graph.push(Node::Record(vec![("inner".into(), child)]));
        }
        graph.set_root(child);

        let raw = encode(&graph).unwrap();
        let decoded = decode(&raw).unwrap();
        assert!(decoded.to_value().is_err());
        assert!(decode_record::<serde_json::Value>(&raw).is_err());
    }

    #[test]
    fn test_nesting_within_limit_flattens() {
        let mut graph = Graph::default();
        let mut child = graph.push(Node::Null);
        for _ in 0..(MAX_VALUE_DEPTH - 1) {
            child = graph.push(Node::Record(vec![("inner".into(), child)]));
        }
        graph.set_root(child);

        assert!(graph.to_value().is_ok());
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(decode("not json at all").is_err());
        assert!(decode("{\"root\":0,\"nodes\":[]}").is_err());
        // Out-of-range reference.
        assert!(decode("{\"root\":0,\"nodes\":[{\"List\":[7]}]}").is_err());
    }

    #[test]
    fn test_json_value_round_trip() {
        let value = serde_json::json!({
            "user": "octocat",
            "counts": [1, 2, 3],
            "nested": { "active": true, "note": null }
        });
        let graph = Graph::from_value(&value);
        let decoded = decode(&encode(&graph).unwrap()).unwrap();
        assert_eq!(decoded.to_value().unwrap(), value);
    }
}
