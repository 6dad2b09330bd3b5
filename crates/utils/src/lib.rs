//! Test-support utilities: the [`graph!`] macro for building fixture graphs.

#[doc(hidden)]
pub use congraph_core as __core;

/// Declaratively builds a [`PropertyGraph`](congraph_core::PropertyGraph)
/// fixture.
///
/// Syntax: `graph!(<direction>; [<nodes>], [<edges>])` where `<direction>`
/// is `directed` or `undirected`, nodes are bare identifiers and edges are
/// `source - target` with an optional `: weight`. Node identifiers become
/// the node id strings; node and edge types default to `"node"` and
/// `"link"`.
///
/// ```
/// use congraph_utils::graph;
///
/// let graph = graph!(undirected; [a, b, c], [a - b, b - c: 2.0]);
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
#[macro_export]
macro_rules! graph {
    (@edge $graph:ident; $source:ident - $target:ident) => {
        $graph
            .insert_edge($crate::__core::Edge::new(
                stringify!($source),
                stringify!($target),
                "link",
            ))
            .expect("edge endpoints exist");
    };

    (@edge $graph:ident; $source:ident - $target:ident : $weight:expr) => {
        $graph
            .insert_edge(
                $crate::__core::Edge::new(stringify!($source), stringify!($target), "link")
                    .with_weight($weight),
            )
            .expect("edge endpoints exist");
    };

    (
        $direction:ident;
        [$($node:ident),* $(,)?],
        [$($source:ident - $target:ident $(: $weight:expr)?),* $(,)?]
    ) => {{
        let mut graph = $crate::__core::PropertyGraph::$direction();
        $(
            graph.insert_node($crate::__core::Node::new(stringify!($node), "node"));
        )*
        $(
            $crate::graph!(@edge graph; $source - $target $(: $weight)?);
        )*
        graph
    }};
}
