use std::rc::Rc;

use crate::errors::*;
use crate::fastq::*;

pub mod node;

/// Pipeline of fastq record operations, where each operation is a node.
///
/// Records are pulled one at a time through the nodes in the order they were added.
/// A node that drops a record stops it from reaching the nodes after it.
pub struct Graph<'g> {
    nodes: Vec<Rc<dyn GraphNode + 'g>>,
}

pub trait GraphNode {
    /// Process a single record. Returns the record to pass on (or `None` to drop it)
    /// and whether the graph is done executing.
    fn run(&self, record: Option<FastqRecord>) -> Result<(Option<FastqRecord>, bool)>;

    /// Called once after the last record.
    fn finish(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}

impl<'g> Graph<'g> {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Add a node to the graph and return the node.
    pub fn add<G: GraphNode + 'g>(&mut self, node: G) -> Rc<G> {
        let a = Rc::new(node);
        let b = Rc::clone(&a);
        self.nodes.push(a);
        b
    }

    /// Run the graph until all records are processed, then finish every node.
    pub fn run(&self) -> Result<()> {
        loop {
            let (_, done) = self.run_one(None)?;
            if done {
                break;
            }
        }

        for node in &self.nodes {
            node.finish()?;
        }

        Ok(())
    }

    /// Run a single record through the graph.
    ///
    /// Returns an additional boolean indicating whether the graph is done executing.
    pub fn run_one(&self, mut curr: Option<FastqRecord>) -> Result<(Option<FastqRecord>, bool)> {
        for node in &self.nodes {
            let (c, done) = node.run(curr)?;
            curr = c;

            if done {
                return Ok((curr, done));
            }
            if curr.is_none() {
                break;
            }
        }

        Ok((curr, false))
    }
}

impl<'g> Default for Graph<'g> {
    fn default() -> Self {
        Self::new()
    }
}
