use crate::error::Result;
use crate::tree::ExpressionTree;
use crate::types::NodeId;

impl ExpressionTree {
    /// Refresh every time-series node under `id` for the current data epoch.
    ///
    /// Nodes are visited in pre-order; nodes that do not depend on a series
    /// source are skipped. Returns the number of refreshed nodes.
    pub fn pre_process(&mut self, id: NodeId) -> Result<usize> {
        let mut refreshed = 0;
        for node_id in self.preorder(id)? {
            let node = self.node_mut(node_id)?;
            if node.is_time_series() {
                node.kind_mut().pre_process()?;
                refreshed += 1;
            }
        }
        log::debug!("Preprocessed {} time-series nodes under {}", refreshed, id);
        Ok(refreshed)
    }

    /// Some time-series node under `id` has no window for the current epoch.
    pub fn needs_pre_process(&self, id: NodeId) -> Result<bool> {
        for node_id in self.preorder(id)? {
            let ready = self
                .node(node_id)?
                .kind()
                .as_time_series()
                .map_or(true, |series| series.is_ready());
            if !ready {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
