//! Leaf-host attachment.
//!
//! Instead of relabelling generated nodes, every generated node is kept as a
//! switch and new host nodes are hung off the switches. Hosts produced this
//! way always have degree one, so no host-host link can exist.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::classifier::MIN_HOSTS;
use super::graph::GraphModel;
use super::types::{NodeId, Role};
use crate::config::ValidationError;
use crate::utils::validation::validate_probability;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendantHostAttacher {
    host_probability: f64,
}

impl PendantHostAttacher {
    pub fn new(host_probability: f64) -> Result<Self, ValidationError> {
        validate_probability("host_probability", host_probability)?;
        Ok(Self { host_probability })
    }

    /// Mark every existing node a switch and attach pendant hosts.
    ///
    /// Each switch receives a host with probability `host_probability`. If
    /// that yields fewer than [`MIN_HOSTS`], extra hosts go to randomly chosen
    /// switches, distinct ones first. Returns the new host handles.
    pub fn attach<R: Rng + ?Sized>(&self, graph: &mut GraphModel, rng: &mut R) -> Vec<NodeId> {
        let switches: Vec<NodeId> = graph.node_ids().collect();
        for &switch in &switches {
            graph.set_role(switch, Role::Switch);
        }

        let mut hosts = Vec::new();
        for &switch in &switches {
            if rng.gen_bool(self.host_probability) {
                hosts.push(attach_host(graph, switch));
            }
        }

        if hosts.len() < MIN_HOSTS {
            let missing = MIN_HOSTS - hosts.len();
            let extra: Vec<NodeId> = switches.choose_multiple(rng, missing).copied().collect();
            for switch in extra {
                hosts.push(attach_host(graph, switch));
            }
        }

        // Fewer switches than missing hosts; reuse switches at random
        while hosts.len() < MIN_HOSTS {
            let Some(&switch) = switches.choose(rng) else {
                break;
            };
            hosts.push(attach_host(graph, switch));
        }

        debug!("Attached {} pendant host(s) to {} switch(es)", hosts.len(), switches.len());
        hosts
    }
}

fn attach_host(graph: &mut GraphModel, switch: NodeId) -> NodeId {
    let host = graph.add_node();
    graph.set_role(host, Role::Host);
    graph.add_edge(switch, host);
    host
}
