//! Edge-list output.
//!
//! One whitespace-separated pair of node labels per line, e.g. `s1 h3`. This
//! is the only topology format the crate writes; layout and rendering are
//! left to whatever tool reads the list.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::topology::TopologyError;

/// Render each label pair as a single `"<a> <b>"` line
pub fn edge_list_lines(edges: &[(String, String)]) -> Vec<String> {
    edges.iter().map(|(a, b)| format!("{} {}", a, b)).collect()
}

/// Write an edge list, one pair per line
pub fn write_edge_list<W: Write>(writer: &mut W, edges: &[(String, String)]) -> std::io::Result<()> {
    for line in edge_list_lines(edges) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()
}

/// Write an edge list to `path`, replacing any existing file
pub fn save_edge_list(path: &Path, edges: &[(String, String)]) -> Result<(), TopologyError> {
    let to_error = |source: std::io::Error| TopologyError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_edge_list(&mut writer, edges).map_err(to_error)?;

    info!("Wrote {} edges to {:?}", edges.len(), path);
    Ok(())
}
