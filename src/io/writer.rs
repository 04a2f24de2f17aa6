use crate::{ClusterAssignment, Primitive, Result};
use std::{fs::File, io::Write, path::Path};

/// Write a partition as CSV: `ID,Cluster,coordinate1,...,coordinateM`, with 1-based cluster
/// numbers and raw coordinates. `M` is the longest coordinate vector in the partition.
/// Rows are grouped by cluster, ascending by id within a cluster.
pub fn write_csv<T: Primitive, W: Write>(clusters: &ClusterAssignment<T>, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    let mut header = vec!["ID".to_string(), "Cluster".to_string()];
    header.extend((1..=clusters.max_dims()).map(|d| format!("coordinate{}", d)));
    wtr.write_record(&header)?;

    for (idx, cluster) in clusters.iter().enumerate() {
        for (id, coords) in cluster.iter() {
            let mut record = vec![id.to_string(), (idx + 1).to_string()];
            record.extend(coords.iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write a partition to the file at **path**, see [`write_csv`].
pub fn save_csv<T: Primitive>(clusters: &ClusterAssignment<T>, path: impl AsRef<Path>) -> Result<()> {
    write_csv(clusters, File::create(path)?)
}
