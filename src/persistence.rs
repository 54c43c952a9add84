// File: src/persistence.rs
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::types::Dataset;
use crate::error::{DatasetError, DatasetResult};

/// Writes one dataset record to `path`, creating parent directories as
/// needed. The record is serialized into a named temporary file beside the
/// destination and persisted over it, so a crashed run never leaves a
/// half-written file and reruns overwrite idempotently.
pub fn write_dataset(dataset: &Dataset, path: &Path) -> DatasetResult<()> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|e| DatasetError::io(parent_dir, e))?;

    let temp_file =
        NamedTempFile::new_in(parent_dir).map_err(|e| DatasetError::io(parent_dir, e))?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, dataset).map_err(|e| DatasetError::Serialization {
        reason: e.to_string(),
    })?;
    writer.flush().map_err(|e| DatasetError::io(path, e))?;
    drop(writer);

    temp_file
        .persist(path)
        .map_err(|e| DatasetError::io(path, e.error))?;
    Ok(())
}

/// Reads one dataset record back and checks its invariants before handing
/// it out; a decodable file with inconsistent indices is rejected the same
/// as an undecodable one.
pub fn read_dataset(path: &Path) -> DatasetResult<Dataset> {
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let reader = BufReader::new(file);
    let dataset: Dataset =
        bincode::deserialize_from(reader).map_err(|e| DatasetError::Serialization {
            reason: e.to_string(),
        })?;
    dataset
        .validate()
        .map_err(|reason| DatasetError::InvalidRecord { reason })?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    use crate::core::types::{Order, Substitution};

    fn sample() -> Dataset {
        Dataset {
            orders: vec![Order {
                items: vec![0, 1, 2, 0],
                subs: vec![Substitution {
                    index: 0,
                    sub_idxs: vec![1, 2],
                }],
            }],
            item_count: 3,
        }
    }

    #[test]
    fn round_trips_a_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders0.data");
        write_dataset(&sample(), &path).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), sample());
    }

    #[test]
    fn creates_missing_output_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dataset").join("orders5.data");
        write_dataset(&sample(), &path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn overwrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders0.data");
        let mut other = sample();
        other.orders[0].subs.clear();
        write_dataset(&other, &path).unwrap();
        write_dataset(&sample(), &path).unwrap();
        assert_eq!(read_dataset(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_an_io_failure() {
        let dir = TempDir::new().unwrap();
        let err = read_dataset(&dir.path().join("absent.data")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }), "{err}");
    }

    #[test]
    fn garbage_bytes_fail_deserialization() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders0.data");
        fs::write(&path, b"\xff\xfe\xfd").unwrap();
        let err = read_dataset(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Serialization { .. }), "{err}");
    }

    #[test]
    fn inconsistent_record_is_rejected_on_read() {
        // Decodes fine but breaks the index invariants: candidate 7 is out
        // of range. Written through bincode directly to bypass the writer.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("orders0.data");
        let mut broken = sample();
        broken.orders[0].subs[0].sub_idxs.push(7);
        let bytes = bincode::serialize(&broken).unwrap();
        fs::write(&path, bytes).unwrap();

        let err = read_dataset(&path).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidRecord { .. }), "{err}");
    }
}
