use crate::types::Error;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs::{write, File},
    io::{BufReader, Read},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

#[inline]
/// This function is exactly similar to `std::fs::read_to_string`, but it doesn't include Byte Order Mark, if there's any.
pub fn read_to_string_without_bom<P: AsRef<Path>>(
    file_path: P,
) -> std::io::Result<String> {
    const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

    let file: File = File::open(file_path.as_ref())?;
    let mut reader: BufReader<File> = BufReader::new(file);

    let mut buffer: [u8; 3] = [0u8; 3];
    let mut content: String = String::new();

    let read_bytes: usize = reader.read(&mut buffer)?;

    if read_bytes != 3 || buffer != BOM {
        reader.seek_relative(-(read_bytes as i64))?;
    }

    reader.read_to_string(&mut content)?;
    Ok(content)
}

/// Reads and deserializes a JSON file, ignoring its Byte Order Mark.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let content: String = read_to_string_without_bom(path)
        .map_err(|err| Error::Io(path.to_path_buf(), err))?;

    Ok(serde_json::from_str(&content)?)
}

/// Serializes `value` as JSON with one item per line and no indentation.
pub(crate) fn to_json_string<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, Error> {
    let mut output: Vec<u8> = Vec::with_capacity(4096);
    let mut serializer =
        Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(b""));

    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), Error> {
    write(path, content).map_err(|err| Error::Io(path.to_path_buf(), err))
}

/// Recursively collects every file under `dir`, sorted by path.
pub(crate) fn collect_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path: PathBuf = err.path().unwrap_or(dir).to_path_buf();
            Error::Io(path, err.into())
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn strips_bom() {
        let dir = tempdir().unwrap();
        let with_bom = dir.path().join("a.json");
        let without_bom = dir.path().join("b.json");

        std::fs::write(&with_bom, "\u{FEFF}{\"a\": 1}").unwrap();
        std::fs::write(&without_bom, "{}").unwrap();

        assert_eq!(read_to_string_without_bom(&with_bom).unwrap(), "{\"a\": 1}");
        assert_eq!(read_to_string_without_bom(&without_bom).unwrap(), "{}");
    }

    #[test]
    fn sorted_recursive_listing() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        for name in ["b.gml", "a.gml", "sub/c.gml"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }

        let files: Vec<PathBuf> = collect_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            files,
            [
                PathBuf::from("a.gml"),
                PathBuf::from("b.gml"),
                PathBuf::from("sub/c.gml")
            ]
        );
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("CodeEntries");

        assert!(matches!(collect_files(&missing), Err(Error::Io(path, _)) if path == missing));
    }

    #[test]
    fn flat_json() {
        let value = serde_json::json!({"a": [1], "b": {}});
        assert_eq!(to_json_string(&value).unwrap(), "{\n\"a\": [\n1\n],\n\"b\": {}\n}");
    }
}
