//! Sidecar annotation files
//!
//! Each image `dir/name.ext` gets a plain text file `dir/name.txt` holding one
//! box per line as `x_min y_min x_max y_max`.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::domain::BoundingBox;
use crate::error::{Error, Result};

/// Sidecar path for an image: same directory and base name, `.txt` extension
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension("txt")
}

/// Serialise boxes, one line each
pub fn to_string<'a>(boxes: impl IntoIterator<Item = &'a BoundingBox>) -> String {
    let mut out = String::new();
    for b in boxes {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{} {} {} {}", b.x_min, b.y_min, b.x_max, b.y_max);
    }
    out
}

/// Parse sidecar text.
///
/// Blank lines are skipped. Decimal values are rounded to the nearest pixel
/// so hand-edited files still load.
pub fn parse(text: &str) -> Result<Vec<BoundingBox>> {
    let mut boxes = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 4 {
            return Err(Error::SidecarParse {
                line: line_no,
                reason: format!("expected 4 numbers, found {}", fields.len()),
            });
        }

        let mut values = [0u32; 4];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = parse_coordinate(field).ok_or_else(|| Error::SidecarParse {
                line: line_no,
                reason: format!("`{field}` is not a non-negative number"),
            })?;
        }
        let [x_min, y_min, x_max, y_max] = values;
        boxes.push(BoundingBox::new(x_min, y_min, x_max, y_max));
    }

    Ok(boxes)
}

fn parse_coordinate(field: &str) -> Option<u32> {
    if let Ok(value) = field.parse::<u32>() {
        return Some(value);
    }
    let value: f64 = field.parse().ok()?;
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Some(value.round() as u32)
    } else {
        None
    }
}

/// Read the sidecar at `path`. A missing file is `Ok(None)`.
pub fn read(path: &Path) -> Result<Option<Vec<BoundingBox>>> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse(&text).map(Some),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::SidecarRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overwrite the sidecar at `path`.
///
/// The text goes to a temporary file in the same directory which is then
/// renamed over `path`, so a failed write leaves the old file intact.
pub fn write<'a>(path: &Path, boxes: impl IntoIterator<Item = &'a BoundingBox>) -> Result<()> {
    let contents = to_string(boxes);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| Error::SidecarWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tempfile::Builder::new()
        .prefix(".imagetagger-")
        .suffix(".txt")
        .tempfile_in(dir)
        .map_err(write_err)?;
    file.write_all(contents.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path).map_err(|err| write_err(err.error))?;

    log::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path_replaces_extension() {
        assert_eq!(
            sidecar_path(Path::new("/data/img/photo.jpg")),
            PathBuf::from("/data/img/photo.txt")
        );
        assert_eq!(
            sidecar_path(Path::new("scan.v2.png")),
            PathBuf::from("scan.v2.txt")
        );
        assert_eq!(sidecar_path(Path::new("noext")), PathBuf::from("noext.txt"));
    }

    #[test]
    fn test_format_example_line() {
        let boxes = [BoundingBox::new(10, 10, 40, 30)];
        assert_eq!(to_string(&boxes), "10 10 40 30\n");
        assert_eq!(to_string(&[]), "");
    }

    #[test]
    fn test_round_trip_integer_boxes() {
        let boxes = vec![
            BoundingBox::new(0, 0, 1, 1),
            BoundingBox::new(10, 10, 40, 30),
            BoundingBox::new(10, 10, 40, 30),
            BoundingBox::new(4000, 3000, 4095, 3071),
        ];
        assert_eq!(parse(&to_string(&boxes)).unwrap(), boxes);
    }

    #[test]
    fn test_parse_tolerates_blank_lines_and_spacing() {
        let text = "\n  1\t2  3 4 \n\n5 6 7 8\r\n";
        assert_eq!(
            parse(text).unwrap(),
            vec![BoundingBox::new(1, 2, 3, 4), BoundingBox::new(5, 6, 7, 8)]
        );
    }

    #[test]
    fn test_parse_rounds_decimals() {
        assert_eq!(
            parse("1.4 2.6 10.0 20.5").unwrap(),
            vec![BoundingBox::new(1, 3, 10, 21)]
        );
    }

    #[test]
    fn test_parse_reports_line_number() {
        match parse("1 2 3 4\n1 2 3\n") {
            Err(Error::SidecarParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
        match parse("1 2 3 4\n\n1 -2 3 4\n") {
            Err(Error::SidecarParse { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("-2"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(parse("a b c d").is_err());
        assert!(parse("1 2 3 inf").is_err());
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read(&dir.path().join("missing.txt")).unwrap().is_none());
    }

    #[test]
    fn test_read_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(dir.path()).unwrap_err();
        assert!(matches!(err, Error::SidecarRead { ref path, .. } if path == dir.path()));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.txt");
        let boxes = vec![BoundingBox::new(10, 10, 40, 30), BoundingBox::new(1, 2, 3, 4)];

        write(&path, &boxes).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "10 10 40 30\n1 2 3 4\n"
        );
        assert_eq!(read(&path).unwrap(), Some(boxes));
    }

    #[test]
    fn test_write_overwrites_and_empty_session_gives_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.txt");
        std::fs::write(&path, "stale contents\n").unwrap();

        write(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        // No temporary files left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("img.txt");
        let err = write(&path, &[BoundingBox::new(1, 1, 2, 2)]).unwrap_err();
        assert!(matches!(err, Error::SidecarWrite { .. }));
    }
}
